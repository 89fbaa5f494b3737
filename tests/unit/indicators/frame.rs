//! Unit tests for the indicator frame and the closed-bar window

use crate::support::{long_cross_bars, series};
use trendscan::indicators::momentum::StochasticParams;
use trendscan::indicators::{IndicatorFrame, IndicatorRequest, Window3};
use trendscan::models::bar::Interval;

#[test]
fn test_frame_aligns_with_bars() {
    let series = series("BTC/USD", Interval::FifteenMinutes, long_cross_bars());
    let requests = [
        IndicatorRequest::Ema { period: 13 },
        IndicatorRequest::Ema { period: 100 },
        IndicatorRequest::Adx { period: 14 },
        IndicatorRequest::Stochastic(StochasticParams::default()),
    ];
    let frame = IndicatorFrame::compute(&series, &requests);

    assert_eq!(frame.len(), series.len());
    assert_eq!(frame.ema(13).map(<[f64]>::len), Some(series.len()));
    assert!(frame.adx(14).is_some());
    assert!(frame.stoch_k(StochasticParams::default()).is_some());
    assert!(
        frame.ema(21).is_none(),
        "only requested indicators are computed"
    );
}

#[test]
fn test_value_at_refuses_warmup() {
    let series = series("BTC/USD", Interval::FifteenMinutes, long_cross_bars());
    let frame = IndicatorFrame::compute(&series, &[IndicatorRequest::Ema { period: 100 }]);
    let ema = frame.ema(100).expect("requested");

    assert_eq!(IndicatorFrame::value_at(ema, 98), None);
    assert!(IndicatorFrame::value_at(ema, 99).is_some());
    assert_eq!(IndicatorFrame::value_at(ema, series.len()), None);
}

#[test]
fn test_window_needs_three_defined_values() {
    let series = series("BTC/USD", Interval::FifteenMinutes, long_cross_bars());
    let frame = IndicatorFrame::compute(&series, &[IndicatorRequest::Ema { period: 13 }]);
    let ema = frame.ema(13).expect("requested");

    assert!(Window3::read(ema, 13).is_none());
    assert!(Window3::read(ema, 14).is_some());
}

#[test]
fn test_request_warmup() {
    assert_eq!(IndicatorRequest::Ema { period: 21 }.warmup(), 20);
    assert_eq!(IndicatorRequest::Adx { period: 14 }.warmup(), 27);
    assert_eq!(
        IndicatorRequest::Stochastic(StochasticParams::default()).warmup(),
        6
    );
}
