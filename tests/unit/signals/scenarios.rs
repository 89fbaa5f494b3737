//! Detector scenarios on synthetic market shapes

use chrono::Duration;

use crate::support::{
    base_time, choppy_bars, long_cross_bars, long_curve_bars, series, short_cross_bars,
    trending_bars,
};
use trendscan::config::DetectorConfig;
use trendscan::error::SymbolError;
use trendscan::models::bar::Interval;
use trendscan::models::signal::{SignalDirection, TriggerKind};
use trendscan::models::universe::{GapThresholds, SensitivityTier, TargetEntry};
use trendscan::signals::detector::{Evaluation, SignalDetector};
use trendscan::signals::engine::SkipReason;

fn detector() -> SignalDetector {
    SignalDetector::new(DetectorConfig::default(), GapThresholds::default())
}

fn strict(symbol: &str) -> TargetEntry {
    TargetEntry::new(symbol, SensitivityTier::Strict)
}

#[test]
fn test_long_cross_on_closed_bar() {
    let trend = series("BTC/USD", Interval::OneHour, trending_bars());
    let execution = series("BTC/USD", Interval::FifteenMinutes, long_cross_bars());
    let t = execution.closed_index().expect("enough bars");

    let evaluation = detector()
        .evaluate_series(&strict("BTC/USD"), &trend, &execution)
        .expect("evaluates");

    let signal = evaluation.signal().expect("long cross signal");
    assert_eq!(signal.direction, SignalDirection::Long);
    assert_eq!(signal.trigger, TriggerKind::Cross);
    assert_eq!(signal.tier, SensitivityTier::Strict);
    assert_eq!(signal.gap_threshold, 0.5);
    assert_eq!(signal.price, execution.bars[t].close);
    assert_eq!(
        signal.bar_time,
        base_time() + Duration::minutes(15 * t as i64)
    );
    assert!(signal.gap < 0.5);
}

#[test]
fn test_forming_bar_is_ignored() {
    let trend = series("BTC/USD", Interval::OneHour, trending_bars());
    let mut bars = long_cross_bars();
    let last = bars.len() - 1;
    bars[last].close = 1_000.0;
    bars[last].high = 1_000.1;
    let execution = series("BTC/USD", Interval::FifteenMinutes, bars);

    let evaluation = detector()
        .evaluate_series(&strict("BTC/USD"), &trend, &execution)
        .expect("evaluates");
    assert_eq!(
        evaluation.signal().map(|s| s.trigger),
        Some(TriggerKind::Cross)
    );
}

#[test]
fn test_long_curve() {
    let trend = series("ETH/USD", Interval::OneHour, trending_bars());
    let execution = series("ETH/USD", Interval::FifteenMinutes, long_curve_bars());

    for tier in [SensitivityTier::Strict, SensitivityTier::Loose] {
        let entry = TargetEntry::new("ETH/USD", tier);
        let evaluation = detector()
            .evaluate_series(&entry, &trend, &execution)
            .expect("evaluates");
        let signal = evaluation.signal().expect("curve signal");
        assert_eq!(signal.direction, SignalDirection::Long);
        assert_eq!(signal.trigger, TriggerKind::Curve);
        assert_eq!(signal.tier, tier);
    }
}

#[test]
fn test_short_cross() {
    let trend = series("SOL/USD", Interval::OneHour, trending_bars());
    let execution = series("SOL/USD", Interval::FifteenMinutes, short_cross_bars());

    let evaluation = detector()
        .evaluate_series(&strict("SOL/USD"), &trend, &execution)
        .expect("evaluates");
    let signal = evaluation.signal().expect("short cross signal");
    assert_eq!(signal.direction, SignalDirection::Short);
    assert_eq!(signal.trigger, TriggerKind::Cross);
}

#[test]
fn test_weak_trend_yields_no_signal() {
    let trend = series("BTC/USD", Interval::OneHour, choppy_bars());
    let execution = series("BTC/USD", Interval::FifteenMinutes, long_cross_bars());

    let evaluation = detector()
        .evaluate_series(&strict("BTC/USD"), &trend, &execution)
        .expect("evaluates");
    match evaluation {
        Evaluation::Skipped(SkipReason::WeakTrend { adx }) => assert!(adx < 25.0),
        other => panic!("expected weak trend, got {:?}", other),
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let trend = series("BTC/USD", Interval::OneHour, trending_bars());
    let execution = series("BTC/USD", Interval::FifteenMinutes, long_cross_bars());
    let detector = detector();
    let entry = strict("BTC/USD");

    let first = detector.evaluate_series(&entry, &trend, &execution).expect("evaluates");
    let second = detector.evaluate_series(&entry, &trend, &execution).expect("evaluates");
    assert_eq!(first, second);
}

#[test]
fn test_short_history_is_insufficient() {
    let trend = series("BTC/USD", Interval::OneHour, trending_bars()[..20].to_vec());
    let execution = series("BTC/USD", Interval::FifteenMinutes, long_cross_bars());

    let result = detector().evaluate_series(&strict("BTC/USD"), &trend, &execution);
    assert!(matches!(
        result,
        Err(SymbolError::InsufficientHistory {
            interval: Interval::OneHour,
            bars: 20
        })
    ));

    let trend = series("BTC/USD", Interval::OneHour, trending_bars());
    let execution = series(
        "BTC/USD",
        Interval::FifteenMinutes,
        long_cross_bars()[..50].to_vec(),
    );
    let result = detector().evaluate_series(&strict("BTC/USD"), &trend, &execution);
    assert!(matches!(
        result,
        Err(SymbolError::InsufficientHistory {
            interval: Interval::FifteenMinutes,
            ..
        })
    ));
}

#[test]
fn test_empty_series_is_insufficient() {
    let trend = series("BTC/USD", Interval::OneHour, Vec::new());
    let execution = series("BTC/USD", Interval::FifteenMinutes, Vec::new());
    assert!(detector()
        .evaluate_series(&strict("BTC/USD"), &trend, &execution)
        .is_err());
}
