//! Unit tests for ADX indicator

use crate::support::{bars_from_closes, choppy_bars, trending_bars};
use trendscan::indicators::trend::{calculate_adx, calculate_adx_default};

#[test]
fn test_adx_warmup_spans_two_periods() {
    let bars = trending_bars();
    let adx = calculate_adx(&bars, 14).adx;

    assert_eq!(adx.len(), bars.len());
    assert!(adx[..27].iter().all(|v| v.is_nan()));
    assert!(adx[27..].iter().all(|v| v.is_finite()));
}

#[test]
fn test_adx_strong_trend() {
    let series = calculate_adx_default(&trending_bars());
    let t = series.adx.len() - 2;

    assert!(
        series.adx[t] > 25.0,
        "ADX {} should show a trend",
        series.adx[t]
    );
    assert!(series.plus_di[t] > series.minus_di[t]);
}

#[test]
fn test_adx_choppy_market_stays_low() {
    let series = calculate_adx_default(&choppy_bars());
    let t = series.adx.len() - 2;
    assert!(
        series.adx[t] < 25.0,
        "ADX {} should be below the gate",
        series.adx[t]
    );
}

#[test]
fn test_adx_flat_market_is_zero() {
    let bars = bars_from_closes(&[100.0; 40], 100.0);
    let series = calculate_adx(&bars, 14);
    assert!(series.adx[39].abs() < 1e-12);
}

#[test]
fn test_adx_bounded() {
    let series = calculate_adx_default(&choppy_bars());
    assert!(series
        .adx
        .iter()
        .filter(|v| v.is_finite())
        .all(|v| (0.0..=100.0).contains(v)));
}
