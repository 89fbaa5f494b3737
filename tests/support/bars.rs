//! Bar builders and market shapes shared by unit and integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use trendscan::models::bar::{Bar, BarSeries, Interval};

pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

/// One bar per close. Each bar opens at the previous close with a 0.1 wick.
pub fn bars_from_closes(closes: &[f64], start: f64) -> Vec<Bar> {
    let mut prev = start;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = prev;
            prev = close;
            Bar::new(
                open,
                open.max(close) + 0.1,
                open.min(close) - 0.1,
                close,
                1000.0,
                base_time() + Duration::minutes(15 * i as i64),
            )
        })
        .collect()
}

pub fn series(symbol: &str, interval: Interval, bars: Vec<Bar>) -> BarSeries {
    BarSeries::new(symbol, interval, bars)
}

pub fn rising_closes(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

/// Long uptrend, `pullback` bars down by `drop`, then the closed bar at
/// `low + jump` and a forming bar at `low + live`.
pub fn pullback_closes(pullback: usize, drop: f64, jump: f64, live: f64) -> Vec<f64> {
    let mut closes = rising_closes(480, 100.0, 0.2);
    let mut last = closes[closes.len() - 1];
    for _ in 0..pullback {
        last -= drop;
        closes.push(last);
    }
    closes.push(last + jump);
    closes.push(last + live);
    closes
}

/// EMA13 crosses above EMA21 on the closed bar after an oversold dip.
/// The forming bar crashes, which would undo the cross if it were read.
pub fn long_cross_bars() -> Vec<Bar> {
    bars_from_closes(&pullback_closes(10, 0.5, 7.0, -20.0), 100.0)
}

/// EMA13 turns up on the closed bar while staying above EMA21, gap ~0.18%.
pub fn long_curve_bars() -> Vec<Bar> {
    bars_from_closes(&pullback_closes(6, 0.5, 3.0, -20.0), 100.0)
}

/// Mirror image of [`long_cross_bars`].
pub fn short_cross_bars() -> Vec<Bar> {
    let closes: Vec<f64> = pullback_closes(10, 0.5, 7.0, -20.0)
        .into_iter()
        .map(|c| 400.0 - c)
        .collect();
    bars_from_closes(&closes, 300.0)
}

/// Steady climb; ADX saturates near 100.
pub fn trending_bars() -> Vec<Bar> {
    bars_from_closes(&rising_closes(100, 100.0, 0.5), 100.0)
}

/// Triangle wave with period 8; ADX stays around 10.
pub fn choppy_bars() -> Vec<Bar> {
    let closes: Vec<f64> = (0..100)
        .map(|i| {
            let phase = (i % 4) as f64;
            if i % 8 < 4 {
                100.0 + phase
            } else {
                104.0 - phase
            }
        })
        .collect();
    bars_from_closes(&closes, 100.0)
}
