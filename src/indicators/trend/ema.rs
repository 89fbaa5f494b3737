//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::bar::Bar;

/// EMA of close for every bar. The first `period - 1` slots are `NaN`.
pub fn calculate_ema(bars: &[Bar], period: u32) -> Vec<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    math::ema_series(&closes, period as usize)
}

/// Calculate several EMAs at once, in the order of `periods`
pub fn calculate_emas(bars: &[Bar], periods: &[u32]) -> Vec<(u32, Vec<f64>)> {
    periods
        .iter()
        .map(|&period| (period, calculate_ema(bars, period)))
        .collect()
}
