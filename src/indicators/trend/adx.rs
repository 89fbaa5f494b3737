//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::models::bar::Bar;

/// Per-bar ADX with its directional components.
#[derive(Debug, Clone)]
pub struct AdxSeries {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
    pub period: u32,
}

/// Calculate ADX over every bar
///
/// ADX measures trend strength regardless of direction. +DM, -DM and TR are
/// Wilder-smoothed into +DI/-DI, and ADX is the Wilder-smoothed DX. Values
/// become defined after roughly `2 * period` bars.
pub fn calculate_adx(bars: &[Bar], period: u32) -> AdxSeries {
    let n = bars.len();
    let period_len = period as usize;

    let mut tr = vec![f64::NAN; n];
    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for i in 1..n {
        tr[i] = math::true_range(bars[i].high, bars[i].low, bars[i - 1].close);

        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;

        plus_dm[i] = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        minus_dm[i] = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };
    }

    let smooth_tr = math::wilder_smooth(&tr, period_len);
    let smooth_plus = math::wilder_smooth(&plus_dm, period_len);
    let smooth_minus = math::wilder_smooth(&minus_dm, period_len);

    let mut plus_di = vec![f64::NAN; n];
    let mut minus_di = vec![f64::NAN; n];
    let mut dx = vec![f64::NAN; n];

    for i in 0..n {
        if smooth_tr[i].is_nan() || smooth_plus[i].is_nan() || smooth_minus[i].is_nan() {
            continue;
        }

        // A range of zero means no directional movement at all.
        if smooth_tr[i] == 0.0 {
            plus_di[i] = 0.0;
            minus_di[i] = 0.0;
            dx[i] = 0.0;
            continue;
        }

        plus_di[i] = 100.0 * smooth_plus[i] / smooth_tr[i];
        minus_di[i] = 100.0 * smooth_minus[i] / smooth_tr[i];

        let di_sum = plus_di[i] + minus_di[i];
        dx[i] = if di_sum > 0.0 {
            100.0 * (plus_di[i] - minus_di[i]).abs() / di_sum
        } else {
            0.0
        };
    }

    AdxSeries {
        adx: math::wilder_smooth(&dx, period_len),
        plus_di,
        minus_di,
        period,
    }
}

/// Calculate ADX with default period (14)
pub fn calculate_adx_default(bars: &[Bar]) -> AdxSeries {
    calculate_adx(bars, 14)
}
