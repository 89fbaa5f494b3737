//! Series math shared by the indicators.
//!
//! Every series function returns a vector aligned 1:1 with its input. Slots
//! without enough history hold `NaN`, and a `NaN` in the input taints every
//! later output of recursive smoothers.

/// True range of one bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Simple moving average over a trailing window.
pub fn sma_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().sum::<f64>() / period as f64;
    }
    result
}

/// Exponential moving average, alpha = 2 / (period + 1), seeded with the SMA
/// of the first `period` values.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    smooth_from_seed(values, period, alpha)
}

/// Wilder smoothing, alpha = 1 / period, seeded with the mean of the first
/// `period` defined values.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 1.0 / period.max(1) as f64;
    smooth_from_seed(values, period, alpha)
}

fn smooth_from_seed(values: &[f64], period: usize, alpha: f64) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 {
        return result;
    }

    // Leading NaNs come from upstream warm-up; the seed window starts after them.
    let start = match values.iter().position(|v| !v.is_nan()) {
        Some(start) => start,
        None => return result,
    };
    let seed_end = start + period;
    if seed_end > n {
        return result;
    }

    let seed_window = &values[start..seed_end];
    if seed_window.iter().any(|v| v.is_nan()) {
        return result;
    }
    let seed = seed_window.iter().sum::<f64>() / period as f64;
    result[seed_end - 1] = seed;

    let mut prev = seed;
    for i in seed_end..n {
        if values[i].is_nan() {
            return result;
        }
        let next = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = next;
        prev = next;
    }
    result
}

/// Highest value over a trailing window.
pub fn rolling_max(values: &[f64], period: usize) -> Vec<f64> {
    rolling_fold(values, period, f64::max)
}

/// Lowest value over a trailing window.
pub fn rolling_min(values: &[f64], period: usize) -> Vec<f64> {
    rolling_fold(values, period, f64::min)
}

fn rolling_fold(values: &[f64], period: usize, pick: fn(f64, f64) -> f64) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().copied().fold(window[0], pick);
    }
    result
}
