//! Stochastic oscillator (%K / %D)

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::models::bar::Bar;

/// Lookback and smoothing lengths of the stochastic oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StochasticParams {
    pub k: u32,
    pub d: u32,
    pub smooth_k: u32,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k: 5,
            d: 3,
            smooth_k: 3,
        }
    }
}

impl StochasticParams {
    /// Index of the first defined smoothed %K.
    pub fn warmup(&self) -> usize {
        (self.k as usize).saturating_sub(1) + (self.smooth_k as usize).saturating_sub(1)
    }
}

#[derive(Debug, Clone)]
pub struct StochasticSeries {
    /// Smoothed %K in [0, 100].
    pub k: Vec<f64>,
    /// SMA of the smoothed %K.
    pub d: Vec<f64>,
    pub params: StochasticParams,
}

/// Calculate the stochastic oscillator
///
/// raw %K = 100 * (close - lowest low) / (highest high - lowest low) over `k` bars,
/// smoothed %K = SMA(raw %K, smooth_k), %D = SMA(smoothed %K, d).
/// A flat window (high == low) reads as 50.
pub fn calculate_stochastic(bars: &[Bar], params: StochasticParams) -> StochasticSeries {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let highest = math::rolling_max(&highs, params.k as usize);
    let lowest = math::rolling_min(&lows, params.k as usize);

    let raw_k: Vec<f64> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let (hh, ll) = (highest[i], lowest[i]);
            if hh.is_nan() || ll.is_nan() {
                f64::NAN
            } else if hh - ll == 0.0 {
                50.0
            } else {
                100.0 * (bar.close - ll) / (hh - ll)
            }
        })
        .collect();

    let k = math::sma_series(&raw_k, params.smooth_k as usize);
    let d = math::sma_series(&k, params.d as usize);

    StochasticSeries { k, d, params }
}

/// Calculate the stochastic oscillator with default parameters (5, 3, 3)
pub fn calculate_stochastic_default(bars: &[Bar]) -> StochasticSeries {
    calculate_stochastic(bars, StochasticParams::default())
}
