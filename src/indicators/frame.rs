//! Indicator requests and the per-bar frame they produce

use std::collections::HashMap;

use crate::indicators::momentum::{calculate_stochastic, StochasticParams};
use crate::indicators::trend::{calculate_adx, calculate_ema};
use crate::models::bar::BarSeries;

/// One indicator to compute over a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorRequest {
    Adx { period: u32 },
    Ema { period: u32 },
    Stochastic(StochasticParams),
}

impl IndicatorRequest {
    /// Number of leading bars whose value is undefined.
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorRequest::Adx { period } => 2 * (*period as usize).max(1) - 1,
            IndicatorRequest::Ema { period } => (*period as usize).saturating_sub(1),
            IndicatorRequest::Stochastic(params) => params.warmup(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            IndicatorRequest::Adx { period } => format!("adx_{}", period),
            IndicatorRequest::Ema { period } => format!("ema_{}", period),
            IndicatorRequest::Stochastic(p) => format!("stoch_k_{}_{}_{}", p.k, p.d, p.smooth_k),
        }
    }
}

/// Indicator values aligned 1:1 with the bars of one series.
///
/// Warm-up slots are `NaN`. Read values through [`IndicatorFrame::value_at`]
/// or [`crate::indicators::Window3`], which refuse undefined slots.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFrame {
    len: usize,
    adx: HashMap<u32, Vec<f64>>,
    ema: HashMap<u32, Vec<f64>>,
    stoch_k: HashMap<StochasticParams, Vec<f64>>,
}

impl IndicatorFrame {
    /// Compute every requested indicator over `series`.
    ///
    /// Short series are not rejected; they simply leave more slots undefined.
    pub fn compute(series: &BarSeries, requests: &[IndicatorRequest]) -> Self {
        let mut frame = IndicatorFrame {
            len: series.len(),
            ..Default::default()
        };

        for request in requests {
            match *request {
                IndicatorRequest::Adx { period } => {
                    frame
                        .adx
                        .entry(period)
                        .or_insert_with(|| calculate_adx(&series.bars, period).adx);
                }
                IndicatorRequest::Ema { period } => {
                    frame
                        .ema
                        .entry(period)
                        .or_insert_with(|| calculate_ema(&series.bars, period));
                }
                IndicatorRequest::Stochastic(params) => {
                    frame
                        .stoch_k
                        .entry(params)
                        .or_insert_with(|| calculate_stochastic(&series.bars, params).k);
                }
            }
        }

        frame
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn adx(&self, period: u32) -> Option<&[f64]> {
        self.adx.get(&period).map(Vec::as_slice)
    }

    pub fn ema(&self, period: u32) -> Option<&[f64]> {
        self.ema.get(&period).map(Vec::as_slice)
    }

    pub fn stoch_k(&self, params: StochasticParams) -> Option<&[f64]> {
        self.stoch_k.get(&params).map(Vec::as_slice)
    }

    /// Defined value of `series` at `index`, or `None` inside warm-up.
    pub fn value_at(series: &[f64], index: usize) -> Option<f64> {
        series.get(index).copied().filter(|v| v.is_finite())
    }
}
