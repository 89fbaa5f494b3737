//! Per-symbol detection: trend gate on the higher timeframe, trigger on the
//! execution timeframe, both read at the last closed bar.

use tracing::{debug, info, warn};

use crate::config::{DetectorConfig, ScanConfig};
use crate::error::SymbolError;
use crate::indicators::{IndicatorFrame, IndicatorRequest, Window3};
use crate::models::bar::BarSeries;
use crate::models::signal::{Signal, SignalDirection};
use crate::models::universe::{GapThresholds, TargetEntry};
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::{
    Decision, ExecutionReadings, SignalEngine, SkipReason, TriggerConditions,
};

/// Result of evaluating one symbol that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Signal(Signal),
    /// Regime qualifies, no trigger on this bar.
    Waiting(SignalDirection),
    Skipped(SkipReason),
}

impl Evaluation {
    pub fn signal(&self) -> Option<&Signal> {
        match self {
            Evaluation::Signal(signal) => Some(signal),
            _ => None,
        }
    }
}

/// Closed-bar ADX of the trend series and whether it passes the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAssessment {
    pub adx: f64,
    pub trending: bool,
}

pub struct SignalDetector {
    config: DetectorConfig,
    gaps: GapThresholds,
}

impl SignalDetector {
    pub fn new(config: DetectorConfig, gaps: GapThresholds) -> Self {
        Self { config, gaps }
    }

    pub fn from_scan_config(config: &ScanConfig) -> Self {
        Self::new(config.detector.clone(), config.gaps)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn gaps(&self) -> &GapThresholds {
        &self.gaps
    }

    pub fn trend_requests(&self) -> Vec<IndicatorRequest> {
        vec![IndicatorRequest::Adx {
            period: self.config.adx_period,
        }]
    }

    pub fn execution_requests(&self) -> Vec<IndicatorRequest> {
        vec![
            IndicatorRequest::Ema {
                period: self.config.ema_fast,
            },
            IndicatorRequest::Ema {
                period: self.config.ema_slow,
            },
            IndicatorRequest::Ema {
                period: self.config.ema_trend,
            },
            IndicatorRequest::Stochastic(self.config.stochastic),
        ]
    }

    /// Read the closed-bar ADX of the trend series.
    pub fn assess_trend(&self, series: &BarSeries) -> Result<TrendAssessment, SymbolError> {
        let requests = self.trend_requests();
        warn_if_short(series, &requests);

        let frame = IndicatorFrame::compute(series, &requests);
        let adx = series
            .closed_index()
            .and_then(|t| {
                frame
                    .adx(self.config.adx_period)
                    .and_then(|values| IndicatorFrame::value_at(values, t))
            })
            .ok_or_else(|| insufficient(series))?;

        Ok(TrendAssessment {
            adx,
            trending: SignalEngine::trend_gate(adx, self.config.adx_threshold).is_ok(),
        })
    }

    /// Indicator readings at `t - 2..=t` of the execution series.
    pub fn read_execution(&self, series: &BarSeries) -> Result<ExecutionReadings, SymbolError> {
        let requests = self.execution_requests();
        warn_if_short(series, &requests);

        let frame = IndicatorFrame::compute(series, &requests);
        let t = series.closed_index().ok_or_else(|| insufficient(series))?;
        let window = |values: Option<&[f64]>| values.and_then(|v| Window3::read(v, t));

        let readings = (|| {
            Some(ExecutionReadings {
                price: series.bars.get(t)?.close,
                bar_time: series.bars.get(t)?.timestamp,
                ema_fast: window(frame.ema(self.config.ema_fast))?,
                ema_slow: window(frame.ema(self.config.ema_slow))?,
                ema_trend: IndicatorFrame::value_at(frame.ema(self.config.ema_trend)?, t)?,
                stoch_k: window(frame.stoch_k(self.config.stochastic))?,
            })
        })();

        readings.ok_or_else(|| insufficient(series))
    }

    /// Decide on the execution series of a symbol whose trend gate passed.
    pub fn assess_execution(
        &self,
        entry: &TargetEntry,
        series: &BarSeries,
        trend_adx: f64,
    ) -> Result<Evaluation, SymbolError> {
        let readings = self.read_execution(series)?;
        let gap_threshold = self.gaps.for_tier(entry.tier);
        let conditions = TriggerConditions::derive(
            &readings,
            gap_threshold,
            self.config.oversold,
            self.config.overbought,
        );

        info!(
            symbol = %entry.symbol,
            tier = %entry.tier,
            price = readings.price,
            ema_fast = readings.ema_fast.current,
            ema_slow = readings.ema_slow.current,
            ema_trend = readings.ema_trend,
            gap = conditions.gap,
            stoch_k = readings.stoch_k.current,
            oscillator = %conditions.oscillator_state(),
            adx = trend_adx,
            "{}: price {:.6} gap {:.2}% %K {:.1} ({}) ADX {:.1}",
            entry.symbol,
            readings.price,
            conditions.gap,
            readings.stoch_k.current,
            conditions.oscillator_state(),
            trend_adx
        );

        let evaluation = match SignalEngine::decide(&readings, &conditions) {
            Decision::Trigger { direction, trigger } => Evaluation::Signal(Signal {
                symbol: entry.symbol.clone(),
                direction,
                trigger,
                price: readings.price,
                gap: conditions.gap,
                tier: entry.tier,
                gap_threshold,
                bar_time: readings.bar_time,
            }),
            Decision::Waiting(direction) => Evaluation::Waiting(direction),
            Decision::Skip(reason) => Evaluation::Skipped(reason),
        };

        Ok(evaluation)
    }

    /// Full decision from already fetched series. Same inputs, same result.
    pub fn evaluate_series(
        &self,
        entry: &TargetEntry,
        trend: &BarSeries,
        execution: &BarSeries,
    ) -> Result<Evaluation, SymbolError> {
        let assessment = self.assess_trend(trend)?;
        if !assessment.trending {
            return Ok(Evaluation::Skipped(SkipReason::WeakTrend {
                adx: assessment.adx,
            }));
        }
        self.assess_execution(entry, execution, assessment.adx)
    }

    /// Fetch both timeframes and evaluate. The execution series is only
    /// fetched once the trend gate passes.
    pub async fn detect(
        &self,
        provider: &dyn MarketDataProvider,
        entry: &TargetEntry,
    ) -> Result<Evaluation, SymbolError> {
        let trend = provider
            .fetch_bars(
                &entry.symbol,
                self.config.trend_interval,
                self.config.trend_limit,
            )
            .await?;

        let assessment = self.assess_trend(&trend)?;
        if !assessment.trending {
            debug!(
                symbol = %entry.symbol,
                adx = assessment.adx,
                "{}: ADX {:.1} below {}, skipping",
                entry.symbol,
                assessment.adx,
                self.config.adx_threshold
            );
            return Ok(Evaluation::Skipped(SkipReason::WeakTrend {
                adx: assessment.adx,
            }));
        }

        let execution = provider
            .fetch_bars(
                &entry.symbol,
                self.config.exec_interval,
                self.config.exec_limit,
            )
            .await?;

        let evaluation = self.assess_execution(entry, &execution, assessment.adx)?;
        if let Evaluation::Signal(signal) = &evaluation {
            info!(
                symbol = %signal.symbol,
                direction = %signal.direction,
                trigger = %signal.trigger,
                tier = %signal.tier,
                price = signal.price,
                gap = signal.gap,
                "{}: {} {} signal",
                signal.symbol,
                signal.direction,
                signal.trigger
            );
        }
        Ok(evaluation)
    }
}

fn insufficient(series: &BarSeries) -> SymbolError {
    SymbolError::InsufficientHistory {
        interval: series.interval,
        bars: series.len(),
    }
}

/// Indicators still run on short history; values are less reliable.
fn warn_if_short(series: &BarSeries, requests: &[IndicatorRequest]) {
    let warmup = requests.iter().map(IndicatorRequest::warmup).max();
    let needed = warmup.unwrap_or(0) + 3;
    if series.len() < needed {
        warn!(
            symbol = %series.symbol,
            interval = %series.interval,
            bars = series.len(),
            needed,
            "{}: only {} {} bars, indicators degraded",
            series.symbol,
            series.len(),
            series.interval
        );
    }
}
