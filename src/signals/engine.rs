//! Trigger decision on the closed execution bar.
//!
//! Everything here is a pure function of indicator readings, so the same
//! inputs always produce the same decision.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::indicators::Window3;
use crate::models::signal::{SignalDirection, TriggerKind};

/// Execution-timeframe readings around the closed bar `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionReadings {
    pub price: f64,
    pub bar_time: DateTime<Utc>,
    pub ema_fast: Window3,
    pub ema_slow: Window3,
    pub ema_trend: f64,
    pub stoch_k: Window3,
}

/// Oscillator state over the last two bars; oversold wins when both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorState {
    Oversold,
    Overbought,
    Neutral,
}

impl fmt::Display for OscillatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscillatorState::Oversold => f.write_str("oversold"),
            OscillatorState::Overbought => f.write_str("overbought"),
            OscillatorState::Neutral => f.write_str("neutral"),
        }
    }
}

/// Quantities derived from the readings at `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerConditions {
    pub gap: f64,
    pub is_cheap: bool,
    pub is_expensive: bool,
    pub bullish_cross: bool,
    pub bearish_cross: bool,
    pub bullish_curve: bool,
    pub bearish_curve: bool,
}

impl TriggerConditions {
    pub fn derive(
        readings: &ExecutionReadings,
        gap_threshold: f64,
        oversold: f64,
        overbought: f64,
    ) -> Self {
        let fast = readings.ema_fast;
        let slow = readings.ema_slow;
        let k = readings.stoch_k;
        let gap = SignalEngine::gap(fast.current, slow.current);

        Self {
            gap,
            is_cheap: k.current < oversold || k.prev < oversold,
            is_expensive: k.current > overbought || k.prev > overbought,
            bullish_cross: fast.current > slow.current && fast.prev <= slow.prev,
            bearish_cross: fast.current < slow.current && fast.prev >= slow.prev,
            bullish_curve: fast.turned_up() && gap < gap_threshold,
            bearish_curve: fast.turned_down() && gap < gap_threshold,
        }
    }

    pub fn oscillator_state(&self) -> OscillatorState {
        if self.is_cheap {
            OscillatorState::Oversold
        } else if self.is_expensive {
            OscillatorState::Overbought
        } else {
            OscillatorState::Neutral
        }
    }
}

/// Why a symbol produced no signal. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// Closed trend-bar ADX below the threshold.
    WeakTrend { adx: f64 },
    /// Fast EMA above slow, but %K was not oversold.
    NotOversold,
    /// Fast EMA at or below slow, but %K was not overbought.
    NotOverbought,
    PriceBelowTrendEma,
    PriceAboveTrendEma,
    /// EMAs not stacked on one side of the trend EMA.
    Misaligned,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::WeakTrend { adx } => write!(f, "weak trend (ADX {:.1})", adx),
            SkipReason::NotOversold => f.write_str("stochastic not oversold"),
            SkipReason::NotOverbought => f.write_str("stochastic not overbought"),
            SkipReason::PriceBelowTrendEma => f.write_str("price below EMA100"),
            SkipReason::PriceAboveTrendEma => f.write_str("price above EMA100"),
            SkipReason::Misaligned => f.write_str("EMAs misaligned"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Trigger {
        direction: SignalDirection,
        trigger: TriggerKind,
    },
    /// Regime qualifies but no trigger fired yet.
    Waiting(SignalDirection),
    Skip(SkipReason),
}

pub struct SignalEngine;

impl SignalEngine {
    /// Percent distance between the fast and slow EMA.
    pub fn gap(ema_fast: f64, ema_slow: f64) -> f64 {
        if ema_slow == 0.0 {
            return f64::INFINITY;
        }
        (ema_fast - ema_slow).abs() / ema_slow.abs() * 100.0
    }

    /// Pass the closed-bar ADX through if the market is trending.
    pub fn trend_gate(adx: f64, threshold: f64) -> Result<f64, SkipReason> {
        if adx < threshold {
            Err(SkipReason::WeakTrend { adx })
        } else {
            Ok(adx)
        }
    }

    /// Regime check, then CROSS before CURVE.
    pub fn decide(readings: &ExecutionReadings, conditions: &TriggerConditions) -> Decision {
        let price = readings.price;
        let fast = readings.ema_fast.current;
        let slow = readings.ema_slow.current;
        let trend = readings.ema_trend;

        let long_regime = price > trend && fast > trend && slow > trend && conditions.is_cheap;
        let short_regime =
            price < trend && fast < trend && slow < trend && conditions.is_expensive;

        if long_regime {
            return Self::pick_trigger(
                SignalDirection::Long,
                conditions.bullish_cross,
                conditions.bullish_curve,
            );
        }
        if short_regime {
            return Self::pick_trigger(
                SignalDirection::Short,
                conditions.bearish_cross,
                conditions.bearish_curve,
            );
        }

        Decision::Skip(Self::classify_skip(readings, conditions))
    }

    fn pick_trigger(direction: SignalDirection, cross: bool, curve: bool) -> Decision {
        if cross {
            Decision::Trigger {
                direction,
                trigger: TriggerKind::Cross,
            }
        } else if curve {
            Decision::Trigger {
                direction,
                trigger: TriggerKind::Curve,
            }
        } else {
            Decision::Waiting(direction)
        }
    }

    fn classify_skip(readings: &ExecutionReadings, conditions: &TriggerConditions) -> SkipReason {
        let price = readings.price;
        let trend = readings.ema_trend;

        if readings.ema_fast.current > readings.ema_slow.current {
            if !conditions.is_cheap {
                SkipReason::NotOversold
            } else if price <= trend {
                SkipReason::PriceBelowTrendEma
            } else {
                SkipReason::Misaligned
            }
        } else if !conditions.is_expensive {
            SkipReason::NotOverbought
        } else if price >= trend {
            SkipReason::PriceAboveTrendEma
        } else {
            SkipReason::Misaligned
        }
    }
}
