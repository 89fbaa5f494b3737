use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::universe::{base_asset, SensitivityTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Long,
    Short,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Long => f.write_str("LONG"),
            SignalDirection::Short => f.write_str("SHORT"),
        }
    }
}

/// What fired the signal. A cross always wins over a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriggerKind {
    /// EMA13 crossed EMA21 on the closed bar.
    Cross,
    /// EMA13 slope turned (V for long, A for short) while the EMAs are close.
    Curve,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Cross => f.write_str("CROSS"),
            TriggerKind::Curve => f.write_str("CURVE"),
        }
    }
}

/// A directional setup found on the closed execution bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub direction: SignalDirection,
    pub trigger: TriggerKind,
    /// Close of the closed execution bar.
    pub price: f64,
    /// Percent distance between EMA13 and EMA21.
    pub gap: f64,
    pub tier: SensitivityTier,
    /// Gap tolerance of `tier` at evaluation time.
    pub gap_threshold: f64,
    /// Open time of the closed execution bar.
    pub bar_time: DateTime<Utc>,
}

impl Signal {
    pub fn base(&self) -> &str {
        base_asset(&self.symbol)
    }

    /// Operator-facing trigger label.
    pub fn action_label(&self) -> &'static str {
        match (self.direction, self.trigger) {
            (SignalDirection::Long, TriggerKind::Cross) => "⚔️ CROSS",
            (SignalDirection::Long, TriggerKind::Curve) => "🧲 V-SHAPE",
            (SignalDirection::Short, TriggerKind::Cross) => "💀 CROSS",
            (SignalDirection::Short, TriggerKind::Curve) => "🧱 A-SHAPE",
        }
    }

    /// Telegram Markdown notification text.
    pub fn to_message(&self) -> String {
        let icon = match self.tier {
            SensitivityTier::Strict => "💎",
            SensitivityTier::Loose => "⚡",
        };
        format!(
            "{} *{} ({})*\nCoin: {}\nAction: {} (Closed)\nPrice: {}\nGap: {:.2}% (Limit: {}%)",
            icon,
            self.direction,
            self.tier.source_label(),
            self.base(),
            self.action_label(),
            self.price,
            self.gap,
            self.gap_threshold
        )
    }
}
