//! Ticker snapshot, rankings and the merged scan universe

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// 24h statistics for one symbol from the ticker snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerStats {
    /// Traded value in the quote currency.
    pub quoted_traded_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<f64>,
}

impl TickerStats {
    pub fn new(quoted_traded_value: f64) -> Self {
        Self {
            quoted_traded_value,
            trade_count: None,
            last_price: None,
        }
    }

    pub fn with_trade_count(mut self, trade_count: u64) -> Self {
        self.trade_count = Some(trade_count);
        self
    }

    pub fn with_last_price(mut self, last_price: f64) -> Self {
        self.last_price = Some(last_price);
        self
    }

    /// Trade activity metric: the trade count when reported, else traded value.
    pub fn activity(&self) -> f64 {
        match self.trade_count {
            Some(count) => count as f64,
            None => self.quoted_traded_value,
        }
    }
}

/// Snapshot keyed by display symbol, e.g. `BTC/USD`.
pub type TickerSnapshot = HashMap<String, TickerStats>;

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRanking {
    pub symbol: String,
    pub metric: f64,
}

/// The two independent rankings produced by the universe selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rankings {
    pub by_volume: Vec<SymbolRanking>,
    pub by_ticks: Vec<SymbolRanking>,
}

impl Rankings {
    pub fn is_empty(&self) -> bool {
        self.by_volume.is_empty() && self.by_ticks.is_empty()
    }

    pub fn volume_symbols(&self) -> Vec<String> {
        self.by_volume.iter().map(|r| r.symbol.clone()).collect()
    }

    pub fn tick_symbols(&self) -> Vec<String> {
        self.by_ticks.iter().map(|r| r.symbol.clone()).collect()
    }
}

/// Per-symbol sensitivity class controlling the curve-trigger gap tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SensitivityTier {
    /// Top traded value; tighter gap tolerance.
    Strict,
    /// Top trade activity; wider gap tolerance.
    Loose,
}

impl SensitivityTier {
    /// Ranking the tier originates from, as shown to the operator.
    pub fn source_label(&self) -> &'static str {
        match self {
            SensitivityTier::Strict => "VOLUME",
            SensitivityTier::Loose => "TICKS",
        }
    }
}

impl fmt::Display for SensitivityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityTier::Strict => f.write_str("STRICT"),
            SensitivityTier::Loose => f.write_str("LOOSE"),
        }
    }
}

/// Gap thresholds in percent, one per tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapThresholds {
    pub strict: f64,
    pub loose: f64,
}

impl GapThresholds {
    pub fn for_tier(&self, tier: SensitivityTier) -> f64 {
        match tier {
            SensitivityTier::Strict => self.strict,
            SensitivityTier::Loose => self.loose,
        }
    }
}

impl Default for GapThresholds {
    fn default() -> Self {
        Self {
            strict: 0.5,
            loose: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub symbol: String,
    pub tier: SensitivityTier,
}

impl TargetEntry {
    pub fn new(symbol: impl Into<String>, tier: SensitivityTier) -> Self {
        Self {
            symbol: symbol.into(),
            tier,
        }
    }
}

/// Merged universe. Ordered so evaluation and dispatch order is stable.
pub type TargetUniverse = BTreeMap<String, TargetEntry>;

/// Base asset of a `BASE/QUOTE` symbol; the symbol itself when there is no quote.
pub fn base_asset(symbol: &str) -> &str {
    symbol.split_once('/').map_or(symbol, |(base, _)| base)
}

/// Quote asset of a `BASE/QUOTE` symbol.
pub fn quote_asset(symbol: &str) -> Option<&str> {
    symbol.split_once('/').map(|(_, quote)| quote)
}
