//! Universe selection: eligibility filter and the two rankings

use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::config::UniverseConfig;
use crate::error::MarketDataError;
use crate::models::universe::{
    base_asset, quote_asset, Rankings, SymbolRanking, TickerSnapshot, TickerStats,
};
use crate::services::market_data::MarketDataProvider;

/// Decides whether a listed symbol may enter the rankings.
pub trait SymbolEligibility: Send + Sync {
    fn is_eligible(&self, symbol: &str, stats: &TickerStats) -> bool;
}

/// Keeps pairs quoted in one currency, minus fiat crosses and stable-vs-stable pairs.
#[derive(Debug, Clone)]
pub struct QuoteCurrencyFilter {
    quote: String,
    excluded_bases: HashSet<String>,
}

impl QuoteCurrencyFilter {
    pub fn new(quote: &str, excluded_bases: impl IntoIterator<Item = String>) -> Self {
        Self {
            quote: quote.to_ascii_uppercase(),
            excluded_bases: excluded_bases
                .into_iter()
                .map(|b| b.to_ascii_uppercase())
                .collect(),
        }
    }

    pub fn from_config(config: &UniverseConfig) -> Self {
        Self::new(
            &config.quote,
            config
                .excluded_fiat
                .iter()
                .chain(config.excluded_stables.iter())
                .cloned(),
        )
    }
}

impl SymbolEligibility for QuoteCurrencyFilter {
    fn is_eligible(&self, symbol: &str, _stats: &TickerStats) -> bool {
        let Some(quote) = quote_asset(symbol) else {
            return false;
        };
        if !quote.eq_ignore_ascii_case(&self.quote) {
            return false;
        }
        !self
            .excluded_bases
            .contains(&base_asset(symbol).to_ascii_uppercase())
    }
}

pub struct UniverseSelector {
    eligibility: Box<dyn SymbolEligibility>,
    top_volume: usize,
    top_ticks: usize,
}

impl UniverseSelector {
    pub fn new(config: &UniverseConfig) -> Self {
        Self {
            eligibility: Box::new(QuoteCurrencyFilter::from_config(config)),
            top_volume: config.top_volume,
            top_ticks: config.top_ticks,
        }
    }

    /// Replace the default quote-currency filter.
    pub fn with_eligibility(mut self, eligibility: Box<dyn SymbolEligibility>) -> Self {
        self.eligibility = eligibility;
        self
    }

    /// Fetch one ticker snapshot and rank it.
    ///
    /// A failed snapshot is returned as an error so the caller can tell "market
    /// unavailable" apart from "nothing eligible".
    pub async fn select(
        &self,
        provider: &dyn MarketDataProvider,
    ) -> Result<Rankings, MarketDataError> {
        let snapshot = provider.fetch_ticker_snapshot().await.map_err(|e| {
            warn!(error = %e, "UniverseSelector: ticker snapshot failed");
            e
        })?;
        Ok(self.rank(&snapshot))
    }

    /// Rank an already fetched snapshot.
    pub fn rank(&self, snapshot: &TickerSnapshot) -> Rankings {
        let eligible: Vec<(&String, &TickerStats)> = snapshot
            .iter()
            .filter(|(symbol, stats)| self.eligibility.is_eligible(symbol, stats))
            .collect();

        debug!(
            listed = snapshot.len(),
            eligible = eligible.len(),
            "UniverseSelector: {} of {} symbols eligible",
            eligible.len(),
            snapshot.len()
        );

        Rankings {
            by_volume: top_by(&eligible, self.top_volume, |s| s.quoted_traded_value),
            by_ticks: top_by(&eligible, self.top_ticks, TickerStats::activity),
        }
    }
}

/// Descending by metric, ties by symbol. Missing or NaN metrics rank as zero.
fn top_by(
    eligible: &[(&String, &TickerStats)],
    limit: usize,
    metric: impl Fn(&TickerStats) -> f64,
) -> Vec<SymbolRanking> {
    let mut ranked: Vec<SymbolRanking> = eligible
        .iter()
        .map(|(symbol, stats)| {
            let value = metric(stats);
            SymbolRanking {
                symbol: (*symbol).clone(),
                metric: if value.is_finite() { value } else { 0.0 },
            }
        })
        .collect();

    ranked.sort_by(|a, b| match b.metric.total_cmp(&a.metric) {
        Ordering::Equal => a.symbol.cmp(&b.symbol),
        other => other,
    });
    ranked.truncate(limit);
    ranked
}
