//! Kraken market data provider implementation

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::client::KrakenRestClient;
use super::response::normalize_symbol;
use crate::error::MarketDataError;
use crate::models::bar::{BarSeries, Interval};
use crate::models::universe::{TickerSnapshot, TickerStats};
use crate::services::market_data::MarketDataProvider;

pub struct KrakenMarketDataProvider {
    client: Arc<KrakenRestClient>,
    /// Display symbol (`BTC/USD`) to Kraken altname (`XBTUSD`).
    pairs: RwLock<HashMap<String, String>>,
}

impl KrakenMarketDataProvider {
    pub fn new(client: Arc<KrakenRestClient>) -> Self {
        Self {
            client,
            pairs: RwLock::new(HashMap::new()),
        }
    }

    pub fn client(&self) -> &Arc<KrakenRestClient> {
        &self.client
    }

    /// Refresh the symbol map; returns Kraken pair key to display symbol.
    async fn load_pairs(&self) -> Result<HashMap<String, String>, MarketDataError> {
        let asset_pairs = self.client.asset_pairs().await?;

        let mut by_key = HashMap::new();
        let mut by_symbol = HashMap::new();
        for (key, pair) in asset_pairs {
            if !pair.is_online() {
                continue;
            }
            let Some(wsname) = pair.wsname.as_deref() else {
                continue;
            };
            let symbol = normalize_symbol(wsname);
            by_symbol.insert(symbol.clone(), pair.altname.clone());
            by_key.insert(key, symbol);
        }

        debug!(pairs = by_symbol.len(), "Kraken: loaded asset pairs");
        *self.pairs.write().await = by_symbol;
        Ok(by_key)
    }

    async fn altname_for(&self, symbol: &str) -> Result<String, MarketDataError> {
        if let Some(altname) = self.pairs.read().await.get(symbol) {
            return Ok(altname.clone());
        }

        self.load_pairs().await?;
        self.pairs
            .read()
            .await
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::UnknownSymbol(symbol.to_string()))
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for KrakenMarketDataProvider {
    async fn fetch_ticker_snapshot(&self) -> Result<TickerSnapshot, MarketDataError> {
        let symbols_by_key = self.load_pairs().await?;
        let tickers = self.client.tickers().await?;

        let mut snapshot = TickerSnapshot::with_capacity(tickers.len());
        for (key, info) in tickers {
            let Some(symbol) = symbols_by_key.get(&key) else {
                continue;
            };
            let quoted = match info.quoted_volume_24h() {
                Ok(value) => value,
                Err(e) => {
                    warn!(
                        symbol = %symbol,
                        error = %e,
                        "Kraken: skipping ticker with bad volume"
                    );
                    continue;
                }
            };

            let mut stats = TickerStats::new(quoted);
            if let Some(trades) = info.trades_24h() {
                stats = stats.with_trade_count(trades);
            }
            if let Some(price) = info.last_price() {
                stats = stats.with_last_price(price);
            }
            snapshot.insert(symbol.clone(), stats);
        }

        debug!(symbols = snapshot.len(), "Kraken: ticker snapshot fetched");
        Ok(snapshot)
    }

    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<BarSeries, MarketDataError> {
        let altname = self.altname_for(symbol).await?;
        let bars = self.client.ohlc(&altname, interval).await?;

        debug!(
            symbol = %symbol,
            interval = %interval,
            count = bars.len(),
            "Kraken: fetched {} bars for {}",
            bars.len(),
            symbol
        );

        Ok(BarSeries::new(symbol, interval, bars).truncate_to_latest(limit))
    }
}
