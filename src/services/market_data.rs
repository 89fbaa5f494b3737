//! Market data provider interface consumed by the scanner core.

use crate::error::MarketDataError;
use crate::models::bar::{BarSeries, Interval};
use crate::models::universe::TickerSnapshot;

/// Exchange access used by the universe selector and the signal detector.
///
/// Implementations own any rate limiting; the core issues requests freely.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 24h statistics for every listed symbol, in one call.
    async fn fetch_ticker_snapshot(&self) -> Result<TickerSnapshot, MarketDataError>;

    /// Up to `limit` most recent bars, oldest first. Illiquid or new symbols
    /// may return fewer.
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<BarSeries, MarketDataError>;
}
