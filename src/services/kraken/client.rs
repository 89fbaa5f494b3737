//! Rate-limited Kraken public REST client

use governor::{DefaultDirectRateLimiter, Quota};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::response::{parse_ohlc_row, AssetPair, KrakenEnvelope, TickerInfo};
use crate::error::MarketDataError;
use crate::models::bar::{Bar, Interval};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct KrakenRestClient {
    base_url: String,
    http: reqwest::Client,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl KrakenRestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(base_url, http))
    }

    /// Build around an existing HTTP client, one request per second.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            limiter: Arc::new(limiter_for(1)),
        }
    }

    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.limiter = Arc::new(limiter_for(requests_per_second));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        self.limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, query = ?query, "Kraken request");

        let envelope: KrakenEnvelope<T> = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        envelope.into_result()
    }

    /// All tradable pairs keyed by Kraken pair name.
    pub async fn asset_pairs(&self) -> Result<HashMap<String, AssetPair>, MarketDataError> {
        self.get("/0/public/AssetPairs", &[]).await
    }

    /// Ticker for every pair, keyed by Kraken pair name.
    pub async fn tickers(&self) -> Result<HashMap<String, TickerInfo>, MarketDataError> {
        self.get("/0/public/Ticker", &[]).await
    }

    /// Recent OHLC bars for one pair, oldest first. Kraken returns at most 720.
    pub async fn ohlc(&self, pair: &str, interval: Interval) -> Result<Vec<Bar>, MarketDataError> {
        let result: HashMap<String, Value> = self
            .get(
                "/0/public/OHLC",
                &[
                    ("pair", pair.to_string()),
                    ("interval", interval.minutes().to_string()),
                ],
            )
            .await?;

        // The result holds one array keyed by the canonical pair name plus `last`.
        let rows = result
            .into_iter()
            .find_map(|(key, value)| match value {
                Value::Array(rows) if key != "last" => Some(rows),
                _ => None,
            })
            .ok_or_else(|| MarketDataError::Malformed(format!("no OHLC rows for {}", pair)))?;

        rows.iter().map(parse_ohlc_row).collect()
    }
}

fn limiter_for(requests_per_second: u32) -> DefaultDirectRateLimiter {
    let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
    DefaultDirectRateLimiter::direct(Quota::per_second(rate))
}
