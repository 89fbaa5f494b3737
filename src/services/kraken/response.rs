//! Kraken public REST payloads

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::MarketDataError;
use crate::models::bar::Bar;

/// Every Kraken response wraps its payload with an error list.
#[derive(Debug, Deserialize)]
pub struct KrakenEnvelope<T> {
    #[serde(default)]
    pub error: Vec<String>,
    pub result: Option<T>,
}

impl<T> KrakenEnvelope<T> {
    pub fn into_result(self) -> Result<T, MarketDataError> {
        if !self.error.is_empty() {
            return Err(MarketDataError::Api(self.error.join("; ")));
        }
        self.result
            .ok_or_else(|| MarketDataError::Malformed("response has no result".to_string()))
    }
}

/// Entry of `/0/public/AssetPairs`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPair {
    pub altname: String,
    /// `BASE/QUOTE` name; absent for dark-pool pairs.
    #[serde(default)]
    pub wsname: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl AssetPair {
    pub fn is_online(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s == "online")
            .unwrap_or(true)
    }
}

/// Entry of `/0/public/Ticker`. Two-element arrays are `[today, last 24h]`.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Last trade `[price, lot volume]`.
    #[serde(rename = "c")]
    pub last_trade: Vec<String>,
    /// Base volume.
    #[serde(rename = "v")]
    pub volume: Vec<String>,
    /// Volume weighted average price.
    #[serde(rename = "p")]
    pub vwap: Vec<String>,
    /// Number of trades.
    #[serde(rename = "t")]
    pub trades: Vec<u64>,
}

impl TickerInfo {
    /// 24h traded value in the quote currency.
    pub fn quoted_volume_24h(&self) -> Result<f64, MarketDataError> {
        let volume = parse_decimal(self.volume.get(1), "v[1]")?;
        let vwap = parse_decimal(self.vwap.get(1), "p[1]")?;
        Ok(volume * vwap)
    }

    pub fn trades_24h(&self) -> Option<u64> {
        self.trades.get(1).copied()
    }

    pub fn last_price(&self) -> Option<f64> {
        parse_decimal(self.last_trade.first(), "c[0]").ok()
    }
}

/// Parse one OHLC row `[time, open, high, low, close, vwap, volume, count]`.
pub fn parse_ohlc_row(row: &Value) -> Result<Bar, MarketDataError> {
    let fields = row
        .as_array()
        .filter(|f| f.len() >= 7)
        .ok_or_else(|| MarketDataError::Malformed(format!("bad OHLC row: {}", row)))?;

    let time = fields[0]
        .as_i64()
        .ok_or_else(|| MarketDataError::Malformed(format!("bad OHLC time: {}", fields[0])))?;
    let timestamp = DateTime::from_timestamp(time, 0)
        .ok_or_else(|| MarketDataError::Malformed(format!("OHLC time out of range: {}", time)))?;

    let number = |idx: usize, name: &str| parse_decimal(fields[idx].as_str(), name);
    let mut bar = Bar::new(
        number(1, "open")?,
        number(2, "high")?,
        number(3, "low")?,
        number(4, "close")?,
        number(6, "volume")?,
        timestamp,
    );
    if let Some(count) = fields.get(7).and_then(Value::as_u64) {
        bar = bar.with_trade_count(count);
    }
    Ok(bar)
}

fn parse_decimal<S: AsRef<str>>(raw: Option<S>, field: &str) -> Result<f64, MarketDataError> {
    let raw = raw.ok_or_else(|| MarketDataError::Malformed(format!("missing {}", field)))?;
    raw.as_ref()
        .parse::<f64>()
        .map_err(|e| MarketDataError::Malformed(format!("invalid {}: {}", field, e)))
}

/// Map Kraken asset aliases to their common tickers, e.g. `XBT/USD` -> `BTC/USD`.
pub fn normalize_symbol(wsname: &str) -> String {
    let normalize = |asset: &str| match asset {
        "XBT" => "BTC".to_string(),
        "XDG" => "DOGE".to_string(),
        other => other.to_string(),
    };
    match wsname.split_once('/') {
        Some((base, quote)) => format!("{}/{}", normalize(base), normalize(quote)),
        None => normalize(wsname),
    }
}
