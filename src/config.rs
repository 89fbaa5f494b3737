//! Scanner configuration read from the environment
//!
//! Every setting has a default, so an empty environment yields the stock
//! Kraken USD scan. Invalid values are reported instead of silently ignored.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::indicators::momentum::StochasticParams;
use crate::models::bar::Interval;
use crate::models::universe::GapThresholds;

pub const DEFAULT_KRAKEN_URL: &str = "https://api.kraken.com";
pub const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

/// Deployment environment (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_kraken_url() -> String {
    env::var("KRAKEN_API_URL").unwrap_or_else(|_| DEFAULT_KRAKEN_URL.to_string())
}

/// Requests per second allowed against the exchange REST API.
pub fn get_kraken_rate_limit() -> Result<u32, ConfigError> {
    parse_env("KRAKEN_REQUESTS_PER_SECOND", 1)
}

/// How symbol evaluations are scheduled within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// One symbol at a time.
    Sequential,
    /// All symbols at once; the market-data client spaces the requests.
    Concurrent,
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ScanMode::Sequential),
            "concurrent" => Ok(ScanMode::Concurrent),
            other => Err(format!(
                "expected 'sequential' or 'concurrent', got '{}'",
                other
            )),
        }
    }
}

/// Which symbols are scanned and how many from each ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    /// Required quote currency, e.g. `USD`.
    pub quote: String,
    /// Size of the traded-value ranking.
    pub top_volume: usize,
    /// Size of the trade-activity ranking.
    pub top_ticks: usize,
    /// Fiat bases that would make a forex cross against the quote.
    pub excluded_fiat: Vec<String>,
    /// Stablecoin bases with no useful volatility against the quote.
    pub excluded_stables: Vec<String>,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            quote: "USD".to_string(),
            top_volume: 50,
            top_ticks: 20,
            excluded_fiat: ["EUR", "GBP", "AUD", "CAD", "JPY", "CHF"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_stables: ["USDT", "USDC", "DAI", "PYUSD", "USDG", "RLUSD", "TUSD", "USDS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Indicator parameters, gates and fetch windows of the signal detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub adx_period: u32,
    /// Minimum closed-bar ADX for a trending regime.
    pub adx_threshold: f64,
    pub ema_fast: u32,
    pub ema_slow: u32,
    pub ema_trend: u32,
    pub stochastic: StochasticParams,
    /// %K below this counts as cheap.
    pub oversold: f64,
    /// %K above this counts as expensive.
    pub overbought: f64,
    pub trend_interval: Interval,
    pub trend_limit: usize,
    pub exec_interval: Interval,
    pub exec_limit: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            adx_period: 14,
            adx_threshold: 25.0,
            ema_fast: 13,
            ema_slow: 21,
            ema_trend: 100,
            stochastic: StochasticParams::default(),
            oversold: 40.0,
            overbought: 60.0,
            trend_interval: Interval::OneHour,
            trend_limit: 100,
            exec_interval: Interval::FifteenMinutes,
            exec_limit: 500,
        }
    }
}

/// Everything one scan run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub universe: UniverseConfig,
    pub gaps: GapThresholds,
    pub detector: DetectorConfig,
    pub mode: ScanMode,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            universe: UniverseConfig::default(),
            gaps: GapThresholds::default(),
            detector: DetectorConfig::default(),
            mode: ScanMode::Concurrent,
        }
    }
}

impl ScanConfig {
    /// Defaults overridden by whichever variables are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ScanConfig::default();
        let universe = UniverseConfig {
            quote: parse_env("SCAN_QUOTE", defaults.universe.quote.clone())?,
            top_volume: parse_env("SCAN_TOP_VOLUME", defaults.universe.top_volume)?,
            top_ticks: parse_env("SCAN_TOP_TICKS", defaults.universe.top_ticks)?,
            ..defaults.universe
        };
        let gaps = GapThresholds {
            strict: parse_env("GAP_STRICT", defaults.gaps.strict)?,
            loose: parse_env("GAP_LOOSE", defaults.gaps.loose)?,
        };
        let detector = DetectorConfig {
            adx_threshold: parse_env("ADX_THRESHOLD", defaults.detector.adx_threshold)?,
            trend_interval: parse_env("TREND_INTERVAL", defaults.detector.trend_interval)?,
            trend_limit: parse_env("TREND_LIMIT", defaults.detector.trend_limit)?,
            exec_interval: parse_env("EXEC_INTERVAL", defaults.detector.exec_interval)?,
            exec_limit: parse_env("EXEC_LIMIT", defaults.detector.exec_limit)?,
            ..defaults.detector
        };
        let mode = parse_env("SCAN_MODE", defaults.mode)?;

        Ok(Self {
            universe,
            gaps,
            detector,
            mode,
        })
    }
}

/// Telegram Bot API credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
    pub api_url: String,
}

/// `None` unless both `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` are set.
pub fn telegram_from_env() -> Option<TelegramConfig> {
    let token = env::var("TELEGRAM_TOKEN").ok().filter(|s| !s.is_empty())?;
    let chat_id = env::var("TELEGRAM_CHAT_ID").ok().filter(|s| !s.is_empty())?;
    Some(TelegramConfig {
        token,
        chat_id,
        api_url: env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_TELEGRAM_URL.to_string()),
    })
}

/// Cron expression for repeated runs; `None` means run once.
pub fn get_scan_schedule() -> Option<String> {
    env::var("SCAN_CRON").ok().filter(|s| !s.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}
