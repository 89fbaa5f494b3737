//! Error types for the scanner

use thiserror::Error;

use crate::models::bar::Interval;

/// Errors raised by a market-data provider.
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Network failure, timeout or a non-success HTTP status.
    #[error("market data request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The exchange answered with its own error list.
    #[error("exchange API error: {0}")]
    Api(String),

    /// The payload did not have the expected shape.
    #[error("malformed market data: {0}")]
    Malformed(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
}

/// Why one symbol could not be evaluated. Contained to that symbol.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error(transparent)]
    Data(#[from] MarketDataError),

    /// Too few bars to read the closed-bar window.
    #[error("insufficient {interval} history: {bars} bars")]
    InsufficientHistory { interval: Interval, bars: usize },
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Run-level failures. Per-symbol failures never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("market unavailable: {0}")]
    MarketUnavailable(#[source] MarketDataError),

    #[error("no eligible symbols in the ticker snapshot")]
    EmptyUniverse,
}
