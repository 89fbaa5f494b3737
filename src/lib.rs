//! Trend confluence scanner for Kraken spot markets.
//!
//! Each run ranks the listed pairs by traded value and by trade activity,
//! merges both rankings into one target set, and evaluates every target for a
//! trend-following entry on the last closed bar. Signals go to Telegram.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
