//! Kraken spot exchange integration

pub mod client;
pub mod provider;
pub mod response;

pub use client::KrakenRestClient;
pub use provider::KrakenMarketDataProvider;
