pub mod kraken;
pub mod market_data;
pub mod notifier;
pub mod telegram;

pub use market_data::MarketDataProvider;
pub use notifier::{LogNotifier, Notifier};
