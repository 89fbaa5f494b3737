//! Trendscan Scanner
//!
//! Runs one scan of the Kraken spot market, or keeps scanning on a cron
//! schedule when `SCAN_CRON` is set.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use trendscan::config::{self, ScanConfig};
use trendscan::core::runtime::ScanRuntime;
use trendscan::core::scheduler::ScanScheduler;
use trendscan::jobs::context::ScanContext;
use trendscan::logging;
use trendscan::metrics::Metrics;
use trendscan::services::kraken::{KrakenMarketDataProvider, KrakenRestClient};
use trendscan::services::market_data::MarketDataProvider;
use trendscan::services::notifier::{LogNotifier, Notifier};
use trendscan::services::telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = config::get_environment();
    info!("Starting Trendscan Scanner");
    info!(environment = %env, "Environment");

    let scan_config = ScanConfig::from_env()?;
    info!(
        quote = %scan_config.universe.quote,
        top_volume = scan_config.universe.top_volume,
        top_ticks = scan_config.universe.top_ticks,
        mode = ?scan_config.mode,
        "Scan: {} pairs, top {} by volume + top {} by ticks",
        scan_config.universe.quote,
        scan_config.universe.top_volume,
        scan_config.universe.top_ticks
    );

    let kraken_url = config::get_kraken_url();
    let rate_limit = config::get_kraken_rate_limit()?;
    info!(
        url = %kraken_url,
        rps = rate_limit,
        "Kraken REST client: {} ({} req/s)",
        kraken_url,
        rate_limit
    );
    let client = KrakenRestClient::new(kraken_url)?.with_rate_limit(rate_limit);
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(KrakenMarketDataProvider::new(Arc::new(client)));

    let notifier: Arc<dyn Notifier> = match config::telegram_from_env() {
        Some(telegram) => {
            info!("Telegram notifications enabled");
            Arc::new(TelegramNotifier::new(telegram)?)
        }
        None => {
            warn!("TELEGRAM_TOKEN or TELEGRAM_CHAT_ID not set, signals will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let metrics = Arc::new(Metrics::new()?);
    let ctx = ScanContext::new(provider, notifier, Some(metrics));
    let runtime = Arc::new(ScanRuntime::new(scan_config, ctx));

    let Some(cron_expr) = config::get_scan_schedule() else {
        let report = runtime.run().await?;
        info!(signals = report.signals.len(), "Scan complete");
        return Ok(());
    };

    let scheduler = ScanScheduler::new(runtime, &cron_expr)?;
    if let Some(next) = scheduler.next_run() {
        info!(next = %next, "First scan at {}", next);
    }
    scheduler.start().await;

    info!("Scanner started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down scanner...");
    scheduler.stop().await;
    info!("Scanner stopped");

    Ok(())
}
