//! Unit tests for the cron scheduler

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use trendscan::config::ScanConfig;
use trendscan::core::runtime::ScanRuntime;
use trendscan::core::scheduler::ScanScheduler;
use trendscan::error::ConfigError;

use crate::test_utils::{context, FakeMarketData, RecordingNotifier};

const EVERY_SECOND: &str = "*/1 * * * * *";

fn runtime(provider: Arc<FakeMarketData>) -> Arc<ScanRuntime> {
    let (ctx, _) = context(provider, Arc::new(RecordingNotifier::default()));
    Arc::new(ScanRuntime::new(ScanConfig::default(), ctx))
}

#[test]
fn test_invalid_cron_is_a_config_error() {
    let provider = Arc::new(FakeMarketData::unavailable());
    match ScanScheduler::new(runtime(provider), "every five minutes") {
        Err(ConfigError::Invalid { key, reason }) => {
            assert_eq!(key, "SCAN_CRON");
            assert!(reason.contains("every five minutes"));
        }
        Ok(_) => panic!("expected invalid cron expression to be rejected"),
    }
}

#[test]
fn test_next_run_is_in_the_future() {
    let provider = Arc::new(FakeMarketData::unavailable());
    let scheduler = ScanScheduler::new(runtime(provider), EVERY_SECOND).expect("valid cron");

    let next = scheduler.next_run().expect("schedule has upcoming ticks");
    assert!(next > Utc::now() - chrono::Duration::milliseconds(1));
    assert!(next <= Utc::now() + chrono::Duration::seconds(1));
}

#[tokio::test]
async fn test_failed_runs_do_not_stop_the_loop() {
    let provider = Arc::new(FakeMarketData::unavailable());
    let scheduler =
        ScanScheduler::new(runtime(provider.clone()), EVERY_SECOND).expect("valid cron");
    assert!(!scheduler.is_running().await);

    scheduler.start().await;
    assert!(scheduler.is_running().await);

    // every run fails at the ticker snapshot
    tokio::time::sleep(Duration::from_millis(3500)).await;
    let ticks = provider.snapshot_requests();
    assert!(ticks >= 2, "expected runs on several ticks, got {}", ticks);
    assert!(provider.calls().is_empty());

    scheduler.stop().await;
    assert!(!scheduler.is_running().await);

    let after_stop = provider.snapshot_requests();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(provider.snapshot_requests(), after_stop);
}
