//! Cron-based scheduler for repeated scan runs

use crate::core::runtime::ScanRuntime;
use crate::error::ConfigError;
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Runs a scan on every tick of a cron schedule.
pub struct ScanScheduler {
    runtime: Arc<ScanRuntime>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `runtime` - Scan to run on each tick
    /// * `cron_expr` - Six-field cron expression (`sec min hour day month weekday`)
    pub fn new(runtime: Arc<ScanRuntime>, cron_expr: &str) -> Result<Self, ConfigError> {
        let schedule = Schedule::from_str(cron_expr).map_err(|e| ConfigError::Invalid {
            key: "SCAN_CRON".to_string(),
            reason: format!("invalid cron expression '{}': {}", cron_expr, e),
        })?;

        info!(cron = %cron_expr, "ScanScheduler: created with cron '{}'", cron_expr);

        Ok(Self {
            runtime,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn next_run(&self) -> Option<DateTime<Utc>> {
        self.schedule.upcoming(Utc).next()
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let runtime = self.runtime.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("ScanScheduler: started, waiting for cron schedule...");

            loop {
                let Some(next_tick) = schedule.upcoming(Utc).next() else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                };
                let now = Utc::now();
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    tokio::time::sleep(duration).await;
                }

                info!(tick = %next_tick, "ScanScheduler: cron tick, starting scan");
                match runtime.run().await {
                    Ok(report) => {
                        info!(
                            signals = report.signals.len(),
                            "ScanScheduler: scan finished with {} signals",
                            report.signals.len()
                        );
                    }
                    Err(e) => {
                        error!(error = %e, "ScanScheduler: scan failed: {}", e);
                    }
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!("ScanScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
