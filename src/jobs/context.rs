//! Collaborators shared by every job of a scan run

use crate::metrics::Metrics;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::Notifier;
use std::sync::Arc;

/// Read-only handles passed to job handlers.
///
/// Evaluations never mutate anything reachable from here, so one context is
/// shared by all concurrently running jobs.
#[derive(Clone)]
pub struct ScanContext {
    pub data_provider: Arc<dyn MarketDataProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Option<Arc<Metrics>>,
}

impl ScanContext {
    pub fn new(
        data_provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            data_provider,
            notifier,
            metrics,
        }
    }
}
