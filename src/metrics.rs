//! Prometheus counters for scan runs

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub scan_runs_total: IntCounter,
    pub symbols_evaluated_total: IntCounter,
    pub symbol_failures_total: IntCounter,
    pub signals_emitted_total: IntCounter,
    pub notifications_failed_total: IntCounter,
    pub scan_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scan_runs_total = IntCounter::new("scan_runs_total", "Completed scan runs")?;
        let symbols_evaluated_total = IntCounter::new(
            "symbols_evaluated_total",
            "Symbols evaluated without a data failure",
        )?;
        let symbol_failures_total = IntCounter::new(
            "symbol_failures_total",
            "Symbols dropped because their data could not be read",
        )?;
        let signals_emitted_total =
            IntCounter::new("signals_emitted_total", "Signals found across all runs")?;
        let notifications_failed_total = IntCounter::new(
            "notifications_failed_total",
            "Signal notifications that could not be delivered",
        )?;
        let scan_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("scan_duration_seconds", "Wall time of one scan run")
                .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        )?;

        registry.register(Box::new(scan_runs_total.clone()))?;
        registry.register(Box::new(symbols_evaluated_total.clone()))?;
        registry.register(Box::new(symbol_failures_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(notifications_failed_total.clone()))?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            scan_runs_total,
            symbols_evaluated_total,
            symbol_failures_total,
            signals_emitted_total,
            notifications_failed_total,
            scan_duration_seconds,
        })
    }

    /// Text exposition format of every registered metric.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
