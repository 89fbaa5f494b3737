//! Batch orchestration of one scan run

use crate::config::{ScanConfig, ScanMode};
use crate::error::ScanError;
use crate::jobs::context::ScanContext;
use crate::jobs::handlers;
use crate::jobs::types::{DispatchSignalJob, EvaluateSymbolJob, SymbolOutcome};
use crate::models::signal::Signal;
use crate::models::universe::{base_asset, Rankings, SymbolRanking, TargetUniverse};
use crate::signals::detector::SignalDetector;
use crate::signals::merger::merge_targets;
use crate::signals::universe::UniverseSelector;
use futures_util::future::join_all;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything one run produced, in target order.
#[derive(Debug)]
pub struct ScanReport {
    pub rankings: Rankings,
    pub targets: TargetUniverse,
    pub outcomes: Vec<SymbolOutcome>,
    pub signals: Vec<Signal>,
}

impl ScanReport {
    /// Symbols whose data could be read, signal or not.
    pub fn evaluated(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failure()).count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Evaluated symbols that produced no signal.
    pub fn skipped(&self) -> usize {
        self.evaluated() - self.signals.len()
    }
}

/// Select, merge, evaluate every target, then notify in target order.
pub struct ScanRuntime {
    config: ScanConfig,
    selector: UniverseSelector,
    detector: SignalDetector,
    ctx: ScanContext,
}

impl ScanRuntime {
    pub fn new(config: ScanConfig, ctx: ScanContext) -> Self {
        let selector = UniverseSelector::new(&config.universe);
        let detector = SignalDetector::from_scan_config(&config);
        Self {
            config,
            selector,
            detector,
            ctx,
        }
    }

    /// Replace the default selector, e.g. with a custom eligibility filter.
    pub fn with_selector(mut self, selector: UniverseSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<ScanReport, ScanError> {
        let start = Instant::now();

        let rankings = self
            .selector
            .select(self.ctx.data_provider.as_ref())
            .await
            .map_err(ScanError::MarketUnavailable)?;
        if rankings.is_empty() {
            warn!(
                "ScanRuntime: no eligible {} symbols, aborting run",
                self.config.universe.quote
            );
            return Err(ScanError::EmptyUniverse);
        }

        let targets = merge_targets(&rankings);
        info!(
            volume = %bases(&rankings.by_volume),
            "ScanRuntime: top {} by volume: {}",
            rankings.by_volume.len(),
            bases(&rankings.by_volume)
        );
        info!(
            ticks = %bases(&rankings.by_ticks),
            "ScanRuntime: top {} by ticks: {}",
            rankings.by_ticks.len(),
            bases(&rankings.by_ticks)
        );
        info!(
            targets = targets.len(),
            mode = ?self.config.mode,
            "ScanRuntime: scanning {} unique symbols",
            targets.len()
        );

        let outcomes = self.evaluate_all(&targets).await;
        let signals: Vec<Signal> = outcomes
            .iter()
            .filter_map(|o| o.signal().cloned())
            .collect();

        for signal in &signals {
            handlers::handle_dispatch_signal(
                DispatchSignalJob {
                    signal: signal.clone(),
                },
                &self.ctx,
            )
            .await;
        }

        let report = ScanReport {
            rankings,
            targets,
            outcomes,
            signals,
        };

        info!(
            evaluated = report.evaluated(),
            signals = report.signals.len(),
            skipped = report.skipped(),
            failures = report.failures(),
            "ScanRuntime: run finished, {} evaluated, {} signals, {} skipped, {} failures",
            report.evaluated(),
            report.signals.len(),
            report.skipped(),
            report.failures()
        );

        if let Some(ref metrics) = self.ctx.metrics {
            metrics.scan_runs_total.inc();
            metrics
                .scan_duration_seconds
                .observe(start.elapsed().as_secs_f64());
            match metrics.export() {
                Ok(text) => debug!("ScanRuntime: metrics\n{}", text),
                Err(e) => warn!(error = %e, "ScanRuntime: metrics export failed"),
            }
        }

        Ok(report)
    }

    async fn evaluate_all(&self, targets: &TargetUniverse) -> Vec<SymbolOutcome> {
        let jobs = targets.values().map(|entry| EvaluateSymbolJob {
            entry: entry.clone(),
        });

        match self.config.mode {
            ScanMode::Sequential => {
                let mut outcomes = Vec::with_capacity(targets.len());
                for job in jobs {
                    outcomes.push(
                        handlers::handle_evaluate_symbol(job, &self.ctx, &self.detector).await,
                    );
                }
                outcomes
            }
            // join_all keeps input order
            ScanMode::Concurrent => {
                let evaluate =
                    |job| handlers::handle_evaluate_symbol(job, &self.ctx, &self.detector);
                join_all(jobs.map(evaluate)).await
            }
        }
    }
}

/// One scan with `config`; returns the signals in target order.
pub async fn run_scan(config: &ScanConfig, ctx: &ScanContext) -> Result<Vec<Signal>, ScanError> {
    ScanRuntime::new(config.clone(), ctx.clone())
        .run()
        .await
        .map(|report| report.signals)
}

fn bases(ranking: &[SymbolRanking]) -> String {
    ranking
        .iter()
        .map(|r| base_asset(&r.symbol))
        .collect::<Vec<_>>()
        .join(", ")
}
