//! Job handlers for one scan run

use crate::jobs::context::ScanContext;
use crate::jobs::types::{DispatchSignalJob, EvaluateSymbolJob, SymbolOutcome};
use crate::signals::detector::{Evaluation, SignalDetector};
use tracing::{debug, info, warn};

/// Evaluate one symbol.
///
/// Never fails: a data error becomes a failed outcome for this symbol only.
pub async fn handle_evaluate_symbol(
    job: EvaluateSymbolJob,
    ctx: &ScanContext,
    detector: &SignalDetector,
) -> SymbolOutcome {
    let symbol = &job.entry.symbol;
    debug!(
        symbol = %symbol,
        tier = %job.entry.tier,
        "EvaluateSymbolJob: evaluating {} ({})",
        symbol,
        job.entry.tier
    );

    let result = detector.detect(ctx.data_provider.as_ref(), &job.entry).await;

    match &result {
        Ok(Evaluation::Signal(_)) => {}
        Ok(Evaluation::Waiting(direction)) => {
            debug!(
                symbol = %symbol,
                direction = %direction,
                "EvaluateSymbolJob: {} in {} regime, waiting for a trigger",
                symbol,
                direction
            );
        }
        Ok(Evaluation::Skipped(reason)) => {
            debug!(
                symbol = %symbol,
                reason = %reason,
                "EvaluateSymbolJob: {} skipped: {}",
                symbol,
                reason
            );
        }
        Err(e) => {
            warn!(
                symbol = %symbol,
                error = %e,
                "EvaluateSymbolJob: {} failed: {}",
                symbol,
                e
            );
        }
    }

    if let Some(ref metrics) = ctx.metrics {
        match &result {
            Ok(evaluation) => {
                metrics.symbols_evaluated_total.inc();
                if evaluation.signal().is_some() {
                    metrics.signals_emitted_total.inc();
                }
            }
            Err(_) => metrics.symbol_failures_total.inc(),
        }
    }

    SymbolOutcome {
        entry: job.entry,
        result,
    }
}

/// Send one signal. Delivery failures are logged and dropped.
pub async fn handle_dispatch_signal(job: DispatchSignalJob, ctx: &ScanContext) {
    let signal = &job.signal;
    let message = signal.to_message();

    match ctx.notifier.notify(&message).await {
        Ok(()) => {
            info!(
                symbol = %signal.symbol,
                direction = %signal.direction,
                trigger = %signal.trigger,
                "DispatchSignalJob: sent {} {} for {}",
                signal.direction,
                signal.trigger,
                signal.symbol
            );
        }
        Err(e) => {
            warn!(
                symbol = %signal.symbol,
                error = %e,
                "DispatchSignalJob: notification for {} failed: {}",
                signal.symbol,
                e
            );
            if let Some(ref metrics) = ctx.metrics {
                metrics.notifications_failed_total.inc();
            }
        }
    }
}
