//! Job and outcome types of one scan run

use crate::error::SymbolError;
use crate::models::signal::Signal;
use crate::models::universe::TargetEntry;
use crate::signals::detector::Evaluation;

/// Evaluate one target symbol.
#[derive(Debug, Clone)]
pub struct EvaluateSymbolJob {
    pub entry: TargetEntry,
}

/// Send one signal to the operator.
#[derive(Debug, Clone)]
pub struct DispatchSignalJob {
    pub signal: Signal,
}

/// What happened to one target. Failures stay contained here.
#[derive(Debug)]
pub struct SymbolOutcome {
    pub entry: TargetEntry,
    pub result: Result<Evaluation, SymbolError>,
}

impl SymbolOutcome {
    pub fn signal(&self) -> Option<&Signal> {
        self.result.as_ref().ok().and_then(Evaluation::signal)
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}
