//! Per-symbol jobs of a scan run

pub mod context;
pub mod handlers;
pub mod types;

pub use context::ScanContext;
pub use types::{DispatchSignalJob, EvaluateSymbolJob, SymbolOutcome};
