//! Shared data models spanning the scanner layers.

pub mod bar;
pub mod signal;
pub mod universe;

pub use bar::{Bar, BarSeries, Interval};
pub use signal::{Signal, SignalDirection, TriggerKind};
pub use universe::{
    base_asset, quote_asset, GapThresholds, Rankings, SensitivityTier, SymbolRanking,
    TargetEntry, TargetUniverse, TickerSnapshot, TickerStats,
};
