//! Merge the two rankings into one target set with a tier per symbol

use crate::models::universe::{Rankings, SensitivityTier, TargetEntry, TargetUniverse};

/// Build the scan universe from both rankings.
///
/// Activity symbols go in first as LOOSE, then volume symbols are written as
/// STRICT over them. A symbol in both rankings always ends up STRICT.
pub fn merge_targets(rankings: &Rankings) -> TargetUniverse {
    merge_symbol_lists(&rankings.volume_symbols(), &rankings.tick_symbols())
}

pub fn merge_symbol_lists(by_volume: &[String], by_ticks: &[String]) -> TargetUniverse {
    let mut targets = TargetUniverse::new();

    for symbol in by_ticks {
        targets.insert(
            symbol.clone(),
            TargetEntry::new(symbol.clone(), SensitivityTier::Loose),
        );
    }
    for symbol in by_volume {
        targets.insert(
            symbol.clone(),
            TargetEntry::new(symbol.clone(), SensitivityTier::Strict),
        );
    }

    targets
}
