//! Stale winner-pick cleanup after the qualified set changes.

use crate::logic::propagation::apply_winner_predictions;
use crate::models::{PlayoffBracket, WinnerPredictions};

/// Keep only the picks that still resolve against a freshly built bracket.
///
/// A round-of-32 pick survives if its team is still in one of that match's slots. Later picks
/// are purged too: one survives only if, once the surviving earlier picks are propagated, its
/// team actually sits in that match. Picks for unknown match ids are dropped.
pub fn clean_stale_predictions(predictions: &WinnerPredictions, bracket: &PlayoffBracket) -> WinnerPredictions {
    // A propagated match only gets a winner when its pick names one of its two slots.
    let valid: WinnerPredictions = apply_winner_predictions(bracket, predictions)
        .all_matches()
        .filter_map(|m| m.winner.as_ref().map(|w| (m.id, w.clone())))
        .collect();

    let purged = predictions.len() - valid.len();
    if purged > 0 {
        log::debug!("Purged {} stale winner pick(s)", purged);
    }
    valid
}
