//! Bracket propagation: apply winner picks round by round, advancing winners (and semifinal losers).

use crate::models::{
    OfficialResults, PlayoffBracket, PlayoffMatchId, QualifiedTeam, Round, Slot,
    WinnerPredictions,
};

/// Apply winner picks to a bracket, returning a new one (the input is untouched).
///
/// Every slot after the round of 32 and every result is cleared first, so the output depends
/// only on the round-of-32 slots and `predictions`. Rounds run in strict order. A pick is
/// ignored (and the match left undecided) when the match is missing a team or the picked
/// code is not in either slot.
pub fn apply_winner_predictions(bracket: &PlayoffBracket, predictions: &WinnerPredictions) -> PlayoffBracket {
    let mut out = bracket.clone();
    for m in out.all_matches_mut() {
        m.winner = None;
        m.loser = None;
        if m.round != Round::RoundOf32 {
            m.team1 = None;
            m.team2 = None;
        }
    }

    for round in Round::ORDER {
        let mut advances: Vec<(PlayoffMatchId, Slot, QualifiedTeam)> = Vec::new();
        for m in out.round_mut(round) {
            let Some(code) = predictions.get(&m.id) else {
                continue;
            };
            let Some((winner, loser)) = m.split_by_winner(code) else {
                continue;
            };
            let (winner, loser) = (winner.clone(), loser.clone());

            m.winner = Some(winner.team.code.clone());
            if round == Round::SemiFinal {
                m.loser = Some(loser.team.code.clone());
            }
            if let (Some(id), Some(slot)) = (m.next_match_id, m.next_slot) {
                advances.push((id, slot, winner));
            }
            if let (Some(id), Some(slot)) = (m.loser_next_match_id, m.loser_next_slot) {
                advances.push((id, slot, loser));
            }
        }
        for (id, slot, team) in advances {
            if let Some(next) = out.match_by_id_mut(id) {
                next.set_slot(slot, Some(team));
            }
        }
    }
    out
}

/// Picks with every finalized official knockout winner laid over them.
pub fn overlay_official_winners(predictions: &WinnerPredictions, results: &OfficialResults) -> WinnerPredictions {
    let mut combined = predictions.clone();
    for (id, code) in results.finalized_winners() {
        combined.insert(id, code.to_string());
    }
    combined
}
