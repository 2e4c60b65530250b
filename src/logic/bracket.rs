//! Bracket builder: round of 32 from qualified teams, empty later rounds with routing wired from the tables.

use crate::logic::qualification::{assign_best_thirds, qualified_teams_for, ThirdPlaceAssignment};
use crate::logic::topology::{SlotSource, KNOCKOUT_ROUTES, ROUND_OF_32};
use crate::models::{
    PlayoffBracket, PlayoffMatch, PlayoffMatchId, QualifiedTeam, Round, ScorePredictions,
    TeamCatalog,
};

/// Build the full bracket. Round-of-32 slots are resolved now; everything later starts empty.
pub fn build_bracket(qualified: &[QualifiedTeam]) -> PlayoffBracket {
    let thirds = assign_best_thirds(qualified);

    let r32 = ROUND_OF_32
        .iter()
        .enumerate()
        .map(|(i, fixture)| {
            let mut m = PlayoffMatch::new(fixture.match_id, Round::RoundOf32, (i + 1) as u8);
            m.team1 = resolve(fixture.team1, fixture.match_id, qualified, &thirds);
            m.team2 = resolve(fixture.team2, fixture.match_id, qualified, &thirds);
            m.next_match_id = Some(fixture.winner_to.match_id);
            m.next_slot = Some(fixture.winner_to.slot);
            m
        })
        .collect();

    PlayoffBracket {
        r32,
        r16: empty_round(Round::RoundOf16),
        qf: empty_round(Round::QuarterFinal),
        sf: empty_round(Round::SemiFinal),
        third_place: single(Round::ThirdPlace),
        final_match: single(Round::Final),
    }
}

/// Bracket straight from a catalog and score predictions.
pub fn generate_playoff_bracket(catalog: &TeamCatalog, predictions: &ScorePredictions) -> PlayoffBracket {
    build_bracket(&qualified_teams_for(catalog, predictions))
}

fn resolve(
    source: SlotSource,
    match_id: PlayoffMatchId,
    qualified: &[QualifiedTeam],
    thirds: &ThirdPlaceAssignment,
) -> Option<QualifiedTeam> {
    let (position, group) = match source {
        SlotSource::Winner(g) => (1, g),
        SlotSource::RunnerUp(g) => (2, g),
        SlotSource::BestThird(_) => return thirds.team_for(match_id).cloned(),
    };
    qualified
        .iter()
        .find(|q| q.position == position && q.group == group)
        .cloned()
}

/// Nodes of a later round, in table order, with winner/loser routing.
fn empty_round(round: Round) -> Vec<PlayoffMatch> {
    KNOCKOUT_ROUTES
        .iter()
        .filter(|r| r.round == round)
        .enumerate()
        .map(|(i, route)| {
            let mut m = PlayoffMatch::new(route.match_id, round, (i + 1) as u8);
            m.next_match_id = route.winner_to.map(|d| d.match_id);
            m.next_slot = route.winner_to.map(|d| d.slot);
            m.loser_next_match_id = route.loser_to.map(|d| d.match_id);
            m.loser_next_slot = route.loser_to.map(|d| d.slot);
            m
        })
        .collect()
}

fn single(round: Round) -> PlayoffMatch {
    // Third place and final each have exactly one table entry.
    empty_round(round).pop().unwrap_or_else(|| {
        log::error!("No knockout route for {:?}; bracket node left unnumbered", round);
        debug_assert!(false, "missing knockout route for {:?}", round);
        PlayoffMatch::new(0, round, 1)
    })
}
