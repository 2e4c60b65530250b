//! Qualification: group winners, runners-up, the 8 best thirds, and which round-of-32 match each best third plays.

use crate::logic::standings::all_group_standings;
use crate::logic::topology::third_place_slots;
use crate::models::{
    GroupLetter, GroupStandings, PlayoffMatchId, QualifiedTeam, ScorePredictions, TeamCatalog,
    TeamCode,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Number of third-placed teams that go through.
pub const BEST_THIRDS: usize = 8;

/// The team at `position` (1-based) of every group, labelled by origin.
fn nth_of_each_group(standings: &GroupStandings, position: u8) -> Vec<QualifiedTeam> {
    standings
        .iter()
        .filter_map(|(group, rows)| {
            let row = rows.get(usize::from(position) - 1)?;
            let label = format!("{}° Grupo {}", position, group);
            Some(QualifiedTeam::from_standing(row, position, label))
        })
        .collect()
}

/// 1st place of each group.
pub fn group_winners(standings: &GroupStandings) -> Vec<QualifiedTeam> {
    nth_of_each_group(standings, 1)
}

/// 2nd place of each group.
pub fn runners_up(standings: &GroupStandings) -> Vec<QualifiedTeam> {
    nth_of_each_group(standings, 2)
}

/// The 8 best 3rd-placed teams in rank order, labelled "Mejor 3° (#n)".
///
/// Ranked by points, goal difference, goals for (descending), then group letter.
pub fn best_thirds(standings: &GroupStandings) -> Vec<QualifiedTeam> {
    let mut thirds = nth_of_each_group(standings, 3);
    thirds.sort_by(compare_thirds);
    thirds.truncate(BEST_THIRDS);
    for (i, t) in thirds.iter_mut().enumerate() {
        t.origin_label = format!("Mejor 3° (#{})", i + 1);
    }
    thirds
}

fn compare_thirds(a: &QualifiedTeam, b: &QualifiedTeam) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_diff.cmp(&a.goal_diff))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.group.cmp(&b.group))
}

/// All 32 qualified teams: 12 winners, 12 runners-up, then the 8 best thirds in rank order.
pub fn qualified_teams(standings: &GroupStandings) -> Vec<QualifiedTeam> {
    let mut qualified = group_winners(standings);
    qualified.extend(runners_up(standings));
    qualified.extend(best_thirds(standings));
    qualified
}

/// Qualified teams straight from a catalog and score predictions.
pub fn qualified_teams_for(catalog: &TeamCatalog, predictions: &ScorePredictions) -> Vec<QualifiedTeam> {
    qualified_teams(&all_group_standings(catalog, predictions))
}

/// Sorted codes of the qualified teams, for detecting a change in who qualifies.
pub fn qualified_team_codes(qualified: &[QualifiedTeam]) -> Vec<TeamCode> {
    let mut codes: Vec<TeamCode> = qualified.iter().map(|q| q.team.code.clone()).collect();
    codes.sort();
    codes
}

/// Which best third plays in each round-of-32 match that faces one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ThirdPlaceAssignment {
    pub slots: BTreeMap<PlayoffMatchId, Option<QualifiedTeam>>,
    /// Slots no eligible team could fill (misconfigured pools).
    pub unresolved: Vec<PlayoffMatchId>,
}

impl ThirdPlaceAssignment {
    pub fn team_for(&self, match_id: PlayoffMatchId) -> Option<&QualifiedTeam> {
        self.slots.get(&match_id).and_then(|t| t.as_ref())
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

struct ThirdSlot {
    match_id: PlayoffMatchId,
    pool: &'static [GroupLetter],
    opponent_group: Option<GroupLetter>,
}

impl ThirdSlot {
    fn accepts(&self, team: &QualifiedTeam) -> bool {
        self.pool.contains(&team.group) && self.opponent_group != Some(team.group)
    }
}

/// Place the best thirds (position 3 entries of `qualified`, in rank order) into their round-of-32 slots.
///
/// Slots are visited most-constrained first (smallest pool, table order on ties) and each takes
/// the highest-ranked unused third whose group is in its pool and is not its opponent's group.
/// When that greedy choice dead-ends, the search backtracks, so a complete assignment is found
/// whenever one exists and equals the greedy one when greedy succeeds. Only if none exists are the
/// leftover slots of the greedy pass left empty.
pub fn assign_best_thirds(qualified: &[QualifiedTeam]) -> ThirdPlaceAssignment {
    let thirds: Vec<&QualifiedTeam> = qualified.iter().filter(|q| q.position == 3).collect();
    let mut slots: Vec<ThirdSlot> = third_place_slots()
        .into_iter()
        .map(|(match_id, pool, opponent_group)| ThirdSlot {
            match_id,
            pool,
            opponent_group,
        })
        .collect();
    slots.sort_by_key(|s| s.pool.len());

    let mut used = vec![false; thirds.len()];
    let mut picks = Vec::with_capacity(slots.len());
    let picks: Vec<Option<usize>> = if search(&slots, &thirds, &mut used, &mut picks) {
        picks.into_iter().map(Some).collect()
    } else {
        greedy(&slots, &thirds)
    };

    let mut assignment = ThirdPlaceAssignment::default();
    for (slot, pick) in slots.iter().zip(picks) {
        let team = pick.map(|i| thirds[i].clone());
        if team.is_none() {
            assignment.unresolved.push(slot.match_id);
        }
        assignment.slots.insert(slot.match_id, team);
    }
    if !assignment.unresolved.is_empty() {
        log::warn!(
            "No eligible best third for round-of-32 match(es) {:?}; leaving slot(s) empty",
            assignment.unresolved
        );
    }
    assignment
}

/// Depth-first search in greedy preference order. `picks[i]` is the third index for `slots[i]`.
fn search(
    slots: &[ThirdSlot],
    thirds: &[&QualifiedTeam],
    used: &mut [bool],
    picks: &mut Vec<usize>,
) -> bool {
    let Some(slot) = slots.get(picks.len()) else {
        return true;
    };
    for (i, team) in thirds.iter().enumerate() {
        if used[i] || !slot.accepts(team) {
            continue;
        }
        used[i] = true;
        picks.push(i);
        if search(slots, thirds, used, picks) {
            return true;
        }
        picks.pop();
        used[i] = false;
    }
    false
}

/// Single greedy pass; a slot with no eligible third stays `None`.
fn greedy(slots: &[ThirdSlot], thirds: &[&QualifiedTeam]) -> Vec<Option<usize>> {
    let mut used = vec![false; thirds.len()];
    slots
        .iter()
        .map(|slot| {
            let pick = (0..thirds.len()).find(|&i| !used[i] && slot.accepts(thirds[i]));
            if let Some(i) = pick {
                used[i] = true;
            }
            pick
        })
        .collect()
}
