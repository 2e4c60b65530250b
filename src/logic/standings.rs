//! Group standings: reduce fixtures and (partial) score predictions into a ranked table.

use crate::logic::fixtures::generate_group_matches;
use crate::models::{
    GroupMatch, GroupStandings, OfficialResults, ScorePredictions, Team, TeamCatalog,
    TeamStanding, GROUPS,
};
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Rank a group from its fixtures and predictions.
///
/// 1. Zeroed row per team.
/// 2. Each fixture with a prediction updates both sides; undecided fixtures are skipped.
/// 3. Sort by points, goal difference, goals for (all descending), then name alphabetically.
/// 4. Position = index + 1.
pub fn calculate_standings(
    teams: &[Team],
    matches: &[GroupMatch],
    predictions: &ScorePredictions,
) -> Vec<TeamStanding> {
    let mut rows: Vec<TeamStanding> = teams.iter().cloned().map(TeamStanding::new).collect();
    let index: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.code.as_str(), i))
        .collect();

    for m in matches {
        let Some(score) = predictions.get(&m.id) else {
            continue;
        };
        let (Some(&home), Some(&away)) = (
            index.get(m.home_team.as_str()),
            index.get(m.away_team.as_str()),
        ) else {
            continue;
        };
        rows[home].record(score.home, score.away);
        rows[away].record(score.away, score.home);
    }

    for r in &mut rows {
        r.goal_diff = r.goal_difference();
    }

    rows.sort_by(compare_rows);
    for (i, r) in rows.iter_mut().enumerate() {
        r.position = (i + 1) as u8;
    }
    rows
}

/// Table order: points, goal difference, goals for (descending), then name.
fn compare_rows(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_diff.cmp(&a.goal_diff))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| collation_key(&a.team.name).cmp(&collation_key(&b.team.name)))
        .then_with(|| a.team.name.cmp(&b.team.name))
}

/// Alphabetical sort key: accents stripped, case folded ("Österreich" sorts with "osterreich").
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Standings of all 12 groups.
pub fn all_group_standings(catalog: &TeamCatalog, predictions: &ScorePredictions) -> GroupStandings {
    GROUPS
        .iter()
        .map(|&g| {
            let teams = catalog.teams_in_group(g);
            let matches = generate_group_matches(catalog, g);
            (g, calculate_standings(&teams, &matches, predictions))
        })
        .collect()
}

/// Copy `current`, annotating each row with the position the team held in `previous`.
pub fn with_previous_positions(current: &[TeamStanding], previous: &[TeamStanding]) -> Vec<TeamStanding> {
    current
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.previous_position = previous
                .iter()
                .find(|p| p.team.code == row.team.code)
                .map(|p| p.position);
            row
        })
        .collect()
}

/// Predictions with every finalized official group score laid over them.
pub fn overlay_official_scores(predictions: &ScorePredictions, results: &OfficialResults) -> ScorePredictions {
    let mut combined = predictions.clone();
    for (id, score) in results.finalized_scores() {
        combined.insert(id.clone(), score);
    }
    combined
}
