//! Official results in a pool: record, finalize and reset, recomputing every user's points.

use crate::logic::fixtures::find_group_match;
use crate::logic::predictions::{purge_if_qualified_changed, qualified_for};
use crate::logic::qualification::qualified_team_codes;
use crate::logic::scoring::{point_deltas, score_all};
use crate::logic::topology::is_playoff_match;
use crate::models::{
    PlayoffMatchId, PointsBreakdown, PoolError, PredictionPool, Score, TeamCode, UserId,
};
use serde::Serialize;
use std::collections::HashMap;

/// What a result change did to the users' points.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ProcessedResult {
    /// Users whose total moved.
    pub users_updated: usize,
    pub deltas: HashMap<UserId, i64>,
}

/// Record (and optionally finalize) a group match score.
pub fn record_group_result(
    pool: &mut PredictionPool,
    match_id: &str,
    score: Score,
    finalized: bool,
) -> Result<ProcessedResult, PoolError> {
    if find_group_match(&pool.catalog, match_id).is_none() {
        return Err(PoolError::UnknownGroupMatch(match_id.to_string()));
    }
    if !score.is_plausible() {
        return Err(PoolError::InvalidScore(score));
    }
    let before = qualified_sets(pool);
    pool.results.record_group(match_id, score, finalized);
    purge_stale_picks(pool, &before)?;
    log::info!(
        "Group result {} recorded: {}-{} (finalized: {})",
        match_id,
        score.home,
        score.away,
        finalized
    );
    Ok(recompute_points(pool))
}

/// Record (and optionally finalize) a knockout winner.
pub fn record_playoff_result(
    pool: &mut PredictionPool,
    match_id: PlayoffMatchId,
    winner: &str,
    finalized: bool,
) -> Result<ProcessedResult, PoolError> {
    if !is_playoff_match(match_id) {
        return Err(PoolError::UnknownPlayoffMatch(match_id));
    }
    if pool.catalog.team_by_code(winner).is_none() {
        return Err(PoolError::UnknownTeam(winner.to_string()));
    }
    pool.results.record_playoff(match_id, winner, finalized);
    log::info!(
        "Playoff result {} recorded: winner {} (finalized: {})",
        match_id,
        winner,
        finalized
    );
    Ok(recompute_points(pool))
}

/// Delete a group result and take back exactly the points it gave.
pub fn reset_group_result(pool: &mut PredictionPool, match_id: &str) -> Result<ProcessedResult, PoolError> {
    if find_group_match(&pool.catalog, match_id).is_none() {
        return Err(PoolError::UnknownGroupMatch(match_id.to_string()));
    }
    let before = qualified_sets(pool);
    if pool.results.reset_group(match_id) {
        log::info!("Group result {} reset", match_id);
        purge_stale_picks(pool, &before)?;
    }
    Ok(recompute_points(pool))
}

/// Delete a knockout result and take back exactly the points it gave.
pub fn reset_playoff_result(pool: &mut PredictionPool, match_id: PlayoffMatchId) -> Result<ProcessedResult, PoolError> {
    if !is_playoff_match(match_id) {
        return Err(PoolError::UnknownPlayoffMatch(match_id));
    }
    if pool.results.reset_playoff(match_id) {
        log::info!("Playoff result {} reset", match_id);
    }
    Ok(recompute_points(pool))
}

/// Every user's qualified codes, as their standings currently show them.
fn qualified_sets(pool: &PredictionPool) -> Vec<(UserId, Vec<TeamCode>)> {
    pool.users
        .iter()
        .filter_map(|u| {
            let qualified = qualified_for(pool, u.id).ok()?;
            Some((u.id, qualified_team_codes(&qualified)))
        })
        .collect()
}

/// A finalized group score is laid over every user's predictions, so it can change who they
/// see qualifying; drop the picks that no longer resolve for those users.
fn purge_stale_picks(pool: &mut PredictionPool, before: &[(UserId, Vec<TeamCode>)]) -> Result<(), PoolError> {
    for (id, codes) in before {
        purge_if_qualified_changed(pool, *id, codes)?;
    }
    Ok(())
}

/// Rescore every user from scratch and store the new totals.
pub fn recompute_points(pool: &mut PredictionPool) -> ProcessedResult {
    let before: HashMap<UserId, PointsBreakdown> =
        pool.users.iter().map(|u| (u.id, u.points)).collect();
    let after = score_all(&pool.users, &pool.results);
    for u in &mut pool.users {
        if let Some(p) = after.get(&u.id) {
            u.points = *p;
        }
    }
    let deltas = point_deltas(&before, &after);
    ProcessedResult {
        users_updated: deltas.len(),
        deltas,
    }
}
