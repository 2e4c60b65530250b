//! User predictions in a pool: edit picks and derive each user's standings and bracket.

use crate::logic::bracket::build_bracket;
use crate::logic::cleanup::clean_stale_predictions;
use crate::logic::fixtures::find_group_match;
use crate::logic::propagation::{apply_winner_predictions, overlay_official_winners};
use crate::logic::qualification::{qualified_team_codes, qualified_teams};
use crate::logic::standings::{all_group_standings, overlay_official_scores};
use crate::logic::topology::is_playoff_match;
use crate::models::{
    GroupStandings, PlayoffBracket, PlayoffMatchId, PoolError, PredictionPool, QualifiedTeam,
    Score, TeamCode, UserId,
};

/// Standings a user sees: their predictions with finalized official scores laid over them.
pub fn standings_for(pool: &PredictionPool, user_id: UserId) -> Result<GroupStandings, PoolError> {
    let user = pool.get_user(user_id)?;
    let scores = overlay_official_scores(&user.predictions.scores, &pool.results);
    Ok(all_group_standings(&pool.catalog, &scores))
}

/// The 32 teams a user's standings send through.
pub fn qualified_for(pool: &PredictionPool, user_id: UserId) -> Result<Vec<QualifiedTeam>, PoolError> {
    Ok(qualified_teams(&standings_for(pool, user_id)?))
}

/// A user's bracket: rebuilt from their standings, then their picks (overlaid with official winners) applied.
pub fn bracket_for(pool: &PredictionPool, user_id: UserId) -> Result<PlayoffBracket, PoolError> {
    let qualified = qualified_for(pool, user_id)?;
    let user = pool.get_user(user_id)?;
    let winners = overlay_official_winners(&user.predictions.winners, &pool.results);
    Ok(apply_winner_predictions(&build_bracket(&qualified), &winners))
}

/// Set a score prediction. If it changes who qualifies, stale winner picks are purged.
/// Fails once the match has a finalized result.
pub fn set_score_prediction(
    pool: &mut PredictionPool,
    user_id: UserId,
    match_id: &str,
    score: Score,
) -> Result<(), PoolError> {
    update_scores(pool, user_id, match_id, Some(score))
}

/// Remove a score prediction (the match becomes undecided again).
pub fn clear_score_prediction(pool: &mut PredictionPool, user_id: UserId, match_id: &str) -> Result<(), PoolError> {
    update_scores(pool, user_id, match_id, None)
}

fn update_scores(
    pool: &mut PredictionPool,
    user_id: UserId,
    match_id: &str,
    score: Option<Score>,
) -> Result<(), PoolError> {
    if find_group_match(&pool.catalog, match_id).is_none() {
        return Err(PoolError::UnknownGroupMatch(match_id.to_string()));
    }
    if let Some(s) = score.filter(|s| !s.is_plausible()) {
        return Err(PoolError::InvalidScore(s));
    }
    if pool.results.finalized_score(match_id).is_some() {
        return Err(PoolError::GroupMatchLocked(match_id.to_string()));
    }
    let before = qualified_team_codes(&qualified_for(pool, user_id)?);

    let user = pool.get_user_mut(user_id)?;
    match score {
        Some(s) => {
            user.predictions.scores.insert(match_id.to_string(), s);
        }
        None => {
            user.predictions.scores.remove(match_id);
        }
    }

    purge_if_qualified_changed(pool, user_id, &before)
}

/// Purge a user's stale winner picks if their qualified set is no longer `before`.
pub(crate) fn purge_if_qualified_changed(
    pool: &mut PredictionPool,
    user_id: UserId,
    before: &[TeamCode],
) -> Result<(), PoolError> {
    let qualified = qualified_for(pool, user_id)?;
    if qualified_team_codes(&qualified) != before {
        let bracket = build_bracket(&qualified);
        let user = pool.get_user_mut(user_id)?;
        user.predictions.winners = clean_stale_predictions(&user.predictions.winners, &bracket);
    }
    Ok(())
}

/// Set a winner pick. Only the match number is checked; a pick naming a team that is not in
/// the match is kept but ignored when the bracket is propagated. Picks lock once the match
/// has a finalized result.
pub fn set_winner_prediction(
    pool: &mut PredictionPool,
    user_id: UserId,
    match_id: PlayoffMatchId,
    winner: &str,
) -> Result<(), PoolError> {
    if !is_playoff_match(match_id) {
        return Err(PoolError::UnknownPlayoffMatch(match_id));
    }
    if pool.results.finalized_winner(match_id).is_some() {
        return Err(PoolError::PlayoffMatchLocked(match_id));
    }
    pool.get_user_mut(user_id)?
        .predictions
        .winners
        .insert(match_id, winner.to_string());
    Ok(())
}

/// Remove a winner pick.
pub fn clear_winner_prediction(
    pool: &mut PredictionPool,
    user_id: UserId,
    match_id: PlayoffMatchId,
) -> Result<(), PoolError> {
    if !is_playoff_match(match_id) {
        return Err(PoolError::UnknownPlayoffMatch(match_id));
    }
    if pool.results.finalized_winner(match_id).is_some() {
        return Err(PoolError::PlayoffMatchLocked(match_id));
    }
    pool.get_user_mut(user_id)?.predictions.winners.remove(&match_id);
    Ok(())
}
