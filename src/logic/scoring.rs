//! Points: compare finalized official results with stored predictions.
//!
//! Totals are always recomputed from scratch over every finalized result, so finalizing the
//! same result twice or resetting one can never leave points behind.

use crate::models::{
    GroupMatchId, OfficialResults, PointsBreakdown, Score, User, UserId, UserPredictions,
};
use std::collections::HashMap;

pub const EXACT_SCORE_POINTS: u32 = 3;
pub const OUTCOME_POINTS: u32 = 1;
pub const WINNER_POINTS: u32 = 3;

/// 3 for the exact score, 1 for the right outcome only, else 0.
pub fn group_prediction_points(official: Score, predicted: Score) -> u32 {
    if official == predicted {
        EXACT_SCORE_POINTS
    } else if official.outcome() == predicted.outcome() {
        OUTCOME_POINTS
    } else {
        0
    }
}

/// 3 for the right knockout winner, else 0.
pub fn playoff_prediction_points(official_winner: &str, predicted: &str) -> u32 {
    if official_winner == predicted {
        WINNER_POINTS
    } else {
        0
    }
}

/// Points of each group prediction that has a finalized result.
pub fn prediction_points(predictions: &UserPredictions, results: &OfficialResults) -> HashMap<GroupMatchId, u32> {
    predictions
        .scores
        .iter()
        .filter_map(|(id, predicted)| {
            let official = results.finalized_score(id)?;
            Some((id.clone(), group_prediction_points(official, *predicted)))
        })
        .collect()
}

/// Full recomputation of one user's points.
pub fn score_user(predictions: &UserPredictions, results: &OfficialResults) -> PointsBreakdown {
    let mut points = PointsBreakdown::default();
    for (id, predicted) in &predictions.scores {
        let Some(official) = results.finalized_score(id) else {
            continue;
        };
        match group_prediction_points(official, *predicted) {
            EXACT_SCORE_POINTS => points.exact_scores += 1,
            OUTCOME_POINTS => points.correct_outcomes += 1,
            _ => {}
        }
    }
    for (id, predicted) in &predictions.winners {
        if let Some(official) = results.finalized_winner(*id) {
            if playoff_prediction_points(official, predicted) > 0 {
                points.correct_winners += 1;
            }
        }
    }
    points.total = points.exact_scores * EXACT_SCORE_POINTS
        + points.correct_outcomes * OUTCOME_POINTS
        + points.correct_winners * WINNER_POINTS;
    points
}

/// Points of every user.
pub fn score_all(users: &[User], results: &OfficialResults) -> HashMap<UserId, PointsBreakdown> {
    users
        .iter()
        .map(|u| (u.id, score_user(&u.predictions, results)))
        .collect()
}

/// Change in total per user between two scorings; users whose total did not move are omitted.
pub fn point_deltas(
    before: &HashMap<UserId, PointsBreakdown>,
    after: &HashMap<UserId, PointsBreakdown>,
) -> HashMap<UserId, i64> {
    after
        .iter()
        .filter_map(|(id, now)| {
            let prev = before.get(id).map(|p| p.total).unwrap_or(0);
            let delta = i64::from(now.total) - i64::from(prev);
            (delta != 0).then_some((*id, delta))
        })
        .collect()
}
