//! Leaderboard: rank users by points, with a movement indicator against an earlier snapshot.

use crate::models::{PointsBreakdown, PredictionPool, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Movement since the previous snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Same,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: usize,
    pub user_id: UserId,
    pub username: String,
    pub points: PointsBreakdown,
    /// None when the user was not in the previous snapshot.
    pub trend: Option<Trend>,
}

/// Sort by total, then exact scores (both descending), then username.
pub fn build_leaderboard(users: &[User], previous_ranks: &HashMap<UserId, usize>) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&User> = users.iter().collect();
    sorted.sort_by(|a, b| {
        b.points
            .total
            .cmp(&a.points.total)
            .then_with(|| b.points.exact_scores.cmp(&a.points.exact_scores))
            .then_with(|| a.username.cmp(&b.username))
    });
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, u)| {
            let rank = i + 1;
            let trend = previous_ranks.get(&u.id).map(|&prev| match prev.cmp(&rank) {
                std::cmp::Ordering::Greater => Trend::Up,
                std::cmp::Ordering::Less => Trend::Down,
                std::cmp::Ordering::Equal => Trend::Same,
            });
            LeaderboardEntry {
                rank,
                user_id: u.id,
                username: u.username.clone(),
                points: u.points,
                trend,
            }
        })
        .collect()
}

/// Current leaderboard of a pool, trends against its stored snapshot.
pub fn leaderboard(pool: &PredictionPool) -> Vec<LeaderboardEntry> {
    build_leaderboard(&pool.users, &pool.previous_ranks)
}

/// Store the current ranks as the baseline for the next trend comparison.
pub fn snapshot_ranks(pool: &mut PredictionPool) {
    pool.previous_ranks = leaderboard(pool)
        .into_iter()
        .map(|e| (e.user_id, e.rank))
        .collect();
}
