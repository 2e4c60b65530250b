//! Official match results and per-user point breakdowns.

use crate::models::bracket::PlayoffMatchId;
use crate::models::standing::Score;
use crate::models::team::{GroupMatchId, TeamCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Published result for one match. Only finalized results score points.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult<T> {
    pub outcome: T,
    pub finalized: bool,
    pub recorded_at: DateTime<Utc>,
}

impl<T> MatchResult<T> {
    pub fn new(outcome: T, finalized: bool) -> Self {
        Self {
            outcome,
            finalized,
            recorded_at: Utc::now(),
        }
    }
}

/// The official results feed: group scores and knockout winners.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OfficialResults {
    pub group: HashMap<GroupMatchId, MatchResult<Score>>,
    pub playoff: HashMap<PlayoffMatchId, MatchResult<TeamCode>>,
}

impl OfficialResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a group score. Returns true if the stored result changed.
    pub fn record_group(&mut self, match_id: impl Into<GroupMatchId>, score: Score, finalized: bool) -> bool {
        let match_id = match_id.into();
        if let Some(existing) = self.group.get(&match_id) {
            if existing.outcome == score && existing.finalized == finalized {
                return false;
            }
        }
        self.group.insert(match_id, MatchResult::new(score, finalized));
        true
    }

    /// Insert or replace a knockout winner. Returns true if the stored result changed.
    pub fn record_playoff(&mut self, match_id: PlayoffMatchId, winner: impl Into<TeamCode>, finalized: bool) -> bool {
        let winner = winner.into();
        if let Some(existing) = self.playoff.get(&match_id) {
            if existing.outcome == winner && existing.finalized == finalized {
                return false;
            }
        }
        self.playoff.insert(match_id, MatchResult::new(winner, finalized));
        true
    }

    /// Remove a group result. Returns true if one existed.
    pub fn reset_group(&mut self, match_id: &str) -> bool {
        self.group.remove(match_id).is_some()
    }

    /// Remove a knockout result. Returns true if one existed.
    pub fn reset_playoff(&mut self, match_id: PlayoffMatchId) -> bool {
        self.playoff.remove(&match_id).is_some()
    }

    pub fn finalized_score(&self, match_id: &str) -> Option<Score> {
        self.group
            .get(match_id)
            .filter(|r| r.finalized)
            .map(|r| r.outcome)
    }

    pub fn finalized_winner(&self, match_id: PlayoffMatchId) -> Option<&str> {
        self.playoff
            .get(&match_id)
            .filter(|r| r.finalized)
            .map(|r| r.outcome.as_str())
    }

    pub fn finalized_scores(&self) -> impl Iterator<Item = (&GroupMatchId, Score)> {
        self.group
            .iter()
            .filter(|(_, r)| r.finalized)
            .map(|(id, r)| (id, r.outcome))
    }

    pub fn finalized_winners(&self) -> impl Iterator<Item = (PlayoffMatchId, &str)> {
        self.playoff
            .iter()
            .filter(|(_, r)| r.finalized)
            .map(|(id, r)| (*id, r.outcome.as_str()))
    }
}

/// Points a user earned, recomputed from scratch over finalized results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    /// Group predictions with the exact score (3 points each).
    pub exact_scores: u32,
    /// Group predictions with the right outcome only (1 point each).
    pub correct_outcomes: u32,
    /// Knockout winner picks that were right (3 points each).
    pub correct_winners: u32,
    pub total: u32,
}
