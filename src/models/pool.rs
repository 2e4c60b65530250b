//! PredictionPool: users, their predictions, official results and point totals.

use crate::models::bracket::{PlayoffMatchId, WinnerPredictions};
use crate::models::result::{OfficialResults, PointsBreakdown};
use crate::models::standing::{Score, ScorePredictions, MAX_GOALS};
use crate::models::team::{GroupMatchId, TeamCatalog, TeamCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a user.
pub type UserId = Uuid;

/// Errors that can occur during pool operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PoolError {
    /// No user with this id.
    UserNotFound(UserId),
    /// A user with this name already exists (names are unique, case-insensitive).
    DuplicateUsername,
    /// Username is empty after trimming.
    EmptyUsername,
    /// No group match with this id.
    UnknownGroupMatch(GroupMatchId),
    /// No playoff match with this number.
    UnknownPlayoffMatch(PlayoffMatchId),
    /// The team code is not in the catalog.
    UnknownTeam(TeamCode),
    /// The match already has a finalized official result; predictions are locked.
    GroupMatchLocked(GroupMatchId),
    /// The playoff match already has a finalized official result; picks are locked.
    PlayoffMatchLocked(PlayoffMatchId),
    /// A side of the score is above `MAX_GOALS`.
    InvalidScore(Score),
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::UserNotFound(_) => write!(f, "User not found"),
            PoolError::DuplicateUsername => write!(f, "A user with this name already exists"),
            PoolError::EmptyUsername => write!(f, "Username must not be empty"),
            PoolError::UnknownGroupMatch(id) => write!(f, "Unknown group match '{}'", id),
            PoolError::UnknownPlayoffMatch(id) => write!(f, "Unknown playoff match {}", id),
            PoolError::UnknownTeam(code) => write!(f, "Unknown team '{}'", code),
            PoolError::GroupMatchLocked(id) => write!(f, "Match '{}' is already finalized", id),
            PoolError::PlayoffMatchLocked(id) => write!(f, "Match {} is already finalized", id),
            PoolError::InvalidScore(score) => write!(
                f,
                "Invalid score {}-{} (at most {} goals per side)",
                score.home, score.away, MAX_GOALS
            ),
        }
    }
}

impl std::error::Error for PoolError {}

/// Both kinds of picks a user holds.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserPredictions {
    pub scores: ScorePredictions,
    pub winners: WinnerPredictions,
}

/// A participant in the pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub predictions: UserPredictions,
    /// Last recomputed points.
    pub points: PointsBreakdown,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            predictions: UserPredictions::default(),
            points: PointsBreakdown::default(),
        }
    }
}

/// Full game state: catalog, users, official results and the rank snapshot used for trends.
#[derive(Clone, Debug, Serialize)]
pub struct PredictionPool {
    #[serde(skip)]
    pub catalog: TeamCatalog,
    pub users: Vec<User>,
    pub results: OfficialResults,
    /// Leaderboard ranks at the last snapshot.
    pub previous_ranks: HashMap<UserId, usize>,
}

impl PredictionPool {
    pub fn new(catalog: TeamCatalog) -> Self {
        Self {
            catalog,
            users: Vec::new(),
            results: OfficialResults::new(),
            previous_ranks: HashMap::new(),
        }
    }

    pub fn get_user(&self, id: UserId) -> Result<&User, PoolError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(PoolError::UserNotFound(id))
    }

    pub fn get_user_mut(&mut self, id: UserId) -> Result<&mut User, PoolError> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(PoolError::UserNotFound(id))
    }

    /// Add a user. Names must be unique (case-insensitive). Returns the new id.
    pub fn add_user(&mut self, username: impl Into<String>) -> Result<UserId, PoolError> {
        let username = username.into();
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(PoolError::EmptyUsername);
        }
        if self
            .users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(trimmed))
        {
            return Err(PoolError::DuplicateUsername);
        }
        let user = User::new(trimmed);
        let id = user.id;
        self.users.push(user);
        Ok(id)
    }

    /// Remove a user and their predictions.
    pub fn remove_user(&mut self, id: UserId) -> Result<(), PoolError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(PoolError::UserNotFound(id))?;
        self.users.remove(idx);
        self.previous_ranks.remove(&id);
        Ok(())
    }
}
