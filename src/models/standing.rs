//! Score predictions, group standings rows and qualified teams.

use crate::models::team::{GroupLetter, GroupMatchId, Team};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Most goals one side can be credited with in a stored score.
pub const MAX_GOALS: u32 = 99;

/// A scoreline (home goals, away goals).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Both sides within `0..=MAX_GOALS`.
    pub fn is_plausible(&self) -> bool {
        self.home <= MAX_GOALS && self.away <= MAX_GOALS
    }

    pub fn outcome(&self) -> Outcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::AwayWin,
        }
    }
}

/// Result category of a scoreline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// Score predictions by group match id. A missing entry means undecided.
pub type ScorePredictions = HashMap<GroupMatchId, Score>;

/// One row of a group table. Always derived, never patched in place.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: Team,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
    pub points: u32,
    /// 1-based rank in the group.
    pub position: u8,
    /// Rank in an earlier snapshot, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_position: Option<u8>,
}

impl TeamStanding {
    /// Zeroed row for a team.
    pub fn new(team: Team) -> Self {
        Self {
            team,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_diff: 0,
            points: 0,
            position: 0,
            previous_position: None,
        }
    }

    /// Record one match from this team's point of view.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        if scored > conceded {
            self.won += 1;
            self.points += 3;
        } else if scored == conceded {
            self.drawn += 1;
            self.points += 1;
        } else {
            self.lost += 1;
        }
    }

    /// `goals_for - goals_against`, clamped to the `i32` range.
    pub fn goal_difference(&self) -> i32 {
        let diff = i64::from(self.goals_for) - i64::from(self.goals_against);
        i32::try_from(diff).unwrap_or(if diff < 0 { i32::MIN } else { i32::MAX })
    }

    /// Places gained since the previous snapshot (negative when dropping).
    pub fn position_change(&self) -> i32 {
        self.previous_position
            .map(|prev| i32::from(prev) - i32::from(self.position))
            .unwrap_or(0)
    }
}

/// Ranked standings of every group, keyed by group letter.
pub type GroupStandings = BTreeMap<GroupLetter, Vec<TeamStanding>>;

/// A team that reached the knockout phase.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QualifiedTeam {
    pub team: Team,
    /// 1 (winner), 2 (runner-up) or 3 (best third).
    pub position: u8,
    pub group: GroupLetter,
    pub points: u32,
    pub goal_diff: i32,
    pub goals_for: u32,
    /// e.g. "1° Grupo A" or "Mejor 3° (#2)".
    pub origin_label: String,
}

impl QualifiedTeam {
    pub fn from_standing(standing: &TeamStanding, position: u8, origin_label: String) -> Self {
        Self {
            team: standing.team.clone(),
            position,
            group: standing.team.group,
            points: standing.points,
            goal_diff: standing.goal_diff,
            goals_for: standing.goals_for,
            origin_label,
        }
    }

    pub fn code(&self) -> &str {
        &self.team.code
    }
}
