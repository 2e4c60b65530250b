//! Data structures for the prediction game: teams, standings, bracket, results, pool state.

mod bracket;
mod pool;
mod result;
mod standing;
mod team;

pub use bracket::{PlayoffBracket, PlayoffMatch, PlayoffMatchId, Round, Slot, WinnerPredictions};
pub use pool::{PoolError, PredictionPool, User, UserId, UserPredictions};
pub use result::{MatchResult, OfficialResults, PointsBreakdown};
pub use standing::{
    GroupStandings, Outcome, QualifiedTeam, Score, ScorePredictions, TeamStanding, MAX_GOALS,
};
pub use team::{
    CatalogError, GroupLetter, GroupMatch, GroupMatchId, Team, TeamCatalog, TeamCode, GROUPS,
    TEAMS_PER_GROUP,
};
