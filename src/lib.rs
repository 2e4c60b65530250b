//! World Cup prediction game: library with models and the standings/bracket/points engine.

pub mod logic;
pub mod models;

pub use logic::{
    all_group_matches, all_group_standings, apply_winner_predictions, assign_best_thirds,
    best_thirds, bracket_for, build_bracket, build_leaderboard, calculate_standings,
    clean_stale_predictions, clear_score_prediction, clear_winner_prediction, find_group_match,
    generate_group_matches, generate_playoff_bracket, group_prediction_points, group_winners,
    leaderboard, overlay_official_scores, overlay_official_winners, playoff_prediction_points,
    point_deltas, prediction_points, qualified_for, qualified_team_codes, qualified_teams,
    qualified_teams_for, recompute_points, record_group_result, record_playoff_result,
    reset_group_result, reset_playoff_result, runners_up, score_all, score_user,
    set_score_prediction, set_winner_prediction, snapshot_ranks, standings_for,
    with_previous_positions, LeaderboardEntry, ProcessedResult, ThirdPlaceAssignment, Trend,
};
pub use models::{
    CatalogError, GroupLetter, GroupMatch, GroupMatchId, GroupStandings, MatchResult,
    OfficialResults, Outcome, PlayoffBracket, PlayoffMatch, PlayoffMatchId, PointsBreakdown,
    PoolError, PredictionPool, QualifiedTeam, Round, Score, ScorePredictions, Slot, Team,
    TeamCatalog, TeamCode, TeamStanding, User, UserId, UserPredictions, WinnerPredictions, GROUPS,
    MAX_GOALS,
};
