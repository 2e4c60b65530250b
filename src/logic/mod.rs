//! Prediction-game business logic: standings, qualification, bracket, propagation, points.

mod bracket;
mod cleanup;
mod fixtures;
mod leaderboard;
mod predictions;
mod propagation;
mod qualification;
mod results;
mod scoring;
mod standings;
pub mod topology;

pub use bracket::{build_bracket, generate_playoff_bracket};
pub use cleanup::clean_stale_predictions;
pub use fixtures::{all_group_matches, find_group_match, generate_group_matches};
pub use leaderboard::{build_leaderboard, leaderboard, snapshot_ranks, LeaderboardEntry, Trend};
pub use predictions::{
    bracket_for, clear_score_prediction, clear_winner_prediction, qualified_for,
    set_score_prediction, set_winner_prediction, standings_for,
};
pub use propagation::{apply_winner_predictions, overlay_official_winners};
pub use qualification::{
    assign_best_thirds, best_thirds, group_winners, qualified_team_codes, qualified_teams,
    qualified_teams_for, runners_up, ThirdPlaceAssignment, BEST_THIRDS,
};
pub use results::{
    recompute_points, record_group_result, record_playoff_result, reset_group_result,
    reset_playoff_result, ProcessedResult,
};
pub use scoring::{
    group_prediction_points, playoff_prediction_points, point_deltas, prediction_points,
    score_all, score_user, EXACT_SCORE_POINTS, OUTCOME_POINTS, WINNER_POINTS,
};
pub use standings::{
    all_group_standings, calculate_standings, overlay_official_scores, with_previous_positions,
};
