//! Integration tests for points, the prediction pool and the leaderboard.

mod common;

use common::ordered_predictions;
use world_cup_prode::{
    bracket_for, build_leaderboard, clean_stale_predictions, clear_score_prediction,
    clear_winner_prediction, group_prediction_points, leaderboard, playoff_prediction_points,
    prediction_points, qualified_for, record_group_result, record_playoff_result,
    reset_group_result, reset_playoff_result, score_user, set_score_prediction,
    set_winner_prediction, snapshot_ranks, standings_for, PointsBreakdown, PoolError,
    PredictionPool, Round, Score, TeamCatalog, Trend, User, UserId, UserPredictions, MAX_GOALS,
};

fn pool_with(names: &[&str]) -> (PredictionPool, Vec<UserId>) {
    let mut pool = PredictionPool::new(TeamCatalog::official());
    let ids = names.iter().map(|n| pool.add_user(*n).unwrap()).collect();
    (pool, ids)
}

fn total(pool: &PredictionPool, id: UserId) -> u32 {
    pool.get_user(id).unwrap().points.total
}

#[test]
fn exact_score_outcome_and_miss() {
    let official = Score::new(2, 1);
    assert_eq!(group_prediction_points(official, Score::new(2, 1)), 3);
    assert_eq!(group_prediction_points(official, Score::new(3, 1)), 1);
    assert_eq!(group_prediction_points(official, Score::new(1, 2)), 0);
    assert_eq!(group_prediction_points(Score::new(1, 1), Score::new(0, 0)), 1);
    assert_eq!(group_prediction_points(Score::new(0, 0), Score::new(1, 0)), 0);

    assert_eq!(playoff_prediction_points("ar", "ar"), 3);
    assert_eq!(playoff_prediction_points("ar", "fr"), 0);
}

#[test]
fn only_finalized_results_score() {
    let mut predictions = UserPredictions::default();
    predictions.scores.insert("A-M1-1".into(), Score::new(2, 1));
    predictions.scores.insert("A-M1-2".into(), Score::new(1, 1));
    predictions.scores.insert("A-M2-1".into(), Score::new(0, 1));
    predictions.winners.insert(73, "za".into());

    let (mut pool, _) = pool_with(&[]);
    pool.results.record_group("A-M1-1", Score::new(2, 1), true);
    pool.results.record_group("A-M1-2", Score::new(2, 2), true);
    pool.results.record_group("A-M2-1", Score::new(0, 1), false);
    pool.results.record_playoff(73, "za", true);

    let points = score_user(&predictions, &pool.results);
    assert_eq!(
        points,
        PointsBreakdown {
            exact_scores: 1,
            correct_outcomes: 1,
            correct_winners: 1,
            total: 7,
        }
    );

    let per_match = prediction_points(&predictions, &pool.results);
    assert_eq!(per_match.len(), 2);
    assert_eq!(per_match["A-M1-1"], 3);
    assert_eq!(per_match["A-M1-2"], 1);
}

#[test]
fn finalizing_twice_does_not_double_count_and_reset_takes_points_back() {
    let (mut pool, ids) = pool_with(&["Ana", "Beto"]);
    let (ana, beto) = (ids[0], ids[1]);
    set_score_prediction(&mut pool, ana, "A-M1-1", Score::new(2, 1)).unwrap();
    set_score_prediction(&mut pool, beto, "A-M1-1", Score::new(3, 1)).unwrap();

    let provisional = record_group_result(&mut pool, "A-M1-1", Score::new(2, 1), false).unwrap();
    assert_eq!(provisional.users_updated, 0);
    assert_eq!(total(&pool, ana), 0);

    let processed = record_group_result(&mut pool, "A-M1-1", Score::new(2, 1), true).unwrap();
    assert_eq!(processed.users_updated, 2);
    assert_eq!((processed.deltas[&ana], processed.deltas[&beto]), (3, 1));

    let again = record_group_result(&mut pool, "A-M1-1", Score::new(2, 1), true).unwrap();
    assert!(again.deltas.is_empty());
    assert_eq!((total(&pool, ana), total(&pool, beto)), (3, 1));

    let corrected = record_group_result(&mut pool, "A-M1-1", Score::new(3, 1), true).unwrap();
    assert_eq!((corrected.deltas[&ana], corrected.deltas[&beto]), (-2, 2));
    assert_eq!((total(&pool, ana), total(&pool, beto)), (1, 3));

    let reset = reset_group_result(&mut pool, "A-M1-1").unwrap();
    assert_eq!((reset.deltas[&ana], reset.deltas[&beto]), (-1, -3));
    assert_eq!((total(&pool, ana), total(&pool, beto)), (0, 0));
    assert!(reset_group_result(&mut pool, "A-M1-1").unwrap().deltas.is_empty());
}

#[test]
fn knockout_winner_scores_and_resets() {
    let (mut pool, ids) = pool_with(&["Ana"]);
    let ana = ids[0];
    set_winner_prediction(&mut pool, ana, 73, "za").unwrap();

    let processed = record_playoff_result(&mut pool, 73, "za", true).unwrap();
    assert_eq!(processed.deltas[&ana], 3);
    assert_eq!(pool.get_user(ana).unwrap().points.correct_winners, 1);

    reset_playoff_result(&mut pool, 73).unwrap();
    assert_eq!(total(&pool, ana), 0);
}

#[test]
fn unknown_matches_and_teams_are_rejected() {
    let (mut pool, ids) = pool_with(&["Ana"]);
    let ana = ids[0];
    assert_eq!(
        set_score_prediction(&mut pool, ana, "M-M1-1", Score::new(1, 0)),
        Err(PoolError::UnknownGroupMatch("M-M1-1".into()))
    );
    assert_eq!(
        set_winner_prediction(&mut pool, ana, 105, "ar"),
        Err(PoolError::UnknownPlayoffMatch(105))
    );
    assert_eq!(
        clear_winner_prediction(&mut pool, ana, 72),
        Err(PoolError::UnknownPlayoffMatch(72))
    );
    assert_eq!(
        record_playoff_result(&mut pool, 90, "zz", true),
        Err(PoolError::UnknownTeam("zz".into()))
    );
    assert_eq!(
        record_group_result(&mut pool, "A-M4-1", Score::new(0, 0), true),
        Err(PoolError::UnknownGroupMatch("A-M4-1".into()))
    );
    assert!(pool.results.group.is_empty() && pool.results.playoff.is_empty());
}

#[test]
fn predictions_lock_once_the_result_is_final() {
    let (mut pool, ids) = pool_with(&["Ana"]);
    let ana = ids[0];
    set_score_prediction(&mut pool, ana, "B-M1-1", Score::new(1, 0)).unwrap();

    record_group_result(&mut pool, "B-M1-1", Score::new(1, 0), false).unwrap();
    set_score_prediction(&mut pool, ana, "B-M1-1", Score::new(2, 0)).unwrap();

    record_group_result(&mut pool, "B-M1-1", Score::new(2, 0), true).unwrap();
    assert_eq!(
        set_score_prediction(&mut pool, ana, "B-M1-1", Score::new(3, 0)),
        Err(PoolError::GroupMatchLocked("B-M1-1".into()))
    );
    assert!(clear_score_prediction(&mut pool, ana, "B-M1-1").is_err());

    record_playoff_result(&mut pool, 80, "gb-eng", true).unwrap();
    assert_eq!(
        set_winner_prediction(&mut pool, ana, 80, "gb-eng"),
        Err(PoolError::PlayoffMatchLocked(80))
    );

    reset_group_result(&mut pool, "B-M1-1").unwrap();
    clear_score_prediction(&mut pool, ana, "B-M1-1").unwrap();
    assert!(pool.get_user(ana).unwrap().predictions.scores.is_empty());
}

#[test]
fn users_are_unique_by_trimmed_name() {
    let (mut pool, ids) = pool_with(&["Ana"]);
    assert_eq!(pool.add_user("  ana "), Err(PoolError::DuplicateUsername));
    assert_eq!(pool.add_user("   "), Err(PoolError::EmptyUsername));
    let beto = pool.add_user(" Beto ").unwrap();
    assert_eq!(pool.get_user(beto).unwrap().username, "Beto");

    pool.remove_user(ids[0]).unwrap();
    assert_eq!(pool.get_user(ids[0]).err(), Some(PoolError::UserNotFound(ids[0])));
    assert_eq!(pool.remove_user(ids[0]), Err(PoolError::UserNotFound(ids[0])));
}

#[test]
fn changing_who_qualifies_purges_stale_winner_picks() {
    let (mut pool, ids) = pool_with(&["Ana"]);
    let ana = ids[0];
    pool.get_user_mut(ana).unwrap().predictions.scores = ordered_predictions(&pool.catalog);

    for round in Round::ORDER {
        let bracket = bracket_for(&pool, ana).unwrap();
        for m in bracket.round(round) {
            if let Some(t) = &m.team1 {
                set_winner_prediction(&mut pool, ana, m.id, t.code()).unwrap();
            }
        }
    }
    assert_eq!(bracket_for(&pool, ana).unwrap().champion().unwrap().code(), "de");
    let picks = |pool: &PredictionPool| pool.get_user(ana).unwrap().predictions.winners.clone();
    assert_eq!(picks(&pool).len(), 32);

    // Same 32 teams, different order: picks stay, the broken ones are just ignored.
    set_score_prediction(&mut pool, ana, "E-M1-1", Score::new(0, 3)).unwrap();
    assert_eq!(picks(&pool).len(), 32);
    assert!(bracket_for(&pool, ana).unwrap().champion().is_none());

    // Ecuador wins group E and the group's old third goes out.
    for id in ["E-M1-2", "E-M2-2", "E-M3-1"] {
        set_score_prediction(&mut pool, ana, id, Score::new(0, 9)).unwrap();
    }
    let qualified = qualified_for(&pool, ana).unwrap();
    assert!(qualified.iter().any(|q| q.code() == "ec" && q.position == 1));

    let remaining = picks(&pool);
    assert!(remaining.len() < 32);
    assert_eq!(remaining.get(&73).map(String::as_str), Some("za"));
    assert!(!remaining.contains_key(&104));
    let bracket = world_cup_prode::build_bracket(&qualified);
    assert_eq!(clean_stale_predictions(&remaining, &bracket), remaining);
}

#[test]
fn views_show_finalized_official_results() {
    let (mut pool, ids) = pool_with(&["Ana"]);
    let ana = ids[0];
    set_score_prediction(&mut pool, ana, "A-M1-1", Score::new(0, 1)).unwrap();
    record_group_result(&mut pool, "A-M1-1", Score::new(4, 0), true).unwrap();

    let standings = standings_for(&pool, ana).unwrap();
    let top = &standings[&'A'][0];
    assert_eq!((top.team.code.as_str(), top.goals_for, top.points), ("mx", 4, 3));

    record_playoff_result(&mut pool, 79, "mx", true).unwrap();
    let bracket = bracket_for(&pool, ana).unwrap();
    assert_eq!(bracket.match_by_id(79).unwrap().winner.as_deref(), Some("mx"));
    assert_eq!(
        bracket.match_by_id(92).unwrap().team1.as_ref().map(|t| t.code()),
        Some("mx")
    );
}

#[test]
fn leaderboard_orders_by_points_then_exact_scores_then_name() {
    let mut users: Vec<User> = ["Caro", "Beto", "Ana", "Dani"].into_iter().map(User::new).collect();
    let set = |u: &mut User, exact: u32, outcomes: u32| {
        u.points = PointsBreakdown {
            exact_scores: exact,
            correct_outcomes: outcomes,
            correct_winners: 0,
            total: exact * 3 + outcomes,
        };
    };
    set(&mut users[0], 0, 3); // Caro: 3
    set(&mut users[1], 1, 0); // Beto: 3, one exact
    set(&mut users[2], 1, 0); // Ana: 3, one exact
    set(&mut users[3], 2, 0); // Dani: 6

    let board = build_leaderboard(&users, &Default::default());
    let names: Vec<&str> = board.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(names, vec!["Dani", "Ana", "Beto", "Caro"]);
    assert_eq!(board.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert!(board.iter().all(|e| e.trend.is_none()));
}

#[test]
fn leaderboard_trend_follows_the_last_snapshot() {
    let (mut pool, ids) = pool_with(&["Ana", "Beto", "Caro"]);
    let (ana, beto, caro) = (ids[0], ids[1], ids[2]);
    for (id, score) in [(ana, (2, 1)), (beto, (2, 1)), (caro, (1, 0))] {
        set_score_prediction(&mut pool, id, "A-M1-1", Score::new(score.0, score.1)).unwrap();
    }
    for (id, score) in [(ana, (1, 0)), (beto, (2, 0)), (caro, (0, 0))] {
        set_score_prediction(&mut pool, id, "A-M1-2", Score::new(score.0, score.1)).unwrap();
    }
    record_group_result(&mut pool, "A-M1-1", Score::new(2, 1), true).unwrap();
    snapshot_ranks(&mut pool);

    let before: Vec<UserId> = leaderboard(&pool).iter().map(|e| e.user_id).collect();
    assert_eq!(before, vec![ana, beto, caro]);

    record_group_result(&mut pool, "A-M1-2", Score::new(0, 0), true).unwrap();
    let board = leaderboard(&pool);
    let order: Vec<(UserId, Option<Trend>)> = board.iter().map(|e| (e.user_id, e.trend)).collect();
    assert_eq!(
        order,
        vec![
            (caro, Some(Trend::Up)),
            (ana, Some(Trend::Down)),
            (beto, Some(Trend::Down)),
        ]
    );
    assert_eq!(board[0].points.total, 4);

    snapshot_ranks(&mut pool);
    assert!(leaderboard(&pool).iter().all(|e| e.trend == Some(Trend::Same)));
}

#[test]
fn implausible_scores_are_rejected() {
    let (mut pool, ids) = pool_with(&["Ana"]);
    let ana = ids[0];
    assert_eq!(
        set_score_prediction(&mut pool, ana, "A-M1-1", Score::new(u32::MAX, 0)),
        Err(PoolError::InvalidScore(Score::new(u32::MAX, 0)))
    );
    assert_eq!(
        record_group_result(&mut pool, "A-M1-1", Score::new(0, 100), true),
        Err(PoolError::InvalidScore(Score::new(0, 100)))
    );
    assert!(pool.get_user(ana).unwrap().predictions.scores.is_empty());
    assert!(pool.results.group.is_empty());

    set_score_prediction(&mut pool, ana, "A-M1-1", Score::new(MAX_GOALS, 0)).unwrap();
    record_group_result(&mut pool, "A-M1-1", Score::new(MAX_GOALS, 0), true).unwrap();
    assert_eq!(total(&pool, ana), 3);
}

#[test]
fn official_group_results_purge_picks_they_invalidate() {
    let (mut pool, ids) = pool_with(&["Ana"]);
    let ana = ids[0];
    pool.get_user_mut(ana).unwrap().predictions.scores = ordered_predictions(&pool.catalog);
    for round in Round::ORDER {
        let bracket = bracket_for(&pool, ana).unwrap();
        for m in bracket.round(round) {
            if let Some(t) = &m.team1 {
                set_winner_prediction(&mut pool, ana, m.id, t.code()).unwrap();
            }
        }
    }
    let picks = |pool: &PredictionPool| pool.get_user(ana).unwrap().predictions.winners.clone();
    assert_eq!(picks(&pool).len(), 32);

    // Provisional results are not shown to users and change nothing.
    record_group_result(&mut pool, "E-M1-2", Score::new(0, 9), false).unwrap();
    assert_eq!(picks(&pool).len(), 32);

    // Ecuador really wins group E: Germany drops to second and leaves match 74.
    for id in ["E-M1-2", "E-M2-2", "E-M3-1"] {
        record_group_result(&mut pool, id, Score::new(0, 9), true).unwrap();
    }
    let remaining = picks(&pool);
    assert!(!remaining.contains_key(&74));
    assert!(!remaining.contains_key(&104));
    assert_eq!(remaining.get(&73).map(String::as_str), Some("za"));
    let bracket = world_cup_prode::build_bracket(&qualified_for(&pool, ana).unwrap());
    assert_eq!(clean_stale_predictions(&remaining, &bracket), remaining);

    // After taking a result back, every stored pick still resolves.
    reset_group_result(&mut pool, "E-M3-1").unwrap();
    let bracket = world_cup_prode::build_bracket(&qualified_for(&pool, ana).unwrap());
    assert_eq!(clean_stale_predictions(&picks(&pool), &bracket), picks(&pool));
}
