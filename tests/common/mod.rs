//! Prediction sets shared by the integration tests.
#![allow(dead_code)]

use rand::Rng;
use world_cup_prode::{generate_group_matches, Score, ScorePredictions, TeamCatalog, GROUPS};

/// Every group finishes in draw order (9/6/3/0 points): the lower-drawn team always wins.
/// The margin grows by one per third of the groups (A, D, G, J by the base margin; B, E, H, K
/// by one more; C, F, I, L by two more), so the best thirds rank A, D, G, J, B, E, H, K.
pub fn ordered_predictions(catalog: &TeamCatalog) -> ScorePredictions {
    let mut preds = ScorePredictions::new();
    for (gi, &g) in GROUPS.iter().enumerate() {
        let teams = catalog.teams_in_group(g);
        let slot = |code: &str| teams.iter().position(|t| t.code == code).unwrap() as u32;
        for m in generate_group_matches(catalog, g) {
            let margin = slot(&m.away_team) - slot(&m.home_team) + (gi % 3) as u32;
            preds.insert(m.id, Score::new(margin, 0));
        }
    }
    preds
}

/// A random score for every group match.
pub fn random_predictions<R: Rng>(rng: &mut R, catalog: &TeamCatalog) -> ScorePredictions {
    GROUPS
        .iter()
        .flat_map(|&g| generate_group_matches(catalog, g))
        .map(|m| (m.id, Score::new(rng.gen_range(0..=4), rng.gen_range(0..=4))))
        .collect()
}
