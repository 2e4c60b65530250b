//! Group-stage fixture generation (4-team round robin, 3 matchdays x 2 matches).

use crate::models::{GroupLetter, GroupMatch, TeamCatalog, GROUPS, TEAMS_PER_GROUP};

/// Slot pairings per matchday, over the group's draw order.
const ROUND_ROBIN: [(u8, [(usize, usize); 2]); 3] = [
    (1, [(0, 1), (2, 3)]),
    (2, [(0, 2), (1, 3)]),
    (3, [(0, 3), (1, 2)]),
];

/// The 6 matches of one group, ids `"{group}-M{matchday}-{n}"`. Empty if the group is not 4 teams.
pub fn generate_group_matches(catalog: &TeamCatalog, group: GroupLetter) -> Vec<GroupMatch> {
    let teams = catalog.teams_in_group(group);
    if teams.len() != TEAMS_PER_GROUP {
        return Vec::new();
    }
    ROUND_ROBIN
        .iter()
        .flat_map(|(matchday, pairs)| {
            let teams = &teams;
            pairs.iter().enumerate().map(move |(n, &(home, away))| GroupMatch {
                id: format!("{}-M{}-{}", group, matchday, n + 1),
                home_team: teams[home].code.clone(),
                away_team: teams[away].code.clone(),
                group,
                matchday: *matchday,
            })
        })
        .collect()
}

/// All 72 group matches, group by group.
pub fn all_group_matches(catalog: &TeamCatalog) -> Vec<GroupMatch> {
    GROUPS
        .iter()
        .flat_map(|&g| generate_group_matches(catalog, g))
        .collect()
}

/// Resolve a group match id back to its fixture.
pub fn find_group_match(catalog: &TeamCatalog, match_id: &str) -> Option<GroupMatch> {
    let group = match_id.chars().next()?;
    generate_group_matches(catalog, group)
        .into_iter()
        .find(|m| m.id == match_id)
}
