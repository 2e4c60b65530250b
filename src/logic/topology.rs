//! Official knockout fixture plan: who meets whom in the round of 32 and where every winner goes.
//!
//! Kept as plain tables so the builder only reads them. Match numbers follow the
//! official schedule (73 to 104).

use crate::models::{GroupLetter, PlayoffMatchId, Round, Slot};
use crate::models::Slot::{One, Two};
use self::SlotSource::{BestThird, RunnerUp, Winner};

/// Where a team in a round-of-32 slot comes from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotSource {
    /// Group winner of the given group.
    Winner(GroupLetter),
    /// Group runner-up of the given group.
    RunnerUp(GroupLetter),
    /// One of the best third-placed teams, drawn from these groups.
    BestThird(&'static [GroupLetter]),
}

/// A downstream slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Destination {
    pub match_id: PlayoffMatchId,
    pub slot: Slot,
}

const fn to(match_id: PlayoffMatchId, slot: Slot) -> Destination {
    Destination { match_id, slot }
}

/// A round-of-32 fixture.
#[derive(Clone, Copy, Debug)]
pub struct RoundOf32Fixture {
    pub match_id: PlayoffMatchId,
    pub team1: SlotSource,
    pub team2: SlotSource,
    pub winner_to: Destination,
}

/// Routing for a match after the round of 32.
#[derive(Clone, Copy, Debug)]
pub struct KnockoutRoute {
    pub match_id: PlayoffMatchId,
    pub round: Round,
    pub winner_to: Option<Destination>,
    /// Semifinals only.
    pub loser_to: Option<Destination>,
}

pub const ROUND_OF_32: [RoundOf32Fixture; 16] = [
    RoundOf32Fixture { match_id: 73, team1: RunnerUp('A'), team2: RunnerUp('B'), winner_to: to(90, One) },
    RoundOf32Fixture { match_id: 74, team1: Winner('E'), team2: BestThird(&['A', 'B', 'C', 'D', 'F']), winner_to: to(89, One) },
    RoundOf32Fixture { match_id: 75, team1: Winner('F'), team2: RunnerUp('C'), winner_to: to(90, Two) },
    RoundOf32Fixture { match_id: 76, team1: Winner('C'), team2: RunnerUp('F'), winner_to: to(91, One) },
    RoundOf32Fixture { match_id: 77, team1: Winner('I'), team2: BestThird(&['C', 'D', 'F', 'G', 'H']), winner_to: to(89, Two) },
    RoundOf32Fixture { match_id: 78, team1: RunnerUp('E'), team2: RunnerUp('I'), winner_to: to(91, Two) },
    RoundOf32Fixture { match_id: 79, team1: Winner('A'), team2: BestThird(&['C', 'E', 'F', 'H', 'I']), winner_to: to(92, One) },
    RoundOf32Fixture { match_id: 80, team1: Winner('L'), team2: BestThird(&['E', 'H', 'I', 'J', 'K']), winner_to: to(92, Two) },
    RoundOf32Fixture { match_id: 81, team1: Winner('D'), team2: BestThird(&['B', 'E', 'F', 'I', 'J']), winner_to: to(94, One) },
    RoundOf32Fixture { match_id: 82, team1: Winner('G'), team2: BestThird(&['A', 'E', 'H', 'I', 'J']), winner_to: to(94, Two) },
    RoundOf32Fixture { match_id: 83, team1: RunnerUp('K'), team2: RunnerUp('L'), winner_to: to(93, One) },
    RoundOf32Fixture { match_id: 84, team1: Winner('H'), team2: RunnerUp('J'), winner_to: to(93, Two) },
    RoundOf32Fixture { match_id: 85, team1: Winner('B'), team2: BestThird(&['E', 'F', 'G', 'I', 'J']), winner_to: to(96, One) },
    RoundOf32Fixture { match_id: 86, team1: Winner('J'), team2: RunnerUp('H'), winner_to: to(95, One) },
    RoundOf32Fixture { match_id: 87, team1: Winner('K'), team2: BestThird(&['D', 'E', 'I', 'J', 'L']), winner_to: to(96, Two) },
    RoundOf32Fixture { match_id: 88, team1: RunnerUp('D'), team2: RunnerUp('G'), winner_to: to(95, Two) },
];

pub const KNOCKOUT_ROUTES: [KnockoutRoute; 16] = [
    // Round of 16
    KnockoutRoute { match_id: 89, round: Round::RoundOf16, winner_to: Some(to(97, One)), loser_to: None },
    KnockoutRoute { match_id: 90, round: Round::RoundOf16, winner_to: Some(to(97, Two)), loser_to: None },
    KnockoutRoute { match_id: 91, round: Round::RoundOf16, winner_to: Some(to(99, One)), loser_to: None },
    KnockoutRoute { match_id: 92, round: Round::RoundOf16, winner_to: Some(to(99, Two)), loser_to: None },
    KnockoutRoute { match_id: 93, round: Round::RoundOf16, winner_to: Some(to(98, One)), loser_to: None },
    KnockoutRoute { match_id: 94, round: Round::RoundOf16, winner_to: Some(to(98, Two)), loser_to: None },
    KnockoutRoute { match_id: 95, round: Round::RoundOf16, winner_to: Some(to(100, One)), loser_to: None },
    KnockoutRoute { match_id: 96, round: Round::RoundOf16, winner_to: Some(to(100, Two)), loser_to: None },
    // Quarterfinals
    KnockoutRoute { match_id: 97, round: Round::QuarterFinal, winner_to: Some(to(101, One)), loser_to: None },
    KnockoutRoute { match_id: 98, round: Round::QuarterFinal, winner_to: Some(to(101, Two)), loser_to: None },
    KnockoutRoute { match_id: 99, round: Round::QuarterFinal, winner_to: Some(to(102, One)), loser_to: None },
    KnockoutRoute { match_id: 100, round: Round::QuarterFinal, winner_to: Some(to(102, Two)), loser_to: None },
    // Semifinals: losers play for third place
    KnockoutRoute { match_id: 101, round: Round::SemiFinal, winner_to: Some(to(104, One)), loser_to: Some(to(103, One)) },
    KnockoutRoute { match_id: 102, round: Round::SemiFinal, winner_to: Some(to(104, Two)), loser_to: Some(to(103, Two)) },
    KnockoutRoute { match_id: 103, round: Round::ThirdPlace, winner_to: None, loser_to: None },
    KnockoutRoute { match_id: 104, round: Round::Final, winner_to: None, loser_to: None },
];

/// First and last official match number of the knockout phase.
pub const FIRST_PLAYOFF_MATCH: PlayoffMatchId = 73;
pub const LAST_PLAYOFF_MATCH: PlayoffMatchId = 104;

/// True for 73..=104.
pub fn is_playoff_match(id: PlayoffMatchId) -> bool {
    (FIRST_PLAYOFF_MATCH..=LAST_PLAYOFF_MATCH).contains(&id)
}

/// Round-of-32 fixtures that face a best third: (match id, pool, group whose winner is the opponent).
pub fn third_place_slots() -> Vec<(PlayoffMatchId, &'static [GroupLetter], Option<GroupLetter>)> {
    ROUND_OF_32
        .iter()
        .filter_map(|f| {
            let (pool, other) = match (f.team1, f.team2) {
                (BestThird(pool), other) | (other, BestThird(pool)) => (pool, other),
                _ => return None,
            };
            let opponent_group = match other {
                Winner(g) => Some(g),
                _ => None,
            };
            Some((f.match_id, pool, opponent_group))
        })
        .collect()
}
