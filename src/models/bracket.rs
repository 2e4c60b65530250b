//! Knockout bracket: rounds, slots, playoff matches and winner picks.

use crate::models::standing::QualifiedTeam;
use crate::models::team::TeamCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Official match number, 73 (first round-of-32 match) to 104 (final).
pub type PlayoffMatchId = u8;

/// Winner picks by playoff match id.
pub type WinnerPredictions = HashMap<PlayoffMatchId, TeamCode>;

/// Knockout round, in play order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "R32")]
    RoundOf32,
    #[serde(rename = "R16")]
    RoundOf16,
    #[serde(rename = "QF")]
    QuarterFinal,
    #[serde(rename = "SF")]
    SemiFinal,
    #[serde(rename = "3P")]
    ThirdPlace,
    #[serde(rename = "F")]
    Final,
}

impl Round {
    /// Strict propagation order.
    pub const ORDER: [Round; 6] = [
        Round::RoundOf32,
        Round::RoundOf16,
        Round::QuarterFinal,
        Round::SemiFinal,
        Round::ThirdPlace,
        Round::Final,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Round::RoundOf32 => "Dieciseisavos de Final",
            Round::RoundOf16 => "Octavos de Final",
            Round::QuarterFinal => "Cuartos de Final",
            Round::SemiFinal => "Semifinales",
            Round::ThirdPlace => "Tercer Puesto",
            Round::Final => "Final",
        }
    }
}

/// Which side of a match a team occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    One,
    Two,
}

/// A bracket node. Topology fields never change; slots and results do.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffMatch {
    pub id: PlayoffMatchId,
    pub round: Round,
    /// 1-based position within the round.
    pub position: u8,
    pub team1: Option<QualifiedTeam>,
    pub team2: Option<QualifiedTeam>,
    /// Code of the winner; always one of the two occupied slots.
    pub winner: Option<TeamCode>,
    /// Code of the loser (semifinals only).
    pub loser: Option<TeamCode>,
    pub next_match_id: Option<PlayoffMatchId>,
    pub next_slot: Option<Slot>,
    pub loser_next_match_id: Option<PlayoffMatchId>,
    pub loser_next_slot: Option<Slot>,
}

impl PlayoffMatch {
    /// Empty node with no routing.
    pub fn new(id: PlayoffMatchId, round: Round, position: u8) -> Self {
        Self {
            id,
            round,
            position,
            team1: None,
            team2: None,
            winner: None,
            loser: None,
            next_match_id: None,
            next_slot: None,
            loser_next_match_id: None,
            loser_next_slot: None,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&QualifiedTeam> {
        match slot {
            Slot::One => self.team1.as_ref(),
            Slot::Two => self.team2.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: Slot, team: Option<QualifiedTeam>) {
        match slot {
            Slot::One => self.team1 = team,
            Slot::Two => self.team2 = team,
        }
    }

    /// The occupied slots split into (winner, loser) for `code`, if both are set and `code` is one of them.
    pub fn split_by_winner(&self, code: &str) -> Option<(&QualifiedTeam, &QualifiedTeam)> {
        let (t1, t2) = (self.team1.as_ref()?, self.team2.as_ref()?);
        if t1.code() == code {
            Some((t1, t2))
        } else if t2.code() == code {
            Some((t2, t1))
        } else {
            None
        }
    }

    pub fn winner_team(&self) -> Option<&QualifiedTeam> {
        let code = self.winner.as_deref()?;
        self.split_by_winner(code).map(|(w, _)| w)
    }

    pub fn loser_team(&self) -> Option<&QualifiedTeam> {
        let code = self.winner.as_deref()?;
        self.split_by_winner(code).map(|(_, l)| l)
    }
}

/// The 104-match tournament's knockout graph (32 nodes).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffBracket {
    /// 16 matches, 73 to 88.
    pub r32: Vec<PlayoffMatch>,
    /// 8 matches, 89 to 96.
    pub r16: Vec<PlayoffMatch>,
    /// 4 matches, 97 to 100.
    pub qf: Vec<PlayoffMatch>,
    /// 2 matches, 101 and 102.
    pub sf: Vec<PlayoffMatch>,
    /// Match 103, fed by semifinal losers.
    pub third_place: PlayoffMatch,
    /// Match 104.
    pub final_match: PlayoffMatch,
}

impl PlayoffBracket {
    /// Matches of one round, in position order.
    pub fn round(&self, round: Round) -> &[PlayoffMatch] {
        match round {
            Round::RoundOf32 => &self.r32,
            Round::RoundOf16 => &self.r16,
            Round::QuarterFinal => &self.qf,
            Round::SemiFinal => &self.sf,
            Round::ThirdPlace => std::slice::from_ref(&self.third_place),
            Round::Final => std::slice::from_ref(&self.final_match),
        }
    }

    pub fn round_mut(&mut self, round: Round) -> &mut [PlayoffMatch] {
        match round {
            Round::RoundOf32 => &mut self.r32,
            Round::RoundOf16 => &mut self.r16,
            Round::QuarterFinal => &mut self.qf,
            Round::SemiFinal => &mut self.sf,
            Round::ThirdPlace => std::slice::from_mut(&mut self.third_place),
            Round::Final => std::slice::from_mut(&mut self.final_match),
        }
    }

    /// All matches in round order.
    pub fn all_matches(&self) -> impl Iterator<Item = &PlayoffMatch> {
        Round::ORDER.into_iter().flat_map(move |r| self.round(r).iter())
    }

    pub fn all_matches_mut(&mut self) -> impl Iterator<Item = &mut PlayoffMatch> {
        self.r32
            .iter_mut()
            .chain(self.r16.iter_mut())
            .chain(self.qf.iter_mut())
            .chain(self.sf.iter_mut())
            .chain(std::iter::once(&mut self.third_place))
            .chain(std::iter::once(&mut self.final_match))
    }

    pub fn match_by_id(&self, id: PlayoffMatchId) -> Option<&PlayoffMatch> {
        self.all_matches().find(|m| m.id == id)
    }

    pub fn match_by_id_mut(&mut self, id: PlayoffMatchId) -> Option<&mut PlayoffMatch> {
        self.all_matches_mut().find(|m| m.id == id)
    }

    pub fn champion(&self) -> Option<&QualifiedTeam> {
        self.final_match.winner_team()
    }

    pub fn runner_up(&self) -> Option<&QualifiedTeam> {
        self.final_match.loser_team()
    }

    /// Winner of the third-place match.
    pub fn third_place_finisher(&self) -> Option<&QualifiedTeam> {
        self.third_place.winner_team()
    }
}
