//! Matchup (one contestant against another), its Outcome, and per-side helpers.

use crate::models::contestant::ContestantId;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a matchup.
pub type MatchupId = Uuid;

/// Which side of a matchup a contestant occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Recorded result of a matchup.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Undecided,
    LeftWins,
    RightWins,
}

/// Result of a matchup from one contestant's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Lose,
}

/// A single pairing: left contestant against right contestant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: MatchupId,
    pub left: ContestantId,
    pub right: ContestantId,
    pub outcome: Outcome,
}

impl Matchup {
    /// New undecided matchup. Callers must pass two different contestants; the
    /// pairing engines only ever do. Use [`Matchup::try_new`] for unchecked input.
    pub fn new(left: ContestantId, right: ContestantId) -> Self {
        debug_assert_ne!(left, right, "a contestant cannot be paired with itself");
        Self {
            id: Uuid::new_v4(),
            left,
            right,
            outcome: Outcome::Undecided,
        }
    }

    /// Like [`Matchup::new`], but rejects a contestant paired with itself.
    pub fn try_new(left: ContestantId, right: ContestantId) -> Result<Self, TournamentError> {
        if left == right {
            return Err(TournamentError::SelfMatchup(left));
        }
        Ok(Self::new(left, right))
    }

    /// Id of the winning side, or None while undecided.
    pub fn winner(&self) -> Option<ContestantId> {
        match self.outcome {
            Outcome::LeftWins => Some(self.left),
            Outcome::RightWins => Some(self.right),
            Outcome::Undecided => None,
        }
    }

    pub fn side_of(&self, id: ContestantId) -> Option<Side> {
        if self.left == id {
            Some(Side::Left)
        } else if self.right == id {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// The other side's id, or None if `id` is not in this matchup.
    pub fn opponent_of(&self, id: ContestantId) -> Option<ContestantId> {
        match self.side_of(id)? {
            Side::Left => Some(self.right),
            Side::Right => Some(self.left),
        }
    }

    pub fn contains(&self, id: ContestantId) -> bool {
        self.side_of(id).is_some()
    }

    pub fn is_decided(&self) -> bool {
        self.outcome != Outcome::Undecided
    }

    /// Declare `winner` as the winner. Declaring the current winner again
    /// resets the matchup to undecided. Ids not in the matchup are ignored.
    pub fn toggle_outcome(&mut self, winner: ContestantId) {
        let Some(side) = self.side_of(winner) else {
            return;
        };
        if self.winner() == Some(winner) {
            self.outcome = Outcome::Undecided;
        } else {
            self.outcome = match side {
                Side::Left => Outcome::LeftWins,
                Side::Right => Outcome::RightWins,
            };
        }
    }

    /// Win or Lose for `id`; None when undecided or `id` is not playing.
    pub fn result_for(&self, id: ContestantId) -> Option<MatchResult> {
        let side = self.side_of(id)?;
        match (side, self.outcome) {
            (_, Outcome::Undecided) => None,
            (Side::Left, Outcome::LeftWins) | (Side::Right, Outcome::RightWins) => {
                Some(MatchResult::Win)
            }
            _ => Some(MatchResult::Lose),
        }
    }

    /// True if `{a, b}` is this matchup's pair, in either order.
    pub fn contains_same_pair(&self, a: ContestantId, b: ContestantId) -> bool {
        (self.left == a && self.right == b) || (self.left == b && self.right == a)
    }

    /// If the placeholder is one side, record a win for the other side.
    pub fn resolve_bye(&mut self, placeholder: ContestantId) {
        if let Some(real) = self.opponent_of(placeholder) {
            self.outcome = Outcome::Undecided;
            self.toggle_outcome(real);
        }
    }
}
