//! Round: one full set of matchups played together.

use crate::models::contestant::ContestantId;
use crate::models::matchup::{Matchup, MatchupId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a round.
pub type RoundId = Uuid;

/// A round of play. Membership is fixed at creation; only outcomes change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub matchups: Vec<Matchup>,
}

impl Round {
    pub fn new(matchups: Vec<Matchup>) -> Self {
        Self {
            id: Uuid::new_v4(),
            matchups,
        }
    }

    /// The matchup `id` plays in this round, if any.
    pub fn matchup_of(&self, id: ContestantId) -> Option<&Matchup> {
        self.matchups.iter().find(|m| m.contains(id))
    }

    /// True if `{a, b}` already met in this round.
    pub fn contains_pair(&self, a: ContestantId, b: ContestantId) -> bool {
        self.matchups.iter().any(|m| m.contains_same_pair(a, b))
    }

    /// Every matchup has a winner.
    pub fn is_decided(&self) -> bool {
        self.matchups.iter().all(Matchup::is_decided)
    }

    /// Toggle the winner of one matchup. Unknown matchup or contestant ids are ignored.
    pub fn record_outcome(&mut self, matchup_id: MatchupId, winner: ContestantId) {
        if let Some(m) = self.matchups.iter_mut().find(|m| m.id == matchup_id) {
            m.toggle_outcome(winner);
        }
    }

    /// Auto-win every matchup against the placeholder.
    pub fn resolve_byes(&mut self, placeholder: ContestantId) {
        for m in &mut self.matchups {
            m.resolve_bye(placeholder);
        }
    }
}

/// Value-style variant of [`Round::record_outcome`]: returns the updated round.
pub fn record_outcome(mut round: Round, matchup_id: MatchupId, winner: ContestantId) -> Round {
    round.record_outcome(matchup_id, winner);
    round
}
