//! Tournament session: contestants, placeholder, round history, and pairing mode.

use crate::logic::{closed_schedule, round_robin, standings, swiss, StandingRow};
use crate::models::contestant::{Contestant, ContestantId};
use crate::models::matchup::{Matchup, MatchupId};
use crate::models::round::{Round, RoundId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than two real contestants to pair.
    NotEnoughContestants { found: usize },
    /// Round-robin field must be even and at least 2.
    InvalidFieldSize(usize),
    /// A matchup of an existing round has no winner yet.
    IncompleteRound,
    /// Contestant names must not be blank.
    EmptyContestantName,
    /// A contestant with this name already exists.
    DuplicateContestantName,
    ContestantNotFound(ContestantId),
    RoundNotFound(RoundId),
    /// Both sides of a matchup are the same contestant.
    SelfMatchup(ContestantId),
    /// Tournament is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughContestants { found } => {
                write!(f, "Need at least 2 contestants to pair (have {})", found)
            }
            TournamentError::InvalidFieldSize(n) => {
                write!(f, "Round-robin needs an even field of at least 2 (got {})", n)
            }
            TournamentError::IncompleteRound => write!(f, "The previous round is not finished"),
            TournamentError::EmptyContestantName => write!(f, "Contestant name is empty"),
            TournamentError::DuplicateContestantName => {
                write!(f, "A contestant with this name already exists")
            }
            TournamentError::ContestantNotFound(_) => write!(f, "Contestant not found"),
            TournamentError::RoundNotFound(_) => write!(f, "Round not found"),
            TournamentError::SelfMatchup(_) => {
                write!(f, "A contestant cannot be paired with itself")
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How the next round is produced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// One round at a time by backtracking search over the standings.
    #[default]
    Swiss,
    /// Fixed round-robin built once, rounds played in best-balanced order.
    RoundRobin,
}

/// Full tournament session. Serializes to the persistence shape of the data model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub contestants: Vec<Contestant>,
    /// Stand-in opponent for odd fields; never ranked.
    pub placeholder: Contestant,
    pub mode: PairingMode,
    /// Played (or in-play) rounds, oldest first.
    pub rounds: Vec<Round>,
    /// Round-robin rounds not yet taken into play. Empty in Swiss mode.
    #[serde(default)]
    pub schedule: Vec<Round>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, mode: PairingMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            contestants: Vec::new(),
            placeholder: Contestant::placeholder(),
            mode,
            rounds: Vec::new(),
            schedule: Vec::new(),
        }
    }

    /// Create a tournament with initial contestants and no rounds.
    pub fn with_contestants(contestants: Vec<Contestant>, mode: PairingMode) -> Self {
        Self {
            contestants,
            ..Self::new("", mode)
        }
    }

    pub fn contestant(&self, id: ContestantId) -> Option<&Contestant> {
        self.contestants.iter().find(|c| c.id == id)
    }

    /// Name of a contestant or of the placeholder.
    pub fn display_name(&self, id: ContestantId) -> Option<&str> {
        if id == self.placeholder.id {
            return Some(self.placeholder.name.as_str());
        }
        self.contestant(id).map(|c| c.name.as_str())
    }

    fn validate_name<'a>(
        &self,
        name: &'a str,
        except: Option<ContestantId>,
    ) -> Result<&'a str, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyContestantName);
        }
        let is_duplicate = self
            .contestants
            .iter()
            .any(|c| Some(c.id) != except && c.name == name);
        if is_duplicate {
            return Err(TournamentError::DuplicateContestantName);
        }
        Ok(name)
    }

    /// Add a contestant. The field changes, so round history is cleared.
    pub fn add_contestant(&mut self, name: &str) -> Result<ContestantId, TournamentError> {
        let name = self.validate_name(name, None)?;
        let contestant = Contestant::new(name);
        let id = contestant.id;
        self.contestants.push(contestant);
        self.restart();
        Ok(id)
    }

    /// Change a contestant's display name. History is kept.
    pub fn rename_contestant(
        &mut self,
        id: ContestantId,
        name: &str,
    ) -> Result<(), TournamentError> {
        let name = self.validate_name(name, Some(id))?.to_string();
        self.contestants
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TournamentError::ContestantNotFound(id))?
            .rename(name);
        Ok(())
    }

    /// Remove a contestant and clear round history that referenced it.
    pub fn remove_contestant(&mut self, id: ContestantId) -> Result<(), TournamentError> {
        let idx = self
            .contestants
            .iter()
            .position(|c| c.id == id)
            .ok_or(TournamentError::ContestantNotFound(id))?;
        self.contestants.remove(idx);
        self.restart();
        Ok(())
    }

    /// Switch pairing mode (only before the first round).
    pub fn set_mode(&mut self, mode: PairingMode) -> Result<(), TournamentError> {
        if !self.rounds.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        self.mode = mode;
        self.schedule.clear();
        Ok(())
    }

    /// Drop all rounds (and any pending schedule); contestants are kept.
    pub fn restart(&mut self) {
        self.rounds.clear();
        self.schedule.clear();
    }

    /// True once every matchup of every round has a winner.
    pub fn all_rounds_decided(&self) -> bool {
        self.rounds.iter().all(Round::is_decided)
    }

    /// Produce and append the next round using the thread-local rng.
    pub fn next_round(&mut self) -> Result<Option<&Round>, TournamentError> {
        self.next_round_with_rng(&mut rand::thread_rng())
    }

    /// Produce and append the next round. `Ok(None)` means the tournament is complete.
    pub fn next_round_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<&Round>, TournamentError> {
        if !self.all_rounds_decided() {
            return Err(TournamentError::IncompleteRound);
        }

        let round = match self.mode {
            PairingMode::Swiss => {
                swiss::next_round(&self.contestants, &self.rounds, &self.placeholder, rng)?
            }
            PairingMode::RoundRobin => {
                if self.rounds.is_empty() && self.schedule.is_empty() {
                    self.schedule =
                        round_robin::schedule_rounds(&self.contestants, &self.placeholder, rng)?;
                }
                let remaining = std::mem::take(&mut self.schedule);
                closed_schedule::pick_best_remaining_round(&self.contestants, &self.rounds, remaining)
                    .map(|pick| {
                        self.schedule = pick.remainder;
                        let mut round = pick.chosen;
                        round.resolve_byes(self.placeholder.id);
                        round
                    })
            }
        };

        match round {
            Some(round) => {
                log::info!(
                    "Tournament {}: round {} created with {} matchups",
                    self.id,
                    self.rounds.len() + 1,
                    round.matchups.len()
                );
                self.rounds.push(round);
                Ok(self.rounds.last())
            }
            None => {
                log::info!("Tournament {}: all rounds played", self.id);
                Ok(None)
            }
        }
    }

    /// Toggle the winner of one matchup in a round. Unknown matchup or contestant ids are
    /// ignored, and so are bye matchups: their automatic win is fixed.
    pub fn set_winner(
        &mut self,
        round_id: RoundId,
        matchup_id: MatchupId,
        winner: ContestantId,
    ) -> Result<(), TournamentError> {
        let placeholder = self.placeholder.id;
        let round = self
            .rounds
            .iter_mut()
            .find(|r| r.id == round_id)
            .ok_or(TournamentError::RoundNotFound(round_id))?;
        let is_bye = round
            .matchups
            .iter()
            .any(|m| m.id == matchup_id && m.contains(placeholder));
        if is_bye {
            log::debug!("Ignoring winner change on bye matchup {}", matchup_id);
            return Ok(());
        }
        round.record_outcome(matchup_id, winner);
        Ok(())
    }

    /// Matchup `contestant_id` plays in round `round_id`.
    pub fn pairing_of(&self, contestant_id: ContestantId, round_id: RoundId) -> Option<&Matchup> {
        self.rounds
            .iter()
            .find(|r| r.id == round_id)?
            .matchup_of(contestant_id)
    }

    /// Wins entering round `round_id`.
    pub fn wins_before(&self, contestant_id: ContestantId, round_id: RoundId) -> u32 {
        standings::win_count_before(contestant_id, round_id, &self.rounds)
    }

    /// Ranked standings using the thread-local rng for unresolved ties.
    pub fn standings(&self) -> Vec<StandingRow> {
        self.standings_with_rng(&mut rand::thread_rng())
    }

    pub fn standings_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<StandingRow> {
        standings::ranked_standings(&self.contestants, &self.rounds, self.placeholder.id, rng)
    }
}
