//! Data structures for the tournament: contestants, matchups, rounds, session state.

mod contestant;
mod matchup;
mod round;
mod tournament;

pub use contestant::{Contestant, ContestantId, PLACEHOLDER_NAME};
pub use matchup::{MatchResult, Matchup, MatchupId, Outcome, Side};
pub use round::{record_outcome, Round, RoundId};
pub use tournament::{PairingMode, Tournament, TournamentError, TournamentId};
