//! Swiss-draw tournament organizer: library with models and pairing/ranking logic.

pub mod logic;
pub mod models;

pub use logic::{
    generate_schedule, next_round, pick_best_remaining_round, ranked_standings, schedule_rounds,
    ScheduledPick, StandingRow,
};
pub use models::{
    record_outcome, Contestant, ContestantId, MatchResult, Matchup, MatchupId, Outcome,
    PairingMode, Round, RoundId, Side, Tournament, TournamentError, TournamentId,
};
