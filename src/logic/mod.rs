//! Pairing and ranking engines: Swiss draw, round-robin schedule, standings.

pub mod closed_schedule;
pub mod round_robin;
pub mod standings;
pub mod swiss;

pub use closed_schedule::{pick_best_remaining_round, ScheduledPick};
pub use round_robin::{generate_schedule, schedule_rounds};
pub use standings::{
    defeated_opponent_strength, opponent_strength, ranked_standings, win_count,
    win_count_before, StandingRow,
};
pub use swiss::{is_unique_round, next_round, played_pairs};
