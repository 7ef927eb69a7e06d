//! Closed-schedule variant: play a pre-built round-robin in the order that best
//! matches contestants with similar win counts.

use crate::logic::standings::win_count;
use crate::models::{Contestant, ContestantId, Matchup, Round};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

/// The round to play next and the rounds still left after it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPick {
    pub chosen: Round,
    pub remainder: Vec<Round>,
}

/// Pick the remaining round whose win-count gaps are smallest, or None once the
/// schedule is consumed.
///
/// Each round is scored by its matchups' gaps sorted largest first and compared
/// lexicographically; the earliest round wins a tie. Matchups involving someone
/// outside `contestants` (the placeholder) have no gap and are left out of the score.
/// The chosen round's matchups are reordered so the strongest tables come first,
/// except for the final round, which is returned untouched.
pub fn pick_best_remaining_round(
    contestants: &[Contestant],
    past: &[Round],
    mut remaining: Vec<Round>,
) -> Option<ScheduledPick> {
    if remaining.len() <= 1 {
        let chosen = remaining.pop()?;
        log::debug!("Picked last scheduled round {}", chosen.id);
        return Some(ScheduledPick {
            chosen,
            remainder: remaining,
        });
    }

    let wins: HashMap<ContestantId, u32> = contestants
        .iter()
        .map(|c| (c.id, win_count(c.id, past)))
        .collect();

    let best = remaining
        .iter()
        .enumerate()
        .min_by_key(|(_, round)| gap_profile(round, &wins))
        .map(|(i, _)| i)?;

    let mut chosen = remaining.remove(best);
    chosen
        .matchups
        .sort_by_key(|m| Reverse(table_strength(m, &wins)));
    log::debug!(
        "Picked scheduled round {} ({} left)",
        chosen.id,
        remaining.len()
    );

    Some(ScheduledPick {
        chosen,
        remainder: remaining,
    })
}

/// Win-count gaps of a round's matchups, largest first.
fn gap_profile(round: &Round, wins: &HashMap<ContestantId, u32>) -> Vec<u32> {
    let mut gaps: Vec<u32> = round
        .matchups
        .iter()
        .filter_map(|m| Some(wins.get(&m.left)?.abs_diff(*wins.get(&m.right)?)))
        .collect();
    gaps.sort_unstable_by(|a, b| b.cmp(a));
    gaps
}

/// (higher win count, lower win count) of a matchup; unknown sides count as zero.
fn table_strength(m: &Matchup, wins: &HashMap<ContestantId, u32>) -> (u32, u32) {
    let l = wins.get(&m.left).copied().unwrap_or(0);
    let r = wins.get(&m.right).copied().unwrap_or(0);
    (l.max(r), l.min(r))
}
