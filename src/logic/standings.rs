//! Standings: win counts, opponent-strength tie-breaks, and the ranked table.
//!
//! Everything is recomputed from the round history on each call; nothing is cached.

use crate::models::{Contestant, ContestantId, Round, RoundId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

/// One row of the standings table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub contestant_id: ContestantId,
    pub wins: u32,
    /// Sum of the win counts of every opponent faced.
    pub opponent_strength: u32,
    /// Sum of the win counts of every opponent beaten.
    pub defeated_opponent_strength: u32,
}

/// Rounds in which `id` is the recorded winner of its matchup.
pub fn win_count(id: ContestantId, history: &[Round]) -> u32 {
    count_wins(id, history.iter())
}

/// Like [`win_count`], but only over rounds strictly before `round_id`.
/// If `round_id` is not in the history, every round is counted.
pub fn win_count_before(id: ContestantId, round_id: RoundId, history: &[Round]) -> u32 {
    count_wins(id, history.iter().take_while(|r| r.id != round_id))
}

fn count_wins<'a>(id: ContestantId, rounds: impl Iterator<Item = &'a Round>) -> u32 {
    rounds
        .filter(|r| r.matchups.iter().any(|m| m.winner() == Some(id)))
        .count() as u32
}

/// Sum over every round `id` played of that round's opponent's total win count.
/// The placeholder contributes nothing.
pub fn opponent_strength(id: ContestantId, history: &[Round], placeholder: ContestantId) -> u32 {
    history
        .iter()
        .filter_map(|r| r.matchup_of(id)?.opponent_of(id))
        .filter(|&opp| opp != placeholder)
        .map(|opp| win_count(opp, history))
        .sum()
}

/// Sum over every round `id` won of that round's opponent's total win count.
/// The placeholder contributes nothing.
pub fn defeated_opponent_strength(
    id: ContestantId,
    history: &[Round],
    placeholder: ContestantId,
) -> u32 {
    history
        .iter()
        .filter_map(|r| {
            let m = r.matchup_of(id)?;
            if m.winner() == Some(id) {
                m.opponent_of(id)
            } else {
                None
            }
        })
        .filter(|&opp| opp != placeholder)
        .map(|opp| win_count(opp, history))
        .sum()
}

/// Rank contestants (placeholder excluded) using the tie-break cascade:
///
/// 1. wins (descending)
/// 2. opponent strength (descending)
/// 3. defeated-opponent strength (descending)
/// 4. head-to-head: wins against the other contestants tied on 1-3 (descending)
/// 5. random
///
/// For a two-way tie step 4 is simply the result of their direct meeting, if any.
/// Step 5 is an accepted non-determinism: rows are shuffled with `rng` before a
/// stable sort, so a seeded rng makes the whole ranking reproducible.
pub fn ranked_standings<R: Rng + ?Sized>(
    contestants: &[Contestant],
    history: &[Round],
    placeholder: ContestantId,
    rng: &mut R,
) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = contestants
        .iter()
        .filter(|c| c.id != placeholder)
        .map(|c| StandingRow {
            contestant_id: c.id,
            wins: win_count(c.id, history),
            opponent_strength: opponent_strength(c.id, history, placeholder),
            defeated_opponent_strength: defeated_opponent_strength(c.id, history, placeholder),
        })
        .collect();

    let tie_groups: HashMap<ContestantId, (u32, u32, u32)> = rows
        .iter()
        .map(|r| (r.contestant_id, score_key(r)))
        .collect();
    let head_to_head: HashMap<ContestantId, u32> = rows
        .iter()
        .map(|r| {
            let key = score_key(r);
            let wins = head_to_head_wins(r.contestant_id, history, |opp| {
                tie_groups.get(&opp) == Some(&key)
            });
            (r.contestant_id, wins)
        })
        .collect();

    rows.shuffle(rng);
    rows.sort_by_key(|r| {
        let (wins, os, dos) = score_key(r);
        let h2h = head_to_head.get(&r.contestant_id).copied().unwrap_or(0);
        (Reverse(wins), Reverse(os), Reverse(dos), Reverse(h2h))
    });
    rows
}

fn score_key(row: &StandingRow) -> (u32, u32, u32) {
    (row.wins, row.opponent_strength, row.defeated_opponent_strength)
}

/// Wins of `id` over opponents selected by `is_tied`.
fn head_to_head_wins(
    id: ContestantId,
    history: &[Round],
    is_tied: impl Fn(ContestantId) -> bool,
) -> u32 {
    history
        .iter()
        .flat_map(|r| &r.matchups)
        .filter(|m| m.winner() == Some(id))
        .filter_map(|m| m.opponent_of(id))
        .filter(|&opp| is_tied(opp))
        .count() as u32
}
