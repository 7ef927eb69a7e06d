//! Swiss pairing: build the next round from standings and history without rematches.

use crate::logic::standings::win_count;
use crate::models::{Contestant, ContestantId, Matchup, Round, TournamentError};
use rand::Rng;
use std::collections::HashSet;

/// Unordered contestant pair, smaller id first.
type PairKey = (ContestantId, ContestantId);

fn pair_key(a: ContestantId, b: ContestantId) -> PairKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Every unordered pair that already met somewhere in `history`.
pub fn played_pairs(history: &[Round]) -> HashSet<PairKey> {
    history
        .iter()
        .flat_map(|r| &r.matchups)
        .map(|m| pair_key(m.left, m.right))
        .collect()
}

/// True if no matchup in `round` repeats a pair from `history`.
pub fn is_unique_round(round: &Round, history: &[Round]) -> bool {
    let played = played_pairs(history);
    round
        .matchups
        .iter()
        .all(|m| !played.contains(&pair_key(m.left, m.right)))
}

/// Generate the next Swiss round, or `Ok(None)` when every pairing is exhausted.
///
/// 1. Sort contestants by wins (descending), equal wins in random order.
/// 2. Append the placeholder if the field is odd.
/// 3. Backtracking search: pair the first unpaired contestant with the first later
///    contestant it has not met yet, recurse, and try the next candidate on failure.
/// 4. Matchups against the placeholder are recorded as wins for the real contestant.
///
/// The first feasible pairing in list order is returned, not the best-balanced one.
/// Callers must not request a round while the previous one has undecided matchups.
pub fn next_round<R: Rng + ?Sized>(
    contestants: &[Contestant],
    history: &[Round],
    placeholder: &Contestant,
    rng: &mut R,
) -> Result<Option<Round>, TournamentError> {
    if contestants.len() < 2 {
        return Err(TournamentError::NotEnoughContestants {
            found: contestants.len(),
        });
    }

    let mut with_tiebreak: Vec<(ContestantId, u32, u32)> = contestants
        .iter()
        .map(|c| (c.id, win_count(c.id, history), rng.gen::<u32>()))
        .collect();
    with_tiebreak.sort_by_key(|&(_, wins, t)| (std::cmp::Reverse(wins), t));
    let mut order: Vec<ContestantId> = with_tiebreak.into_iter().map(|(id, _, _)| id).collect();

    let bye_injected = order.len() % 2 != 0;
    if bye_injected {
        order.push(placeholder.id);
    }

    let played = played_pairs(history);
    let mut used = vec![false; order.len()];
    let mut pairs = Vec::with_capacity(order.len() / 2);

    if !search(&order, &played, &mut used, &mut pairs) {
        log::info!(
            "No pairing left for {} contestants after {} rounds",
            contestants.len(),
            history.len()
        );
        return Ok(None);
    }

    let mut round = Round::new(
        pairs
            .into_iter()
            .map(|(l, r)| Matchup::new(order[l], order[r]))
            .collect(),
    );
    if bye_injected {
        round.resolve_byes(placeholder.id);
    }
    log::debug!(
        "Paired round {} with {} matchups",
        history.len() + 1,
        round.matchups.len()
    );
    Ok(Some(round))
}

/// Depth-first search over `order`; `used` marks indices already paired.
fn search(
    order: &[ContestantId],
    played: &HashSet<PairKey>,
    used: &mut [bool],
    pairs: &mut Vec<(usize, usize)>,
) -> bool {
    let Some(p) = used.iter().position(|u| !u) else {
        return true;
    };
    used[p] = true;

    for c in p + 1..order.len() {
        if used[c] || played.contains(&pair_key(order[p], order[c])) {
            continue;
        }
        used[c] = true;
        pairs.push((p, c));
        if search(order, played, used, pairs) {
            return true;
        }
        pairs.pop();
        used[c] = false;
    }

    used[p] = false;
    false
}
