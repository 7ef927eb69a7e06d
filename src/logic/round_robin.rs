//! Round-robin schedule: every contestant meets every other exactly once (circle method).

use crate::models::{Contestant, Matchup, Round, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build the full schedule for `n` positions as index pairs, one `Vec` per round.
///
/// Position 0 is fixed; the others sit on a circle. Each round pairs the two halves
/// of the arrangement outward from the middle, then moves the last position to just
/// after position 0. Yields `n - 1` rounds of `n / 2` pairs.
///
/// ```text
/// 0 1 2      0 5 1      0 4 5
/// 5 4 3  ->  4 3 2  ->  3 2 1  -> ...
/// ```
pub fn generate_schedule(n: usize) -> Result<Vec<Vec<(usize, usize)>>, TournamentError> {
    if n < 2 || n % 2 != 0 {
        return Err(TournamentError::InvalidFieldSize(n));
    }

    let half = n / 2;
    let mut positions: Vec<usize> = (0..n).collect();
    let mut schedule = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        let round: Vec<(usize, usize)> = (0..half)
            .map(|i| (positions[half + i], positions[half - i - 1]))
            .collect();
        schedule.push(round);

        if n > 2 {
            positions[1..].rotate_right(1);
        }
    }

    Ok(schedule)
}

/// Map a round-robin schedule onto contestants.
///
/// Contestants are shuffled first so the fixed rotation does not favour input order.
/// An odd field gets the placeholder at position 0. Bye matchups are left undecided;
/// they are resolved when the round is taken into play.
pub fn schedule_rounds<R: Rng + ?Sized>(
    contestants: &[Contestant],
    placeholder: &Contestant,
    rng: &mut R,
) -> Result<Vec<Round>, TournamentError> {
    if contestants.len() < 2 {
        return Err(TournamentError::NotEnoughContestants {
            found: contestants.len(),
        });
    }

    let mut field: Vec<_> = contestants.iter().map(|c| c.id).collect();
    field.shuffle(rng);
    if field.len() % 2 != 0 {
        field.insert(0, placeholder.id);
    }

    let rounds: Vec<Round> = generate_schedule(field.len())?
        .into_iter()
        .map(|pairs| {
            Round::new(
                pairs
                    .into_iter()
                    .map(|(l, r)| Matchup::new(field[l], field[r]))
                    .collect(),
            )
        })
        .collect();

    log::debug!(
        "Built round-robin schedule: {} rounds for {} positions",
        rounds.len(),
        field.len()
    );
    Ok(rounds)
}
