//! Integration tests for a whole tournament session: Swiss and round-robin modes.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use swiss_draw_web::{Contestant, PairingMode, Tournament, TournamentError};

fn tournament_with_contestants(n: usize, mode: PairingMode) -> Tournament {
    let mut t = Tournament::new("test", mode);
    for i in 0..n {
        t.add_contestant(&format!("P{i}")).unwrap();
    }
    t
}

/// Left side wins every undecided matchup of the latest round.
fn decide_latest(t: &mut Tournament) {
    let round = t.rounds.last().unwrap().clone();
    for m in round.matchups.iter().filter(|m| !m.is_decided()) {
        t.set_winner(round.id, m.id, m.left).unwrap();
    }
}

#[test]
fn next_round_waits_for_results() {
    let mut t = tournament_with_contestants(4, PairingMode::Swiss);
    let mut rng = StdRng::seed_from_u64(1);
    t.next_round_with_rng(&mut rng).unwrap().unwrap();
    assert_eq!(
        t.next_round_with_rng(&mut rng).map(|r| r.is_some()),
        Err(TournamentError::IncompleteRound)
    );
    decide_latest(&mut t);
    assert!(t.next_round_with_rng(&mut rng).unwrap().is_some());
}

#[test]
fn swiss_odd_field_plays_until_exhausted() {
    let mut t = tournament_with_contestants(5, PairingMode::Swiss);
    let mut rng = StdRng::seed_from_u64(11);
    let bye = t.placeholder.id;

    while t.next_round_with_rng(&mut rng).unwrap().is_some() {
        let round = t.rounds.last().unwrap();
        assert_eq!(round.matchups.len(), 3);
        let bye_matchup = round.matchup_of(bye).unwrap();
        assert!(bye_matchup.is_decided());
        assert_ne!(bye_matchup.winner(), Some(bye));
        decide_latest(&mut t);
        assert!(t.rounds.len() <= 5);
    }

    let mut seen = HashSet::new();
    for m in t.rounds.iter().flat_map(|r| &r.matchups) {
        let key = if m.left < m.right { (m.left, m.right) } else { (m.right, m.left) };
        assert!(seen.insert(key));
    }

    let rows = t.standings_with_rng(&mut rng);
    assert_eq!(rows.len(), 5);
    assert!(rows.windows(2).all(|w| w[0].wins >= w[1].wins));
}

#[test]
fn round_robin_mode_plays_every_pair_once() {
    let mut t = tournament_with_contestants(4, PairingMode::RoundRobin);
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..3 {
        assert!(t.next_round_with_rng(&mut rng).unwrap().is_some());
        decide_latest(&mut t);
    }
    assert!(t.next_round_with_rng(&mut rng).unwrap().is_none());
    assert!(t.schedule.is_empty());

    let pairs: HashSet<_> = t
        .rounds
        .iter()
        .flat_map(|r| &r.matchups)
        .map(|m| if m.left < m.right { (m.left, m.right) } else { (m.right, m.left) })
        .collect();
    assert_eq!(pairs.len(), 6);
}

#[test]
fn round_robin_odd_field_resolves_byes() {
    let mut t = tournament_with_contestants(3, PairingMode::RoundRobin);
    let mut rng = StdRng::seed_from_u64(8);
    let bye = t.placeholder.id;

    let mut rounds = 0;
    while t.next_round_with_rng(&mut rng).unwrap().is_some() {
        let round = t.rounds.last().unwrap();
        let m = round.matchup_of(bye).unwrap();
        assert_eq!(m.winner(), m.opponent_of(bye));
        decide_latest(&mut t);
        rounds += 1;
    }
    assert_eq!(rounds, 3);
}

#[test]
fn set_winner_toggles_and_reports_unknown_round() {
    let mut t = tournament_with_contestants(2, PairingMode::Swiss);
    t.next_round().unwrap();
    let round_id = t.rounds[0].id;
    let m = t.rounds[0].matchups[0].clone();

    t.set_winner(round_id, m.id, m.right).unwrap();
    assert_eq!(t.rounds[0].matchups[0].winner(), Some(m.right));
    t.set_winner(round_id, m.id, m.right).unwrap();
    assert_eq!(t.rounds[0].matchups[0].winner(), None);

    // Unknown matchup: silently ignored.
    t.set_winner(round_id, uuid::Uuid::new_v4(), m.left).unwrap();
    assert_eq!(t.rounds[0].matchups[0], m);

    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        t.set_winner(missing, m.id, m.left),
        Err(TournamentError::RoundNotFound(missing))
    );
}

#[test]
fn bye_win_cannot_be_changed() {
    let mut t = tournament_with_contestants(3, PairingMode::Swiss);
    let mut rng = StdRng::seed_from_u64(4);
    let bye = t.placeholder.id;
    t.next_round_with_rng(&mut rng).unwrap().unwrap();

    let round_id = t.rounds[0].id;
    let m = t.rounds[0].matchup_of(bye).unwrap().clone();
    let real = m.opponent_of(bye).unwrap();

    // Re-declaring the real contestant must not reset the bye to undecided.
    t.set_winner(round_id, m.id, real).unwrap();
    assert_eq!(t.pairing_of(real, round_id).unwrap().winner(), Some(real));

    // The placeholder can never be recorded as the winner.
    t.set_winner(round_id, m.id, bye).unwrap();
    assert_eq!(t.pairing_of(real, round_id).unwrap().winner(), Some(real));

    let row = t
        .standings_with_rng(&mut rng)
        .into_iter()
        .find(|r| r.contestant_id == real)
        .unwrap();
    assert_eq!(row.wins, 1);

    decide_latest(&mut t);
    assert!(t.next_round_with_rng(&mut rng).unwrap().is_some());
}

#[test]
fn wins_entering_each_round() {
    let mut t = tournament_with_contestants(4, PairingMode::Swiss);
    let mut rng = StdRng::seed_from_u64(21);
    t.next_round_with_rng(&mut rng).unwrap();
    decide_latest(&mut t);
    t.next_round_with_rng(&mut rng).unwrap();

    let first = t.rounds[0].clone();
    let second_id = t.rounds[1].id;
    for m in &first.matchups {
        assert_eq!(t.wins_before(m.left, first.id), 0);
        assert_eq!(t.wins_before(m.left, second_id), 1);
        assert_eq!(t.wins_before(m.right, second_id), 0);
        assert_eq!(t.pairing_of(m.left, first.id), Some(m));
    }
}

#[test]
fn restart_keeps_contestants() {
    let mut t = tournament_with_contestants(6, PairingMode::RoundRobin);
    t.next_round().unwrap();
    t.restart();
    assert!(t.rounds.is_empty());
    assert!(t.schedule.is_empty());
    assert_eq!(t.contestants.len(), 6);
    assert!(t.next_round().unwrap().is_some());
}

#[test]
fn single_contestant_cannot_be_paired() {
    let mut t = Tournament::with_contestants(vec![Contestant::new("solo")], PairingMode::Swiss);
    assert_eq!(
        t.next_round().map(|r| r.is_some()),
        Err(TournamentError::NotEnoughContestants { found: 1 })
    );
}
