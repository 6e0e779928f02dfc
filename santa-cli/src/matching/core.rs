//! Single-attempt draft logic
//!
//! One attempt runs the configured number of draft rounds, then applies two
//! global post-checks over the finished map. Any violation rejects the whole
//! attempt; partial results never survive into the next attempt.

use std::collections::HashSet;

use rand::Rng;

use super::models::{Assignments, Exclusions, RejectReason};

/// Run one complete draft attempt.
///
/// Returns the finished assignment map, or the reason the attempt was
/// rejected so the driver can retry from scratch.
pub(crate) fn run_attempt<R: Rng + ?Sized>(
    rng: &mut R,
    players: &[String],
    exclusions: &Exclusions,
    rounds: usize,
    resample_limit: usize,
) -> Result<Assignments, RejectReason> {
    let mut assignments = Assignments::new(players);

    // 1. Draft: every player draws one assignee per round, in list order
    for round in 0..rounds {
        log::debug!("round {}", round);
        let mut taken: HashSet<&str> = HashSet::new();

        for giver in players {
            let assignee = draw_candidate(
                rng,
                players,
                exclusions,
                &assignments,
                &taken,
                giver,
                resample_limit,
            )
            .ok_or_else(|| RejectReason::DraftStalled {
                player: giver.clone(),
                round,
            })?;

            log::debug!("  {} gets {}", giver, assignee);
            taken.insert(assignee);
            assignments.assign(giver, assignee.to_string());
        }
    }

    // 2. Couples must not end up with identical assignee sets
    check_couple_sets(&assignments, exclusions)?;

    // 3. Every player must receive exactly `rounds` gifts
    check_balance(&assignments, players, rounds)?;

    Ok(assignments)
}

/// Sample candidates uniformly until one passes every per-draw constraint
///
/// Gives up after `resample_limit` samples; the caller rejects the attempt.
fn draw_candidate<'p, R: Rng + ?Sized>(
    rng: &mut R,
    players: &'p [String],
    exclusions: &Exclusions,
    assignments: &Assignments,
    taken: &HashSet<&str>,
    giver: &str,
    resample_limit: usize,
) -> Option<&'p str> {
    for _ in 0..resample_limit {
        let candidate = players[rng.random_range(0..players.len())].as_str();

        // You can't draw yourself or your partner
        if candidate == giver || exclusions.excluded(giver, candidate) {
            continue;
        }
        // You can't draw someone already claimed this round
        if taken.contains(candidate) {
            continue;
        }
        // You can't draw the same person twice across rounds
        if assignments.has_assignee(giver, candidate) {
            continue;
        }

        return Some(candidate);
    }

    None
}

/// Reject the attempt if any couple drew identical assignee sets, compared
/// order-independently.
fn check_couple_sets(
    assignments: &Assignments,
    exclusions: &Exclusions,
) -> Result<(), RejectReason> {
    for (first, second) in exclusions.pairs() {
        if assignments.sorted_assignees(first) == assignments.sorted_assignees(second) {
            return Err(RejectReason::MatchingCoupleSets {
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    }
    Ok(())
}

/// Reject the attempt unless every player receives exactly `rounds` gifts.
fn check_balance(
    assignments: &Assignments,
    players: &[String],
    rounds: usize,
) -> Result<(), RejectReason> {
    let counts = assignments.gift_counts();
    for player in players {
        let received = counts.get(player.as_str()).copied().unwrap_or(0);
        if received != rounds {
            return Err(RejectReason::Unbalanced {
                player: player.clone(),
                received,
                expected: rounds,
            });
        }
    }
    Ok(())
}
