// Constrained-random gift matching
//
// This module holds the pure matching logic, decoupled from configuration
// loading and mail delivery:
// - one attempt drafts an assignee per player per round by rejection
//   sampling, then post-checks couple sets and gift balance (core)
// - the driver retries whole attempts up to a ceiling and reports an
//   infeasible configuration instead of looping forever

mod core;
pub mod models;

// Re-export commonly used types
pub use models::{Assignments, Exclusions, PairingError, RejectReason};

use rand::Rng;

/// Tunables for the draft driver
#[derive(Debug, Clone, Copy)]
pub struct DraftSettings {
    /// Draft rounds, i.e. gifts given (and received) per player
    pub rounds: usize,
    /// Whole attempts before the configuration is declared infeasible
    pub max_attempts: usize,
    /// Samples per player within a round before the attempt is rejected
    pub resample_limit: usize,
}

impl Default for DraftSettings {
    fn default() -> Self {
        DraftSettings {
            rounds: 1,
            max_attempts: 1000,
            resample_limit: 50,
        }
    }
}

/// Draft driver: retries attempts until one passes every check
pub struct Matcher<'a> {
    players: &'a [String],
    exclusions: &'a Exclusions,
    settings: DraftSettings,
}

impl<'a> Matcher<'a> {
    pub fn new(players: &'a [String], exclusions: &'a Exclusions, settings: DraftSettings) -> Self {
        Matcher {
            players,
            exclusions,
            settings,
        }
    }

    /// Produce a valid assignment map, or fail once the attempt ceiling is
    /// reached.
    ///
    /// Rejected attempts are expected; each is logged and retried from
    /// scratch with no partial reuse.
    pub fn solve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Assignments, MatchError> {
        for attempt in 1..=self.settings.max_attempts {
            match core::run_attempt(
                rng,
                self.players,
                self.exclusions,
                self.settings.rounds,
                self.settings.resample_limit,
            ) {
                Ok(assignments) => {
                    log::debug!("valid assignment found on attempt {}", attempt);
                    return Ok(assignments);
                }
                Err(reason) => {
                    log::debug!("attempt {} rejected: {}", attempt, reason);
                }
            }
        }

        Err(MatchError::Infeasible {
            attempts: self.settings.max_attempts,
        })
    }
}

/// Terminal matching failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Every attempt up to the ceiling was rejected
    Infeasible { attempts: usize },
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::Infeasible { attempts } => write!(
                f,
                "no valid assignment found after {} attempts; the roster, couples and \
                 gift count probably admit no solution",
                attempts
            ),
        }
    }
}

impl std::error::Error for MatchError {}
