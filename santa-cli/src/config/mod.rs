//! Externalized game configuration
//!
//! Everything the draw needs lives in one TOML file: the roster with couples
//! and addresses, the game tunables, and the SMTP settings. The file is
//! validated up front; any inconsistency aborts before matching starts.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::matching::{Exclusions, PairingError};

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    pub smtp: SmtpConfig,
    pub roster: RosterConfig,
}

/// Draw tunables
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Assignees drafted per player, i.e. draft rounds
    pub gifts_per_player: usize,
    /// Whole-draft retries before the configuration is declared infeasible
    pub max_attempts: usize,
    /// Per-player resamples within a round before an attempt is rejected
    pub draft_retry_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            gifts_per_player: 1,
            max_attempts: 1000,
            draft_retry_limit: 50,
        }
    }
}

/// Outbound mail settings
///
/// The password is deliberately not part of the file; it comes from the
/// `SANTA_SMTP_PASSWORD` environment variable or an interactive prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Authenticated sender address
    pub sender: String,
    /// Administrator address: receives the legend and all rehearsal mail
    pub admin: String,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

/// Players, couples, and where to reach them
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Ordered player list; order drives draft sequencing
    pub players: Vec<String>,
    /// Couples that must never draw each other, each listed once
    #[serde(default)]
    pub couples: Vec<(String, String)>,
    pub emails: HashMap<String, String>,
}

impl RosterConfig {
    /// A player's delivery address
    pub fn email_of(&self, player: &str) -> Option<&str> {
        self.emails.get(player).map(String::as_str)
    }
}

impl Config {
    /// Read, parse, and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build the symmetric exclusion relation declared by the couples
    pub fn exclusions(&self) -> Result<Exclusions, ConfigError> {
        Exclusions::from_pairs(&self.roster.couples).map_err(ConfigError::from)
    }

    /// Check every cross-reference before any matching begins
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roster = &self.roster;

        if roster.players.len() < 2 {
            return Err(ConfigError::NotEnoughPlayers(roster.players.len()));
        }

        let mut seen = HashSet::new();
        for player in &roster.players {
            if !seen.insert(player.as_str()) {
                return Err(ConfigError::DuplicatePlayer(player.clone()));
            }
        }

        // The address book must be a bijection with the player list
        for player in &roster.players {
            if !roster.emails.contains_key(player) {
                return Err(ConfigError::MissingEmail(player.clone()));
            }
        }
        for name in roster.emails.keys() {
            if !seen.contains(name.as_str()) {
                return Err(ConfigError::OrphanedEmail(name.clone()));
            }
        }

        for (first, second) in &roster.couples {
            for name in [first, second] {
                if !seen.contains(name.as_str()) {
                    return Err(ConfigError::UnknownPartner(name.clone()));
                }
            }
        }
        self.exclusions()?;

        if self.game.gifts_per_player == 0 {
            return Err(ConfigError::ZeroGifts);
        }
        // A paired giver can never draw themselves or their partner, an
        // unpaired one only themselves
        let available = if roster.couples.is_empty() {
            roster.players.len() - 1
        } else {
            roster.players.len().saturating_sub(2)
        };
        if self.game.gifts_per_player > available {
            return Err(ConfigError::GiftsExceedCandidates {
                gifts: self.game.gifts_per_player,
                available,
            });
        }

        Ok(())
    }
}

/// Default location: `<user config dir>/santa-cli/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("santa-cli").join("config.toml"))
}

/// Fatal configuration error, raised before any matching begins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NotEnoughPlayers(usize),
    DuplicatePlayer(String),
    MissingEmail(String),
    OrphanedEmail(String),
    UnknownPartner(String),
    SelfPaired(String),
    AlreadyPaired(String),
    ZeroGifts,
    GiftsExceedCandidates { gifts: usize, available: usize },
}

impl From<PairingError> for ConfigError {
    fn from(err: PairingError) -> Self {
        match err {
            PairingError::SelfPaired(name) => ConfigError::SelfPaired(name),
            PairingError::AlreadyPaired(name) => ConfigError::AlreadyPaired(name),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotEnoughPlayers(count) => {
                write!(f, "roster lists {} player(s); at least 2 are required", count)
            }
            ConfigError::DuplicatePlayer(name) => {
                write!(f, "player '{}' is listed more than once", name)
            }
            ConfigError::MissingEmail(name) => {
                write!(f, "no email listed for player '{}'", name)
            }
            ConfigError::OrphanedEmail(name) => {
                write!(f, "email listed for '{}', who is not in the player list", name)
            }
            ConfigError::UnknownPartner(name) => {
                write!(f, "couples reference '{}', who is not in the player list", name)
            }
            ConfigError::SelfPaired(name) => {
                write!(f, "player '{}' is listed as their own partner", name)
            }
            ConfigError::AlreadyPaired(name) => {
                write!(f, "player '{}' appears in more than one couple", name)
            }
            ConfigError::ZeroGifts => {
                write!(f, "gifts_per_player must be at least 1")
            }
            ConfigError::GiftsExceedCandidates { gifts, available } => {
                write!(
                    f,
                    "gifts_per_player is {} but each player has at most {} legal assignee(s)",
                    gifts, available
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
