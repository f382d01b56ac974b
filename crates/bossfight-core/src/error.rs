//! Error types for the battle engine.
//!
//! [`ActionError`] covers every recoverable rejection of an action during
//! play. A rejected action never has side effects: no resource is spent, no
//! item is consumed and no hp changes. [`SetupError`] and [`ConfigError`] are
//! raised before a battle starts.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ActionError {
    /// The acting entity is dead.
    #[error("{name} cannot act while dead")]
    NotAlive {
        /// Name of the acting entity.
        name: String,
    },

    /// The target of the action is already dead.
    #[error("{name} is already dead")]
    AlreadyDead {
        /// Name of the target.
        name: String,
    },

    /// The user cannot pay the ability's resource cost.
    #[error("{name} does not have enough resource ({available}/{needed})")]
    InsufficientResource {
        /// Name of the user.
        name: String,
        /// Cost of the ability.
        needed: u32,
        /// Resource the user currently holds.
        available: u32,
    },

    /// Ability index out of range for the user's ability table.
    #[error("no such ability: {index}")]
    NoSuchAbility {
        /// Requested index.
        index: usize,
    },

    /// Item index out of range for the user's inventory.
    #[error("no such item: {index}")]
    NoSuchItem {
        /// Requested index.
        index: usize,
    },

    /// Ally index out of range for the party.
    #[error("no such ally: {index}")]
    NoSuchAlly {
        /// Requested index.
        index: usize,
    },
}

/// Structural problems when assembling a battle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// A battle needs at least one party member.
    #[error("a battle needs at least one party member")]
    EmptyParty,

    /// More party members than a battle supports.
    #[error("party has {size} members, at most {max} are allowed")]
    PartyTooLarge {
        /// Requested party size.
        size: usize,
        /// Largest supported party.
        max: usize,
    },

    /// Only playable archetypes may join the party.
    #[error("{name} cannot join the party as a boss")]
    BossInParty {
        /// Name of the offending member.
        name: String,
    },

    /// Level outside the supported range.
    #[error("level {level} is out of range, expected 1 to {max}")]
    InvalidLevel {
        /// Requested level.
        level: u32,
        /// Highest supported level.
        max: u32,
    },
}

/// Failure to load or validate a [`BattleConfig`](crate::config::BattleConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON for a battle config.
    #[error("failed to parse battle config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config parsed but describes an impossible battle.
    #[error("invalid battle config: {0}")]
    Invalid(#[from] SetupError),
}
