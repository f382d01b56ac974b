//! # Bossfight Core
//!
//! Turn-based party versus boss battle engine.
//!
//! This crate provides the deterministic rules of an encounter between a
//! small party of adventurers and a single scripted boss. It never touches a
//! terminal: callers feed in party decisions and read back structured events.
//!
//! ## Architecture
//!
//! - **Entities**: attribute state, damage, healing and inventories ([`entity`])
//! - **Effects**: timed poison and shield modifiers ([`effect`])
//! - **Actions**: ability tables and consumables ([`action`])
//! - **Boss**: health-driven phases and the boss policy ([`boss`])
//! - **Battle**: initiative, turn resolution and termination ([`battle`])
//!
//! All randomness flows through an injectable [`dice::Dice`], so a seed or a
//! scripted sequence reproduces a battle exactly.
//!
//! ## Usage
//!
//! ```
//! use bossfight_core::{AutoPilot, Battle, BattleConfig, BattleStatus};
//!
//! let config = BattleConfig::from_json(r#"{
//!     "party": [
//!         { "archetype": "warrior", "name": "Brakka" },
//!         { "archetype": "healer", "name": "Sela" }
//!     ],
//!     "seed": 42
//! }"#)?;
//! let mut battle = Battle::from_config(&config)?;
//! let status = battle.run(&mut AutoPilot::default(), 200);
//! assert_ne!(status, BattleStatus::Ongoing);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod battle;
pub mod boss;
pub mod config;
pub mod controller;
pub mod dice;
pub mod effect;
pub mod entity;
pub mod error;
pub mod event;
pub mod snapshot;

pub use battle::{Battle, BattleStatus, CombatantId, PartyAction, RoundReport, TurnReport};
pub use boss::{Boss, Phase};
pub use config::{BattleConfig, Difficulty, MemberConfig};
pub use controller::{AutoPilot, PartyController};
pub use dice::{Dice, RngDice, ScriptedDice};
pub use entity::{Archetype, Entity};
pub use error::{ActionError, ConfigError, SetupError};
pub use event::{Event, Outcome};
pub use snapshot::{BattleSnapshot, CombatantSnapshot};

#[cfg(test)]
mod tests;
