//! JSON battle configuration.
//!
//! A [`BattleConfig`] describes a whole encounter: party composition, boss
//! difficulty and an optional seed. Every field has a default, so `{}` is a
//! valid config for a one-warrior party against an easy boss.
//!
//! ```json
//! {
//!   "party": [
//!     { "archetype": "warrior", "name": "Brakka" },
//!     { "archetype": "healer", "name": "Sela" }
//!   ],
//!   "difficulty": "hard",
//!   "seed": 42
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::MAX_PARTY_SIZE;
use crate::entity::{Archetype, MAX_LEVEL};
use crate::error::{ConfigError, SetupError};

/// Boss strength preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Level 3 boss.
    #[default]
    Easy,
    /// Level 5 boss.
    Normal,
    /// Level 7 boss.
    Hard,
}

impl Difficulty {
    /// Boss level for this difficulty.
    #[must_use]
    pub const fn boss_level(self) -> u32 {
        match self {
            Self::Easy => 3,
            Self::Normal => 5,
            Self::Hard => 7,
        }
    }

    /// Maps a menu choice (`"1"`, `"2"`, `"3"`) to a difficulty.
    ///
    /// Anything unrecognised falls back to [`Difficulty::Easy`].
    #[must_use]
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim() {
            "2" => Self::Normal,
            "3" => Self::Hard,
            _ => Self::Easy,
        }
    }
}

/// One party slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberConfig {
    /// Class of the member.
    pub archetype: Archetype,
    /// Display name.
    pub name: String,
}

/// A complete encounter description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Party members in turn-order tiebreak order (1 to 4)
    #[serde(default = "default_party")]
    pub party: Vec<MemberConfig>,
    /// Boss strength (default: easy)
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Boss display name (default: "Evil Boss")
    #[serde(default = "default_boss_name")]
    pub boss_name: String,
    /// Level every party member starts at (default: 1)
    #[serde(default = "default_party_level")]
    pub party_level: u32,
    /// Random seed for reproducible battles
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_party() -> Vec<MemberConfig> {
    vec![MemberConfig {
        archetype: Archetype::Warrior,
        name: "Hero 1".to_string(),
    }]
}

fn default_boss_name() -> String {
    "Evil Boss".to_string()
}

fn default_party_level() -> u32 {
    1
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            party: default_party(),
            difficulty: Difficulty::default(),
            boss_name: default_boss_name(),
            party_level: default_party_level(),
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Parses and validates a config from JSON text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, [`ConfigError::Invalid`]
    /// for a config describing an impossible battle.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config from a JSON file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`BattleConfig::from_json`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Checks the party is buildable.
    ///
    /// # Errors
    ///
    /// [`SetupError`] for an empty or oversized party, a boss in the party,
    /// or a party level outside `1..=MAX_LEVEL`.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(1..=MAX_LEVEL).contains(&self.party_level) {
            return Err(SetupError::InvalidLevel {
                level: self.party_level,
                max: MAX_LEVEL,
            });
        }
        if self.party.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if self.party.len() > MAX_PARTY_SIZE {
            return Err(SetupError::PartyTooLarge {
                size: self.party.len(),
                max: MAX_PARTY_SIZE,
            });
        }
        if let Some(member) = self
            .party
            .iter()
            .find(|member| member.archetype == Archetype::Boss)
        {
            return Err(SetupError::BossInParty {
                name: member.name.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = BattleConfig::from_json("{}").unwrap();
        assert_eq!(config, BattleConfig::default());
        assert_eq!(config.party[0].archetype, Archetype::Warrior);
        assert_eq!(config.boss_name, "Evil Boss");
        assert_eq!(config.difficulty.boss_level(), 3);
    }

    #[test]
    fn full_config_parses() {
        let json = r#"{
            "party": [
                { "archetype": "mage", "name": "Mira" },
                { "archetype": "healer", "name": "Sela" }
            ],
            "difficulty": "hard",
            "boss_name": "Lich",
            "seed": 42
        }"#;
        let config = BattleConfig::from_json(json).unwrap();
        assert_eq!(config.party.len(), 2);
        assert_eq!(config.party[1].archetype, Archetype::Healer);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn empty_party_is_invalid() {
        let err = BattleConfig::from_json(r#"{ "party": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(SetupError::EmptyParty)));
    }

    #[test]
    fn boss_cannot_join_party() {
        let err = BattleConfig::from_json(r#"{ "party": [{ "archetype": "boss", "name": "X" }] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(SetupError::BossInParty { .. })));
    }

    #[test]
    fn oversized_party_is_invalid() {
        let mut config = BattleConfig::default();
        config.party = vec![config.party[0].clone(); 5];
        assert_eq!(
            config.validate(),
            Err(SetupError::PartyTooLarge { size: 5, max: 4 })
        );
    }

    #[test]
    fn out_of_range_party_level_is_invalid() {
        let err = BattleConfig::from_json(r#"{ "party_level": 4294967295 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(SetupError::InvalidLevel {
                level: u32::MAX,
                max: MAX_LEVEL
            })
        ));

        let config = BattleConfig {
            party_level: 0,
            ..BattleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SetupError::InvalidLevel { level: 0, .. })
        ));
        assert!(crate::battle::Battle::from_config(&config).is_err());
    }

    #[test]
    fn max_party_level_builds_a_battle() {
        let config = BattleConfig {
            party_level: MAX_LEVEL,
            seed: Some(1),
            ..BattleConfig::default()
        };
        let battle = crate::battle::Battle::from_config(&config).unwrap();
        assert_eq!(battle.party()[0].level(), MAX_LEVEL);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = BattleConfig::from_json("{ party: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_archetype_is_a_parse_error() {
        let err = BattleConfig::from_json(r#"{ "party": [{ "archetype": "rogue", "name": "X" }] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = BattleConfig::load_from_file(Path::new("/nonexistent/battle.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn difficulty_menu_choices() {
        assert_eq!(Difficulty::from_choice("1"), Difficulty::Easy);
        assert_eq!(Difficulty::from_choice(" 2\n"), Difficulty::Normal);
        assert_eq!(Difficulty::from_choice("3"), Difficulty::Hard);
        assert_eq!(Difficulty::from_choice("x"), Difficulty::Easy);
        assert_eq!(Difficulty::Hard.boss_level(), 7);
    }
}
