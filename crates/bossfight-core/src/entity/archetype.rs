//! Class archetypes and their per-level stat tables.
//!
//! An [`Archetype`] decides everything about a freshly created entity: base
//! stats scaled by level, the shared ability table, and the starting
//! inventory.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::{Ability, Item};

use super::Stats;

/// Highest level an entity can be created at.
pub const MAX_LEVEL: u32 = 100;

static WARRIOR_ABILITIES: [Ability; 2] = [
    Ability::strike("Power Strike", 10, 2.0),
    Ability::strike("Whirlwind", 15, 1.5),
];

static MAGE_ABILITIES: [Ability; 2] = [
    Ability::strike("Fireball", 12, 2.5),
    Ability::poison("Poison", 15, 3, 10),
];

static HEALER_ABILITIES: [Ability; 3] = [
    Ability::heal("Heal", 8, 1.5),
    Ability::heal("Greater Heal", 20, 2.0),
    Ability::shield("Barrier", 12, 3, 40),
];

/// Class of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Sturdy melee fighter.
    Warrior,
    /// Fragile caster with heavy damage and poison.
    Mage,
    /// Support caster with heals and shields.
    Healer,
    /// The scripted opponent.
    Boss,
}

impl Archetype {
    /// Archetypes a player may pick for the party, in menu order.
    pub const PLAYABLE: [Archetype; 3] = [Self::Warrior, Self::Mage, Self::Healer];

    /// Maps a menu choice (`"1"`, `"2"`, `"3"`) to a playable archetype.
    ///
    /// Anything unrecognised falls back to [`Archetype::Warrior`].
    #[must_use]
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim() {
            "2" => Self::Mage,
            "3" => Self::Healer,
            _ => Self::Warrior,
        }
    }

    /// Base stats at the given level.
    ///
    /// Levels above [`MAX_LEVEL`] get the stats of [`MAX_LEVEL`].
    #[must_use]
    pub fn stats(self, level: u32) -> Stats {
        let level = level.min(MAX_LEVEL);
        match self {
            Self::Warrior => Stats {
                max_hp: 120 + level * 10,
                max_resource: 30 + level * 5,
                power: 15 + level * 2,
                agility: 8 + level,
                focus: 5 + level,
            },
            Self::Mage => Stats {
                max_hp: 80 + level * 5,
                max_resource: 80 + level * 10,
                power: 5 + level,
                agility: 6 + level,
                focus: 18 + level * 2,
            },
            Self::Healer => Stats {
                max_hp: 90 + level * 6,
                max_resource: 70 + level * 8,
                power: 6 + level,
                agility: 7 + level,
                focus: 16 + level * 2,
            },
            Self::Boss => Stats {
                max_hp: 300 + level * 50,
                max_resource: 100 + level * 20,
                power: 20 + level * 3,
                agility: 12 + level * 2,
                focus: 15 + level * 2,
            },
        }
    }

    /// Shared ability table.
    #[must_use]
    pub fn abilities(self) -> &'static [Ability] {
        match self {
            Self::Warrior => &WARRIOR_ABILITIES,
            Self::Mage => &MAGE_ABILITIES,
            Self::Healer => &HEALER_ABILITIES,
            Self::Boss => &[],
        }
    }

    /// Inventory an entity of this archetype starts with.
    #[must_use]
    pub fn starting_items(self) -> &'static [Item] {
        match self {
            Self::Warrior => &[Item::HealthPotion, Item::HealthPotion],
            Self::Mage => &[Item::ManaPotion, Item::HealthPotion],
            Self::Healer => &[Item::HealthPotion, Item::ManaPotion],
            Self::Boss => &[],
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warrior => write!(f, "Warrior"),
            Self::Mage => write!(f, "Mage"),
            Self::Healer => write!(f, "Healer"),
            Self::Boss => write!(f, "Boss"),
        }
    }
}
