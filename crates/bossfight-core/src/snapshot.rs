//! Read-only views of battle state.
//!
//! Snapshots are what flows outward: the boss policy decides from them,
//! party controllers choose from them, and shells render them. They hold
//! copies, never references into live entities.

use std::fmt;

use serde::Serialize;

use crate::action::{Ability, Item};
use crate::boss::Phase;
use crate::entity::{Archetype, Entity};

/// Frozen state of one combatant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantSnapshot {
    /// Display name.
    pub name: String,
    /// Archetype, if built from one.
    pub archetype: Option<Archetype>,
    /// Level the combatant was created at.
    pub level: u32,
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Current resource points.
    pub resource: u32,
    /// Maximum resource points.
    pub max_resource: u32,
    /// Whether hp is above zero.
    pub alive: bool,
    /// Abilities in menu order.
    pub abilities: &'static [Ability],
    /// Items in inventory order.
    pub items: Vec<Item>,
}

impl CombatantSnapshot {
    /// Captures the current state of an entity.
    #[must_use]
    pub fn of(entity: &Entity) -> Self {
        Self {
            name: entity.name().to_owned(),
            archetype: entity.archetype(),
            level: entity.level(),
            hp: entity.hp(),
            max_hp: entity.max_hp(),
            resource: entity.resource(),
            max_resource: entity.max_resource(),
            alive: entity.is_alive(),
            abilities: entity.abilities(),
            items: entity.inventory().to_vec(),
        }
    }

    /// Hp as a fraction of maximum, `0.0..=1.0`.
    #[must_use]
    pub fn health_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }
}

impl fmt::Display for CombatantSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - HP: {}/{}, MP: {}/{}",
            self.name, self.hp, self.max_hp, self.resource, self.max_resource
        )
    }
}

/// Frozen state of the whole battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleSnapshot {
    /// Rounds started so far.
    pub round: u32,
    /// Party members in party order.
    pub party: Vec<CombatantSnapshot>,
    /// The boss.
    pub boss: CombatantSnapshot,
    /// Phase the boss was in at its last decision.
    pub phase: Phase,
}

const RULE: &str = "========================================";

impl fmt::Display for BattleSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "BATTLE STATUS")?;
        writeln!(f, "Round: {}", self.round)?;
        writeln!(f, "PARTY:")?;
        for (i, member) in self.party.iter().enumerate() {
            writeln!(f, "{}. {member}", i + 1)?;
        }
        writeln!(f, "BOSS: {}", self.boss)?;
        writeln!(f, "Boss {}", self.phase)?;
        write!(f, "{RULE}")
    }
}
