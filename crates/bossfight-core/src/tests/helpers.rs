//! Test helper functions for setting up battles and entities.
//!
//! This module provides factory functions and setup utilities that make
//! writing tests more ergonomic and consistent.

use crate::battle::{Battle, PartyAction};
use crate::boss::Boss;
use crate::config::{BattleConfig, Difficulty, MemberConfig};
use crate::dice::ScriptedDice;
use crate::entity::{Archetype, Entity, Stats};
use crate::snapshot::BattleSnapshot;

// =============================================================================
// Party and Boss Setup
// =============================================================================

/// A level 1 warrior, mage and healer, in that order.
pub fn standard_party() -> Vec<Entity> {
    vec![
        Entity::new("Brakka", Archetype::Warrior, 1),
        Entity::new("Mira", Archetype::Mage, 1),
        Entity::new("Sela", Archetype::Healer, 1),
    ]
}

/// An entity with hand-picked stats and full resource.
pub fn custom_entity(name: &str, max_hp: u32, power: u32, agility: u32) -> Entity {
    Entity::from_stats(
        name,
        1,
        Stats {
            max_hp,
            max_resource: 50,
            power,
            agility,
            focus: 10,
        },
    )
}

/// Standard party against a level 3 boss, with scripted dice.
pub fn scripted_battle(dice: ScriptedDice) -> Battle {
    Battle::new(standard_party(), Boss::new("Evil Boss", 3), Box::new(dice))
        .expect("standard party is valid")
}

/// Config for the standard party with a fixed seed.
pub fn seeded_config(seed: u64) -> BattleConfig {
    BattleConfig {
        party: vec![
            member(Archetype::Warrior, "Brakka"),
            member(Archetype::Mage, "Mira"),
            member(Archetype::Healer, "Sela"),
        ],
        difficulty: Difficulty::Easy,
        seed: Some(seed),
        ..BattleConfig::default()
    }
}

/// Standard party from a seeded config.
pub fn seeded_battle(seed: u64) -> Battle {
    Battle::from_config(&seeded_config(seed)).expect("seeded config is valid")
}

fn member(archetype: Archetype, name: &str) -> MemberConfig {
    MemberConfig {
        archetype,
        name: name.to_string(),
    }
}

// =============================================================================
// State Manipulation
// =============================================================================

/// Drops an entity to zero hp.
pub fn kill(entity: &mut Entity) {
    let hp = entity.hp();
    if hp > 0 {
        entity.take_damage(hp).expect("living entity accepts damage");
    }
}

/// Leaves an entity with exactly `hp` hit points.
pub fn set_hp(entity: &mut Entity, hp: u32) {
    let current = entity.hp();
    if current > hp {
        entity.take_damage(current - hp).expect("living entity accepts damage");
    }
}

// =============================================================================
// Controllers
// =============================================================================

/// A controller that always picks the same action.
pub fn always(action: PartyAction) -> impl FnMut(&BattleSnapshot, usize) -> PartyAction {
    move |_: &BattleSnapshot, _: usize| action
}
