//! Entity model: attribute state for every combatant.
//!
//! This module provides:
//! - [`Stats`]: the derived attribute block of a combatant
//! - [`Archetype`]: class tables that produce stats, abilities and kits
//! - [`Entity`]: a combatant, party member or boss
//! - [`Target`]: who an action lands on, relative to its user
//!
//! # Invariants
//!
//! - `0 <= hp <= max_hp` and `0 <= resource <= max_resource` after every call
//! - `is_alive() == (hp > 0)`
//! - Death is a state, not removal. A dead entity cannot act, cannot be
//!   damaged further, and cannot be healed or restored.
//!
//! # Example
//!
//! ```
//! use bossfight_core::dice::ScriptedDice;
//! use bossfight_core::entity::{Archetype, Entity};
//!
//! let warrior = Entity::new("Brakka", Archetype::Warrior, 1);
//! let mut boss = Entity::new("Evil Boss", Archetype::Boss, 3);
//! let mut dice = ScriptedDice::new().with_rolls([3]);
//!
//! let outcome = warrior.basic_attack(&mut boss, &mut dice).unwrap();
//! assert_eq!(outcome.amount(), 20); // power 17 + roll 3
//! assert_eq!(boss.hp(), boss.max_hp() - 20);
//! ```

mod archetype;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{Ability, Item};
use crate::dice::Dice;
use crate::effect::Effect;
use crate::error::ActionError;
use crate::event::{Event, Outcome};

pub use archetype::{Archetype, MAX_LEVEL};

/// Chance for a basic attack to land a critical hit.
pub const CRITICAL_CHANCE: f64 = 0.2;

/// Attribute block of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Maximum hit points.
    pub max_hp: u32,
    /// Maximum resource points.
    pub max_resource: u32,
    /// Scales attacks and damage abilities.
    pub power: u32,
    /// Drives initiative.
    pub agility: u32,
    /// Scales healing.
    pub focus: u32,
}

/// Recipient of an action, relative to the entity performing it.
#[derive(Debug)]
pub enum Target<'a> {
    /// The acting entity itself.
    User,
    /// Some other entity.
    Other(&'a mut Entity),
}

/// A combatant.
///
/// Entities own their effect list and inventory. The ability table is a
/// `'static` slice shared by every entity of the same archetype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    name: String,
    level: u32,
    archetype: Option<Archetype>,
    stats: Stats,
    hp: u32,
    resource: u32,
    effects: Vec<Effect>,
    inventory: Vec<Item>,
    abilities: &'static [Ability],
}

impl Entity {
    /// Creates a fresh entity from an archetype at the given level.
    ///
    /// Hp and resource start full; the inventory is the archetype's kit.
    #[must_use]
    pub fn new(name: impl Into<String>, archetype: Archetype, level: u32) -> Self {
        let mut entity = Self::from_stats(name, level, archetype.stats(level));
        entity.archetype = Some(archetype);
        entity.abilities = archetype.abilities();
        entity.inventory = archetype.starting_items().to_vec();
        entity
    }

    /// Creates an entity with explicit stats, no abilities and no items.
    #[must_use]
    pub fn from_stats(name: impl Into<String>, level: u32, stats: Stats) -> Self {
        Self {
            name: name.into(),
            level,
            archetype: None,
            stats,
            hp: stats.max_hp,
            resource: stats.max_resource,
            effects: Vec::new(),
            inventory: Vec::new(),
            abilities: &[],
        }
    }

    /// Replaces the inventory.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.inventory = items.into_iter().collect();
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Level the entity was created at.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Archetype, if the entity was built from one.
    #[must_use]
    pub fn archetype(&self) -> Option<Archetype> {
        self.archetype
    }

    /// Attribute block.
    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Current hit points.
    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Maximum hit points.
    #[must_use]
    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    /// Current resource points.
    #[must_use]
    pub fn resource(&self) -> u32 {
        self.resource
    }

    /// Maximum resource points.
    #[must_use]
    pub fn max_resource(&self) -> u32 {
        self.stats.max_resource
    }

    /// Power attribute.
    #[must_use]
    pub fn power(&self) -> u32 {
        self.stats.power
    }

    /// Agility attribute.
    #[must_use]
    pub fn agility(&self) -> u32 {
        self.stats.agility
    }

    /// Focus attribute.
    #[must_use]
    pub fn focus(&self) -> u32 {
        self.stats.focus
    }

    /// Active effects in application order.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Items in inventory order.
    #[must_use]
    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    /// Abilities this entity can invoke.
    #[must_use]
    pub fn abilities(&self) -> &'static [Ability] {
        self.abilities
    }

    /// Returns `true` while hp is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub(crate) fn ensure_alive(&self) -> Result<(), ActionError> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(ActionError::NotAlive {
                name: self.name.clone(),
            })
        }
    }

    pub(crate) fn ensure_targetable(&self) -> Result<(), ActionError> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(ActionError::AlreadyDead {
                name: self.name.clone(),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Hp and resource
    // -------------------------------------------------------------------------

    /// Applies incoming damage.
    ///
    /// Damage is first offered to every shield in effect order; whatever the
    /// shields do not soak reduces hp, flooring at zero. The outcome amount is
    /// the hp actually removed.
    ///
    /// # Errors
    ///
    /// [`ActionError::AlreadyDead`] if the entity is already dead.
    pub fn take_damage(&mut self, amount: u32) -> Result<Outcome, ActionError> {
        self.ensure_targetable()?;

        let mut incoming = amount;
        for effect in &mut self.effects {
            if incoming == 0 {
                break;
            }
            incoming = effect.absorb(incoming);
        }

        let mut outcome = Outcome::default();
        let absorbed = amount - incoming;
        if absorbed > 0 {
            outcome.push(Event::Absorbed {
                target: self.name.clone(),
                amount: absorbed,
            });
            if incoming == 0 {
                return Ok(outcome);
            }
        }

        let removed = incoming.min(self.hp);
        self.hp -= removed;
        outcome.append(Outcome::from_event(
            removed,
            Event::Damaged {
                target: self.name.clone(),
                amount: removed,
                hp: self.hp,
            },
        ));

        if !self.is_alive() {
            debug!(entity = %self.name, "entity died");
            outcome.push(Event::Died {
                target: self.name.clone(),
            });
        }

        Ok(outcome)
    }

    /// Restores hp, clamped to the maximum.
    ///
    /// Returns the hp actually restored; dead entities are not healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.stats.max_hp);
        self.hp - before
    }

    /// Restores resource, clamped to the maximum.
    ///
    /// Returns the resource actually restored; dead entities gain nothing.
    pub fn restore_resource(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.resource;
        self.resource = self
            .resource
            .saturating_add(amount)
            .min(self.stats.max_resource);
        self.resource - before
    }

    /// Pays a resource cost.
    ///
    /// # Errors
    ///
    /// [`ActionError::InsufficientResource`] if the entity holds less than
    /// `cost`; nothing is deducted.
    pub fn spend_resource(&mut self, cost: u32) -> Result<(), ActionError> {
        if self.resource < cost {
            return Err(ActionError::InsufficientResource {
                name: self.name.clone(),
                needed: cost,
                available: self.resource,
            });
        }
        self.resource -= cost;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Strikes a target for `power + 1d5`, doubled on a critical hit.
    ///
    /// The critical check is rolled after, and independently of, the damage
    /// roll.
    ///
    /// # Errors
    ///
    /// - [`ActionError::NotAlive`] if the attacker is dead
    /// - [`ActionError::AlreadyDead`] if the target is dead
    pub fn basic_attack(
        &self,
        target: &mut Entity,
        dice: &mut dyn Dice,
    ) -> Result<Outcome, ActionError> {
        self.ensure_alive()?;
        target.ensure_targetable()?;

        let mut damage = self.stats.power + dice.roll(1, 5);
        let mut outcome = Outcome::default();
        if dice.chance(CRITICAL_CHANCE) {
            damage *= 2;
            outcome.push(Event::CriticalHit {
                attacker: self.name.clone(),
            });
        }
        outcome.append(target.take_damage(damage)?);
        Ok(outcome)
    }

    /// Rolls initiative: `agility + 1d10`.
    ///
    /// Rolled fresh every round, never cached.
    pub fn initiative(&self, dice: &mut dyn Dice) -> u32 {
        self.stats.agility + dice.roll(1, 10)
    }

    /// Invokes the ability at `index`.
    ///
    /// # Errors
    ///
    /// [`ActionError::NoSuchAbility`] for an out-of-range index, otherwise
    /// whatever [`Ability::invoke`] refuses.
    pub fn use_ability(
        &mut self,
        index: usize,
        target: Target<'_>,
        dice: &mut dyn Dice,
    ) -> Result<Outcome, ActionError> {
        let abilities = self.abilities;
        let ability = abilities
            .get(index)
            .ok_or(ActionError::NoSuchAbility { index })?;
        ability.invoke(self, target, dice)
    }

    // -------------------------------------------------------------------------
    // Effects
    // -------------------------------------------------------------------------

    /// Attaches an effect and returns its announcement.
    pub fn add_effect(&mut self, effect: Effect) -> Event {
        let event = Event::EffectApplied {
            target: self.name.clone(),
            effect: effect.name(),
        };
        self.effects.push(effect);
        event
    }

    /// Ticks every active effect once, in application order.
    ///
    /// Damage-over-time hurts the owner while it is alive. Effects whose
    /// duration runs out are removed after their final tick. The outcome
    /// amount is the hp lost to ticks.
    pub fn tick_effects(&mut self) -> Outcome {
        let mut outcome = Outcome::default();
        if self.effects.is_empty() {
            return outcome;
        }

        for i in 0..self.effects.len() {
            let effect = &mut self.effects[i];
            let name = effect.name();
            let Some(damage) = effect.tick() else {
                continue;
            };
            if self.is_alive() {
                outcome.push(Event::EffectTicked {
                    target: self.name.clone(),
                    effect: name,
                    magnitude: damage,
                });
                if let Ok(hit) = self.take_damage(damage) {
                    outcome.append(hit);
                }
            }
        }

        let owner = self.name.clone();
        self.effects.retain(|effect| {
            if effect.is_expired() {
                outcome.push(Event::EffectExpired {
                    target: owner.clone(),
                    effect: effect.name(),
                });
                false
            } else {
                true
            }
        });

        outcome
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// Adds an item to the end of the inventory.
    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Consumes the item at `index` on the target.
    ///
    /// The item stays in the inventory unless it is actually used.
    ///
    /// # Errors
    ///
    /// - [`ActionError::NotAlive`] if the user is dead
    /// - [`ActionError::NoSuchItem`] for an out-of-range index
    /// - [`ActionError::AlreadyDead`] if the target is dead
    pub fn use_item(&mut self, index: usize, target: Target<'_>) -> Result<Outcome, ActionError> {
        self.ensure_alive()?;
        if index >= self.inventory.len() {
            return Err(ActionError::NoSuchItem { index });
        }
        if let Target::Other(other) = &target {
            other.ensure_targetable()?;
        }

        let item = self.inventory.remove(index);
        let mut outcome = Outcome::from_event(
            0,
            Event::ItemUsed {
                user: self.name.clone(),
                item: item.name(),
            },
        );
        outcome.append(match target {
            Target::User => item.apply(self),
            Target::Other(other) => item.apply(other),
        });
        Ok(outcome)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - HP: {}/{}, MP: {}/{}",
            self.name, self.hp, self.stats.max_hp, self.resource, self.stats.max_resource
        )
    }
}
