//! Single-use consumables.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::event::{Event, Outcome};

/// A consumable held in an entity's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    /// Restores [`Item::HEALTH_POTION_HP`] hit points.
    HealthPotion,
    /// Restores [`Item::MANA_POTION_RESOURCE`] resource points.
    ManaPotion,
}

impl Item {
    /// Hp restored by a health potion.
    pub const HEALTH_POTION_HP: u32 = 50;
    /// Resource restored by a mana potion.
    pub const MANA_POTION_RESOURCE: u32 = 30;

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HealthPotion => "Health Potion",
            Self::ManaPotion => "Mana Potion",
        }
    }

    /// Applies the item to a living target.
    ///
    /// The owner checks that the target is alive before the item leaves the
    /// inventory; see [`Entity::use_item`].
    pub(crate) fn apply(self, target: &mut Entity) -> Outcome {
        let name = target.name().to_owned();
        match self {
            Self::HealthPotion => {
                let amount = target.heal(Self::HEALTH_POTION_HP);
                Outcome::from_event(amount, Event::Healed { target: name, amount })
            }
            Self::ManaPotion => {
                let amount = target.restore_resource(Self::MANA_POTION_RESOURCE);
                Outcome::from_event(amount, Event::ResourceRestored { target: name, amount })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Stats;

    fn drained() -> Entity {
        let mut entity = Entity::from_stats(
            "Sip",
            1,
            Stats {
                max_hp: 100,
                max_resource: 50,
                power: 1,
                agility: 1,
                focus: 1,
            },
        );
        entity.take_damage(70).unwrap();
        entity.spend_resource(45).unwrap();
        entity
    }

    #[test]
    fn health_potion_restores_fixed_amount() {
        let mut entity = drained();
        let outcome = Item::HealthPotion.apply(&mut entity);
        assert_eq!(outcome.amount(), 50);
        assert_eq!(entity.hp(), 80);
    }

    #[test]
    fn mana_potion_clamps_to_max() {
        let mut entity = drained();
        entity.restore_resource(10);
        let outcome = Item::ManaPotion.apply(&mut entity);
        assert_eq!(outcome.amount(), 30);
        assert_eq!(entity.resource(), 45);

        let outcome = Item::ManaPotion.apply(&mut entity);
        assert_eq!(outcome.amount(), 5);
        assert_eq!(entity.resource(), 50);
    }

    #[test]
    fn names() {
        assert_eq!(Item::HealthPotion.name(), "Health Potion");
        assert_eq!(Item::ManaPotion.name(), "Mana Potion");
    }
}
