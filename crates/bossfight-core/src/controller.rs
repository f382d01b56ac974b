//! Party decision seam.
//!
//! The engine never asks a terminal for input. Whoever drives a
//! [`Battle`](crate::battle::Battle) supplies a [`PartyController`] that
//! picks a [`PartyAction`] from a read-only [`BattleSnapshot`]. The CLI
//! implements one over stdin; [`AutoPilot`] is a simple built-in policy for
//! unattended runs, benches and tests.
//!
//! Closures work as controllers too:
//!
//! ```
//! use bossfight_core::battle::PartyAction;
//! use bossfight_core::controller::PartyController;
//! use bossfight_core::snapshot::BattleSnapshot;
//!
//! fn always_attack() -> impl PartyController {
//!     |_view: &BattleSnapshot, _member: usize| PartyAction::Attack
//! }
//! # let _ = always_attack();
//! ```

use crate::action::{AbilityKind, Item};
use crate::battle::PartyAction;
use crate::snapshot::{BattleSnapshot, CombatantSnapshot};

/// Chooses actions for party members.
pub trait PartyController {
    /// Picks the action for the living party member at `member`.
    ///
    /// Invalid choices are allowed; the battle rejects them and the member
    /// loses the turn.
    fn choose_action(&mut self, view: &BattleSnapshot, member: usize) -> PartyAction;
}

impl<F> PartyController for F
where
    F: FnMut(&BattleSnapshot, usize) -> PartyAction,
{
    fn choose_action(&mut self, view: &BattleSnapshot, member: usize) -> PartyAction {
        self(view, member)
    }
}

/// A greedy built-in party policy.
///
/// In priority order, a member:
/// 1. drinks a health potion when below `potion_threshold` hp
/// 2. heals the most wounded ally below `heal_threshold` hp, if it can
/// 3. drinks a mana potion when it cannot afford any ability
/// 4. casts its hardest-hitting affordable strike
/// 5. falls back to a basic attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoPilot {
    /// Hp fraction under which a member drinks a health potion.
    pub potion_threshold: f64,
    /// Hp fraction under which an ally is worth healing.
    pub heal_threshold: f64,
}

impl Default for AutoPilot {
    fn default() -> Self {
        Self {
            potion_threshold: 0.35,
            heal_threshold: 0.5,
        }
    }
}

impl AutoPilot {
    fn most_wounded_ally(&self, party: &[CombatantSnapshot]) -> Option<usize> {
        party
            .iter()
            .enumerate()
            .filter(|(_, ally)| ally.alive && ally.health_fraction() < self.heal_threshold)
            .min_by(|(_, a), (_, b)| a.health_fraction().total_cmp(&b.health_fraction()))
            .map(|(i, _)| i)
    }
}

fn find_item(me: &CombatantSnapshot, wanted: Item) -> Option<usize> {
    me.items.iter().position(|&item| item == wanted)
}

impl PartyController for AutoPilot {
    fn choose_action(&mut self, view: &BattleSnapshot, member: usize) -> PartyAction {
        let Some(me) = view.party.get(member) else {
            return PartyAction::Pass;
        };

        if me.health_fraction() < self.potion_threshold {
            if let Some(index) = find_item(me, Item::HealthPotion) {
                return PartyAction::Item {
                    index,
                    target: None,
                };
            }
        }

        if let Some(ally) = self.most_wounded_ally(&view.party) {
            let heal = me.abilities.iter().position(|ability| {
                matches!(ability.kind, AbilityKind::Heal { .. }) && ability.cost <= me.resource
            });
            if let Some(index) = heal {
                return PartyAction::Ability {
                    index,
                    target: Some(ally),
                };
            }
        }

        let cheapest = me.abilities.iter().map(|ability| ability.cost).min();
        if cheapest.is_some_and(|cost| me.resource < cost) {
            if let Some(index) = find_item(me, Item::ManaPotion) {
                return PartyAction::Item {
                    index,
                    target: None,
                };
            }
        }

        let strike = me
            .abilities
            .iter()
            .enumerate()
            .filter(|(_, ability)| ability.cost <= me.resource)
            .filter_map(|(i, ability)| match ability.kind {
                AbilityKind::Strike { multiplier } => Some((i, multiplier)),
                _ => None,
            })
            .max_by(|(_, a), (_, b)| a.total_cmp(b));
        match strike {
            Some((index, _)) => PartyAction::Ability {
                index,
                target: None,
            },
            None => PartyAction::Attack,
        }
    }
}
