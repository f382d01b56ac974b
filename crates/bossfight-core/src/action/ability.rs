//! Resource-costed abilities.

use serde::Serialize;

use crate::dice::Dice;
use crate::effect::Effect;
use crate::entity::{Entity, Target};
use crate::error::ActionError;
use crate::event::{Event, Outcome};

use super::scale;

/// What an ability does once its cost is paid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AbilityKind {
    /// Damage of `⌊power × multiplier⌋ + 1d10`.
    Strike {
        /// Power multiplier.
        multiplier: f64,
    },
    /// Healing of `⌊focus × multiplier⌋ + roll(5..=15)`.
    Heal {
        /// Focus multiplier.
        multiplier: f64,
    },
    /// Attaches a damage-over-time effect.
    Poison {
        /// Turns the poison lasts.
        duration: u32,
        /// Damage per tick.
        damage_per_tick: u32,
    },
    /// Attaches a damage-absorption shield.
    Shield {
        /// Turns the shield lasts.
        duration: u32,
        /// Damage the shield can soak.
        capacity: u32,
    },
}

/// An immutable ability definition.
///
/// Ability tables are `'static` and shared by every entity of an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ability {
    /// Display name.
    pub name: &'static str,
    /// Resource spent on use.
    pub cost: u32,
    /// Behaviour and parameters.
    pub kind: AbilityKind,
}

impl Ability {
    /// A direct damage ability.
    #[must_use]
    pub const fn strike(name: &'static str, cost: u32, multiplier: f64) -> Self {
        Self {
            name,
            cost,
            kind: AbilityKind::Strike { multiplier },
        }
    }

    /// A healing ability.
    #[must_use]
    pub const fn heal(name: &'static str, cost: u32, multiplier: f64) -> Self {
        Self {
            name,
            cost,
            kind: AbilityKind::Heal { multiplier },
        }
    }

    /// A damage-over-time applicator.
    #[must_use]
    pub const fn poison(name: &'static str, cost: u32, duration: u32, damage_per_tick: u32) -> Self {
        Self {
            name,
            cost,
            kind: AbilityKind::Poison {
                duration,
                damage_per_tick,
            },
        }
    }

    /// A shield applicator.
    #[must_use]
    pub const fn shield(name: &'static str, cost: u32, duration: u32, capacity: u32) -> Self {
        Self {
            name,
            cost,
            kind: AbilityKind::Shield { duration, capacity },
        }
    }

    /// Returns `true` for abilities aimed at allies rather than the boss.
    #[must_use]
    pub fn is_supportive(&self) -> bool {
        matches!(self.kind, AbilityKind::Heal { .. } | AbilityKind::Shield { .. })
    }

    /// Invokes the ability.
    ///
    /// The user must be alive, able to pay the cost, and the target must be
    /// alive. All three are checked before anything is spent.
    ///
    /// # Errors
    ///
    /// - [`ActionError::NotAlive`] if the user is dead
    /// - [`ActionError::InsufficientResource`] if the user cannot pay
    /// - [`ActionError::AlreadyDead`] if the target is dead
    pub fn invoke<'a>(
        &self,
        user: &'a mut Entity,
        target: Target<'a>,
        dice: &mut dyn Dice,
    ) -> Result<Outcome, ActionError> {
        user.ensure_alive()?;
        if user.resource() < self.cost {
            return Err(ActionError::InsufficientResource {
                name: user.name().to_owned(),
                needed: self.cost,
                available: user.resource(),
            });
        }
        if let Target::Other(other) = &target {
            other.ensure_targetable()?;
        }

        user.spend_resource(self.cost)?;
        let mut outcome = Outcome::from_event(
            0,
            Event::AbilityUsed {
                user: user.name().to_owned(),
                ability: self.name,
            },
        );
        let power = user.power();
        let focus = user.focus();
        let recipient = match target {
            Target::User => user,
            Target::Other(other) => other,
        };

        match self.kind {
            AbilityKind::Strike { multiplier } => {
                let damage = scale(power, multiplier) + dice.roll(1, 10);
                outcome.append(recipient.take_damage(damage)?);
            }
            AbilityKind::Heal { multiplier } => {
                let amount = scale(focus, multiplier) + dice.roll(5, 15);
                let healed = recipient.heal(amount);
                outcome.append(Outcome::from_event(
                    healed,
                    Event::Healed {
                        target: recipient.name().to_owned(),
                        amount: healed,
                    },
                ));
            }
            AbilityKind::Poison {
                duration,
                damage_per_tick,
            } => {
                outcome.push(recipient.add_effect(Effect::poison(duration, damage_per_tick)));
            }
            AbilityKind::Shield { duration, capacity } => {
                outcome.push(recipient.add_effect(Effect::shield(duration, capacity)));
            }
        }

        Ok(outcome)
    }
}
