//! The boss: an entity with a health-driven phase and an autonomous policy.
//!
//! - [`Phase`]: behaviour mode derived from the boss's hp fraction
//! - [`ai::decide`]: the pure policy choosing an action from snapshots
//! - [`Boss::act`]: applies a decision to the live party

pub mod ai;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::action::scale;
use crate::dice::Dice;
use crate::entity::{Archetype, Entity};
use crate::error::ActionError;
use crate::event::{Event, Outcome};
use crate::snapshot::CombatantSnapshot;

use self::ai::BossAction;

/// Behaviour mode of the boss.
///
/// Recomputed from the current hp fraction at every decision, so it can move
/// in either direction between turns.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Phase {
    /// Hp at or above 60% of maximum.
    #[default]
    One,
    /// Hp from 30% up to, not including, 60%.
    Two,
    /// Hp below 30%.
    Three,
}

impl Phase {
    /// Phase for the given hp.
    #[must_use]
    pub fn from_health(hp: u32, max_hp: u32) -> Self {
        let scaled_hp = u64::from(hp) * 10;
        let max_hp = u64::from(max_hp);
        if scaled_hp < max_hp * 3 {
            Self::Three
        } else if scaled_hp < max_hp * 6 {
            Self::Two
        } else {
            Self::One
        }
    }

    /// Phase number, 1 to 3.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {}", self.number())
    }
}

/// The single scripted opponent of a battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boss {
    entity: Entity,
    phase: Phase,
}

impl Boss {
    /// Creates a boss from the boss archetype at the given level.
    #[must_use]
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self::from_entity(Entity::new(name, Archetype::Boss, level))
    }

    /// Wraps an existing entity, deriving the phase from its hp.
    #[must_use]
    pub fn from_entity(entity: Entity) -> Self {
        let phase = Phase::from_health(entity.hp(), entity.max_hp());
        Self { entity, phase }
    }

    /// The underlying entity.
    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Mutable access to the underlying entity.
    #[must_use]
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    /// Phase at the last decision.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Shorthand for `entity().is_alive()`.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// Decides and carries out this turn's action against the party.
    ///
    /// The outcome amount is the total hp removed from the party.
    ///
    /// # Errors
    ///
    /// [`ActionError::NotAlive`] if the boss is dead.
    pub fn act(
        &mut self,
        party: &mut [Entity],
        dice: &mut dyn Dice,
    ) -> Result<Outcome, ActionError> {
        self.entity.ensure_alive()?;

        let view = CombatantSnapshot::of(&self.entity);
        let opponents: Vec<CombatantSnapshot> = party.iter().map(CombatantSnapshot::of).collect();
        let decision = ai::decide(&view, &opponents, dice);
        debug!(phase = %decision.phase, action = ?decision.action, "boss decided");

        let mut outcome = Outcome::default();
        if decision.phase != self.phase {
            info!(from = %self.phase, to = %decision.phase, "boss phase shift");
            outcome.push(Event::PhaseShift {
                from: self.phase,
                to: decision.phase,
            });
            self.phase = decision.phase;
        }

        match decision.action {
            BossAction::Idle => outcome.push(Event::BossIdle {
                boss: self.entity.name().to_owned(),
            }),
            BossAction::Attack { target } => {
                outcome.append(self.entity.basic_attack(&mut party[target], dice)?);
            }
            BossAction::PunishWeakest { target } => {
                outcome.push(Event::TargetedWeakest {
                    target: party[target].name().to_owned(),
                });
                outcome.append(self.entity.basic_attack(&mut party[target], dice)?);
            }
            BossAction::Sweep(sweep) => {
                outcome.push(Event::Sweep { ability: sweep.name });
                for member in party.iter_mut().filter(|member| member.is_alive()) {
                    let damage = scale(self.entity.power(), sweep.multiplier)
                        + dice.roll(sweep.min_roll, sweep.max_roll);
                    outcome.append(member.take_damage(damage)?);
                }
                if let Err(err) = self.entity.spend_resource(sweep.cost) {
                    warn!(%err, "sweep resolved without its cost being paid");
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    fn party() -> Vec<Entity> {
        vec![
            Entity::new("Brakka", Archetype::Warrior, 1),
            Entity::new("Mira", Archetype::Mage, 1),
        ]
    }

    #[test]
    fn phase_thresholds() {
        assert_eq!(Phase::from_health(500, 500), Phase::One);
        assert_eq!(Phase::from_health(300, 500), Phase::One);
        assert_eq!(Phase::from_health(299, 500), Phase::Two);
        assert_eq!(Phase::from_health(150, 500), Phase::Two);
        assert_eq!(Phase::from_health(149, 500), Phase::Three);
        assert_eq!(Phase::from_health(0, 500), Phase::Three);
    }

    #[test]
    fn new_boss_starts_in_phase_one() {
        let boss = Boss::new("Evil Boss", 5);
        assert_eq!(boss.phase(), Phase::One);
        assert_eq!(boss.entity().max_hp(), 550);
    }

    #[test]
    fn phase_one_basic_attack_hits_picked_member() {
        let mut boss = Boss::new("Evil Boss", 3);
        let mut party = party();
        let mut dice = ScriptedDice::new().with_picks([1]).with_rolls([2]);

        let outcome = boss.act(&mut party, &mut dice).unwrap();

        // power 29 + roll 2
        assert_eq!(outcome.amount(), 31);
        assert_eq!(party[1].hp(), 54);
        assert_eq!(party[0].hp(), party[0].max_hp());
    }

    #[test]
    fn sweep_hits_all_living_and_costs_resource() {
        let mut boss = Boss::new("Evil Boss", 4);
        boss.entity_mut().take_damage(250).unwrap();
        let mut party = party();
        party[1].take_damage(1_000).unwrap();
        let mut dice = ScriptedDice::new().with_chances([true]).with_rolls([5]);

        let outcome = boss.act(&mut party, &mut dice).unwrap();

        // floor(32 * 1.2) = 38, + 5
        assert_eq!(party[0].hp(), 130 - 43);
        assert_eq!(boss.entity().resource(), 180 - 20);
        assert_eq!(boss.phase(), Phase::Two);
        assert!(matches!(
            outcome.events()[0],
            Event::PhaseShift {
                from: Phase::One,
                to: Phase::Two
            }
        ));
        assert!(outcome
            .events()
            .iter()
            .any(|e| matches!(e, Event::Sweep { ability: "Dark Storm" })));
    }

    #[test]
    fn phase_three_targets_weakest_when_sweep_declined() {
        let mut boss = Boss::new("Evil Boss", 4);
        boss.entity_mut().take_damage(360).unwrap();
        let mut party = party();
        party[0].take_damage(100).unwrap();
        let mut dice = ScriptedDice::new().with_chances([false]);

        let outcome = boss.act(&mut party, &mut dice).unwrap();

        assert_eq!(boss.phase(), Phase::Three);
        assert!(outcome
            .events()
            .iter()
            .any(|e| matches!(e, Event::TargetedWeakest { target } if target == "Brakka")));
        assert!(!party[0].is_alive());
    }

    #[test]
    fn boss_with_no_opponents_is_idle() {
        let mut boss = Boss::new("Evil Boss", 3);
        let mut party = party();
        for member in &mut party {
            member.take_damage(1_000).unwrap();
        }
        let mut dice = ScriptedDice::new();

        let outcome = boss.act(&mut party, &mut dice).unwrap();

        assert_eq!(outcome.events(), &[Event::BossIdle { boss: "Evil Boss".into() }]);
    }

    #[test]
    fn dead_boss_cannot_act() {
        let mut boss = Boss::new("Evil Boss", 3);
        boss.entity_mut().take_damage(10_000).unwrap();
        let mut party = party();
        let mut dice = ScriptedDice::new();
        assert!(matches!(
            boss.act(&mut party, &mut dice),
            Err(ActionError::NotAlive { .. })
        ));
    }
}
