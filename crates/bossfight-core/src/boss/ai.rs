//! Phase-based decision policy for the boss.
//!
//! [`decide`] is a pure function of the boss snapshot, the opponents'
//! snapshots and the dice. It never mutates anything; [`Boss::act`](super::Boss::act)
//! carries out the returned [`Decision`].
//!
//! | Phase | Policy |
//! |---|---|
//! | 1 | basic attack on a random living opponent |
//! | 2 | Dark Storm (60%, needs 20 resource), else a random basic attack |
//! | 3 | Apocalypse (80%, needs 30 resource), else attack the weakest opponent |
//!
//! The resource requirement is checked before the probability roll, so no
//! roll is spent when the boss cannot afford the sweep.

use serde::Serialize;

use crate::dice::Dice;
use crate::snapshot::CombatantSnapshot;

use super::Phase;

/// An area attack that hits every living opponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sweep {
    /// Display name.
    pub name: &'static str,
    /// Resource cost, paid after the damage lands.
    pub cost: u32,
    /// Power multiplier.
    pub multiplier: f64,
    /// Low end of the per-target variance roll.
    pub min_roll: u32,
    /// High end of the per-target variance roll.
    pub max_roll: u32,
    /// Chance the boss opts for the sweep when it can afford it.
    pub chance: f64,
}

/// Phase 2 sweep.
pub const DARK_STORM: Sweep = Sweep {
    name: "Dark Storm",
    cost: 20,
    multiplier: 1.2,
    min_roll: 5,
    max_roll: 15,
    chance: 0.6,
};

/// Phase 3 sweep.
pub const APOCALYPSE: Sweep = Sweep {
    name: "Apocalypse",
    cost: 30,
    multiplier: 1.8,
    min_roll: 10,
    max_roll: 25,
    chance: 0.8,
};

/// What the boss does this turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BossAction {
    /// No living opponents remain.
    Idle,
    /// Basic attack on the opponent at this party index.
    Attack {
        /// Party index.
        target: usize,
    },
    /// Basic attack on the lowest-hp opponent at this party index.
    PunishWeakest {
        /// Party index.
        target: usize,
    },
    /// Area attack on every living opponent.
    Sweep(Sweep),
}

/// A boss decision: the phase it was made in and the chosen action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    /// Phase derived from the boss's hp at decision time.
    pub phase: Phase,
    /// Chosen action.
    pub action: BossAction,
}

/// Chooses the boss's action for this turn.
///
/// `opponents` is the whole party in party order; dead members are never
/// chosen. Target indices in the result index into `opponents`.
pub fn decide(
    boss: &CombatantSnapshot,
    opponents: &[CombatantSnapshot],
    dice: &mut dyn Dice,
) -> Decision {
    let phase = Phase::from_health(boss.hp, boss.max_hp);
    let living: Vec<usize> = opponents
        .iter()
        .enumerate()
        .filter(|(_, opponent)| opponent.alive)
        .map(|(i, _)| i)
        .collect();

    let action = if living.is_empty() {
        BossAction::Idle
    } else {
        match phase {
            Phase::One => random_attack(&living, dice),
            Phase::Two => {
                if wants_sweep(boss, &DARK_STORM, dice) {
                    BossAction::Sweep(DARK_STORM)
                } else {
                    random_attack(&living, dice)
                }
            }
            Phase::Three => {
                if wants_sweep(boss, &APOCALYPSE, dice) {
                    BossAction::Sweep(APOCALYPSE)
                } else {
                    BossAction::PunishWeakest {
                        target: weakest(opponents, &living),
                    }
                }
            }
        }
    };

    Decision { phase, action }
}

fn wants_sweep(boss: &CombatantSnapshot, sweep: &Sweep, dice: &mut dyn Dice) -> bool {
    boss.resource >= sweep.cost && dice.chance(sweep.chance)
}

fn random_attack(living: &[usize], dice: &mut dyn Dice) -> BossAction {
    BossAction::Attack {
        target: living[dice.pick(living.len())],
    }
}

/// Lowest current hp among the living; ties go to the earliest party slot.
fn weakest(opponents: &[CombatantSnapshot], living: &[usize]) -> usize {
    living
        .iter()
        .copied()
        .min_by_key(|&i| opponents[i].hp)
        .unwrap_or(living[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::entity::{Archetype, Entity};

    fn boss_at(hp: u32, max_hp: u32, resource: u32) -> CombatantSnapshot {
        let mut snapshot = CombatantSnapshot::of(&Entity::new("Evil Boss", Archetype::Boss, 4));
        snapshot.hp = hp;
        snapshot.max_hp = max_hp;
        snapshot.resource = resource;
        snapshot
    }

    fn party(hps: &[u32]) -> Vec<CombatantSnapshot> {
        hps.iter()
            .enumerate()
            .map(|(i, &hp)| {
                let mut member =
                    CombatantSnapshot::of(&Entity::new(format!("Hero {i}"), Archetype::Warrior, 1));
                member.hp = hp;
                member.alive = hp > 0;
                member
            })
            .collect()
    }

    #[test]
    fn no_living_opponents_means_idle() {
        let mut dice = ScriptedDice::new();
        let decision = decide(&boss_at(500, 500, 180), &party(&[0, 0]), &mut dice);
        assert_eq!(decision.action, BossAction::Idle);
    }

    #[test]
    fn phase_one_attacks_random_living_opponent() {
        let mut dice = ScriptedDice::new().with_picks([1]);
        let decision = decide(&boss_at(400, 500, 180), &party(&[50, 0, 70]), &mut dice);
        assert_eq!(decision.phase, Phase::One);
        assert_eq!(decision.action, BossAction::Attack { target: 2 });
    }

    #[test]
    fn phase_two_sweeps_when_roll_succeeds() {
        let mut dice = ScriptedDice::new().with_chances([true]);
        let decision = decide(&boss_at(250, 500, 180), &party(&[50, 70]), &mut dice);
        assert_eq!(decision.phase, Phase::Two);
        assert_eq!(decision.action, BossAction::Sweep(DARK_STORM));
    }

    #[test]
    fn phase_two_falls_back_to_attack() {
        let mut dice = ScriptedDice::new().with_chances([false]).with_picks([0]);
        let decision = decide(&boss_at(250, 500, 180), &party(&[50, 70]), &mut dice);
        assert_eq!(decision.action, BossAction::Attack { target: 0 });
    }

    #[test]
    fn short_resource_skips_the_probability_roll() {
        let mut dice = ScriptedDice::new().with_chances([true]);
        let decision = decide(&boss_at(250, 500, 19), &party(&[50, 70]), &mut dice);
        assert!(matches!(decision.action, BossAction::Attack { .. }));
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn phase_three_at_28_percent() {
        let mut dice = ScriptedDice::new().with_chances([true]);
        let decision = decide(&boss_at(140, 500, 180), &party(&[50, 70]), &mut dice);
        assert_eq!(decision.phase, Phase::Three);
        assert_eq!(decision.action, BossAction::Sweep(APOCALYPSE));
    }

    #[test]
    fn phase_three_falls_back_to_weakest_first_in_party_order() {
        let mut dice = ScriptedDice::new().with_chances([false]);
        let decision = decide(&boss_at(140, 500, 180), &party(&[60, 0, 30, 30]), &mut dice);
        assert_eq!(decision.action, BossAction::PunishWeakest { target: 2 });
    }

    #[test]
    fn phase_is_not_sticky() {
        let mut dice = ScriptedDice::new();
        let opponents = party(&[50]);
        assert_eq!(decide(&boss_at(100, 500, 0), &opponents, &mut dice).phase, Phase::Three);
        assert_eq!(decide(&boss_at(400, 500, 0), &opponents, &mut dice).phase, Phase::One);
    }
}
