//! Determinism verification tests.
//!
//! These tests verify that a battle produces identical results when:
//! - Started with the same seed
//! - Given the same scripted dice and the same party decisions
//!
//! This is critical for:
//! - Replaying a reported battle from its seed
//! - Balance runs that compare policies on equal footing
//! - Debug reproducibility

use crate::battle::{Battle, PartyAction, RoundReport};
use crate::controller::AutoPilot;
use crate::dice::ScriptedDice;

use super::helpers::{always, scripted_battle, seeded_battle, seeded_config};

/// Plays a whole autopilot battle and returns every round report.
fn play_out(mut battle: Battle, max_rounds: u32) -> Vec<RoundReport> {
    let mut autopilot = AutoPilot::default();
    let mut rounds = Vec::new();
    while !battle.status().is_over() && battle.round() < max_rounds {
        rounds.push(battle.play_round(&mut autopilot));
    }
    rounds
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Verify that the same seed replays an identical battle.
#[test]
fn same_seed_same_battle() {
    let first = play_out(seeded_battle(42), 200);
    let second = play_out(seeded_battle(42), 200);

    assert!(!first.is_empty());
    assert_eq!(first.len(), second.len(), "Round counts should match");
    assert_eq!(first, second, "Round reports should be identical");
}

/// Verify that the same seed leaves identical final state.
#[test]
fn same_seed_same_snapshot() {
    let mut battle1 = Battle::from_config(&seeded_config(7)).unwrap();
    let mut battle2 = Battle::from_config(&seeded_config(7)).unwrap();

    battle1.run(&mut AutoPilot::default(), 200);
    battle2.run(&mut AutoPilot::default(), 200);

    assert_eq!(battle1.snapshot(), battle2.snapshot());
    assert_eq!(battle1.status(), battle2.status());
}

/// Verify that different seeds produce different battles.
#[test]
fn different_seeds_diverge() {
    let logs: Vec<Vec<RoundReport>> = (1..=5).map(|seed| play_out(seeded_battle(seed), 200)).collect();

    assert!(
        logs.windows(2).any(|pair| pair[0] != pair[1]),
        "Five seeds should not all replay the same battle"
    );
}

/// Verify that identical scripts and decisions replay identically.
#[test]
fn scripted_dice_replay() {
    let script = || {
        ScriptedDice::new()
            .with_rolls([4, 9, 2, 7, 3, 5, 1])
            .with_chances([false, true])
            .with_picks([1])
    };
    let mut battle1 = scripted_battle(script());
    let mut battle2 = scripted_battle(script());

    let report1 = battle1.play_round(&mut always(PartyAction::Attack));
    let report2 = battle2.play_round(&mut always(PartyAction::Attack));

    assert_eq!(report1, report2);
    assert_eq!(battle1.snapshot(), battle2.snapshot());
}
