//! Drives a battle turn by turn and renders it as text.

use std::io::{self, Write};

use bossfight_core::{Battle, BattleStatus, CombatantId, Entity, PartyAction, PartyController};
use tracing::info;

/// Plays until the battle is decided or `max_rounds` have started.
///
/// Each report is written as soon as its turn resolves, so an interactive
/// player sees the boss's move before being asked for the next action.
pub fn play<W: Write>(
    battle: &mut Battle,
    controller: &mut dyn PartyController,
    max_rounds: u32,
    out: &mut W,
) -> io::Result<BattleStatus> {
    writeln!(out, "\n=== THE BATTLE BEGINS! ===")?;

    while battle.status() == BattleStatus::Ongoing && battle.round() < max_rounds {
        let order = battle.begin_round();
        writeln!(out, "\nRound {}", battle.round())?;
        writeln!(out, "{}", battle.snapshot())?;

        for who in order {
            if !battle.entity(who).is_some_and(Entity::is_alive) {
                continue;
            }
            let action = match who {
                CombatantId::Party(index) => controller.choose_action(&battle.snapshot(), index),
                CombatantId::Boss => PartyAction::Pass,
            };
            let report = battle.resolve_turn(who, action);
            match who {
                CombatantId::Boss => writeln!(out, "\nBoss turn:")?,
                CombatantId::Party(_) => writeln!(out, "\n{}:", report.actor_name)?,
            }
            writeln!(out, "{report}")?;

            if battle.status().is_over() {
                break;
            }
        }
    }

    let status = battle.status();
    info!(?status, rounds = battle.round(), "battle finished");
    match status {
        BattleStatus::Victory => writeln!(out, "\n=== VICTORY! The boss is defeated! ===")?,
        BattleStatus::Defeat => writeln!(out, "\n=== DEFEAT! All heroes have fallen! ===")?,
        BattleStatus::Ongoing => {
            writeln!(out, "\n=== The battle stalls after {max_rounds} rounds ===")?;
        }
    }
    writeln!(out, "Game over!")?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bossfight_core::{Archetype, AutoPilot, BattleConfig, Boss, ScriptedDice};

    #[test]
    fn seeded_autopilot_battle_renders_to_the_end() {
        let config = BattleConfig {
            seed: Some(11),
            ..crate::prompt::default_party_config()
        };
        let mut battle = Battle::from_config(&config).unwrap();
        let mut out = Vec::new();

        let status = play(&mut battle, &mut AutoPilot::default(), 500, &mut out).unwrap();

        let screen = String::from_utf8(out).unwrap();
        assert!(status.is_over());
        assert!(screen.contains("Round 1"));
        assert!(screen.contains("BATTLE STATUS"));
        assert!(screen.ends_with("Game over!\n"));
    }

    #[test]
    fn round_cap_is_reported() {
        let party = vec![Entity::new("Brakka", Archetype::Warrior, 1)];
        let mut battle =
            Battle::new(party, Boss::new("Evil Boss", 3), Box::new(ScriptedDice::new())).unwrap();
        let mut pass = |_: &bossfight_core::BattleSnapshot, _: usize| PartyAction::Pass;
        let mut out = Vec::new();

        let status = play(&mut battle, &mut pass, 1, &mut out).unwrap();

        let screen = String::from_utf8(out).unwrap();
        assert_eq!(status, BattleStatus::Ongoing);
        assert!(screen.contains("Boss turn:"));
        assert!(screen.contains("Brakka skips the turn"));
        assert!(screen.contains("stalls after 1 rounds"));
    }
}
