//! Interactive prompts: party setup and per-turn action menus.
//!
//! Input is forgiving. Unparsable menu choices fall back to the first
//! option, and read failures fall back to a basic attack rather than
//! aborting the battle.

use std::io::{self, BufRead, Write};

use bossfight_core::{
    Archetype, BattleConfig, BattleSnapshot, Difficulty, MemberConfig, PartyAction,
    PartyController,
};
use tracing::warn;

/// Heroes created by the interactive setup.
pub const PARTY_SLOTS: usize = 3;

/// Party used when nobody is around to pick one.
pub fn default_party_config() -> BattleConfig {
    BattleConfig {
        party: Archetype::PLAYABLE
            .iter()
            .enumerate()
            .map(|(i, &archetype)| MemberConfig {
                archetype,
                name: default_name(i),
            })
            .collect(),
        ..BattleConfig::default()
    }
}

fn default_name(slot: usize) -> String {
    format!("Hero {}", slot + 1)
}

/// Zero-based index from a one-based menu answer.
///
/// Unparsable answers mean the first option. `0` maps to an index no menu
/// has, so the engine rejects it instead of silently picking the first.
fn menu_index(answer: &str) -> usize {
    answer
        .trim()
        .parse::<usize>()
        .map_or(0, |n| n.checked_sub(1).unwrap_or(usize::MAX))
}

/// Line-oriented prompter over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    /// Walks the player through party and difficulty selection.
    pub fn setup(&mut self) -> io::Result<BattleConfig> {
        writeln!(self.output, "=== PARTY VS BOSS ===")?;
        writeln!(self.output, "Build your party ({PARTY_SLOTS} heroes):")?;

        let mut party = Vec::with_capacity(PARTY_SLOTS);
        for slot in 0..PARTY_SLOTS {
            writeln!(self.output, "\nHero {}:", slot + 1)?;
            for (i, archetype) in Archetype::PLAYABLE.iter().enumerate() {
                writeln!(self.output, "{}. {archetype}", i + 1)?;
            }
            let archetype = Archetype::from_choice(&self.ask("Choose a class: ")?);
            let mut name = self.ask("Hero name: ")?;
            if name.is_empty() {
                name = default_name(slot);
            }
            party.push(MemberConfig { archetype, name });
        }

        let difficulty =
            Difficulty::from_choice(&self.ask("Difficulty (1-easy, 2-normal, 3-hard): ")?);

        Ok(BattleConfig {
            party,
            difficulty,
            ..BattleConfig::default()
        })
    }

    fn ask_action(&mut self, view: &BattleSnapshot, member: usize) -> io::Result<PartyAction> {
        let Some(me) = view.party.get(member) else {
            return Ok(PartyAction::Pass);
        };

        writeln!(self.output, "\n{}'s turn:", me.name)?;
        writeln!(self.output, "1. Attack")?;
        writeln!(self.output, "2. Ability")?;
        writeln!(self.output, "3. Item")?;

        match self.ask("Choose an action: ")?.as_str() {
            "2" => {
                writeln!(self.output, "Abilities:")?;
                for (i, ability) in me.abilities.iter().enumerate() {
                    writeln!(self.output, "{}. {} ({} MP)", i + 1, ability.name, ability.cost)?;
                }
                let index = menu_index(&self.ask("Choose an ability: ")?);
                let supportive = me
                    .abilities
                    .get(index)
                    .is_some_and(|ability| ability.is_supportive());
                let target = if supportive {
                    self.ask_ally(view, member)?
                } else {
                    None
                };
                Ok(PartyAction::Ability { index, target })
            }
            "3" => {
                writeln!(self.output, "Items:")?;
                for (i, item) in me.items.iter().enumerate() {
                    writeln!(self.output, "{}. {}", i + 1, item.name())?;
                }
                let index = menu_index(&self.ask("Choose an item: ")?);
                let target = self.ask_ally(view, member)?;
                Ok(PartyAction::Item { index, target })
            }
            _ => Ok(PartyAction::Attack),
        }
    }

    /// Asks which ally receives a supportive action; blank means the actor.
    fn ask_ally(&mut self, view: &BattleSnapshot, member: usize) -> io::Result<Option<usize>> {
        if view.party.len() < 2 {
            return Ok(None);
        }
        writeln!(self.output, "Targets:")?;
        for (i, ally) in view.party.iter().enumerate() {
            writeln!(self.output, "{}. {ally}", i + 1)?;
        }
        let answer = self.ask("Choose a target (Enter for yourself): ")?;
        if answer.is_empty() {
            return Ok(None);
        }
        let target = menu_index(&answer);
        Ok((target != member).then_some(target))
    }
}

impl<R: BufRead, W: Write> PartyController for Prompter<R, W> {
    fn choose_action(&mut self, view: &BattleSnapshot, member: usize) -> PartyAction {
        self.ask_action(view, member).unwrap_or_else(|err| {
            warn!(%err, "failed to read action, attacking");
            PartyAction::Attack
        })
    }
}
