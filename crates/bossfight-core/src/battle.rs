//! Battle scheduler: initiative, turn resolution and termination.
//!
//! A [`Battle`] drives rounds in three steps:
//!
//! 1. **INITIATIVE**: every living participant rolls `agility + 1d10`; the
//!    order is a stable descending sort, so ties keep party order with the
//!    boss last
//! 2. **TURNS**: each participant, in order, ticks its effects and then acts.
//!    Party actions come from the caller; the boss decides for itself
//! 3. **TERMINATION**: checked after every single turn, so a kill ends the
//!    battle mid-round. A dead boss wins over a dead party
//!
//! Party members regenerate [`RESOURCE_REGEN`] resource at the end of each of
//! their turns while alive, whether or not their action went through. The
//! boss never regenerates.
//!
//! # Example
//!
//! ```
//! use bossfight_core::battle::{Battle, BattleStatus};
//! use bossfight_core::boss::Boss;
//! use bossfight_core::controller::AutoPilot;
//! use bossfight_core::dice::RngDice;
//! use bossfight_core::entity::{Archetype, Entity};
//!
//! let party = vec![
//!     Entity::new("Brakka", Archetype::Warrior, 1),
//!     Entity::new("Mira", Archetype::Mage, 1),
//!     Entity::new("Sela", Archetype::Healer, 1),
//! ];
//! let mut battle = Battle::new(party, Boss::new("Evil Boss", 3), Box::new(RngDice::seeded(7)))?;
//!
//! let status = battle.run(&mut AutoPilot::default(), 200);
//! assert_ne!(status, BattleStatus::Ongoing);
//! # Ok::<(), bossfight_core::error::SetupError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::boss::Boss;
use crate::config::BattleConfig;
use crate::controller::PartyController;
use crate::dice::{Dice, RngDice};
use crate::entity::{Entity, Target};
use crate::error::{ActionError, SetupError};
use crate::event::{write_lines, Event, Outcome};
use crate::snapshot::{BattleSnapshot, CombatantSnapshot};

/// Resource a party member regains at the end of each of its turns.
pub const RESOURCE_REGEN: u32 = 2;

/// Largest party a battle accepts.
pub const MAX_PARTY_SIZE: usize = 4;

// =============================================================================
// Identifiers and actions
// =============================================================================

/// A participant of the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CombatantId {
    /// Party member at this index.
    Party(usize),
    /// The boss.
    Boss,
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Party(index) => write!(f, "party:{index}"),
            Self::Boss => write!(f, "boss"),
        }
    }
}

/// What a party member does on its turn.
///
/// `target` on abilities and items is a party index and only matters for
/// supportive abilities and items; `None` means the acting member. Offensive
/// abilities always hit the boss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyAction {
    /// Basic attack on the boss.
    #[default]
    Attack,
    /// Ability at `index` of the member's ability table.
    Ability {
        /// Ability index.
        index: usize,
        /// Ally receiving a supportive ability.
        target: Option<usize>,
    },
    /// Item at `index` of the member's inventory.
    Item {
        /// Inventory index.
        index: usize,
        /// Ally receiving the item.
        target: Option<usize>,
    },
    /// Do nothing.
    Pass,
}

/// How the battle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BattleStatus {
    /// Both sides still have someone standing.
    Ongoing,
    /// The boss is dead.
    Victory,
    /// Every party member is dead.
    Defeat,
}

impl BattleStatus {
    /// Returns `true` once the battle has been decided.
    #[must_use]
    pub fn is_over(self) -> bool {
        self != Self::Ongoing
    }
}

// =============================================================================
// Reports
// =============================================================================

/// Everything that happened during one participant's turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    /// Who acted.
    pub actor: CombatantId,
    /// The actor's name.
    pub actor_name: String,
    /// Events in the order they happened.
    pub events: Vec<Event>,
    /// Why the chosen action was refused, if it was.
    pub rejection: Option<ActionError>,
}

impl TurnReport {
    fn new(actor: CombatantId, actor_name: &str) -> Self {
        Self {
            actor,
            actor_name: actor_name.to_owned(),
            events: Vec::new(),
            rejection: None,
        }
    }

    fn record(&mut self, result: Result<Outcome, ActionError>) {
        match result {
            Ok(outcome) => self.events.extend(outcome.into_events()),
            Err(err) => {
                debug!(actor = %self.actor, %err, "action rejected");
                self.rejection = Some(err);
            }
        }
    }

    /// Returns `true` if the chosen action went through.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.rejection.is_none()
    }
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.events)?;
        if let Some(rejection) = &self.rejection {
            if !self.events.is_empty() {
                writeln!(f)?;
            }
            write!(f, "{rejection}")?;
        }
        Ok(())
    }
}

/// Everything that happened during one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// Round number, starting at 1.
    pub round: u32,
    /// Initiative order rolled for the round.
    pub order: Vec<CombatantId>,
    /// Turns actually resolved, in order.
    pub turns: Vec<TurnReport>,
    /// Status after the last resolved turn.
    pub status: BattleStatus,
}

// =============================================================================
// Battle
// =============================================================================

/// A live encounter between a party and one boss.
pub struct Battle {
    party: Vec<Entity>,
    boss: Boss,
    round: u32,
    dice: Box<dyn Dice>,
}

impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battle")
            .field("party", &self.party)
            .field("boss", &self.boss)
            .field("round", &self.round)
            .field("dice", &"<dyn Dice>")
            .finish()
    }
}

impl Battle {
    /// Creates a battle at round 0.
    ///
    /// # Errors
    ///
    /// - [`SetupError::EmptyParty`] for an empty party
    /// - [`SetupError::PartyTooLarge`] for more than [`MAX_PARTY_SIZE`] members
    pub fn new(party: Vec<Entity>, boss: Boss, dice: Box<dyn Dice>) -> Result<Self, SetupError> {
        if party.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if party.len() > MAX_PARTY_SIZE {
            return Err(SetupError::PartyTooLarge {
                size: party.len(),
                max: MAX_PARTY_SIZE,
            });
        }
        Ok(Self {
            party,
            boss,
            round: 0,
            dice,
        })
    }

    /// Builds a battle from a config.
    ///
    /// A configured seed gives reproducible dice; otherwise dice are seeded
    /// from entropy.
    ///
    /// # Errors
    ///
    /// Whatever [`BattleConfig::validate`] or [`Battle::new`] refuses.
    pub fn from_config(config: &BattleConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let party = config
            .party
            .iter()
            .map(|member| Entity::new(member.name.clone(), member.archetype, config.party_level))
            .collect();
        let boss = Boss::new(config.boss_name.clone(), config.difficulty.boss_level());
        let dice: Box<dyn Dice> = match config.seed {
            Some(seed) => Box::new(RngDice::seeded(seed)),
            None => Box::new(RngDice::from_entropy()),
        };
        Self::new(party, boss, dice)
    }

    /// Party members in party order.
    #[must_use]
    pub fn party(&self) -> &[Entity] {
        &self.party
    }

    /// Mutable access to the party, for setup and tests.
    #[must_use]
    pub fn party_mut(&mut self) -> &mut [Entity] {
        &mut self.party
    }

    /// The boss.
    #[must_use]
    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    /// Mutable access to the boss, for setup and tests.
    #[must_use]
    pub fn boss_mut(&mut self) -> &mut Boss {
        &mut self.boss
    }

    /// The entity behind an id, if it exists.
    #[must_use]
    pub fn entity(&self, id: CombatantId) -> Option<&Entity> {
        match id {
            CombatantId::Party(index) => self.party.get(index),
            CombatantId::Boss => Some(self.boss.entity()),
        }
    }

    /// Rounds started so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Returns `true` while at least one party member is alive.
    #[must_use]
    pub fn is_party_alive(&self) -> bool {
        self.party.iter().any(Entity::is_alive)
    }

    /// Current standing. A dead boss is checked first.
    #[must_use]
    pub fn status(&self) -> BattleStatus {
        if !self.boss.is_alive() {
            BattleStatus::Victory
        } else if !self.is_party_alive() {
            BattleStatus::Defeat
        } else {
            BattleStatus::Ongoing
        }
    }

    /// Copies the current state for display or decisions.
    #[must_use]
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.round,
            party: self.party.iter().map(CombatantSnapshot::of).collect(),
            boss: CombatantSnapshot::of(self.boss.entity()),
            phase: self.boss.phase(),
        }
    }

    // -------------------------------------------------------------------------
    // Scheduling
    // -------------------------------------------------------------------------

    /// Rolls initiative for every living participant and sorts them.
    ///
    /// Party members roll first in party order, then the boss. The sort is
    /// stable and descending.
    pub fn compute_initiative_order(&mut self) -> Vec<CombatantId> {
        let dice = &mut *self.dice;
        let mut rolls: Vec<(CombatantId, u32)> = self
            .party
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_alive())
            .map(|(index, member)| (CombatantId::Party(index), member.initiative(dice)))
            .collect();
        if self.boss.is_alive() {
            rolls.push((CombatantId::Boss, self.boss.entity().initiative(dice)));
        }

        rolls.sort_by(|a, b| b.1.cmp(&a.1));
        debug!(?rolls, "initiative rolled");
        rolls.into_iter().map(|(id, _)| id).collect()
    }

    /// Starts the next round and returns its initiative order.
    pub fn begin_round(&mut self) -> Vec<CombatantId> {
        self.round += 1;
        debug!(round = self.round, "round started");
        self.compute_initiative_order()
    }

    /// Resolves one participant's turn.
    ///
    /// The boss ignores `action` and decides for itself.
    pub fn resolve_turn(&mut self, who: CombatantId, action: PartyAction) -> TurnReport {
        match who {
            CombatantId::Boss => self.resolve_boss_turn(),
            CombatantId::Party(index) => self.resolve_party_turn(index, action),
        }
    }

    /// Resolves the boss's turn: effect tick, then the boss policy.
    pub fn resolve_boss_turn(&mut self) -> TurnReport {
        let mut report = TurnReport::new(CombatantId::Boss, self.boss.entity().name());
        if !self.boss.is_alive() {
            report.record(self.boss.entity().ensure_alive().map(|()| Outcome::default()));
            return report;
        }

        report.record(Ok(self.boss.entity_mut().tick_effects()));
        if !self.boss.is_alive() {
            return report;
        }

        report.record(self.boss.act(&mut self.party, &mut *self.dice));
        report
    }

    fn resolve_party_turn(&mut self, index: usize, action: PartyAction) -> TurnReport {
        let who = CombatantId::Party(index);
        let Some(member) = self.party.get_mut(index) else {
            let mut report = TurnReport::new(who, "");
            report.record(Err(ActionError::NoSuchAlly { index }));
            return report;
        };

        let mut report = TurnReport::new(who, member.name());
        if !member.is_alive() {
            report.record(member.ensure_alive().map(|()| Outcome::default()));
            return report;
        }

        report.record(Ok(member.tick_effects()));
        if !member.is_alive() {
            return report;
        }

        debug!(actor = %who, ?action, "party action");
        report.record(self.perform(index, action));

        let member = &mut self.party[index];
        if member.is_alive() {
            let amount = member.restore_resource(RESOURCE_REGEN);
            if amount > 0 {
                report.events.push(Event::Regenerated {
                    target: member.name().to_owned(),
                    amount,
                });
            }
        }
        report
    }

    fn perform(&mut self, index: usize, action: PartyAction) -> Result<Outcome, ActionError> {
        let dice = &mut *self.dice;
        match action {
            PartyAction::Attack => self.party[index].basic_attack(self.boss.entity_mut(), dice),
            PartyAction::Ability {
                index: ability,
                target,
            } => {
                let ability = self.party[index]
                    .abilities()
                    .get(ability)
                    .copied()
                    .ok_or(ActionError::NoSuchAbility { index: ability })?;
                if ability.is_supportive() {
                    let (user, recipient) = ally_pair(&mut self.party, index, target)?;
                    ability.invoke(user, recipient, dice)
                } else {
                    ability.invoke(
                        &mut self.party[index],
                        Target::Other(self.boss.entity_mut()),
                        dice,
                    )
                }
            }
            PartyAction::Item {
                index: item,
                target,
            } => {
                let (user, recipient) = ally_pair(&mut self.party, index, target)?;
                user.use_item(item, recipient)
            }
            PartyAction::Pass => Ok(Outcome::from_event(
                0,
                Event::Passed {
                    actor: self.party[index].name().to_owned(),
                },
            )),
        }
    }

    // -------------------------------------------------------------------------
    // Driving
    // -------------------------------------------------------------------------

    /// Plays one full round.
    ///
    /// Participants that die before their slot comes up are skipped. The
    /// round stops as soon as the battle is decided.
    pub fn play_round(&mut self, controller: &mut dyn PartyController) -> RoundReport {
        let order = self.begin_round();
        let mut turns = Vec::with_capacity(order.len());

        for &who in &order {
            if !self.entity(who).is_some_and(Entity::is_alive) {
                continue;
            }
            let action = match who {
                CombatantId::Party(index) => controller.choose_action(&self.snapshot(), index),
                CombatantId::Boss => PartyAction::Pass,
            };
            turns.push(self.resolve_turn(who, action));

            if self.status().is_over() {
                break;
            }
        }

        let status = self.status();
        if status.is_over() {
            info!(round = self.round, ?status, "battle decided");
        }
        RoundReport {
            round: self.round,
            order,
            turns,
            status,
        }
    }

    /// Plays rounds until the battle is decided or `max_rounds` have started.
    pub fn run(&mut self, controller: &mut dyn PartyController, max_rounds: u32) -> BattleStatus {
        while self.status() == BattleStatus::Ongoing && self.round < max_rounds {
            self.play_round(controller);
        }
        self.status()
    }
}

/// Splits the party into the acting member and the recipient of a
/// supportive action.
fn ally_pair(
    party: &mut [Entity],
    user: usize,
    target: Option<usize>,
) -> Result<(&mut Entity, Target<'_>), ActionError> {
    match target {
        None => Ok((&mut party[user], Target::User)),
        Some(ally) if ally == user => Ok((&mut party[user], Target::User)),
        Some(ally) if ally >= party.len() => Err(ActionError::NoSuchAlly { index: ally }),
        Some(ally) if user < ally => {
            let (left, right) = party.split_at_mut(ally);
            Ok((&mut left[user], Target::Other(&mut right[0])))
        }
        Some(ally) => {
            let (left, right) = party.split_at_mut(user);
            Ok((&mut right[0], Target::Other(&mut left[ally])))
        }
    }
}
