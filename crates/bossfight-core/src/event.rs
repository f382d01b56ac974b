//! Structured results of battle actions.
//!
//! Every mutation the engine performs is reported as an [`Event`]. Actions
//! return an [`Outcome`]: the events they produced plus the headline number
//! (damage dealt, hp healed, resource restored). Text is only produced at the
//! presentation boundary through the `Display` impls.
//!
//! # Example
//!
//! ```
//! use bossfight_core::event::{Event, Outcome};
//!
//! let mut outcome = Outcome::new(18);
//! outcome.push(Event::Damaged { target: "Boss".into(), amount: 18, hp: 32 });
//!
//! assert_eq!(outcome.amount(), 18);
//! assert_eq!(outcome.to_string(), "Boss takes 18 damage. HP: 32");
//! ```

use std::fmt;

use serde::Serialize;

use crate::boss::Phase;

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Event {
    /// Hp was removed from a combatant.
    Damaged {
        /// Who took the damage.
        target: String,
        /// Hp actually removed.
        amount: u32,
        /// Hp after the hit.
        hp: u32,
    },
    /// Shields soaked up part or all of a hit.
    Absorbed {
        /// Who was shielded.
        target: String,
        /// Damage absorbed by shields.
        amount: u32,
    },
    /// A combatant's hp reached zero.
    Died {
        /// Who died.
        target: String,
    },
    /// Hp was restored.
    Healed {
        /// Who was healed.
        target: String,
        /// Hp actually restored.
        amount: u32,
    },
    /// Resource was restored by an item.
    ResourceRestored {
        /// Who gained resource.
        target: String,
        /// Resource actually restored.
        amount: u32,
    },
    /// End-of-turn resource regeneration.
    Regenerated {
        /// Who regenerated.
        target: String,
        /// Resource actually regenerated.
        amount: u32,
    },
    /// A basic attack rolled a critical hit.
    CriticalHit {
        /// The attacker.
        attacker: String,
    },
    /// An ability was invoked.
    AbilityUsed {
        /// The user.
        user: String,
        /// Ability name.
        ability: &'static str,
    },
    /// A consumable was used.
    ItemUsed {
        /// The user.
        user: String,
        /// Item name.
        item: &'static str,
    },
    /// A timed effect was attached.
    EffectApplied {
        /// Effect owner.
        target: String,
        /// Effect name.
        effect: &'static str,
    },
    /// A damage-over-time effect ticked.
    EffectTicked {
        /// Effect owner.
        target: String,
        /// Effect name.
        effect: &'static str,
        /// Damage carried by the tick.
        magnitude: u32,
    },
    /// A timed effect ran out and was removed.
    EffectExpired {
        /// Effect owner.
        target: String,
        /// Effect name.
        effect: &'static str,
    },
    /// The boss moved to a different phase.
    PhaseShift {
        /// Previous phase.
        from: Phase,
        /// New phase.
        to: Phase,
    },
    /// The boss unleashed an area attack.
    Sweep {
        /// Name of the area attack.
        ability: &'static str,
    },
    /// The boss singled out the weakest opponent.
    TargetedWeakest {
        /// The chosen opponent.
        target: String,
    },
    /// A party member let the turn go by.
    Passed {
        /// Who passed.
        actor: String,
    },
    /// The boss had nobody left to fight.
    BossIdle {
        /// The boss.
        boss: String,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Damaged { target, amount, hp } => {
                write!(f, "{target} takes {amount} damage. HP: {hp}")
            }
            Self::Absorbed { target, amount } => {
                write!(f, "{target}'s shield absorbs {amount} damage")
            }
            Self::Died { target } => write!(f, "{target} has died!"),
            Self::Healed { target, amount } => write!(f, "{target} heals {amount} HP"),
            Self::ResourceRestored { target, amount } => {
                write!(f, "{target} restores {amount} MP")
            }
            Self::Regenerated { target, amount } => {
                write!(f, "{target} regenerates {amount} MP")
            }
            Self::CriticalHit { attacker } => write!(f, "CRITICAL! {attacker} strikes hard"),
            Self::AbilityUsed { user, ability } => write!(f, "{user} uses {ability}!"),
            Self::ItemUsed { user, item } => write!(f, "{user} uses {item}"),
            Self::EffectApplied { target, effect } => {
                write!(f, "{target} is affected by {effect}!")
            }
            Self::EffectTicked {
                target,
                effect,
                magnitude,
            } => write!(f, "{effect} deals {magnitude} damage to {target}"),
            Self::EffectExpired { target, effect } => {
                write!(f, "{effect} wears off {target}")
            }
            Self::PhaseShift { from, to } => write!(f, "The boss shifts from {from} to {to}!"),
            Self::Sweep { ability } => write!(f, "The boss unleashes {ability}!"),
            Self::TargetedWeakest { target } => {
                write!(f, "The boss turns on the weakest: {target}!")
            }
            Self::Passed { actor } => write!(f, "{actor} skips the turn"),
            Self::BossIdle { boss } => write!(f, "{boss} has already won!"),
        }
    }
}

/// Result of a successful action: a headline amount plus the events it caused.
///
/// The amount's meaning depends on the action: hp removed for damage, hp
/// restored for heals and potions, resource restored for mana potions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    amount: u32,
    events: Vec<Event>,
}

impl Outcome {
    /// Creates an outcome with the given amount and no events.
    #[must_use]
    pub fn new(amount: u32) -> Self {
        Self {
            amount,
            events: Vec::new(),
        }
    }

    /// Creates an outcome holding a single event.
    #[must_use]
    pub fn from_event(amount: u32, event: Event) -> Self {
        Self {
            amount,
            events: vec![event],
        }
    }

    /// The headline number of this outcome.
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Events in the order they happened.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the outcome, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Returns `true` if no events were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Records an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Appends another outcome, summing amounts.
    pub fn append(&mut self, other: Outcome) {
        self.amount += other.amount;
        self.events.extend(other.events);
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.events)
    }
}

/// Writes events one per line, without a trailing newline.
pub(crate) fn write_lines(f: &mut fmt::Formatter<'_>, events: &[Event]) -> fmt::Result {
    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{event}")?;
    }
    Ok(())
}
