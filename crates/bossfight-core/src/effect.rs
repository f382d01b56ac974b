//! Timed status effects attached to a single entity.
//!
//! Effects are ticked once at the start of their owner's turn, in the order
//! they were applied. Each tick decrements the remaining duration; the tick
//! that brings duration to zero still runs its mutation, after which the
//! owner removes the effect.
//!
//! A shield's absorption pool is independent of its duration: it may be
//! drained before it expires, or expire with capacity left over.

use serde::Serialize;

/// What an effect does while active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EffectKind {
    /// Damages the owner on every tick.
    Poison {
        /// Damage per tick.
        damage_per_tick: u32,
    },
    /// Absorbs incoming damage until the pool is empty.
    Shield {
        /// Pool size when applied.
        capacity: u32,
        /// Pool left.
        remaining: u32,
    },
    /// Has no per-tick mutation; only expires.
    Generic {
        /// Display name.
        label: &'static str,
    },
}

/// A timed modifier owned by one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Effect {
    kind: EffectKind,
    duration: u32,
}

impl Effect {
    /// Damage-over-time effect.
    #[must_use]
    pub fn poison(duration: u32, damage_per_tick: u32) -> Self {
        Self {
            kind: EffectKind::Poison { damage_per_tick },
            duration,
        }
    }

    /// Damage-absorption shield.
    #[must_use]
    pub fn shield(duration: u32, capacity: u32) -> Self {
        Self {
            kind: EffectKind::Shield {
                capacity,
                remaining: capacity,
            },
            duration,
        }
    }

    /// Marker effect with no per-tick behaviour.
    #[must_use]
    pub fn generic(label: &'static str, duration: u32) -> Self {
        Self {
            kind: EffectKind::Generic { label },
            duration,
        }
    }

    /// Display name of the effect.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.kind {
            EffectKind::Poison { .. } => "Poison",
            EffectKind::Shield { .. } => "Shield",
            EffectKind::Generic { label } => label,
        }
    }

    /// The effect's kind and parameters.
    #[must_use]
    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    /// Turns left.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Returns `true` once duration has run out.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.duration == 0
    }

    /// Absorption left, for shields.
    #[must_use]
    pub fn shield_remaining(&self) -> Option<u32> {
        match self.kind {
            EffectKind::Shield { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    /// Advances the effect by one turn.
    ///
    /// Returns the damage the owner should take from this tick, if any.
    pub(crate) fn tick(&mut self) -> Option<u32> {
        self.duration = self.duration.saturating_sub(1);
        match self.kind {
            EffectKind::Poison { damage_per_tick } => Some(damage_per_tick),
            EffectKind::Shield { .. } | EffectKind::Generic { .. } => None,
        }
    }

    /// Offers incoming damage to the effect and returns what gets through.
    ///
    /// Only shields absorb; other kinds pass damage through untouched.
    pub(crate) fn absorb(&mut self, damage: u32) -> u32 {
        match &mut self.kind {
            EffectKind::Shield { remaining, .. } => {
                let soaked = damage.min(*remaining);
                *remaining -= soaked;
                damage - soaked
            }
            _ => damage,
        }
    }
}
