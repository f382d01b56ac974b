//! Injectable randomness for every variance roll in a battle.
//!
//! All random draws (damage variance, critical checks, initiative, boss
//! target selection and phase ability checks) go through the [`Dice`] trait.
//! A [`Battle`](crate::battle::Battle) owns one boxed `Dice` supplied at
//! construction, so tests can swap in a [`ScriptedDice`] and get exactly the
//! sequence they expect.
//!
//! # Example
//!
//! ```
//! use bossfight_core::dice::{Dice, RngDice};
//!
//! let mut a = RngDice::seeded(42);
//! let mut b = RngDice::seeded(42);
//! assert_eq!(a.roll(1, 10), b.roll(1, 10));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of random draws used by the battle engine.
pub trait Dice {
    /// Rolls a uniformly distributed integer in `low..=high`.
    fn roll(&mut self, low: u32, high: u32) -> u32;

    /// Returns `true` with the given probability (`0.0..=1.0`).
    fn chance(&mut self, probability: f64) -> bool;

    /// Picks a uniformly distributed index in `0..len`.
    ///
    /// `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

// =============================================================================
// RngDice
// =============================================================================

/// [`Dice`] backed by any [`rand::Rng`].
///
/// Defaults to [`ChaCha8Rng`] so a seed reproduces a whole battle.
#[derive(Debug, Clone)]
pub struct RngDice<R = ChaCha8Rng> {
    rng: R,
}

impl RngDice<ChaCha8Rng> {
    /// Creates dice from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates dice seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RngDice<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

// =============================================================================
// ScriptedDice
// =============================================================================

/// [`Dice`] that replays queued values.
///
/// Each kind of draw has its own queue. Once a queue is empty, rolls return
/// their low bound, checks fail and picks return index 0. Scripted rolls are
/// clamped into the requested range.
///
/// # Example
///
/// ```
/// use bossfight_core::dice::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new().with_rolls([3, 99]).with_chances([true]);
/// assert_eq!(dice.roll(1, 5), 3);
/// assert_eq!(dice.roll(1, 5), 5); // clamped
/// assert!(dice.chance(0.2));
/// assert!(!dice.chance(0.2)); // exhausted
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    chances: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    /// Creates dice with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends values to the roll queue.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Appends outcomes to the probability-check queue.
    #[must_use]
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    /// Appends indices to the pick queue.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Number of queued values not yet consumed, across all queues.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len() + self.chances.len() + self.picks.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        self.rolls
            .pop_front()
            .map_or(low, |value| value.clamp(low, high.max(low)))
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn pick(&mut self, len: usize) -> usize {
        match self.picks.pop_front() {
            Some(index) if len > 0 => index % len,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_are_reproducible() {
        let mut a = RngDice::seeded(7);
        let mut b = RngDice::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.roll(1, 10), b.roll(1, 10));
            assert_eq!(a.chance(0.5), b.chance(0.5));
            assert_eq!(a.pick(3), b.pick(3));
        }
    }

    #[test]
    fn rng_rolls_stay_in_range() {
        let mut dice = RngDice::seeded(1);
        for _ in 0..200 {
            let value = dice.roll(5, 15);
            assert!((5..=15).contains(&value));
            assert!(dice.pick(4) < 4);
        }
    }

    #[test]
    fn degenerate_ranges_do_not_panic() {
        let mut dice = RngDice::seeded(1);
        assert_eq!(dice.roll(4, 4), 4);
        assert_eq!(dice.pick(0), 0);
        assert_eq!(dice.pick(1), 0);
        assert!(!dice.chance(-1.0));
        assert!(dice.chance(2.0));
    }

    #[test]
    fn scripted_dice_replay_in_order() {
        let mut dice = ScriptedDice::new()
            .with_rolls([2, 8])
            .with_chances([true, false])
            .with_picks([1]);
        assert_eq!(dice.remaining(), 5);
        assert_eq!(dice.roll(1, 10), 2);
        assert_eq!(dice.roll(1, 10), 8);
        assert!(dice.chance(0.1));
        assert!(!dice.chance(0.9));
        assert_eq!(dice.pick(3), 1);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn exhausted_scripted_dice_fall_back() {
        let mut dice = ScriptedDice::new();
        assert_eq!(dice.roll(5, 15), 5);
        assert!(!dice.chance(1.0));
        assert_eq!(dice.pick(3), 0);
    }

    #[test]
    fn scripted_picks_wrap_to_length() {
        let mut dice = ScriptedDice::new().with_picks([5]);
        assert_eq!(dice.pick(3), 2);
    }
}
