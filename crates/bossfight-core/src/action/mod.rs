//! Action catalog: abilities and consumable items.
//!
//! - [`Ability`]: an immutable, resource-costed action shared by every
//!   entity of an archetype
//! - [`Item`]: a single-use consumable held in an entity's inventory
//!
//! Every action validates the user and its target before touching any
//! state. A refused action returns an
//! [`ActionError`](crate::error::ActionError) and leaves resource, hp,
//! inventory and effects exactly as they were.

mod ability;
mod item;

pub use ability::{Ability, AbilityKind};
pub use item::Item;

/// Scales an attribute by a multiplier, rounding down.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn scale(stat: u32, multiplier: f64) -> u32 {
    (f64::from(stat) * multiplier).floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_rounds_down() {
        assert_eq!(scale(15, 2.0), 30);
        assert_eq!(scale(17, 1.5), 25);
        assert_eq!(scale(23, 1.2), 27);
        assert_eq!(scale(0, 2.5), 0);
    }
}
