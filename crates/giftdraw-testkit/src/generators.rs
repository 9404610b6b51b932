//! Proptest generators for property-based testing.

use proptest::prelude::*;

use giftdraw_core::Roster;

/// Generate a display name.
pub fn display_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,8}".prop_map(String::from)
}

/// Generate a pristine roster of `min..=max` distinct names.
pub fn roster(min: usize, max: usize) -> impl Strategy<Value = Roster> {
    prop::collection::btree_set(display_name(), min..=max).prop_map(Roster::from_names)
}

/// Generate a roster plus a permutation of its positions, as a draw order.
pub fn roster_with_order(min: usize, max: usize) -> impl Strategy<Value = (Roster, Vec<usize>)> {
    roster(min, max).prop_flat_map(|roster| {
        let order: Vec<usize> = (0..roster.len()).collect();
        (Just(roster), Just(order).prop_shuffle())
    })
}

/// Generate a random seed for a deterministic rng.
pub fn rng_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftdraw_core::validate_roster;

    proptest! {
        #[test]
        fn test_generated_rosters_are_valid(roster in roster(1, 12)) {
            prop_assert!(validate_roster(&roster).is_ok());
            prop_assert!(roster.iter().all(|p| p.is_pristine()));
        }

        #[test]
        fn test_order_is_a_permutation((roster, order) in roster_with_order(1, 12)) {
            let mut sorted = order.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..roster.len()).collect::<Vec<_>>());
        }
    }
}
