//! Property tests over random rosters and draw orders.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use giftdraw::core::{is_derangement, validate_roster, Roster};
use giftdraw::store::{MemoryStore, Store};
use giftdraw::{DrawEngine, DrawOutcome, DrawStrategy, EngineConfig};
use giftdraw_testkit::generators::{rng_seed, roster_with_order};

fn run_draws(
    roster: Roster,
    order: &[usize],
    strategy: DrawStrategy,
    seed: u64,
) -> (Vec<DrawOutcome>, Roster) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    runtime.block_on(async {
        let names: Vec<String> = roster.iter().map(|p| p.display_name.clone()).collect();
        let engine = DrawEngine::with_rng(
            MemoryStore::new(roster),
            EngineConfig {
                strategy,
                ..EngineConfig::default()
            },
            StdRng::seed_from_u64(seed),
        );

        let mut outcomes = Vec::new();
        for &i in order {
            outcomes.push(engine.draw(&names[i]).await.unwrap());
        }
        (outcomes, engine.store().load().await.unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_uniform_never_breaks_invariants(
        (roster, order) in roster_with_order(1, 10),
        seed in rng_seed(),
    ) {
        let (outcomes, roster) = run_draws(roster, &order, DrawStrategy::Uniform, seed);

        prop_assert!(validate_roster(&roster).is_ok());
        for outcome in &outcomes {
            prop_assert_ne!(outcome.target(), Some(outcome.drawer()));
        }
        // Only the final drawer can be stranded.
        let stranded = outcomes
            .iter()
            .filter(|o| matches!(o, DrawOutcome::NoCandidates { .. }))
            .count();
        prop_assert!(stranded <= 1);
    }

    #[test]
    fn test_reserve_last_slot_always_completes(
        (roster, order) in roster_with_order(2, 10),
        seed in rng_seed(),
    ) {
        let (outcomes, roster) = run_draws(roster, &order, DrawStrategy::ReserveLastSlot, seed);

        for outcome in &outcomes {
            let is_assigned = matches!(outcome, DrawOutcome::Assigned { .. });
            prop_assert!(is_assigned);
        }
        prop_assert!(is_derangement(&roster));
    }

    #[test]
    fn test_second_pass_only_replays(
        (roster, order) in roster_with_order(2, 8),
        seed in rng_seed(),
    ) {
        let mut doubled = order.clone();
        doubled.extend(order.iter().copied());

        let (outcomes, _) = run_draws(roster, &doubled, DrawStrategy::ReserveLastSlot, seed);
        let (first, second) = outcomes.split_at(order.len());
        for (a, b) in first.iter().zip(second) {
            prop_assert_eq!(a.target(), b.target());
            let is_replay = matches!(b, DrawOutcome::AlreadyDrawn { .. });
            prop_assert!(is_replay);
        }
    }
}
