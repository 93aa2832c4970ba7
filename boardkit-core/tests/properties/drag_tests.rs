//! Property-based tests for drag/drop reconciliation
//!
//! The UI may fire several drop callbacks for one gesture (overlapping drop
//! zones, nested containers). These tests check that each gesture changes
//! the tree at most once.

use std::time::{Duration, Instant};

use boardkit_core::layout::{
    BlockId, BlockSpec, ContainerId, DragReconciler, DropOutcome, DropTarget, DropZoneConfig,
    LayoutStore, calculate_indicator_y, calculate_insertion_index,
};
use proptest::prelude::*;

/// Builds a store with one split root, a block in the first half
fn split_store() -> (LayoutStore, [ContainerId; 2], BlockId) {
    let mut store = LayoutStore::new("Page");
    let root = store.roots()[0].id;
    let halves = store.split_container(root).unwrap();
    let block = store.add_block(BlockSpec::paragraph("drag me"), halves[0]).unwrap();
    (store, halves, block)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Repeated callbacks inside the claim window apply exactly once
    #[test]
    fn at_most_one_claim_per_gesture(
        callbacks in 1usize..8,
        offsets in proptest::collection::vec(0u64..400, 8),
        to_parent in any::<bool>(),
    ) {
        let (mut store, [left, right], block) = split_store();
        let root = store.roots()[0].id;
        let mut drag = DragReconciler::new(Duration::from_millis(500));
        let start = Instant::now();
        let key = drag.start_block_drag(block, left, 0, start).unwrap();

        // Dropping on the split root resolves to its first leaf
        let target = if to_parent { DropTarget::append(root) } else { DropTarget::append(right) };
        let outcomes: Vec<_> = offsets[..callbacks]
            .iter()
            .map(|ms| drag.handle_drop(&mut store, key, target, start + Duration::from_millis(*ms)))
            .collect();

        prop_assert_eq!(outcomes.iter().filter(|o| o.is_applied()).count(), 1);
        prop_assert!(outcomes[1..].iter().all(|o| *o == DropOutcome::Duplicate));
        prop_assert_eq!(store.block_count(), 1);

        let expected = if to_parent { left } else { right };
        prop_assert_eq!(store.find_block(block).unwrap().container_id, expected);

        drag.end_drag(key);
        prop_assert!(drag.hover().is_clear());
        prop_assert_eq!(drag.in_flight_count(), 0);
    }

    /// Independent palette gestures each create one block
    #[test]
    fn palette_gestures_are_independent(gestures in 1usize..6, repeats in 1usize..4) {
        let (mut store, [_, right], _) = split_store();
        let mut drag = DragReconciler::default();
        let now = Instant::now();

        for _ in 0..gestures {
            let key = drag.start_palette_drag(BlockSpec::paragraph("new"), now).unwrap();
            for _ in 0..repeats {
                drag.handle_drop(&mut store, key, DropTarget::append(right), now);
            }
            drag.end_drag(key);
        }
        prop_assert_eq!(store.block_count(), 1 + gestures);
        prop_assert_eq!(store.find_container(right).unwrap().blocks().len(), gestures);
    }

    /// The insertion index is always a valid position
    #[test]
    fn insertion_index_is_in_range(y in -100.0f64..2_000.0, count in 0usize..30) {
        let config = DropZoneConfig::default();
        let index = calculate_insertion_index(y, count, &config);
        prop_assert!(index <= count);
        prop_assert!(calculate_indicator_y(index, &config) >= 0.0);
    }
}
