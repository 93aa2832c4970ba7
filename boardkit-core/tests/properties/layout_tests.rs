//! Property-based tests for the container tree and layout store
//!
//! Random sequences of store operations are applied and the structural
//! invariants of the tree are checked after every step.

use boardkit_core::layout::{
    BlockSpec, Container, ContainerRecord, LayoutStore, SplitLimits, filter_non_empty_roots,
    leaf_ids, walk,
};
use proptest::prelude::*;

// ============================================================================
// Test Strategies
// ============================================================================

/// An operation against the store, with indices resolved modulo the
/// current number of leaves or blocks
#[derive(Debug, Clone)]
pub(super) enum StoreOperation {
    Split { leaf: usize },
    Merge { leaf: usize },
    AddBlock { leaf: usize, text: String },
    MoveBlock { block: usize, leaf: usize, index: Option<usize> },
    RemoveBlock { block: usize },
    AddRoot,
}

fn store_operation_strategy() -> impl Strategy<Value = StoreOperation> {
    prop_oneof![
        (0usize..16).prop_map(|leaf| StoreOperation::Split { leaf }),
        (0usize..16).prop_map(|leaf| StoreOperation::Merge { leaf }),
        (0usize..16, "[a-z]{1,12}").prop_map(|(leaf, text)| StoreOperation::AddBlock { leaf, text }),
        (0usize..16, 0usize..16, proptest::option::of(0usize..8))
            .prop_map(|(block, leaf, index)| StoreOperation::MoveBlock { block, leaf, index }),
        (0usize..16).prop_map(|block| StoreOperation::RemoveBlock { block }),
        Just(StoreOperation::AddRoot),
    ]
}

pub(super) fn store_operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<StoreOperation>> {
    proptest::collection::vec(store_operation_strategy(), 0..=max_ops)
}

/// Applies an operation, ignoring rejections
pub(super) fn apply_operation(store: &mut LayoutStore, op: &StoreOperation) {
    let leaves = leaf_ids(store.roots());
    let blocks: Vec<_> = walk(store.roots())
        .flat_map(|c| c.blocks().iter().map(|b| (b.id, b.drop_area_id)))
        .collect();
    match op {
        StoreOperation::Split { leaf } => {
            let _ = store.split_container(leaves[leaf % leaves.len()]);
        }
        StoreOperation::Merge { leaf } => {
            let id = leaves[leaf % leaves.len()];
            let sibling = walk(store.roots())
                .filter_map(Container::children)
                .find(|pair| pair[0].id == id || pair[1].id == id)
                .map(|pair| if pair[0].id == id { pair[1].id } else { pair[0].id });
            if let Some(sibling) = sibling {
                let _ = store.merge_containers(id, sibling);
            }
        }
        StoreOperation::AddBlock { leaf, text } => {
            let _ = store.add_block(BlockSpec::paragraph(text.clone()), leaves[leaf % leaves.len()]);
        }
        StoreOperation::MoveBlock { block, leaf, index } => {
            if !blocks.is_empty() {
                let (block_id, source) = blocks[block % blocks.len()];
                let _ = store.move_block(block_id, source, leaves[leaf % leaves.len()], *index);
            }
        }
        StoreOperation::RemoveBlock { block } => {
            if !blocks.is_empty() {
                let _ = store.remove_block(blocks[block % blocks.len()].0);
            }
        }
        StoreOperation::AddRoot => {
            store.add_root_container();
        }
    }
}

/// Checks every structural invariant of a tree
fn assert_well_formed(roots: &[Container], limits: SplitLimits) {
    assert!(!roots.is_empty(), "document must keep at least one root");
    for root in roots {
        assert_eq!(root.split_level, 0);
        assert_eq!(root.parent_id, None);
    }
    let mut container_ids = std::collections::HashSet::new();
    let mut block_ids = std::collections::HashSet::new();
    for container in walk(roots) {
        assert!(container_ids.insert(container.id), "duplicate container id");
        assert!(container.split_level <= limits.structural_max());
        if let Some(children) = container.children() {
            assert!(container.blocks().is_empty());
            for child in children {
                assert_eq!(child.parent_id, Some(container.id));
                assert_eq!(child.split_level, container.split_level + 1);
            }
        }
        for block in container.blocks() {
            assert_eq!(block.drop_area_id, container.id, "orphaned block");
            assert!(block_ids.insert(block.id), "duplicate block id");
        }
    }
}

/// Counts records whose split arity is wrong
fn bad_arity(record: &ContainerRecord) -> usize {
    let own = usize::from(if record.is_split {
        record.split_areas.len() != 2 || !record.blocks.is_empty()
    } else {
        !record.split_areas.is_empty()
    });
    own + record.split_areas.iter().map(bad_arity).sum::<usize>()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Any sequence of operations keeps the tree well formed
    #[test]
    fn operations_preserve_invariants(ops in store_operations_strategy(40)) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            apply_operation(&mut store, op);
            assert_well_formed(store.roots(), store.limits());
        }
    }

    /// Serialized records always have split arity two
    #[test]
    fn records_have_binary_splits(ops in store_operations_strategy(30)) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            apply_operation(&mut store, op);
        }
        for root in store.roots() {
            prop_assert_eq!(bad_arity(&ContainerRecord::from(root.clone())), 0);
        }
    }

    /// Merging the children of a fresh split restores the leaf
    #[test]
    fn split_then_merge_is_identity(
        ops in store_operations_strategy(20),
        pick in 0usize..16,
    ) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            apply_operation(&mut store, op);
        }
        let leaves = leaf_ids(store.roots());
        let leaf = leaves[pick % leaves.len()];
        let before = store.roots().to_vec();

        if let Ok([a, b]) = store.split_container(leaf) {
            let restored = store.merge_containers(a, b).unwrap();
            prop_assert_eq!(restored, leaf);
            prop_assert_eq!(store.roots(), before.as_slice());
        }
    }

    /// Merge accepts its arguments in either order
    #[test]
    fn merge_is_symmetric(text in "[a-z]{1,8}", swap in any::<bool>(), fill_first in any::<bool>()) {
        let mut left = LayoutStore::new("Page");
        let root = left.roots()[0].id;
        let [a, b] = left.split_container(root).unwrap();
        let filled = if fill_first { a } else { b };
        left.add_block(BlockSpec::paragraph(text), filled).unwrap();
        let mut right = left.clone();

        let (x, y) = if swap { (b, a) } else { (a, b) };
        prop_assert_eq!(left.merge_containers(x, y).unwrap(), root);
        prop_assert_eq!(right.merge_containers(y, x).unwrap(), root);
        prop_assert_eq!(left.roots(), right.roots());
    }

    /// Moves never create or lose blocks
    #[test]
    fn moves_conserve_blocks(ops in store_operations_strategy(40)) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            let before = store.block_count();
            apply_operation(&mut store, op);
            let after = store.block_count();
            match op {
                StoreOperation::MoveBlock { .. }
                | StoreOperation::Split { .. }
                | StoreOperation::Merge { .. }
                | StoreOperation::AddRoot => prop_assert_eq!(before, after),
                StoreOperation::AddBlock { .. } => prop_assert!(after == before || after == before + 1),
                StoreOperation::RemoveBlock { .. } => prop_assert!(after == before || after + 1 == before),
            }
        }
    }

    /// Filtering empty roots is idempotent and keeps only non-empty roots
    #[test]
    fn filter_non_empty_roots_is_idempotent(ops in store_operations_strategy(30)) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            apply_operation(&mut store, op);
        }
        let once = filter_non_empty_roots(store.roots());
        let twice = filter_non_empty_roots(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.iter().all(|root| !root.is_empty()));
        prop_assert_eq!(
            once.len(),
            store.roots().iter().filter(|root| !root.is_empty()).count()
        );
    }

    /// Rejected mutations leave the tree unchanged
    #[test]
    fn rejected_splits_do_not_mutate(ops in store_operations_strategy(30)) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            apply_operation(&mut store, op);
        }
        let splits: Vec<_> = walk(store.roots()).filter(|c| c.is_split()).map(|c| c.id).collect();
        for id in splits {
            let before = store.roots().to_vec();
            let revision = store.revision();
            prop_assert!(store.split_container(id).is_err());
            prop_assert_eq!(store.roots(), before.as_slice());
            prop_assert_eq!(store.revision(), revision);
        }
    }
}
