//! Property-based tests for document serialization and validation

use boardkit_core::document::{DocumentError, DocumentRecord, LayoutDocument, ValidationError};
use boardkit_core::layout::{ContainerRecord, LayoutStore};
use proptest::prelude::*;

use super::layout_tests::{apply_operation, store_operations_strategy};

/// Finds the first split record in document order
fn first_split(records: &mut [ContainerRecord]) -> Option<&mut ContainerRecord> {
    for record in records {
        if record.is_split {
            return Some(record);
        }
        if let Some(found) = first_split(&mut record.split_areas) {
            return Some(found);
        }
    }
    None
}

fn record_of(store: &LayoutStore) -> DocumentRecord {
    let json = serde_json::to_string(&store.to_document()).unwrap();
    serde_json::from_str(&json).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Saved documents load back unchanged, in both formats
    #[test]
    fn documents_survive_json_and_yaml(ops in store_operations_strategy(30), publish in any::<bool>()) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            apply_operation(&mut store, op);
        }
        if publish {
            store.publish();
        }
        let document = store.to_document();

        let from_json = LayoutDocument::from_json(&document.to_json().unwrap()).unwrap();
        prop_assert_eq!(&from_json, &document);
        let from_yaml = LayoutDocument::from_yaml(&document.to_yaml().unwrap()).unwrap();
        prop_assert_eq!(&from_yaml, &document);

        let reloaded = LayoutStore::from_document(from_json, store.limits());
        prop_assert_eq!(reloaded.roots(), store.roots());
    }

    /// Dropping a child of any split node is rejected, never loaded partially
    #[test]
    fn truncated_split_is_rejected(ops in store_operations_strategy(30)) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            apply_operation(&mut store, op);
        }
        let mut record = record_of(&store);
        let Some(split) = first_split(&mut record.containers) else {
            return Ok(());
        };
        split.split_areas.pop();
        let id = split.id;

        let result = LayoutDocument::from_record(record);
        prop_assert_eq!(
            result,
            Err(DocumentError::Invalid(ValidationError::SplitArity { id, found: 1 }))
        );
    }

    /// A wrong split level anywhere below the roots is rejected
    #[test]
    fn wrong_child_level_is_rejected(ops in store_operations_strategy(30), bump in 1u32..4) {
        let mut store = LayoutStore::new("Page");
        for op in &ops {
            apply_operation(&mut store, op);
        }
        let mut record = record_of(&store);
        let Some(split) = first_split(&mut record.containers) else {
            return Ok(());
        };
        let expected = split.split_level + 1;
        split.split_areas[1].split_level += bump;
        let child = split.split_areas[1].id;

        prop_assert_eq!(
            LayoutDocument::from_record(record),
            Err(DocumentError::Invalid(ValidationError::SplitLevelMismatch {
                id: child,
                expected,
                found: expected + bump,
            }))
        );
    }
}
