//! Structural validation of persisted containers
//!
//! Records are checked top-down and turned into [`Container`]s in the same
//! pass. The first violation aborts the whole document.

use std::collections::HashSet;

use thiserror::Error;

use crate::layout::{Block, BlockId, Container, ContainerBody, ContainerId, ContainerRecord};

/// A persisted document that breaks a layout invariant
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Written by a newer version
    #[error("unsupported document version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },

    /// A split node without exactly two children
    #[error("split container {id} has {found} split areas, expected 2")]
    SplitArity {
        /// Offending container
        id: ContainerId,
        /// Number of children found
        found: usize,
    },

    /// A leaf that lists children
    #[error("container {id} is not split but has {found} split areas")]
    LeafWithChildren {
        /// Offending container
        id: ContainerId,
        /// Number of children found
        found: usize,
    },

    /// A split node that holds blocks
    #[error("split container {0} holds blocks")]
    BlocksOnSplitNode(ContainerId),

    /// A split level that does not follow from the tree shape
    #[error("container {id} has split level {found}, expected {expected}")]
    SplitLevelMismatch {
        /// Offending container
        id: ContainerId,
        /// Level implied by the tree
        expected: u32,
        /// Level in the document
        found: u32,
    },

    /// A parent reference that does not match the actual parent
    #[error("container {id} names parent {found:?}, actual parent is {expected:?}")]
    ParentMismatch {
        /// Offending container
        id: ContainerId,
        /// Actual parent
        expected: Option<ContainerId>,
        /// Parent named in the document
        found: Option<ContainerId>,
    },

    /// The same container ID appears twice
    #[error("duplicate container id {0}")]
    DuplicateContainerId(ContainerId),

    /// The same block ID appears twice
    #[error("duplicate block id {0}")]
    DuplicateBlockId(BlockId),

    /// A block whose back-reference names another container
    #[error("{block} in {container} points at {found}")]
    OrphanedBlock {
        /// Offending block
        block: BlockId,
        /// Container holding it
        container: ContainerId,
        /// Container named by its back-reference
        found: ContainerId,
    },

    /// A block whose payload does not fit its kind
    #[error("{block} is invalid: {reason}")]
    InvalidBlock {
        /// Offending block
        block: BlockId,
        /// What is wrong
        reason: String,
    },
}

/// Validates root records and builds the container tree.
///
/// # Errors
///
/// Returns the first violation found in document order.
pub fn validate_records(records: Vec<ContainerRecord>) -> Result<Vec<Container>, ValidationError> {
    let mut seen = Seen::default();
    records
        .into_iter()
        .map(|record| build(record, 0, None, &mut seen))
        .collect()
}

#[derive(Default)]
struct Seen {
    containers: HashSet<ContainerId>,
    blocks: HashSet<BlockId>,
}

fn build(
    record: ContainerRecord,
    level: u32,
    parent: Option<ContainerId>,
    seen: &mut Seen,
) -> Result<Container, ValidationError> {
    let id = record.id;
    if !seen.containers.insert(id) {
        return Err(ValidationError::DuplicateContainerId(id));
    }
    if record.split_level != level {
        return Err(ValidationError::SplitLevelMismatch {
            id,
            expected: level,
            found: record.split_level,
        });
    }
    // Older documents omit parentId on children; only a wrong value is fatal.
    let parent_ok = match (record.parent_id, parent) {
        (None, _) => true,
        (Some(found), Some(expected)) => found == expected,
        (Some(_), None) => false,
    };
    if !parent_ok {
        return Err(ValidationError::ParentMismatch {
            id,
            expected: parent,
            found: record.parent_id,
        });
    }

    let body = if record.is_split {
        if !record.blocks.is_empty() {
            return Err(ValidationError::BlocksOnSplitNode(id));
        }
        let found = record.split_areas.len();
        let Ok([first, second]) = <[ContainerRecord; 2]>::try_from(record.split_areas) else {
            return Err(ValidationError::SplitArity { id, found });
        };
        let first = build(first, level + 1, Some(id), seen)?;
        let second = build(second, level + 1, Some(id), seen)?;
        ContainerBody::Split {
            areas: Box::new([first, second]),
        }
    } else {
        if !record.split_areas.is_empty() {
            return Err(ValidationError::LeafWithChildren {
                id,
                found: record.split_areas.len(),
            });
        }
        for block in &record.blocks {
            check_block(block, id, seen)?;
        }
        ContainerBody::Leaf {
            blocks: record.blocks,
        }
    };

    Ok(Container {
        id,
        split_level: level,
        parent_id: parent,
        body,
    })
}

fn check_block(block: &Block, container: ContainerId, seen: &mut Seen) -> Result<(), ValidationError> {
    if !seen.blocks.insert(block.id) {
        return Err(ValidationError::DuplicateBlockId(block.id));
    }
    if block.drop_area_id != container {
        return Err(ValidationError::OrphanedBlock {
            block: block.id,
            container,
            found: block.drop_area_id,
        });
    }
    block.validate().map_err(|e| ValidationError::InvalidBlock {
        block: block.id,
        reason: e.to_string(),
    })
}
