//! Error types for layout operations
//!
//! Every mutation of the layout tree either applies completely or returns
//! one of these errors with the tree left untouched.

use super::types::{BlockId, ContainerId};

/// Errors that can occur during layout tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The specified container was not found.
    #[error("container not found: {0}")]
    ContainerNotFound(ContainerId),

    /// The specified block was not found.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    /// The container is already split and must be merged first.
    #[error("container is already split: {0}")]
    AlreadySplit(ContainerId),

    /// The container has reached the maximum split level.
    #[error("container {id} is at split level {level}, maximum is {max}")]
    MaxDepthReached {
        /// The container that was asked to split.
        id: ContainerId,
        /// Its current split level.
        level: u32,
        /// The cap that applied.
        max: u32,
    },

    /// The operation needs a leaf container but got a split node.
    #[error("container is not a leaf: {0}")]
    NotALeaf(ContainerId),

    /// The two containers cannot be merged.
    #[error("containers cannot be merged: {0} and {1}")]
    NotMergeable(ContainerId, ContainerId),

    /// The block is not held by the stated source container.
    #[error("{block} is not in {container}")]
    BlockNotInContainer {
        /// The block being moved.
        block: BlockId,
        /// The container the caller named as source.
        container: ContainerId,
    },

    /// The block payload or attributes do not fit its kind.
    #[error("invalid block: {0}")]
    InvalidBlock(String),

    /// A document always keeps at least one root container.
    #[error("cannot remove the last root container")]
    CannotRemoveLastRoot,

    /// Root containers can only be removed or reordered at root level.
    #[error("container is not a root: {0}")]
    NotARoot(ContainerId),
}

/// Result type for layout operations.
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn display_container_not_found() {
        let err = LayoutError::ContainerNotFound(ContainerId(Uuid::nil()));
        assert!(format!("{err}").contains("container not found"));
    }

    #[test]
    fn display_max_depth_reached() {
        let err = LayoutError::MaxDepthReached {
            id: ContainerId::new(),
            level: 1,
            max: 1,
        };
        let text = format!("{err}");
        assert!(text.contains("split level 1"));
        assert!(text.contains("maximum is 1"));
    }

    #[test]
    fn display_cannot_remove_last_root() {
        assert_eq!(
            format!("{}", LayoutError::CannotRemoveLastRoot),
            "cannot remove the last root container"
        );
    }

    #[test]
    fn display_block_not_in_container() {
        let err = LayoutError::BlockNotInContainer {
            block: BlockId::new(),
            container: ContainerId::new(),
        };
        assert!(format!("{err}").contains(" is not in "));
    }
}
