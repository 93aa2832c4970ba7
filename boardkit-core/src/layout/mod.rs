//! Nested drop-area layout model
//!
//! This module provides the data model behind the page editor: a document is
//! an ordered list of root containers, and every container is either a leaf
//! holding content blocks or a split node holding exactly two children.
//!
//! # Architecture
//!
//! - **Single mutator**: [`LayoutStore`] owns the tree; readers get shared
//!   references and every mutation goes through the store
//! - **All-or-nothing mutations**: a rejected mutation leaves the tree as it was
//! - **Split/merge duality**: merging the two children of a fresh split
//!   restores the original leaf
//! - **Explicit drag state**: [`DragReconciler`] owns the in-flight registry
//!   and drop claims, so overlapping drop callbacks apply once
//! - **Pure projection**: [`render_container`] maps the tree onto a
//!   per-viewport [`Composition`]
//!
//! # Module Structure
//!
//! - `types` - Identifiers, `Viewport`, `SplitLimits`
//! - `block` - Content blocks (`Block`, `BlockKind`, `BlockContent`, `BlockSpec`)
//! - `tree` - Container tree and generic walkers
//! - `store` - Layout store (`LayoutStore`)
//! - `drag` - Drag/drop reconciliation (`DragReconciler`)
//! - `viewport` - Viewport projection
//! - `error` - Error types (`LayoutError`)
//!
//! # Example
//!
//! ```
//! use boardkit_core::layout::{
//!     BlockSpec, DragReconciler, DropTarget, LayoutStore, RenderMode, Viewport, render_document,
//! };
//!
//! let mut store = LayoutStore::new("Landing page");
//! let root = store.roots()[0].id;
//! let [left, right] = store.split_container(root).unwrap();
//! let block = store.add_block(BlockSpec::paragraph("Hello"), left).unwrap();
//!
//! // Drag the paragraph to the right-hand side
//! let mut drag = DragReconciler::default();
//! let key = drag.start_block_drag(block, left, 0, std::time::Instant::now()).unwrap();
//! assert!(drag.handle_drop_now(&mut store, key, DropTarget::append(right)).is_applied());
//! drag.end_drag(key);
//!
//! // Mobile stacks, preview hides the now-empty left side
//! let rendered = render_document(store.roots(), Viewport::Mobile, RenderMode::Preview);
//! assert_eq!(rendered.len(), 1);
//! assert_eq!(rendered[0].id(), right);
//! ```

mod block;
mod drag;
mod error;
mod store;
mod tree;
mod types;
mod viewport;

pub use block::{
    Alignment, Block, BlockAttributes, BlockContent, BlockKind, BlockSpec, FormField,
    MAX_HEADING_LEVEL, MIN_HEADING_LEVEL, MediaRef,
};
pub use drag::{
    DEFAULT_CLAIM_WINDOW, DragError, DragKey, DragReconciler, DragSource, DropOutcome,
    DropPosition, DropRejection, DropTarget, DropZoneConfig, HoverState, InFlightDrag,
    calculate_drop_position, calculate_indicator_y, calculate_insertion_index,
    calculate_row_index,
};
pub use error::{LayoutError, LayoutResult};
pub use store::{LayoutStore, ProjectMeta, SaveStatus, SaveTicket};
pub use tree::{
    BlockLocation, Container, ContainerBody, ContainerRecord, Containers, block_count,
    can_merge_containers, container_count, filter_non_empty_roots, find_block, find_container,
    find_container_mut, find_parent_of_split_pair, is_container_empty, leaf_ids,
    update_container, walk,
};
pub use types::{
    BlockId, ContainerId, DEFAULT_DESKTOP_MAX_SPLIT_LEVEL, DEFAULT_MOBILE_MAX_SPLIT_LEVEL,
    DEFAULT_TABLET_MAX_SPLIT_LEVEL, ProjectId, SplitLimits, Viewport,
};
pub use viewport::{
    Composition, GridCell, RenderMode, TABLET_GRID_COLUMNS, TABLET_GRID_DEPTH, render_container,
    render_document,
};
