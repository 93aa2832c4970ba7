//! Drag-and-drop reconciliation for the layout editor
//!
//! The UI's drag-and-drop layer can fire several drop callbacks for one
//! physical gesture when drop targets overlap (a container and its nested
//! children both accept the drop). The [`DragReconciler`] turns those
//! callbacks into at most one store mutation per gesture:
//!
//! - an in-flight registry keyed by [`DragKey`] rejects duplicate drag starts
//! - a drop claim keyed by the same key rejects every drop within the claim
//!   window after the first
//! - [`DragReconciler::end_drag`] always resets transient hover state
//!
//! The reconciler owns all of this state explicitly and takes time as an
//! argument, so it can be driven from tests without a UI.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use uuid::Uuid;

use super::block::BlockSpec;
use super::error::LayoutError;
use super::store::LayoutStore;
use super::types::{BlockId, ContainerId};
use crate::tracing::span_names;

/// Default claim window.
pub const DEFAULT_CLAIM_WINDOW: Duration = Duration::from_millis(500);

/// Identifies the item being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKey {
    /// An existing block picked up from a container
    Block(BlockId),
    /// A new block dragged from the palette
    Palette(Uuid),
}

impl fmt::Display for DragKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(id) => write!(f, "{id}"),
            Self::Palette(id) => write!(f, "Palette({id})"),
        }
    }
}

/// Where a drag started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// An existing block at `index` in `container`
    Block {
        /// The block being dragged
        block: BlockId,
        /// Container it was picked up from
        container: ContainerId,
        /// Position it was picked up from
        index: usize,
    },
    /// A palette item that becomes a new block on drop
    Palette {
        /// Block to create
        spec: BlockSpec,
    },
}

/// Registry entry for an active drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightDrag {
    /// Where the drag started
    pub source: DragSource,
    /// When the drag started
    pub started_at: Instant,
}

/// Drop target reported by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Container under the pointer (may be a split node)
    pub container: ContainerId,
    /// Insertion index within the container, `None` to append
    pub index: Option<usize>,
}

impl DropTarget {
    /// Creates a target that appends to `container`.
    #[must_use]
    pub const fn append(container: ContainerId) -> Self {
        Self {
            container,
            index: None,
        }
    }

    /// Creates a target that inserts at `index` in `container`.
    #[must_use]
    pub const fn at(container: ContainerId, index: usize) -> Self {
        Self {
            container,
            index: Some(index),
        }
    }
}

/// Why a claimed drop did not change the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropRejection {
    /// No drag is in flight for this key
    #[error("no drag in flight for {0}")]
    NotInFlight(DragKey),
    /// The store refused the mutation
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Result of a drop callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drop was claimed and applied
    Applied {
        /// The moved or created block
        block: BlockId,
        /// Leaf that received the block
        container: ContainerId,
    },
    /// Another callback already claimed this gesture
    Duplicate,
    /// The drop was claimed but could not be applied
    Rejected(DropRejection),
}

impl DropOutcome {
    /// Returns true if the drop changed the tree.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Errors from drag bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// The item is already being dragged
    #[error("drag already in flight for {0}")]
    AlreadyInFlight(DragKey),
    /// No drag is in flight for the item
    #[error("no drag in flight for {0}")]
    NotInFlight(DragKey),
}

/// Transient view state while dragging.
///
/// Never part of the layout tree; reset on every drag end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    /// Container currently highlighted as drop target
    pub highlighted: Option<ContainerId>,
    /// Whether the drag preview is shown
    pub preview_visible: bool,
    /// Insertion line position within the highlighted container
    pub insertion_index: Option<usize>,
}

impl HoverState {
    /// Clears all hover state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true if nothing is highlighted or previewed.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        self.highlighted.is_none() && !self.preview_visible && self.insertion_index.is_none()
    }
}

// ============================================================================
// Drop position helpers
// ============================================================================

/// Drop position relative to a block row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    /// Insert before the row (line indicator above)
    Before,
    /// Insert after the row (line indicator below)
    After,
}

/// Geometry used to translate pointer positions into insertion indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZoneConfig {
    /// Height of each block row in pixels
    pub row_height: f64,
    /// Share of the row, from the top, that means "before"
    pub drop_zone_ratio: f64,
}

impl Default for DropZoneConfig {
    fn default() -> Self {
        Self {
            row_height: 48.0,
            drop_zone_ratio: 0.5,
        }
    }
}

/// Calculates the drop position from the Y coordinate within a row.
#[must_use]
pub fn calculate_drop_position(y_in_row: f64, config: &DropZoneConfig) -> DropPosition {
    if y_in_row < config.row_height * config.drop_zone_ratio {
        DropPosition::Before
    } else {
        DropPosition::After
    }
}

/// Calculates which row is at a given Y coordinate inside a container.
#[must_use]
pub fn calculate_row_index(y: f64, config: &DropZoneConfig) -> usize {
    if y <= 0.0 || config.row_height <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (y / config.row_height) as usize;
    index
}

/// Calculates the insertion index for a pointer at `y` inside a container
/// holding `block_count` blocks.
///
/// Positions below the last row append.
#[must_use]
pub fn calculate_insertion_index(y: f64, block_count: usize, config: &DropZoneConfig) -> usize {
    let row = calculate_row_index(y, config);
    if row >= block_count {
        return block_count;
    }
    #[allow(clippy::cast_precision_loss)]
    let y_in_row = y.max(0.0) - row as f64 * config.row_height;
    match calculate_drop_position(y_in_row, config) {
        DropPosition::Before => row,
        DropPosition::After => row + 1,
    }
}

/// Calculates the Y position of the insertion line for an index.
#[must_use]
pub fn calculate_indicator_y(insertion_index: usize, config: &DropZoneConfig) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let y = insertion_index as f64 * config.row_height;
    y
}

// ============================================================================
// Reconciler
// ============================================================================

/// Tracks active drags and drop claims for one editor.
#[derive(Debug, Clone)]
pub struct DragReconciler {
    in_flight: HashMap<DragKey, InFlightDrag>,
    claims: HashMap<DragKey, Instant>,
    hover: HoverState,
    claim_window: Duration,
    drop_zone: DropZoneConfig,
}

impl Default for DragReconciler {
    fn default() -> Self {
        Self::new(DEFAULT_CLAIM_WINDOW)
    }
}

impl DragReconciler {
    /// Creates a reconciler with the given claim window.
    #[must_use]
    pub fn new(claim_window: Duration) -> Self {
        Self {
            in_flight: HashMap::new(),
            claims: HashMap::new(),
            hover: HoverState::default(),
            claim_window,
            drop_zone: DropZoneConfig::default(),
        }
    }

    /// Replaces the drop-zone geometry.
    #[must_use]
    pub const fn with_drop_zone(mut self, drop_zone: DropZoneConfig) -> Self {
        self.drop_zone = drop_zone;
        self
    }

    /// Returns the claim window.
    #[must_use]
    pub const fn claim_window(&self) -> Duration {
        self.claim_window
    }

    /// Returns the drop-zone geometry.
    #[must_use]
    pub const fn drop_zone(&self) -> DropZoneConfig {
        self.drop_zone
    }

    /// Returns the current hover state.
    #[must_use]
    pub const fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// Returns the number of active drags.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns true if `key` is being dragged.
    #[must_use]
    pub fn is_in_flight(&self, key: DragKey) -> bool {
        self.in_flight.contains_key(&key)
    }

    /// Returns the registry entry for `key`.
    #[must_use]
    pub fn in_flight(&self, key: DragKey) -> Option<&InFlightDrag> {
        self.in_flight.get(&key)
    }

    /// Starts dragging an existing block.
    ///
    /// # Errors
    ///
    /// Returns `DragError::AlreadyInFlight` if the block is already being
    /// dragged.
    pub fn start_block_drag(
        &mut self,
        block: BlockId,
        container: ContainerId,
        index: usize,
        now: Instant,
    ) -> Result<DragKey, DragError> {
        let key = DragKey::Block(block);
        self.register(
            key,
            DragSource::Block {
                block,
                container,
                index,
            },
            now,
        )?;
        Ok(key)
    }

    /// Starts dragging a new block from the palette.
    ///
    /// Each palette gesture gets a fresh key, so two gestures with the same
    /// block kind never collide.
    ///
    /// # Errors
    ///
    /// Returns `DragError::AlreadyInFlight` only if a key collides, which
    /// cannot happen with random keys.
    pub fn start_palette_drag(&mut self, spec: BlockSpec, now: Instant) -> Result<DragKey, DragError> {
        let key = DragKey::Palette(Uuid::new_v4());
        self.register(key, DragSource::Palette { spec }, now)?;
        Ok(key)
    }

    fn register(&mut self, key: DragKey, source: DragSource, now: Instant) -> Result<(), DragError> {
        if self.in_flight.contains_key(&key) {
            tracing::debug!(key = %key, "Duplicate drag start ignored");
            return Err(DragError::AlreadyInFlight(key));
        }
        self.in_flight.insert(
            key,
            InFlightDrag {
                source,
                started_at: now,
            },
        );
        self.hover.preview_visible = true;
        tracing::trace!(key = %key, "Drag started");
        Ok(())
    }

    /// Highlights the container under the pointer.
    ///
    /// `y` is the pointer offset inside the container, used to place the
    /// insertion line.
    ///
    /// # Errors
    ///
    /// Returns `DragError::NotInFlight` if `key` is not being dragged.
    pub fn hover_over(
        &mut self,
        key: DragKey,
        container: ContainerId,
        y: f64,
        block_count: usize,
    ) -> Result<DropTarget, DragError> {
        if !self.in_flight.contains_key(&key) {
            return Err(DragError::NotInFlight(key));
        }
        let index = calculate_insertion_index(y, block_count, &self.drop_zone);
        self.hover.highlighted = Some(container);
        self.hover.insertion_index = Some(index);
        Ok(DropTarget::at(container, index))
    }

    /// Attempts to claim the drop for `key`.
    ///
    /// Returns true for the first claim within the claim window and false
    /// for every later one. Expired claims are pruned on each call.
    pub fn try_claim(&mut self, key: DragKey, now: Instant) -> bool {
        let window = self.claim_window;
        self.claims
            .retain(|_, claimed_at| now.saturating_duration_since(*claimed_at) < window);
        if self.claims.contains_key(&key) {
            return false;
        }
        self.claims.insert(key, now);
        true
    }

    /// Handles one drop callback.
    ///
    /// Claims the drop, resolves a split target to its first leaf and
    /// dispatches exactly one store mutation: `move_block` for existing
    /// blocks, `insert_block` for palette items.
    pub fn handle_drop(
        &mut self,
        store: &mut LayoutStore,
        key: DragKey,
        target: DropTarget,
        now: Instant,
    ) -> DropOutcome {
        let _span =
            crate::trace_operation!(span_names::DRAG_DROP, key = %key, target = %target.container)
                .entered();

        if !self.try_claim(key, now) {
            tracing::debug!("Drop already claimed");
            return DropOutcome::Duplicate;
        }
        let Some(drag) = self.in_flight.get(&key) else {
            tracing::debug!("Drop for unknown drag");
            return DropOutcome::Rejected(DropRejection::NotInFlight(key));
        };

        let Some(container) = store.find_container(target.container) else {
            return DropOutcome::Rejected(LayoutError::ContainerNotFound(target.container).into());
        };
        let leaf = container.first_leaf().id;
        // The index only makes sense for the container the pointer was over.
        let index = if leaf == target.container {
            target.index
        } else {
            None
        };

        let result = match &drag.source {
            DragSource::Block {
                block,
                container,
                index: picked_at,
            } => {
                // Drop indices count the dragged block; `move_block` counts
                // positions after it is taken out.
                let index = if *container == leaf {
                    let current = store
                        .find_container(leaf)
                        .and_then(|c| c.blocks().iter().position(|b| b.id == *block))
                        .unwrap_or(*picked_at);
                    index.map(|i| if i > current { i - 1 } else { i })
                } else {
                    index
                };
                store
                    .move_block(*block, *container, leaf, index)
                    .map(|()| *block)
            }
            DragSource::Palette { spec } => {
                store.insert_block(spec.clone(), leaf, index.unwrap_or(usize::MAX))
            }
        };

        match result {
            Ok(block) => {
                tracing::debug!(block = %block, container = %leaf, "Drop applied");
                DropOutcome::Applied {
                    block,
                    container: leaf,
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Drop rejected");
                DropOutcome::Rejected(e.into())
            }
        }
    }

    /// Handles one drop callback at the current time.
    pub fn handle_drop_now(
        &mut self,
        store: &mut LayoutStore,
        key: DragKey,
        target: DropTarget,
    ) -> DropOutcome {
        self.handle_drop(store, key, target, Instant::now())
    }

    /// Ends a drag, whether it was dropped, cancelled or rejected.
    ///
    /// Hover state is always reset. An end without a matching start is
    /// logged and otherwise ignored.
    pub fn end_drag(&mut self, key: DragKey) -> Option<InFlightDrag> {
        self.hover.reset();
        let entry = self.in_flight.remove(&key);
        if entry.is_none() {
            tracing::warn!(key = %key, "Drag end without matching start");
        }
        entry
    }

    /// Drops every in-flight drag and claim and resets hover state.
    pub fn cancel_all(&mut self) {
        self.in_flight.clear();
        self.claims.clear();
        self.hover.reset();
    }
}
