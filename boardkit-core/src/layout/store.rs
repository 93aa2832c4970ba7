//! Layout store owning the authoritative container tree
//!
//! The store is the only mutator of a project's layout. UI code reads the
//! tree through the query helpers and dispatches mutation intents; every
//! mutation validates first and then applies completely, so a failed call
//! leaves the tree exactly as it was.
//!
//! # Example
//!
//! ```
//! use boardkit_core::layout::{BlockSpec, LayoutStore, Viewport};
//!
//! let mut store = LayoutStore::new("Landing page");
//! let root = store.roots()[0].id;
//!
//! let [left, right] = store.split_container(root).unwrap();
//! store.add_block(BlockSpec::heading(1, "Welcome"), left).unwrap();
//!
//! assert!(store.can_merge(left, right));
//! assert!(!store.can_split(left, Viewport::Mobile));
//!
//! store.merge_containers(left, right).unwrap();
//! assert_eq!(store.roots()[0].blocks().len(), 1);
//! ```

use chrono::{DateTime, Utc};

use super::block::{Block, BlockAttributes, BlockContent, BlockSpec, MediaRef, validate_parts};
use super::error::{LayoutError, LayoutResult};
use super::tree::{
    self, BlockLocation, Container, ContainerBody, can_merge_containers, find_block,
    find_container, find_container_mut, find_parent_of_split_pair, update_container,
};
use super::types::{BlockId, ContainerId, ProjectId, SplitLimits, Viewport};
use crate::document::{DOCUMENT_FORMAT_VERSION, LayoutDocument, PublishStatus};
use crate::tracing::span_names;

/// Persistence state of the project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// The persisted copy matches the in-memory tree.
    #[default]
    Saved,
    /// The tree changed since the last successful save.
    Unsaved,
    /// A save is in flight.
    Saving,
    /// The last save failed; the message is shown to the user.
    Failed(String),
}

/// Project metadata kept next to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMeta {
    /// Owning project
    pub project_id: ProjectId,
    /// Page title
    pub title: String,
    /// Optional page description
    pub description: Option<String>,
    /// Persistence state
    pub save_status: SaveStatus,
    /// Publication state
    pub publish_status: PublishStatus,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// A snapshot taken for an asynchronous save.
///
/// Mutations keep working while the save is pending; the ticket remembers
/// the revision it captured so [`LayoutStore::finish_save`] can tell whether
/// the tree moved on in the meantime.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    /// Revision captured by the snapshot.
    pub revision: u64,
    /// Document to hand to the repository.
    pub document: LayoutDocument,
}

/// Owns the layout tree of one project.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    /// Root containers in document order (never empty).
    roots: Vec<Container>,
    /// Project metadata.
    meta: ProjectMeta,
    /// Per-viewport split caps.
    limits: SplitLimits,
    /// Incremented on every successful mutation.
    revision: u64,
    /// Revision of the last successful save.
    saved_revision: u64,
}

impl LayoutStore {
    /// Creates a store with a single empty root container.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_limits(title, SplitLimits::default())
    }

    /// Creates a store with custom split caps.
    #[must_use]
    pub fn with_limits(title: impl Into<String>, limits: SplitLimits) -> Self {
        Self {
            roots: vec![Container::new_root()],
            meta: ProjectMeta {
                project_id: ProjectId::new(),
                title: title.into(),
                description: None,
                save_status: SaveStatus::Unsaved,
                publish_status: PublishStatus::Draft,
                updated_at: Utc::now(),
            },
            limits,
            revision: 1,
            saved_revision: 0,
        }
    }

    /// Creates a store from a validated document.
    ///
    /// A document without containers gets a single empty root so the editor
    /// always has a drop target.
    #[must_use]
    pub fn from_document(document: LayoutDocument, limits: SplitLimits) -> Self {
        let mut roots = document.containers;
        if roots.is_empty() {
            roots.push(Container::new_root());
        }
        Self {
            roots,
            meta: ProjectMeta {
                project_id: document.project_id,
                title: document.title,
                description: document.description,
                save_status: SaveStatus::Saved,
                publish_status: document.publish_status,
                updated_at: document.updated_at,
            },
            limits,
            revision: 0,
            saved_revision: 0,
        }
    }

    /// Builds a serializable document from the current state.
    #[must_use]
    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument {
            format_version: DOCUMENT_FORMAT_VERSION,
            project_id: self.meta.project_id,
            title: self.meta.title.clone(),
            description: self.meta.description.clone(),
            publish_status: self.meta.publish_status.clone(),
            updated_at: self.meta.updated_at,
            containers: self.roots.clone(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the root containers in document order.
    #[must_use]
    pub fn roots(&self) -> &[Container] {
        &self.roots
    }

    /// Returns the project metadata.
    #[must_use]
    pub const fn meta(&self) -> &ProjectMeta {
        &self.meta
    }

    /// Returns the split caps in effect.
    #[must_use]
    pub const fn limits(&self) -> SplitLimits {
        self.limits
    }

    /// Returns the mutation counter.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true if there are changes not yet persisted.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    /// Finds a container by ID.
    #[must_use]
    pub fn find_container(&self, id: ContainerId) -> Option<&Container> {
        find_container(&self.roots, id)
    }

    /// Finds a block and its owning container.
    #[must_use]
    pub fn find_block(&self, block_id: BlockId) -> Option<BlockLocation<'_>> {
        find_block(&self.roots, block_id)
    }

    /// Returns whether a container holds no blocks, or `None` if it does not
    /// exist.
    #[must_use]
    pub fn is_container_empty(&self, id: ContainerId) -> Option<bool> {
        self.find_container(id).map(Container::is_empty)
    }

    /// Returns the roots that hold at least one block (preview rendering).
    #[must_use]
    pub fn non_empty_roots(&self) -> Vec<Container> {
        tree::filter_non_empty_roots(&self.roots)
    }

    /// Returns the split node whose children are exactly `a` and `b`.
    #[must_use]
    pub fn find_parent_of_split_pair(&self, a: ContainerId, b: ContainerId) -> Option<&Container> {
        find_parent_of_split_pair(&self.roots, a, b)
    }

    /// Returns the number of containers in the tree.
    #[must_use]
    pub fn container_count(&self) -> usize {
        tree::container_count(&self.roots)
    }

    /// Returns the number of blocks in the tree.
    #[must_use]
    pub fn block_count(&self) -> usize {
        tree::block_count(&self.roots)
    }

    /// Returns every media reference in document order.
    ///
    /// The media service uses this to resolve previews or to collect
    /// uploads no longer referenced by the page.
    #[must_use]
    pub fn media_references(&self) -> Vec<&MediaRef> {
        tree::walk(&self.roots)
            .flat_map(|c| c.blocks().iter())
            .filter_map(Block::media)
            .collect()
    }

    /// Returns true if the container can be split on the given viewport.
    ///
    /// The container must exist, must be a leaf and must sit below the
    /// viewport's split cap.
    #[must_use]
    pub fn can_split(&self, id: ContainerId, viewport: Viewport) -> bool {
        self.find_container(id).is_some_and(|container| {
            container.is_leaf() && container.split_level < self.limits.max_for(viewport)
        })
    }

    /// Returns true if `a` and `b` are mergeable siblings.
    #[must_use]
    pub fn can_merge(&self, a: ContainerId, b: ContainerId) -> bool {
        can_merge_containers(&self.roots, a, b)
    }

    // ========================================================================
    // Structure Mutations
    // ========================================================================

    /// Splits a leaf into two child leaves.
    ///
    /// The leaf keeps its ID and becomes a split node. Its blocks move to the
    /// first child so that merging the pair restores the original leaf. The
    /// cap is the most permissive viewport limit; use
    /// [`split_container_for`](Self::split_container_for) to enforce a
    /// specific viewport.
    ///
    /// # Returns
    ///
    /// The IDs of the two new children.
    ///
    /// # Errors
    ///
    /// - `ContainerNotFound` if the ID is unknown
    /// - `AlreadySplit` if the container is a split node
    /// - `MaxDepthReached` if the container sits at the cap
    pub fn split_container(&mut self, id: ContainerId) -> LayoutResult<[ContainerId; 2]> {
        self.split_with_cap(id, self.limits.structural_max())
    }

    /// Splits a leaf, enforcing the cap of a specific viewport.
    ///
    /// # Errors
    ///
    /// Same as [`split_container`](Self::split_container).
    pub fn split_container_for(
        &mut self,
        id: ContainerId,
        viewport: Viewport,
    ) -> LayoutResult<[ContainerId; 2]> {
        self.split_with_cap(id, self.limits.max_for(viewport))
    }

    fn split_with_cap(&mut self, id: ContainerId, max: u32) -> LayoutResult<[ContainerId; 2]> {
        let _span = crate::trace_operation!(span_names::LAYOUT_SPLIT, container = %id).entered();
        let target = self
            .find_container(id)
            .ok_or(LayoutError::ContainerNotFound(id))?;
        if target.is_split() {
            return Err(reject("split", LayoutError::AlreadySplit(id)));
        }
        if target.split_level >= max {
            return Err(reject(
                "split",
                LayoutError::MaxDepthReached {
                    id,
                    level: target.split_level,
                    max,
                },
            ));
        }

        let children = [ContainerId::new(), ContainerId::new()];
        self.roots = update_container(&self.roots, id, |node| split_leaf(node, children));
        self.touch();
        tracing::debug!(first = %children[0], second = %children[1], "Split container");
        Ok(children)
    }

    /// Merges two sibling leaves back into their parent.
    ///
    /// The parent split node becomes a leaf with its own ID and split level,
    /// holding the blocks of whichever side had content.
    ///
    /// # Returns
    ///
    /// The ID of the restored leaf.
    ///
    /// # Errors
    ///
    /// Returns `NotMergeable` unless both containers exist, neither is split,
    /// at least one is empty and they share a parent.
    pub fn merge_containers(&mut self, a: ContainerId, b: ContainerId) -> LayoutResult<ContainerId> {
        let _span = crate::trace_operation!(span_names::LAYOUT_MERGE, first = %a, second = %b).entered();
        if !self.can_merge(a, b) {
            return Err(reject("merge", LayoutError::NotMergeable(a, b)));
        }
        let parent_id = self
            .find_parent_of_split_pair(a, b)
            .map(|parent| parent.id)
            .ok_or(LayoutError::NotMergeable(a, b))?;

        self.roots = update_container(&self.roots, parent_id, |parent| {
            let blocks = parent
                .children()
                .map(|areas| areas.iter().flat_map(|c| c.blocks().iter().cloned()).collect())
                .unwrap_or_default();
            Container::leaf_with_blocks(parent.id, parent.split_level, parent.parent_id, blocks)
        });
        self.touch();
        tracing::debug!(container = %parent_id, "Merged containers");
        Ok(parent_id)
    }

    /// Appends a new empty root container (a new page section).
    pub fn add_root_container(&mut self) -> ContainerId {
        let root = Container::new_root();
        let id = root.id;
        self.roots.push(root);
        self.touch();
        tracing::debug!(container = %id, "Added root container");
        id
    }

    /// Removes a root container and everything in it.
    ///
    /// # Errors
    ///
    /// - `NotARoot` if the ID is not a root container
    /// - `CannotRemoveLastRoot` if it is the only root
    pub fn remove_root_container(&mut self, id: ContainerId) -> LayoutResult<Container> {
        let position = self
            .root_position(id)
            .ok_or_else(|| reject("remove_root", LayoutError::NotARoot(id)))?;
        if self.roots.len() == 1 {
            return Err(reject("remove_root", LayoutError::CannotRemoveLastRoot));
        }
        let removed = self.roots.remove(position);
        self.touch();
        tracing::debug!(container = %id, "Removed root container");
        Ok(removed)
    }

    /// Moves a root container to a new position (clamped).
    ///
    /// # Errors
    ///
    /// Returns `NotARoot` if the ID is not a root container.
    pub fn move_root_container(&mut self, id: ContainerId, index: usize) -> LayoutResult<()> {
        let position = self
            .root_position(id)
            .ok_or_else(|| reject("move_root", LayoutError::NotARoot(id)))?;
        let root = self.roots.remove(position);
        let index = index.min(self.roots.len());
        self.roots.insert(index, root);
        self.touch();
        Ok(())
    }

    /// Replaces the whole tree with a single empty root.
    pub fn clear(&mut self) {
        self.roots = vec![Container::new_root()];
        self.touch();
    }

    // ========================================================================
    // Block Mutations
    // ========================================================================

    /// Appends a new block to a leaf container.
    ///
    /// # Errors
    ///
    /// - `InvalidBlock` if the `BlockSpec` does not fit its kind
    /// - `ContainerNotFound` / `NotALeaf` for a bad target
    pub fn add_block(&mut self, spec: BlockSpec, container_id: ContainerId) -> LayoutResult<BlockId> {
        self.insert_block(spec, container_id, usize::MAX)
    }

    /// Inserts a new block into a leaf container at `index` (clamped).
    ///
    /// # Errors
    ///
    /// Same as [`add_block`](Self::add_block).
    pub fn insert_block(
        &mut self,
        spec: BlockSpec,
        container_id: ContainerId,
        index: usize,
    ) -> LayoutResult<BlockId> {
        spec.validate().map_err(|e| reject("add_block", e))?;
        let blocks = self.leaf_blocks_mut(container_id)?;
        let block = spec.into_block(container_id);
        let block_id = block.id;
        let index = index.min(blocks.len());
        blocks.insert(index, block);
        self.touch();
        tracing::debug!(block = %block_id, container = %container_id, index, "Added block");
        Ok(block_id)
    }

    /// Moves a block between (or within) leaf containers.
    ///
    /// The block is removed from `source` and inserted into `dest` at
    /// `index`, measured after the removal and clamped; `None` appends. All
    /// checks run before the tree is touched, so readers never see the block
    /// in both containers or in neither.
    ///
    /// # Errors
    ///
    /// - `BlockNotFound` if the block does not exist
    /// - `BlockNotInContainer` if `source` does not hold the block
    /// - `ContainerNotFound` / `NotALeaf` for a bad destination
    pub fn move_block(
        &mut self,
        block_id: BlockId,
        source: ContainerId,
        dest: ContainerId,
        index: Option<usize>,
    ) -> LayoutResult<()> {
        let _span = crate::trace_operation!(span_names::LAYOUT_MOVE_BLOCK, block = %block_id).entered();
        let location = self
            .find_block(block_id)
            .ok_or_else(|| reject("move_block", LayoutError::BlockNotFound(block_id)))?;
        if location.container_id != source {
            return Err(reject(
                "move_block",
                LayoutError::BlockNotInContainer {
                    block: block_id,
                    container: source,
                },
            ));
        }
        let source_index = location.index;
        match self.find_container(dest) {
            None => return Err(reject("move_block", LayoutError::ContainerNotFound(dest))),
            Some(container) if container.is_split() => {
                return Err(reject("move_block", LayoutError::NotALeaf(dest)));
            }
            Some(_) => {}
        }

        let mut block = self.leaf_blocks_mut(source)?.remove(source_index);
        block.drop_area_id = dest;
        let blocks = self.leaf_blocks_mut(dest)?;
        let index = index.unwrap_or(blocks.len()).min(blocks.len());
        blocks.insert(index, block);
        self.touch();
        tracing::debug!(block = %block_id, from = %source, to = %dest, index, "Moved block");
        Ok(())
    }

    /// Removes a block from the tree.
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound` if the block does not exist.
    pub fn remove_block(&mut self, block_id: BlockId) -> LayoutResult<Block> {
        let (container_id, index) = self
            .find_block(block_id)
            .map(|location| (location.container_id, location.index))
            .ok_or_else(|| reject("remove_block", LayoutError::BlockNotFound(block_id)))?;
        let block = self.leaf_blocks_mut(container_id)?.remove(index);
        self.touch();
        tracing::debug!(block = %block_id, container = %container_id, "Removed block");
        Ok(block)
    }

    /// Replaces the payload of a block.
    ///
    /// # Errors
    ///
    /// - `BlockNotFound` if the block does not exist
    /// - `InvalidBlock` if the payload does not fit the block kind
    pub fn update_block_content(
        &mut self,
        block_id: BlockId,
        content: BlockContent,
    ) -> LayoutResult<()> {
        let block = self.block_mut(block_id)?;
        validate_parts(block.kind, &content, &block.attributes)
            .map_err(|e| reject("update_block", e))?;
        block.content = content;
        self.touch();
        Ok(())
    }

    /// Replaces the attributes of a block.
    ///
    /// # Errors
    ///
    /// - `BlockNotFound` if the block does not exist
    /// - `InvalidBlock` if the attributes do not fit the block kind
    pub fn update_block_attributes(
        &mut self,
        block_id: BlockId,
        attributes: BlockAttributes,
    ) -> LayoutResult<()> {
        let block = self.block_mut(block_id)?;
        validate_parts(block.kind, &block.content, &attributes)
            .map_err(|e| reject("update_block", e))?;
        block.attributes = attributes;
        self.touch();
        Ok(())
    }

    // ========================================================================
    // Project Metadata
    // ========================================================================

    /// Sets the page title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.meta.title = title.into();
        self.touch();
    }

    /// Sets or clears the page description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.meta.description = description;
        self.touch();
    }

    /// Marks the page as published now.
    pub fn publish(&mut self) {
        self.meta.publish_status = PublishStatus::Published {
            published_at: Utc::now(),
        };
        self.touch();
    }

    /// Returns the page to draft state.
    pub fn unpublish(&mut self) {
        self.meta.publish_status = PublishStatus::Draft;
        self.touch();
    }

    /// Takes a snapshot for saving and marks the save as in flight.
    pub fn begin_save(&mut self) -> SaveTicket {
        self.meta.save_status = SaveStatus::Saving;
        SaveTicket {
            revision: self.revision,
            document: self.to_document(),
        }
    }

    /// Records the outcome of a save started with [`begin_save`](Self::begin_save).
    ///
    /// A successful save only marks the store clean if no mutation happened
    /// after the snapshot was taken.
    pub fn finish_save(&mut self, revision: u64, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.saved_revision = self.saved_revision.max(revision);
                self.meta.save_status = if self.is_dirty() {
                    SaveStatus::Unsaved
                } else {
                    SaveStatus::Saved
                };
            }
            Err(message) => {
                tracing::warn!(project = %self.meta.project_id, error = %message, "Save failed");
                self.meta.save_status = SaveStatus::Failed(message);
            }
        }
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn touch(&mut self) {
        self.revision += 1;
        self.meta.updated_at = Utc::now();
        if self.meta.save_status != SaveStatus::Saving {
            self.meta.save_status = SaveStatus::Unsaved;
        }
    }

    fn root_position(&self, id: ContainerId) -> Option<usize> {
        self.roots.iter().position(|root| root.id == id)
    }

    fn leaf_blocks_mut(&mut self, id: ContainerId) -> LayoutResult<&mut Vec<Block>> {
        let container = find_container_mut(&mut self.roots, id)
            .ok_or_else(|| reject("lookup", LayoutError::ContainerNotFound(id)))?;
        container
            .blocks_mut()
            .ok_or_else(|| reject("lookup", LayoutError::NotALeaf(id)))
    }

    fn block_mut(&mut self, block_id: BlockId) -> LayoutResult<&mut Block> {
        let container_id = self
            .find_block(block_id)
            .map(|location| location.container_id)
            .ok_or_else(|| reject("lookup", LayoutError::BlockNotFound(block_id)))?;
        self.leaf_blocks_mut(container_id)?
            .iter_mut()
            .find(|block| block.id == block_id)
            .ok_or(LayoutError::BlockNotFound(block_id))
    }
}

/// Turns a leaf into a split node with two children at the next level.
fn split_leaf(node: &Container, [first, second]: [ContainerId; 2]) -> Container {
    let level = node.split_level + 1;
    Container {
        id: node.id,
        split_level: node.split_level,
        parent_id: node.parent_id,
        body: ContainerBody::Split {
            areas: Box::new([
                Container::leaf_with_blocks(first, level, Some(node.id), node.blocks().to_vec()),
                Container::new_leaf(second, level, Some(node.id)),
            ]),
        },
    }
}

fn reject(operation: &'static str, error: LayoutError) -> LayoutError {
    tracing::debug!(operation, error = %error, "Layout mutation rejected");
    error
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block::BlockKind;

    fn root_id(store: &LayoutStore) -> ContainerId {
        store.roots()[0].id
    }

    // ========================================================================
    // Construction Tests
    // ========================================================================

    #[test]
    fn new_store_has_one_empty_root() {
        let store = LayoutStore::new("Page");
        assert_eq!(store.roots().len(), 1);
        assert!(store.roots()[0].is_leaf());
        assert_eq!(store.roots()[0].split_level, 0);
        assert_eq!(store.meta().title, "Page");
        assert!(store.is_dirty());
    }

    // ========================================================================
    // Split Tests
    // ========================================================================

    #[test]
    fn split_creates_two_empty_children_one_level_down() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, b] = store.split_container(root).unwrap();

        let node = store.find_container(root).unwrap();
        assert!(node.is_split());
        for child in node.children().unwrap() {
            assert!(child.is_leaf());
            assert!(child.is_empty());
            assert_eq!(child.split_level, 1);
            assert_eq!(child.parent_id, Some(root));
        }
        assert!(store.can_merge(a, b));
    }

    #[test]
    fn split_moves_existing_blocks_to_first_child() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let block = store.add_block(BlockSpec::paragraph("x"), root).unwrap();
        let [a, b] = store.split_container(root).unwrap();

        let location = store.find_block(block).unwrap();
        assert_eq!(location.container_id, a);
        assert_eq!(location.block.drop_area_id, a);
        assert_eq!(store.is_container_empty(b), Some(true));
    }

    #[test]
    fn split_already_split_container_fails() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        store.split_container(root).unwrap();
        let before = store.roots().to_vec();

        let err = store.split_container(root).unwrap_err();
        assert_eq!(err, LayoutError::AlreadySplit(root));
        assert_eq!(store.roots(), before.as_slice());
    }

    #[test]
    fn split_at_max_depth_fails() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, _] = store.split_container(root).unwrap();
        let [c, _] = store.split_container(a).unwrap();
        assert!(matches!(
            store.split_container(c),
            Err(LayoutError::MaxDepthReached { level: 2, max: 2, .. })
        ));
    }

    #[test]
    fn split_unknown_container_fails() {
        let mut store = LayoutStore::new("Page");
        let id = ContainerId::new();
        assert_eq!(
            store.split_container(id),
            Err(LayoutError::ContainerNotFound(id))
        );
    }

    #[test]
    fn can_split_respects_viewport_caps() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        assert!(store.can_split(root, Viewport::Mobile));
        let [a, _] = store.split_container(root).unwrap();

        assert!(!store.can_split(root, Viewport::Desktop));
        assert!(store.can_split(a, Viewport::Desktop));
        assert!(store.can_split(a, Viewport::Tablet));
        assert!(!store.can_split(a, Viewport::Mobile));
        assert!(!store.can_split(ContainerId::new(), Viewport::Desktop));

        let revision = store.revision();
        assert!(store.split_container_for(a, Viewport::Mobile).is_err());
        assert_eq!(store.revision(), revision);
    }

    // ========================================================================
    // Merge Tests
    // ========================================================================

    #[test]
    fn merge_restores_leaf_with_content() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, b] = store.split_container(root).unwrap();
        let heading = store.add_block(BlockSpec::heading(1, "Hi"), a).unwrap();

        assert!(store.can_merge(a, b));
        assert_eq!(store.is_container_empty(root), Some(false));

        let merged = store.merge_containers(a, b).unwrap();
        assert_eq!(merged, root);
        let node = store.find_container(root).unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.split_level, 0);
        assert_eq!(node.blocks().len(), 1);
        assert_eq!(node.blocks()[0].id, heading);
        assert_eq!(node.blocks()[0].drop_area_id, root);
        assert!(store.find_container(a).is_none());
    }

    #[test]
    fn merge_keeps_content_of_second_side() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, b] = store.split_container(root).unwrap();
        store.add_block(BlockSpec::paragraph("right"), b).unwrap();
        store.merge_containers(b, a).unwrap();
        assert_eq!(store.roots()[0].blocks().len(), 1);
    }

    #[test]
    fn merge_two_non_empty_leaves_fails() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, b] = store.split_container(root).unwrap();
        store.add_block(BlockSpec::paragraph("l"), a).unwrap();
        store.add_block(BlockSpec::paragraph("r"), b).unwrap();
        assert_eq!(
            store.merge_containers(a, b),
            Err(LayoutError::NotMergeable(a, b))
        );
        assert!(store.find_container(root).unwrap().is_split());
    }

    #[test]
    fn merge_cousins_fails() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, b] = store.split_container(root).unwrap();
        let [a1, _] = store.split_container(a).unwrap();
        let [b1, _] = store.split_container(b).unwrap();
        assert!(!store.can_merge(a1, b1));
        assert!(store.merge_containers(a1, b1).is_err());
    }

    // ========================================================================
    // Block Tests
    // ========================================================================

    #[test]
    fn add_block_to_split_node_fails() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        store.split_container(root).unwrap();
        assert_eq!(
            store.add_block(BlockSpec::paragraph("x"), root),
            Err(LayoutError::NotALeaf(root))
        );
    }

    #[test]
    fn add_invalid_block_fails_without_touching_tree() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let revision = store.revision();
        let result = store.add_block(BlockSpec::heading(9, "x"), root);
        assert!(matches!(result, Err(LayoutError::InvalidBlock(_))));
        assert_eq!(store.revision(), revision);
        assert_eq!(store.block_count(), 0);
    }

    #[test]
    fn insert_block_clamps_index() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let first = store.add_block(BlockSpec::paragraph("1"), root).unwrap();
        let front = store
            .insert_block(BlockSpec::paragraph("0"), root, 0)
            .unwrap();
        let back = store
            .insert_block(BlockSpec::paragraph("2"), root, 99)
            .unwrap();
        let ids: Vec<_> = store.roots()[0].blocks().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![front, first, back]);
    }

    #[test]
    fn move_block_between_containers() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, b] = store.split_container(root).unwrap();
        let block = store.add_block(BlockSpec::paragraph("x"), a).unwrap();

        store.move_block(block, a, b, None).unwrap();
        assert_eq!(store.is_container_empty(a), Some(true));
        let location = store.find_block(block).unwrap();
        assert_eq!(location.container_id, b);
        assert_eq!(location.block.drop_area_id, b);
    }

    #[test]
    fn move_block_reorders_within_container() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let first = store.add_block(BlockSpec::paragraph("1"), root).unwrap();
        let second = store.add_block(BlockSpec::paragraph("2"), root).unwrap();
        store.move_block(second, root, root, Some(0)).unwrap();
        let ids: Vec<_> = store.roots()[0].blocks().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn move_block_with_wrong_source_fails() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, b] = store.split_container(root).unwrap();
        let block = store.add_block(BlockSpec::paragraph("x"), a).unwrap();
        assert!(matches!(
            store.move_block(block, b, b, None),
            Err(LayoutError::BlockNotInContainer { .. })
        ));
        assert_eq!(store.find_block(block).unwrap().container_id, a);
    }

    #[test]
    fn move_block_to_split_node_leaves_block_in_place() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let [a, b] = store.split_container(root).unwrap();
        store.split_container(b).unwrap();
        let block = store.add_block(BlockSpec::paragraph("x"), a).unwrap();
        assert_eq!(
            store.move_block(block, a, b, None),
            Err(LayoutError::NotALeaf(b))
        );
        assert_eq!(store.find_block(block).unwrap().container_id, a);
        assert_eq!(store.block_count(), 1);
    }

    #[test]
    fn remove_block_returns_block() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let block = store.add_block(BlockSpec::paragraph("x"), root).unwrap();
        let removed = store.remove_block(block).unwrap();
        assert_eq!(removed.id, block);
        assert_eq!(store.block_count(), 0);
        assert_eq!(
            store.remove_block(block),
            Err(LayoutError::BlockNotFound(block))
        );
    }

    #[test]
    fn update_block_content_checks_kind() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let image = store
            .add_block(BlockSpec::new(BlockKind::Image), root)
            .unwrap();
        assert!(store
            .update_block_content(image, BlockContent::text("nope"))
            .is_err());
        store
            .update_block_content(image, BlockContent::Media(MediaRef::new("a.png")))
            .unwrap();
        assert_eq!(store.media_references().len(), 1);
    }

    #[test]
    fn update_block_attributes_checks_heading_level() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let heading = store.add_block(BlockSpec::heading(1, "x"), root).unwrap();
        let bad = BlockAttributes {
            heading_level: Some(8),
            alignment: None,
        };
        assert!(store.update_block_attributes(heading, bad).is_err());
        let good = BlockAttributes {
            heading_level: Some(3),
            alignment: None,
        };
        store.update_block_attributes(heading, good).unwrap();
        assert_eq!(
            store.find_block(heading).unwrap().block.attributes.heading_level,
            Some(3)
        );
    }

    // ========================================================================
    // Root Container Tests
    // ========================================================================

    #[test]
    fn root_containers_can_be_added_moved_and_removed() {
        let mut store = LayoutStore::new("Page");
        let first = root_id(&store);
        let second = store.add_root_container();
        store.move_root_container(second, 0).unwrap();
        assert_eq!(store.roots()[0].id, second);

        store.remove_root_container(second).unwrap();
        assert_eq!(store.roots().len(), 1);
        assert_eq!(
            store.remove_root_container(first),
            Err(LayoutError::CannotRemoveLastRoot)
        );
    }

    #[test]
    fn remove_nested_container_as_root_fails() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        store.add_root_container();
        let [a, _] = store.split_container(root).unwrap();
        assert_eq!(store.remove_root_container(a).map(|c| c.id), Err(LayoutError::NotARoot(a)));
    }

    #[test]
    fn clear_resets_to_single_empty_root() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        store.split_container(root).unwrap();
        store.add_root_container();
        store.clear();
        assert_eq!(store.roots().len(), 1);
        assert!(store.roots()[0].is_empty());
    }

    // ========================================================================
    // Save Status Tests
    // ========================================================================

    #[test]
    fn finish_save_marks_clean_when_unchanged() {
        let mut store = LayoutStore::new("Page");
        let ticket = store.begin_save();
        assert_eq!(store.meta().save_status, SaveStatus::Saving);
        store.finish_save(ticket.revision, Ok(()));
        assert_eq!(store.meta().save_status, SaveStatus::Saved);
        assert!(!store.is_dirty());
    }

    #[test]
    fn mutation_during_save_keeps_store_dirty() {
        let mut store = LayoutStore::new("Page");
        let root = root_id(&store);
        let ticket = store.begin_save();
        store.add_block(BlockSpec::paragraph("late"), root).unwrap();
        store.finish_save(ticket.revision, Ok(()));
        assert!(store.is_dirty());
        assert_eq!(store.meta().save_status, SaveStatus::Unsaved);
        assert!(ticket.document.containers[0].blocks().is_empty());
    }

    #[test]
    fn failed_save_is_reported() {
        let mut store = LayoutStore::new("Page");
        let ticket = store.begin_save();
        store.finish_save(ticket.revision, Err("disk full".to_string()));
        assert_eq!(
            store.meta().save_status,
            SaveStatus::Failed("disk full".to_string())
        );
        assert!(store.is_dirty());
    }

    #[test]
    fn publish_and_unpublish() {
        let mut store = LayoutStore::new("Page");
        store.publish();
        assert!(store.meta().publish_status.is_published());
        store.unpublish();
        assert_eq!(store.meta().publish_status, PublishStatus::Draft);
    }
}
