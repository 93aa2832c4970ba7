//! Container tree structure for page layouts
//!
//! A document is an ordered sequence of root containers. Each container is
//! either a leaf holding blocks or a split node holding exactly two child
//! containers, which may themselves be split.
//!
//! # Tree Structure
//!
//! ```text
//! Root(level 0, split)
//! ├── Leaf(level 1, [heading, paragraph])
//! └── Split(level 1)
//!     ├── Leaf(level 2, [image])
//!     └── Leaf(level 2, [])
//! ```
//!
//! The leaf/split distinction is a tagged union, so a split node cannot hold
//! one or three children. The flat wire form with `isSplit` / `splitAreas`
//! lives in [`ContainerRecord`].

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::types::{BlockId, ContainerId};

/// A node in the layout tree (a "drop area").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ContainerRecord")]
pub struct Container {
    /// Unique identifier for this container.
    pub id: ContainerId,
    /// Number of splits between this container and its root.
    pub split_level: u32,
    /// Parent split node, for lookup only.
    pub parent_id: Option<ContainerId>,
    /// Leaf contents or split children.
    pub body: ContainerBody,
}

/// Contents of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerBody {
    /// A leaf holding an ordered sequence of blocks.
    Leaf {
        /// Blocks in display order.
        blocks: Vec<Block>,
    },
    /// A split node holding exactly two children.
    Split {
        /// First (left/top) and second (right/bottom) child.
        areas: Box<[Container; 2]>,
    },
}

/// A block found in the tree together with its owning container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLocation<'a> {
    /// The block.
    pub block: &'a Block,
    /// ID of the leaf holding the block.
    pub container_id: ContainerId,
    /// Position of the block within its container.
    pub index: usize,
}

impl Container {
    /// Creates an empty root-level leaf.
    #[must_use]
    pub fn new_root() -> Self {
        Self::new_leaf(ContainerId::new(), 0, None)
    }

    /// Creates an empty leaf with the given identity.
    #[must_use]
    pub const fn new_leaf(id: ContainerId, split_level: u32, parent_id: Option<ContainerId>) -> Self {
        Self {
            id,
            split_level,
            parent_id,
            body: ContainerBody::Leaf { blocks: Vec::new() },
        }
    }

    /// Creates a leaf holding `blocks`.
    ///
    /// The blocks' `drop_area_id` is rewritten to the new container.
    #[must_use]
    pub fn leaf_with_blocks(
        id: ContainerId,
        split_level: u32,
        parent_id: Option<ContainerId>,
        mut blocks: Vec<Block>,
    ) -> Self {
        for block in &mut blocks {
            block.drop_area_id = id;
        }
        Self {
            id,
            split_level,
            parent_id,
            body: ContainerBody::Leaf { blocks },
        }
    }

    /// Returns true if this is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.body, ContainerBody::Leaf { .. })
    }

    /// Returns true if this is a split node.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self.body, ContainerBody::Split { .. })
    }

    /// Returns the blocks of a leaf, or an empty slice for a split node.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        match &self.body {
            ContainerBody::Leaf { blocks } => blocks,
            ContainerBody::Split { .. } => &[],
        }
    }

    /// Returns the block vector of a leaf.
    #[must_use]
    pub fn blocks_mut(&mut self) -> Option<&mut Vec<Block>> {
        match &mut self.body {
            ContainerBody::Leaf { blocks } => Some(blocks),
            ContainerBody::Split { .. } => None,
        }
    }

    /// Returns the two children of a split node.
    #[must_use]
    pub fn children(&self) -> Option<&[Self; 2]> {
        match &self.body {
            ContainerBody::Leaf { .. } => None,
            ContainerBody::Split { areas } => Some(areas),
        }
    }

    /// Returns mutable references to the children of a split node.
    #[must_use]
    pub fn children_mut(&mut self) -> Option<&mut [Self; 2]> {
        match &mut self.body {
            ContainerBody::Leaf { .. } => None,
            ContainerBody::Split { areas } => Some(areas),
        }
    }

    /// Returns true if this container holds no blocks anywhere in its subtree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.body {
            ContainerBody::Leaf { blocks } => blocks.is_empty(),
            ContainerBody::Split { areas } => areas.iter().all(Self::is_empty),
        }
    }

    // ========================================================================
    // Tree Traversal Methods
    // ========================================================================

    /// Finds a container in this subtree by ID.
    #[must_use]
    pub fn find(&self, id: ContainerId) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.children()?.iter().find_map(|child| child.find(id))
    }

    /// Finds a container in this subtree by ID and returns a mutable reference.
    #[must_use]
    pub fn find_mut(&mut self, id: ContainerId) -> Option<&mut Self> {
        if self.id == id {
            return Some(self);
        }
        let [first, second] = self.children_mut()?;
        if let Some(found) = first.find_mut(id) {
            Some(found)
        } else {
            second.find_mut(id)
        }
    }

    /// Finds a block in this subtree.
    #[must_use]
    pub fn find_block(&self, block_id: BlockId) -> Option<BlockLocation<'_>> {
        match &self.body {
            ContainerBody::Leaf { blocks } => blocks
                .iter()
                .enumerate()
                .find(|(_, block)| block.id == block_id)
                .map(|(index, block)| BlockLocation {
                    block,
                    container_id: self.id,
                    index,
                }),
            ContainerBody::Split { areas } => {
                areas.iter().find_map(|child| child.find_block(block_id))
            }
        }
    }

    /// Returns the split node in this subtree whose children are exactly
    /// `a` and `b` (in either order).
    #[must_use]
    pub fn find_parent_of_pair(&self, a: ContainerId, b: ContainerId) -> Option<&Self> {
        let [first, second] = self.children()?;
        if (first.id == a && second.id == b) || (first.id == b && second.id == a) {
            return Some(self);
        }
        first
            .find_parent_of_pair(a, b)
            .or_else(|| second.find_parent_of_pair(a, b))
    }

    /// Returns the first leaf of this subtree (leftmost/topmost).
    #[must_use]
    pub fn first_leaf(&self) -> &Self {
        match &self.body {
            ContainerBody::Leaf { .. } => self,
            ContainerBody::Split { areas } => areas[0].first_leaf(),
        }
    }

    /// Returns the depth of this subtree.
    ///
    /// A leaf has depth 0. Each level of splits adds 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match &self.body {
            ContainerBody::Leaf { .. } => 0,
            ContainerBody::Split { areas } => 1 + areas[0].depth().max(areas[1].depth()),
        }
    }

    /// Returns an iterator over this subtree in pre-order.
    #[must_use]
    pub fn iter(&self) -> Containers<'_> {
        Containers { stack: vec![self] }
    }
}

/// Pre-order (document order) iterator over containers.
#[derive(Debug, Clone)]
pub struct Containers<'a> {
    stack: Vec<&'a Container>,
}

impl<'a> Iterator for Containers<'a> {
    type Item = &'a Container;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        if let Some([first, second]) = next.children() {
            self.stack.push(second);
            self.stack.push(first);
        }
        Some(next)
    }
}

// ============================================================================
// Root-sequence utilities
// ============================================================================

/// Returns an iterator over every container of a document in document order.
#[must_use]
pub fn walk(roots: &[Container]) -> Containers<'_> {
    Containers {
        stack: roots.iter().rev().collect(),
    }
}

/// Finds a container anywhere in the document.
#[must_use]
pub fn find_container(roots: &[Container], id: ContainerId) -> Option<&Container> {
    roots.iter().find_map(|root| root.find(id))
}

/// Finds a container anywhere in the document and returns a mutable reference.
#[must_use]
pub fn find_container_mut(roots: &mut [Container], id: ContainerId) -> Option<&mut Container> {
    roots.iter_mut().find_map(|root| root.find_mut(id))
}

/// Finds a block anywhere in the document together with its owning container.
#[must_use]
pub fn find_block(roots: &[Container], block_id: BlockId) -> Option<BlockLocation<'_>> {
    roots.iter().find_map(|root| root.find_block(block_id))
}

/// Returns a new document where the container `id` is replaced by
/// `update(&container)`.
///
/// All other containers are copied unchanged. If `id` is not in the
/// document, the copy equals the input.
#[must_use]
pub fn update_container<F>(roots: &[Container], id: ContainerId, update: F) -> Vec<Container>
where
    F: FnOnce(&Container) -> Container,
{
    let mut update = Some(update);
    roots
        .iter()
        .map(|root| rebuild(root, id, &mut update))
        .collect()
}

fn rebuild<F>(node: &Container, id: ContainerId, update: &mut Option<F>) -> Container
where
    F: FnOnce(&Container) -> Container,
{
    if node.id == id {
        if let Some(update) = update.take() {
            return update(node);
        }
    }
    match &node.body {
        ContainerBody::Split { areas } if update.is_some() => Container {
            id: node.id,
            split_level: node.split_level,
            parent_id: node.parent_id,
            body: ContainerBody::Split {
                areas: Box::new([
                    rebuild(&areas[0], id, update),
                    rebuild(&areas[1], id, update),
                ]),
            },
        },
        _ => node.clone(),
    }
}

/// Returns true if the container holds no blocks anywhere in its subtree.
#[must_use]
pub fn is_container_empty(container: &Container) -> bool {
    container.is_empty()
}

/// Drops root containers that hold no blocks anywhere in their subtree.
///
/// Used for preview rendering only; the authoritative tree is not touched.
#[must_use]
pub fn filter_non_empty_roots(roots: &[Container]) -> Vec<Container> {
    roots.iter().filter(|root| !root.is_empty()).cloned().collect()
}

/// Finds the split node whose two children are exactly `a` and `b`.
#[must_use]
pub fn find_parent_of_split_pair(
    roots: &[Container],
    a: ContainerId,
    b: ContainerId,
) -> Option<&Container> {
    if a == b {
        return None;
    }
    roots.iter().find_map(|root| root.find_parent_of_pair(a, b))
}

/// Returns true if `a` and `b` may be merged.
///
/// Both must exist, neither may be split, at least one must be empty, and
/// they must be the two children of the same split node.
#[must_use]
pub fn can_merge_containers(roots: &[Container], a: ContainerId, b: ContainerId) -> bool {
    let (Some(first), Some(second)) = (find_container(roots, a), find_container(roots, b)) else {
        return false;
    };
    if first.is_split() || second.is_split() {
        return false;
    }
    if !first.is_empty() && !second.is_empty() {
        return false;
    }
    find_parent_of_split_pair(roots, a, b).is_some()
}

/// Returns the number of containers in the document.
#[must_use]
pub fn container_count(roots: &[Container]) -> usize {
    walk(roots).count()
}

/// Returns the number of blocks in the document.
#[must_use]
pub fn block_count(roots: &[Container]) -> usize {
    walk(roots).map(|c| c.blocks().len()).sum()
}

/// Returns the IDs of all leaf containers in document order.
#[must_use]
pub fn leaf_ids(roots: &[Container]) -> Vec<ContainerId> {
    walk(roots).filter(|c| c.is_leaf()).map(|c| c.id).collect()
}

// ============================================================================
// Wire form
// ============================================================================

/// Flat serialized form of a container.
///
/// This is the shape persisted in documents. Converting a record back into a
/// [`Container`] goes through document validation, which rejects records
/// that break the leaf/split invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRecord {
    /// Container ID
    pub id: ContainerId,
    /// Blocks (leaves only)
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Whether the container is split
    #[serde(default)]
    pub is_split: bool,
    /// Children (exactly two when split)
    #[serde(default)]
    pub split_areas: Vec<ContainerRecord>,
    /// Split depth
    #[serde(default)]
    pub split_level: u32,
    /// Parent split node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ContainerId>,
}

impl From<Container> for ContainerRecord {
    fn from(container: Container) -> Self {
        let (blocks, is_split, split_areas) = match container.body {
            ContainerBody::Leaf { blocks } => (blocks, false, Vec::new()),
            ContainerBody::Split { areas } => {
                let [first, second] = *areas;
                (Vec::new(), true, vec![first.into(), second.into()])
            }
        };
        Self {
            id: container.id,
            blocks,
            is_split,
            split_areas,
            split_level: container.split_level,
            parent_id: container.parent_id,
        }
    }
}
