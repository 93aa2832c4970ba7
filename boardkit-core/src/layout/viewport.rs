//! Viewport projection of the layout tree
//!
//! The same container tree renders differently per breakpoint. These
//! functions compute a [`Composition`] describing the arrangement without
//! touching the tree:
//!
//! - desktop: every split renders side by side, at any depth
//! - tablet: a split whose children are leaves renders side by side; a
//!   split with a split child becomes a 2x2 grid of its grandchildren, and
//!   anything below [`TABLET_GRID_DEPTH`] stacks
//! - mobile: every split stacks
//!
//! In preview mode empty containers are elided and a split with only one
//! non-empty side collapses to that side.

use std::fmt;

use super::block::Block;
use super::tree::{Container, ContainerBody, is_container_empty};
use super::types::{ContainerId, Viewport};

/// Number of split levels rendered side by side on tablets.
///
/// A split with a split child inside this range becomes a grid; splits
/// nested at or below this many levels under the rendered container stack.
pub const TABLET_GRID_DEPTH: usize = 2;

/// Columns of the tablet grid.
pub const TABLET_GRID_COLUMNS: u8 = 2;

/// Whether empty drop targets are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Editor view; empty leaves stay visible as drop targets.
    #[default]
    Edit,
    /// Preview or published view; empty containers are elided.
    Preview,
}

/// One cell of a tablet grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell<'a> {
    /// Cell content
    pub content: Composition<'a>,
    /// Number of columns the cell spans
    pub column_span: u8,
}

/// Arrangement of a rendered subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition<'a> {
    /// A leaf and its blocks
    Leaf {
        /// Leaf container
        id: ContainerId,
        /// Blocks in display order
        blocks: &'a [Block],
    },
    /// Children side by side
    Row {
        /// Split container
        id: ContainerId,
        /// Rendered children, left to right
        children: Vec<Self>,
    },
    /// Children stacked
    Column {
        /// Split container
        id: ContainerId,
        /// Rendered children, top to bottom
        children: Vec<Self>,
    },
    /// Grandchildren as grid cells
    Grid {
        /// Split container at the root of the grid
        id: ContainerId,
        /// Cells in row-major order
        cells: Vec<GridCell<'a>>,
    },
}

impl Composition<'_> {
    /// Returns the container this composition was rendered from.
    #[must_use]
    pub const fn id(&self) -> ContainerId {
        match self {
            Self::Leaf { id, .. }
            | Self::Row { id, .. }
            | Self::Column { id, .. }
            | Self::Grid { id, .. } => *id,
        }
    }

    /// Returns the number of leaves in this composition.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Row { children, .. } | Self::Column { children, .. } => {
                children.iter().map(Self::leaf_count).sum()
            }
            Self::Grid { cells, .. } => cells.iter().map(|cell| cell.content.leaf_count()).sum(),
        }
    }

    /// Returns true if any part of this composition is side by side.
    #[must_use]
    pub fn has_horizontal(&self) -> bool {
        match self {
            Self::Leaf { .. } => false,
            Self::Row { .. } | Self::Grid { .. } => true,
            Self::Column { children, .. } => children.iter().any(Self::has_horizontal),
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            Self::Leaf { id, blocks } => writeln!(f, "{pad}leaf {} ({} blocks)", id.as_uuid(), blocks.len()),
            Self::Row { id, children } | Self::Column { id, children } => {
                let name = if matches!(self, Self::Row { .. }) { "row" } else { "column" };
                writeln!(f, "{pad}{name} {}", id.as_uuid())?;
                children
                    .iter()
                    .try_for_each(|child| child.write_indented(f, indent + 1))
            }
            Self::Grid { id, cells } => {
                writeln!(f, "{pad}grid {}", id.as_uuid())?;
                for cell in cells {
                    writeln!(f, "{pad}  cell span={}", cell.column_span)?;
                    cell.content.write_indented(f, indent + 2)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Composition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Renders one container for a viewport.
///
/// Returns `None` only in preview mode, for a container with no blocks.
#[must_use]
pub fn render_container(
    container: &Container,
    viewport: Viewport,
    mode: RenderMode,
) -> Option<Composition<'_>> {
    match viewport {
        Viewport::Desktop => render_linear(container, mode, Axis::Horizontal),
        Viewport::Mobile => render_linear(container, mode, Axis::Vertical),
        Viewport::Tablet => render_tablet(container, mode, 0),
    }
}

/// Renders the root sequence of a document for a viewport.
///
/// Preview mode drops empty roots before rendering, matching
/// [`filter_non_empty_roots`](super::tree::filter_non_empty_roots).
#[must_use]
pub fn render_document(
    roots: &[Container],
    viewport: Viewport,
    mode: RenderMode,
) -> Vec<Composition<'_>> {
    match mode {
        RenderMode::Edit => roots
            .iter()
            .filter_map(|root| render_container(root, viewport, mode))
            .collect(),
        RenderMode::Preview => roots
            .iter()
            .filter(|root| !is_container_empty(root))
            .filter_map(|root| render_container(root, viewport, mode))
            .collect(),
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn render_leaf(container: &Container, mode: RenderMode) -> Option<Composition<'_>> {
    if mode == RenderMode::Preview && container.is_empty() {
        return None;
    }
    Some(Composition::Leaf {
        id: container.id,
        blocks: container.blocks(),
    })
}

fn render_linear(container: &Container, mode: RenderMode, axis: Axis) -> Option<Composition<'_>> {
    let ContainerBody::Split { areas } = &container.body else {
        return render_leaf(container, mode);
    };
    let children: Vec<_> = areas
        .iter()
        .filter_map(|child| render_linear(child, mode, axis))
        .collect();
    wrap(container.id, children, |id, children| match axis {
        Axis::Horizontal => Composition::Row { id, children },
        Axis::Vertical => Composition::Column { id, children },
    })
}

/// Renders a subtree for tablets; `depth` counts split levels above it.
fn render_tablet(container: &Container, mode: RenderMode, depth: usize) -> Option<Composition<'_>> {
    let ContainerBody::Split { areas } = &container.body else {
        return render_leaf(container, mode);
    };
    if depth >= TABLET_GRID_DEPTH {
        return render_linear(container, mode, Axis::Vertical);
    }
    if depth + 2 <= TABLET_GRID_DEPTH && areas.iter().any(Container::is_split) {
        return render_grid(container.id, areas, mode, depth);
    }
    let children: Vec<_> = areas
        .iter()
        .filter_map(|child| render_tablet(child, mode, depth + 1))
        .collect();
    wrap(container.id, children, |id, children| Composition::Row { id, children })
}

/// Builds the 2x2 grid for a split with at least one split child.
///
/// A split child contributes its two children as one cell each; a leaf child
/// fills its whole grid row. The grid spans two split levels, so cells are
/// rendered two levels below `depth`.
fn render_grid<'a>(
    id: ContainerId,
    areas: &'a [Container; 2],
    mode: RenderMode,
    depth: usize,
) -> Option<Composition<'a>> {
    let mut cells = Vec::with_capacity(4);
    for child in areas {
        match child.children() {
            Some(grandchildren) => {
                let row: Vec<_> = grandchildren
                    .iter()
                    .filter_map(|g| render_tablet(g, mode, depth + 2))
                    .collect();
                let span = if row.len() == 1 { TABLET_GRID_COLUMNS } else { 1 };
                cells.extend(row.into_iter().map(|content| GridCell {
                    content,
                    column_span: span,
                }));
            }
            None => {
                if let Some(content) = render_leaf(child, mode) {
                    cells.push(GridCell {
                        content,
                        column_span: TABLET_GRID_COLUMNS,
                    });
                }
            }
        }
    }
    match cells.len() {
        0 => None,
        1 => cells.pop().map(|cell| cell.content),
        _ => Some(Composition::Grid { id, cells }),
    }
}

/// Wraps rendered children, collapsing a split with one survivor.
fn wrap<'a>(
    id: ContainerId,
    mut children: Vec<Composition<'a>>,
    build: impl FnOnce(ContainerId, Vec<Composition<'a>>) -> Composition<'a>,
) -> Option<Composition<'a>> {
    match children.len() {
        0 => None,
        1 => children.pop(),
        _ => Some(build(id, children)),
    }
}
