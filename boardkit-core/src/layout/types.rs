//! Core type definitions for the layout tree
//!
//! This module contains the identifier newtypes and small enums shared by
//! the tree, the store, the drag reconciler and the viewport projection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a container (drop area) in a layout tree.
///
/// A container keeps its ID across splits and merges: splitting a leaf keeps
/// the ID on the resulting split node, and merging two children restores a
/// leaf under the parent's ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub Uuid);

impl ContainerId {
    /// Creates a new random container ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a container ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ContainerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Container({})", self.0)
    }
}

impl FromStr for ContainerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique identifier for a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Creates a new random block ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a block ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.0)
    }
}

impl FromStr for BlockId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique identifier for the project that owns a layout document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    /// Creates a new random project ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    // Bare UUID: project IDs double as repository file stems.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Display breakpoint used to project the tree into a composition.
///
/// Each viewport has its own composition rules and its own cap on how deep
/// containers may be split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// Wide layouts; splits render side by side at any depth.
    #[default]
    Desktop,
    /// Medium layouts; second-level splits render as a 2x2 grid.
    Tablet,
    /// Narrow layouts; every split renders stacked.
    Mobile,
}

impl Viewport {
    /// Returns all viewports, widest first.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Desktop, Self::Tablet, Self::Mobile]
    }

    /// Returns the lowercase name used in documents and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "tablet" => Ok(Self::Tablet),
            "mobile" | "phone" => Ok(Self::Mobile),
            other => Err(format!("unknown viewport: {other}")),
        }
    }
}

/// Maximum split level per viewport.
///
/// A container at `split_level == max` cannot be split further. Mobile
/// allows shallower nesting than the wider breakpoints since it always
/// stacks regardless of topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitLimits {
    /// Cap for desktop layouts.
    pub desktop: u32,
    /// Cap for tablet layouts.
    pub tablet: u32,
    /// Cap for mobile layouts.
    pub mobile: u32,
}

/// Default desktop split cap (two levels give four columns in a row).
pub const DEFAULT_DESKTOP_MAX_SPLIT_LEVEL: u32 = 2;

/// Default tablet split cap (two levels give the 2x2 grid).
pub const DEFAULT_TABLET_MAX_SPLIT_LEVEL: u32 = 2;

/// Default mobile split cap.
pub const DEFAULT_MOBILE_MAX_SPLIT_LEVEL: u32 = 1;

impl Default for SplitLimits {
    fn default() -> Self {
        Self {
            desktop: DEFAULT_DESKTOP_MAX_SPLIT_LEVEL,
            tablet: DEFAULT_TABLET_MAX_SPLIT_LEVEL,
            mobile: DEFAULT_MOBILE_MAX_SPLIT_LEVEL,
        }
    }
}

impl SplitLimits {
    /// Returns the cap for a viewport.
    #[must_use]
    pub const fn max_for(&self, viewport: Viewport) -> u32 {
        match viewport {
            Viewport::Desktop => self.desktop,
            Viewport::Tablet => self.tablet,
            Viewport::Mobile => self.mobile,
        }
    }

    /// Returns the most permissive cap across all viewports.
    ///
    /// This is the structural limit the store enforces on plain splits.
    #[must_use]
    pub fn structural_max(&self) -> u32 {
        self.desktop.max(self.tablet).max(self.mobile)
    }
}
