//! `Boardkit` Core Library
//!
//! This crate provides the data model of a nested drop-area page editor:
//! a tree of containers that split into two halves, content blocks living in
//! the leaves, drag-and-drop reconciliation, per-viewport rendering and a
//! validated document format.
//!
//! # Crate Structure
//!
//! - [`layout`] - Container tree, layout store, drag reconciliation, viewport projection
//! - [`document`] - Persisted document format and structural validation
//! - [`persistence`] - Async repositories (file and in-memory)
//! - [`config`] - Editor settings and their location on disk
//! - [`tracing`] - Structured logging setup and span names
//! - [`error`] - Crate-wide error type

#![warn(missing_docs)]

pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod persistence;
pub mod tracing;

// =============================================================================
// Convenience re-exports
// =============================================================================

pub use config::{ConfigError, ConfigManager, EditorSettings};
pub use document::{
    DOCUMENT_FORMAT_VERSION, DocumentError, DocumentFormat, LayoutDocument, PublishStatus,
    ValidationError,
};
pub use error::{BoardkitError, BoardkitResult};
pub use layout::{
    Block, BlockId, BlockKind, BlockSpec, Composition, Container, ContainerId, DragReconciler,
    DropOutcome, DropTarget, LayoutError, LayoutStore, ProjectId, RenderMode, SplitLimits,
    Viewport,
};
pub use persistence::{
    FileRepository, LayoutRepository, MemoryRepository, PersistenceError, load_store, save_store,
};
pub use tracing::{TracingConfig, TracingLevel, init_tracing};
