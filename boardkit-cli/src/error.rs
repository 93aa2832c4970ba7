//! CLI error types and exit codes.

use boardkit_core::document::DocumentError;
use boardkit_core::persistence::PersistenceError;
use boardkit_core::{BoardkitError, ProjectId};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, lookup, rejected edits, I/O
    pub const GENERAL_ERROR: i32 = 1;
    /// The document is malformed or breaks a layout invariant
    pub const INVALID_DOCUMENT: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No document stored for the project
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// The layout refused the edit
    #[error("Layout error: {0}")]
    Layout(String),

    /// The document could not be parsed or validated
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Bad command-line value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BoardkitError> for CliError {
    fn from(err: BoardkitError) -> Self {
        match err {
            BoardkitError::Layout(e) => Self::Layout(e.to_string()),
            BoardkitError::Drag(e) => Self::Layout(e.to_string()),
            BoardkitError::Document(e) => Self::InvalidDocument(e.to_string()),
            BoardkitError::Persistence(e) => e.into(),
            BoardkitError::Config(e) => Self::Config(e.to_string()),
            BoardkitError::Tracing(e) => Self::Config(e.to_string()),
        }
    }
}

impl From<PersistenceError> for CliError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(id) => Self::ProjectNotFound(id.to_string()),
            PersistenceError::Document(e) => Self::InvalidDocument(e.to_string()),
            PersistenceError::Io(e) => Self::Storage(e.to_string()),
        }
    }
}

impl From<DocumentError> for CliError {
    fn from(err: DocumentError) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}

impl CliError {
    /// Creates a not-found error for a project.
    pub fn project_not_found(id: ProjectId) -> Self {
        Self::ProjectNotFound(id.to_string())
    }

    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, lookup, rejected edit, IO)
    /// - 2: Invalid document (parse or validation failure)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidDocument(_) => exit_codes::INVALID_DOCUMENT,
            Self::Config(_)
            | Self::ProjectNotFound(_)
            | Self::Layout(_)
            | Self::Storage(_)
            | Self::InvalidArgument(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
