//! Crate-wide error type
//!
//! Each module has its own error enum; [`BoardkitError`] wraps them so
//! applications can propagate any of them with `?`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::document::{DocumentError, ValidationError};
use crate::layout::{DragError, LayoutError};
use crate::persistence::PersistenceError;
use crate::tracing::TracingError;

/// Any error produced by `boardkit-core`
#[derive(Debug, Error)]
pub enum BoardkitError {
    /// A layout mutation was rejected
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A drag could not be started or ended
    #[error(transparent)]
    Drag(#[from] DragError),

    /// A document could not be parsed, serialized or validated
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Storage failed
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Settings could not be loaded or saved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging could not be initialized
    #[error(transparent)]
    Tracing(#[from] TracingError),
}

impl From<ValidationError> for BoardkitError {
    fn from(err: ValidationError) -> Self {
        Self::Document(DocumentError::Invalid(err))
    }
}

impl BoardkitError {
    /// Returns true if the error comes from a malformed or invalid document
    #[must_use]
    pub const fn is_invalid_document(&self) -> bool {
        matches!(
            self,
            Self::Document(_) | Self::Persistence(PersistenceError::Document(_))
        )
    }
}

/// Result type for `boardkit-core` operations
pub type BoardkitResult<T> = std::result::Result<T, BoardkitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ContainerId;

    #[test]
    fn layout_errors_convert() {
        let err: BoardkitError = LayoutError::ContainerNotFound(ContainerId::new()).into();
        assert!(matches!(err, BoardkitError::Layout(_)));
        assert!(!err.is_invalid_document());
    }

    #[test]
    fn validation_errors_are_document_errors() {
        let err: BoardkitError = ValidationError::BlocksOnSplitNode(ContainerId::new()).into();
        assert!(err.is_invalid_document());
        assert!(err.to_string().contains("split"));
    }

    #[test]
    fn stored_document_errors_are_invalid_documents() {
        let err: BoardkitError =
            PersistenceError::Document(DocumentError::Parse("eof".to_string())).into();
        assert!(err.is_invalid_document());
    }
}
