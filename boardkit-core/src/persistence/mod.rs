//! Storage collaborator for layout documents
//!
//! The editor never talks to storage directly; it hands an owned
//! [`LayoutDocument`] snapshot to a [`LayoutRepository`] and keeps mutating
//! the tree while the save runs. Repositories do not retry; failures are
//! reported to the caller, which records them in the store's save status.

mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;
use tracing::Instrument;

use crate::document::{DocumentError, LayoutDocument};
use crate::layout::{LayoutStore, ProjectId, SplitLimits};
use crate::tracing::span_names;

pub use file::FileRepository;
pub use memory::MemoryRepository;

/// Errors that can occur while persisting documents
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be read or written
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// No document is stored for the project
    #[error("No document stored for project {0}")]
    NotFound(ProjectId),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Async storage for layout documents, one per project
#[async_trait]
pub trait LayoutRepository: Send + Sync {
    /// Stores a document, replacing any previous one for the same project
    async fn save(&self, project_id: ProjectId, document: &LayoutDocument) -> PersistenceResult<()>;

    /// Loads the document of a project, `None` if nothing is stored
    async fn load(&self, project_id: ProjectId) -> PersistenceResult<Option<LayoutDocument>>;

    /// Removes the document of a project
    ///
    /// Returns `true` if a document was removed
    async fn delete(&self, project_id: ProjectId) -> PersistenceResult<bool>;

    /// Lists the projects with a stored document
    async fn list(&self) -> PersistenceResult<Vec<ProjectId>>;

    /// Short identifier of the backend for logs
    fn backend_id(&self) -> &'static str;
}

/// Saves the current state of a store
///
/// The store is only borrowed to take the snapshot and to record the
/// outcome; mutations made in between keep the store dirty.
///
/// # Errors
///
/// Returns the repository error after recording it in the store
pub async fn save_store<R>(repository: &R, store: &mut LayoutStore) -> PersistenceResult<()>
where
    R: LayoutRepository + ?Sized,
{
    let ticket = store.begin_save();
    let project_id = ticket.document.project_id;
    let result = save_snapshot(repository, &ticket.document).await;
    match &result {
        Ok(()) => {
            store.finish_save(ticket.revision, Ok(()));
            tracing::debug!(project = %project_id, revision = ticket.revision, "Saved layout");
        }
        Err(e) => store.finish_save(ticket.revision, Err(e.to_string())),
    }
    result
}

/// Saves a document snapshot under its own project ID
///
/// # Errors
///
/// Returns the repository error
pub async fn save_snapshot<R>(repository: &R, document: &LayoutDocument) -> PersistenceResult<()>
where
    R: LayoutRepository + ?Sized,
{
    let span = crate::trace_operation!(
        span_names::DOCUMENT_SAVE,
        project = %document.project_id,
        backend = repository.backend_id()
    );
    repository
        .save(document.project_id, document)
        .instrument(span)
        .await
}

/// Loads a project into a new store
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if nothing is stored, or the
/// repository error
pub async fn load_store<R>(
    repository: &R,
    project_id: ProjectId,
    limits: SplitLimits,
) -> PersistenceResult<LayoutStore>
where
    R: LayoutRepository + ?Sized,
{
    let span = crate::trace_operation!(
        span_names::DOCUMENT_LOAD,
        project = %project_id,
        backend = repository.backend_id()
    );
    let document = repository
        .load(project_id)
        .instrument(span)
        .await?
        .ok_or(PersistenceError::NotFound(project_id))?;
    Ok(LayoutStore::from_document(document, limits))
}
