//! In-memory repository for tests and previews

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{LayoutRepository, PersistenceResult};
use crate::document::LayoutDocument;
use crate::layout::ProjectId;

/// Keeps serialized documents in memory
///
/// Documents are stored as JSON text and parsed again on load, so the
/// validation path is the same as for the file backend. Clones share the
/// same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    documents: Arc<RwLock<HashMap<ProjectId, String>>>,
}

impl MemoryRepository {
    /// Creates an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text for a project, bypassing serialization
    ///
    /// Useful to simulate documents written by other tools.
    pub async fn insert_raw(&self, project_id: ProjectId, json: impl Into<String>) {
        self.documents.write().await.insert(project_id, json.into());
    }

    /// Returns the number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Returns true if nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl LayoutRepository for MemoryRepository {
    async fn save(&self, project_id: ProjectId, document: &LayoutDocument) -> PersistenceResult<()> {
        let json = document.to_json()?;
        self.documents.write().await.insert(project_id, json);
        Ok(())
    }

    async fn load(&self, project_id: ProjectId) -> PersistenceResult<Option<LayoutDocument>> {
        let guard = self.documents.read().await;
        guard
            .get(&project_id)
            .map(|json| LayoutDocument::from_json(json))
            .transpose()
            .map_err(Into::into)
    }

    async fn delete(&self, project_id: ProjectId) -> PersistenceResult<bool> {
        Ok(self.documents.write().await.remove(&project_id).is_some())
    }

    async fn list(&self) -> PersistenceResult<Vec<ProjectId>> {
        let mut ids: Vec<_> = self.documents.read().await.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn backend_id(&self) -> &'static str {
        "memory"
    }
}
