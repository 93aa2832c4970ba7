//! Directory-backed repository, one file per project

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{LayoutRepository, PersistenceResult};
use crate::document::{DocumentFormat, LayoutDocument};
use crate::layout::ProjectId;

/// Stores each project as `<project-id>.<ext>` in a directory
///
/// Writes go to a temporary file in the same directory that is then renamed
/// over the target, so a crash never leaves a half-written document.
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
    format: DocumentFormat,
}

impl FileRepository {
    /// Creates a JSON repository in `dir`
    ///
    /// The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            format: DocumentFormat::Json,
        }
    }

    /// Sets the file format used for new saves
    #[must_use]
    pub const fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the storage directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path for a project
    #[must_use]
    pub fn path_for(&self, project_id: ProjectId) -> PathBuf {
        self.dir
            .join(format!("{project_id}.{}", self.format.extension()))
    }

    fn temp_path_for(&self, project_id: ProjectId) -> PathBuf {
        self.dir
            .join(format!(".{project_id}.{}.tmp", self.format.extension()))
    }
}

#[async_trait]
impl LayoutRepository for FileRepository {
    async fn save(&self, project_id: ProjectId, document: &LayoutDocument) -> PersistenceResult<()> {
        let content = document.to_format(self.format)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp = self.temp_path_for(project_id);
        tokio::fs::write(&temp, content).await?;
        if let Err(e) = tokio::fs::rename(&temp, self.path_for(project_id)).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn load(&self, project_id: ProjectId) -> PersistenceResult<Option<LayoutDocument>> {
        let path = self.path_for(project_id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let document = LayoutDocument::from_format(&content, self.format)?;
        if document.project_id != project_id {
            tracing::warn!(
                file = %path.display(),
                stored = %document.project_id,
                "Document project ID differs from its file name"
            );
        }
        Ok(Some(document))
    }

    async fn delete(&self, project_id: ProjectId) -> PersistenceResult<bool> {
        match tokio::fs::remove_file(self.path_for(project_id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> PersistenceResult<Vec<ProjectId>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.format.extension()) {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<ProjectId>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn backend_id(&self) -> &'static str {
        "file"
    }
}
