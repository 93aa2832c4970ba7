//! Shared utility functions used across command modules.

use std::future::Future;
use std::path::{Path, PathBuf};

use boardkit_core::config::{ConfigManager, EditorSettings};
use boardkit_core::layout::{BlockId, Container, ContainerId, LayoutStore, walk};
use boardkit_core::persistence::{FileRepository, LayoutRepository, load_store, save_store};
use boardkit_core::{LayoutDocument, ProjectId};

use crate::error::CliError;

/// Directories selected by the global command-line options
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Custom configuration directory
    pub config_dir: Option<PathBuf>,
    /// Custom documents directory
    pub documents_dir: Option<PathBuf>,
}

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Settings, repository and runtime for one command invocation
pub struct Workspace {
    /// Loaded editor settings
    pub settings: EditorSettings,
    /// Document storage
    pub repository: FileRepository,
    runtime: tokio::runtime::Runtime,
}

impl Workspace {
    /// Opens the workspace selected by `ctx`.
    pub fn open(ctx: &Context) -> Result<Self, CliError> {
        let config_manager = create_config_manager(ctx.config_dir.as_deref())?;
        let settings = config_manager
            .load_settings()
            .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))?;
        let dir = ctx
            .documents_dir
            .clone()
            .unwrap_or_else(|| config_manager.documents_dir());
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| CliError::Config(format!("Runtime error: {e}")))?;
        tracing::debug!(dir = %dir.display(), "Opened documents directory");
        Ok(Self {
            settings,
            repository: FileRepository::new(dir),
            runtime,
        })
    }

    /// Runs a future to completion.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Lists stored project IDs.
    pub fn project_ids(&self) -> Result<Vec<ProjectId>, CliError> {
        Ok(self.block_on(self.repository.list())?)
    }

    /// Loads every stored document.
    ///
    /// Unreadable documents are reported on stderr and skipped.
    pub fn documents(&self) -> Result<Vec<LayoutDocument>, CliError> {
        let mut documents = Vec::new();
        for id in self.project_ids()? {
            match self.block_on(self.repository.load(id)) {
                Ok(Some(document)) => documents.push(document),
                Ok(None) => {}
                Err(e) => eprintln!("Warning: skipping {id}: {e}"),
            }
        }
        Ok(documents)
    }

    /// Resolves a project by UUID, unique UUID prefix or title.
    pub fn resolve_project(&self, input: &str) -> Result<ProjectId, CliError> {
        let ids = self.project_ids()?;

        if let Ok(id) = input.parse::<ProjectId>() {
            return if ids.contains(&id) {
                Ok(id)
            } else {
                Err(CliError::project_not_found(id))
            };
        }

        let prefix = input.to_lowercase();
        let by_prefix: Vec<_> = ids
            .iter()
            .copied()
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect();
        match by_prefix.len() {
            1 => return Ok(by_prefix[0]),
            0 => {}
            _ => {
                return Err(CliError::InvalidArgument(format!(
                    "Ambiguous project prefix '{input}'"
                )));
            }
        }

        let by_title: Vec<_> = self
            .documents()?
            .into_iter()
            .filter(|doc| doc.title.eq_ignore_ascii_case(input))
            .map(|doc| doc.project_id)
            .collect();
        match by_title.len() {
            0 => Err(CliError::ProjectNotFound(input.to_string())),
            1 => Ok(by_title[0]),
            _ => Err(CliError::InvalidArgument(format!(
                "Ambiguous project title '{input}'. Use the project ID"
            ))),
        }
    }

    /// Loads a project into a store.
    pub fn load(&self, input: &str) -> Result<LayoutStore, CliError> {
        let id = self.resolve_project(input)?;
        Ok(self.block_on(load_store(&self.repository, id, self.settings.split_limits))?)
    }

    /// Saves a store.
    pub fn save(&self, store: &mut LayoutStore) -> Result<(), CliError> {
        Ok(self.block_on(save_store(&self.repository, store))?)
    }
}

/// Resolves a container by UUID or unique UUID prefix.
pub fn resolve_container(roots: &[Container], input: &str) -> Result<ContainerId, CliError> {
    let ids: Vec<_> = walk(roots).map(|c| c.id).collect();
    resolve_prefix(&ids, input, |id| id.as_uuid().to_string(), "container")
}

/// Resolves a block by UUID or unique UUID prefix.
pub fn resolve_block(roots: &[Container], input: &str) -> Result<BlockId, CliError> {
    let ids: Vec<_> = walk(roots)
        .flat_map(|c| c.blocks().iter().map(|b| b.id))
        .collect();
    resolve_prefix(&ids, input, |id| id.0.to_string(), "block")
}

fn resolve_prefix<T: Copy>(
    ids: &[T],
    input: &str,
    render: impl Fn(&T) -> String,
    what: &str,
) -> Result<T, CliError> {
    let needle = input.to_lowercase();
    if needle.is_empty() {
        return Err(CliError::InvalidArgument(format!("Empty {what} ID")));
    }
    let matches: Vec<_> = ids
        .iter()
        .filter(|id| render(id).starts_with(&needle))
        .collect();
    match matches.len() {
        0 => Err(CliError::InvalidArgument(format!("No {what} matches '{input}'"))),
        1 => Ok(*matches[0]),
        n => Err(CliError::InvalidArgument(format!(
            "Ambiguous {what} ID '{input}' matches {n} entries"
        ))),
    }
}
