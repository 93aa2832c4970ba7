//! Create a new layout document.

use boardkit_core::layout::LayoutStore;

use crate::error::CliError;
use crate::util::{Context, Workspace};

/// New document command handler
pub fn cmd_new(
    ctx: &Context,
    title: Option<String>,
    description: Option<String>,
) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let title = title.unwrap_or_else(|| workspace.settings.documents.default_title.clone());
    if title.trim().is_empty() {
        return Err(CliError::InvalidArgument("Title must not be empty".to_string()));
    }

    let mut store = LayoutStore::with_limits(title, workspace.settings.split_limits);
    if description.is_some() {
        store.set_description(description);
    }
    workspace.save(&mut store)?;

    let meta = store.meta();
    println!("Created page '{}' with ID: {}", meta.title, meta.project_id);
    println!("  Section: {}", store.roots()[0].id.as_uuid());
    Ok(())
}
