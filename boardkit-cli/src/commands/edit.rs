//! Split and merge commands.

use boardkit_core::layout::Viewport;

use crate::error::CliError;
use crate::util::{Context, Workspace, resolve_container};

/// Split command handler
pub fn cmd_split(
    ctx: &Context,
    project: &str,
    container: &str,
    viewport: Option<Viewport>,
) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let mut store = workspace.load(project)?;
    let id = resolve_container(store.roots(), container)?;

    let [first, second] = match viewport {
        Some(viewport) => store.split_container_for(id, viewport),
        None => store.split_container(id),
    }
    .map_err(|e| CliError::Layout(e.to_string()))?;
    workspace.save(&mut store)?;

    println!("Split {} into:", id.as_uuid());
    println!("  {}", first.as_uuid());
    println!("  {}", second.as_uuid());
    Ok(())
}

/// Merge command handler
pub fn cmd_merge(ctx: &Context, project: &str, first: &str, second: &str) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let mut store = workspace.load(project)?;
    let a = resolve_container(store.roots(), first)?;
    let b = resolve_container(store.roots(), second)?;

    let merged = store
        .merge_containers(a, b)
        .map_err(|e| CliError::Layout(e.to_string()))?;
    workspace.save(&mut store)?;

    println!("Merged into {}", merged.as_uuid());
    Ok(())
}
