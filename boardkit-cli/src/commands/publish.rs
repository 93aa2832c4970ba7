//! Publish command.

use crate::error::CliError;
use crate::util::{Context, Workspace};

/// Publish command handler
pub fn cmd_publish(ctx: &Context, project: &str, undo: bool) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let mut store = workspace.load(project)?;
    if undo {
        store.unpublish();
    } else {
        store.publish();
    }
    workspace.save(&mut store)?;

    let state = if undo { "draft" } else { "published" };
    println!("Page '{}' is now {state}", store.meta().title);
    Ok(())
}
