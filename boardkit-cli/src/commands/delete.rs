//! Delete command.

use boardkit_core::persistence::LayoutRepository;

use crate::error::CliError;
use crate::util::{Context, Workspace};

/// Delete command handler
pub fn cmd_delete(ctx: &Context, project: &str) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let id = workspace.resolve_project(project)?;
    if !workspace.block_on(workspace.repository.delete(id))? {
        return Err(CliError::project_not_found(id));
    }
    println!("Deleted page {id}");
    Ok(())
}
