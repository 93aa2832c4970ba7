//! Section (root container) commands.

use crate::cli::SectionCommands;
use crate::error::CliError;
use crate::util::{Context, Workspace, resolve_container};

/// Section command handler
pub fn cmd_section(ctx: &Context, subcmd: SectionCommands) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    match subcmd {
        SectionCommands::Add { project } => {
            let mut store = workspace.load(&project)?;
            let id = store.add_root_container();
            workspace.save(&mut store)?;
            println!("Added section {}", id.as_uuid());
        }
        SectionCommands::Move {
            project,
            section,
            index,
        } => {
            let mut store = workspace.load(&project)?;
            let id = resolve_container(store.roots(), &section)?;
            store
                .move_root_container(id, index)
                .map_err(|e| CliError::Layout(e.to_string()))?;
            workspace.save(&mut store)?;
            println!("Moved section {}", id.as_uuid());
        }
        SectionCommands::Remove { project, section } => {
            let mut store = workspace.load(&project)?;
            let id = resolve_container(store.roots(), &section)?;
            store
                .remove_root_container(id)
                .map_err(|e| CliError::Layout(e.to_string()))?;
            workspace.save(&mut store)?;
            println!("Removed section {}", id.as_uuid());
        }
    }
    Ok(())
}
