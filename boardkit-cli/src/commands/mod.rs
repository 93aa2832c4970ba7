//! Command handler modules for the CLI.

mod block;
mod completions;
mod delete;
mod edit;
mod list;
mod new;
mod publish;
mod section;
mod show;
mod stats;
mod validate;

use crate::cli::Commands;
use crate::error::CliError;
use crate::util::Context;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(ctx: &Context, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::New { title, description } => new::cmd_new(ctx, title, description),
        Commands::List { format } => list::cmd_list(ctx, format),
        Commands::Show {
            project,
            viewport,
            preview,
            format,
        } => show::cmd_show(ctx, &project, viewport.map(Into::into), preview, format),
        Commands::Validate { file } => validate::cmd_validate(&file),
        Commands::Split {
            project,
            container,
            viewport,
        } => edit::cmd_split(ctx, &project, &container, viewport.map(Into::into)),
        Commands::Merge {
            project,
            first,
            second,
        } => edit::cmd_merge(ctx, &project, &first, &second),
        Commands::Block(subcmd) => block::cmd_block(ctx, subcmd),
        Commands::Section(subcmd) => section::cmd_section(ctx, subcmd),
        Commands::Publish { project, undo } => publish::cmd_publish(ctx, &project, undo),
        Commands::Delete { project } => delete::cmd_delete(ctx, &project),
        Commands::Stats { project } => stats::cmd_stats(ctx, project.as_deref()),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
