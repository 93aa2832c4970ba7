//! Block management commands.

use boardkit_core::layout::{
    BlockAttributes, BlockContent, BlockKind, BlockSpec, LayoutError, MediaRef,
};

use crate::cli::BlockCommands;
use crate::error::CliError;
use crate::util::{Context, Workspace, resolve_block, resolve_container};

/// Block command handler
pub fn cmd_block(ctx: &Context, subcmd: BlockCommands) -> Result<(), CliError> {
    match subcmd {
        BlockCommands::Add {
            project,
            container,
            kind,
            text,
            level,
            url,
            index,
        } => {
            let spec = build_spec(&kind, text, level, url)?;
            cmd_block_add(ctx, &project, &container, spec, index)
        }
        BlockCommands::Move {
            project,
            block,
            dest,
            index,
        } => cmd_block_move(ctx, &project, &block, &dest, index),
        BlockCommands::Remove { project, block } => cmd_block_remove(ctx, &project, &block),
    }
}

/// Builds a block spec from command-line values.
fn build_spec(
    kind: &str,
    text: Option<String>,
    level: Option<u8>,
    url: Option<String>,
) -> Result<BlockSpec, CliError> {
    let kind: BlockKind = kind.parse().map_err(CliError::InvalidArgument)?;
    let content = match (kind, text, url) {
        (_, Some(_), Some(_)) => {
            return Err(CliError::InvalidArgument(
                "--text and --url cannot be combined".to_string(),
            ));
        }
        (BlockKind::Button, Some(label), None) => BlockContent::Button { label, href: None },
        (_, Some(text), None) => BlockContent::text(text),
        (_, None, Some(url)) => BlockContent::Media(MediaRef::new(url)),
        (_, None, None) => BlockContent::Empty,
    };

    let mut spec = BlockSpec::new(kind).with_content(content);
    if let Some(level) = level {
        if kind != BlockKind::Heading {
            return Err(CliError::InvalidArgument(
                "--level only applies to headings".to_string(),
            ));
        }
        let attributes = BlockAttributes {
            heading_level: Some(level),
            ..spec.attributes
        };
        spec = spec.with_attributes(attributes);
    }
    Ok(spec)
}

fn cmd_block_add(
    ctx: &Context,
    project: &str,
    container: &str,
    spec: BlockSpec,
    index: Option<usize>,
) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let mut store = workspace.load(project)?;
    let container = resolve_container(store.roots(), container)?;

    let block = store
        .insert_block(spec, container, index.unwrap_or(usize::MAX))
        .map_err(layout_error)?;
    workspace.save(&mut store)?;

    println!("Added block {} to {}", block.0, container.as_uuid());
    Ok(())
}

fn cmd_block_move(
    ctx: &Context,
    project: &str,
    block: &str,
    dest: &str,
    index: Option<usize>,
) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let mut store = workspace.load(project)?;
    let block = resolve_block(store.roots(), block)?;
    let dest = resolve_container(store.roots(), dest)?;
    let source = store
        .find_block(block)
        .map(|location| location.container_id)
        .ok_or_else(|| layout_error(LayoutError::BlockNotFound(block)))?;

    store
        .move_block(block, source, dest, index)
        .map_err(layout_error)?;
    workspace.save(&mut store)?;

    println!("Moved block {} to {}", block.0, dest.as_uuid());
    Ok(())
}

fn cmd_block_remove(ctx: &Context, project: &str, block: &str) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let mut store = workspace.load(project)?;
    let block = resolve_block(store.roots(), block)?;

    let removed = store.remove_block(block).map_err(layout_error)?;
    workspace.save(&mut store)?;

    println!("Removed {} block {}", removed.kind, removed.id.0);
    Ok(())
}

fn layout_error(err: LayoutError) -> CliError {
    CliError::Layout(err.to_string())
}
