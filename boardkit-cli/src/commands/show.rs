//! Show a layout document.

use boardkit_core::layout::{
    Block, BlockContent, Container, ContainerBody, LayoutStore, RenderMode, Viewport,
    filter_non_empty_roots, render_document,
};

use crate::cli::ShowFormat;
use crate::error::CliError;
use crate::util::{Context, Workspace};

/// Longest text excerpt printed for a block
const EXCERPT_LEN: usize = 40;

/// Show command handler
pub fn cmd_show(
    ctx: &Context,
    project: &str,
    viewport: Option<Viewport>,
    preview: bool,
    format: ShowFormat,
) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let store = workspace.load(project)?;

    match format {
        ShowFormat::Json => println!("{}", store.to_document().to_json()?),
        ShowFormat::Yaml => print!("{}", store.to_document().to_yaml()?),
        ShowFormat::Tree => print_tree(&store, viewport, preview),
    }
    Ok(())
}

fn print_tree(store: &LayoutStore, viewport: Option<Viewport>, preview: bool) {
    let meta = store.meta();
    println!("Page: {}", meta.title);
    println!("  ID:      {}", meta.project_id);
    if let Some(ref description) = meta.description {
        println!("  About:   {description}");
    }
    println!(
        "  Status:  {}",
        if meta.publish_status.is_published() {
            "published"
        } else {
            "draft"
        }
    );
    println!("  Updated: {}", meta.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();

    if let Some(viewport) = viewport {
        let mode = if preview {
            RenderMode::Preview
        } else {
            RenderMode::Edit
        };
        println!("Layout ({viewport}):");
        let rendered = render_document(store.roots(), viewport, mode);
        if rendered.is_empty() {
            println!("  (nothing to show)");
        }
        for composition in rendered {
            print!("{composition}");
        }
        return;
    }

    let roots = if preview {
        filter_non_empty_roots(store.roots())
    } else {
        store.roots().to_vec()
    };
    if roots.is_empty() {
        println!("(nothing to show)");
    }
    for root in &roots {
        print_container(root, 0);
    }
}

fn print_container(container: &Container, depth: usize) {
    let pad = "  ".repeat(depth);
    let role = if depth == 0 { "section" } else { "area" };
    match &container.body {
        ContainerBody::Split { areas } => {
            println!(
                "{pad}{role} {} (level {}, split)",
                container.id.as_uuid(),
                container.split_level
            );
            for area in areas.iter() {
                print_container(area, depth + 1);
            }
        }
        ContainerBody::Leaf { blocks } => {
            println!(
                "{pad}{role} {} (level {}, {} blocks)",
                container.id.as_uuid(),
                container.split_level,
                blocks.len()
            );
            for block in blocks {
                println!("{pad}  - {}", describe_block(block));
            }
        }
    }
}

fn describe_block(block: &Block) -> String {
    let detail = match &block.content {
        BlockContent::Empty => String::new(),
        BlockContent::Text { text } => format!(" \"{}\"", excerpt(text)),
        BlockContent::Media(media) => format!(" <{}>", media.url),
        BlockContent::Button { label, .. } => format!(" [{}]", excerpt(label)),
        BlockContent::Form { fields, .. } => format!(" ({} fields)", fields.len()),
    };
    format!("{} {}{detail}", block.kind, block.id.0)
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_LEN {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_LEN - 3).collect();
    format!("{cut}...")
}
