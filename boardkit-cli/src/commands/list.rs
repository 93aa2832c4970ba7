//! List stored layout documents.

use boardkit_core::LayoutDocument;
use boardkit_core::layout::{block_count, container_count};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{Context, Workspace};

/// List command handler
pub fn cmd_list(ctx: &Context, format: OutputFormat) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;
    let mut documents = workspace.documents()?;
    documents.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

    match format {
        OutputFormat::Table => print_table(&documents),
        OutputFormat::Json => print_json(&documents)?,
    }
    Ok(())
}

fn print_table(documents: &[LayoutDocument]) {
    if documents.is_empty() {
        println!("No pages found.");
        return;
    }

    let title_width = documents
        .iter()
        .map(|d| d.title.len())
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "{:<36}  {:<title_width$}  {:<9}  {:>10}  {:>6}",
        "ID", "TITLE", "STATUS", "CONTAINERS", "BLOCKS"
    );
    for doc in documents {
        let status = if doc.publish_status.is_published() {
            "published"
        } else {
            "draft"
        };
        println!(
            "{:<36}  {:<title_width$}  {:<9}  {:>10}  {:>6}",
            doc.project_id,
            doc.title,
            status,
            container_count(&doc.containers),
            block_count(&doc.containers)
        );
    }
}

fn print_json(documents: &[LayoutDocument]) -> Result<(), CliError> {
    let summaries: Vec<_> = documents
        .iter()
        .map(|doc| {
            serde_json::json!({
                "projectId": doc.project_id,
                "title": doc.title,
                "published": doc.publish_status.is_published(),
                "updatedAt": doc.updated_at,
                "containers": container_count(&doc.containers),
                "blocks": block_count(&doc.containers),
            })
        })
        .collect();
    let json = serde_json::to_string_pretty(&summaries)
        .map_err(|e| CliError::Config(format!("Failed to serialize: {e}")))?;
    println!("{json}");
    Ok(())
}
