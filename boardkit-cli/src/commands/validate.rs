//! Validate a document file.

use std::path::Path;

use boardkit_core::document::{DocumentFormat, LayoutDocument};
use boardkit_core::layout::{block_count, container_count};

use crate::error::CliError;

/// Validate command handler
///
/// Exits with the invalid-document code when the file does not parse or
/// breaks a layout rule.
pub fn cmd_validate(file: &Path) -> Result<(), CliError> {
    let content = std::fs::read_to_string(file)?;
    let document = LayoutDocument::from_format(&content, DocumentFormat::from_path(file))?;

    println!("Document is valid: {}", file.display());
    println!("  Title:      {}", document.title);
    println!("  Sections:   {}", document.containers.len());
    println!("  Containers: {}", container_count(&document.containers));
    println!("  Blocks:     {}", block_count(&document.containers));
    Ok(())
}
