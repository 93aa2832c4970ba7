//! Layout statistics command.

use std::collections::BTreeMap;

use boardkit_core::layout::{Container, LayoutStore, walk};

use crate::error::CliError;
use crate::util::{Context, Workspace};

/// Counts collected over a set of root containers
#[derive(Debug, Default, PartialEq, Eq)]
struct LayoutStats {
    sections: usize,
    containers: usize,
    splits: usize,
    empty_leaves: usize,
    max_depth: u32,
    blocks: usize,
    media: usize,
    by_kind: BTreeMap<&'static str, usize>,
}

impl LayoutStats {
    fn collect(roots: &[Container]) -> Self {
        let mut stats = Self {
            sections: roots.len(),
            ..Self::default()
        };
        stats.add(roots);
        stats
    }

    fn add(&mut self, roots: &[Container]) {
        for container in walk(roots) {
            self.containers += 1;
            self.max_depth = self.max_depth.max(container.split_level);
            if container.is_split() {
                self.splits += 1;
            } else if container.blocks().is_empty() {
                self.empty_leaves += 1;
            }
            for block in container.blocks() {
                self.blocks += 1;
                if block.media().is_some() {
                    self.media += 1;
                }
                *self.by_kind.entry(block.kind.as_str()).or_insert(0) += 1;
            }
        }
    }

    fn print(&self) {
        println!("Sections:     {}", self.sections);
        println!("Containers:   {}", self.containers);
        println!("  Splits:     {}", self.splits);
        println!("  Empty:      {}", self.empty_leaves);
        println!("  Max depth:  {}", self.max_depth);
        println!("Blocks:       {}", self.blocks);
        for (kind, count) in &self.by_kind {
            println!("  {kind}: {count}");
        }
        println!("Media refs:   {}", self.media);
    }
}

/// Show layout statistics
pub fn cmd_stats(ctx: &Context, project: Option<&str>) -> Result<(), CliError> {
    let workspace = Workspace::open(ctx)?;

    if let Some(project) = project {
        let store = workspace.load(project)?;
        print_project(&store);
        return Ok(());
    }

    let documents = workspace.documents()?;
    let mut totals = LayoutStats::default();
    let mut published = 0;
    for doc in &documents {
        totals.sections += doc.containers.len();
        totals.add(&doc.containers);
        if doc.publish_status.is_published() {
            published += 1;
        }
    }

    println!("Boardkit Statistics");
    println!("===================\n");
    println!("Pages:        {} ({published} published)", documents.len());
    totals.print();
    Ok(())
}

fn print_project(store: &LayoutStore) {
    let title = format!("Page: {}", store.meta().title);
    println!("{title}");
    println!("{}\n", "=".repeat(title.chars().count()));
    LayoutStats::collect(store.roots()).print();
}
