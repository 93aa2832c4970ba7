//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use boardkit_core::layout::Viewport;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::util::Context;

/// `Boardkit` command-line interface for page layout documents
#[derive(Parser)]
#[command(name = "boardkit-cli")]
#[command(author, version, about = "Boardkit command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "BOARDKIT_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Directory holding layout documents (defaults to <config>/documents)
    #[arg(short, long, global = true, env = "BOARDKIT_DOCUMENTS_DIR")]
    pub dir: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the directories selected by the global options.
    pub fn context(&self) -> Context {
        Context {
            config_dir: self.config.clone(),
            documents_dir: self.dir.clone(),
        }
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new layout document
    #[command(about = "Create a new page with a single empty section")]
    New {
        /// Page title (defaults to the configured title)
        #[arg(short, long)]
        title: Option<String>,

        /// Page description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// List stored layout documents
    #[command(about = "List all stored pages")]
    List {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Show a layout document
    #[command(about = "Show the container tree of a page")]
    Show {
        /// Project UUID, UUID prefix or title
        project: String,

        /// Render the tree for a viewport instead of showing its structure
        #[arg(long, value_enum)]
        viewport: Option<ViewportArg>,

        /// Hide empty containers as the published page would
        #[arg(short, long)]
        preview: bool,

        /// Output format
        #[arg(short, long, default_value = "tree", value_enum)]
        format: ShowFormat,
    },

    /// Validate a layout document file
    #[command(about = "Check a JSON or YAML document against the layout rules")]
    Validate {
        /// Document file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// Split a container into two areas
    #[command(about = "Split a leaf container into two child areas")]
    Split {
        /// Project UUID, UUID prefix or title
        project: String,

        /// Container UUID or UUID prefix
        container: String,

        /// Enforce the split limit of this viewport
        #[arg(long, value_enum)]
        viewport: Option<ViewportArg>,
    },

    /// Merge two sibling areas back into their parent
    #[command(about = "Merge two sibling areas; at least one must be empty")]
    Merge {
        /// Project UUID, UUID prefix or title
        project: String,

        /// First area
        first: String,

        /// Second area
        second: String,
    },

    /// Manage content blocks
    #[command(subcommand, about = "Add, move or remove content blocks")]
    Block(BlockCommands),

    /// Manage page sections (root containers)
    #[command(subcommand, about = "Add, move or remove page sections")]
    Section(SectionCommands),

    /// Publish or unpublish a page
    #[command(about = "Mark a page as published")]
    Publish {
        /// Project UUID, UUID prefix or title
        project: String,

        /// Return the page to draft instead
        #[arg(long)]
        undo: bool,
    },

    /// Delete a layout document
    #[command(about = "Delete a stored page")]
    Delete {
        /// Project UUID, UUID prefix or title
        project: String,
    },

    /// Show layout statistics
    #[command(about = "Show statistics for one page or all pages")]
    Stats {
        /// Project UUID, UUID prefix or title
        project: Option<String>,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Block subcommands
#[derive(Subcommand)]
pub enum BlockCommands {
    /// Add a block to a leaf container
    #[command(about = "Add a content block to a leaf container")]
    Add {
        /// Project UUID, UUID prefix or title
        project: String,

        /// Container UUID or UUID prefix
        container: String,

        /// Block type (heading, paragraph, image, button, divider, ...)
        #[arg(short, long, default_value = "paragraph")]
        kind: String,

        /// Text for headings and paragraphs, label for buttons
        #[arg(short, long)]
        text: Option<String>,

        /// Heading level (1-6)
        #[arg(short, long)]
        level: Option<u8>,

        /// Media URL for image, audio, video, document and gif blocks
        #[arg(short, long)]
        url: Option<String>,

        /// Insert position (appends when omitted)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Move a block to another leaf container
    #[command(about = "Move a block to a container, optionally at a position")]
    Move {
        /// Project UUID, UUID prefix or title
        project: String,

        /// Block UUID or UUID prefix
        block: String,

        /// Destination container UUID or UUID prefix
        dest: String,

        /// Insert position (appends when omitted)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Remove a block
    #[command(about = "Remove a content block")]
    Remove {
        /// Project UUID, UUID prefix or title
        project: String,

        /// Block UUID or UUID prefix
        block: String,
    },
}

/// Section subcommands
#[derive(Subcommand)]
pub enum SectionCommands {
    /// Append an empty section
    #[command(about = "Append an empty section to the page")]
    Add {
        /// Project UUID, UUID prefix or title
        project: String,
    },

    /// Move a section to a new position
    #[command(about = "Move a section to a new position")]
    Move {
        /// Project UUID, UUID prefix or title
        project: String,

        /// Section UUID or UUID prefix
        section: String,

        /// New position (clamped to the number of sections)
        index: usize,
    },

    /// Remove a section and everything in it
    #[command(about = "Remove a section and its content")]
    Remove {
        /// Project UUID, UUID prefix or title
        project: String,

        /// Section UUID or UUID prefix
        section: String,
    },
}

/// Output format for the list command
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}

/// Output format for the show command
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShowFormat {
    /// Indented container tree
    Tree,
    /// Document JSON
    Json,
    /// Document YAML
    Yaml,
}

/// Viewport options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ViewportArg {
    /// Wide screens: splits side by side
    Desktop,
    /// Medium screens: two-column grid
    Tablet,
    /// Narrow screens: everything stacked
    Mobile,
}

impl From<ViewportArg> for Viewport {
    fn from(arg: ViewportArg) -> Self {
        match arg {
            ViewportArg::Desktop => Self::Desktop,
            ViewportArg::Tablet => Self::Tablet,
            ViewportArg::Mobile => Self::Mobile,
        }
    }
}
