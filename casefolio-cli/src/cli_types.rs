//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use casefolio_nav::KeyEvent;

#[derive(Parser)]
#[command(name = "casefolio")]
#[command(about = "Normalize case-study content and inspect navigation state", long_about = None)]
pub(crate) struct Cli {
    /// Content directory holding case-study YAML (overrides settings)
    #[arg(short, long, global = true)]
    pub content: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build the collection and report records that were excluded
    Check,

    /// List normalized case studies
    List,

    /// Show one normalized case study
    Show {
        /// Slug of the case study
        slug: String,
    },

    /// Write the canonical collection as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse metric text into value, unit suffix and precision
    Metric {
        /// Metric strings, e.g. "8.6/10" or "↓ 50%"
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Resolve slugs for titles as if they were one collection
    Slug {
        /// Titles, in collection order
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Mount the navigation machine on an address and replay input
    Route {
        /// Route path, e.g. /case-studies/curb-appeal
        path: String,

        /// Initial address-bar hash, e.g. "cs=curb-appeal&ref=home"
        #[arg(long)]
        hash: Option<String>,

        /// Select a case study from the list before replaying keys
        #[arg(long)]
        select: Option<String>,

        /// Keys to replay (e.g. right,right,esc,shift+tab)
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<KeyEvent>,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and where they come from
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
