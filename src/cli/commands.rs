//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quotebook")]
#[command(about = "Local-first quote collection with remote sync", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log sync and storage activity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new quote book
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show one quote picked at random
    Random,

    /// Add a quote
    Add {
        /// Quote text
        text: String,

        /// Category the quote is filed under
        category: String,
    },

    /// Show quotes under the active category filter
    List,

    /// List categories, marking the active filter
    Categories,

    /// Change the active category filter ("all" shows everything)
    Filter {
        /// Category name or "all"
        category: String,
    },

    /// Export every quote to a JSON file
    Export {
        /// Output file (default: export_filename from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Append quotes from an exported JSON file
    Import {
        /// JSON file to import
        file: PathBuf,
    },

    /// Run one pull-then-push cycle against the remote endpoint
    Sync,

    /// Sync now and then periodically until interrupted
    Watch,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
