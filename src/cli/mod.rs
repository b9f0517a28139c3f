use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod error;
pub mod handler;
pub mod output;

/// newfile - create files from path rules, brace patterns and templates
#[derive(Parser, Debug)]
#[command(name = "newfile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Override config directory path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (TRACE level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace (project) root; defaults to the nearest ancestor with `.git`
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// File currently open in the editor
    #[arg(long, global = true, value_name = "FILE")]
    pub active: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new file relative to the configured base directory
    New {
        /// Answer for the file name prompt (skips the interactive prompt)
        #[arg(long)]
        entry: Option<String>,

        /// Print created paths as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new file relative to a selected file or directory
    FromExplorer {
        /// Selected file or directory
        path: PathBuf,

        /// Answer for the file name prompt (skips the interactive prompt)
        #[arg(long)]
        entry: Option<String>,

        /// Print created paths as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get a setting value (`file_templates.<ext>` for templates)
    Get {
        /// Setting key, e.g. relative_to
        key: String,
    },

    /// Set a setting value and save it
    Set {
        /// Setting key, e.g. relative_to
        key: String,

        /// New value (empty removes a template)
        value: String,
    },

    /// Print the settings file location
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
