//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::QuireConfig;

/// Quire: Google Docs tabs to ArchieML records
#[derive(Parser, Debug)]
#[command(name = "quire", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "QUIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging for quire crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a document from Google Docs and write its tab records
    Fetch(FetchArgs),
    /// Process a saved Docs API response
    Convert(ConvertArgs),
    /// Inspect or create the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `quire fetch`.
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Document id
    #[arg(long, env = "QUIRE_DOCUMENT_ID")]
    pub id: Option<String>,

    /// Service-account key file
    #[arg(long, env = "QUIRE_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Output options
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `quire convert`.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Saved `documents.get` response (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output options
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options shared by the processing commands.
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output file, or `-` for stdout
    #[arg(short, long, env = "QUIRE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Key each tab's record is stored under
    #[arg(long, env = "QUIRE_RECORD_KEY")]
    pub record_key: Option<String>,

    /// Also process nested tabs, depth-first
    #[arg(long)]
    pub child_tabs: bool,

    /// Log failing tabs and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,
}

/// `quire config` actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Print one value by dotted key, e.g. `output.path`
    Get {
        /// Dotted key
        key: String,
    },
    /// Write a default configuration file
    Init {
        /// Where to write it (default: the user config directory)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl OutputArgs {
    /// Applies these flags over the loaded configuration.
    pub fn apply(&self, config: &mut QuireConfig) {
        if let Some(path) = &self.output {
            config.output.path = path.clone();
        }
        if let Some(key) = &self.record_key {
            config.output.record_key = key.clone();
        }
        if self.child_tabs {
            config.document.include_child_tabs = true;
        }
    }
}

impl FetchArgs {
    /// Applies these flags over the loaded configuration.
    pub fn apply(&self, config: &mut QuireConfig) {
        if let Some(id) = &self.id {
            config.document.id = id.clone();
        }
        if let Some(path) = &self.credentials {
            config.credentials.path = path.clone();
        }
        self.output.apply(config);
    }
}
