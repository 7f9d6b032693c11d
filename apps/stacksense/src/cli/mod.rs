//! # StackSense CLI Module
//!
//! This module implements the CLI interface for StackSense.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `recommend` - Score a requirements file against the catalog
//! - `catalog` - Summarize (and optionally validate) the catalog
//! - `options` - List the canonical requirement labels

mod commands;

use crate::config::Settings;
use clap::{Parser, Subcommand};
use stacksense_core::StackError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// StackSense - technology stack advisor
///
/// Describe a project; get a ranked stack per category and a deployment strategy.
#[derive(Parser, Debug)]
#[command(name = "stacksense")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the catalog JSON file (overrides configuration)
    #[arg(short = 'C', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides configuration)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable POST /catalog/reload
        #[arg(long)]
        allow_reload: bool,
    },

    /// Recommend a stack for the requirements in a JSON file
    Recommend {
        /// Path to the requirements file
        #[arg(short, long)]
        file: PathBuf,

        /// Show the per-rule score breakdown
        #[arg(short, long)]
        explain: bool,
    },

    /// Summarize the catalog
    Catalog {
        /// Fail when the catalog file is missing
        #[arg(long)]
        validate: bool,
    },

    /// List canonical labels for every requirement field
    Options,
}

impl Cli {
    /// Settings from file and environment, with command-line flags applied last.
    pub fn load_settings(&self) -> Result<Settings, StackError> {
        let mut settings = Settings::load(self.config.as_deref())?;

        if let Some(catalog) = &self.catalog {
            settings.catalog.path = catalog.clone();
        }

        if let Some(Commands::Server {
            host,
            port,
            allow_reload,
        }) = &self.command
        {
            if let Some(host) = host {
                settings.server.host = host.clone();
            }
            if let Some(port) = port {
                settings.server.port = *port;
            }
            if *allow_reload {
                settings.catalog.allow_reload = true;
            }
        }

        Ok(settings)
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved settings.
pub async fn execute(cli: Cli, settings: Settings) -> Result<(), StackError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { .. }) => cmd_server(settings).await,
        Some(Commands::Recommend { file, explain }) => {
            cmd_recommend(&settings, json_mode, &file, explain)
        }
        Some(Commands::Catalog { validate }) => cmd_catalog(&settings, json_mode, validate),
        Some(Commands::Options) => cmd_options(json_mode),
        None => {
            // No subcommand - show the catalog summary
            cmd_catalog(&settings, json_mode, false)
        }
    }
}
