//! # StackSense - Technology Stack Advisor
//!
//! The main binary for the StackSense recommendation engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for recommendations and catalog inspection
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                apps/stacksense (THE BINARY)              │
//! │                                                          │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐   │
//! │  │    CLI      │    │  HTTP API   │    │   Config    │   │
//! │  │   (clap)    │    │   (axum)    │    │   (toml)    │   │
//! │  └──────┬──────┘    └──────┬──────┘    └──────┬──────┘   │
//! │         └──────────────────┼──────────────────┘          │
//! │                            ▼                             │
//! │                  ┌───────────────────┐                   │
//! │                  │  stacksense-core  │                   │
//! │                  │    (THE LOGIC)    │                   │
//! │                  └───────────────────┘                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! stacksense server --host 0.0.0.0 --port 8000
//!
//! # CLI operations
//! stacksense recommend -f requirements.json --explain
//! stacksense catalog --validate
//! stacksense options --json-mode
//! ```

use clap::Parser;
use stacksense::cli;
use stacksense::config::{LogFormat, LoggingSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Settings decide the log format, so they load before tracing exists.
    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&settings.logging);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, settings).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingSettings) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.as_str().into());

    match logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Print the StackSense startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗████████╗ █████╗  ██████╗██╗  ██╗███████╗███████╗███╗   ██╗███████╗███████╗
  ██╔════╝╚══██╔══╝██╔══██╗██╔════╝██║ ██╔╝██╔════╝██╔════╝████╗  ██║██╔════╝██╔════╝
  ███████╗   ██║   ███████║██║     █████╔╝ ███████╗█████╗  ██╔██╗ ██║███████╗█████╗
  ╚════██║   ██║   ██╔══██║██║     ██╔═██╗ ╚════██║██╔══╝  ██║╚██╗██║╚════██║██╔══╝
  ███████║   ██║   ██║  ██║╚██████╗██║  ██╗███████║███████╗██║ ╚████║███████║███████╗
  ╚══════╝   ╚═╝   ╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝╚══════╝╚══════╝╚═╝  ╚═══╝╚══════╝╚══════╝

  Technology Stack Advisor v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
