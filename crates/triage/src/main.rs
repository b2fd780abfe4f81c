// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage - intent-based LLM query router.
//!
//! This is the binary entry point: queries are classified by intent, routed
//! to a model tier, and billed against the active project.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod collaborators;
mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Triage - intent-based LLM query router.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a query and print the routing decision without dispatching.
    Classify {
        /// The query to classify.
        query: String,
    },
    /// Route a query to its model and print the response.
    Ask {
        /// The query to dispatch.
        query: String,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    // Load and validate configuration at startup.
    let config = match triage_config::load_and_validate() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("triage: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Commands::Classify { query }) => commands::classify(&config, &query).await,
        Some(Commands::Ask { query }) => commands::ask(&config, &query).await,
        Some(Commands::Config) => commands::show_config(&config),
        None => {
            println!("triage: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("triage: {err}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber once for the process lifetime.
///
/// `RUST_LOG` overrides the configured level when set.
fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
