//! Ragline CLI
//!
//! Terminal client for a retrieval-augmented chat backend. Streams chat and
//! SQL agent answers and manages documents and the knowledge graph.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/ragline-cli
//! ```

mod args;
mod commands;
mod console;
mod logging;
mod render;
mod router;
mod signal_handler;

use args::{Cli, Commands};
use clap::Parser;
use ragline_core::config::{ConfigOverrides, load_config};

/// Filter used by `--verbose`; keeps dependency noise out
const VERBOSE_FILTER: &str = "warn,ragline_core=debug,ragline_cli=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config_file.as_deref(), overrides(&cli))?;
    logging::init(&config.logging)?;
    router::route(cli, config).await
}

/// Command-line values that take precedence over file and environment
fn overrides(cli: &Cli) -> ConfigOverrides {
    let (provider, model) = match &cli.command {
        Commands::Ask {
            provider, model, ..
        } => (provider.clone(), model.clone()),
        _ => (None, None),
    };
    ConfigOverrides {
        api_url: cli.api_url.clone(),
        provider,
        model,
        log_level: cli.verbose.then(|| VERBOSE_FILTER.to_string()),
    }
}
