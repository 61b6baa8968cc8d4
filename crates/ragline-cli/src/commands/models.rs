//! Models listing command

use super::backend;
use crate::args::ModelKindArg;
use crate::console::CliConsole;
use anyhow::Result;
use colored::*;
use ragline_core::ClientConfig;
use ragline_core::api::ModelKind;

/// List the models the backend offers, grouped by provider
pub async fn list(config: &ClientConfig, kind: ModelKindArg) -> Result<()> {
    let console = CliConsole::new(true);
    let kind = match kind {
        ModelKindArg::Llm => ModelKind::Llm,
        ModelKindArg::Embedding => ModelKind::Embedding,
    };
    let models = backend(config)?.list_models(kind).await?;

    console.print_header(match kind {
        ModelKind::Llm => "Available Models",
        ModelKind::Embedding => "Available Embedding Models",
    });
    if models.values().all(Vec::is_empty) {
        console.warn("No models available");
        return Ok(());
    }

    let (default_provider, default_model) = match kind {
        ModelKind::Llm => (&config.defaults.provider, &config.defaults.model),
        ModelKind::Embedding => (
            &config.defaults.embedding_provider,
            &config.defaults.embedding_model,
        ),
    };
    for (provider, options) in &models {
        println!("\n{}", provider.magenta().bold());
        for option in options {
            let marker = if provider == default_provider && &option.id == default_model {
                " (default)".green().to_string()
            } else {
                String::new()
            };
            println!("  • {} ({}){}", option.name, option.id.dimmed(), marker);
        }
    }
    Ok(())
}
