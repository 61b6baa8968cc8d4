//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction, DocumentsAction, GraphAction, SchemaAction};
use crate::commands;
use anyhow::Result;
use ragline_core::ClientConfig;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: ClientConfig) -> Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Commands::Ask {
            question,
            agent,
            show_steps,
            ..
        } => {
            commands::ask::execute(
                &config,
                commands::ask::AskArgs {
                    question,
                    agent,
                    show_steps,
                    verbose,
                },
            )
            .await
        }
        Commands::Models { kind } => commands::models::list(&config, kind).await,
        Commands::Documents { action } => route_documents(&config, action).await,
        Commands::Graph { action } => route_graph(&config, action).await,
        Commands::Schema { action } => route_schema(&config, action).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config, cli.config_file.as_deref()),
        },
    }
}

async fn route_documents(config: &ClientConfig, action: DocumentsAction) -> Result<()> {
    match action {
        DocumentsAction::List => commands::documents::list(config).await,
        DocumentsAction::Upload {
            files,
            embedding_provider,
            embedding_model,
        } => commands::documents::upload(config, &files, embedding_provider, embedding_model).await,
        DocumentsAction::Delete { id } => commands::documents::delete(config, &id).await,
    }
}

async fn route_graph(config: &ClientConfig, action: GraphAction) -> Result<()> {
    match action {
        GraphAction::Documents { document } => {
            commands::graph::documents(config, document.as_deref()).await
        }
        GraphAction::Related { id } => commands::graph::related(config, &id).await,
        GraphAction::Chunks { id } => commands::graph::chunks(config, &id).await,
        GraphAction::Schema { document } => {
            commands::graph::schema(config, document.as_deref()).await
        }
    }
}

async fn route_schema(config: &ClientConfig, action: SchemaAction) -> Result<()> {
    match action {
        SchemaAction::DeleteTable { name } => commands::schema::delete_table(config, &name).await,
        SchemaAction::DeleteFk {
            from_table,
            to_table,
            from_column,
            to_column,
        } => {
            commands::schema::delete_foreign_key(
                config,
                from_table,
                to_table,
                from_column,
                to_column,
            )
            .await
        }
    }
}
