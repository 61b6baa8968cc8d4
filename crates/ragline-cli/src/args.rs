//! CLI argument definitions using clap
//!
//! - ragline ask "question"          # Stream a chat answer
//! - ragline ask --agent "question"  # Stream a SQL agent answer
//! - ragline models/documents/graph  # Backend utility commands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ragline")]
#[command(about = "Ragline - terminal client for a retrieval-augmented chat backend")]
#[command(
    long_about = r#"Ragline - terminal client for a retrieval-augmented chat backend

USAGE:
  ragline ask "your question"             # Chat over your documents
  ragline ask --agent "your question"     # Ask the SQL agent
  ragline documents upload a.pdf b.md     # Index documents
  ragline graph schema                    # Inspect the extracted schema

For detailed help: ragline --help"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (TOML, JSON or YAML)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question and stream the answer
    Ask {
        /// The question to ask
        question: String,

        /// Answer with the SQL agent instead of document chat
        #[arg(long)]
        agent: bool,

        /// LLM provider (openai, google, aistudio)
        #[arg(long)]
        provider: Option<String>,

        /// Model id
        #[arg(long)]
        model: Option<String>,

        /// Print each agent tool call and its result
        #[arg(long)]
        show_steps: bool,
    },

    /// List the models the backend offers
    Models {
        #[arg(value_enum, default_value = "llm")]
        kind: ModelKindArg,
    },

    /// Manage indexed documents
    Documents {
        #[command(subcommand)]
        action: DocumentsAction,
    },

    /// Inspect the knowledge graph
    Graph {
        #[command(subcommand)]
        action: GraphAction,
    },

    /// Edit the extracted database schema
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelKindArg {
    Llm,
    Embedding,
}

#[derive(Subcommand, Clone)]
pub enum DocumentsAction {
    /// List indexed documents
    List,

    /// Upload files for indexing
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Embedding provider (openai, google)
        #[arg(long)]
        embedding_provider: Option<String>,

        /// Embedding model id
        #[arg(long)]
        embedding_model: Option<String>,
    },

    /// Delete a document and its chunks
    Delete { id: String },
}

#[derive(Subcommand, Clone)]
pub enum GraphAction {
    /// Document graph, optionally centred on one document
    Documents {
        #[arg(long)]
        document: Option<String>,
    },

    /// Documents related to a document
    Related { id: String },

    /// Chunks of a document
    Chunks { id: String },

    /// Tables and foreign keys
    Schema {
        #[arg(long)]
        document: Option<String>,
    },
}

#[derive(Subcommand, Clone)]
pub enum SchemaAction {
    /// Delete a table from the extracted schema
    DeleteTable { name: String },

    /// Delete a foreign key from the extracted schema
    DeleteFk {
        from_table: String,
        to_table: String,
        from_column: String,
        to_column: String,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,
}
