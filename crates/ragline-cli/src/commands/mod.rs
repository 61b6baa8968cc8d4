//! CLI commands

pub mod ask;
pub mod config;
pub mod documents;
pub mod graph;
pub mod models;
pub mod schema;

use anyhow::Result;
use ragline_core::{BackendClient, ClientConfig};

/// Client for the non-streaming endpoints
pub(crate) fn backend(config: &ClientConfig) -> Result<BackendClient> {
    Ok(BackendClient::new(&config.api)?)
}
