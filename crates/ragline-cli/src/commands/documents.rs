//! Document management commands

use super::backend;
use crate::console::CliConsole;
use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use ragline_core::ClientConfig;
use ragline_core::api::{DocumentMeta, UploadFile};
use std::path::PathBuf;

pub async fn list(config: &ClientConfig) -> Result<()> {
    let console = CliConsole::new(true);
    let documents = backend(config)?.list_documents().await?;

    console.print_header("Documents");
    if documents.is_empty() {
        console.warn("No documents indexed yet");
        return Ok(());
    }
    for document in &documents {
        println!("{}", describe(document));
    }
    Ok(())
}

fn describe(document: &DocumentMeta) -> String {
    let uploaded = document
        .uploaded_at
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {}  {}",
        document.id.dimmed(),
        document.file_name.bold(),
        format!(
            "{} chunks, {}, {}/{}, {}",
            document.total_chunks,
            human_size(document.file_size),
            document.embedding_provider,
            document.embedding_model,
            uploaded
        )
        .dimmed()
    )
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

pub async fn upload(
    config: &ClientConfig,
    paths: &[PathBuf],
    embedding_provider: Option<String>,
    embedding_model: Option<String>,
) -> Result<()> {
    let console = CliConsole::new(true);
    let provider = embedding_provider.unwrap_or_else(|| config.defaults.embedding_provider.clone());
    let model = embedding_model.unwrap_or_else(|| config.defaults.embedding_model.clone());

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("Cannot read {}", path.display()))?;
        files.push(file);
    }

    console.info(&format!(
        "Uploading {} file(s) with {}/{}",
        files.len(),
        provider,
        model
    ));
    backend(config)?
        .upload_documents(files, &provider, &model)
        .await?;
    console.success(&format!("Uploaded {} file(s)", paths.len()));
    Ok(())
}

pub async fn delete(config: &ClientConfig, id: &str) -> Result<()> {
    backend(config)?.delete_document(id).await?;
    CliConsole::new(true).success(&format!("Deleted document {}", id));
    Ok(())
}
