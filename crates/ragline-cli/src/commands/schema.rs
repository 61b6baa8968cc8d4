//! Schema editing commands

use super::backend;
use crate::console::CliConsole;
use anyhow::Result;
use ragline_core::ClientConfig;
use ragline_core::api::ForeignKeyRef;

pub async fn delete_table(config: &ClientConfig, name: &str) -> Result<()> {
    backend(config)?.delete_schema_table(name).await?;
    CliConsole::new(true).success(&format!("Deleted table {}", name));
    Ok(())
}

pub async fn delete_foreign_key(
    config: &ClientConfig,
    from_table: String,
    to_table: String,
    from_column: String,
    to_column: String,
) -> Result<()> {
    let key = ForeignKeyRef {
        from_table,
        to_table,
        from_column,
        to_column,
    };
    backend(config)?.delete_foreign_key(&key).await?;
    CliConsole::new(true).success(&format!(
        "Deleted foreign key {}.{} -> {}.{}",
        key.from_table, key.from_column, key.to_table, key.to_column
    ));
    Ok(())
}
