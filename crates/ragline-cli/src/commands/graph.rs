//! Knowledge graph queries

use super::backend;
use crate::console::CliConsole;
use anyhow::Result;
use colored::*;
use ragline_core::ClientConfig;
use ragline_core::api::{GraphData, NodeKind};
use std::collections::HashMap;

pub async fn documents(config: &ClientConfig, document_id: Option<&str>) -> Result<()> {
    let graph = backend(config)?.document_graph(document_id).await?;
    print_graph("Document Graph", &graph);
    Ok(())
}

pub async fn related(config: &ClientConfig, document_id: &str) -> Result<()> {
    let console = CliConsole::new(true);
    let related = backend(config)?.related_documents(document_id).await?;

    console.print_header("Related Documents");
    if related.is_empty() {
        console.warn("No related documents");
        return Ok(());
    }
    for document in &related {
        println!(
            "  • {} {}",
            document.file_name.bold(),
            format!(
                "({}, score {:.2}, {} connections)",
                document.document_id, document.score, document.connection_count
            )
            .dimmed()
        );
    }
    Ok(())
}

pub async fn chunks(config: &ClientConfig, document_id: &str) -> Result<()> {
    let graph = backend(config)?.chunk_graph(document_id).await?;
    print_graph("Chunk Graph", &graph);
    Ok(())
}

pub async fn schema(config: &ClientConfig, document_id: Option<&str>) -> Result<()> {
    let graph = backend(config)?.schema_graph(document_id).await?;
    if graph.is_empty() {
        CliConsole::new(true)
            .warn("No schema data. Upload database documents to extract tables.");
        return Ok(());
    }
    print_graph("Schema Graph", &graph);
    Ok(())
}

fn print_graph(title: &str, graph: &GraphData) {
    let console = CliConsole::new(true);
    console.print_header(title);
    if graph.is_empty() {
        console.warn("No graph data. Upload documents to see relationships.");
        return;
    }
    for line in graph_lines(graph) {
        println!("{}", line);
    }
}

fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Document => "Documents",
        NodeKind::Chunk => "Chunks",
        NodeKind::Table => "Tables",
        NodeKind::Unknown => "Other",
    }
}

/// Nodes grouped by kind, then edges by label
fn graph_lines(graph: &GraphData) -> Vec<String> {
    let labels: HashMap<&str, &str> = graph
        .nodes
        .iter()
        .map(|node| {
            let label = if node.label.is_empty() { &node.id } else { &node.label };
            (node.id.as_str(), label.as_str())
        })
        .collect();
    let name = |id: &str| labels.get(id).copied().unwrap_or(id).to_string();

    let mut lines = Vec::new();
    for kind in [NodeKind::Document, NodeKind::Chunk, NodeKind::Table, NodeKind::Unknown] {
        let nodes: Vec<_> = graph.nodes_of(kind).collect();
        if nodes.is_empty() {
            continue;
        }
        lines.push(format!("{} ({})", kind_label(kind).cyan().bold(), nodes.len()));
        for node in nodes {
            lines.push(format!("  • {}", name(&node.id)));
        }
    }
    if !graph.edges.is_empty() {
        lines.push(format!("{} ({})", "Edges".cyan().bold(), graph.edges.len()));
        for edge in &graph.edges {
            lines.push(format!(
                "  {} -[{}]-> {}",
                name(&edge.source),
                edge.kind.dimmed(),
                name(&edge.target)
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_lines_use_labels() {
        colored::control::set_override(false);
        let graph: GraphData = serde_json::from_value(serde_json::json!({
            "nodes": [
                {"id": "t1", "label": "orders", "type": "table"},
                {"id": "t2", "label": "users", "type": "table"}
            ],
            "edges": [{"source": "t1", "target": "t2", "type": "FOREIGN_KEY"}]
        }))
        .unwrap();
        assert_eq!(
            graph_lines(&graph),
            vec![
                "Tables (2)",
                "  • orders",
                "  • users",
                "Edges (1)",
                "  orders -[FOREIGN_KEY]-> users",
            ]
        );
    }
}
