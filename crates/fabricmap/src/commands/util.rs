//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use fabricmap_core::{DeviceMetadata, Graph};

use crate::cli::GraphInput;
use crate::error::CliError;

/// Read a file, or stdin when the path is `-`.
pub fn read_source(path: &Path) -> Result<String, CliError> {
    let display = path.display().to_string();
    if display == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::ReadFailed {
                path: "<stdin>".into(),
                source,
            })?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFailed {
        path: display,
        source,
    })
}

/// Decode the graph and optional metadata named by the input args.
pub fn load_input(input: &GraphInput) -> Result<(Graph, Option<DeviceMetadata>), CliError> {
    let graph = load_graph(&input.graph)?;

    let metadata = match &input.metadata {
        Some(path) => {
            let raw = read_source(path)?;
            let metadata = DeviceMetadata::from_json(&raw)
                .map_err(|e| CliError::from_core(e, &path.display().to_string()))?;
            tracing::debug!(entries = metadata.len(), "metadata loaded");
            Some(metadata)
        }
        None => None,
    };

    Ok((graph, metadata))
}

pub fn load_graph(path: &Path) -> Result<Graph, CliError> {
    let raw = read_source(path)?;
    let graph =
        Graph::from_json(&raw).map_err(|e| CliError::from_core(e, &path.display().to_string()))?;
    tracing::debug!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "graph loaded"
    );
    Ok(graph)
}

/// Format a coordinate for table/plain output.
pub fn coord(value: f64) -> String {
    format!("{value:.1}")
}
