// ── Graph ingest ──
//
// Normalizes raw node/link records into typed nodes keyed by id plus a
// symmetric adjacency relation. Maps are insertion ordered so every later
// "first encountered" tie-break follows input order.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::classify::classify;
use crate::model::{DeviceMetadata, Graph, Node, RawNode};

/// Typed nodes and adjacency for one layout call.
#[derive(Debug, Clone, Default)]
pub struct IngestedGraph {
    pub nodes: IndexMap<String, Node>,
    pub adjacency: IndexMap<String, IndexSet<String>>,
}

impl IngestedGraph {
    pub fn degree(&self, id: &str) -> usize {
        self.adjacency.get(id).map_or(0, IndexSet::len)
    }

    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &String> {
        self.adjacency.get(id).into_iter().flatten()
    }

    pub(crate) fn add_node(&mut self, node: Node) {
        self.adjacency.entry(node.id.clone()).or_default();
        self.nodes.insert(node.id.clone(), node);
    }

    /// Record an undirected edge; both endpoints must already exist.
    pub(crate) fn connect(&mut self, a: &str, b: &str) {
        if let Some(set) = self.adjacency.get_mut(a) {
            set.insert(b.to_owned());
        }
        if let Some(set) = self.adjacency.get_mut(b) {
            set.insert(a.to_owned());
        }
    }
}

/// Build the typed node map and adjacency from a raw graph.
///
/// Nodes without a usable id (or serial to fall back on) are skipped. A
/// repeated id replaces the earlier record but keeps its position. Links
/// with an unknown endpoint, and self links, are dropped.
pub fn ingest(graph: &Graph, metadata: Option<&DeviceMetadata>) -> IngestedGraph {
    let mut out = IngestedGraph::default();

    for raw in &graph.nodes {
        let Some(id) = resolve_id(raw) else {
            debug!("skipping node record without id or serial");
            continue;
        };
        let merged = merge_metadata(raw, &id, metadata);
        let node = Node {
            display_label: display_label(raw, &merged, &id),
            kind: classify(&merged),
            serial: non_empty(raw.serial.as_deref()).map(str::to_owned),
            model: non_empty(merged.model.as_deref()).map(str::to_owned),
            status: raw.status.clone(),
            switch_port: raw.switch_port,
            id,
        };
        out.add_node(node);
    }

    let mut dropped = 0usize;
    for link in &graph.links {
        let source = link.source.trim();
        let target = link.target.trim();
        if source == target || !out.nodes.contains_key(source) || !out.nodes.contains_key(target)
        {
            debug!(source, target, "dropping link");
            dropped += 1;
            continue;
        }
        out.connect(source, target);
    }

    debug!(
        nodes = out.nodes.len(),
        links = graph.links.len() - dropped,
        dropped,
        "graph ingested"
    );
    out
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn resolve_id(raw: &RawNode) -> Option<String> {
    non_empty(Some(raw.id.as_str()))
        .or_else(|| non_empty(raw.serial.as_deref()))
        .map(str::to_owned)
}

/// Fill model, name and product type from the catalog where the record has
/// none. Catalog entries are keyed by serial, or by id for serial-less records.
fn merge_metadata(raw: &RawNode, id: &str, metadata: Option<&DeviceMetadata>) -> RawNode {
    let mut merged = raw.clone();
    merged.id = id.to_owned();

    let key = non_empty(raw.serial.as_deref()).unwrap_or(id);
    if let Some(info) = metadata.and_then(|m| m.lookup(key)) {
        if non_empty(merged.model.as_deref()).is_none() {
            merged.model.clone_from(&info.model);
        }
        if non_empty(merged.name.as_deref()).is_none() {
            merged.name.clone_from(&info.name);
        }
        if non_empty(merged.product_type.as_deref()).is_none() {
            merged.product_type.clone_from(&info.product_type);
        }
    }
    merged
}

/// Label preference: explicit label, catalog (or record) name, model, id.
fn display_label(raw: &RawNode, merged: &RawNode, id: &str) -> String {
    non_empty(raw.label.as_deref())
        .or_else(|| non_empty(merged.name.as_deref()))
        .or_else(|| non_empty(merged.model.as_deref()))
        .unwrap_or(id)
        .to_owned()
}
