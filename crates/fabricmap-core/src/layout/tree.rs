// ── Root selection and spanning tree ──
//
// Reduces an arbitrary, possibly cyclic or disconnected graph to a single
// tree hanging off one anchor node. Non-tree edges are simply not drawn.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::ingest::IngestedGraph;
use crate::model::{DeviceKind, Node};

use super::order::cmp_nodes;

const EXTERNAL_ID: &str = "internet";

/// Pick the anchor node for the hierarchy.
///
/// Connected appliances/gateways win by degree; otherwise the first connected
/// appliance, gateway or switch; otherwise the best-connected node of any
/// kind. Degree ties go to the node seen first. `None` only for an empty graph.
pub fn select_root(graph: &IngestedGraph) -> Option<&str> {
    let edge_device = max_degree(
        graph,
        graph
            .nodes
            .values()
            .filter(|n| n.kind.is_edge_device() && graph.degree(&n.id) > 0),
    );
    if edge_device.is_some() {
        return edge_device;
    }

    for kind in [DeviceKind::Appliance, DeviceKind::Gateway, DeviceKind::Switch] {
        if let Some(node) = graph
            .nodes
            .values()
            .find(|n| n.kind == kind && graph.degree(&n.id) > 0)
        {
            return Some(node.id.as_str());
        }
    }

    max_degree(graph, graph.nodes.values())
}

fn max_degree<'a>(
    graph: &IngestedGraph,
    candidates: impl Iterator<Item = &'a Node>,
) -> Option<&'a str> {
    let mut best: Option<(&'a Node, usize)> = None;
    for node in candidates {
        let degree = graph.degree(&node.id);
        if best.is_none_or(|(_, d)| degree > d) {
            best = Some((node, degree));
        }
    }
    best.map(|(n, _)| n.id.as_str())
}

/// Parent/depth/children for every node, rooted at the selected anchor.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    pub root: String,
    pub depth: IndexMap<String, i32>,
    pub parent: IndexMap<String, Option<String>>,
    pub children: IndexMap<String, Vec<String>>,
    /// Breadth-first visit order, force-attached nodes last. Parents always
    /// precede their children.
    pub order: Vec<String>,
    /// Id of the injected uplink node, if one was needed.
    pub synthetic_external: Option<String>,
}

impl SpanningTree {
    /// Build the tree, injecting an uplink node into `graph` when it has none.
    pub fn build(graph: &mut IngestedGraph, root: &str) -> Self {
        let synthetic_external = if graph
            .nodes
            .values()
            .any(|n| n.kind == DeviceKind::External)
        {
            None
        } else {
            let id = unique_id(graph, EXTERNAL_ID);
            graph.add_node(Node::synthetic_external(id.clone()));
            graph.connect(&id, root);
            Some(id)
        };

        let mut depth: IndexMap<String, i32> = IndexMap::new();
        let mut parent: IndexMap<String, Option<String>> = IndexMap::new();
        let mut order: Vec<String> = Vec::with_capacity(graph.nodes.len());
        let mut visited: IndexSet<&str> = IndexSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        depth.insert(root.to_owned(), 0);
        parent.insert(root.to_owned(), None);
        visited.insert(root);
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            order.push(current.to_owned());
            let next_depth = depth.get(current).copied().unwrap_or(0) + 1;
            for neighbor in graph.neighbors(current) {
                if visited.insert(neighbor.as_str()) {
                    depth.insert(neighbor.clone(), next_depth);
                    parent.insert(neighbor.clone(), Some(current.to_owned()));
                    queue.push_back(neighbor.as_str());
                }
            }
        }

        let mut attached = 0usize;
        for id in graph.nodes.keys() {
            if !visited.contains(id.as_str()) {
                depth.insert(id.clone(), 1);
                parent.insert(id.clone(), Some(root.to_owned()));
                order.push(id.clone());
                attached += 1;
            }
        }

        for node in graph.nodes.values() {
            if node.kind == DeviceKind::External {
                depth.insert(node.id.clone(), -1);
            }
        }

        let mut children: IndexMap<String, Vec<String>> = order
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();
        for id in &order {
            if let Some(Some(p)) = parent.get(id) {
                if let Some(list) = children.get_mut(p) {
                    list.push(id.clone());
                }
            }
        }

        debug!(
            root,
            reached = order.len() - attached,
            attached,
            synthetic = synthetic_external.is_some(),
            "spanning tree built"
        );

        Self {
            root: root.to_owned(),
            depth,
            parent,
            children,
            order,
            synthetic_external,
        }
    }

    /// Sort every child list into placement order.
    pub fn sort_children(&mut self, nodes: &IndexMap<String, Node>) {
        for list in self.children.values_mut() {
            list.sort_by(|a, b| match (nodes.get(a), nodes.get(b)) {
                (Some(na), Some(nb)) => cmp_nodes(na, nb),
                _ => a.cmp(b),
            });
        }
    }

    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.parent.get(id).and_then(Option::as_deref)
    }

    pub fn depth_of(&self, id: &str) -> i32 {
        self.depth.get(id).copied().unwrap_or(0)
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct depth values, external level included.
    pub fn level_count(&self) -> usize {
        self.depth.values().collect::<IndexSet<_>>().len()
    }
}

fn unique_id(graph: &IngestedGraph, base: &str) -> String {
    if !graph.nodes.contains_key(base) {
        return base.to_owned();
    }
    (2usize..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !graph.nodes.contains_key(candidate.as_str()))
        .unwrap_or_else(|| format!("{base}-synthetic"))
}
