// ── Layout engine ──
//
// Orchestrates one full, stateless layout pass:
//
//   ingest → root → spanning tree → scale → assign y → spacing
//          → backbone → overlaps → routing → normalize
//
// Everything allocated here is owned by the call and dropped when the
// resulting `Layout` is returned.

pub mod align;
pub mod order;
pub mod position;
pub mod route;
pub mod scale;
pub mod tree;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ingest::{IngestedGraph, ingest};
use crate::model::{DeviceKind, DeviceMetadata, Graph, Layout, LayoutLink, LayoutNode, Node};

use self::tree::SpanningTree;

pub use self::order::{cmp_nodes, natural_cmp};
pub use self::position::MIN_SIBLING_SPACING;

/// Tunables that only affect the final canvas, never the tree geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Margin between the bounding box of node centers and the canvas edge.
    pub padding: f64,
    /// Extra top margin for single-AP sites anchored on a gateway or
    /// appliance. `None` disables the nudge.
    pub single_ap_top_margin: Option<f64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding: 40.0,
            single_ap_top_margin: Some(40.0),
        }
    }
}

/// Deterministic topology layout. Holds only options, so one engine can be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Lay out a raw graph, merging optional device metadata.
    pub fn layout(&self, graph: &Graph, metadata: Option<&DeviceMetadata>) -> Layout {
        self.layout_ingested(ingest(graph, metadata))
    }

    /// Lay out an already ingested graph.
    pub fn layout_ingested(&self, mut graph: IngestedGraph) -> Layout {
        let Some(root) = tree::select_root(&graph).map(str::to_owned) else {
            debug!("empty graph, nothing to lay out");
            return Layout::empty(scale::density(0, 0).scale_factor);
        };
        debug!(root = %root, degree = graph.degree(&root), "root selected");

        let mut tree = SpanningTree::build(&mut graph, &root);
        tree.sort_children(&graph.nodes);

        let ap_count = graph
            .nodes
            .values()
            .filter(|n| n.kind == DeviceKind::Ap)
            .count();
        let density = scale::density(graph.nodes.len(), ap_count);
        let horizontal_gap = scale::horizontal_gap(tree.level_count());
        debug!(
            nodes = graph.nodes.len(),
            ap_count,
            scale_factor = density.scale_factor,
            vertical_gap = density.vertical_gap,
            horizontal_gap,
            "scale chosen"
        );

        let mut ys = position::assign_y(&graph, &tree, density.vertical_gap);
        position::enforce_spacing(&graph, &tree, &mut ys);
        align::align_backbone(&graph, &tree, &mut ys);

        let mut nodes: Vec<LayoutNode> = graph
            .nodes
            .values()
            .map(|node| {
                let level = tree.depth_of(&node.id);
                let y = ys.get(node.id.as_str()).copied().unwrap_or_default();
                place(node, level, f64::from(level) * horizontal_gap, y, &tree)
            })
            .collect();
        align::resolve_overlaps(&mut nodes);

        let links = route_links(&nodes, &tree, density.scale_factor);

        let single_ap_site = ap_count == 1
            && graph
                .nodes
                .get(root.as_str())
                .is_some_and(|n| n.kind.is_edge_device());
        let top_margin = if single_ap_site {
            self.options.single_ap_top_margin.unwrap_or(0.0)
        } else {
            0.0
        };

        let layout = normalize(
            nodes,
            links,
            density.scale_factor,
            self.options.padding,
            top_margin,
        );
        debug!(
            nodes = layout.nodes.len(),
            links = layout.links.len(),
            width = layout.width,
            height = layout.height,
            "layout complete"
        );
        layout
    }
}

fn place(node: &Node, level: i32, x: f64, y: f64, tree: &SpanningTree) -> LayoutNode {
    let secondary_label = match node.model.as_deref() {
        Some(model) if model != node.display_label => Some(model.to_owned()),
        _ => node
            .serial
            .clone()
            .filter(|serial| *serial != node.display_label),
    };
    LayoutNode {
        id: node.id.clone(),
        kind: node.kind,
        status: node.status.clone(),
        label: node.display_label.clone(),
        secondary_label,
        model: node.model.clone(),
        serial: node.serial.clone(),
        switch_port: node.switch_port,
        x,
        y,
        level,
        parent_id: tree.parent_of(&node.id).map(str::to_owned),
    }
}

/// One link per tree edge, parent → child, in visit order.
fn route_links(nodes: &[LayoutNode], tree: &SpanningTree, scale_factor: f64) -> Vec<LayoutLink> {
    let index: IndexMap<&str, &LayoutNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    tree.order
        .iter()
        .filter_map(|child_id| {
            let parent_id = tree.parent_of(child_id)?;
            let parent = index.get(parent_id)?;
            let child = index.get(child_id.as_str())?;
            Some(LayoutLink {
                source_id: parent.id.clone(),
                target_id: child.id.clone(),
                path: route::route(parent, child, scale_factor),
            })
        })
        .collect()
}

/// Translate everything so the top-left node center sits at
/// `(padding, padding + top_margin)` and size the canvas around it.
fn normalize(
    mut nodes: Vec<LayoutNode>,
    mut links: Vec<LayoutLink>,
    scale_factor: f64,
    padding: f64,
    top_margin: f64,
) -> Layout {
    let (min_x, max_x, min_y, max_y) = nodes.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(min_x, max_x, min_y, max_y), n| {
            (min_x.min(n.x), max_x.max(n.x), min_y.min(n.y), max_y.max(n.y))
        },
    );

    let dx = padding - min_x;
    let dy = padding + top_margin - min_y;
    for node in &mut nodes {
        node.x += dx;
        node.y += dy;
    }
    for link in &mut links {
        link.path.translate(dx, dy);
    }

    Layout {
        nodes,
        links,
        width: (max_x - min_x) + 2.0 * padding,
        height: (max_y - min_y) + 2.0 * padding + top_margin,
        origin_x: dx,
        origin_y: dy,
        scale_factor,
    }
}
