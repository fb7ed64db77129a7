// ── Backbone alignment and overlap resolution ──

use indexmap::IndexMap;
use tracing::debug;

use crate::ingest::IngestedGraph;
use crate::model::{DeviceKind, LayoutNode};

use super::order::natural_cmp;
use super::position::{Positions, placed_children};
use super::tree::SpanningTree;

/// Straighten single-child backbone chains (appliance → switch → switch).
///
/// A node whose only placed child is an unported backbone device pulls that
/// child level with itself. Switches other than the reference switch (first
/// by label) are deferred and aligned afterwards, in label order.
pub fn align_backbone(graph: &IngestedGraph, tree: &SpanningTree, ys: &mut Positions) {
    let mut switches: Vec<&String> = tree
        .order
        .iter()
        .filter(|id| graph.nodes.get(id.as_str()).is_some_and(|n| n.kind == DeviceKind::Switch))
        .collect();
    switches.sort_by(|a, b| natural_cmp(label(graph, a), label(graph, b)));
    let deferred: Vec<&String> = switches.iter().skip(1).copied().collect();

    let mut aligned = 0usize;
    for id in &tree.order {
        let Some(child) = sole_backbone_child(graph, tree, id) else {
            continue;
        };
        if deferred.contains(&child) {
            continue;
        }
        if let Some(y) = ys.get(id.as_str()).copied() {
            ys.insert(child.clone(), y);
            aligned += 1;
        }
    }

    for child in &deferred {
        let Some(parent) = tree.parent_of(child) else {
            continue;
        };
        if sole_backbone_child(graph, tree, parent) != Some(*child) {
            continue;
        }
        if let Some(y) = ys.get(parent).copied() {
            ys.insert((*child).clone(), y);
            aligned += 1;
        }
    }

    debug!(aligned, deferred = deferred.len(), "backbone aligned");
}

fn label<'a>(graph: &'a IngestedGraph, id: &'a str) -> &'a str {
    graph
        .nodes
        .get(id)
        .map_or(id, |n| n.display_label.as_str())
}

fn sole_backbone_child<'a>(
    graph: &'a IngestedGraph,
    tree: &'a SpanningTree,
    id: &str,
) -> Option<&'a String> {
    let mut children = placed_children(graph, tree, id);
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    graph
        .nodes
        .get(only.as_str())
        .filter(|n| n.kind.is_backbone() && n.switch_port.is_none())
        .map(|_| only)
}

/// Fan out nodes that landed on the same rounded coordinate.
///
/// Groups containing a switch are left alone. Members are ordered by
/// `(level, id)` and spread symmetrically around the group's mean y.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn resolve_overlaps(nodes: &mut [LayoutNode]) {
    let mut groups: IndexMap<(i64, i64), Vec<usize>> = IndexMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        let key = (node.x.round() as i64, node.y.round() as i64);
        groups.entry(key).or_default().push(idx);
    }

    let mut spread = 0usize;
    for members in groups.values_mut() {
        if members.len() < 2 || members.iter().any(|&i| nodes[i].kind == DeviceKind::Switch) {
            continue;
        }
        members.sort_by(|&a, &b| {
            nodes[a]
                .level
                .cmp(&nodes[b].level)
                .then_with(|| nodes[a].id.cmp(&nodes[b].id))
        });

        let count = members.len() as f64;
        let step = if members.len() > 5 { 20.0 } else { 30.0 };
        let center = members.iter().map(|&i| nodes[i].y).sum::<f64>() / count;
        for (rank, &i) in members.iter().enumerate() {
            nodes[i].y = center + (rank as f64 - (count - 1.0) / 2.0) * step;
        }
        spread += members.len();
    }

    if spread > 0 {
        debug!(spread, "overlapping nodes fanned out");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::ingest::ingest;
    use crate::layout::position::assign_y;
    use crate::model::{Graph, RawLink, RawNode};

    fn raw(id: &str, model: &str, label: &str) -> RawNode {
        RawNode {
            id: id.into(),
            model: Some(model.into()),
            label: Some(label.into()),
            ..RawNode::default()
        }
    }

    fn layout_node(id: &str, kind: DeviceKind, level: i32, x: f64, y: f64) -> LayoutNode {
        LayoutNode {
            id: id.into(),
            kind,
            status: None,
            label: id.into(),
            secondary_label: None,
            model: None,
            serial: None,
            switch_port: None,
            x,
            y,
            level,
            parent_id: None,
        }
    }

    #[test]
    fn single_child_chain_is_straightened() {
        let graph = Graph {
            nodes: vec![
                raw("mx", "MX64", "Edge"),
                raw("sw", "MS120", "Core"),
                raw("ap1", "MR36", "AP 1"),
                raw("ap2", "MR36", "AP 2"),
                raw("ap3", "MR36", "AP 3"),
            ],
            links: vec![
                RawLink::new("mx", "sw"),
                RawLink::new("sw", "ap1"),
                RawLink::new("sw", "ap2"),
                RawLink::new("sw", "ap3"),
            ],
        };
        let mut g = ingest(&graph, None);
        let mut tree = SpanningTree::build(&mut g, "mx");
        tree.sort_children(&g.nodes);
        let mut ys = assign_y(&g, &tree, 50.0);
        ys.insert("sw".into(), 7.0);

        align_backbone(&g, &tree, &mut ys);
        assert_eq!(ys["sw"], ys["mx"]);
    }

    #[test]
    fn ported_child_keeps_its_slot() {
        let graph = Graph {
            nodes: vec![
                raw("mx", "MX64", "Edge"),
                RawNode {
                    switch_port: Some(3),
                    ..raw("sw", "MS120", "Core")
                },
                raw("ap1", "MR36", "AP 1"),
            ],
            links: vec![RawLink::new("mx", "sw"), RawLink::new("sw", "ap1")],
        };
        let mut g = ingest(&graph, None);
        let mut tree = SpanningTree::build(&mut g, "mx");
        tree.sort_children(&g.nodes);
        let mut ys = assign_y(&g, &tree, 50.0);
        let before = ys["sw"];
        ys.insert("mx".into(), 500.0);

        align_backbone(&g, &tree, &mut ys);
        assert_eq!(ys["sw"], before);
    }

    #[test]
    fn deferred_switches_align_against_their_own_parent() {
        let graph = Graph {
            nodes: vec![
                raw("mx", "MX64", "Edge"),
                raw("sw-b", "MS120", "B switch"),
                raw("sw-a", "MS120", "A switch"),
                raw("ap", "MR36", "AP"),
            ],
            links: vec![
                RawLink::new("mx", "sw-b"),
                RawLink::new("sw-b", "sw-a"),
                RawLink::new("sw-a", "ap"),
            ],
        };
        let mut g = ingest(&graph, None);
        let mut tree = SpanningTree::build(&mut g, "mx");
        tree.sort_children(&g.nodes);
        let mut ys = assign_y(&g, &tree, 50.0);
        ys.insert("mx".into(), 100.0);
        ys.insert("sw-b".into(), 40.0);
        ys.insert("sw-a".into(), 10.0);

        align_backbone(&g, &tree, &mut ys);
        // "A switch" is the reference and aligns during the walk, before
        // its parent "B switch" is itself pulled level with the appliance.
        assert_eq!(ys["sw-a"], 40.0);
        assert_eq!(ys["sw-b"], 100.0);
    }

    #[test]
    fn overlapping_nodes_fan_out_symmetrically() {
        let mut nodes = vec![
            layout_node("b", DeviceKind::Ap, 2, 100.0, 50.0),
            layout_node("a", DeviceKind::Ap, 2, 100.2, 50.3),
            layout_node("c", DeviceKind::Ap, 1, 100.0, 49.7),
            layout_node("lone", DeviceKind::Ap, 2, 300.0, 50.0),
        ];
        resolve_overlaps(&mut nodes);

        let y = |id: &str| nodes.iter().find(|n| n.id == id).unwrap().y;
        assert!((y("c") - 20.0).abs() < 1e-9);
        assert!((y("a") - 50.0).abs() < 1e-9);
        assert!((y("b") - 80.0).abs() < 1e-9);
        assert_eq!(y("lone"), 50.0);
    }

    #[test]
    fn large_groups_use_the_tight_step() {
        let mut nodes: Vec<LayoutNode> = (0..6)
            .map(|i| layout_node(&format!("n{i}"), DeviceKind::Camera, 1, 0.0, 0.0))
            .collect();
        resolve_overlaps(&mut nodes);
        let ys: Vec<f64> = nodes.iter().map(|n| n.y).collect();
        assert_eq!(ys, [-50.0, -30.0, -10.0, 10.0, 30.0, 50.0]);
    }

    #[test]
    fn switch_groups_are_never_moved() {
        let mut nodes = vec![
            layout_node("sw", DeviceKind::Switch, 1, 0.0, 0.0),
            layout_node("ap", DeviceKind::Ap, 1, 0.0, 0.0),
        ];
        resolve_overlaps(&mut nodes);
        assert!(nodes.iter().all(|n| n.y == 0.0));
    }
}
