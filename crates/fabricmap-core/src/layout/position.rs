// ── Vertical placement ──
//
// Two separate passes: a bottom-up fold that gives every node a y, then a
// top-down sweep that pushes sibling subtrees apart until they clear the
// minimum spacing. A childless external node never takes a slot; it sits
// level with its parent and rides along with its subtree. An external node
// that carries children is placed like any other branch.

use indexmap::IndexMap;
use tracing::debug;

use crate::ingest::IngestedGraph;
use crate::model::DeviceKind;

use super::tree::SpanningTree;

/// Minimum clearance between adjacent sibling subtrees.
pub const MIN_SIBLING_SPACING: f64 = 55.0;

/// Slack for accumulated floating point error in spacing checks.
pub(crate) const SPACING_EPSILON: f64 = 1e-6;

pub type Positions = IndexMap<String, f64>;

/// Children that take part in placement: everything except childless
/// external nodes.
pub fn placed_children<'a>(
    graph: &'a IngestedGraph,
    tree: &'a SpanningTree,
    id: &str,
) -> impl Iterator<Item = &'a String> + use<'a> {
    tree.children_of(id)
        .iter()
        .filter(move |c| takes_part(graph, tree, c))
}

fn takes_part(graph: &IngestedGraph, tree: &SpanningTree, id: &str) -> bool {
    graph
        .nodes
        .get(id)
        .is_some_and(|n| n.kind != DeviceKind::External || !tree.children_of(id).is_empty())
}

/// Sequential leaf slots.
struct Slots {
    next: f64,
    gap: f64,
}

impl Slots {
    fn take(&mut self) -> f64 {
        let y = self.next;
        self.next += self.gap;
        y
    }
}

/// Assign a y to every node in the tree.
///
/// Leaves, and switches hanging off a known switch port, take the next
/// sequential slot; branch nodes sit at the average of their children. A
/// ported switch takes its slot before its own children so they render below
/// it. Nodes the recursion never reaches inherit their parent's y.
pub fn assign_y(graph: &IngestedGraph, tree: &SpanningTree, vertical_gap: f64) -> Positions {
    let mut slots = Slots {
        next: 0.0,
        gap: vertical_gap,
    };
    let mut ys = Positions::with_capacity(tree.order.len());
    fold_y(&tree.root, graph, tree, &mut slots, &mut ys);

    for id in &tree.order {
        if ys.contains_key(id) {
            continue;
        }
        let y = tree
            .parent_of(id)
            .and_then(|p| ys.get(p).copied())
            .unwrap_or_else(|| slots.take());
        ys.insert(id.clone(), y);
    }
    ys
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn fold_y(
    id: &str,
    graph: &IngestedGraph,
    tree: &SpanningTree,
    slots: &mut Slots,
    ys: &mut Positions,
) -> f64 {
    let children: Vec<&String> = placed_children(graph, tree, id).collect();
    let ported_switch = graph
        .nodes
        .get(id)
        .is_some_and(|n| n.kind == DeviceKind::Switch && n.switch_port.is_some());

    if ported_switch {
        let y = slots.take();
        ys.insert(id.to_owned(), y);
        for child in children {
            fold_y(child, graph, tree, slots, ys);
        }
        return y;
    }

    let y = if children.is_empty() {
        slots.take()
    } else {
        let sum: f64 = children
            .iter()
            .map(|child| fold_y(child, graph, tree, slots, ys))
            .sum();
        sum / children.len() as f64
    };

    ys.insert(id.to_owned(), y);
    y
}

/// Highest y anywhere in the subtree rooted at `id` (the node included).
pub fn subtree_max_y(tree: &SpanningTree, ys: &Positions, id: &str) -> f64 {
    tree.children_of(id)
        .iter()
        .map(|c| subtree_max_y(tree, ys, c))
        .fold(ys.get(id).copied().unwrap_or(f64::MIN), f64::max)
}

fn shift_subtree(tree: &SpanningTree, ys: &mut Positions, id: &str, delta: f64) {
    if let Some(y) = ys.get_mut(id) {
        *y += delta;
    }
    for child in tree.children_of(id) {
        shift_subtree(tree, ys, child, delta);
    }
}

/// Push sibling subtrees apart until each clears [`MIN_SIBLING_SPACING`].
///
/// Sweeps top-down from the root; a sweep that shifted anything is followed
/// by another, since a deeper shift can enlarge a subtree that was already
/// checked one level up.
pub fn enforce_spacing(graph: &IngestedGraph, tree: &SpanningTree, ys: &mut Positions) {
    let max_sweeps = graph.nodes.len().max(1);
    for sweep in 1..=max_sweeps {
        if !sweep_spacing(graph, tree, ys, &tree.root) {
            debug!(sweeps = sweep, "sibling spacing settled");
            return;
        }
    }
    debug!(sweeps = max_sweeps, "sibling spacing hit sweep limit");
}

fn sweep_spacing(graph: &IngestedGraph, tree: &SpanningTree, ys: &mut Positions, id: &str) -> bool {
    let mut siblings: Vec<&String> = placed_children(graph, tree, id).collect();
    siblings.sort_by(|a, b| {
        let ya = ys.get(a.as_str()).copied().unwrap_or_default();
        let yb = ys.get(b.as_str()).copied().unwrap_or_default();
        ya.total_cmp(&yb)
    });

    let mut shifted = false;
    for pair in siblings.windows(2) {
        let [prev, curr] = pair else { continue };
        let prev_max = subtree_max_y(tree, ys, prev);
        let curr_y = ys.get(curr.as_str()).copied().unwrap_or_default();
        let clearance = curr_y - prev_max;
        if clearance < MIN_SIBLING_SPACING - SPACING_EPSILON {
            shift_subtree(tree, ys, curr, MIN_SIBLING_SPACING - clearance);
            shifted = true;
        }
    }

    for child in siblings {
        shifted |= sweep_spacing(graph, tree, ys, child);
    }
    shifted
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::ingest::ingest;
    use crate::model::{Graph, RawLink, RawNode};

    fn raw(id: &str, model: &str, port: Option<u32>) -> RawNode {
        RawNode {
            id: id.into(),
            model: Some(model.into()),
            switch_port: port,
            ..RawNode::default()
        }
    }

    fn build(nodes: Vec<RawNode>, links: Vec<RawLink>, root: &str) -> (IngestedGraph, SpanningTree) {
        let mut g = ingest(&Graph { nodes, links }, None);
        let mut tree = SpanningTree::build(&mut g, root);
        tree.sort_children(&g.nodes);
        (g, tree)
    }

    #[test]
    fn branches_average_their_children() {
        let (g, tree) = build(
            vec![
                raw("mx", "MX64", None),
                raw("ap1", "MR36", None),
                raw("ap2", "MR36", None),
                raw("ap3", "MR36", None),
            ],
            vec![
                RawLink::new("mx", "ap1"),
                RawLink::new("mx", "ap2"),
                RawLink::new("mx", "ap3"),
            ],
            "mx",
        );
        let ys = assign_y(&g, &tree, 50.0);
        assert_eq!(ys["ap1"], 0.0);
        assert_eq!(ys["ap2"], 50.0);
        assert_eq!(ys["ap3"], 100.0);
        assert_eq!(ys["mx"], 50.0);
        // The uplink takes no slot and sits level with the root.
        assert_eq!(ys["internet"], 50.0);
    }

    #[test]
    fn ported_switch_takes_slot_before_its_children() {
        let (g, tree) = build(
            vec![
                raw("core", "MS425", None),
                raw("edge", "MS120", Some(5)),
                raw("ap1", "MR36", None),
                raw("ap2", "MR36", None),
            ],
            vec![
                RawLink::new("core", "edge"),
                RawLink::new("edge", "ap1"),
                RawLink::new("edge", "ap2"),
            ],
            "core",
        );
        let ys = assign_y(&g, &tree, 50.0);
        assert_eq!(ys["edge"], 0.0);
        assert_eq!(ys["ap1"], 50.0);
        assert_eq!(ys["ap2"], 100.0);
        assert_eq!(ys["core"], 0.0);
    }

    #[test]
    fn spacing_pushes_crowded_subtrees_apart() {
        // Two switches with three APs each, then a lone AP: the averaged
        // switch rows overlap their neighbours' AP fans at a 10-unit gap.
        let mut nodes = vec![
            raw("mx", "MX64", None),
            raw("sw-a", "MS120", None),
            raw("sw-b", "MS120", None),
            raw("ap-z", "MR36", None),
        ];
        let mut links = vec![
            RawLink::new("mx", "sw-a"),
            RawLink::new("mx", "sw-b"),
            RawLink::new("mx", "ap-z"),
        ];
        for sw in ["sw-a", "sw-b"] {
            for i in 0..3 {
                let id = format!("{sw}-ap{i}");
                nodes.push(raw(&id, "MR36", None));
                links.push(RawLink::new(sw, id));
            }
        }
        let (g, tree) = build(nodes, links, "mx");
        let mut ys = assign_y(&g, &tree, 10.0);
        enforce_spacing(&g, &tree, &mut ys);

        for parent in &tree.order {
            let mut kids: Vec<&String> = placed_children(&g, &tree, parent).collect();
            kids.sort_by(|a, b| ys[a.as_str()].total_cmp(&ys[b.as_str()]));
            for pair in kids.windows(2) {
                let clearance = ys[pair[1].as_str()] - subtree_max_y(&tree, &ys, pair[0]);
                assert!(
                    clearance >= MIN_SIBLING_SPACING - SPACING_EPSILON,
                    "{} -> {} clearance {clearance}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn external_branch_is_folded_and_spaced() {
        // "WAN" in the label makes the switch external; its APs still need
        // their own slots and clearance.
        let (g, tree) = build(
            vec![
                raw("mx", "MX64", None),
                RawNode {
                    label: Some("WAN Switch".into()),
                    ..raw("wan-sw", "MS120", None)
                },
                raw("ap1", "MR36", None),
                raw("ap2", "MR36", None),
                raw("ap3", "MR36", None),
            ],
            vec![
                RawLink::new("mx", "wan-sw"),
                RawLink::new("wan-sw", "ap1"),
                RawLink::new("wan-sw", "ap2"),
                RawLink::new("wan-sw", "ap3"),
            ],
            "mx",
        );
        assert_eq!(g.nodes["wan-sw"].kind, DeviceKind::External);
        assert_eq!(placed_children(&g, &tree, "mx").count(), 1);

        let mut ys = assign_y(&g, &tree, 10.0);
        assert_eq!(ys["wan-sw"], 10.0);
        assert_eq!(ys["ap3"], 20.0);

        enforce_spacing(&g, &tree, &mut ys);
        assert_eq!(ys["ap1"], 0.0);
        assert_eq!(ys["ap2"], 55.0);
        assert_eq!(ys["ap3"], 110.0);
    }

    #[test]
    fn spacing_leaves_roomy_layouts_alone() {
        let (g, tree) = build(
            vec![
                raw("mx", "MX64", None),
                raw("ap1", "MR36", None),
                raw("ap2", "MR36", None),
            ],
            vec![RawLink::new("mx", "ap1"), RawLink::new("mx", "ap2")],
            "mx",
        );
        let mut ys = assign_y(&g, &tree, 80.0);
        let before = ys.clone();
        enforce_spacing(&g, &tree, &mut ys);
        assert_eq!(ys, before);
    }
}
