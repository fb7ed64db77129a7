//! `fabricmap tree`: the spanning tree behind a layout, as text.

use serde::Serialize;

use fabricmap_core::layout::tree::{SpanningTree, select_root};
use fabricmap_core::{DeviceKind, IngestedGraph, ingest};

use crate::cli::TreeArgs;
use crate::config::Presentation;
use crate::error::CliError;
use crate::output;

use super::util;

/// Nested view of one subtree, serialized for json/yaml output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeNode {
    id: String,
    label: String,
    kind: DeviceKind,
    level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    switch_port: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

pub fn handle(args: &TreeArgs, view: Presentation) -> Result<(), CliError> {
    let (graph, metadata) = util::load_input(&args.input)?;
    let mut graph = ingest(&graph, metadata.as_ref());

    let Some(root) = select_root(&graph).map(str::to_owned) else {
        output::print_output("(empty graph)", view.quiet);
        return Ok(());
    };
    let mut tree = SpanningTree::build(&mut graph, &root);
    tree.sort_children(&graph.nodes);

    let start = match &args.from {
        Some(id) if graph.nodes.contains_key(id.as_str()) => id.clone(),
        Some(id) => {
            return Err(CliError::NodeNotFound {
                identifier: id.clone(),
            });
        }
        None => root,
    };

    let view_tree = build(&graph, &tree, &start);
    let color = output::should_color(view.color);
    let rendered = output::render_single(
        view.output,
        &view_tree,
        |t| render_text(t, color),
        |t| render_text(t, false),
    )?;
    output::print_output(&rendered, view.quiet);
    Ok(())
}

fn build(graph: &IngestedGraph, tree: &SpanningTree, id: &str) -> TreeNode {
    let node = graph.nodes.get(id);
    TreeNode {
        id: id.to_owned(),
        label: node.map_or_else(|| id.to_owned(), |n| n.display_label.clone()),
        kind: node.map_or(DeviceKind::Device, |n| n.kind),
        level: tree.depth_of(id),
        status: node.and_then(|n| n.status.clone()),
        switch_port: node.and_then(|n| n.switch_port),
        children: tree
            .children_of(id)
            .iter()
            .map(|child| build(graph, tree, child))
            .collect(),
    }
}

// ── Text rendering ──────────────────────────────────────────────────

fn render_text(root: &TreeNode, color: bool) -> String {
    let mut lines = vec![describe(root, color)];
    let mut open = Vec::new();
    let count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        push_branch(child, &mut open, i + 1 == count, color, &mut lines);
    }
    lines.join("\n")
}

/// `open[d]` is true while the ancestor at depth `d + 1` still has siblings
/// below it, so its column keeps a `│` guide.
fn push_branch(
    node: &TreeNode,
    open: &mut Vec<bool>,
    is_last: bool,
    color: bool,
    lines: &mut Vec<String>,
) {
    let mut line = build_prefix(open, is_last);
    line.push_str(&describe(node, color));
    lines.push(line);

    open.push(!is_last);
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        push_branch(child, open, i + 1 == count, color, lines);
    }
    open.pop();
}

fn build_prefix(open: &[bool], is_last: bool) -> String {
    let mut prefix: String = open
        .iter()
        .map(|&guide| if guide { "│   " } else { "    " })
        .collect();
    prefix.push_str(if is_last { "└── " } else { "├── " });
    prefix
}

fn describe(node: &TreeNode, color: bool) -> String {
    let mut text = format!("{} ({}", node.label, node.kind);
    if let Some(port) = node.switch_port {
        text.push_str(&format!(", port {port}"));
    }
    text.push(')');
    if node.label != node.id {
        text.push(' ');
        text.push_str(&output::muted(&format!("[{}]", node.id), color));
    }
    if node.status.is_some() {
        text.push(' ');
        text.push_str(&output::status_cell(node.status.as_deref(), color));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, kind: DeviceKind) -> TreeNode {
        TreeNode {
            id: id.into(),
            label: id.into(),
            kind,
            level: 2,
            status: None,
            switch_port: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn guides_follow_open_branches() {
        let mut sw = leaf("sw", DeviceKind::Switch);
        sw.level = 1;
        sw.children = vec![leaf("ap1", DeviceKind::Ap), leaf("ap2", DeviceKind::Ap)];
        let mut root = leaf("mx", DeviceKind::Gateway);
        root.level = 0;
        root.children = vec![sw, leaf("cam", DeviceKind::Camera)];

        let text = render_text(&root, false);
        assert_eq!(
            text,
            "mx (gateway)\n\
             ├── sw (switch)\n\
             │   ├── ap1 (ap)\n\
             │   └── ap2 (ap)\n\
             └── cam (camera)"
        );
    }

    #[test]
    fn description_carries_port_id_and_status() {
        let node = TreeNode {
            label: "Lobby".into(),
            status: Some("online".into()),
            switch_port: Some(7),
            ..leaf("q2ab", DeviceKind::Switch)
        };
        assert_eq!(describe(&node, false), "Lobby (switch, port 7) [q2ab] online");
    }
}
