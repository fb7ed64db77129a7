//! `fabricmap layout`: positions and link curves.

use tabled::Tabled;

use fabricmap_core::{Layout, LayoutEngine, LayoutLink, LayoutNode};

use crate::cli::LayoutArgs;
use crate::config::{self, Config, Presentation};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Level")]
    level: i32,
    #[tabled(rename = "X")]
    x: String,
    #[tabled(rename = "Y")]
    y: String,
    #[tabled(rename = "Parent")]
    parent: String,
}

impl NodeRow {
    fn new(node: &LayoutNode, color: bool) -> Self {
        let label = match &node.secondary_label {
            Some(secondary) => format!("{} {}", node.label, output::muted(secondary, color)),
            None => node.label.clone(),
        };
        Self {
            id: node.id.clone(),
            kind: node.kind.to_string(),
            label,
            status: output::status_cell(node.status.as_deref(), color),
            level: node.level,
            x: util::coord(node.x),
            y: util::coord(node.y),
            parent: node.parent_id.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Path")]
    path: String,
}

impl From<&LayoutLink> for LinkRow {
    fn from(link: &LayoutLink) -> Self {
        Self {
            source: link.source_id.clone(),
            target: link.target_id.clone(),
            path: link.path.to_svg_path(),
        }
    }
}

pub fn handle(args: &LayoutArgs, cfg: &Config, view: Presentation) -> Result<(), CliError> {
    let (graph, metadata) = util::load_input(&args.input)?;
    let engine = LayoutEngine::new(config::layout_options(cfg, args)?);
    let layout = engine.layout(&graph, metadata.as_ref());

    let color = output::should_color(view.color);
    let links = args.links;
    let rendered = output::render_single(
        view.output,
        &layout,
        |l| detail(l, links, color),
        |l| plain(l, links),
    )?;
    output::print_output(&rendered, view.quiet);
    Ok(())
}

fn detail(layout: &Layout, links: bool, color: bool) -> String {
    let table = if links {
        let rows: Vec<LinkRow> = layout.links.iter().map(LinkRow::from).collect();
        output::render_table(&rows)
    } else {
        let rows: Vec<NodeRow> = layout.nodes.iter().map(|n| NodeRow::new(n, color)).collect();
        output::render_table(&rows)
    };
    let summary = format!(
        "{} nodes, {} links, canvas {} x {}, scale {}",
        layout.nodes.len(),
        layout.links.len(),
        util::coord(layout.width),
        util::coord(layout.height),
        layout.scale_factor,
    );
    format!("{table}\n{}", output::muted(&summary, color))
}

fn plain(layout: &Layout, links: bool) -> String {
    if links {
        layout
            .links
            .iter()
            .map(|l| format!("{}\t{}\t{}", l.source_id, l.target_id, l.path.to_svg_path()))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        layout
            .nodes
            .iter()
            .map(|n| format!("{}\t{}\t{}", n.id, util::coord(n.x), util::coord(n.y)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
