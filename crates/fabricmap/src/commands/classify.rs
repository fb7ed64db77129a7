//! `fabricmap classify`: device kind for one record or every node of a graph.

use serde::Serialize;
use tabled::Tabled;

use fabricmap_core::{DeviceKind, RawNode, classify};

use crate::cli::ClassifyArgs;
use crate::config::Presentation;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification {
    id: String,
    kind: DeviceKind,
    priority: u8,
    backbone: bool,
    footprint: f64,
}

impl Classification {
    fn of(node: &RawNode) -> Self {
        let kind = classify(node);
        Self {
            id: node.id.clone(),
            kind,
            priority: kind.priority(),
            backbone: kind.is_backbone(),
            footprint: kind.footprint(),
        }
    }
}

#[derive(Tabled)]
struct ClassificationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Priority")]
    priority: u8,
    #[tabled(rename = "Backbone")]
    backbone: String,
}

impl From<&Classification> for ClassificationRow {
    fn from(c: &Classification) -> Self {
        Self {
            id: c.id.clone(),
            kind: c.kind.to_string(),
            priority: c.priority,
            backbone: if c.backbone { "yes" } else { "-" }.into(),
        }
    }
}

pub fn handle(args: &ClassifyArgs, view: Presentation) -> Result<(), CliError> {
    let rendered = if let Some(path) = &args.graph {
        let graph = util::load_graph(path)?;
        let results: Vec<Classification> = graph.nodes.iter().map(Classification::of).collect();
        output::render_list(
            view.output,
            &results,
            |c| ClassificationRow::from(c),
            |c| format!("{}\t{}", c.id, c.kind),
        )?
    } else {
        let result = Classification::of(&record_from_flags(args));
        output::render_single(
            view.output,
            &result,
            |c| c.kind.to_string(),
            |c| c.kind.to_string(),
        )?
    };
    output::print_output(&rendered, view.quiet);
    Ok(())
}

fn record_from_flags(args: &ClassifyArgs) -> RawNode {
    let mut product_types = args.product_type.clone();
    let product_type = (!product_types.is_empty()).then(|| product_types.remove(0));
    RawNode {
        id: args
            .label
            .clone()
            .or_else(|| args.name.clone())
            .or_else(|| args.model.clone())
            .unwrap_or_default(),
        label: args.label.clone(),
        name: args.name.clone(),
        model: args.model.clone(),
        node_type: args.node_type.clone(),
        product_type,
        product_types,
        tags: args.tags.clone(),
        ..RawNode::default()
    }
}
