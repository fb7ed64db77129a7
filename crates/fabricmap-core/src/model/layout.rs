// ── Layout output ──
//
// The description handed to the rendering layer: positioned nodes, routed
// tree links and the padded canvas they fit in.

use serde::{Deserialize, Serialize};

use super::input::{Graph, RawLink, RawNode};
use super::kind::DeviceKind;

/// Cubic Bézier segment between two link anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubicCurve {
    pub start_x: f64,
    pub start_y: f64,
    pub ctrl1_x: f64,
    pub ctrl1_y: f64,
    pub ctrl2_x: f64,
    pub ctrl2_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl CubicCurve {
    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        self.start_x += dx;
        self.ctrl1_x += dx;
        self.ctrl2_x += dx;
        self.end_x += dx;
        self.start_y += dy;
        self.ctrl1_y += dy;
        self.ctrl2_y += dy;
        self.end_y += dy;
    }

    /// SVG path data (`M … C …`).
    pub fn to_svg_path(&self) -> String {
        format!(
            "M{:.2},{:.2} C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            self.start_x,
            self.start_y,
            self.ctrl1_x,
            self.ctrl1_y,
            self.ctrl2_x,
            self.ctrl2_y,
            self.end_x,
            self.end_y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    pub kind: DeviceKind,
    pub status: Option<String>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_port: Option<u32>,
    pub x: f64,
    pub y: f64,
    /// Tree depth; `-1` for external (uplink) nodes.
    pub level: i32,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutLink {
    /// Tree parent.
    pub source_id: String,
    /// Tree child.
    pub target_id: String,
    pub path: CubicCurve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub links: Vec<LayoutLink>,
    pub width: f64,
    pub height: f64,
    /// Translation applied to raw engine coordinates during normalization.
    pub origin_x: f64,
    pub origin_y: f64,
    pub scale_factor: f64,
}

impl Layout {
    /// "Nothing to draw."
    pub fn empty(scale_factor: f64) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            width: 0.0,
            height: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            scale_factor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Children of `id` in the drawn tree, in output order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a LayoutNode> + 'a {
        self.nodes
            .iter()
            .filter(move |n| n.parent_id.as_deref() == Some(id))
    }

    /// Strip computed geometry and turn the layout back into an engine input.
    ///
    /// Kinds survive the round trip as declared type / product-type hints, so
    /// re-running the engine on the result yields the same sibling order.
    pub fn to_graph(&self) -> Graph {
        let nodes = self
            .nodes
            .iter()
            .map(|n| RawNode {
                id: n.id.clone(),
                serial: n.serial.clone(),
                label: Some(n.label.clone()),
                model: n.model.clone(),
                node_type: (n.kind == DeviceKind::External).then(|| "external".to_owned()),
                product_type: product_hint(n.kind).map(str::to_owned),
                status: n.status.clone(),
                switch_port: n.switch_port,
                ..RawNode::default()
            })
            .collect();

        let links = self
            .links
            .iter()
            .map(|l| RawLink::new(l.source_id.clone(), l.target_id.clone()))
            .collect();

        Graph { nodes, links }
    }
}

fn product_hint(kind: DeviceKind) -> Option<&'static str> {
    match kind {
        DeviceKind::Gateway => Some("gateway"),
        DeviceKind::Appliance => Some("appliance"),
        DeviceKind::Switch => Some("switch"),
        DeviceKind::Bridge => Some("bridge"),
        DeviceKind::Ap => Some("wireless"),
        DeviceKind::Camera => Some("camera"),
        DeviceKind::Sensor => Some("sensor"),
        DeviceKind::External | DeviceKind::Device => None,
    }
}
