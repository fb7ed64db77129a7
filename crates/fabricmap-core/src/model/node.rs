// ── Typed node ──

use serde::{Deserialize, Serialize};

use super::kind::DeviceKind;

/// A device after ingest: unique id, resolved label and a fixed kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub serial: Option<String>,
    pub display_label: String,
    pub model: Option<String>,
    pub kind: DeviceKind,
    /// Raw status string, passed through untouched for the renderer.
    pub status: Option<String>,
    pub switch_port: Option<u32>,
}

impl Node {
    /// Placeholder for the uplink when the graph carries none.
    pub(crate) fn synthetic_external(id: String) -> Self {
        Self {
            id,
            serial: None,
            display_label: "Internet".into(),
            model: None,
            kind: DeviceKind::External,
            status: None,
            switch_port: None,
        }
    }
}
