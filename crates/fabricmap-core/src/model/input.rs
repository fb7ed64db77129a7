// ── Raw input records ──
//
// Loosely typed, possibly incomplete records produced by the data-fetching
// layer. Nothing here is trusted: ingest decides what survives.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// A device record as reported by the management API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Declared node type (e.g. `"external"` for uplink placeholders).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Port number on the upstream switch, when known.
    #[serde(
        default,
        deserialize_with = "lenient_port",
        skip_serializing_if = "Option::is_none"
    )]
    pub switch_port: Option<u32>,
}

/// Undirected edge reference between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLink {
    pub source: String,
    pub target: String,
}

impl RawLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A full graph description: the engine's primary input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

impl Graph {
    /// Decode a graph from its JSON document form.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|e| CoreError::graph(&e))
    }
}

/// Catalog information known about a device, keyed by serial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
}

/// Serial → [`DeviceInfo`] lookup.
///
/// Serials are matched upper-cased first, then exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceMetadata(HashMap<String, DeviceInfo>);

impl DeviceMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|e| CoreError::metadata(&e))
    }

    pub fn insert(&mut self, serial: impl Into<String>, info: DeviceInfo) {
        self.0.insert(serial.into(), info);
    }

    pub fn lookup(&self, serial: &str) -> Option<&DeviceInfo> {
        self.0
            .get(&serial.to_uppercase())
            .or_else(|| self.0.get(serial))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, DeviceInfo)> for DeviceMetadata {
    fn from_iter<I: IntoIterator<Item = (String, DeviceInfo)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Accept port numbers as JSON integers or numeric strings; anything else
/// (null, negative, garbage) reads as "no port".
fn lenient_port<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn raw_node_reads_camel_case_fields() {
        let node: RawNode = serde_json::from_str(
            r#"{"id":"n1","productType":"switch","switchPort":7,"type":"external"}"#,
        )
        .unwrap();
        assert_eq!(node.product_type.as_deref(), Some("switch"));
        assert_eq!(node.switch_port, Some(7));
        assert_eq!(node.node_type.as_deref(), Some("external"));
    }

    #[test]
    fn switch_port_accepts_numeric_strings() {
        let node: RawNode = serde_json::from_str(r#"{"id":"n1","switchPort":" 12 "}"#).unwrap();
        assert_eq!(node.switch_port, Some(12));
    }

    #[test]
    fn switch_port_ignores_garbage() {
        for raw in [
            r#"{"id":"n1","switchPort":null}"#,
            r#"{"id":"n1","switchPort":-3}"#,
            r#"{"id":"n1","switchPort":"uplink"}"#,
        ] {
            let node: RawNode = serde_json::from_str(raw).unwrap();
            assert_eq!(node.switch_port, None, "{raw}");
        }
    }

    #[test]
    fn metadata_lookup_prefers_upper_case_serial() {
        let mut meta = DeviceMetadata::new();
        meta.insert(
            "q2ab-1234",
            DeviceInfo {
                name: Some("as-is".into()),
                ..DeviceInfo::default()
            },
        );
        meta.insert(
            "Q2AB-1234",
            DeviceInfo {
                name: Some("upper".into()),
                ..DeviceInfo::default()
            },
        );
        meta.insert(
            "q2cd-9",
            DeviceInfo {
                name: Some("lower".into()),
                ..DeviceInfo::default()
            },
        );

        assert_eq!(
            meta.lookup("q2ab-1234").unwrap().name.as_deref(),
            Some("upper")
        );
        assert_eq!(meta.lookup("q2cd-9").unwrap().name.as_deref(), Some("lower"));
        assert!(meta.lookup("missing").is_none());
    }

    #[test]
    fn graph_from_json_reports_decode_errors() {
        let err = Graph::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidGraph { .. }));
    }
}
