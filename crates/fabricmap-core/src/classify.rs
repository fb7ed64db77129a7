// ── Device kind classification ──
//
// The only typing signal most inventories give us is free text, so this is a
// fixed first-match chain over the model prefix and a case-folded blob of
// every descriptive field. Runs once per node during ingest.

use crate::model::{DeviceKind, RawNode};

/// Classify a raw node into a [`DeviceKind`]. Total: unknown input is `Device`.
pub fn classify(node: &RawNode) -> DeviceKind {
    let model = node
        .model
        .as_deref()
        .map(|m| m.trim().to_ascii_uppercase())
        .unwrap_or_default();
    let text = search_text(node);
    let has = |needle: &str| text.contains(needle);

    let declared_external = node
        .node_type
        .as_deref()
        .is_some_and(|t| t.trim().eq_ignore_ascii_case("external"));

    if declared_external || has("wan") || has("internet") {
        DeviceKind::External
    } else if model.starts_with("MX") || has("gateway") || has("gtw") {
        DeviceKind::Gateway
    } else if model.starts_with("MS") || has("switch") {
        DeviceKind::Switch
    } else if model.starts_with("MR") || has("access point") {
        DeviceKind::Ap
    } else if model.starts_with("MV") || has("camera") {
        DeviceKind::Camera
    } else if model.starts_with("MT") || has("sensor") {
        DeviceKind::Sensor
    } else if model.starts_with('Z')
        || has("utm")
        || has("teleworker")
        || has("security appliance")
    {
        DeviceKind::Appliance
    } else {
        kind_from_product_hints(node).unwrap_or(DeviceKind::Device)
    }
}

/// Declared product-type hints, checked in a fixed order.
fn kind_from_product_hints(node: &RawNode) -> Option<DeviceKind> {
    let hints: Vec<String> = node
        .product_type
        .iter()
        .chain(node.product_types.iter())
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    let declares = |hint: &str| hints.iter().any(|h| h == hint);

    [
        ("gateway", DeviceKind::Gateway),
        ("appliance", DeviceKind::Appliance),
        ("switch", DeviceKind::Switch),
        ("wireless", DeviceKind::Ap),
        ("bridge", DeviceKind::Bridge),
    ]
    .into_iter()
    .find_map(|(hint, kind)| declares(hint).then_some(kind))
}

fn search_text(node: &RawNode) -> String {
    let mut parts: Vec<&str> = Vec::new();
    parts.extend(node.model.as_deref());
    parts.extend(node.label.as_deref());
    parts.extend(node.name.as_deref());
    parts.push(node.id.as_str());
    parts.extend(node.serial.as_deref());
    parts.extend(node.node_type.as_deref());
    parts.extend(node.product_type.as_deref());
    parts.extend(node.product_types.iter().map(String::as_str));
    parts.extend(node.tags.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_model(model: &str) -> RawNode {
        RawNode {
            model: Some(model.into()),
            ..RawNode::default()
        }
    }

    #[test]
    fn model_prefixes() {
        assert_eq!(classify(&with_model("MX64")), DeviceKind::Gateway);
        assert_eq!(classify(&with_model("MS120-8")), DeviceKind::Switch);
        assert_eq!(classify(&with_model("MR36")), DeviceKind::Ap);
        assert_eq!(classify(&with_model("MV12")), DeviceKind::Camera);
        assert_eq!(classify(&with_model("MT10")), DeviceKind::Sensor);
        assert_eq!(classify(&with_model("Z3")), DeviceKind::Appliance);
        assert_eq!(classify(&RawNode::default()), DeviceKind::Device);
    }

    #[test]
    fn model_prefix_is_case_insensitive() {
        assert_eq!(classify(&with_model("ms225-48lp")), DeviceKind::Switch);
        assert_eq!(classify(&with_model("z4c")), DeviceKind::Appliance);
    }

    #[test]
    fn external_wins_over_everything() {
        let node = RawNode {
            id: "uplink".into(),
            model: Some("MX85".into()),
            label: Some("WAN 1".into()),
            ..RawNode::default()
        };
        assert_eq!(classify(&node), DeviceKind::External);

        let declared = RawNode {
            id: "isp".into(),
            node_type: Some("External".into()),
            ..RawNode::default()
        };
        assert_eq!(classify(&declared), DeviceKind::External);
    }

    #[test]
    fn free_text_fallbacks() {
        let cases = [
            ("Branch GTW", DeviceKind::Gateway),
            ("Core Switch", DeviceKind::Switch),
            ("Lobby access point", DeviceKind::Ap),
            ("Dock camera", DeviceKind::Camera),
            ("Freezer sensor", DeviceKind::Sensor),
            ("Home Teleworker", DeviceKind::Appliance),
            ("Security Appliance", DeviceKind::Appliance),
        ];
        for (label, expected) in cases {
            let node = RawNode {
                id: "x".into(),
                label: Some(label.into()),
                ..RawNode::default()
            };
            assert_eq!(classify(&node), expected, "{label}");
        }
    }

    #[test]
    fn tags_and_serial_feed_the_text() {
        let tagged = RawNode {
            id: "n1".into(),
            tags: vec!["Camera".into()],
            ..RawNode::default()
        };
        assert_eq!(classify(&tagged), DeviceKind::Camera);
    }

    #[test]
    fn product_hints_are_last_resort() {
        let wireless = RawNode {
            id: "n1".into(),
            product_type: Some("wireless".into()),
            ..RawNode::default()
        };
        assert_eq!(classify(&wireless), DeviceKind::Ap);

        let bridge = RawNode {
            id: "n2".into(),
            product_types: vec!["bridge".into()],
            ..RawNode::default()
        };
        assert_eq!(classify(&bridge), DeviceKind::Bridge);

        // Hints are part of the text blob, so "switch" fires before the MR prefix.
        let both = RawNode {
            id: "n3".into(),
            model: Some("MR46".into()),
            product_type: Some("switch".into()),
            ..RawNode::default()
        };
        assert_eq!(classify(&both), DeviceKind::Switch);
    }
}
