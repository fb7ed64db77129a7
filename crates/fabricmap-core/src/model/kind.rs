// ── Device kind vocabulary ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Canonical device kind, assigned once per node during ingest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceKind {
    External,
    Gateway,
    Appliance,
    Switch,
    Bridge,
    Ap,
    Camera,
    Sensor,
    Device,
}

impl DeviceKind {
    /// Sibling ordering priority; lower sorts first.
    pub fn priority(self) -> u8 {
        match self {
            Self::External => 0,
            Self::Gateway | Self::Appliance => 1,
            Self::Switch => 2,
            Self::Bridge => 3,
            Self::Ap => 4,
            Self::Camera => 5,
            Self::Sensor => 6,
            Self::Device => 7,
        }
    }

    /// Part of the vertical spine of the drawing.
    pub fn is_backbone(self) -> bool {
        matches!(
            self,
            Self::Appliance | Self::Gateway | Self::Switch | Self::Bridge
        )
    }

    /// Eligible as the hierarchy root in the first selection pass.
    pub fn is_edge_device(self) -> bool {
        matches!(self, Self::Appliance | Self::Gateway)
    }

    /// Unscaled glyph footprint used to keep link anchors clear of the node.
    pub fn footprint(self) -> f64 {
        match self {
            Self::External => 64.0,
            Self::Gateway | Self::Appliance => 56.0,
            Self::Switch => 52.0,
            Self::Bridge => 44.0,
            Self::Ap => 40.0,
            Self::Camera => 36.0,
            Self::Sensor | Self::Device => 32.0,
        }
    }
}
