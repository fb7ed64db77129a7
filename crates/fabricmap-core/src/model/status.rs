// ── Status classification ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Coarse health bucket for a raw device status string.
///
/// Renderers map these to colors; the layout itself keeps the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusClass {
    Ok,
    Warn,
    Critical,
    Unknown,
}

impl StatusClass {
    pub fn from_status(status: Option<&str>) -> Self {
        let Some(raw) = status else {
            return Self::Unknown;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "online" | "connected" | "ready" => Self::Ok,
            "alerting" | "warning" | "degraded" => Self::Warn,
            "offline" | "down" => Self::Critical,
            _ => Self::Unknown,
        }
    }
}
