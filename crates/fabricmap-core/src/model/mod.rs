// ── Layout domain model ──
//
// Input records as the data-fetching layer hands them over, the typed nodes
// the engine works on, and the layout description handed to renderers.

pub mod input;
pub mod kind;
pub mod layout;
pub mod node;
pub mod status;

// ── Re-exports ──────────────────────────────────────────────────────

pub use input::{DeviceInfo, DeviceMetadata, Graph, RawLink, RawNode};
pub use kind::DeviceKind;
pub use layout::{CubicCurve, Layout, LayoutLink, LayoutNode};
pub use node::Node;
pub use status::StatusClass;
