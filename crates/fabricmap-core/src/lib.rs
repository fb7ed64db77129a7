//! Topology layout engine for the fabricmap workspace.
//!
//! Turns a loosely-typed network graph (devices + physical/logical links) into
//! a deterministic, hierarchical 2-D drawing that UI consumers can render
//! without further geometry work:
//!
//! - **Ingest** ([`ingest`]): Normalizes raw node/link records into typed
//!   [`Node`]s keyed by id, merging optional [`DeviceMetadata`]. Dangling
//!   links are dropped, duplicate ids collapse to the last record.
//!
//! - **Classification** ([`classify`]): Assigns every node a [`DeviceKind`]
//!   once, from model prefixes and free-text hints.
//!
//! - **Layout** ([`layout`]): [`LayoutEngine`] runs root selection,
//!   spanning-tree construction, position assignment, sibling spacing,
//!   backbone alignment, overlap resolution, scaling and link routing, then
//!   normalizes everything into a padded canvas ([`Layout`]).
//!
//! Every call is a full, stateless recomputation: no state survives between
//! invocations, so a single engine can serve concurrent callers.

pub mod classify;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::classify;
pub use error::CoreError;
pub use ingest::{IngestedGraph, ingest};
pub use layout::{LayoutEngine, LayoutOptions};

pub use model::{
    CubicCurve, DeviceInfo, DeviceKind, DeviceMetadata, Graph, Layout, LayoutLink, LayoutNode,
    Node, RawLink, RawNode, StatusClass,
};
