//! Orthogonal graph drawing by the Topology–Shape–Metrics approach.
//!
//! Stages
//! - `planar`: fix a planar embedding (from positions or computed) as a DCEL.
//! - `ortho`: bend-minimal orthogonal shape via min-cost flow (or an ILP).
//! - `compact`: rectangular refinement and segment lengths give integer
//!   coordinates.
//! - `layout::ortho_layout` runs all three after `check::precheck`.
//!
//! API Policy
//! - The stage modules are public so tests and tools can inspect
//!   intermediate results; `api` and `prelude` are the convenient surfaces.

pub mod api;
pub mod check;
pub mod compact;
pub mod dcel;
pub mod error;
pub mod flownet;
pub mod gen;
pub mod graph;
pub mod layout;
pub mod ortho;
pub mod planar;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::LayoutError;
pub use graph::{Graph, GridPos, NodeKey, Point};
pub use layout::{layout_with_defaults, ortho_layout, LayoutCfg, Node, OrthoLayout};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::check::{number_of_cross, overlap_nodes, overlay_edges, precheck};
    pub use crate::error::LayoutError;
    pub use crate::graph::{Graph, GridPos, Point};
    pub use crate::layout::{layout_with_defaults, ortho_layout, LayoutCfg, Node, OrthoLayout};
    pub use crate::ortho::{IlpCfg, ShapeSolver};
}
