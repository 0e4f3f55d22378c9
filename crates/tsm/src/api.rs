//! Curated surface for tools and experiments (UNSTABLE).
//!
//! Prefer these re-exports over reaching into stage modules; breaking changes
//! are allowed when they improve the pipeline.

// Input and output
pub use crate::graph::{Graph, GridPos, NodeKey, Point};
pub use crate::layout::{layout_with_defaults, ortho_layout, LayoutCfg, Node, OrthoLayout};
// Stages
pub use crate::compact::{compact, Compaction};
pub use crate::ortho::{orthogonalize, IlpCfg, Orthogonalization, Shape, ShapeSolver};
pub use crate::planar::{planarize, Planarization};
// Checks
pub use crate::check::{
    number_of_cross, overlap_nodes, overlay_edges, postcheck, precheck, segments_intersect,
};
// Instances
pub use crate::gen::{
    grid_graph, random_grid_subgraph, Cell, GridSampleCfg, ReplayToken as GridReplay,
};
// Errors
pub use crate::error::{LayoutError, Stage};
pub use crate::flownet::FlowError;
