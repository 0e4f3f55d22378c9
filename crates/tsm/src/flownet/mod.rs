//! Generic flow networks with lower bounds.
//!
//! Purpose
//! - One directed multigraph type shared by the shape stage and both segment
//!   length passes. Nodes carry an integer demand (`in − out`, negative for
//!   supplies); arcs carry `(lower, capacity, cost)` and a caller key so that
//!   parallel arcs between the same pair of nodes stay distinct.
//!
//! Solvers
//! - `min_cost_flow`: reduce lower bounds away, attach a super source and
//!   sink, then run successive shortest paths (Dijkstra on reduced costs).
//!   Exact and integral.
//! - `solve_ilp`: the same constraints as an integer program through
//!   `good_lp` (pure-Rust `microlp` backend), with optional `|x − y|`
//!   penalties between pairs of arcs added to the objective.
//!
//! Layout
//! - `types.rs` (network, solution, errors), `ssp.rs`, `ilp.rs`.

mod ilp;
mod ssp;
mod types;

pub use ilp::AbsDiffPenalty;
pub use types::{ArcId, FlowArc, FlowError, FlowNetwork, FlowNode, FlowSolution, UNBOUNDED};

#[cfg(test)]
mod tests;
