//! Half-edge structure (DCEL) for planar embeddings.
//!
//! Purpose
//! - Represent a combinatorial embedding as twin/prev/succ/face links between
//!   half-edge records so the later stages can walk faces and vertices in O(1)
//!   per step and cut the embedding up in place.
//!
//! Conventions
//! - The face of a half-edge lies on its right. Internal faces are therefore
//!   walked clockwise and the external face counter-clockwise.
//! - `succ(u→v) = v→w` where `w` follows `u` counter-clockwise around `v`.
//! - `outgoing(v)` visits the half-edges leaving `v` in clockwise order.
//!
//! Why this design
//! - All records live in arenas (`Vec`) and refer to each other by typed
//!   indices. Surgery never frees a slot, so ids stay valid across calls and
//!   side tables indexed by `HalfEdgeId` can simply grow alongside.
//!
//! Layout
//! - `types.rs` (ids, records, compass sides), `build.rs` (construction from a
//!   rotation system, queries, validation), `surgery.rs` (subdivide, face
//!   splitting, bounding border).

mod build;
mod surgery;
mod types;

pub use build::FaceCycle;
pub use types::{
    Dcel, DcelError, Face, FaceId, HalfEdge, HalfEdgeId, Side, Vertex, VertexId, VertexKind,
};

#[cfg(test)]
mod tests;
