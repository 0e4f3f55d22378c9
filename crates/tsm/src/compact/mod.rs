//! Compaction: integer coordinates for an orthogonal shape.
//!
//! Purpose
//! - Turn the angles and bend counts of an [`Orthogonalization`] into grid
//!   coordinates with every edge drawn as axis-parallel segments.
//!
//! Steps
//! 1. `bends`: subdivide every bent half-edge, one `Bend` vertex per bend.
//! 2. `sides`: give each half-edge a compass side, starting from the external
//!    anchor with the planarizer's reference side.
//! 3. `refine`: wrap the drawing in a border rectangle and split every face
//!    by `Dummy` vertices until all faces are rectangles.
//! 4. `lengths`: one min-cost circulation per axis over the rectangular faces
//!    gives every segment its length.
//! 5. `coords`: walk faces from the external anchor at `(0, 0)`.
//!
//! Why this design
//! - All surgery runs on a private clone of the DCEL, so the same
//!   orthogonalization can be compacted again with identical results.
//! - Side and length tables are plain `Vec`s indexed by `HalfEdgeId` that grow
//!   with every `subdivide`/chord, matching the arena ids.
//!
//! References
//! - R. Tamassia, "On embedding a graph in the grid with the minimum number of
//!   bends", SIAM J. Comput. 16 (1987), section on rectangular refinement.

mod bends;
mod coords;
mod lengths;
mod refine;
mod sides;

use tracing::debug;

use crate::dcel::{Dcel, FaceId, HalfEdgeId, Side, VertexId};
use crate::error::LayoutError;
use crate::graph::{GridPos, NodeKey};
use crate::ortho::Orthogonalization;

pub use lengths::{length_network, CompactNode, LengthNetwork};

/// Refined drawing with sides, lengths and coordinates of every element.
#[derive(Clone, Debug)]
pub struct Compaction {
    /// Refined structure including bend, dummy and border vertices.
    pub dcel: Dcel,
    pub sides: Vec<Side>,
    pub lengths: Vec<i64>,
    pub coords: Vec<GridPos>,
    /// Edges right after bend materialisation, before any refinement.
    pub edges: Vec<(VertexId, VertexId)>,
    /// Number of bend vertices created.
    pub bends: usize,
}

/// Compute coordinates for `ortho`. The orthogonalization is left untouched.
pub fn compact<N: NodeKey>(ortho: &Orthogonalization<N>) -> Result<Compaction, LayoutError> {
    let mut dcel = ortho.dcel().clone();
    let mut angles = ortho.shape.angles.clone();
    let bends = bends::materialize(&mut dcel, &mut angles, &ortho.shape.bends);
    let edges: Vec<(VertexId, VertexId)> = dcel.edges().collect();

    let mut sides = sides::assign(&dcel, &angles, ortho.planar.reference_side)?;
    refine::attach_border(&mut dcel, &mut sides)?;
    let splits = refine::rectangulate(&mut dcel, &mut sides)?;

    let lengths = lengths::segment_lengths(&dcel, &sides)?;
    let coords = coords::place(&dcel, &sides, &lengths)?;
    debug!(
        bends,
        splits,
        vertices = dcel.vertex_count(),
        faces = dcel.face_count(),
        "compact"
    );
    Ok(Compaction {
        dcel,
        sides,
        lengths,
        coords,
        edges,
        bends,
    })
}

impl Compaction {
    pub fn pos(&self, v: VertexId) -> GridPos {
        self.coords[v.0]
    }

    /// Vertices that belong in the output: inputs and bends.
    pub fn output_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.dcel
            .vertex_ids()
            .filter(|&v| !self.dcel.kind(v).is_scaffold())
    }

    /// Quarter turns (clockwise) from `h` to its successor.
    pub fn turn_after(&self, h: HalfEdgeId) -> u8 {
        self.sides[h.0].turns_to(self.sides[self.dcel.succ(h).0])
    }

    /// True when the walk around `f` only turns one way: right for internal
    /// faces, left for the external one.
    pub fn is_rectangular(&self, f: FaceId) -> bool {
        let allowed = if self.dcel.face(f).is_external { 3 } else { 1 };
        self.dcel
            .face_half_edges(f)
            .all(|h| {
                let t = self.turn_after(h);
                t == 0 || t == allowed
            })
    }
}
