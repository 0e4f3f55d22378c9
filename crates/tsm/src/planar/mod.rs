//! Planarization: fix a combinatorial embedding and build the DCEL.
//!
//! Purpose
//! - With positions, keep the rotation system of the given straight-line
//!   drawing and pick the external face from the geometry.
//! - Without positions, compute a planar rotation system (block decomposition
//!   plus the Demoucron–Malgrange–Pertuiset path embedding per block) and take
//!   the longest face as the external one (lowest id on ties). The choice is
//!   made on the embedding itself rather than on a straight-line drawing
//!   derived from it; every face of a planar embedding is a valid outer face.
//!
//! Both paths check Euler's formula on the result, which catches rotation
//! systems that do not describe a planar embedding.

mod embed;
mod rotation;

use std::collections::HashMap;

use tracing::debug;

use crate::dcel::{Dcel, FaceId, HalfEdgeId, Side, VertexId, VertexKind};
use crate::error::LayoutError;
use crate::graph::{Graph, NodeKey, Point};

pub use embed::{biconnected_blocks, planar_rotation};
pub use rotation::rotation_from_positions;

/// Output of the planarization stage.
#[derive(Clone, Debug)]
pub struct Planarization<N> {
    pub graph: Graph<N>,
    /// Vertex `i` is `VertexKind::Input(i)` for node `i` of `graph`.
    pub dcel: Dcel,
    /// Compass side of the external face's anchor half-edge.
    pub reference_side: Side,
}

/// Build the embedding of a connected graph with at least one edge.
pub fn planarize<N: NodeKey>(
    graph: &Graph<N>,
    pos: Option<&HashMap<N, Point>>,
) -> Result<Planarization<N>, LayoutError> {
    if graph.node_count() == 0 {
        return Err(LayoutError::EmptyGraph);
    }
    if graph.edge_count() == 0 {
        return Err(LayoutError::Structure("cannot embed a graph without edges".into()));
    }
    let rotation = match pos {
        Some(p) => rotation_from_positions(graph, p)?,
        None => planar_rotation(graph)?,
    };
    let kinds = (0..graph.node_count()).map(VertexKind::Input).collect();
    let mut dcel = Dcel::from_rotation(kinds, &rotation)?;

    let (v, e, f) = (
        dcel.vertex_count() as i64,
        (dcel.half_edge_count() / 2) as i64,
        dcel.face_count() as i64,
    );
    if v - e + f != 2 {
        let msg = format!("rotation system has V - E + F = {}", v - e + f);
        return Err(match pos {
            Some(_) => LayoutError::CrossingLayout(msg),
            None => LayoutError::Structure(msg),
        });
    }

    let reference_side = match pos {
        Some(p) => {
            let (h, side) = external_from_positions(&dcel, graph, p)?;
            let face = dcel.face_of(h);
            dcel.set_external(face);
            dcel.set_face_anchor(face, h);
            side
        }
        None => {
            dcel.set_external(longest_face(&dcel));
            Side::Up
        }
    };
    debug!(
        vertices = v,
        edges = e,
        faces = f,
        ext_degree = dcel.face_degree(dcel.ext_face()),
        "planarize"
    );
    Ok(Planarization {
        graph: graph.clone(),
        dcel,
        reference_side,
    })
}

/// Half-edge from the lowest-leftmost node to its most downward neighbour.
/// Its face is the external one; also returns its nearest compass side.
fn external_from_positions<N: NodeKey>(
    dcel: &Dcel,
    graph: &Graph<N>,
    pos: &HashMap<N, Point>,
) -> Result<(HalfEdgeId, Side), LayoutError> {
    let at = |i: usize| -> Result<Point, LayoutError> {
        pos.get(graph.node(i))
            .copied()
            .ok_or_else(|| LayoutError::MissingPosition(format!("{:?}", graph.node(i))))
    };
    let mut corner = 0;
    let mut best = at(0)?;
    for i in 1..graph.node_count() {
        let p = at(i)?;
        if (p.x, p.y) < (best.x, best.y) {
            corner = i;
            best = p;
        }
    }
    let mut other = None;
    let mut best_sine = f64::INFINITY;
    for j in graph.neighbors(corner) {
        let d = at(j)? - best;
        let sine = d.y / d.norm();
        if sine < best_sine {
            best_sine = sine;
            other = Some((j, d));
        }
    }
    let (j, d) = other.ok_or_else(|| LayoutError::Structure("corner node has no neighbour".into()))?;
    let h = dcel
        .half_edge_between(VertexId(corner), VertexId(j))
        .ok_or_else(|| LayoutError::Structure("corner edge missing from embedding".into()))?;
    Ok((h, Side::nearest(d)))
}

fn longest_face(dcel: &Dcel) -> FaceId {
    let mut best = FaceId(0);
    let mut best_len = 0;
    for f in dcel.face_ids() {
        let len = dcel.face_degree(f);
        if len > best_len {
            best = f;
            best_len = len;
        }
    }
    best
}

#[cfg(test)]
mod tests;
