//! Rectangular refinement.
//!
//! A corner where the walk around a face turns left (or reverses at a leaf)
//! is extended straight ahead until it meets the boundary again; the hit edge
//! is split by a dummy vertex and a chord closes off a smaller face. The outer
//! boundary of the drawing is first tied to a surrounding border rectangle so
//! that every face, including the old external one, is refined the same way.

use tracing::trace;

use crate::dcel::{Dcel, FaceId, HalfEdgeId, Side};
use crate::error::LayoutError;

/// True when the walk turns left or reverses right after `h`.
fn turns_back(dcel: &Dcel, sides: &[Side], h: HalfEdgeId) -> bool {
    matches!(sides[h.0].turns_to(sides[dcel.succ(h).0]), 2 | 3)
}

/// Subdivide `h` with a dummy; returns the new half-edge `m→dest(h)`, i.e. the
/// corner at the dummy inside `face(h)`.
fn split_wall(dcel: &mut Dcel, sides: &mut Vec<Side>, h: HalfEdgeId) -> HalfEdgeId {
    let kind = dcel.next_dummy_kind();
    dcel.subdivide(h, kind);
    let s = sides[h.0];
    sides.push(s);
    sides.push(s.opposite());
    HalfEdgeId(dcel.half_edge_count() - 2)
}

/// First half-edge where the turn count from `h` reaches one net right turn.
fn find_front(dcel: &Dcel, sides: &[Side], h: HalfEdgeId) -> Option<HalfEdgeId> {
    let mut count = 0i32;
    for g in dcel.face_cycle(h) {
        count += match sides[g.0].turns_to(sides[dcel.succ(g).0]) {
            0 => 0,
            1 => 1,
            2 => -2,
            _ => -1,
        };
        if count == 1 {
            return Some(dcel.succ(g));
        }
    }
    None
}

/// Surround the drawing by a border and connect the first convex corner of
/// the outer boundary to it. Returns the connecting half-edge.
pub(super) fn attach_border(dcel: &mut Dcel, sides: &mut Vec<Side>) -> Result<HalfEdgeId, LayoutError> {
    let old = dcel.ext_face();
    let boundary: Vec<HalfEdgeId> = dcel.face_half_edges(old).collect();
    let walls = dcel.wrap_in_border();
    for s in Side::ALL {
        sides.push(s);
        sides.push(s.opposite());
    }
    let he = boundary
        .into_iter()
        .find(|&h| turns_back(dcel, sides, h) && dcel.degree(dcel.dest(h)) <= 2)
        .ok_or_else(|| LayoutError::Structure("outer boundary has no convex corner".into()))?;
    let side = sides[he.0];
    // extending `side` from the corner hits the wall running one turn clockwise
    let wall = walls[side.rotate(1).index() as usize];
    let cv = split_wall(dcel, sides, wall);
    let cu = dcel.succ(he);
    let e = dcel.connect_across(old, cu, cv)?;
    sides.push(side);
    sides.push(side.opposite());
    trace!(corner = ?dcel.origin(e), ?side, "attach border");
    Ok(e)
}

/// Split every face except the external one into rectangles. Returns the
/// number of chords added.
pub(super) fn rectangulate(dcel: &mut Dcel, sides: &mut Vec<Side>) -> Result<usize, LayoutError> {
    let ext = dcel.ext_face();
    let mut work: Vec<FaceId> = dcel.face_ids().filter(|&f| f != ext).collect();
    // every chord removes one left turn and adds none
    let budget = dcel.half_edge_count();
    let mut splits = 0;
    while let Some(f) = work.pop() {
        let Some(h) = dcel.face_half_edges(f).find(|&h| turns_back(dcel, sides, h)) else {
            continue;
        };
        if splits > budget {
            return Err(LayoutError::Structure(format!(
                "refinement of face {f:?} does not terminate"
            )));
        }
        let front = find_front(dcel, sides, h).ok_or(LayoutError::FrontNotFound { face: f.0 })?;
        let side = sides[h.0];
        let cv = split_wall(dcel, sides, front);
        let cu = dcel.succ(h);
        let (_, nf) = dcel.split_at_corners(f, cu, cv)?;
        sides.push(side);
        sides.push(side.opposite());
        trace!(?f, ?nf, ?side, "refine");
        work.push(f);
        work.push(nf);
        splits += 1;
    }
    Ok(splits)
}
