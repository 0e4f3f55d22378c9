//! Coordinates by walking faces.

use crate::dcel::{Dcel, HalfEdgeId, Side};
use crate::error::LayoutError;
use crate::graph::GridPos;

/// Place the origin of the external anchor at `(0, 0)` and walk face by face,
/// stepping each half-edge's length towards its side.
pub(super) fn place(dcel: &Dcel, sides: &[Side], lengths: &[i64]) -> Result<Vec<GridPos>, LayoutError> {
    let mut pos: Vec<Option<GridPos>> = vec![None; dcel.vertex_count()];
    let mut walked = vec![false; dcel.face_count()];
    let start = dcel.face(dcel.ext_face()).anchor;
    pos[dcel.origin(start).0] = Some(GridPos::zeros());
    let mut work: Vec<HalfEdgeId> = vec![start];
    while let Some(h) = work.pop() {
        let f = dcel.face_of(h);
        if walked[f.0] {
            continue;
        }
        walked[f.0] = true;
        let mut p = pos[dcel.origin(h).0]
            .ok_or_else(|| LayoutError::Structure(format!("walk of {f:?} starts unplaced")))?;
        for g in dcel.face_cycle(h) {
            let v = dcel.origin(g);
            match pos[v.0] {
                Some(q) if q != p => {
                    return Err(LayoutError::Structure(format!(
                        "{v:?} placed at ({}, {}) and ({}, {})",
                        q.x, q.y, p.x, p.y
                    )));
                }
                _ => pos[v.0] = Some(p),
            }
            let (dx, dy) = sides[g.0].step();
            p += GridPos::new(dx, dy) * lengths[g.0];
            work.extend(dcel.outgoing(v).filter(|&e| !walked[dcel.face_of(e).0]));
        }
        if pos[dcel.origin(h).0] != Some(p) {
            return Err(LayoutError::Structure(format!("{f:?} does not close")));
        }
    }
    pos.into_iter()
        .enumerate()
        .map(|(i, p)| p.ok_or_else(|| LayoutError::Structure(format!("vertex {i} was not reached"))))
        .collect()
}
