//! Compass sides from angles.

use crate::dcel::{Dcel, HalfEdgeId, Side};
use crate::error::LayoutError;

/// Clockwise quarter turns taken when entering a corner of the given angle.
fn turn(angle: u8) -> u8 {
    match angle {
        1 => 1,
        2 => 0,
        3 => 3,
        _ => 2,
    }
}

/// Label every half-edge with its side.
///
/// Faces are walked whole; each twin of a labelled half-edge seeds the walk of
/// its own face with the opposite side. Conflicting labels mean the angles
/// do not describe an orthogonal shape.
pub(super) fn assign(dcel: &Dcel, angles: &[u8], reference: Side) -> Result<Vec<Side>, LayoutError> {
    let mut sides: Vec<Option<Side>> = vec![None; dcel.half_edge_count()];
    let start = dcel.face(dcel.ext_face()).anchor;
    let mut work: Vec<(HalfEdgeId, Side)> = vec![(start, reference)];
    while let Some((h, side)) = work.pop() {
        if let Some(have) = sides[h.0] {
            if have != side {
                return Err(LayoutError::Structure(format!(
                    "half-edge {h:?} is both {have:?} and {side:?}"
                )));
            }
            continue;
        }
        let mut s = side;
        let mut walked = Vec::new();
        for g in dcel.face_cycle(h) {
            sides[g.0] = Some(s);
            walked.push((g, s));
            s = s.rotate(turn(angles[dcel.succ(g).0]));
        }
        if s != side {
            return Err(LayoutError::Structure(format!(
                "angles around the face of {h:?} do not close"
            )));
        }
        // labelled twins are pushed too so that the pop above checks them
        work.extend(walked.into_iter().map(|(g, s)| (dcel.twin(g), s.opposite())));
    }
    sides
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            s.ok_or_else(|| LayoutError::Structure(format!("half-edge {i} has no side")))
        })
        .collect()
}
