//! Bend materialisation.

use tracing::trace;

use crate::dcel::{Dcel, HalfEdgeId, VertexKind};

/// Subdivide every half-edge `h` with `bends[h] > 0` that many times.
///
/// A bend is reflex inside `face(h)` and a right angle inside `face(twin h)`;
/// `angles` grows with one entry per new half-edge. Returns the number of
/// bend vertices created.
pub(super) fn materialize(dcel: &mut Dcel, angles: &mut Vec<u8>, bends: &[u32]) -> usize {
    let mut next = 0;
    for (i, &k) in bends.iter().enumerate() {
        let mut cur = HalfEdgeId(i);
        for _ in 0..k {
            let m = dcel.subdivide(cur, VertexKind::Bend(next));
            next += 1;
            // m→v stays in face(h), m→u in face(twin h)
            let ahead = HalfEdgeId(dcel.half_edge_count() - 2);
            angles.push(3);
            angles.push(1);
            trace!(half_edge = i, ?m, "bend");
            cur = ahead;
        }
    }
    next
}
