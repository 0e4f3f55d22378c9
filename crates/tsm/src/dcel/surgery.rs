//! In-place surgery: subdivision, chords through a face, bounding border.
//!
//! Every operation keeps twin/prev/succ/face links and all anchors valid on
//! return; no half-edge or face id is ever invalidated.

use tracing::trace;

use super::types::{
    Dcel, DcelError, Face, FaceId, HalfEdge, HalfEdgeId, Side, Vertex, VertexId, VertexKind,
};

impl Dcel {
    /// Allocate a fresh id for a refinement dummy.
    pub fn next_dummy_kind(&mut self) -> VertexKind {
        let k = VertexKind::Dummy(self.next_dummy);
        self.next_dummy += 1;
        k
    }

    fn push_half_edge(&mut self, e: HalfEdge) -> HalfEdgeId {
        self.half_edges.push(e);
        HalfEdgeId(self.half_edges.len() - 1)
    }

    /// Split the edge of `h = u→v` into `u→m→v` with a new vertex `m`.
    ///
    /// `h` becomes `u→m` and its old twin becomes `v→m`; the two new
    /// half-edges `m→v` (same face as `h`) and `m→u` (same face as the old
    /// twin) are appended in that order. Returns `m`.
    pub fn subdivide(&mut self, h: HalfEdgeId, kind: VertexKind) -> VertexId {
        let t = self.twin(h);
        let u = self.origin(h);
        let v = self.origin(t);
        let (sh, st) = (self.succ(h), self.succ(t));
        let (fh, ft) = (self.face_of(h), self.face_of(t));

        let m = VertexId(self.vertices.len());
        let a = HalfEdgeId(self.half_edges.len());
        let b = HalfEdgeId(a.0 + 1);
        self.vertices.push(Vertex { kind, anchor: a });
        self.push_half_edge(HalfEdge {
            origin: m,
            twin: t,
            prev: h,
            succ: sh,
            face: fh,
        });
        self.push_half_edge(HalfEdge {
            origin: m,
            twin: h,
            prev: t,
            succ: st,
            face: ft,
        });
        // sh == t when v is a leaf; the writes below are ordered so that case
        // ends up as u→m→v→m→u.
        self.half_edges[sh.0].prev = a;
        self.half_edges[st.0].prev = b;
        self.half_edges[h.0].succ = a;
        self.half_edges[h.0].twin = b;
        self.half_edges[t.0].succ = b;
        self.half_edges[t.0].twin = a;
        trace!(?u, ?v, ?m, ?kind, "subdivide");
        m
    }

    /// Insert the twin pair `u→v`, `v→u` where `u`, `v` are the origins of the
    /// corners `cu`, `cv`: `u→v` runs into `cv` and `v→u` into `cu`.
    /// Faces of the new half-edges are left to the caller.
    fn insert_chord(&mut self, cu: HalfEdgeId, cv: HalfEdgeId, face: FaceId) -> (HalfEdgeId, HalfEdgeId) {
        let (u, v) = (self.origin(cu), self.origin(cv));
        let (pu, pv) = (self.prev(cu), self.prev(cv));
        let uv = HalfEdgeId(self.half_edges.len());
        let vu = HalfEdgeId(uv.0 + 1);
        self.push_half_edge(HalfEdge {
            origin: u,
            twin: vu,
            prev: pu,
            succ: cv,
            face,
        });
        self.push_half_edge(HalfEdge {
            origin: v,
            twin: uv,
            prev: pv,
            succ: cu,
            face,
        });
        self.half_edges[pu.0].succ = uv;
        self.half_edges[cv.0].prev = uv;
        self.half_edges[pv.0].succ = vu;
        self.half_edges[cu.0].prev = vu;
        (uv, vu)
    }

    /// Outgoing half-edges of `v` whose face is `f`, i.e. the corners of `v` on `f`.
    pub fn corners_on(&self, v: VertexId, f: FaceId) -> Vec<HalfEdgeId> {
        self.outgoing(v).filter(|&h| self.face_of(h) == f).collect()
    }

    /// Pick the corner of `v` on `f` for a chord leaving `v` towards `side`.
    ///
    /// With several corners on the face, the one whose outgoing half-edge
    /// points to `side` turned by three, two, then one quarter turns wins.
    fn select_corner(
        &self,
        v: VertexId,
        f: FaceId,
        side: Side,
        sides: &[Side],
    ) -> Result<HalfEdgeId, DcelError> {
        let corners = self.corners_on(v, f);
        match corners.as_slice() {
            [] => Err(DcelError::NotOnFace { vertex: v.0, face: f.0 }),
            [only] => Ok(*only),
            _ => [3u8, 2, 1]
                .iter()
                .find_map(|&k| {
                    let want = side.rotate(k);
                    corners
                        .iter()
                        .copied()
                        .find(|h| sides.get(h.0) == Some(&want))
                })
                .ok_or(DcelError::AmbiguousCorner { vertex: v.0, face: f.0 }),
        }
    }

    /// Split `face` by a new edge `u→v` running towards `side`.
    ///
    /// `sides` holds the compass side of every existing half-edge and is only
    /// consulted when `u` or `v` has several corners on the face. The cycle
    /// through `u→v` keeps `face` (and its external flag); the cycle through
    /// `v→u` becomes a new face. Returns `(u→v, new face)`.
    pub fn split_face(
        &mut self,
        face: FaceId,
        u: VertexId,
        v: VertexId,
        side: Side,
        sides: &[Side],
    ) -> Result<(HalfEdgeId, FaceId), DcelError> {
        let cu = self.select_corner(u, face, side, sides)?;
        let cv = self.select_corner(v, face, side.opposite(), sides)?;
        self.split_at_corners(face, cu, cv)
    }

    /// Split `face` by a chord between the origins of corners `cu` and `cv`.
    pub fn split_at_corners(
        &mut self,
        face: FaceId,
        cu: HalfEdgeId,
        cv: HalfEdgeId,
    ) -> Result<(HalfEdgeId, FaceId), DcelError> {
        let (uv, vu) = self.insert_chord(cu, cv, face);
        if self.face_cycle(uv).any(|h| h == vu) {
            return Err(DcelError::BadChord {
                from: self.origin(uv).0,
                to: self.origin(vu).0,
                face: face.0,
                expected: "split",
            });
        }
        let nf = FaceId(self.faces.len());
        self.faces.push(Face {
            anchor: vu,
            is_external: false,
        });
        let cycle: Vec<HalfEdgeId> = self.face_cycle(vu).collect();
        for h in cycle {
            self.half_edges[h.0].face = nf;
        }
        self.faces[face.0].anchor = uv;
        trace!(?face, ?nf, u = ?self.origin(uv), v = ?self.origin(vu), "split_face");
        Ok((uv, nf))
    }

    /// Join two boundary components of the same face by a chord between the
    /// origins of corners `cu` and `cv`. No face is created. Returns `u→v`.
    pub fn connect_across(
        &mut self,
        face: FaceId,
        cu: HalfEdgeId,
        cv: HalfEdgeId,
    ) -> Result<HalfEdgeId, DcelError> {
        if self.face_of(cu) != face || self.face_of(cv) != face {
            return Err(DcelError::NotOnFace {
                vertex: self.origin(if self.face_of(cu) != face { cu } else { cv }).0,
                face: face.0,
            });
        }
        let (uv, vu) = self.insert_chord(cu, cv, face);
        if !self.face_cycle(uv).any(|h| h == vu) {
            return Err(DcelError::BadChord {
                from: self.origin(uv).0,
                to: self.origin(vu).0,
                face: face.0,
                expected: "join the boundary components of",
            });
        }
        trace!(?face, u = ?self.origin(uv), v = ?self.origin(vu), "connect_across");
        Ok(uv)
    }

    /// Surround the drawing by a rectangle of four `Border` vertices.
    ///
    /// The inner half-edges `B0→B1→B2→B3→B0` (sides Up, Right, Down, Left)
    /// join the current external face, which becomes internal and keeps its
    /// anchor on the drawing. The outer cycle is the new external face.
    /// Until a chord ties the two together, the old face has two boundary
    /// components. Returns the inner half-edges in side order.
    pub fn wrap_in_border(&mut self) -> [HalfEdgeId; 4] {
        let old = self.ext_face;
        let nf = FaceId(self.faces.len());
        let v0 = self.vertices.len();
        let h0 = self.half_edges.len();
        // inner i = h0 + 2i : B_i → B_{i+1}; outer i = h0 + 2i + 1 : B_{i+1} → B_i
        let inner = |i: usize| HalfEdgeId(h0 + 2 * (i % 4));
        let outer = |i: usize| HalfEdgeId(h0 + 2 * (i % 4) + 1);
        for i in 0..4 {
            self.vertices.push(Vertex {
                kind: VertexKind::Border(i as u8),
                anchor: inner(i),
            });
        }
        for i in 0..4 {
            self.push_half_edge(HalfEdge {
                origin: VertexId(v0 + i),
                twin: outer(i),
                prev: inner(i + 3),
                succ: inner(i + 1),
                face: old,
            });
            self.push_half_edge(HalfEdge {
                origin: VertexId(v0 + (i + 1) % 4),
                twin: inner(i),
                prev: outer(i + 1),
                succ: outer(i + 3),
                face: nf,
            });
        }
        self.faces.push(Face {
            anchor: outer(0),
            is_external: true,
        });
        self.faces[old.0].is_external = false;
        self.ext_face = nf;
        trace!(?old, ?nf, "wrap_in_border");
        [inner(0), inner(1), inner(2), inner(3)]
    }
}
