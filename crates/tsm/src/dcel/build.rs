//! Construction from a rotation system, queries, and invariant validation.

use std::collections::HashMap;

use super::types::{
    Dcel, DcelError, Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId, VertexKind,
};

impl Dcel {
    /// Build from a rotation system.
    ///
    /// `rotation[v]` lists the neighbours of vertex `v` in counter-clockwise
    /// order. Faces are discovered by tracing unassigned half-edges; face 0 is
    /// marked external until [`Dcel::set_external`] says otherwise.
    pub fn from_rotation(kinds: Vec<VertexKind>, rotation: &[Vec<usize>]) -> Result<Self, DcelError> {
        let n = kinds.len();
        if rotation.len() != n {
            return Err(DcelError::BadRotation { vertex: rotation.len().min(n) });
        }
        let mut ids: HashMap<(usize, usize), usize> = HashMap::new();
        let mut ends: Vec<(usize, usize)> = Vec::new();
        for (u, rot) in rotation.iter().enumerate() {
            if rot.is_empty() {
                return Err(DcelError::IsolatedVertex { vertex: u });
            }
            for (k, &v) in rot.iter().enumerate() {
                if v == u || v >= n || rot[..k].contains(&v) {
                    return Err(DcelError::BadRotation { vertex: u });
                }
                if ids.contains_key(&(u, v)) {
                    continue;
                }
                if !rotation[v].contains(&u) {
                    return Err(DcelError::MissingTwin { from: u, to: v });
                }
                ids.insert((u, v), ends.len());
                ends.push((u, v));
                ids.insert((v, u), ends.len());
                ends.push((v, u));
            }
        }

        let m = ends.len();
        let mut succ = vec![usize::MAX; m];
        let mut prev = vec![usize::MAX; m];
        for (h, &(u, v)) in ends.iter().enumerate() {
            let rot_v = &rotation[v];
            let pos = rot_v
                .iter()
                .position(|&x| x == u)
                .ok_or(DcelError::MissingTwin { from: v, to: u })?;
            let w = rot_v[(pos + 1) % rot_v.len()];
            let s = ids[&(v, w)];
            if prev[s] != usize::MAX {
                return Err(DcelError::InconsistentPrev { half_edge: s });
            }
            succ[h] = s;
            prev[s] = h;
        }

        let vertices = kinds
            .into_iter()
            .enumerate()
            .map(|(u, kind)| Vertex {
                kind,
                anchor: HalfEdgeId(ids[&(u, rotation[u][0])]),
            })
            .collect();

        let mut face_of = vec![usize::MAX; m];
        let mut faces = Vec::new();
        for start in 0..m {
            if face_of[start] != usize::MAX {
                continue;
            }
            let f = faces.len();
            faces.push(Face {
                anchor: HalfEdgeId(start),
                is_external: f == 0,
            });
            let mut h = start;
            let mut steps = 0;
            loop {
                if face_of[h] != usize::MAX {
                    return Err(DcelError::FaceReassigned { half_edge: h });
                }
                face_of[h] = f;
                h = succ[h];
                steps += 1;
                if h == start {
                    break;
                }
                if steps > m {
                    return Err(DcelError::OpenCycle { half_edge: start });
                }
            }
        }

        let half_edges = (0..m)
            .map(|h| HalfEdge {
                origin: VertexId(ends[h].0),
                twin: HalfEdgeId(h ^ 1),
                prev: HalfEdgeId(prev[h]),
                succ: HalfEdgeId(succ[h]),
                face: FaceId(face_of[h]),
            })
            .collect();

        let dcel = Dcel {
            vertices,
            half_edges,
            faces,
            ext_face: FaceId(0),
            next_dummy: 0,
        };
        dcel.validate()?;
        Ok(dcel)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }

    pub fn half_edge(&self, h: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[h.0]
    }

    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.0]
    }

    pub fn kind(&self, v: VertexId) -> VertexKind {
        self.vertices[v.0].kind
    }

    #[inline]
    pub fn origin(&self, h: HalfEdgeId) -> VertexId {
        self.half_edges[h.0].origin
    }

    #[inline]
    pub fn dest(&self, h: HalfEdgeId) -> VertexId {
        self.origin(self.twin(h))
    }

    #[inline]
    pub fn twin(&self, h: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[h.0].twin
    }

    #[inline]
    pub fn succ(&self, h: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[h.0].succ
    }

    #[inline]
    pub fn prev(&self, h: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[h.0].prev
    }

    #[inline]
    pub fn face_of(&self, h: HalfEdgeId) -> FaceId {
        self.half_edges[h.0].face
    }

    pub fn ext_face(&self) -> FaceId {
        self.ext_face
    }

    /// Make `f` the only external face.
    pub fn set_external(&mut self, f: FaceId) {
        for face in &mut self.faces {
            face.is_external = false;
        }
        self.faces[f.0].is_external = true;
        self.ext_face = f;
    }

    /// Re-anchor face `f` at `h`, which must lie on its boundary.
    pub(crate) fn set_face_anchor(&mut self, f: FaceId, h: HalfEdgeId) {
        debug_assert_eq!(self.face_of(h), f);
        self.faces[f.0].anchor = h;
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> {
        (0..self.half_edges.len()).map(HalfEdgeId)
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.faces.len()).map(FaceId)
    }

    /// Walk the boundary containing `h`, starting at `h`.
    pub fn face_cycle(&self, h: HalfEdgeId) -> FaceCycle<'_> {
        FaceCycle {
            dcel: self,
            start: h,
            next: Some(h),
        }
    }

    /// Boundary of `f` starting at its anchor.
    pub fn face_half_edges(&self, f: FaceId) -> FaceCycle<'_> {
        self.face_cycle(self.faces[f.0].anchor)
    }

    /// Number of half-edges on the boundary of `f`.
    pub fn face_degree(&self, f: FaceId) -> usize {
        self.face_half_edges(f).count()
    }

    /// Outgoing half-edges of `v`, clockwise from its anchor.
    pub fn outgoing(&self, v: VertexId) -> impl Iterator<Item = HalfEdgeId> + '_ {
        let start = self.vertices[v.0].anchor;
        let mut next = Some(start);
        std::iter::from_fn(move || {
            let h = next?;
            let n = self.twin(self.prev(h));
            next = if n == start { None } else { Some(n) };
            Some(h)
        })
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.outgoing(v).count()
    }

    pub fn half_edge_between(&self, u: VertexId, v: VertexId) -> Option<HalfEdgeId> {
        self.outgoing(u).find(|&h| self.dest(h) == v)
    }

    /// One `(origin, dest)` pair per undirected edge.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.half_edge_ids()
            .filter(|&h| h.0 < self.twin(h).0)
            .map(|h| (self.origin(h), self.dest(h)))
    }

    /// Check twin, prev/succ, face and anchor invariants.
    pub fn validate(&self) -> Result<(), DcelError> {
        for h in self.half_edge_ids() {
            let e = &self.half_edges[h.0];
            let broken = |what| DcelError::BrokenLink { half_edge: h.0, what };
            if e.twin == h || self.twin(e.twin) != h {
                return Err(broken("twin"));
            }
            if self.prev(e.succ) != h {
                return Err(broken("succ/prev"));
            }
            if self.origin(e.succ) != self.dest(h) {
                return Err(broken("succ origin"));
            }
            if e.face.0 >= self.faces.len() {
                return Err(DcelError::Unassigned { half_edge: h.0 });
            }
            if self.face_of(e.succ) != e.face {
                return Err(DcelError::FaceReassigned { half_edge: e.succ.0 });
            }
        }
        for (v, vert) in self.vertices.iter().enumerate() {
            if self.origin(vert.anchor) != VertexId(v) {
                return Err(DcelError::BrokenLink {
                    half_edge: vert.anchor.0,
                    what: "vertex anchor",
                });
            }
        }
        for (f, face) in self.faces.iter().enumerate() {
            if self.face_of(face.anchor) != FaceId(f) {
                return Err(DcelError::BrokenLink {
                    half_edge: face.anchor.0,
                    what: "face anchor",
                });
            }
        }
        let external = self.faces.iter().filter(|f| f.is_external).count();
        if external != 1 || !self.faces[self.ext_face.0].is_external {
            return Err(DcelError::BrokenLink {
                half_edge: self.faces[self.ext_face.0].anchor.0,
                what: "external face",
            });
        }
        Ok(())
    }
}

/// Iterator over one face boundary.
pub struct FaceCycle<'a> {
    dcel: &'a Dcel,
    start: HalfEdgeId,
    next: Option<HalfEdgeId>,
}

impl Iterator for FaceCycle<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let h = self.next?;
        let s = self.dcel.succ(h);
        self.next = if s == self.start { None } else { Some(s) };
        Some(h)
    }
}
