//! Records and identifiers of the half-edge structure.

use nalgebra::Vector2;
use thiserror::Error;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// What a vertex stands for. Only `Input` and `Bend` survive into the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexKind {
    /// Original node, by its index in the input graph.
    Input(usize),
    /// Bend point introduced when materialising the shape.
    Bend(usize),
    /// Refinement vertex splitting an edge to rectangularise a face.
    Dummy(usize),
    /// Corner of the bounding rectangle, 0..4.
    Border(u8),
}

impl VertexKind {
    /// Dummy and border vertices are scaffolding for compaction only.
    pub fn is_scaffold(self) -> bool {
        matches!(self, VertexKind::Dummy(_) | VertexKind::Border(_))
    }
}

/// Compass direction of a half-edge in the orthogonal drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Up, Side::Right, Side::Down, Side::Left];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_index(i: u8) -> Side {
        Side::ALL[(i % 4) as usize]
    }

    /// Rotate clockwise by `k` quarter turns.
    #[inline]
    pub fn rotate(self, k: u8) -> Side {
        Side::from_index(self.index() + k % 4)
    }

    #[inline]
    pub fn opposite(self) -> Side {
        self.rotate(2)
    }

    /// Clockwise quarter turns from `self` to `next`, in 0..4.
    #[inline]
    pub fn turns_to(self, next: Side) -> u8 {
        (next.index() + 4 - self.index()) % 4
    }

    /// Unit step in grid coordinates (y grows upwards).
    #[inline]
    pub fn step(self) -> (i64, i64) {
        match self {
            Side::Up => (0, 1),
            Side::Right => (1, 0),
            Side::Down => (0, -1),
            Side::Left => (-1, 0),
        }
    }

    /// Compass side closest to a direction vector; ties favour the horizontal.
    pub fn nearest(dir: Vector2<f64>) -> Side {
        if dir.x.abs() >= dir.y.abs() {
            if dir.x >= 0.0 {
                Side::Right
            } else {
                Side::Left
            }
        } else if dir.y > 0.0 {
            Side::Up
        } else {
            Side::Down
        }
    }
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub kind: VertexKind,
    /// Some outgoing half-edge.
    pub anchor: HalfEdgeId,
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub origin: VertexId,
    pub twin: HalfEdgeId,
    pub prev: HalfEdgeId,
    pub succ: HalfEdgeId,
    /// Face on the right.
    pub face: FaceId,
}

#[derive(Clone, Debug)]
pub struct Face {
    /// Some half-edge on the boundary.
    pub anchor: HalfEdgeId,
    pub is_external: bool,
}

/// Arena-backed half-edge structure. Exactly one face is external.
#[derive(Clone, Debug)]
pub struct Dcel {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) faces: Vec<Face>,
    pub(crate) ext_face: FaceId,
    pub(crate) next_dummy: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DcelError {
    #[error("rotation at vertex {from} lists {to}, but not vice versa")]
    MissingTwin { from: usize, to: usize },
    #[error("rotation at vertex {vertex} is not a permutation of its neighbours")]
    BadRotation { vertex: usize },
    #[error("vertex {vertex} has no incident edge")]
    IsolatedVertex { vertex: usize },
    #[error("half-edge {half_edge} is the successor of two half-edges")]
    InconsistentPrev { half_edge: usize },
    #[error("face cycle from half-edge {half_edge} does not close")]
    OpenCycle { half_edge: usize },
    #[error("half-edge {half_edge} already assigned to a face")]
    FaceReassigned { half_edge: usize },
    #[error("half-edge {half_edge} has no face")]
    Unassigned { half_edge: usize },
    #[error("vertex {vertex} has no corner on face {face}")]
    NotOnFace { vertex: usize, face: usize },
    #[error("cannot choose a corner of vertex {vertex} on face {face}")]
    AmbiguousCorner { vertex: usize, face: usize },
    #[error("chord {from}-{to} does not {expected} face {face}")]
    BadChord {
        from: usize,
        to: usize,
        face: usize,
        expected: &'static str,
    },
    #[error("link invariant broken at half-edge {half_edge}: {what}")]
    BrokenLink { half_edge: usize, what: &'static str },
}
