//! Orthogonalization: bend-minimal orthogonal shape via Tamassia's network.
//!
//! Purpose
//! - Assign each corner (half-edge at its origin, inside its face) an angle in
//!   quarter turns and each half-edge a bend count, such that angles around a
//!   vertex sum to 4 and every face closes up.
//!
//! Network
//! - Vertex nodes supply 4 units; a face of degree `d` consumes `2d − 4`
//!   (`2d + 4` for the external face).
//! - Angle arc per half-edge `h`: `Vertex(origin h) → Face(face h)`, bounds
//!   `[1, 4]`, cost 0.
//! - Bend arc per half-edge `h`: `Face(face twin h) → Face(face h)`, bounds
//!   `[0, ∞)`, cost 1. Each unit is a bend that is reflex inside `face h`.
//!
//! Strategies
//! - `MinCostFlow`: exact minimum number of bends for the embedding.
//! - `Ilp`: integer program over the same variables with an extra
//!   `corner_weight · |x − y|` term at degree-2 and degree-3 vertices, trading
//!   bend optimality for straighter paths.

use tracing::debug;

use crate::dcel::{Dcel, FaceId, HalfEdgeId, VertexId};
use crate::error::{LayoutError, Stage};
use crate::flownet::{AbsDiffPenalty, ArcId, FlowError, FlowNetwork, UNBOUNDED};
use crate::graph::NodeKey;
use crate::planar::Planarization;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrthoNode {
    Vertex(VertexId),
    Face(FaceId),
}

/// Integer-program knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IlpCfg {
    /// Weight of `|x − y|` between the first two corners of low-degree vertices.
    pub corner_weight: f64,
}
impl Default for IlpCfg {
    fn default() -> Self {
        Self { corner_weight: 1.0 }
    }
}

/// How to solve the shape network.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ShapeSolver {
    #[default]
    MinCostFlow,
    Ilp(IlpCfg),
}

/// Orthogonal representation, indexed by `HalfEdgeId`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    /// Angle at `origin(h)` inside `face(h)` between `prev(h)` and `h`, in 1..=4.
    pub angles: Vec<u8>,
    /// Bends on `h`, reflex inside `face(h)`.
    pub bends: Vec<u32>,
}

/// Tamassia network with the arc of every half-edge recorded.
#[derive(Clone, Debug)]
pub struct ShapeNetwork {
    pub net: FlowNetwork<OrthoNode, HalfEdgeId>,
    pub angle_arcs: Vec<ArcId>,
    pub bend_arcs: Vec<ArcId>,
}

/// Required inflow of face `f`.
pub fn face_demand(dcel: &Dcel, f: FaceId) -> i64 {
    let d = dcel.face_degree(f) as i64;
    if dcel.face(f).is_external {
        2 * d + 4
    } else {
        2 * d - 4
    }
}

/// Build the network for the current embedding.
pub fn shape_network(dcel: &Dcel) -> Result<ShapeNetwork, FlowError> {
    let mut net = FlowNetwork::new();
    for v in dcel.vertex_ids() {
        net.set_demand(OrthoNode::Vertex(v), -4);
    }
    for f in dcel.face_ids() {
        net.set_demand(OrthoNode::Face(f), face_demand(dcel, f));
    }
    let mut angle_arcs = Vec::with_capacity(dcel.half_edge_count());
    let mut bend_arcs = Vec::with_capacity(dcel.half_edge_count());
    for h in dcel.half_edge_ids() {
        angle_arcs.push(net.add_arc(
            OrthoNode::Vertex(dcel.origin(h)),
            OrthoNode::Face(dcel.face_of(h)),
            h,
            1,
            4,
            0,
        )?);
    }
    for h in dcel.half_edge_ids() {
        bend_arcs.push(net.add_arc(
            OrthoNode::Face(dcel.face_of(dcel.twin(h))),
            OrthoNode::Face(dcel.face_of(h)),
            h,
            0,
            UNBOUNDED,
            1,
        )?);
    }
    Ok(ShapeNetwork {
        net,
        angle_arcs,
        bend_arcs,
    })
}

/// Orthogonal shape of a planarized graph.
#[derive(Clone, Debug)]
pub struct Orthogonalization<N> {
    pub planar: Planarization<N>,
    pub shape: Shape,
    /// Total bends; the minimum for this embedding under `MinCostFlow`.
    pub cost: i64,
    /// Solver objective (bends plus any corner penalties).
    pub objective: f64,
    pub network: ShapeNetwork,
}

/// Solve the shape network for `planar`.
pub fn orthogonalize<N: NodeKey>(
    planar: Planarization<N>,
    solver: ShapeSolver,
) -> Result<Orthogonalization<N>, LayoutError> {
    let dcel = &planar.dcel;
    let network = shape_network(dcel).map_err(LayoutError::solver(Stage::Orthogonalization))?;
    let sol = match solver {
        ShapeSolver::MinCostFlow => network.net.min_cost_flow(),
        ShapeSolver::Ilp(cfg) => {
            let penalties = corner_penalties(dcel, &network, cfg.corner_weight);
            network.net.solve_ilp(&penalties)
        }
    }
    .map_err(LayoutError::solver(Stage::Orthogonalization))?;

    let mut shape = Shape {
        angles: network
            .angle_arcs
            .iter()
            .map(|&a| sol.flow(a) as u8)
            .collect(),
        bends: network
            .bend_arcs
            .iter()
            .map(|&a| sol.flow(a) as u32)
            .collect(),
    };
    if solver == ShapeSolver::MinCostFlow {
        spread_angles(dcel, &mut shape);
    }
    debug!(
        vertices = dcel.vertex_count(),
        faces = dcel.face_count(),
        bends = sol.cost,
        objective = sol.objective,
        ?solver,
        "orthogonalize"
    );
    Ok(Orthogonalization {
        cost: sol.cost,
        objective: sol.objective,
        planar,
        shape,
        network,
    })
}

/// `|x − y|` terms between the first two corners of degree-2/3 vertices.
fn corner_penalties(dcel: &Dcel, network: &ShapeNetwork, weight: f64) -> Vec<AbsDiffPenalty> {
    if weight == 0.0 {
        return Vec::new();
    }
    dcel.vertex_ids()
        .filter(|&v| matches!(dcel.degree(v), 2 | 3))
        .map(|v| {
            let mut out = dcel.outgoing(v);
            let (h1, h2) = (out.next(), out.next());
            (h1, h2)
        })
        .filter_map(|pair| match pair {
            (Some(a), Some(b)) => Some(AbsDiffPenalty {
                a: network.angle_arcs[a.0],
                b: network.angle_arcs[b.0],
                weight,
            }),
            _ => None,
        })
        .collect()
}

/// Even out the angles a vertex sends into the same face.
///
/// Such arcs share endpoints and cost, so any split of their total within
/// `[1, 4]` is equally optimal. An even split keeps paths that run through a
/// single face straight.
fn spread_angles(dcel: &Dcel, shape: &mut Shape) {
    for v in dcel.vertex_ids() {
        let out: Vec<HalfEdgeId> = dcel.outgoing(v).collect();
        let mut seen: Vec<FaceId> = Vec::new();
        for &h in &out {
            let f = dcel.face_of(h);
            if seen.contains(&f) {
                continue;
            }
            seen.push(f);
            let group: Vec<HalfEdgeId> = out.iter().copied().filter(|&g| dcel.face_of(g) == f).collect();
            if group.len() < 2 {
                continue;
            }
            let total: usize = group.iter().map(|g| shape.angles[g.0] as usize).sum();
            let (base, extra) = (total / group.len(), total % group.len());
            for (k, g) in group.iter().enumerate() {
                shape.angles[g.0] = (base + usize::from(k < extra)) as u8;
            }
        }
    }
}

impl<N: NodeKey> Orthogonalization<N> {
    pub fn dcel(&self) -> &Dcel {
        &self.planar.dcel
    }

    pub fn bend_count(&self) -> u32 {
        self.shape.bends.iter().sum()
    }

    /// Bends plus right angles at degree-2 vertices.
    pub fn corner_count(&self) -> u32 {
        let dcel = self.dcel();
        let right_angles = dcel
            .vertex_ids()
            .filter(|&v| dcel.degree(v) == 2)
            .filter(|&v| dcel.outgoing(v).any(|h| self.shape.angles[h.0] == 1))
            .count() as u32;
        self.bend_count() + right_angles
    }

    /// Sum of the angles around `v`; 4 in a valid shape.
    pub fn angle_sum(&self, v: VertexId) -> u32 {
        self.dcel()
            .outgoing(v)
            .map(|h| u32::from(self.shape.angles[h.0]))
            .sum()
    }

    /// Angles plus incoming minus outgoing bends of face `f`; equals
    /// [`face_demand`] in a valid shape.
    pub fn face_balance(&self, f: FaceId) -> i64 {
        let dcel = self.dcel();
        dcel.face_half_edges(f)
            .map(|h| {
                i64::from(self.shape.angles[h.0]) + i64::from(self.shape.bends[h.0])
                    - i64::from(self.shape.bends[dcel.twin(h).0])
            })
            .sum()
    }

    /// Check vertex and face sums.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let dcel = self.dcel();
        for v in dcel.vertex_ids() {
            let s = self.angle_sum(v);
            if s != 4 {
                return Err(LayoutError::Structure(format!("angles at {v:?} sum to {s}")));
            }
        }
        for f in dcel.face_ids() {
            let (got, want) = (self.face_balance(f), face_demand(dcel, f));
            if got != want {
                return Err(LayoutError::Structure(format!(
                    "face {f:?} balances to {got}, expected {want}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
