//! Segment lengths from two min-cost circulations.
//!
//! With every face a rectangle, the horizontal segments (side `Right`) of a
//! face's top and bottom must add up to the same width. Routing one unit of
//! flow per unit of length from the face above a segment to the face below it
//! expresses exactly that; vertical segments (side `Up`) work the same way
//! from left to right. Each segment is at least 1 long and each unit costs 1.

use tracing::debug;

use crate::dcel::{Dcel, FaceId, HalfEdgeId, Side};
use crate::error::{LayoutError, Stage};
use crate::flownet::{ArcId, FlowError, FlowNetwork, UNBOUNDED};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompactNode {
    Face(FaceId),
    /// Stands for the external face on the far side of the drawing.
    Sink,
}

/// Circulation for one axis. Arc keys are the half-edges they measure; the
/// return arc has key `None`.
#[derive(Clone, Debug)]
pub struct LengthNetwork {
    pub net: FlowNetwork<CompactNode, Option<HalfEdgeId>>,
    pub arcs: Vec<(HalfEdgeId, ArcId)>,
}

/// Build the network over the half-edges pointing `along`.
pub fn length_network(dcel: &Dcel, sides: &[Side], along: Side) -> Result<LengthNetwork, FlowError> {
    let ext = dcel.ext_face();
    let mut net = FlowNetwork::new();
    let mut arcs = Vec::new();
    for h in dcel.half_edge_ids().filter(|h| sides[h.0] == along) {
        let f = dcel.face_of(h);
        let to = if f == ext { CompactNode::Sink } else { CompactNode::Face(f) };
        let from = CompactNode::Face(dcel.face_of(dcel.twin(h)));
        arcs.push((h, net.add_arc(from, to, Some(h), 1, UNBOUNDED, 1)?));
    }
    net.add_arc(CompactNode::Sink, CompactNode::Face(ext), None, 0, UNBOUNDED, 0)?;
    Ok(LengthNetwork { net, arcs })
}

/// Length of every half-edge (equal for twins).
pub(super) fn segment_lengths(dcel: &Dcel, sides: &[Side]) -> Result<Vec<i64>, LayoutError> {
    let mut lengths = vec![0i64; dcel.half_edge_count()];
    for (along, stage) in [
        (Side::Right, Stage::HorizontalLengths),
        (Side::Up, Stage::VerticalLengths),
    ] {
        let ln = length_network(dcel, sides, along).map_err(LayoutError::solver(stage))?;
        let sol = ln.net.min_cost_flow().map_err(LayoutError::solver(stage))?;
        for &(h, arc) in &ln.arcs {
            let l = sol.flow(arc);
            lengths[h.0] = l;
            lengths[dcel.twin(h).0] = l;
        }
        debug!(%stage, segments = ln.arcs.len(), total = sol.cost, "segment lengths");
    }
    if let Some(i) = lengths.iter().position(|&l| l < 1) {
        return Err(LayoutError::Structure(format!(
            "half-edge {i} received length {}",
            lengths[i]
        )));
    }
    Ok(lengths)
}
