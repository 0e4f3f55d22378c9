//! Rotation system of a straight-line drawing.

use std::collections::HashMap;

use crate::error::LayoutError;
use crate::graph::{Graph, NodeKey, Point};

/// Neighbours of every node sorted counter-clockwise by polar angle.
///
/// Coincident endpoints or two edges leaving a node in the same direction
/// cannot come from a crossing-free drawing and are rejected.
pub fn rotation_from_positions<N: NodeKey>(
    graph: &Graph<N>,
    pos: &HashMap<N, Point>,
) -> Result<Vec<Vec<usize>>, LayoutError> {
    let at = |i: usize| -> Result<Point, LayoutError> {
        pos.get(graph.node(i))
            .copied()
            .ok_or_else(|| LayoutError::MissingPosition(format!("{:?}", graph.node(i))))
    };
    let mut rotation = Vec::with_capacity(graph.node_count());
    for i in 0..graph.node_count() {
        let p = at(i)?;
        let neighbors = graph.neighbors(i);
        let mut around: Vec<(f64, usize)> = Vec::with_capacity(neighbors.len());
        for j in neighbors {
            let d = at(j)? - p;
            if d.x == 0.0 && d.y == 0.0 {
                return Err(LayoutError::CrossingLayout(format!(
                    "{:?} and {:?} share a position",
                    graph.node(i),
                    graph.node(j)
                )));
            }
            around.push((d.y.atan2(d.x), j));
        }
        around.sort_by(|a, b| a.0.total_cmp(&b.0));
        for w in around.windows(2) {
            if w[0].0 == w[1].0 {
                return Err(LayoutError::CrossingLayout(format!(
                    "edges {:?}-{:?} and {:?}-{:?} overlap",
                    graph.node(i),
                    graph.node(w[0].1),
                    graph.node(i),
                    graph.node(w[1].1)
                )));
            }
        }
        rotation.push(around.into_iter().map(|(_, j)| j).collect());
    }
    Ok(rotation)
}
