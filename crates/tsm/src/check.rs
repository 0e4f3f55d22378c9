//! Input validation and drawing quality checks.
//!
//! Purpose
//! - `precheck` rejects inputs the pipeline cannot lay out, with the cheapest
//!   tests first.
//! - `number_of_cross`, `overlap_nodes` and `overlay_edges` inspect a
//!   straight-line drawing; `postcheck` combines them for pipeline output.
//!
//! Segment tests use the standard orientation predicate and count collinear
//! overlaps as crossings. Pairs of edges sharing an endpoint are never counted.

use std::collections::HashMap;

use crate::error::LayoutError;
use crate::graph::{Graph, NodeKey, Point};
use crate::planar::planar_rotation;

/// Reject graphs (and layouts) that cannot be drawn orthogonally.
///
/// Order: empty graph, degree above four, self-loops, disconnected graph, then
/// planarity (without positions) or missing positions and crossings (with).
pub fn precheck<N: NodeKey>(graph: &Graph<N>, pos: Option<&HashMap<N, Point>>) -> Result<(), LayoutError> {
    if graph.node_count() == 0 {
        return Err(LayoutError::EmptyGraph);
    }
    if let Some(i) = (0..graph.node_count()).find(|&i| graph.degree(i) > 4) {
        return Err(LayoutError::DegreeTooHigh {
            node: format!("{:?}", graph.node(i)),
            degree: graph.degree(i),
        });
    }
    if let Some(&(a, _)) = graph.edge_indices().iter().find(|(a, b)| a == b) {
        return Err(LayoutError::SelfLoop {
            node: format!("{:?}", graph.node(a)),
        });
    }
    if !graph.is_connected() {
        return Err(LayoutError::Disconnected);
    }
    match pos {
        None => {
            planar_rotation(graph)?;
        }
        Some(p) => {
            if let Some(n) = graph.nodes().find(|n| !p.contains_key(*n)) {
                return Err(LayoutError::MissingPosition(format!("{n:?}")));
            }
            let crossings = number_of_cross(graph, p);
            if crossings > 0 {
                return Err(LayoutError::CrossingLayout(format!(
                    "{crossings} pairs of edges cross"
                )));
            }
        }
    }
    Ok(())
}

/// 0 for collinear, 1 for clockwise, 2 for counter-clockwise.
fn orientation(p: Point, q: Point, r: Point) -> u8 {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val == 0.0 {
        0
    } else if val > 0.0 {
        1
    } else {
        2
    }
}

/// `q` lies in the bounding box of `p`–`r`.
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    p.x.min(r.x) <= q.x && q.x <= p.x.max(r.x) && p.y.min(r.y) <= q.y && q.y <= p.y.max(r.y)
}

/// Closed segments `p1`–`q1` and `p2`–`q2` share a point.
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);
    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, q2, q1))
        || (o3 == 0 && on_segment(p2, p1, q2))
        || (o4 == 0 && on_segment(p2, q1, q2))
}

/// Number of pairs of vertex-disjoint edges whose segments intersect.
/// Edges with an endpoint missing from `pos` are skipped.
pub fn number_of_cross<N: NodeKey>(graph: &Graph<N>, pos: &HashMap<N, Point>) -> usize {
    let segs: Vec<(usize, usize, Point, Point)> = graph
        .edge_indices()
        .iter()
        .filter_map(|&(a, b)| {
            let pa = pos.get(graph.node(a))?;
            let pb = pos.get(graph.node(b))?;
            Some((a, b, *pa, *pb))
        })
        .collect();
    let mut count = 0;
    for (i, &(a, b, pa, pb)) in segs.iter().enumerate() {
        for &(c, d, pc, pd) in &segs[i + 1..] {
            if a == c || a == d || b == c || b == d {
                continue;
            }
            if segments_intersect(pa, pb, pc, pd) {
                count += 1;
            }
        }
    }
    count
}

/// Nodes that share a position with another node, sorted.
pub fn overlap_nodes<N: NodeKey>(pos: &HashMap<N, Point>) -> Vec<N> {
    let mut by_pos: HashMap<(u64, u64), Vec<&N>> = HashMap::new();
    for (n, p) in pos {
        by_pos.entry((p.x.to_bits(), p.y.to_bits())).or_default().push(n);
    }
    let mut out: Vec<N> = by_pos
        .into_values()
        .filter(|ns| ns.len() > 1)
        .flatten()
        .cloned()
        .collect();
    out.sort();
    out
}

/// Edges lying on a common horizontal or vertical line with overlapping
/// interiors, sorted.
pub fn overlay_edges<N: NodeKey>(graph: &Graph<N>, pos: &HashMap<N, Point>) -> Vec<(N, N)> {
    let segs: Vec<(usize, Point, Point)> = graph
        .edge_indices()
        .iter()
        .enumerate()
        .filter_map(|(k, &(a, b))| {
            Some((k, *pos.get(graph.node(a))?, *pos.get(graph.node(b))?))
        })
        .collect();
    let overlaps = |lo1: f64, hi1: f64, lo2: f64, hi2: f64| lo1.max(lo2) < hi1.min(hi2);
    let mut hit = vec![false; graph.edge_count()];
    for (i, &(k1, a, b)) in segs.iter().enumerate() {
        for &(k2, c, d) in &segs[i + 1..] {
            let vertical = a.x == b.x && c.x == d.x && a.x == c.x;
            let horizontal = a.y == b.y && c.y == d.y && a.y == c.y;
            let clash = (vertical && overlaps(a.y.min(b.y), a.y.max(b.y), c.y.min(d.y), c.y.max(d.y)))
                || (horizontal && overlaps(a.x.min(b.x), a.x.max(b.x), c.x.min(d.x), c.x.max(d.x)));
            if clash {
                hit[k1] = true;
                hit[k2] = true;
            }
        }
    }
    let mut out: Vec<(N, N)> = graph
        .edges()
        .zip(hit)
        .filter(|(_, h)| *h)
        .map(|((a, b), _)| (a.clone(), b.clone()))
        .collect();
    out.sort();
    out
}

/// Validate an orthogonal drawing: every edge axis-parallel, no crossings, no
/// shared positions and no overlaid edges.
pub fn postcheck<N: NodeKey>(graph: &Graph<N>, pos: &HashMap<N, Point>) -> Result<(), LayoutError> {
    for (a, b) in graph.edges() {
        let (pa, pb) = match (pos.get(a), pos.get(b)) {
            (Some(pa), Some(pb)) => (pa, pb),
            (None, _) => return Err(LayoutError::MissingPosition(format!("{a:?}"))),
            (_, None) => return Err(LayoutError::MissingPosition(format!("{b:?}"))),
        };
        if (pa.x == pb.x) == (pa.y == pb.y) {
            return Err(LayoutError::Structure(format!("edge {a:?}-{b:?} is not axis-parallel")));
        }
    }
    let crossings = number_of_cross(graph, pos);
    if crossings > 0 {
        return Err(LayoutError::Structure(format!("{crossings} pairs of edges cross")));
    }
    if let Some(n) = overlap_nodes(pos).first() {
        return Err(LayoutError::Structure(format!("{n:?} shares its position")));
    }
    if let Some((a, b)) = overlay_edges(graph, pos).first() {
        return Err(LayoutError::Structure(format!("edge {a:?}-{b:?} overlays another")));
    }
    Ok(())
}
