use std::collections::HashMap;

use super::*;
use crate::graph::{Graph, Point};
use crate::planar::planarize;

fn graph(edges: &[(u32, u32)]) -> Graph<u32> {
    Graph::from_edges(edges.iter().copied())
}

fn square() -> Planarization<u32> {
    let g = graph(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
    let pos: HashMap<u32, Point> = [(0, 0.0, 0.0), (1, 1.0, 0.0), (2, 1.0, 1.0), (3, 0.0, 1.0)]
        .iter()
        .map(|&(k, x, y)| (k, Point::new(x, y)))
        .collect();
    planarize(&g, Some(&pos)).unwrap()
}

#[test]
fn network_has_one_arc_pair_per_half_edge() {
    let p = square();
    let sn = shape_network(&p.dcel).unwrap();
    assert_eq!(sn.net.node_count(), 4 + 2);
    assert_eq!(sn.net.arc_count(), 2 * 8);
    assert_eq!(face_demand(&p.dcel, p.dcel.ext_face()), 12);
    let total: i64 = sn.net.nodes().iter().map(|n| n.demand).sum();
    assert_eq!(total, 0);
}

#[test]
fn square_needs_no_bends() {
    let o = orthogonalize(square(), ShapeSolver::MinCostFlow).unwrap();
    assert_eq!(o.cost, 0);
    assert_eq!(o.bend_count(), 0);
    let d = o.dcel();
    for h in d.half_edge_ids() {
        let want = if d.face_of(h) == d.ext_face() { 3 } else { 1 };
        assert_eq!(o.shape.angles[h.0], want, "{h:?}");
    }
    assert_eq!(o.corner_count(), 4);
    o.validate().unwrap();
}

#[test]
fn triangle_needs_one_bend() {
    let p = planarize(&graph(&[(0, 1), (1, 2), (2, 0)]), None).unwrap();
    let o = orthogonalize(p, ShapeSolver::MinCostFlow).unwrap();
    assert_eq!(o.cost, 1);
    assert_eq!(o.bend_count(), 1);
    // the bend is reflex in the external face
    let d = o.dcel();
    let bent: Vec<HalfEdgeId> = d.half_edge_ids().filter(|h| o.shape.bends[h.0] > 0).collect();
    assert_eq!(bent.len(), 1);
    assert_eq!(d.face_of(bent[0]), d.ext_face());
    o.validate().unwrap();
}

#[test]
fn path_runs_straight_through_its_middle() {
    let p = planarize(&graph(&[(0, 1), (1, 2)]), None).unwrap();
    let o = orthogonalize(p, ShapeSolver::MinCostFlow).unwrap();
    assert_eq!(o.cost, 0);
    let mid = VertexId(1);
    let angles: Vec<u8> = o.dcel().outgoing(mid).map(|h| o.shape.angles[h.0]).collect();
    assert_eq!(angles, vec![2, 2]);
    assert_eq!(o.corner_count(), 0);
    o.validate().unwrap();
}

#[test]
fn k4_shape_is_consistent() {
    let mut edges = Vec::new();
    for a in 0..4 {
        for b in a + 1..4 {
            edges.push((a, b));
        }
    }
    let p = planarize(&graph(&edges), None).unwrap();
    let o = orthogonalize(p, ShapeSolver::MinCostFlow).unwrap();
    let d = o.dcel();
    for v in d.vertex_ids() {
        assert_eq!(o.angle_sum(v), 4);
    }
    for f in d.face_ids() {
        assert_eq!(o.face_balance(f), face_demand(d, f));
    }
    assert_eq!(i64::from(o.bend_count()), o.cost);
}

#[test]
fn ilp_without_corner_weight_matches_flow() {
    let tri = graph(&[(0, 1), (1, 2), (2, 0)]);
    let solver = ShapeSolver::Ilp(IlpCfg { corner_weight: 0.0 });
    let o = orthogonalize(planarize(&tri, None).unwrap(), solver).unwrap();
    assert_eq!(o.cost, 1);
    o.validate().unwrap();

    let o = orthogonalize(square(), solver).unwrap();
    assert_eq!(o.cost, 0);
    o.validate().unwrap();
}

#[test]
fn ilp_corner_weight_trades_bends_for_straight_corners() {
    let tri = graph(&[(0, 1), (1, 2), (2, 0)]);
    let o = orthogonalize(
        planarize(&tri, None).unwrap(),
        ShapeSolver::Ilp(IlpCfg::default()),
    )
    .unwrap();
    o.validate().unwrap();
    assert!(o.cost >= 1);
    assert!(o.objective >= o.cost as f64);
}
