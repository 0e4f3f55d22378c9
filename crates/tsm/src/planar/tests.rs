use std::collections::HashMap;

use super::*;
use crate::graph::{Graph, Point};

fn graph(edges: &[(u32, u32)]) -> Graph<u32> {
    Graph::from_edges(edges.iter().copied())
}

fn positions(pts: &[(u32, f64, f64)]) -> HashMap<u32, Point> {
    pts.iter().map(|&(k, x, y)| (k, Point::new(x, y))).collect()
}

fn complete(n: u32) -> Graph<u32> {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            edges.push((a, b));
        }
    }
    graph(&edges)
}

#[test]
fn square_with_positions_keeps_orientation() {
    let g = graph(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
    let pos = positions(&[(0, 0.0, 0.0), (1, 1.0, 0.0), (2, 1.0, 1.0), (3, 0.0, 1.0)]);
    let p = planarize(&g, Some(&pos)).unwrap();
    assert_eq!(p.reference_side, Side::Right);
    let d = &p.dcel;
    assert_eq!(d.face_count(), 2);
    let anchor = d.face(d.ext_face()).anchor;
    assert_eq!(d.origin(anchor), VertexId(0));
    assert_eq!(d.dest(anchor), VertexId(1));
    assert_eq!(d.face_degree(d.ext_face()), 4);
    d.validate().unwrap();
}

#[test]
fn polar_order_is_counter_clockwise() {
    // centre 0 with neighbours east 1, north 2, west 3, south 4
    let g = graph(&[(0, 1), (0, 2), (0, 3), (0, 4)]);
    let pos = positions(&[
        (0, 0.0, 0.0),
        (1, 1.0, 0.0),
        (2, 0.0, 1.0),
        (3, -1.0, 0.0),
        (4, 0.0, -1.0),
    ]);
    let rot = rotation_from_positions(&g, &pos).unwrap();
    let names: Vec<u32> = rot[0].iter().map(|&j| *g.node(j)).collect();
    assert_eq!(names, vec![4, 1, 2, 3]);
}

#[test]
fn overlapping_directions_are_rejected() {
    let g = graph(&[(0, 1), (0, 2)]);
    let pos = positions(&[(0, 0.0, 0.0), (1, 1.0, 1.0), (2, 2.0, 2.0)]);
    assert!(matches!(
        planarize(&g, Some(&pos)),
        Err(LayoutError::CrossingLayout(_))
    ));
    let pos = positions(&[(0, 0.0, 0.0), (1, 0.0, 0.0), (2, 2.0, 2.0)]);
    assert!(matches!(
        rotation_from_positions(&g, &pos),
        Err(LayoutError::CrossingLayout(_))
    ));
}

#[test]
fn missing_position_is_reported() {
    let g = graph(&[(0, 1)]);
    let pos = positions(&[(0, 0.0, 0.0)]);
    assert!(matches!(
        planarize(&g, Some(&pos)),
        Err(LayoutError::MissingPosition(_))
    ));
}

#[test]
fn crossing_diagonals_fail_euler_check() {
    let g = complete(4);
    let pos = positions(&[(0, 0.0, 0.0), (1, 1.0, 0.0), (2, 1.0, 1.0), (3, 0.0, 1.0)]);
    assert!(matches!(
        planarize(&g, Some(&pos)),
        Err(LayoutError::CrossingLayout(_))
    ));
}

#[test]
fn k4_embeds_without_positions() {
    let p = planarize(&complete(4), None).unwrap();
    assert_eq!(p.dcel.face_count(), 4);
    for f in p.dcel.face_ids() {
        assert_eq!(p.dcel.face_degree(f), 3);
    }
    assert_eq!(p.reference_side, Side::Up);
    p.dcel.validate().unwrap();
}

#[test]
fn k5_and_k33_are_not_planar() {
    assert!(matches!(planarize(&complete(5), None), Err(LayoutError::NonPlanar)));
    let mut edges = Vec::new();
    for a in 0..3 {
        for b in 3..6 {
            edges.push((a, b));
        }
    }
    assert!(matches!(planarize(&graph(&edges), None), Err(LayoutError::NonPlanar)));
}

#[test]
fn blocks_split_at_cut_vertices() {
    // two triangles sharing node 2, plus a pendant edge 4-5
    let g = graph(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2), (4, 5)]);
    let adj: Vec<Vec<usize>> = (0..g.node_count()).map(|i| g.neighbors(i)).collect();
    let mut sizes: Vec<usize> = biconnected_blocks(&adj).iter().map(Vec::len).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 3, 3]);

    let p = planarize(&g, None).unwrap();
    // V - E + F = 2
    assert_eq!(p.dcel.face_count(), 2 + 7 - 6);
    p.dcel.validate().unwrap();
}

#[test]
fn grid_without_positions_picks_longest_face() {
    let mut edges = Vec::new();
    let id = |i: u32, j: u32| i * 3 + j;
    for i in 0..3 {
        for j in 0..3 {
            if i + 1 < 3 {
                edges.push((id(i, j), id(i + 1, j)));
            }
            if j + 1 < 3 {
                edges.push((id(i, j), id(i, j + 1)));
            }
        }
    }
    let p = planarize(&graph(&edges), None).unwrap();
    let d = &p.dcel;
    assert_eq!(d.face_count(), 5);
    let longest = d.face_ids().map(|f| d.face_degree(f)).max().unwrap();
    assert_eq!(d.face_degree(d.ext_face()), longest);
    d.validate().unwrap();
}
