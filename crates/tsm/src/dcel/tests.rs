use super::*;

/// Unit square 0:(0,0) 1:(1,0) 2:(1,1) 3:(0,1), rotations counter-clockwise.
fn square() -> Dcel {
    let kinds = (0..4).map(VertexKind::Input).collect();
    let rotation = vec![vec![1, 3], vec![2, 0], vec![1, 3], vec![0, 2]];
    let mut d = Dcel::from_rotation(kinds, &rotation).unwrap();
    let h01 = d.half_edge_between(VertexId(0), VertexId(1)).unwrap();
    let ext = d.face_of(h01);
    d.set_external(ext);
    d
}

fn inner_face(d: &Dcel) -> FaceId {
    d.face_ids().find(|&f| f != d.ext_face()).unwrap()
}

#[test]
fn square_has_two_faces_of_degree_four() {
    let d = square();
    assert_eq!(d.face_count(), 2);
    assert_eq!(d.half_edge_count(), 8);
    for f in d.face_ids() {
        assert_eq!(d.face_degree(f), 4);
    }
    d.validate().unwrap();
}

#[test]
fn external_face_is_walked_counter_clockwise() {
    let d = square();
    let h01 = d.half_edge_between(VertexId(0), VertexId(1)).unwrap();
    let order: Vec<usize> = d.face_cycle(h01).map(|h| d.origin(h).0).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    let h10 = d.twin(h01);
    let inner: Vec<usize> = d.face_cycle(h10).map(|h| d.origin(h).0).collect();
    assert_eq!(inner, vec![1, 0, 3, 2]);
}

#[test]
fn twin_and_links_are_consistent() {
    let d = square();
    for h in d.half_edge_ids() {
        assert_eq!(d.twin(d.twin(h)), h);
        assert_eq!(d.prev(d.succ(h)), h);
        assert_eq!(d.origin(d.succ(h)), d.dest(h));
    }
    for v in d.vertex_ids() {
        assert_eq!(d.degree(v), 2);
    }
}

#[test]
fn subdivide_keeps_ids_and_faces() {
    let mut d = square();
    let h01 = d.half_edge_between(VertexId(0), VertexId(1)).unwrap();
    let t = d.twin(h01);
    let (f, g) = (d.face_of(h01), d.face_of(t));
    let m = d.subdivide(h01, VertexKind::Bend(0));
    d.validate().unwrap();
    assert_eq!(d.vertex_count(), 5);
    assert_eq!(d.half_edge_count(), 10);
    assert_eq!(d.dest(h01), m);
    assert_eq!(d.origin(t), VertexId(1));
    assert_eq!(d.dest(t), m);
    assert_eq!(d.dest(d.succ(h01)), VertexId(1));
    assert_eq!(d.face_of(d.succ(h01)), f);
    assert_eq!(d.face_of(d.succ(t)), g);
    assert_eq!(d.face_degree(f), 5);
    assert_eq!(d.face_degree(g), 5);
    assert_eq!(d.degree(m), 2);
}

#[test]
fn subdivide_leaf_edge() {
    let kinds = (0..2).map(VertexKind::Input).collect();
    let mut d = Dcel::from_rotation(kinds, &[vec![1], vec![0]]).unwrap();
    assert_eq!(d.face_count(), 1);
    let h = d.half_edge_between(VertexId(0), VertexId(1)).unwrap();
    let m = d.subdivide(h, VertexKind::Bend(0));
    d.validate().unwrap();
    let order: Vec<usize> = d.face_cycle(h).map(|e| d.origin(e).0).collect();
    assert_eq!(order, vec![0, m.0, 1, m.0]);
}

#[test]
fn split_face_creates_two_triangles() {
    let mut d = square();
    let f = inner_face(&d);
    let (uv, nf) = d
        .split_face(f, VertexId(0), VertexId(2), Side::Up, &[])
        .unwrap();
    d.validate().unwrap();
    assert_eq!(d.face_count(), 3);
    assert_eq!(d.face_of(uv), f);
    assert_eq!(d.face_of(d.twin(uv)), nf);
    assert_eq!(d.face_degree(f), 3);
    assert_eq!(d.face_degree(nf), 3);
    assert!(d.face(d.ext_face()).is_external);
    assert!(!d.face(nf).is_external);
}

#[test]
fn split_face_rejects_vertex_off_face() {
    let mut d = square();
    let f = inner_face(&d);
    let m = d.subdivide(
        d.half_edge_between(VertexId(0), VertexId(1)).unwrap(),
        VertexKind::Bend(0),
    );
    let (_, nf) = d.split_face(f, VertexId(3), m, Side::Down, &[]).unwrap();
    // the new face is m-3-2-1; vertex 0 stayed with the old one.
    let err = d
        .split_face(nf, VertexId(2), VertexId(0), Side::Left, &[])
        .unwrap_err();
    assert!(matches!(err, DcelError::NotOnFace { .. }));
}

/// Node 0 with leaves 1 (right), 2 (up) and 3 (left); one face and three
/// corners of 0 on it.
fn star() -> (Dcel, Vec<Side>) {
    let kinds = (0..4).map(VertexKind::Input).collect();
    let rotation = vec![vec![1, 2, 3], vec![0], vec![0], vec![0]];
    let mut d = Dcel::from_rotation(kinds, &rotation).unwrap();
    let f = d.face_of(d.half_edge_between(VertexId(0), VertexId(1)).unwrap());
    d.set_external(f);
    let toward = |leaf: usize| [Side::Right, Side::Up, Side::Left][leaf - 1];
    let sides = d
        .half_edge_ids()
        .map(|h| match (d.origin(h).0, d.dest(h).0) {
            (0, leaf) => toward(leaf),
            (leaf, _) => toward(leaf).opposite(),
        })
        .collect();
    (d, sides)
}

#[test]
fn split_face_picks_corner_by_side() {
    // (hint, far end of the chord, leaf whose corner must be used at 0)
    for (hint, to, corner) in [
        (Side::Down, 3, 1),
        (Side::Up, 1, 3),
        (Side::Right, 1, 2),
        (Side::Left, 3, 1),
    ] {
        let (mut d, sides) = star();
        let f = d.ext_face();
        let (uv, nf) = d
            .split_face(f, VertexId(0), VertexId(to), hint, &sides)
            .unwrap();
        d.validate().unwrap();
        assert_eq!(d.face_count(), 2);
        assert_ne!(d.face_of(uv), nf);
        let want = d.half_edge_between(VertexId(0), VertexId(corner)).unwrap();
        assert_eq!(d.succ(d.twin(uv)), want, "{hint:?}");
    }
}

#[test]
fn split_face_without_matching_side_is_ambiguous() {
    let (mut d, _) = star();
    let f = d.ext_face();
    let err = d
        .split_face(f, VertexId(0), VertexId(1), Side::Up, &[])
        .unwrap_err();
    assert!(matches!(err, DcelError::AmbiguousCorner { vertex: 0, .. }));

    let all_up = vec![Side::Up; d.half_edge_count()];
    let err = d
        .split_face(f, VertexId(0), VertexId(1), Side::Up, &all_up)
        .unwrap_err();
    assert!(matches!(err, DcelError::AmbiguousCorner { vertex: 0, .. }));
    d.validate().unwrap();
}

#[test]
fn border_wrap_and_connect() {
    let mut d = square();
    let old = d.ext_face();
    let inner = d.wrap_in_border();
    d.validate().unwrap();
    assert_ne!(d.ext_face(), old);
    assert!(!d.face(old).is_external);
    assert_eq!(d.face_degree(d.ext_face()), 4);
    // anchor stays on the drawing
    assert_eq!(d.face_degree(old), 4);
    for h in inner {
        assert_eq!(d.face_of(h), old);
    }

    let cu = d.corners_on(VertexId(0), old)[0];
    let uv = d.connect_across(old, cu, inner[0]).unwrap();
    d.validate().unwrap();
    assert_eq!(d.face_of(uv), old);
    assert_eq!(d.face_degree(old), 10);
}

#[test]
fn connect_across_rejects_same_component() {
    let mut d = square();
    let old = d.ext_face();
    d.wrap_in_border();
    let cu = d.corners_on(VertexId(0), old)[0];
    let cv = d.corners_on(VertexId(2), old)[0];
    let err = d.connect_across(old, cu, cv).unwrap_err();
    assert!(matches!(err, DcelError::BadChord { .. }));
}

#[test]
fn rotation_errors() {
    let kinds = |n| (0..n).map(VertexKind::Input).collect::<Vec<_>>();
    assert_eq!(
        Dcel::from_rotation(kinds(2), &[vec![], vec![0]]).unwrap_err(),
        DcelError::IsolatedVertex { vertex: 0 }
    );
    assert_eq!(
        Dcel::from_rotation(kinds(3), &[vec![1], vec![0, 2], vec![0]]).unwrap_err(),
        DcelError::MissingTwin { from: 1, to: 2 }
    );
    assert_eq!(
        Dcel::from_rotation(kinds(2), &[vec![1, 1], vec![0]]).unwrap_err(),
        DcelError::BadRotation { vertex: 0 }
    );
}

#[test]
fn side_arithmetic() {
    assert_eq!(Side::Up.rotate(1), Side::Right);
    assert_eq!(Side::Left.rotate(1), Side::Up);
    assert_eq!(Side::Right.opposite(), Side::Left);
    assert_eq!(Side::Up.turns_to(Side::Left), 3);
    assert_eq!(Side::Left.turns_to(Side::Up), 1);
    assert_eq!(Side::nearest(nalgebra::Vector2::new(0.2, -3.0)), Side::Down);
    assert_eq!(Side::nearest(nalgebra::Vector2::new(-1.0, 1.0)), Side::Left);
    assert_eq!(Side::Down.step(), (0, -1));
}
