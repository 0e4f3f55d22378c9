//! Planar rotation system for graphs given without positions.
//!
//! Model
//! - Split the graph into biconnected blocks (iterative Tarjan).
//! - Embed each block with more than one edge by the Demoucron–Malgrange–
//!   Pertuiset algorithm: start from a cycle, then repeatedly take the
//!   fragment with the fewest admissible faces and route one of its paths
//!   through such a face. A fragment with no admissible face means the block
//!   is not planar.
//! - Read each block's rotation off its oriented face cycles and concatenate
//!   the per-block rotations at cut vertices.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::LayoutError;
use crate::graph::{Graph, NodeKey};

type Edge = (usize, usize);

fn key(u: usize, v: usize) -> Edge {
    (u.min(v), u.max(v))
}

/// Biconnected blocks as edge lists. Bridges form single-edge blocks.
pub fn biconnected_blocks(adj: &[Vec<usize>]) -> Vec<Vec<Edge>> {
    let n = adj.len();
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut time = 0usize;
    let mut edges: Vec<Edge> = Vec::new();
    let mut blocks = Vec::new();
    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;
        // (vertex, parent, next neighbour position)
        let mut stack: Vec<(usize, usize, usize)> = vec![(root, usize::MAX, 0)];
        while let Some(top) = stack.last_mut() {
            let (v, parent) = (top.0, top.1);
            if top.2 < adj[v].len() {
                let w = adj[v][top.2];
                top.2 += 1;
                if w == v {
                    continue;
                }
                if disc[w] == usize::MAX {
                    edges.push((v, w));
                    disc[w] = time;
                    low[w] = time;
                    time += 1;
                    stack.push((w, v, 0));
                } else if w != parent && disc[w] < disc[v] {
                    edges.push((v, w));
                    low[v] = low[v].min(disc[w]);
                }
            } else {
                stack.pop();
                if let Some(&(u, _, _)) = stack.last() {
                    low[u] = low[u].min(low[v]);
                    if low[v] >= disc[u] {
                        let mut block = Vec::new();
                        while let Some(e) = edges.pop() {
                            block.push(e);
                            if e == (u, v) {
                                break;
                            }
                        }
                        blocks.push(block);
                    }
                }
            }
        }
    }
    blocks
}

/// Counter-clockwise neighbour order for every node of a planar graph.
pub fn planar_rotation<N: NodeKey>(graph: &Graph<N>) -> Result<Vec<Vec<usize>>, LayoutError> {
    let n = graph.node_count();
    let adj: Vec<Vec<usize>> = (0..n).map(|i| graph.neighbors(i)).collect();
    let mut rotation: Vec<Vec<usize>> = vec![Vec::new(); n];
    for block in biconnected_blocks(&adj) {
        if let &[(u, v)] = block.as_slice() {
            rotation[u].push(v);
            rotation[v].push(u);
            continue;
        }
        for (v, order) in embed_block(&block)? {
            rotation[v].extend(order);
        }
    }
    Ok(rotation)
}

/// Embed one biconnected block; returns the rotation of each of its vertices.
fn embed_block(block: &[Edge]) -> Result<Vec<(usize, Vec<usize>)>, LayoutError> {
    let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(u, v) in block {
        adj.entry(u).or_default().push(v);
        adj.entry(v).or_default().push(u);
    }
    let mut verts: Vec<usize> = adj.keys().copied().collect();
    verts.sort_unstable();

    let cycle = find_cycle(&adj, block[0])?;
    let mut placed: HashSet<usize> = cycle.iter().copied().collect();
    let mut done: HashSet<Edge> = HashSet::new();
    for k in 0..cycle.len() {
        done.insert(key(cycle[k], cycle[(k + 1) % cycle.len()]));
    }
    let mut faces: Vec<Vec<usize>> = vec![cycle.clone(), cycle.iter().rev().copied().collect()];

    while done.len() < block.len() {
        let frags = fragments(&adj, &verts, &placed, &done, block);
        let mut choice: Option<(usize, usize, usize)> = None; // (fragment, face, admissible count)
        for (fi, frag) in frags.iter().enumerate() {
            let admissible: Vec<usize> = faces
                .iter()
                .enumerate()
                .filter(|(_, f)| frag.attachments.iter().all(|a| f.contains(a)))
                .map(|(i, _)| i)
                .collect();
            let Some(&first) = admissible.first() else {
                return Err(LayoutError::NonPlanar);
            };
            if choice.map_or(true, |(_, _, c)| admissible.len() < c) {
                choice = Some((fi, first, admissible.len()));
            }
        }
        let (fi, face_idx, _) = choice.ok_or_else(|| {
            LayoutError::Structure("edges left unembedded without fragments".into())
        })?;
        let path = fragment_path(&adj, &placed, &frags[fi])?;
        for w in path.windows(2) {
            done.insert(key(w[0], w[1]));
        }
        placed.extend(path.iter().copied());
        let (f1, f2) = split_face(&faces[face_idx], &path)?;
        faces[face_idx] = f1;
        faces.push(f2);
    }

    // In an oriented face cycle u → v → w, w follows u around v.
    let mut next_at: HashMap<Edge, usize> = HashMap::new();
    for f in &faces {
        let l = f.len();
        for k in 0..l {
            let (u, v, w) = (f[k], f[(k + 1) % l], f[(k + 2) % l]);
            next_at.insert((v, u), w);
        }
    }
    let mut out = Vec::with_capacity(verts.len());
    for &v in &verts {
        let start = adj[&v][0];
        let mut order = vec![start];
        let mut u = start;
        loop {
            u = *next_at
                .get(&(v, u))
                .ok_or_else(|| LayoutError::Structure(format!("no successor around {v}")))?;
            if u == start {
                break;
            }
            if order.len() > adj[&v].len() {
                return Err(LayoutError::Structure(format!("rotation at {v} does not close")));
            }
            order.push(u);
        }
        if order.len() != adj[&v].len() {
            return Err(LayoutError::Structure(format!("rotation at {v} misses neighbours")));
        }
        out.push((v, order));
    }
    Ok(out)
}

/// A cycle through the edge `(a, b)`: `b` back to `a` avoiding that edge.
fn find_cycle(adj: &HashMap<usize, Vec<usize>>, (a, b): Edge) -> Result<Vec<usize>, LayoutError> {
    let mut parent: HashMap<usize, usize> = HashMap::new();
    let mut queue = VecDeque::from([b]);
    parent.insert(b, b);
    while let Some(x) = queue.pop_front() {
        for &y in &adj[&x] {
            if x == b && y == a {
                continue;
            }
            if parent.contains_key(&y) {
                continue;
            }
            parent.insert(y, x);
            if y == a {
                let mut cycle = vec![a];
                let mut cur = a;
                while cur != b {
                    cur = parent[&cur];
                    cycle.push(cur);
                }
                return Ok(cycle);
            }
            queue.push_back(y);
        }
    }
    Err(LayoutError::Structure("block without a cycle".into()))
}

struct Fragment {
    /// Unplaced vertices; empty for a single chord between placed vertices.
    inner: Vec<usize>,
    attachments: Vec<usize>,
    chord: Option<Edge>,
}

fn fragments(
    adj: &HashMap<usize, Vec<usize>>,
    verts: &[usize],
    placed: &HashSet<usize>,
    done: &HashSet<Edge>,
    block: &[Edge],
) -> Vec<Fragment> {
    let mut out = Vec::new();
    for &(u, v) in block {
        if placed.contains(&u) && placed.contains(&v) && !done.contains(&key(u, v)) {
            out.push(Fragment {
                inner: Vec::new(),
                attachments: vec![u, v],
                chord: Some((u, v)),
            });
        }
    }
    let mut seen: HashSet<usize> = HashSet::new();
    for &s in verts {
        if placed.contains(&s) || !seen.insert(s) {
            continue;
        }
        let mut inner = vec![s];
        let mut attach: Vec<usize> = Vec::new();
        let mut k = 0;
        while k < inner.len() {
            let x = inner[k];
            k += 1;
            for &y in &adj[&x] {
                if placed.contains(&y) {
                    if !attach.contains(&y) {
                        attach.push(y);
                    }
                } else if seen.insert(y) {
                    inner.push(y);
                }
            }
        }
        out.push(Fragment {
            inner,
            attachments: attach,
            chord: None,
        });
    }
    out
}

/// A path through the fragment between two distinct attachment vertices.
fn fragment_path(
    adj: &HashMap<usize, Vec<usize>>,
    placed: &HashSet<usize>,
    frag: &Fragment,
) -> Result<Vec<usize>, LayoutError> {
    if let Some((u, v)) = frag.chord {
        return Ok(vec![u, v]);
    }
    let inner: HashSet<usize> = frag.inner.iter().copied().collect();
    let a = *frag
        .attachments
        .first()
        .ok_or_else(|| LayoutError::Structure("fragment without attachments".into()))?;
    let x = *adj[&a]
        .iter()
        .find(|&&y| inner.contains(&y))
        .ok_or_else(|| LayoutError::Structure("attachment not adjacent to fragment".into()))?;
    let mut parent: HashMap<usize, usize> = HashMap::from([(x, x)]);
    let mut queue = VecDeque::from([x]);
    while let Some(y) = queue.pop_front() {
        if let Some(&b) = adj[&y].iter().find(|&&b| b != a && placed.contains(&b)) {
            let mut mid = vec![y];
            let mut cur = y;
            while cur != x {
                cur = parent[&cur];
                mid.push(cur);
            }
            mid.reverse();
            let mut path = vec![a];
            path.extend(mid);
            path.push(b);
            return Ok(path);
        }
        for &z in &adj[&y] {
            if inner.contains(&z) && !parent.contains_key(&z) {
                parent.insert(z, y);
                queue.push_back(z);
            }
        }
    }
    Err(LayoutError::Structure("fragment with a single attachment in a block".into()))
}

/// Route `path` (from `path[0]` to its last vertex) through the oriented
/// face cycle `face`, returning the two oriented sub-cycles.
fn split_face(face: &[usize], path: &[usize]) -> Result<(Vec<usize>, Vec<usize>), LayoutError> {
    let (a, b) = (path[0], path[path.len() - 1]);
    let pos = |x: usize| {
        face.iter()
            .position(|&y| y == x)
            .ok_or_else(|| LayoutError::Structure(format!("{x} not on the chosen face")))
    };
    let (i, j) = (pos(a)?, pos(b)?);
    let l = face.len();
    let interior = &path[1..path.len() - 1];

    let mut f1 = Vec::new();
    let mut k = i;
    loop {
        f1.push(face[k]);
        if k == j {
            break;
        }
        k = (k + 1) % l;
    }
    f1.extend(interior.iter().rev().copied());

    let mut f2 = Vec::new();
    let mut k = j;
    loop {
        f2.push(face[k]);
        if k == i {
            break;
        }
        k = (k + 1) % l;
    }
    f2.extend(interior.iter().copied());
    Ok((f1, f2))
}
