//! Reproducible planar instances: grids and random connected grid subgraphs.
//!
//! Purpose
//! - Feed property tests and benches with graphs that are planar, connected,
//!   of degree at most four, and come with a crossing-free drawing.
//!
//! Model
//! - A random subgraph is a random spanning tree of the `w × h` grid
//!   (Kruskal over shuffled edges) plus each remaining grid edge with
//!   probability `extra_edge_prob`. Positions are the grid points, optionally
//!   moved by a bounded jitter that cannot introduce crossings.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::graph::{Graph, Point};

/// Grid node `(column, row)`.
pub type Cell = (usize, usize);

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Random grid subgraph configuration.
#[derive(Clone, Copy, Debug)]
pub struct GridSampleCfg {
    pub width: usize,
    pub height: usize,
    /// Probability of keeping a grid edge that is not in the spanning tree.
    pub extra_edge_prob: f64,
    /// Position jitter per coordinate, as a fraction of the grid spacing.
    /// Clamped to [0, 0.2].
    pub jitter: f64,
}
impl Default for GridSampleCfg {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            extra_edge_prob: 0.3,
            jitter: 0.0,
        }
    }
}

fn grid_edges(width: usize, height: usize) -> Vec<(Cell, Cell)> {
    let mut edges = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                edges.push(((x, y), (x + 1, y)));
            }
            if y + 1 < height {
                edges.push(((x, y), (x, y + 1)));
            }
        }
    }
    edges
}

fn grid_point((x, y): Cell) -> Point {
    Point::new(x as f64, y as f64)
}

/// Full `width × height` grid with its grid positions.
pub fn grid_graph(width: usize, height: usize) -> (Graph<Cell>, HashMap<Cell, Point>) {
    let mut g = Graph::new();
    for y in 0..height {
        for x in 0..width {
            g.add_node((x, y));
        }
    }
    for (a, b) in grid_edges(width, height) {
        g.add_edge(a, b);
    }
    let pos = g.nodes().map(|&c| (c, grid_point(c))).collect();
    (g, pos)
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Random connected spanning subgraph of the grid with (jittered) positions.
pub fn random_grid_subgraph(cfg: GridSampleCfg, tok: ReplayToken) -> (Graph<Cell>, HashMap<Cell, Point>) {
    let mut rng = tok.to_std_rng();
    let (w, h) = (cfg.width.max(1), cfg.height.max(1));
    let p = cfg.extra_edge_prob.clamp(0.0, 1.0);
    let jitter = cfg.jitter.clamp(0.0, 0.2);

    let mut edges = grid_edges(w, h);
    edges.shuffle(&mut rng);
    let mut parent: Vec<usize> = (0..w * h).collect();
    let id = |(x, y): Cell| y * w + x;

    let mut g = Graph::new();
    for y in 0..h {
        for x in 0..w {
            g.add_node((x, y));
        }
    }
    for (a, b) in edges {
        let (ra, rb) = (find(&mut parent, id(a)), find(&mut parent, id(b)));
        if ra != rb {
            parent[ra] = rb;
            g.add_edge(a, b);
        } else if rng.gen::<f64>() < p {
            g.add_edge(a, b);
        }
    }
    let pos = g
        .nodes()
        .map(|&c| {
            let dx = (rng.gen::<f64>() * 2.0 - 1.0) * jitter;
            let dy = (rng.gen::<f64>() * 2.0 - 1.0) * jitter;
            (c, grid_point(c) + Point::new(dx, dy))
        })
        .collect();
    (g, pos)
}
