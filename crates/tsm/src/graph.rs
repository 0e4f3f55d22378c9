//! Input graph: a simple undirected graph over opaque node keys.
//!
//! Nodes are stored in insertion order and addressed internally by dense
//! indices; the DCEL and the planarizer work on those indices and only map
//! back to keys at the API boundary.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use nalgebra::Vector2;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Real-valued input position.
pub type Point = Vector2<f64>;
/// Integer output coordinate.
pub type GridPos = Vector2<i64>;

/// Requirements on node keys. Blanket-implemented.
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug {}
impl<T: Clone + Eq + Hash + Ord + Debug> NodeKey for T {}

/// Undirected graph over a petgraph `UnGraph`. Parallel edges are merged;
/// self-loops are recorded so that validation can reject them.
///
/// Nodes are never removed, so petgraph's node indices stay dense and double
/// as the indices used by the planarizer.
#[derive(Clone, Debug)]
pub struct Graph<N> {
    inner: UnGraph<N, ()>,
    index: HashMap<N, NodeIndex>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            inner: UnGraph::default(),
            index: HashMap::new(),
        }
    }
}

impl<N: NodeKey> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an edge list.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    /// Insert a node (no-op if present) and return its dense index.
    pub fn add_node(&mut self, n: N) -> usize {
        if let Some(&ix) = self.index.get(&n) {
            return ix.index();
        }
        let ix = self.inner.add_node(n.clone());
        self.index.insert(n, ix);
        ix.index()
    }

    /// Insert an undirected edge. Returns false when it was already present.
    pub fn add_edge(&mut self, a: N, b: N) -> bool {
        let ia = NodeIndex::new(self.add_node(a));
        let ib = NodeIndex::new(self.add_node(b));
        if self.inner.find_edge(ia, ib).is_some() {
            return false;
        }
        self.inner.add_edge(ia, ib, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Node keys in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.inner.raw_nodes().iter().map(|n| &n.weight)
    }

    pub fn node(&self, i: usize) -> &N {
        &self.inner[NodeIndex::new(i)]
    }

    pub fn index_of(&self, n: &N) -> Option<usize> {
        self.index.get(n).map(|ix| ix.index())
    }

    pub fn contains_edge(&self, a: &N, b: &N) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.inner.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Neighbour indices of node `i`, ordered by edge insertion. A self-loop
    /// lists `i` once.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        let a = NodeIndex::new(i);
        let mut incident: Vec<(usize, usize)> = self
            .inner
            .edges(a)
            .map(|e| {
                let other = if e.source() == a { e.target() } else { e.source() };
                (e.id().index(), other.index())
            })
            .collect();
        incident.sort_unstable();
        incident.dedup();
        incident.into_iter().map(|(_, j)| j).collect()
    }

    /// Degree of node `i`; a self-loop counts twice.
    pub fn degree(&self, i: usize) -> usize {
        let nb = self.neighbors(i);
        nb.len() + nb.iter().filter(|&&j| j == i).count()
    }

    /// Edges as index pairs in insertion order.
    pub fn edge_indices(&self) -> Vec<(usize, usize)> {
        self.inner
            .raw_edges()
            .iter()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    /// Edges as key pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.inner
            .raw_edges()
            .iter()
            .map(move |e| (&self.inner[e.source()], &self.inner[e.target()]))
    }

    pub fn self_loop_count(&self) -> usize {
        self.inner
            .raw_edges()
            .iter()
            .filter(|e| e.source() == e.target())
            .count()
    }

    pub fn max_degree(&self) -> usize {
        (0..self.node_count())
            .map(|i| self.degree(i))
            .max()
            .unwrap_or(0)
    }

    /// True for graphs with at least one node and a single component.
    pub fn is_connected(&self) -> bool {
        self.node_count() > 0 && connected_components(&self.inner) == 1
    }
}
