//! Flow network data types.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

/// Stand-in for infinite capacity.
pub const UNBOUNDED: i64 = 1 << 32;

/// Index of an arc in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(pub usize);

#[derive(Clone, Debug)]
pub struct FlowNode<N> {
    pub key: N,
    /// Required `inflow − outflow`.
    pub demand: i64,
}

#[derive(Clone, Debug)]
pub struct FlowArc<K> {
    pub from: usize,
    pub to: usize,
    pub key: K,
    pub lower: i64,
    pub capacity: i64,
    pub cost: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("demands sum to {total}, not zero")]
    Unbalanced { total: i64 },
    #[error("arc {arc} has lower bound {lower} above capacity {capacity}")]
    BadBounds { arc: String, lower: i64, capacity: i64 },
    #[error("arc {0} already present")]
    DuplicateArc(String),
    #[error("no feasible flow: demand of node {node} cannot be met")]
    Infeasible { node: String },
    #[error("network contains a negative-cost cycle")]
    NegativeCycle,
    #[error("integer program failed: {0}")]
    Lp(String),
}

/// Directed multigraph with node demands and bounded, costed arcs.
#[derive(Clone, Debug)]
pub struct FlowNetwork<N, K> {
    pub(crate) nodes: Vec<FlowNode<N>>,
    pub(crate) node_index: HashMap<N, usize>,
    pub(crate) arcs: Vec<FlowArc<K>>,
    pub(crate) arc_index: HashMap<(usize, usize, K), ArcId>,
}

impl<N, K> Default for FlowNetwork<N, K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            arcs: Vec::new(),
            arc_index: HashMap::new(),
        }
    }
}

impl<N, K> FlowNetwork<N, K>
where
    N: Clone + Eq + Hash + Debug,
    K: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Dense index of `key`, inserting it with zero demand if absent.
    pub fn node(&mut self, key: N) -> usize {
        if let Some(&i) = self.node_index.get(&key) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(FlowNode {
            key: key.clone(),
            demand: 0,
        });
        self.node_index.insert(key, i);
        i
    }

    /// Insert `key` (if needed) and set its demand.
    pub fn set_demand(&mut self, key: N, demand: i64) -> usize {
        let i = self.node(key);
        self.nodes[i].demand = demand;
        i
    }

    /// Add an arc; endpoints are created on demand.
    pub fn add_arc(
        &mut self,
        from: N,
        to: N,
        key: K,
        lower: i64,
        capacity: i64,
        cost: i64,
    ) -> Result<ArcId, FlowError> {
        let (a, b) = (self.node(from), self.node(to));
        let tag = || format!("{:?}->{:?} [{:?}]", self.nodes[a].key, self.nodes[b].key, key);
        if lower < 0 || lower > capacity {
            return Err(FlowError::BadBounds {
                arc: tag(),
                lower,
                capacity,
            });
        }
        if self.arc_index.contains_key(&(a, b, key.clone())) {
            return Err(FlowError::DuplicateArc(tag()));
        }
        let id = ArcId(self.arcs.len());
        self.arc_index.insert((a, b, key.clone()), id);
        self.arcs.push(FlowArc {
            from: a,
            to: b,
            key,
            lower,
            capacity,
            cost,
        });
        Ok(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn nodes(&self) -> &[FlowNode<N>] {
        &self.nodes
    }

    pub fn arcs(&self) -> &[FlowArc<K>] {
        &self.arcs
    }

    pub fn index_of(&self, key: &N) -> Option<usize> {
        self.node_index.get(key).copied()
    }

    /// Look up an arc by its endpoints and key.
    pub fn arc_id(&self, from: &N, to: &N, key: &K) -> Option<ArcId> {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        self.arc_index.get(&(a, b, key.clone())).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub(crate) fn check_balance(&self) -> Result<(), FlowError> {
        let total: i64 = self.nodes.iter().map(|n| n.demand).sum();
        if total != 0 {
            return Err(FlowError::Unbalanced { total });
        }
        Ok(())
    }

    pub(crate) fn describe(&self, node: usize) -> String {
        format!("{:?}", self.nodes[node].key)
    }
}

/// Integral flow per arc plus its cost.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowSolution {
    pub flows: Vec<i64>,
    /// `Σ flow · cost` over all arcs.
    pub cost: i64,
    /// Solver objective; equals `cost` unless penalties were added.
    pub objective: f64,
}

impl FlowSolution {
    #[inline]
    pub fn flow(&self, arc: ArcId) -> i64 {
        self.flows[arc.0]
    }

    /// `inflow − outflow` at `node` under this solution.
    pub fn net_inflow<N, K>(&self, net: &FlowNetwork<N, K>, node: usize) -> i64 {
        net.arcs
            .iter()
            .zip(&self.flows)
            .map(|(a, &f)| {
                let mut d = 0;
                if a.to == node {
                    d += f;
                }
                if a.from == node {
                    d -= f;
                }
                d
            })
            .sum()
    }
}
