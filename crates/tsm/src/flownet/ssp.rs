//! Exact min-cost flow by successive shortest paths.
//!
//! Lower bounds are pre-routed and folded into node demands; a super source
//! feeds every remaining supply and a super sink drains every remaining
//! demand. Augmentation runs Dijkstra on reduced costs, so arc costs may be
//! negative only if Bellman-Ford can seed the potentials (no negative cycle).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use super::types::{FlowError, FlowNetwork, FlowSolution};

const INF: i64 = i64::MAX / 4;

#[derive(Clone, Copy, Debug)]
struct ResArc {
    to: usize,
    cap: i64,
    cost: i64,
    /// Index of the reverse arc in `adj[to]`.
    rev: usize,
}

/// Residual graph in adjacency-list form.
struct Residual {
    adj: Vec<Vec<ResArc>>,
}

impl Residual {
    fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
        }
    }

    /// Returns the position of the forward arc in `adj[from]`.
    fn add(&mut self, from: usize, to: usize, cap: i64, cost: i64) -> usize {
        let fwd = self.adj[from].len();
        let bwd = self.adj[to].len() + usize::from(from == to);
        self.adj[from].push(ResArc {
            to,
            cap,
            cost,
            rev: bwd,
        });
        self.adj[to].push(ResArc {
            to: from,
            cap: 0,
            cost: -cost,
            rev: fwd,
        });
        fwd
    }

    /// Bellman-Ford from `s` over arcs with residual capacity.
    fn bellman_ford(&self, s: usize) -> Result<Vec<i64>, FlowError> {
        let n = self.adj.len();
        let mut dist = vec![INF; n];
        dist[s] = 0;
        for round in 0..n {
            let mut changed = false;
            for u in 0..n {
                if dist[u] == INF {
                    continue;
                }
                for e in &self.adj[u] {
                    if e.cap > 0 && dist[u] + e.cost < dist[e.to] {
                        dist[e.to] = dist[u] + e.cost;
                        changed = true;
                    }
                }
            }
            if !changed {
                return Ok(dist.into_iter().map(|d| if d == INF { 0 } else { d }).collect());
            }
            if round + 1 == n {
                break;
            }
        }
        Err(FlowError::NegativeCycle)
    }

    /// Dijkstra on reduced costs. Returns distances and parent `(node, arc)`.
    fn dijkstra(&self, s: usize, pot: &[i64]) -> (Vec<i64>, Vec<Option<(usize, usize)>>) {
        let n = self.adj.len();
        let mut dist = vec![INF; n];
        let mut parent = vec![None; n];
        let mut heap = BinaryHeap::new();
        dist[s] = 0;
        heap.push(Reverse((0i64, s)));
        while let Some(Reverse((d, u))) = heap.pop() {
            if d > dist[u] {
                continue;
            }
            for (k, e) in self.adj[u].iter().enumerate() {
                if e.cap <= 0 {
                    continue;
                }
                let nd = d + e.cost + pot[u] - pot[e.to];
                if nd < dist[e.to] {
                    dist[e.to] = nd;
                    parent[e.to] = Some((u, k));
                    heap.push(Reverse((nd, e.to)));
                }
            }
        }
        (dist, parent)
    }
}

impl<N, K> FlowNetwork<N, K>
where
    N: Clone + Eq + Hash + Debug,
    K: Clone + Eq + Hash + Debug,
{
    /// Minimum-cost flow meeting every demand and arc bound exactly.
    pub fn min_cost_flow(&self) -> Result<FlowSolution, FlowError> {
        self.check_balance()?;
        let n = self.nodes.len();
        let (src, snk) = (n, n + 1);
        let mut res = Residual::new(n + 2);

        // Lower bounds routed up front: excess[v] is what v still needs to receive.
        let mut excess: Vec<i64> = self.nodes.iter().map(|x| x.demand).collect();
        let mut fwd = Vec::with_capacity(self.arcs.len());
        for a in &self.arcs {
            excess[a.to] -= a.lower;
            excess[a.from] += a.lower;
            fwd.push(res.add(a.from, a.to, a.capacity - a.lower, a.cost));
        }
        let mut terminals = Vec::new();
        let mut required = 0i64;
        for (v, &x) in excess.iter().enumerate() {
            if x < 0 {
                terminals.push((v, res.add(src, v, -x, 0), true));
                required += -x;
            } else if x > 0 {
                terminals.push((v, res.add(v, snk, x, 0), false));
            }
        }

        let mut pot = if self.arcs.iter().any(|a| a.cost < 0) {
            res.bellman_ford(src)?
        } else {
            vec![0; n + 2]
        };

        let mut sent = 0i64;
        let mut rounds = 0usize;
        while sent < required {
            let (dist, parent) = res.dijkstra(src, &pot);
            if dist[snk] == INF {
                break;
            }
            let reach_max = dist.iter().copied().filter(|&d| d < INF).max().unwrap_or(0);
            for v in 0..n + 2 {
                pot[v] += if dist[v] < INF { dist[v] } else { reach_max };
            }
            let mut push = required - sent;
            let mut v = snk;
            while let Some((u, k)) = parent[v] {
                push = push.min(res.adj[u][k].cap);
                v = u;
            }
            let mut v = snk;
            while let Some((u, k)) = parent[v] {
                let rev = res.adj[u][k].rev;
                res.adj[u][k].cap -= push;
                res.adj[v][rev].cap += push;
                v = u;
            }
            sent += push;
            rounds += 1;
        }

        if sent < required {
            let stuck = terminals
                .iter()
                .find(|&&(v, k, from_src)| {
                    let (u, _) = if from_src { (src, v) } else { (v, snk) };
                    res.adj[u][k].cap > 0
                })
                .map(|&(v, _, _)| v)
                .unwrap_or(0);
            return Err(FlowError::Infeasible {
                node: self.describe(stuck),
            });
        }

        let flows: Vec<i64> = self
            .arcs
            .iter()
            .zip(&fwd)
            .map(|(a, &k)| a.lower + (a.capacity - a.lower - res.adj[a.from][k].cap))
            .collect();
        let cost = self.arcs.iter().zip(&flows).map(|(a, &f)| a.cost * f).sum();
        debug!(
            nodes = n,
            arcs = self.arcs.len(),
            required,
            rounds,
            cost,
            "min_cost_flow"
        );
        Ok(FlowSolution {
            flows,
            cost,
            objective: cost as f64,
        })
    }
}
