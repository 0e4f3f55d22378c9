//! Integer-program formulation of the same flow problem.
//!
//! One integer variable per arc bounded by `[lower, capacity]`, one equality
//! per node (`in − out = demand`) and objective `Σ cost · x` plus weighted
//! `|x_a − x_b|` terms, each linearised with an auxiliary variable.

use std::fmt::Debug;
use std::hash::Hash;

use good_lp::{
    variable, Expression, IntoAffineExpression, ProblemVariables, Solution, SolverModel, Variable,
};
use tracing::debug;

use super::types::{ArcId, FlowError, FlowNetwork, FlowSolution, UNBOUNDED};

/// Penalise `weight · |flow(a) − flow(b)|`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsDiffPenalty {
    pub a: ArcId,
    pub b: ArcId,
    pub weight: f64,
}

impl<N, K> FlowNetwork<N, K>
where
    N: Clone + Eq + Hash + Debug,
    K: Clone + Eq + Hash + Debug,
{
    /// Solve as an integer program with extra absolute-difference penalties.
    ///
    /// With no penalties the optimum matches [`FlowNetwork::min_cost_flow`] in
    /// cost, though not necessarily in the flows chosen.
    pub fn solve_ilp(&self, penalties: &[AbsDiffPenalty]) -> Result<FlowSolution, FlowError> {
        self.check_balance()?;
        let mut vars = ProblemVariables::new();
        let x: Vec<Variable> = self
            .arcs
            .iter()
            .map(|a| {
                let def = variable().integer().min(a.lower as f64);
                if a.capacity < UNBOUNDED {
                    vars.add(def.max(a.capacity as f64))
                } else {
                    vars.add(def)
                }
            })
            .collect();

        let mut objective: Expression = self
            .arcs
            .iter()
            .zip(&x)
            .filter(|(a, _)| a.cost != 0)
            .map(|(a, &v)| v * (a.cost as f64))
            .sum();
        let mut constraints = Vec::new();
        for p in penalties {
            let t = vars.add(variable().min(0.0));
            let (xa, xb) = (x[p.a.0], x[p.b.0]);
            constraints.push((xa.into_expression() - xb).leq(t));
            constraints.push((xb.into_expression() - xa).leq(t));
            objective += t * p.weight;
        }

        let mut balance: Vec<Expression> = vec![0.0_f64.into_expression(); self.nodes.len()];
        for (a, &v) in self.arcs.iter().zip(&x) {
            balance[a.to] += v;
            balance[a.from] -= v;
        }
        for (node, expr) in self.nodes.iter().zip(balance) {
            constraints.push(expr.eq(node.demand as f64));
        }

        let mut model = vars
            .minimise(objective.clone())
            .using(good_lp::solvers::microlp::microlp);
        for c in constraints {
            model.add_constraint(c);
        }
        let solution = model
            .solve()
            .map_err(|e| FlowError::Lp(e.to_string()))?;

        let flows: Vec<i64> = x
            .iter()
            .map(|&v| solution.value(v).round() as i64)
            .collect();
        let cost = self.arcs.iter().zip(&flows).map(|(a, &f)| a.cost * f).sum();
        let objective = solution.eval(objective);
        debug!(
            arcs = self.arcs.len(),
            penalties = penalties.len(),
            cost,
            objective,
            "solve_ilp"
        );
        Ok(FlowSolution {
            flows,
            cost,
            objective,
        })
    }
}
