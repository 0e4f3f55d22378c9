use super::*;
use proptest::prelude::*;

type Net = FlowNetwork<&'static str, u32>;

fn check_feasible(net: &Net, sol: &FlowSolution) {
    for (i, a) in net.arcs().iter().enumerate() {
        let f = sol.flows[i];
        assert!(f >= a.lower && f <= a.capacity, "arc {i} flow {f}");
    }
    for (i, n) in net.nodes().iter().enumerate() {
        assert_eq!(sol.net_inflow(net, i), n.demand, "node {:?}", n.key);
    }
}

#[test]
fn cheapest_arc_fills_first() {
    let mut net = Net::new();
    net.set_demand("s", -4);
    net.set_demand("t", 4);
    let a = net.add_arc("s", "t", 0, 0, 3, 1).unwrap();
    let b = net.add_arc("s", "t", 1, 0, 10, 2).unwrap();
    let sol = net.min_cost_flow().unwrap();
    check_feasible(&net, &sol);
    assert_eq!(sol.flow(a), 3);
    assert_eq!(sol.flow(b), 1);
    assert_eq!(sol.cost, 5);
    assert_eq!(net.arc_id(&"s", &"t", &1), Some(b));
}

#[test]
fn lower_bounds_are_honoured() {
    let mut net = Net::new();
    net.set_demand("s", -2);
    net.set_demand("t", 2);
    let a = net.add_arc("s", "t", 0, 2, 5, 3).unwrap();
    let b = net.add_arc("s", "t", 1, 0, 5, 1).unwrap();
    let sol = net.min_cost_flow().unwrap();
    assert_eq!((sol.flow(a), sol.flow(b)), (2, 0));
    assert_eq!(sol.cost, 6);
}

#[test]
fn circulation_with_lower_bound() {
    let mut net = Net::new();
    let ab = net.add_arc("a", "b", 0, 1, UNBOUNDED, 1).unwrap();
    let ba = net.add_arc("b", "a", 0, 0, UNBOUNDED, 0).unwrap();
    let sol = net.min_cost_flow().unwrap();
    check_feasible(&net, &sol);
    assert_eq!((sol.flow(ab), sol.flow(ba)), (1, 1));
    assert_eq!(sol.cost, 1);
}

#[test]
fn self_loop_arc_stays_empty() {
    let mut net = Net::new();
    net.set_demand("s", -1);
    net.set_demand("t", 1);
    let l = net.add_arc("s", "s", 0, 0, UNBOUNDED, 1).unwrap();
    net.add_arc("s", "t", 0, 0, UNBOUNDED, 1).unwrap();
    let sol = net.min_cost_flow().unwrap();
    assert_eq!(sol.flow(l), 0);
    assert_eq!(sol.cost, 1);
}

#[test]
fn negative_costs_use_potentials() {
    let mut net = Net::new();
    net.set_demand("s", -1);
    net.set_demand("t", 1);
    let sm = net.add_arc("s", "m", 0, 0, 1, -2).unwrap();
    net.add_arc("m", "t", 0, 0, 1, 1).unwrap();
    let st = net.add_arc("s", "t", 0, 0, 1, 0).unwrap();
    let sol = net.min_cost_flow().unwrap();
    check_feasible(&net, &sol);
    assert_eq!((sol.flow(sm), sol.flow(st)), (1, 0));
    assert_eq!(sol.cost, -1);
}

#[test]
fn infeasible_names_the_node() {
    let mut net = Net::new();
    net.set_demand("s", -5);
    net.set_demand("t", 5);
    net.add_arc("s", "t", 0, 0, 3, 1).unwrap();
    match net.min_cost_flow() {
        Err(FlowError::Infeasible { node }) => assert!(node == "\"s\"" || node == "\"t\""),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn construction_errors() {
    let mut net = Net::new();
    net.set_demand("s", -1);
    assert_eq!(
        net.min_cost_flow().unwrap_err(),
        FlowError::Unbalanced { total: -1 }
    );
    net.add_arc("s", "t", 7, 0, 1, 0).unwrap();
    assert!(matches!(
        net.add_arc("s", "t", 7, 0, 1, 0),
        Err(FlowError::DuplicateArc(_))
    ));
    assert!(matches!(
        net.add_arc("s", "t", 8, 3, 1, 0),
        Err(FlowError::BadBounds { .. })
    ));
}

#[test]
fn ilp_matches_min_cost() {
    let mut net = Net::new();
    net.set_demand("s", -4);
    net.set_demand("t", 4);
    net.add_arc("s", "t", 0, 0, 3, 1).unwrap();
    net.add_arc("s", "t", 1, 0, UNBOUNDED, 2).unwrap();
    let lp = net.solve_ilp(&[]).unwrap();
    check_feasible(&net, &lp);
    assert_eq!(lp.cost, 5);
    assert!((lp.objective - 5.0).abs() < 1e-6);
}

#[test]
fn ilp_penalty_balances_parallel_arcs() {
    let mut net = Net::new();
    net.set_demand("v", -4);
    net.set_demand("f", 4);
    let a = net.add_arc("v", "f", 0, 1, 4, 0).unwrap();
    let b = net.add_arc("v", "f", 1, 1, 4, 0).unwrap();
    let sol = net
        .solve_ilp(&[AbsDiffPenalty { a, b, weight: 1.0 }])
        .unwrap();
    check_feasible(&net, &sol);
    assert_eq!((sol.flow(a), sol.flow(b)), (2, 2));
    assert!(sol.objective.abs() < 1e-6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Transportation instances: supplies on the left, demands on the right,
    /// every pair connected. Both solvers must agree on the optimal cost.
    #[test]
    fn transport_instances(
        supply in prop::collection::vec(1i64..6, 1..4),
        costs in prop::collection::vec(0i64..9, 16),
        split in 1usize..4,
    ) {
        const LEFT: [&str; 3] = ["l0", "l1", "l2"];
        const RIGHT: [&str; 4] = ["r0", "r1", "r2", "r3"];
        let total: i64 = supply.iter().sum();
        let m = split.min(RIGHT.len());
        let mut net = Net::new();
        for (i, &s) in supply.iter().enumerate() {
            net.set_demand(LEFT[i], -s);
        }
        for (j, r) in RIGHT.iter().take(m).enumerate() {
            let share = total / m as i64 + i64::from((j as i64) < total % m as i64);
            net.set_demand(*r, share);
        }
        for i in 0..supply.len() {
            for j in 0..m {
                net.add_arc(LEFT[i], RIGHT[j], 0, 0, UNBOUNDED, costs[i * 4 + j]).unwrap();
            }
        }
        let sol = net.min_cost_flow().unwrap();
        check_feasible(&net, &sol);
        let lp = net.solve_ilp(&[]).unwrap();
        check_feasible(&net, &lp);
        prop_assert_eq!(sol.cost, lp.cost);
    }
}
