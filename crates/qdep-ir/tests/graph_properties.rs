//! Property-based tests for dependency-graph construction.

use proptest::prelude::*;
use qdep_ir::{DependencyGraphBuilder, EdgeRule, Gate, GateOp, QubitId, two_qubit_gates};

/// Generate a gate sequence over up to 6 qubits with distinct operands.
fn arb_gates() -> impl Strategy<Value = Vec<Gate>> {
    prop::collection::vec(
        (0_u32..6, 0_u32..6).prop_filter("Control and target must differ", |(c, t)| c != t),
        0..=24,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (c, t))| Gate::new(i, QubitId(c), QubitId(t), "cx"))
            .collect()
    })
}

/// Mixed-arity operations as an upstream parser would produce them.
fn arb_ops() -> impl Strategy<Value = Vec<GateOp>> {
    prop::collection::vec(
        prop::collection::vec((0_u32..5).prop_map(QubitId), 1..=3)
            .prop_map(|qubits| GateOp::new("g", qubits)),
        0..=20,
    )
}

/// Straightforward restatement of the precedence rule.
fn reference_edges(gates: &[Gate]) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for i in 0..gates.len() {
        for j in (i + 1)..gates.len() {
            if gates[i].target == gates[j].target {
                edges.push((i, j));
                break;
            }
            if gates[i].target == gates[j].control {
                edges.push((i, j));
            }
        }
    }
    edges
}

proptest! {
    /// Every edge points from an earlier gate to a later one.
    #[test]
    fn test_edges_point_forward(gates in arb_gates()) {
        let graph = DependencyGraphBuilder::new().build(&gates);
        for edge in graph.edges() {
            prop_assert!(edge.source < edge.destination);
            prop_assert!(edge.destination < gates.len());
        }
        prop_assert!(graph.verify_integrity().is_ok());
    }

    /// No gate has more than one target-equals-target edge, and when it has
    /// one it is the last edge of that gate.
    #[test]
    fn test_single_target_target_edge(gates in arb_gates()) {
        let graph = DependencyGraphBuilder::new().build(&gates);
        for src in 0..graph.num_gates() {
            let rules: Vec<EdgeRule> = graph
                .edges_with_rule()
                .filter(|(e, _)| e.source == src)
                .map(|(_, r)| r)
                .collect();
            let tt = rules.iter().filter(|r| **r == EdgeRule::TargetTarget).count();
            prop_assert!(tt <= 1);
            if tt == 1 {
                prop_assert_eq!(rules.last(), Some(&EdgeRule::TargetTarget));
            }
        }
    }

    /// The builder agrees with a direct restatement of the rule.
    #[test]
    fn test_matches_reference(gates in arb_gates()) {
        let graph = DependencyGraphBuilder::new().build(&gates);
        let edges: Vec<(usize, usize)> =
            graph.edges().map(|e| (e.source, e.destination)).collect();
        prop_assert_eq!(edges, reference_edges(&gates));
    }

    /// Building twice gives the same graph.
    #[test]
    fn test_build_is_deterministic(gates in arb_gates()) {
        let builder = DependencyGraphBuilder::new();
        prop_assert_eq!(builder.build(&gates), builder.build(&gates));
    }

    /// Filtering keeps exactly the two-qubit operations, densely indexed.
    #[test]
    fn test_filter_is_dense(ops in arb_ops()) {
        let gates = two_qubit_gates(&ops);
        let expected = ops.iter().filter(|op| op.num_qubits() == 2).count();
        prop_assert_eq!(gates.len(), expected);
        for (i, gate) in gates.iter().enumerate() {
            prop_assert_eq!(gate.index, i);
        }
        prop_assert!(DependencyGraphBuilder::new().build_checked(&gates).is_ok());
    }
}
