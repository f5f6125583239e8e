//! Dependency-graph construction over two-qubit gates.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, check_dense};

/// Which precedence rule produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeRule {
    /// The later gate targets the same qubit. Ends the scan for the source.
    TargetTarget,
    /// The later gate uses the source's target as its control.
    TargetControl,
}

/// A directed dependency `source → destination` between gate indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Gate that must complete first.
    pub source: usize,
    /// Gate that depends on it.
    pub destination: usize,
}

impl DependencyEdge {
    /// Create a new edge.
    #[inline]
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl From<(usize, usize)> for DependencyEdge {
    fn from((source, destination): (usize, usize)) -> Self {
        Self::new(source, destination)
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Dependency graph over gate indices.
///
/// Each gate keeps its outgoing edges in discovery order. Flattening the
/// per-gate lists source by source gives the base edge list that dataset
/// augmentation indexes into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: Vec<Vec<(usize, EdgeRule)>>,
}

impl DependencyGraph {
    /// Create a graph with `num_gates` vertices and no edges.
    pub fn with_gates(num_gates: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_gates],
        }
    }

    /// Number of gates (vertices).
    #[inline]
    pub fn num_gates(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of dependency edges.
    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Check if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.adjacency.iter().all(Vec::is_empty)
    }

    /// Destinations of `gate` in discovery order.
    pub fn successors(&self, gate: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(gate)
            .into_iter()
            .flat_map(|out| out.iter().map(|(dst, _)| *dst))
    }

    /// The flattened base edge list, source-major.
    pub fn edges(&self) -> impl Iterator<Item = DependencyEdge> + '_ {
        self.edges_with_rule().map(|(edge, _)| edge)
    }

    /// The base edge list with the rule that produced each edge.
    pub fn edges_with_rule(&self) -> impl Iterator<Item = (DependencyEdge, EdgeRule)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(src, out)| {
            out.iter()
                .map(move |(dst, rule)| (DependencyEdge::new(src, *dst), *rule))
        })
    }

    /// Collect the base edge list.
    pub fn to_edge_list(&self) -> Vec<DependencyEdge> {
        self.edges().collect()
    }

    fn push(&mut self, source: usize, destination: usize, rule: EdgeRule) {
        self.adjacency[source].push((destination, rule));
    }

    /// Export as a petgraph digraph; node weights are gate indices.
    pub fn to_petgraph(&self) -> DiGraph<usize, EdgeRule, u32> {
        let mut graph = DiGraph::with_capacity(self.num_gates(), self.num_edges());
        let nodes: Vec<_> = (0..self.num_gates()).map(|i| graph.add_node(i)).collect();
        for (edge, rule) in self.edges_with_rule() {
            graph.add_edge(nodes[edge.source], nodes[edge.destination], rule);
        }
        graph
    }

    /// Verify the structural invariants of the graph.
    ///
    /// Checks that every edge points forward to an existing gate, that no
    /// source has more than one target-equals-target edge, and that the graph
    /// is acyclic.
    pub fn verify_integrity(&self) -> IrResult<()> {
        let n = self.num_gates();
        for (src, out) in self.adjacency.iter().enumerate() {
            let mut target_target = 0usize;
            for (dst, rule) in out {
                if *dst >= n {
                    return Err(IrError::InvalidGraph(format!(
                        "edge {src} -> {dst} points past the last gate ({n} gates)"
                    )));
                }
                if *dst <= src {
                    return Err(IrError::InvalidGraph(format!(
                        "edge {src} -> {dst} does not point forward"
                    )));
                }
                if *rule == EdgeRule::TargetTarget {
                    target_target += 1;
                }
            }
            if target_target > 1 {
                return Err(IrError::InvalidGraph(format!(
                    "gate {src} has {target_target} target-equals-target edges"
                )));
            }
        }

        if is_cyclic_directed(&self.to_petgraph()) {
            return Err(IrError::InvalidGraph("graph contains a cycle".into()));
        }
        Ok(())
    }
}

/// Builds a [`DependencyGraph`] from an ordered gate sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the dependency graph for `gates`.
    ///
    /// Gate `i` scans every later gate `j` in order. A gate targeting the
    /// same qubit gets an edge and ends the scan; a gate whose control is
    /// `i`'s target gets an edge and the scan goes on.
    pub fn build(&self, gates: &[Gate]) -> DependencyGraph {
        let n = gates.len();
        let mut graph = DependencyGraph::with_gates(n);

        for i in 0..n.saturating_sub(1) {
            let target = gates[i].target;
            for j in (i + 1)..n {
                if gates[j].target == target {
                    graph.push(i, j, EdgeRule::TargetTarget);
                    break;
                }
                if gates[j].control == target {
                    graph.push(i, j, EdgeRule::TargetControl);
                }
            }
            debug!("gate {i}: {} outgoing edges", graph.adjacency[i].len());
        }

        info!(
            "Built dependency graph: {} gates, {} edges",
            graph.num_gates(),
            graph.num_edges()
        );
        graph
    }

    /// Build after checking that gate indices are dense from 0.
    pub fn build_checked(&self, gates: &[Gate]) -> IrResult<DependencyGraph> {
        check_dense(gates)?;
        Ok(self.build(gates))
    }
}
