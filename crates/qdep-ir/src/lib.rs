//! qdep Gate Model and Dependency Graphs
//!
//! This crate turns the ordered two-qubit operations of a quantum circuit into
//! a directed dependency graph. It is the foundation of the dataset pipeline
//! in `qdep-dataset`.
//!
//! # Overview
//!
//! Upstream circuit parsers hand over an ordered list of [`GateOp`]s of any
//! arity. [`two_qubit_gates`] keeps the two-qubit subset and re-indexes it
//! densely from zero; every surviving [`Gate`] becomes one vertex of the
//! [`DependencyGraph`] built by [`DependencyGraphBuilder`].
//!
//! # Precedence Rule
//!
//! For each gate `i`, later gates `j` are scanned in order:
//!
//! | Rule | Condition | Effect |
//! |------|-----------|--------|
//! | target-equals-target | `gate[j].target == gate[i].target` | edge `i → j`, scan for `i` stops |
//! | target-equals-control | `gate[j].control == gate[i].target` | edge `i → j`, scan continues |
//!
//! # Example
//!
//! ```rust
//! use qdep_ir::{DependencyGraphBuilder, Gate, QubitId};
//!
//! let gates = vec![
//!     Gate::new(0, QubitId(0), QubitId(1), "cx"),
//!     Gate::new(1, QubitId(1), QubitId(2), "cx"),
//!     Gate::new(2, QubitId(0), QubitId(2), "cx"),
//! ];
//!
//! let graph = DependencyGraphBuilder::new().build(&gates);
//! let edges: Vec<(usize, usize)> = graph.edges().map(|e| (e.source, e.destination)).collect();
//! assert_eq!(edges, vec![(0, 1), (1, 2)]);
//! ```

pub mod error;
pub mod gate;
pub mod graph;
pub mod qubit;

pub use error::{IrError, IrResult};
pub use gate::{Gate, GateOp, check_dense, two_qubit_gates};
pub use graph::{DependencyEdge, DependencyGraph, DependencyGraphBuilder, EdgeRule};
pub use qubit::QubitId;
