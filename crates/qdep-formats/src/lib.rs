//! Interchange Formats for qdep
//!
//! This crate reads and writes the files that connect the dependency-graph
//! builder to its neighbours in the pipeline.
//!
//! # Supported Formats
//!
//! | Format | Direction | Example |
//! |--------|-----------|---------|
//! | Edge list | read / write | `0 1\n1 2\n` |
//! | Node attributes (JSON) | read / write | `{"0": {"gate": "cx", "qubit_1": 0, "qubit_2": 1}}` |
//! | Operation list (JSON) | read | `[{"name": "cx", "qubits": [0, 1]}]` |
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qdep_formats::{emit_edges, parse_edges};
//! use qdep_ir::DependencyEdge;
//!
//! let edges = vec![DependencyEdge::new(0, 1), DependencyEdge::new(1, 2)];
//! let text = emit_edges(&edges);
//! assert_eq!(text, "0 1\n1 2\n");
//! assert_eq!(parse_edges(&text).unwrap(), edges);
//! ```

pub mod attributes;
pub mod edgelist;
pub mod error;
pub mod ops;

pub use attributes::{
    NodeAttribute, NodeAttributes, QubitField, emit_attributes, parse_attributes,
    read_attributes, write_attributes,
};
pub use edgelist::{count_edges, emit_edges, parse_edges, read_edges, write_edges};
pub use error::{FormatError, FormatResult};
pub use ops::{parse_ops, read_ops};
