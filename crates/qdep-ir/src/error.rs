//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Operation does not act on exactly two qubits.
    #[error("Gate '{gate_name}' at position {position} requires 2 qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Position of the operation in its input sequence.
        position: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Gate indices are not dense and zero-based.
    #[error("Gate at position {position} has index {index}; indices must be dense from 0")]
    NonDenseIndex {
        /// Position in the gate slice.
        position: usize,
        /// Index carried by the gate.
        index: usize,
    },

    /// Dependency graph violates a structural invariant.
    #[error("Invalid dependency graph: {0}")]
    InvalidGraph(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
