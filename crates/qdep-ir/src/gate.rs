//! Gate types and the two-qubit filtering boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// An operation as produced by an upstream circuit parser.
///
/// Operations may act on any number of qubits; only the two-qubit ones
/// become vertices of a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOp {
    /// Gate type tag (e.g. `cx`, `h`).
    pub name: String,
    /// Qubits in operand order.
    pub qubits: Vec<QubitId>,
}

impl GateOp {
    /// Create a new operation.
    pub fn new(name: impl Into<String>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            name: name.into(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Number of qubits this operation acts on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Check if this is a two-qubit operation.
    #[inline]
    pub fn is_two_qubit(&self) -> bool {
        self.qubits.len() == 2
    }
}

/// A two-qubit gate: one vertex of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gate {
    /// Position in the two-qubit-only sequence.
    pub index: usize,
    /// First operand.
    pub control: QubitId,
    /// Second operand.
    pub target: QubitId,
    /// Gate type tag.
    pub kind: String,
}

impl Gate {
    /// Create a new gate.
    pub fn new(index: usize, control: QubitId, target: QubitId, kind: impl Into<String>) -> Self {
        Self {
            index,
            control,
            target,
            kind: kind.into(),
        }
    }

    /// Build a gate from an upstream operation.
    ///
    /// `position` is the operation's position in the upstream sequence and is
    /// only used for error context.
    pub fn from_op(index: usize, position: usize, op: &GateOp) -> IrResult<Self> {
        match op.qubits.as_slice() {
            [control, target] => Ok(Self::new(index, *control, *target, op.name.clone())),
            qubits => Err(IrError::QubitCountMismatch {
                gate_name: op.name.clone(),
                position,
                got: qubits.len(),
            }),
        }
    }

    /// Check if this gate touches the given qubit.
    #[inline]
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.control == qubit || self.target == qubit
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}, {}", self.index, self.kind, self.control, self.target)
    }
}

/// Keep the two-qubit operations and re-index them densely from 0.
///
/// Operations on one qubit or on three or more qubits are dropped; the
/// relative order of the remaining operations is preserved.
pub fn two_qubit_gates(ops: &[GateOp]) -> Vec<Gate> {
    let gates: Vec<Gate> = ops
        .iter()
        .filter(|op| op.is_two_qubit())
        .enumerate()
        .map(|(index, op)| Gate::new(index, op.qubits[0], op.qubits[1], op.name.clone()))
        .collect();

    debug!(
        "Kept {} two-qubit gates out of {} operations",
        gates.len(),
        ops.len()
    );
    gates
}

/// Check that gate indices are `0..n` in slice order.
pub fn check_dense(gates: &[Gate]) -> IrResult<()> {
    for (position, gate) in gates.iter().enumerate() {
        if gate.index != position {
            return Err(IrError::NonDenseIndex {
                position,
                index: gate.index,
            });
        }
    }
    Ok(())
}
