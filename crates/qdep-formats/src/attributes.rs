//! Node-attribute JSON format.
//!
//! A JSON object keyed by the stringified gate index, each value holding the
//! gate type tag and its two qubit operands:
//!
//! ```json
//! {
//!     "0": { "gate": "cx", "qubit_1": 0, "qubit_2": 1 },
//!     "1": { "gate": "cx", "qubit_1": 1, "qubit_2": "2" }
//! }
//! ```
//!
//! Qubit fields may be numbers or numeric strings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

use qdep_ir::{Gate, QubitId};

use crate::error::{FormatError, FormatResult, read_file, write_file};

/// A qubit operand as stored in the attribute file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QubitField {
    /// Integer index, as written by `qdep graph`.
    Index(u64),
    /// Any other JSON number.
    Number(f64),
    /// A string holding a number.
    Text(String),
}

impl QubitField {
    /// Convert to a float feature value.
    pub fn to_f32(&self) -> Option<f32> {
        match self {
            QubitField::Index(i) => Some(*i as f32),
            QubitField::Number(x) => Some(*x as f32),
            QubitField::Text(s) => s.trim().parse::<f32>().ok(),
        }
    }

    /// Convert to a qubit index.
    ///
    /// Integers and integer strings convert exactly; other numbers must be
    /// integral and within `u32`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_qubit(&self) -> Option<QubitId> {
        let from_float = |x: f64| {
            (x >= 0.0 && x.fract() == 0.0 && x <= f64::from(u32::MAX)).then(|| QubitId(x as u32))
        };
        match self {
            QubitField::Index(i) => u32::try_from(*i).ok().map(QubitId),
            QubitField::Number(x) => from_float(*x),
            QubitField::Text(s) => {
                let s = s.trim();
                match s.parse::<u64>() {
                    Ok(i) => u32::try_from(i).ok().map(QubitId),
                    Err(_) => s.parse::<f64>().ok().and_then(from_float),
                }
            }
        }
    }
}

impl From<QubitId> for QubitField {
    fn from(q: QubitId) -> Self {
        QubitField::Index(u64::from(q.0))
    }
}

impl fmt::Display for QubitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitField::Index(i) => write!(f, "{i}"),
            QubitField::Number(x) => write!(f, "{x}"),
            QubitField::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Attributes of one gate vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAttribute {
    /// Gate type tag.
    pub gate: String,
    /// First operand (control).
    pub qubit_1: QubitField,
    /// Second operand (target).
    pub qubit_2: QubitField,
}

impl NodeAttribute {
    /// Numeric value of both qubit fields.
    pub fn qubits(&self, node: usize) -> FormatResult<(f32, f32)> {
        let convert = |field: &'static str, value: &QubitField| {
            value.to_f32().ok_or_else(|| FormatError::InvalidQubit {
                node,
                field,
                value: value.to_string(),
            })
        };
        Ok((
            convert("qubit_1", &self.qubit_1)?,
            convert("qubit_2", &self.qubit_2)?,
        ))
    }
}

/// Attribute table keyed by gate index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeAttributes {
    nodes: BTreeMap<usize, NodeAttribute>,
}

impl NodeAttributes {
    /// Build the table for a two-qubit gate sequence.
    pub fn from_gates(gates: &[Gate]) -> Self {
        let nodes = gates
            .iter()
            .map(|g| {
                (
                    g.index,
                    NodeAttribute {
                        gate: g.kind.clone(),
                        qubit_1: g.control.into(),
                        qubit_2: g.target.into(),
                    },
                )
            })
            .collect();
        Self { nodes }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up one node.
    pub fn get(&self, node: usize) -> Option<&NodeAttribute> {
        self.nodes.get(&node)
    }

    /// Nodes in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &NodeAttribute)> {
        self.nodes.iter().map(|(k, v)| (*k, v))
    }

    /// Check that keys are exactly `0..len`.
    pub fn check_dense(&self) -> FormatResult<()> {
        for (expected, found) in self.nodes.keys().enumerate() {
            if *found != expected {
                return Err(FormatError::NonDenseAttributes {
                    expected,
                    found: *found,
                });
            }
        }
        Ok(())
    }

    /// Reconstruct the gate sequence, validating density and qubit fields.
    ///
    /// Qubit values must be non-negative integers that fit a [`QubitId`].
    pub fn to_gates(&self) -> FormatResult<Vec<Gate>> {
        self.check_dense()?;
        self.iter()
            .map(|(index, attr)| {
                let as_qubit = |field: &'static str, raw: &QubitField| {
                    raw.to_qubit().ok_or_else(|| FormatError::InvalidQubit {
                        node: index,
                        field,
                        value: raw.to_string(),
                    })
                };
                Ok(Gate::new(
                    index,
                    as_qubit("qubit_1", &attr.qubit_1)?,
                    as_qubit("qubit_2", &attr.qubit_2)?,
                    attr.gate.clone(),
                ))
            })
            .collect()
    }
}

/// Parse an attribute table from JSON.
pub fn parse_attributes(source: &str) -> FormatResult<NodeAttributes> {
    Ok(serde_json::from_str(source)?)
}

/// Emit an attribute table as JSON with 4-space indentation.
pub fn emit_attributes(attributes: &NodeAttributes) -> FormatResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    attributes.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| FormatError::Json(e.to_string()))
}

/// Read and parse an attribute file.
pub fn read_attributes(path: &Path) -> FormatResult<NodeAttributes> {
    let attributes = parse_attributes(&read_file(path)?)?;
    debug!("Read {} node attributes from {}", attributes.len(), path.display());
    Ok(attributes)
}

/// Write an attribute file.
pub fn write_attributes(path: &Path, attributes: &NodeAttributes) -> FormatResult<()> {
    write_file(path, &emit_attributes(attributes)?)
}
