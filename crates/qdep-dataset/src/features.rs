//! Gate-type feature mapping and per-node feature rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qdep_formats::NodeAttributes;
use qdep_ir::Gate;

use crate::error::{DatasetError, DatasetResult};

/// Two-qubit gate tags known to the reference mapping.
pub const REFERENCE_GATE_TAGS: &[&str] = &[
    "cx", "cy", "cz", "ch", "swap", "iswap", "ecr", "dcx", "cp", "cu1", "cu3", "cu", "crx",
    "cry", "crz", "csx", "rxx", "ryy", "rzz", "rzx",
];

/// Feature value the reference mapping assigns to every known tag.
pub const REFERENCE_GATE_FEATURE: f32 = 1.0;

/// Gate-type tag to numeric feature table.
///
/// Lookups are exact and case-sensitive. A tag that is not in the table is
/// an error, never a silent default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap {
    table: BTreeMap<String, f32>,
}

impl FeatureMap {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// The legacy mapping.
    ///
    /// Every tag in [`REFERENCE_GATE_TAGS`] maps to the same constant, so
    /// distinct gate types are indistinguishable in the node features.
    pub fn reference() -> Self {
        REFERENCE_GATE_TAGS
            .iter()
            .map(|tag| ((*tag).to_string(), REFERENCE_GATE_FEATURE))
            .collect()
    }

    /// Add or replace an entry.
    #[must_use]
    pub fn with(mut self, tag: impl Into<String>, value: f32) -> Self {
        self.insert(tag, value);
        self
    }

    /// Add or replace an entry in place.
    pub fn insert(&mut self, tag: impl Into<String>, value: f32) {
        self.table.insert(tag.into(), value);
    }

    /// Feature value for a tag, if known.
    pub fn get(&self, tag: &str) -> Option<f32> {
        self.table.get(tag).copied()
    }

    /// Feature value for the gate at `node`.
    pub fn encode(&self, node: usize, tag: &str) -> DatasetResult<f32> {
        self.get(tag).ok_or_else(|| DatasetError::UnknownGateType {
            gate: tag.to_string(),
            node,
        })
    }

    /// Number of known tags.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if no tags are known.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.table.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for FeatureMap {
    fn default() -> Self {
        Self::reference()
    }
}

impl FromIterator<(String, f32)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (String, f32)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, f32>> for FeatureMap {
    fn from(table: BTreeMap<String, f32>) -> Self {
        Self { table }
    }
}

/// One node's features: `[gate_feature, qubit_1, qubit_2]`.
pub type FeatureRow = [f32; 3];

/// Feature matrix, one row per gate in index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeFeatures(Vec<FeatureRow>);

impl NodeFeatures {
    /// Wrap existing rows.
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self(rows)
    }

    /// Build features from an attribute table.
    ///
    /// Keys must be dense from 0 and every gate tag must be in `map`.
    pub fn from_attributes(attributes: &NodeAttributes, map: &FeatureMap) -> DatasetResult<Self> {
        attributes.check_dense()?;
        attributes
            .iter()
            .map(|(node, attr)| {
                let gate = map.encode(node, &attr.gate)?;
                let (q1, q2) = attr.qubits(node)?;
                Ok([gate, q1, q2])
            })
            .collect::<DatasetResult<Vec<_>>>()
            .map(Self)
    }

    /// Build features directly from gates.
    pub fn from_gates(gates: &[Gate], map: &FeatureMap) -> DatasetResult<Self> {
        gates
            .iter()
            .map(|g| {
                Ok([
                    map.encode(g.index, &g.kind)?,
                    g.control.as_f32(),
                    g.target.as_f32(),
                ])
            })
            .collect::<DatasetResult<Vec<_>>>()
            .map(Self)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All rows.
    pub fn rows(&self) -> &[FeatureRow] {
        &self.0
    }
}
