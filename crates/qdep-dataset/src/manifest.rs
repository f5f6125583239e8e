//! Manifest written next to processed samples.
//!
//! Records the plan and the inputs a processed directory was built from, so
//! a later run with different parameters, edited raw edges or another
//! feature map regenerates instead of reusing stale files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use qdep_ir::DependencyEdge;

use crate::error::{DatasetError, DatasetResult};
use crate::features::NodeFeatures;
use crate::plan::DatasetPlan;

/// Schema version of the manifest and sample files.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// File name of the manifest inside the processed directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Build record of a processed dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Schema version for forward compatibility.
    pub schema_version: String,
    /// qdep version that wrote the samples.
    pub qdep_version: String,
    /// Time the build finished.
    pub created: DateTime<Utc>,
    /// Circuit name.
    pub name: String,
    /// Layout the samples follow.
    pub plan: DatasetPlan,
    /// Number of variants.
    pub num_variants: usize,
    /// Number of samples.
    pub num_samples: usize,
    /// SHA-256 of the base edges and feature rows, see [`input_fingerprint`].
    #[serde(default)]
    pub fingerprint: String,
}

/// Hex SHA-256 over the base edge list and the feature rows.
///
/// Edges are hashed in order, so reordering them changes the fingerprint.
pub fn input_fingerprint(base_edges: &[DependencyEdge], features: &NodeFeatures) -> String {
    let mut hasher = Sha256::new();
    hasher.update((base_edges.len() as u64).to_le_bytes());
    for edge in base_edges {
        hasher.update((edge.source as u64).to_le_bytes());
        hasher.update((edge.destination as u64).to_le_bytes());
    }
    hasher.update((features.len() as u64).to_le_bytes());
    for row in features.rows() {
        for value in row {
            hasher.update(value.to_bits().to_le_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}

impl DatasetManifest {
    /// Capture a manifest for `plan` built from inputs with `fingerprint`.
    pub fn capture(name: &str, plan: &DatasetPlan, fingerprint: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.into(),
            qdep_version: env!("CARGO_PKG_VERSION").to_string(),
            created: Utc::now(),
            name: name.to_string(),
            plan: *plan,
            num_variants: plan.num_variants(),
            num_samples: plan.len(),
            fingerprint: fingerprint.to_string(),
        }
    }

    /// Check if samples built under this manifest follow `plan` and came
    /// from inputs with `fingerprint`.
    pub fn matches(&self, name: &str, plan: &DatasetPlan, fingerprint: &str) -> bool {
        self.schema_version == SCHEMA_VERSION
            && self.name == name
            && self.plan == *plan
            && self.fingerprint == fingerprint
    }

    /// Read `<dir>/manifest.json`, if present.
    pub fn load(dir: &Path) -> DatasetResult<Option<Self>> {
        let path = dir.join(MANIFEST_FILE);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DatasetError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Write `<dir>/manifest.json`.
    pub fn save(&self, dir: &Path) -> DatasetResult<()> {
        let path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .map_err(|e| DatasetError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
