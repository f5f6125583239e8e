//! Directory-backed dataset façade.
//!
//! ```text
//! <root>/raw/<name>_attr.json
//! <root>/raw/<name>_dependency.edges
//! <root>/processed/<name>_<position>.json
//! <root>/processed/manifest.json
//! ```
//!
//! Opening a dataset only reads the raw inputs and plans the layout;
//! [`CircuitDataset::process`] is the explicit step that writes samples and
//! the only one that creates `processed/`.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use qdep_formats::{FormatError, read_attributes, read_edges};
use qdep_ir::DependencyEdge;

use crate::builder::{BuildReport, DatasetBuilder};
use crate::config::DatasetConfig;
use crate::error::{DatasetError, DatasetResult};
use crate::features::NodeFeatures;
use crate::manifest::{DatasetManifest, input_fingerprint};
use crate::plan::DatasetPlan;
use crate::replicate::Sample;
use crate::store::{DirectoryStore, SampleStore};

/// Raw attribute file name for a circuit.
pub fn attributes_file_name(name: &str) -> String {
    format!("{name}_attr.json")
}

/// Raw edge-list file name for a circuit.
pub fn edges_file_name(name: &str) -> String {
    format!("{name}_dependency.edges")
}

/// A circuit's augmented dataset rooted at a directory.
#[derive(Debug)]
pub struct CircuitDataset {
    root: PathBuf,
    name: String,
    plan: DatasetPlan,
    base_edges: Vec<DependencyEdge>,
    features: NodeFeatures,
    fingerprint: String,
    store: DirectoryStore,
}

/// Raw inputs that exist but cannot be read count as missing.
fn raw_input_error(err: FormatError) -> DatasetError {
    match err {
        FormatError::Io { path, message } => {
            DatasetError::NotFound(format!("{} is unreadable: {}", path.display(), message))
        }
        other => other.into(),
    }
}

impl CircuitDataset {
    /// Read the raw inputs and plan the dataset.
    ///
    /// Fails if either raw file is missing, unreadable or malformed, if a gate tag is
    /// not in the configured feature map, or if an edge references a gate
    /// that has no attributes.
    pub fn open(
        root: impl Into<PathBuf>,
        name: impl Into<String>,
        config: &DatasetConfig,
    ) -> DatasetResult<Self> {
        let root = root.into();
        let name = name.into();
        let raw = root.join("raw");

        let attributes =
            read_attributes(&raw.join(attributes_file_name(&name))).map_err(raw_input_error)?;
        let base_edges = read_edges(&raw.join(edges_file_name(&name))).map_err(raw_input_error)?;
        let features = NodeFeatures::from_attributes(&attributes, &config.feature_map)?;

        let plan = DatasetPlan::new(
            features.len(),
            base_edges.len(),
            config.max_window,
            config.replicas,
        )?;

        // Validates edge endpoints against the gate count.
        DatasetBuilder::new(&plan, &base_edges, &features)?;

        let fingerprint = input_fingerprint(&base_edges, &features);
        let store = DirectoryStore::new(root.join("processed"), name.clone()).pretty(config.pretty);

        info!(
            "Opened dataset '{}': {} gates, {} edges, {} samples",
            name,
            plan.num_gates(),
            plan.num_edges(),
            plan.len()
        );

        Ok(Self {
            root,
            name,
            plan,
            base_edges,
            features,
            fingerprint,
            store,
        })
    }

    /// Dataset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The layout of this dataset.
    pub fn plan(&self) -> &DatasetPlan {
        &self.plan
    }

    /// Base edge list read from the raw edge file.
    pub fn base_edges(&self) -> &[DependencyEdge] {
        &self.base_edges
    }

    /// Node features shared by every sample.
    pub fn features(&self) -> &NodeFeatures {
        &self.features
    }

    /// Number of samples, known without materialising any.
    pub fn len(&self) -> usize {
        self.plan.len()
    }

    /// Check if the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    /// Fingerprint of the base edges and feature rows.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Processed file names in position order.
    pub fn processed_file_names(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len()).map(|p| self.store.file_name(p))
    }

    /// Check if every sample is stored under a matching manifest.
    pub fn is_processed(&self) -> DatasetResult<bool> {
        let manifest_ok = DatasetManifest::load(self.store.dir())?
            .is_some_and(|m| m.matches(&self.name, &self.plan, &self.fingerprint));
        Ok(manifest_ok && (0..self.len()).all(|p| self.store.contains(p)))
    }

    /// Write missing samples.
    pub fn process(&mut self) -> DatasetResult<BuildReport> {
        self.process_with_progress(|_| {})
    }

    /// Write missing samples, reporting each finished position.
    ///
    /// Samples left by a build with a different plan, different base edges or
    /// different feature rows are rewritten.
    pub fn process_with_progress<F: FnMut(usize)>(
        &mut self,
        on_sample: F,
    ) -> DatasetResult<BuildReport> {
        self.store.ensure_dir()?;

        let stale = match DatasetManifest::load(self.store.dir())? {
            Some(m) => !m.matches(&self.name, &self.plan, &self.fingerprint),
            None => false,
        };
        if stale {
            warn!(
                "Processed samples in {} were built from different inputs; rebuilding",
                self.store.dir().display()
            );
        }

        let report = DatasetBuilder::new(&self.plan, &self.base_edges, &self.features)?
            .overwrite(stale)
            .execute_with_progress(&mut self.store, on_sample)?;

        DatasetManifest::capture(&self.name, &self.plan, &self.fingerprint)
            .save(self.store.dir())?;
        Ok(report)
    }

    /// Load the stored sample at `position`.
    pub fn get(&self, position: usize) -> DatasetResult<Sample> {
        self.plan.resolve(position)?;
        self.store.read(position)
    }

    /// Compute the sample at `position` without touching the store.
    pub fn sample_at(&self, position: usize) -> DatasetResult<Sample> {
        let resolved = self.plan.resolve(position)?;
        Ok(Sample {
            node_features: self.features.clone(),
            edges: resolved.variant.apply(&self.base_edges),
            label: resolved.variant.label,
        })
    }
}
