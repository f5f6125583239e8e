//! Edge-Window Augmentation Datasets
//!
//! This crate turns one circuit's dependency graph into a labelled dataset of
//! reduced graphs. Each variant removes one contiguous window of the base
//! edge list, and every variant is stored as a fixed number of identical
//! samples sharing the circuit's node features.
//!
//! # Layout
//!
//! With `m` base edges and a maximum window `W`, variants are generated as
//!
//! 1. the full graph (label 0),
//! 2. every window of size 1 by ascending offset,
//! 3. every window of size 2 by ascending offset, up to size `min(W, m)`.
//!
//! Variant count is `1 + Σ_{w=1}^{min(W,m)} (m − w + 1)`, and sample `p` holds
//! variant `p / R`, copy `p % R`, for `R` replicas.
//!
//! # Pipeline
//!
//! ```text
//! raw/<name>_attr.json ──► NodeFeatures ─┐
//!                                         ├─► DatasetPlan ─► DatasetBuilder ─► SampleStore
//! raw/<name>_dependency.edges ───────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use qdep_dataset::{DatasetBuilder, DatasetPlan, MemoryStore, NodeFeatures, SampleStore};
//! use qdep_ir::DependencyEdge;
//!
//! let edges: Vec<DependencyEdge> = (0..4).map(|i| DependencyEdge::new(i, i + 1)).collect();
//! let features = NodeFeatures::new(vec![[1.0, 0.0, 1.0]; 5]);
//! let plan = DatasetPlan::new(5, edges.len(), 2, 10).unwrap();
//! assert_eq!(plan.len(), 80);
//!
//! let mut store = MemoryStore::new();
//! DatasetBuilder::new(&plan, &edges, &features)
//!     .unwrap()
//!     .execute(&mut store)
//!     .unwrap();
//!
//! let sample = store.read(10).unwrap();
//! assert_eq!(sample.label, 1);
//! assert_eq!(sample.edges, edges[1..].to_vec());
//! ```

pub mod builder;
pub mod config;
pub mod dataset;
pub mod enumerate;
pub mod error;
pub mod features;
pub mod manifest;
pub mod plan;
pub mod replicate;
pub mod store;

pub use builder::{BuildReport, DatasetBuilder};
pub use config::DatasetConfig;
pub use dataset::{CircuitDataset, attributes_file_name, edges_file_name};
pub use enumerate::{
    EdgeWindow, EdgeWindowEnumerator, Variant, checked_variant_count, removal_windows,
    variant_count, windows_of_size,
};
pub use error::{ConfigError, DatasetError, DatasetResult, ErrorKind};
pub use features::{FeatureMap, FeatureRow, NodeFeatures};
pub use manifest::{DatasetManifest, MANIFEST_FILE, SCHEMA_VERSION, input_fingerprint};
pub use plan::{DatasetPlan, SamplePosition, VariantSpec};
pub use replicate::{Sample, SampleReplicator};
pub use store::{DirectoryStore, MemoryStore, SampleStore};
