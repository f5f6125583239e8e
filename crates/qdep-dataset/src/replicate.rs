//! Sample replication.

use serde::{Deserialize, Serialize};

use qdep_ir::DependencyEdge;

use crate::enumerate::{Variant, variant_count};
use crate::features::NodeFeatures;

/// One dataset sample: node features, surviving edges and class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Per-gate feature rows.
    pub node_features: NodeFeatures,
    /// Edges of the variant this sample replicates.
    pub edges: Vec<DependencyEdge>,
    /// Variant label.
    pub label: usize,
}

/// Emits a fixed number of identical samples per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleReplicator {
    replicas: usize,
}

impl SampleReplicator {
    /// Create a replicator emitting `replicas` copies per variant.
    pub fn new(replicas: usize) -> Self {
        Self { replicas }
    }

    /// Copies per variant.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Total sample count for `num_edges` base edges and `max_window`,
    /// saturating at `usize::MAX`.
    pub fn total_samples(&self, num_edges: usize, max_window: usize) -> usize {
        self.replicas.saturating_mul(variant_count(num_edges, max_window))
    }

    /// The samples for one variant; every copy is identical.
    pub fn replicate<'a>(
        &self,
        variant: &'a Variant,
        features: &'a NodeFeatures,
    ) -> impl Iterator<Item = Sample> + 'a {
        (0..self.replicas).map(move |_| Sample {
            node_features: features.clone(),
            edges: variant.edges.clone(),
            label: variant.label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::EdgeWindowEnumerator;

    #[test]
    fn test_ten_replicas_of_eight_variants() {
        let edges: Vec<DependencyEdge> = (0..4).map(|i| DependencyEdge::new(i, i + 1)).collect();
        let features = NodeFeatures::new(vec![[1.0, 0.0, 1.0]; 5]);
        let replicator = SampleReplicator::new(10);

        assert_eq!(replicator.total_samples(edges.len(), 2), 80);

        let mut total = 0;
        for variant in EdgeWindowEnumerator::new(&edges, 2).iter() {
            let samples: Vec<Sample> = replicator.replicate(&variant, &features).collect();
            assert_eq!(samples.len(), 10);
            assert!(samples.iter().all(|s| *s == samples[0]));
            assert_eq!(samples[0].label, variant.label);
            assert_eq!(samples[0].edges, variant.edges);
            assert_eq!(samples[0].node_features, features);
            total += samples.len();
        }
        assert_eq!(total, 80);
    }

    #[test]
    fn test_zero_replicas() {
        let replicator = SampleReplicator::new(0);
        assert_eq!(replicator.total_samples(4, 2), 0);
    }
}
