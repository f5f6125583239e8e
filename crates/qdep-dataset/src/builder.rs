//! Execution step: materialise a plan into a sample store.

use tracing::{debug, info};

use qdep_ir::DependencyEdge;

use crate::enumerate::Variant;
use crate::error::{DatasetError, DatasetResult};
use crate::features::NodeFeatures;
use crate::plan::DatasetPlan;
use crate::replicate::SampleReplicator;
use crate::store::SampleStore;

/// Outcome of one execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Samples written in this run.
    pub written: usize,
    /// Samples already present and left untouched.
    pub skipped: usize,
}

impl BuildReport {
    /// Samples covered by this run.
    pub fn total(&self) -> usize {
        self.written + self.skipped
    }
}

/// Writes every sample of a plan into a store.
#[derive(Debug)]
pub struct DatasetBuilder<'a> {
    plan: &'a DatasetPlan,
    base_edges: &'a [DependencyEdge],
    features: &'a NodeFeatures,
    overwrite: bool,
}

impl<'a> DatasetBuilder<'a> {
    /// Check that the inputs agree with the plan.
    pub fn new(
        plan: &'a DatasetPlan,
        base_edges: &'a [DependencyEdge],
        features: &'a NodeFeatures,
    ) -> DatasetResult<Self> {
        if base_edges.len() != plan.num_edges() {
            return Err(DatasetError::Validation(format!(
                "plan expects {} edges, got {}",
                plan.num_edges(),
                base_edges.len()
            )));
        }
        if features.len() != plan.num_gates() {
            return Err(DatasetError::Validation(format!(
                "plan expects {} gates, got {} feature rows",
                plan.num_gates(),
                features.len()
            )));
        }
        if let Some(edge) = base_edges
            .iter()
            .find(|e| e.source >= features.len() || e.destination >= features.len())
        {
            return Err(DatasetError::Validation(format!(
                "edge {edge} references a gate outside 0..{}",
                features.len()
            )));
        }

        Ok(Self {
            plan,
            base_edges,
            features,
            overwrite: false,
        })
    }

    /// Rewrite samples that are already stored.
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Materialise the plan.
    pub fn execute<S: SampleStore + ?Sized>(&self, store: &mut S) -> DatasetResult<BuildReport> {
        self.execute_with_progress(store, |_| {})
    }

    /// Materialise the plan, calling `on_sample` with each finished position.
    ///
    /// Positions come from the plan, not from a running counter, and a
    /// variant whose copies are all stored is never materialised.
    pub fn execute_with_progress<S, F>(
        &self,
        store: &mut S,
        mut on_sample: F,
    ) -> DatasetResult<BuildReport>
    where
        S: SampleStore + ?Sized,
        F: FnMut(usize),
    {
        let replicator = SampleReplicator::new(self.plan.replicas());
        let mut report = BuildReport::default();

        info!(
            "Building {} samples ({} variants x {} replicas)",
            self.plan.len(),
            self.plan.num_variants(),
            self.plan.replicas()
        );

        for spec in self.plan.variants() {
            let positions: Vec<usize> = (0..self.plan.replicas())
                .filter_map(|replica| self.plan.position_of(spec.label, replica))
                .collect();

            let pending: Vec<bool> = positions
                .iter()
                .map(|p| self.overwrite || !store.contains(*p))
                .collect();

            if !pending.contains(&true) {
                debug!("variant {}: all replicas present", spec.label);
                report.skipped += positions.len();
                positions.iter().for_each(|p| on_sample(*p));
                continue;
            }

            let variant = Variant {
                label: spec.label,
                window: spec.window,
                edges: spec.apply(self.base_edges),
            };

            for ((position, sample), write) in positions
                .iter()
                .zip(replicator.replicate(&variant, self.features))
                .zip(pending)
            {
                if write {
                    store.write(*position, &sample)?;
                    report.written += 1;
                } else {
                    report.skipped += 1;
                }
                on_sample(*position);
            }
        }

        info!(
            "Build finished: {} written, {} already present",
            report.written, report.skipped
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replicate::Sample;
    use crate::store::MemoryStore;

    fn fixture() -> (DatasetPlan, Vec<DependencyEdge>, NodeFeatures) {
        let edges: Vec<DependencyEdge> = (0..4).map(|i| DependencyEdge::new(i, i + 1)).collect();
        let features = NodeFeatures::new(vec![[1.0, 0.0, 1.0]; 5]);
        let plan = DatasetPlan::new(5, 4, 2, 10).unwrap();
        (plan, edges, features)
    }

    #[test]
    fn test_execute_writes_every_position() {
        let (plan, edges, features) = fixture();
        let mut store = MemoryStore::new();
        let mut seen = Vec::new();

        let report = DatasetBuilder::new(&plan, &edges, &features)
            .unwrap()
            .execute_with_progress(&mut store, |p| seen.push(p))
            .unwrap();

        assert_eq!(report, BuildReport { written: 80, skipped: 0 });
        assert_eq!(store.len(), 80);
        assert_eq!(seen, (0..80).collect::<Vec<_>>());

        assert_eq!(store.read(0).unwrap().edges, edges);
        assert_eq!(store.read(9).unwrap().label, 0);
        let s10 = store.read(10).unwrap();
        assert_eq!(s10.label, 1);
        assert_eq!(s10.edges, edges[1..].to_vec());
    }

    #[test]
    fn test_execute_is_idempotent() {
        let (plan, edges, features) = fixture();
        let mut store = MemoryStore::new();
        let builder = DatasetBuilder::new(&plan, &edges, &features).unwrap();

        builder.execute(&mut store).unwrap();
        let again = builder.execute(&mut store).unwrap();
        assert_eq!(again, BuildReport { written: 0, skipped: 80 });

        let forced = builder.overwrite(true).execute(&mut store).unwrap();
        assert_eq!(forced.written, 80);
    }

    #[test]
    fn test_execute_fills_gaps() {
        let (plan, edges, features) = fixture();
        let mut store = MemoryStore::new();
        let builder = DatasetBuilder::new(&plan, &edges, &features).unwrap();
        let sample = Sample {
            node_features: features.clone(),
            edges: edges.clone(),
            label: 0,
        };
        store.write(3, &sample).unwrap();

        let report = builder.execute(&mut store).unwrap();
        assert_eq!(report, BuildReport { written: 79, skipped: 1 });
    }

    #[test]
    fn test_rejects_mismatched_inputs() {
        let (plan, edges, features) = fixture();
        assert!(DatasetBuilder::new(&plan, &edges[..3], &features).is_err());

        let short = NodeFeatures::new(vec![[1.0, 0.0, 1.0]; 2]);
        assert!(DatasetBuilder::new(&plan, &edges, &short).is_err());
    }
}
