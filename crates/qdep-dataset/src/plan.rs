//! Dataset planning: sizing and position resolution without I/O.
//!
//! Positions are laid out as
//!
//! ```text
//! [full graph × R] [w=1, offset 0 × R] ... [w=1, offset m-1 × R] [w=2, offset 0 × R] ...
//! ```
//!
//! so every position maps to a `(variant, replica)` pair by arithmetic alone.

use serde::{Deserialize, Serialize};

use qdep_ir::DependencyEdge;

use crate::enumerate::{
    EdgeWindow, checked_variant_count, removal_windows, variant_count, windows_of_size,
};
use crate::error::{DatasetError, DatasetResult};

/// A variant identified by label and removal window, without its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Dense generation-order label.
    pub label: usize,
    /// Removed window; `None` for the full graph.
    pub window: Option<EdgeWindow>,
}

impl VariantSpec {
    /// Materialise the variant's edge list from the base edges.
    pub fn apply(&self, base: &[DependencyEdge]) -> Vec<DependencyEdge> {
        match self.window {
            Some(w) => w.apply(base),
            None => base.to_vec(),
        }
    }

    /// Check if this is the unreduced graph.
    pub fn is_full(&self) -> bool {
        self.window.is_none()
    }
}

/// Where a dataset position lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePosition {
    /// The position that was resolved.
    pub position: usize,
    /// Variant stored at this position.
    pub variant: VariantSpec,
    /// Copy index within the variant, `0..replicas`.
    pub replica: usize,
}

/// Deterministic layout of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPlan {
    num_gates: usize,
    num_edges: usize,
    max_window: usize,
    replicas: usize,
}

impl DatasetPlan {
    /// Plan a dataset.
    ///
    /// `replicas` must be at least 1, and the total sample count must fit
    /// in a `usize`.
    pub fn new(
        num_gates: usize,
        num_edges: usize,
        max_window: usize,
        replicas: usize,
    ) -> DatasetResult<Self> {
        if replicas == 0 {
            return Err(DatasetError::Validation(
                "replicas must be greater than 0".into(),
            ));
        }
        checked_variant_count(num_edges, max_window)
            .and_then(|variants| variants.checked_mul(replicas))
            .ok_or_else(|| {
                DatasetError::Validation(format!(
                    "dataset of {num_edges} edges, window {max_window} and {replicas} replicas \
                     has more samples than fit in a usize"
                ))
            })?;
        Ok(Self {
            num_gates,
            num_edges,
            max_window,
            replicas,
        })
    }

    /// Number of gates (graph vertices).
    pub fn num_gates(&self) -> usize {
        self.num_gates
    }

    /// Number of base edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Largest removal window.
    pub fn max_window(&self) -> usize {
        self.max_window
    }

    /// Copies per variant.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Number of variants.
    pub fn num_variants(&self) -> usize {
        variant_count(self.num_edges, self.max_window)
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.replicas.saturating_mul(self.num_variants())
    }

    /// A plan always holds at least the full-graph variant.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of the first variant removing `window` edges.
    ///
    /// `None` when no window of that size fits.
    pub fn first_label_of_window(&self, window: usize) -> Option<usize> {
        if windows_of_size(self.num_edges, window) == 0 || window > self.max_window {
            return None;
        }
        Some(
            1 + (1..window)
                .map(|w| windows_of_size(self.num_edges, w))
                .sum::<usize>(),
        )
    }

    /// Variants in generation order.
    pub fn variants(&self) -> impl Iterator<Item = VariantSpec> {
        removal_windows(self.num_edges, self.max_window)
            .enumerate()
            .map(|(label, window)| VariantSpec { label, window })
    }

    /// Look up a variant by label.
    pub fn variant(&self, label: usize) -> Option<VariantSpec> {
        if label == 0 {
            return Some(VariantSpec {
                label,
                window: None,
            });
        }

        let mut rest = label - 1;
        for len in 1..=self.max_window.min(self.num_edges) {
            let count = windows_of_size(self.num_edges, len);
            if rest < count {
                return Some(VariantSpec {
                    label,
                    window: Some(EdgeWindow::new(rest, len)),
                });
            }
            rest -= count;
        }
        None
    }

    /// Resolve a position to its variant and replica.
    pub fn resolve(&self, position: usize) -> DatasetResult<SamplePosition> {
        let out_of_range = || DatasetError::PositionOutOfRange {
            position,
            len: self.len(),
        };
        if position >= self.len() {
            return Err(out_of_range());
        }
        let variant = self.variant(position / self.replicas).ok_or_else(out_of_range)?;
        Ok(SamplePosition {
            position,
            variant,
            replica: position % self.replicas,
        })
    }

    /// Inverse of [`resolve`](Self::resolve).
    pub fn position_of(&self, label: usize, replica: usize) -> Option<usize> {
        (label < self.num_variants() && replica < self.replicas)
            .then(|| label * self.replicas + replica)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_4_2_10() -> DatasetPlan {
        DatasetPlan::new(5, 4, 2, 10).unwrap()
    }

    #[test]
    fn test_plan_size() {
        let plan = plan_4_2_10();
        assert_eq!(plan.num_variants(), 8);
        assert_eq!(plan.len(), 80);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_resolve_boundaries() {
        let plan = plan_4_2_10();

        let p0 = plan.resolve(0).unwrap();
        assert!(p0.variant.is_full());
        assert_eq!((p0.variant.label, p0.replica), (0, 0));

        let p9 = plan.resolve(9).unwrap();
        assert!(p9.variant.is_full());
        assert_eq!(p9.replica, 9);

        let p10 = plan.resolve(10).unwrap();
        assert_eq!(p10.variant.label, 1);
        assert_eq!(p10.variant.window, Some(EdgeWindow::new(0, 1)));
        assert_eq!(p10.replica, 0);

        let p50 = plan.resolve(50).unwrap();
        assert_eq!(p50.variant.window, Some(EdgeWindow::new(0, 2)));

        let last = plan.resolve(79).unwrap();
        assert_eq!(last.variant.label, 7);
        assert_eq!(last.variant.window, Some(EdgeWindow::new(2, 2)));
        assert_eq!(last.replica, 9);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let plan = plan_4_2_10();
        assert!(matches!(
            plan.resolve(80),
            Err(DatasetError::PositionOutOfRange { position: 80, len: 80 })
        ));
    }

    #[test]
    fn test_variants_match_lookup() {
        let plan = DatasetPlan::new(9, 6, 4, 3).unwrap();
        let listed: Vec<VariantSpec> = plan.variants().collect();
        assert_eq!(listed.len(), plan.num_variants());
        for spec in &listed {
            assert_eq!(plan.variant(spec.label), Some(*spec));
        }
        assert_eq!(plan.variant(plan.num_variants()), None);
    }

    #[test]
    fn test_position_of_inverts_resolve() {
        let plan = plan_4_2_10();
        for position in 0..plan.len() {
            let resolved = plan.resolve(position).unwrap();
            assert_eq!(
                plan.position_of(resolved.variant.label, resolved.replica),
                Some(position)
            );
        }
        assert_eq!(plan.position_of(8, 0), None);
        assert_eq!(plan.position_of(0, 10), None);
    }

    #[test]
    fn test_first_label_of_window() {
        let plan = plan_4_2_10();
        assert_eq!(plan.first_label_of_window(1), Some(1));
        assert_eq!(plan.first_label_of_window(2), Some(5));
        assert_eq!(plan.first_label_of_window(3), None);
        assert_eq!(plan.first_label_of_window(0), None);
    }

    #[test]
    fn test_zero_replicas_rejected() {
        assert!(DatasetPlan::new(3, 2, 1, 0).is_err());
    }

    #[test]
    fn test_oversized_plan_rejected() {
        let err = DatasetPlan::new(5, 4, 2, usize::MAX).unwrap_err();
        assert!(matches!(err, DatasetError::Validation(_)));

        let err = DatasetPlan::new(5, usize::MAX, 1, 1).unwrap_err();
        assert!(matches!(err, DatasetError::Validation(_)));

        // The largest replica count that still fits.
        let plan = DatasetPlan::new(5, 4, 2, usize::MAX / 8).unwrap();
        assert_eq!(plan.len(), usize::MAX / 8 * 8);
    }

    #[test]
    fn test_window_beyond_edges() {
        let plan = DatasetPlan::new(3, 2, 5, 1).unwrap();
        assert_eq!(plan.num_variants(), 1 + 2 + 1);
        assert_eq!(plan.variants().count(), 4);
        assert_eq!(plan.first_label_of_window(3), None);
    }
}
