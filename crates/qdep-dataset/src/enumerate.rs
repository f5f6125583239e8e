//! Edge-window enumeration: the augmentation scheme behind the dataset.
//!
//! The full edge list comes first, then every contiguous window of 1 edge
//! removed, then every window of 2 edges, and so on up to the maximum window
//! size. Each variant gets the next label from a dense counter.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use qdep_ir::DependencyEdge;

/// A contiguous run of edges removed from the base edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeWindow {
    /// Offset of the first removed edge.
    pub start: usize,
    /// Number of removed edges.
    pub len: usize,
}

impl EdgeWindow {
    /// Create a new window.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last removed edge.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// `edges` with this window removed, order preserved.
    ///
    /// A window reaching past the end removes only what is there.
    pub fn apply<T: Clone>(&self, edges: &[T]) -> Vec<T> {
        let start = self.start.min(edges.len());
        let end = self.end().min(edges.len());
        let mut out = Vec::with_capacity(edges.len() - (end - start));
        out.extend_from_slice(&edges[..start]);
        out.extend_from_slice(&edges[end..]);
        out
    }
}

impl fmt::Display for EdgeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Number of windows of size `window` in a list of `num_edges` edges.
///
/// Zero when the window is empty or longer than the list.
pub fn windows_of_size(num_edges: usize, window: usize) -> usize {
    if window == 0 || window > num_edges {
        0
    } else {
        num_edges - window + 1
    }
}

/// Total number of variants: `1 + Σ_{w=1}^{W} (m − w + 1)` over the window
/// sizes that fit.
///
/// Saturates at `usize::MAX`; see [`checked_variant_count`].
pub fn variant_count(num_edges: usize, max_window: usize) -> usize {
    checked_variant_count(num_edges, max_window).unwrap_or(usize::MAX)
}

/// [`variant_count`], or `None` if the count does not fit in a `usize`.
pub fn checked_variant_count(num_edges: usize, max_window: usize) -> Option<usize> {
    (1..=max_window.min(num_edges))
        .map(|w| windows_of_size(num_edges, w))
        .try_fold(1usize, |acc, n| acc.checked_add(n))
}

/// Removal windows in generation order; `None` stands for the full graph.
pub fn removal_windows(
    num_edges: usize,
    max_window: usize,
) -> impl Iterator<Item = Option<EdgeWindow>> {
    std::iter::once(None).chain((1..=max_window.min(num_edges)).flat_map(move |len| {
        (0..windows_of_size(num_edges, len)).map(move |start| Some(EdgeWindow::new(start, len)))
    }))
}

/// One reduced-graph instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Dense generation-order label.
    pub label: usize,
    /// Removed window; `None` for the full graph.
    pub window: Option<EdgeWindow>,
    /// Remaining edges.
    pub edges: Vec<DependencyEdge>,
}

/// Enumerates every edge-window removal of a base edge list.
#[derive(Debug, Clone)]
pub struct EdgeWindowEnumerator<'a> {
    edges: &'a [DependencyEdge],
    max_window: usize,
    first_label: usize,
}

impl<'a> EdgeWindowEnumerator<'a> {
    /// Create an enumerator with labels starting at 0.
    pub fn new(edges: &'a [DependencyEdge], max_window: usize) -> Self {
        Self {
            edges,
            max_window,
            first_label: 0,
        }
    }

    /// Continue labelling from a running counter.
    #[must_use]
    pub fn starting_at(mut self, first_label: usize) -> Self {
        self.first_label = first_label;
        self
    }

    /// Number of variants this enumerator yields.
    pub fn count(&self) -> usize {
        variant_count(self.edges.len(), self.max_window)
    }

    /// The counter value after all variants have been labelled.
    pub fn next_label(&self) -> usize {
        self.first_label + self.count()
    }

    /// Variants in generation order.
    pub fn iter(&self) -> impl Iterator<Item = Variant> + 'a {
        let edges = self.edges;
        let first_label = self.first_label;
        removal_windows(edges.len(), self.max_window)
            .enumerate()
            .map(move |(i, window)| {
                let variant = Variant {
                    label: first_label + i,
                    window,
                    edges: match window {
                        Some(w) => w.apply(edges),
                        None => edges.to_vec(),
                    },
                };
                debug!(
                    "variant {}: {} edges{}",
                    variant.label,
                    variant.edges.len(),
                    window.map(|w| format!(", removed {w}")).unwrap_or_default()
                );
                variant
            })
    }
}
