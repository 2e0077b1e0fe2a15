//! Per-query traversal accounting

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Counters collected while decomposing one query range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct QueryProfile {
    /// Nodes the decomposition touched.
    pub visited_nodes: usize,

    /// Nodes fully inside the range whose stored aggregate was used.
    pub canonical_nodes: usize,

    /// Nodes outside the range that contributed the identity.
    pub pruned_nodes: usize,

    /// Deepest level reached (root is level 0).
    pub max_depth: usize,
}

impl QueryProfile {
    /// Record a visit at `depth`.
    pub(crate) fn enter(&mut self, depth: usize) {
        self.visited_nodes += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Number of `combine` calls made, one per partially covered node.
    pub fn combine_calls(&self) -> usize {
        self.visited_nodes - self.canonical_nodes - self.pruned_nodes
    }

    /// Upper bound on visited nodes for a tree of the given height.
    ///
    /// At most two nodes per level straddle a range boundary, so every
    /// level below the root sees at most four visits.
    pub fn visit_bound(height: usize) -> usize {
        4 * height + 1
    }

    /// Whether this profile respects [`QueryProfile::visit_bound`].
    pub fn within_bound(&self, height: usize) -> bool {
        self.visited_nodes <= Self::visit_bound(height)
    }
}
