//! Canonical node ranges
//!
//! Node = half-open interval [start, end) of leaf positions, tagged with
//! its slot in the node array.
//! Children computed via midpoint: m = (start + end) / 2
//!   Left child:  [start, m)
//!   Right child: [m, end)

use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

use super::layout;

/// How a node's range relates to a query range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Node range lies inside the query; its stored aggregate is used as is.
    Contained,
    /// Node range shares no position with the query.
    Disjoint,
    /// Node range straddles a query boundary; descend into both children.
    Partial,
}

/// A tree node together with the leaf positions it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct NodeSpan {
    /// Slot in the node array.
    pub id: usize,

    /// First covered leaf position (inclusive).
    pub start: usize,

    /// One past the last covered leaf position.
    pub end: usize,
}

impl NodeSpan {
    /// Root span covering `[0, leaves)`.
    pub fn root(leaves: usize) -> Self {
        Self {
            id: layout::ROOT,
            start: 0,
            end: leaves,
        }
    }

    /// Number of leaf positions covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no leaves (never true for spans built by the tree).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if leaf (unit interval)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.len() == 1
    }

    /// Split point between the two children.
    #[inline]
    pub fn midpoint(&self) -> usize {
        (self.start + self.end) / 2
    }

    /// Get children via midpoint split
    ///
    /// Returns: ([start, mid), [mid, end))
    pub fn children(&self) -> (NodeSpan, NodeSpan) {
        debug_assert!(!self.is_leaf(), "Leaf has no children");

        let mid = self.midpoint();
        let left = NodeSpan {
            id: layout::left_child(self.id),
            start: self.start,
            end: mid,
        };
        let right = NodeSpan {
            id: layout::right_child(self.id),
            start: mid,
            end: self.end,
        };

        (left, right)
    }

    /// Classify this span against the query range `[start, end)`.
    ///
    /// Containment is tested first, so a unit span is never `Partial`.
    pub fn overlap(&self, start: usize, end: usize) -> Overlap {
        if start <= self.start && self.end <= end {
            Overlap::Contained
        } else if end <= self.start || self.end <= start {
            Overlap::Disjoint
        } else {
            Overlap::Partial
        }
    }
}

impl fmt::Display for NodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}[{}, {})", self.id, self.start, self.end)
    }
}
