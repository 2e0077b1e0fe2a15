//! Array-backed segment tree over a monoid
//!
//! Build once, query many:
//! 1. **Leaves**: copy the `n` input values into slots `[L - 1, L - 1 + n)`,
//!    where `L` is the next power of two ≥ `max(n, 1)`
//! 2. **Padding**: fill the remaining `L - n` leaves with the identity
//! 3. **Internal nodes**: `tree[i] = combine(tree[2i + 1], tree[2i + 2])`,
//!    for `i` from `L - 2` down to `0`
//!
//! A query for `[start, end)` walks down from the root. Nodes inside the
//! range return their stored aggregate, nodes outside return the identity,
//! and straddling nodes combine their children left before right.
//!
//! Build: O(n) combines. Query: at most `4 log2(L) + 1` visited nodes.

pub mod layout;
mod profile;
mod span;

pub use profile::QueryProfile;
pub use span::{NodeSpan, Overlap};

use std::fmt;
use std::ops::{Bound, RangeBounds};

use tracing::{debug, trace};

use crate::monoid::{FnMonoid, Monoid};
use crate::RangeFoldError;

/// Immutable range-fold index over a snapshot of a sequence.
///
/// ```
/// use rangefold::{monoid::Sum, SegmentTree};
///
/// let tree = SegmentTree::build(vec![3, -1, 4, 1, 5], Sum::<i32>::new())?;
/// assert_eq!(tree.query(1, 4)?, 4);
/// assert_eq!(tree.query(0, 5)?, 12);
/// assert_eq!(tree.query(2, 2)?, 0);
/// # Ok::<(), rangefold::RangeFoldError>(())
/// ```
pub struct SegmentTree<M: Monoid> {
    /// Complete binary tree, `2L - 1` slots
    nodes: Vec<M::Value>,

    /// Number of caller-supplied values `n`
    len: usize,

    /// Leaf count `L` (power of two)
    leaves: usize,

    identity: M::Value,
    monoid: M,
}

impl<M> SegmentTree<M>
where
    M: Monoid,
    M::Value: PartialEq,
{
    /// Build the tree from `values` with the given combine strategy.
    ///
    /// Fails with [`RangeFoldError::IdentityViolation`] when
    /// `combine(e, e) != e`. That single probe is the only check performed;
    /// associativity and two-sidedness of the identity stay the caller's
    /// responsibility.
    pub fn build<I>(values: I, monoid: M) -> Result<Self, RangeFoldError>
    where
        I: IntoIterator<Item = M::Value>,
    {
        let identity = monoid.identity();
        if monoid.combine(&identity, &identity) != identity {
            debug!("identity spot-check failed: combine(e, e) != e");
            return Err(RangeFoldError::IdentityViolation);
        }

        let values: Vec<M::Value> = values.into_iter().collect();
        let len = values.len();
        let leaves = layout::leaf_count_for(len);
        let first_leaf = layout::first_leaf(leaves);
        let node_count = layout::node_count(leaves);

        // internal slots are overwritten below
        let mut nodes = Vec::with_capacity(node_count);
        nodes.resize(first_leaf, identity.clone());
        nodes.extend(values);
        nodes.resize(node_count, identity.clone());

        for node in (0..first_leaf).rev() {
            nodes[node] = monoid.combine(
                &nodes[layout::left_child(node)],
                &nodes[layout::right_child(node)],
            );
        }

        debug!(len, leaves, nodes = node_count, "built segment tree");

        Ok(Self {
            nodes,
            len,
            leaves,
            identity,
            monoid,
        })
    }
}

impl<V, F> SegmentTree<FnMonoid<V, F>>
where
    V: Clone + PartialEq,
    F: Fn(&V, &V) -> V,
{
    /// Build from an identity value and a closure.
    ///
    /// ```
    /// use rangefold::SegmentTree;
    ///
    /// let words = ["a", "b", "c"].map(String::from);
    /// let tree = SegmentTree::from_fn(words, String::new(), |a: &String, b: &String| {
    ///     format!("{a}{b}")
    /// })?;
    /// assert_eq!(tree.query(0, 3)?, "abc");
    /// # Ok::<(), rangefold::RangeFoldError>(())
    /// ```
    pub fn from_fn<I>(values: I, identity: V, op: F) -> Result<Self, RangeFoldError>
    where
        I: IntoIterator<Item = V>,
    {
        Self::build(values, FnMonoid::new(identity, op))
    }
}

impl<M: Monoid> SegmentTree<M> {
    /// Fold `values[start..end)` left to right, starting from the identity.
    ///
    /// An empty range yields the identity. Ranges with `start > end` or
    /// `end > len()` are rejected.
    pub fn query(&self, start: usize, end: usize) -> Result<M::Value, RangeFoldError> {
        self.query_profiled(start, end).map(|(value, _)| value)
    }

    /// Like [`SegmentTree::query`], also reporting how the range decomposed.
    pub fn query_profiled(
        &self,
        start: usize,
        end: usize,
    ) -> Result<(M::Value, QueryProfile), RangeFoldError> {
        self.check_range(start, end)?;

        let mut profile = QueryProfile::default();
        if start == end {
            return Ok((self.identity.clone(), profile));
        }

        let value = self.fold_span(NodeSpan::root(self.leaves), start, end, 0, &mut profile);
        trace!(
            start,
            end,
            visited = profile.visited_nodes,
            canonical = profile.canonical_nodes,
            "range query"
        );
        Ok((value, profile))
    }

    /// Fold any `usize` range expression, e.g. `2..`, `..=3` or `..`.
    pub fn query_range<R: RangeBounds<usize>>(&self, range: R) -> Result<M::Value, RangeFoldError> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        self.query(start, end)
    }

    /// Aggregate of the whole sequence (the root).
    pub fn total(&self) -> M::Value {
        self.nodes[layout::ROOT].clone()
    }

    /// Number of values the tree was built from.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree was built from an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of leaves after power-of-two padding.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Total number of stored nodes (`2 * leaf_count() - 1`).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Levels below the root.
    pub fn height(&self) -> usize {
        layout::height(self.leaves)
    }

    /// Identity element supplied at build time.
    pub fn identity(&self) -> &M::Value {
        &self.identity
    }

    /// Combine strategy the tree was built with.
    pub fn monoid(&self) -> &M {
        &self.monoid
    }

    /// Stored aggregate of node `id`, in array order.
    pub fn node(&self, id: usize) -> Option<&M::Value> {
        self.nodes.get(id)
    }

    /// The original values, in order, without padding.
    pub fn leaves(&self) -> &[M::Value] {
        let first = layout::first_leaf(self.leaves);
        &self.nodes[first..first + self.len]
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), RangeFoldError> {
        if start > end {
            return Err(RangeFoldError::InvalidRange { start, end });
        }
        if end > self.len {
            return Err(RangeFoldError::OutOfBounds { end, len: self.len });
        }
        Ok(())
    }

    fn fold_span(
        &self,
        span: NodeSpan,
        start: usize,
        end: usize,
        depth: usize,
        profile: &mut QueryProfile,
    ) -> M::Value {
        profile.enter(depth);

        match span.overlap(start, end) {
            Overlap::Contained => {
                profile.canonical_nodes += 1;
                self.nodes[span.id].clone()
            }
            Overlap::Disjoint => {
                profile.pruned_nodes += 1;
                self.identity.clone()
            }
            Overlap::Partial => {
                let (left, right) = span.children();
                let left_value = self.fold_span(left, start, end, depth + 1, profile);
                let right_value = self.fold_span(right, start, end, depth + 1, profile);
                self.monoid.combine(&left_value, &right_value)
            }
        }
    }
}

impl<M> fmt::Debug for SegmentTree<M>
where
    M: Monoid + fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("len", &self.len)
            .field("leaves", &self.leaves)
            .field("identity", &self.identity)
            .field("monoid", &self.monoid)
            .field("nodes", &self.nodes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monoid::{Concat, Min, Sum};

    fn naive_sum(values: &[i64], start: usize, end: usize) -> i64 {
        values[start..end].iter().sum()
    }

    #[test]
    fn internal_nodes_combine_children() {
        let tree = SegmentTree::build(vec![5i64, 3, 8, 1, 4], Sum::new()).unwrap();
        let first_leaf = layout::first_leaf(tree.leaf_count());

        for id in 0..first_leaf {
            let expected = tree.node(layout::left_child(id)).unwrap()
                + tree.node(layout::right_child(id)).unwrap();
            assert_eq!(tree.node(id), Some(&expected));
        }
    }

    #[test]
    fn padding_leaves_hold_identity() {
        let tree = SegmentTree::build(vec![5i64, 3, 8, 1, 4], Min::new()).unwrap();
        assert_eq!(tree.leaf_count(), 8);
        assert_eq!(tree.node_count(), 15);

        let first_leaf = layout::first_leaf(tree.leaf_count());
        for id in first_leaf + tree.len()..tree.node_count() {
            assert_eq!(tree.node(id), Some(&i64::MAX));
        }
        assert_eq!(tree.leaves(), &[5, 3, 8, 1, 4]);
    }

    #[test]
    fn all_ranges_match_naive_fold() {
        let values: Vec<i64> = vec![7, -2, 0, 11, -9, 4, 4, 1, -6, 3, 2];
        let tree = SegmentTree::build(values.clone(), Sum::new()).unwrap();

        for start in 0..=values.len() {
            for end in start..=values.len() {
                assert_eq!(
                    tree.query(start, end).unwrap(),
                    naive_sum(&values, start, end),
                    "range [{}, {})",
                    start,
                    end
                );
            }
        }
    }

    #[test]
    fn concatenation_preserves_order() {
        let text = "segmenttree";
        let tree =
            SegmentTree::build(text.chars().map(String::from), Concat).unwrap();

        for start in 0..=text.len() {
            for end in start..=text.len() {
                assert_eq!(tree.query(start, end).unwrap(), &text[start..end]);
            }
        }
    }

    #[test]
    fn overflowing_total_does_not_disturb_fitting_ranges() {
        let tree = SegmentTree::build(vec![i64::MAX, 1], Sum::new()).unwrap();

        assert_eq!(tree.query(0, 1).unwrap(), i64::MAX);
        assert_eq!(tree.query(1, 2).unwrap(), 1);
        assert_eq!(tree.total(), i64::MIN);

        let wide = SegmentTree::build(vec![i128::from(i64::MAX), 1], Sum::new()).unwrap();
        assert_eq!(wide.total(), i128::from(i64::MAX) + 1);
    }

    #[test]
    fn empty_input_has_single_identity_leaf() {
        let tree = SegmentTree::build(Vec::<i64>::new(), Sum::new()).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.query(0, 0).unwrap(), 0);
        assert_eq!(tree.total(), 0);
        assert!(tree.leaves().is_empty());
    }

    #[test]
    fn rejects_bad_ranges() {
        let tree = SegmentTree::build(vec![1i64, 2, 3], Sum::new()).unwrap();

        assert!(matches!(
            tree.query(2, 1),
            Err(RangeFoldError::InvalidRange { start: 2, end: 1 })
        ));
        assert!(matches!(
            tree.query(0, 4),
            Err(RangeFoldError::OutOfBounds { end: 4, len: 3 })
        ));
        assert!(matches!(
            tree.query(4, 4),
            Err(RangeFoldError::OutOfBounds { end: 4, len: 3 })
        ));
    }

    #[test]
    fn identity_spot_check_fails_fast() {
        let result = SegmentTree::from_fn(vec![1i64, 2], 1, |a: &i64, b: &i64| a + b);
        assert!(matches!(result, Err(RangeFoldError::IdentityViolation)));
    }

    #[test]
    fn range_expressions_map_to_half_open() {
        let tree = SegmentTree::build(vec![1i64, 2, 3, 4], Sum::new()).unwrap();

        assert_eq!(tree.query_range(..).unwrap(), 10);
        assert_eq!(tree.query_range(1..3).unwrap(), 5);
        assert_eq!(tree.query_range(1..=3).unwrap(), 9);
        assert_eq!(tree.query_range(2..).unwrap(), 7);
        assert_eq!(tree.query_range(..=0).unwrap(), 1);
        assert!(tree.query_range(..=4).is_err());
    }

    #[test]
    fn full_range_uses_root_only() {
        let tree = SegmentTree::build(vec![1i64; 8], Sum::new()).unwrap();
        let (value, profile) = tree.query_profiled(0, 8).unwrap();

        assert_eq!(value, 8);
        assert_eq!(profile.visited_nodes, 1);
        assert_eq!(profile.canonical_nodes, 1);
        assert_eq!(profile.combine_calls(), 0);
    }

    #[test]
    fn every_query_respects_visit_bound() {
        for len in 0..=40usize {
            let tree = SegmentTree::build(vec![1i64; len], Sum::new()).unwrap();
            for start in 0..=len {
                for end in start..=len {
                    let (value, profile) = tree.query_profiled(start, end).unwrap();
                    assert_eq!(value, (end - start) as i64);
                    assert!(
                        profile.within_bound(tree.height()),
                        "len {} range [{}, {}) visited {}",
                        len,
                        start,
                        end,
                        profile.visited_nodes
                    );
                }
            }
        }
    }

    #[test]
    fn debug_lists_nodes() {
        let tree = SegmentTree::build(vec![2i64, 3], Sum::new()).unwrap();
        let rendered = format!("{:?}", tree);
        assert!(rendered.contains("nodes: [5, 2, 3]"));
    }
}
