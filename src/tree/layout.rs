//! Index arithmetic for the array-backed complete binary tree
//!
//! Nodes live in one contiguous `Vec`:
//!   root:        0
//!   left child:  2i + 1
//!   right child: 2i + 2
//!   parent:      (i - 1) / 2
//! With `L` leaves (a power of two) there are `2L - 1` nodes and the
//! leaves occupy `[L - 1, 2L - 1)`.

/// Index of the root node.
pub const ROOT: usize = 0;

/// Smallest power of two that can hold `len` leaves (1 for an empty input).
#[inline]
pub fn leaf_count_for(len: usize) -> usize {
    len.max(1).next_power_of_two()
}

/// Total node count of a complete tree with `leaves` leaves.
#[inline]
pub fn node_count(leaves: usize) -> usize {
    2 * leaves - 1
}

/// Index of the leftmost leaf.
#[inline]
pub fn first_leaf(leaves: usize) -> usize {
    leaves - 1
}

/// Index of the left child of `node`.
#[inline]
pub fn left_child(node: usize) -> usize {
    2 * node + 1
}

/// Index of the right child of `node`.
#[inline]
pub fn right_child(node: usize) -> usize {
    2 * node + 2
}

/// Index of the parent of `node`, `None` for the root.
#[inline]
pub fn parent(node: usize) -> Option<usize> {
    if node == ROOT {
        None
    } else {
        Some((node - 1) / 2)
    }
}

/// Number of levels below the root (`log2(leaves)`).
#[inline]
pub fn height(leaves: usize) -> usize {
    leaves.trailing_zeros() as usize
}
