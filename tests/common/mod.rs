//! Brute-force references for range folds

#![allow(dead_code)]

use rangefold::Monoid;

/// Left-to-right fold of `values[start..end)` seeded with the identity.
pub fn naive_fold<M: Monoid>(monoid: &M, values: &[M::Value], start: usize, end: usize) -> M::Value {
    values[start..end]
        .iter()
        .fold(monoid.identity(), |acc, value| monoid.combine(&acc, value))
}

/// Every valid half-open range over a sequence of length `len`.
pub fn all_ranges(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..=len).flat_map(move |start| (start..=len).map(move |end| (start, end)))
}
