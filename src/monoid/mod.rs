//! Combine strategies for range folds
//!
//! A monoid is a value domain together with:
//! - an associative `combine`: `combine(combine(a, b), c) == combine(a, combine(b, c))`
//! - a two-sided identity `e`: `combine(e, v) == combine(v, e) == v`
//!
//! The tree only ever asks for these two capabilities, so any type that
//! implements [`Monoid`] (or any closure wrapped in [`FnMonoid`]) can drive it.
//! Associativity cannot be checked at runtime; a non-associative `combine`
//! produces wrong aggregates without any error.

mod bounds;
mod standard;

pub use bounds::{Additive, Bounded, Zero};
pub use standard::{Concat, Max, Min, Sum};

use std::fmt;

/// Associative binary operation with a two-sided identity.
pub trait Monoid {
    /// Element type being folded.
    type Value: Clone;

    /// Identity element `e`.
    fn identity(&self) -> Self::Value;

    /// Combine two adjacent aggregates, `left` covering the earlier positions.
    fn combine(&self, left: &Self::Value, right: &Self::Value) -> Self::Value;
}

impl<M: Monoid + ?Sized> Monoid for &M {
    type Value = M::Value;

    fn identity(&self) -> Self::Value {
        (**self).identity()
    }

    fn combine(&self, left: &Self::Value, right: &Self::Value) -> Self::Value {
        (**self).combine(left, right)
    }
}

/// Monoid assembled from an identity value and a closure.
///
/// ```
/// use rangefold::monoid::{FnMonoid, Monoid};
///
/// let gcd = FnMonoid::new(0u64, |a: &u64, b: &u64| {
///     let (mut a, mut b) = (*a, *b);
///     while b != 0 {
///         (a, b) = (b, a % b);
///     }
///     a
/// });
/// assert_eq!(gcd.combine(&12, &18), 6);
/// assert_eq!(gcd.combine(&gcd.identity(), &7), 7);
/// ```
#[derive(Clone)]
pub struct FnMonoid<V, F> {
    identity: V,
    op: F,
}

impl<V, F> FnMonoid<V, F>
where
    V: Clone,
    F: Fn(&V, &V) -> V,
{
    /// Wrap `op` with its identity element.
    pub fn new(identity: V, op: F) -> Self {
        Self { identity, op }
    }
}

impl<V, F> Monoid for FnMonoid<V, F>
where
    V: Clone,
    F: Fn(&V, &V) -> V,
{
    type Value = V;

    fn identity(&self) -> V {
        self.identity.clone()
    }

    fn combine(&self, left: &V, right: &V) -> V {
        (self.op)(left, right)
    }
}

impl<V: fmt::Debug, F> fmt::Debug for FnMonoid<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMonoid")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
