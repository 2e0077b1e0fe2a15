//! Ready-made monoids: sum, min, max and string concatenation

use std::marker::PhantomData;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

use super::{Additive, Bounded, Monoid};

/// Addition with identity `0`.
///
/// Integer sums wrap on overflow (see [`Additive`]); widen the value type,
/// e.g. fold `i64` inputs as `i128`, when exact totals are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Sum<T>(PhantomData<fn() -> T>);

impl<T> Sum<T> {
    /// Create the monoid.
    pub const fn new() -> Self {
        Sum(PhantomData)
    }
}

impl<T> Default for Sum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Monoid for Sum<T>
where
    T: Clone + Additive,
{
    type Value = T;

    fn identity(&self) -> T {
        T::zero()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        left.sum_with(right)
    }
}

/// Minimum with identity [`Bounded::max_bound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Min<T>(PhantomData<fn() -> T>);

impl<T> Min<T> {
    /// Create the monoid.
    pub const fn new() -> Self {
        Min(PhantomData)
    }
}

impl<T> Default for Min<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Monoid for Min<T>
where
    T: Clone + Bounded + PartialOrd,
{
    type Value = T;

    fn identity(&self) -> T {
        T::max_bound()
    }

    // ties keep the left operand
    fn combine(&self, left: &T, right: &T) -> T {
        if right < left {
            right.clone()
        } else {
            left.clone()
        }
    }
}

/// Maximum with identity [`Bounded::min_bound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Max<T>(PhantomData<fn() -> T>);

impl<T> Max<T> {
    /// Create the monoid.
    pub const fn new() -> Self {
        Max(PhantomData)
    }
}

impl<T> Default for Max<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Monoid for Max<T>
where
    T: Clone + Bounded + PartialOrd,
{
    type Value = T;

    fn identity(&self) -> T {
        T::min_bound()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        if right > left {
            right.clone()
        } else {
            left.clone()
        }
    }
}

/// String concatenation with identity `""`.
///
/// Not commutative: folds must keep sequence order. A fold over `k`
/// characters copies `O(k)` bytes per combine, so queries cost more than
/// `O(log n)` combines would suggest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Concat;

impl Monoid for Concat {
    type Value = String;

    fn identity(&self) -> String {
        String::new()
    }

    fn combine(&self, left: &String, right: &String) -> String {
        let mut joined = String::with_capacity(left.len() + right.len());
        joined.push_str(left);
        joined.push_str(right);
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_two_sided_identity<M>(monoid: &M, samples: &[M::Value])
    where
        M: Monoid,
        M::Value: PartialEq + std::fmt::Debug,
    {
        let e = monoid.identity();
        for v in samples {
            assert_eq!(&monoid.combine(&e, v), v);
            assert_eq!(&monoid.combine(v, &e), v);
        }
    }

    #[test]
    fn identities_are_two_sided() {
        assert_two_sided_identity(&Sum::<i32>::new(), &[-4, 0, 9]);
        assert_two_sided_identity(&Min::<i64>::new(), &[i64::MIN, -1, 7, i64::MAX]);
        assert_two_sided_identity(&Max::<u16>::new(), &[0, 1, u16::MAX]);
        assert_two_sided_identity(&Min::<f64>::new(), &[-0.5, 3.25, f64::MAX]);
        assert_two_sided_identity(&Concat, &["".to_string(), "xyz".to_string()]);
    }

    #[test]
    fn integer_sum_wraps_at_the_type_boundary() {
        let sum = Sum::<i64>::new();
        assert_eq!(sum.combine(&i64::MAX, &1), i64::MIN);
        assert_eq!(sum.combine(&i64::MIN, &-1), i64::MAX);
    }

    #[test]
    fn concat_keeps_operand_order() {
        let ab = Concat.combine(&"a".to_string(), &"b".to_string());
        assert_eq!(ab, "ab");
        assert_ne!(ab, Concat.combine(&"b".to_string(), &"a".to_string()));
    }

    #[test]
    fn min_and_max_pick_extremes() {
        assert_eq!(Min::<i32>::new().combine(&3, &-2), -2);
        assert_eq!(Max::<i32>::new().combine(&3, &-2), 3);
        assert_eq!(Min::<f32>::new().combine(&1.5, &f32::INFINITY), 1.5);
    }
}
