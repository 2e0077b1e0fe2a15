//! Identity providers for the numeric monoids

/// Additive identity.
pub trait Zero {
    /// The value `0`.
    fn zero() -> Self;
}

/// Addition that never panics, so a fold over any input is total.
///
/// Integers wrap on overflow, which keeps `+` associative over the whole
/// type; floats use ordinary IEEE addition.
pub trait Additive: Zero {
    /// `self + other` with the overflow behaviour above.
    fn sum_with(&self, other: &Self) -> Self;
}

/// Extreme values used as identities for [`super::Min`] and [`super::Max`].
///
/// Floats report infinities rather than their finite extremes, so an
/// infinite input never beats the identity.
pub trait Bounded {
    /// Value no smaller than any other (`+inf` for floats).
    fn max_bound() -> Self;

    /// Value no larger than any other (`-inf` for floats).
    fn min_bound() -> Self;
}

macro_rules! impl_integer_bounds {
    ($($t:ty),* $(,)?) => {
        $(
            impl Zero for $t {
                #[inline]
                fn zero() -> Self {
                    0
                }
            }

            impl Additive for $t {
                #[inline]
                fn sum_with(&self, other: &Self) -> Self {
                    self.wrapping_add(*other)
                }
            }

            impl Bounded for $t {
                #[inline]
                fn max_bound() -> Self {
                    <$t>::MAX
                }

                #[inline]
                fn min_bound() -> Self {
                    <$t>::MIN
                }
            }
        )*
    };
}

macro_rules! impl_float_bounds {
    ($($t:ty),* $(,)?) => {
        $(
            impl Zero for $t {
                #[inline]
                fn zero() -> Self {
                    0.0
                }
            }

            impl Additive for $t {
                #[inline]
                fn sum_with(&self, other: &Self) -> Self {
                    self + other
                }
            }

            impl Bounded for $t {
                #[inline]
                fn max_bound() -> Self {
                    <$t>::INFINITY
                }

                #[inline]
                fn min_bound() -> Self {
                    <$t>::NEG_INFINITY
                }
            }
        )*
    };
}

impl_integer_bounds!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float_bounds!(f32, f64);
