//! Shorthand constructors for field elements.

/// Simplifies constructing [`Fp`](crate::fp::Fp)s from small integers.
///
/// ```
/// use math::prelude::*;
///
/// let a = fp!(42);
/// assert_eq!(a, Fp::from(42));
/// assert_eq!(fp!(6) * fp!(7), a);
/// ```
#[macro_export]
macro_rules! fp {
    ($value:expr) => {
        $crate::fp::Fp::from($value as u64)
    };
}

/// Simplifies constructing [`Fp2`](crate::fp2::Fp2)s as `e0 + e1 * i`.
///
/// A single argument gives an element of the base field.
///
/// ```
/// use math::prelude::*;
///
/// let i = fp2!(0, 1);
/// assert_eq!(i * i, -fp2!(1));
/// assert_eq!(fp2!(3, 4) * fp2!(3, 4).conjugate(), fp2!(25));
/// ```
#[macro_export]
macro_rules! fp2 {
    ($e0:expr) => {
        $crate::fp2::Fp2::from($crate::fp!($e0))
    };
    ($e0:expr, $e1:expr) => {
        $crate::fp2::Fp2::new($crate::fp!($e0), $crate::fp!($e1))
    };
}
