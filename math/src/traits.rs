use std::fmt::Debug;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

use num_traits::ConstOne;
use num_traits::ConstZero;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

/// Arithmetic shared by [`Fp`](crate::fp::Fp) and [`Fp2`](crate::fp2::Fp2).
///
/// Elements are kept in Montgomery form; results of the ring operations are
/// not canonical until [`correction`][Self::correction] is applied, but they
/// always compare and encode as their canonical value.
pub trait MontgomeryField:
    Copy
    + Debug
    + ConstZero
    + ConstOne
    + ConstantTimeEq
    + ConditionallySelectable
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Length of the canonical byte encoding.
    const ENCODED_BYTES: usize;

    #[must_use]
    fn square(&self) -> Self;

    /// Multiplicative inverse. The inverse of zero is unspecified.
    #[must_use]
    fn invert(&self) -> Self;

    #[must_use]
    fn div2(&self) -> Self;

    /// Reduce to the unique representative below the modulus.
    #[must_use]
    fn correction(&self) -> Self;

    /// SECURITY NOTE: not constant time. Only call it on public values.
    fn is_zero_vartime(&self) -> bool;

    /// `self^e` for a little-endian exponent, via a Montgomery ladder.
    ///
    /// Runs the same multiply-and-square pair for every bit of `exponent`, so
    /// the operation sequence depends only on `exponent.len()`.
    #[must_use]
    fn pow_le_bytes(&self, exponent: &[u8]) -> Self {
        let mut r0 = Self::ONE;
        let mut r1 = *self;
        for byte in exponent.iter().rev() {
            for shift in (0..8).rev() {
                let bit = ((byte >> shift) & 1).into();
                Self::conditional_swap(&mut r0, &mut r1, bit);
                r1 = r0 * r1;
                r0 = r0.square();
                Self::conditional_swap(&mut r0, &mut r1, bit);
            }
        }
        r0
    }
}
