//! Fixed-width multiprecision arithmetic over little-endian digit arrays.
//!
//! Every routine runs a fixed number of iterations for its width and derives
//! carries and borrows through wrapping arithmetic, never by comparing digit
//! values. Widths are const generics, so mismatched operands do not type-check;
//! the one routine with two widths ([`mul`]) asserts their relation in debug
//! builds.

use subtle::{Choice, ConstantTimeEq};

/// A single machine word.
pub type Digit = u64;

/// Bit width of a [`Digit`].
pub const RADIX: u32 = Digit::BITS;

/// Bytes per [`Digit`].
pub const DIGIT_BYTES: usize = (RADIX / 8) as usize;

/// Compute `a + b + carry`, returning `(sum, carry)`.
#[inline(always)]
pub const fn adc(a: Digit, b: Digit, carry: Digit) -> (Digit, Digit) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as Digit, (ret >> RADIX) as Digit)
}

/// Compute `a - (b + borrow)`, returning `(difference, borrow)`.
#[inline(always)]
pub const fn sbb(a: Digit, b: Digit, borrow: Digit) -> (Digit, Digit) {
    let ret = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (ret as Digit, (ret >> 127) as Digit)
}

/// Compute `a + b * c + carry`, returning `(low, high)`.
#[inline(always)]
pub const fn mac(a: Digit, b: Digit, c: Digit, carry: Digit) -> (Digit, Digit) {
    let ret = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (ret as Digit, (ret >> RADIX) as Digit)
}

/// Expand a carry/borrow bit into an all-ones (bit = 1) or all-zeros mask.
#[inline(always)]
pub const fn mask(bit: Digit) -> Digit {
    (0 as Digit).wrapping_sub(bit)
}

/// `c = a + b`, returning `(c, carry)`.
#[inline]
pub fn add<const N: usize>(a: &[Digit; N], b: &[Digit; N]) -> ([Digit; N], Digit) {
    let mut c = [0; N];
    let mut carry = 0;
    for i in 0..N {
        (c[i], carry) = adc(a[i], b[i], carry);
    }
    (c, carry)
}

/// `c = a - b`, returning `(c, borrow)`.
#[inline]
pub fn sub<const N: usize>(a: &[Digit; N], b: &[Digit; N]) -> ([Digit; N], Digit) {
    let mut c = [0; N];
    let mut borrow = 0;
    for i in 0..N {
        (c[i], borrow) = sbb(a[i], b[i], borrow);
    }
    (c, borrow)
}

/// `a & mask`, digit by digit.
#[inline]
pub fn and_mask<const N: usize>(a: &[Digit; N], mask: Digit) -> [Digit; N] {
    let mut c = *a;
    for digit in c.iter_mut() {
        *digit &= mask;
    }
    c
}

/// Logical right shift by one bit, in place. The top bit is zero-filled.
#[inline]
pub fn shift_right1<const N: usize>(x: &mut [Digit; N]) {
    for i in 0..N - 1 {
        x[i] = (x[i] >> 1) | (x[i + 1] << (RADIX - 1));
    }
    x[N - 1] >>= 1;
}

/// Schoolbook product of two `N`-digit operands into `D = 2N` digits.
#[inline]
pub fn mul<const N: usize, const D: usize>(a: &[Digit; N], b: &[Digit; N]) -> [Digit; D] {
    debug_assert_eq!(D, 2 * N, "product buffer must be twice the operand width");

    let mut c = [0; D];
    for i in 0..N {
        let mut carry = 0;
        for j in 0..N {
            (c[i + j], carry) = mac(c[i + j], a[i], b[j], carry);
        }
        c[i + N] = carry;
    }
    c
}

/// Constant-time equality of two digit arrays.
#[inline]
pub fn ct_eq<const N: usize>(a: &[Digit; N], b: &[Digit; N]) -> Choice {
    a[..].ct_eq(&b[..])
}

/// Returns `true` iff every digit of `x` is zero.
///
/// SECURITY NOTE: exits on the first nonzero digit and therefore does not run
/// in constant time. Only call it on public values.
pub fn is_zero_vartime<const N: usize>(x: &[Digit; N]) -> bool {
    for digit in x {
        if *digit != 0 {
            return false;
        }
    }
    true
}

/// Read a little-endian byte string into `N` digits.
///
/// `bytes` must not be longer than `N * DIGIT_BYTES`; missing high bytes are
/// zero.
pub fn from_le_bytes<const N: usize>(bytes: &[u8]) -> [Digit; N] {
    debug_assert!(bytes.len() <= N * DIGIT_BYTES);

    let mut digits = [0; N];
    for (i, byte) in bytes.iter().enumerate() {
        digits[i / DIGIT_BYTES] |= Digit::from(*byte) << (8 * (i % DIGIT_BYTES));
    }
    digits
}

/// Write the low `out.len()` bytes of `digits` in little-endian order.
pub fn to_le_bytes<const N: usize>(digits: &[Digit; N], out: &mut [u8]) {
    debug_assert!(out.len() <= N * DIGIT_BYTES);

    for (i, byte) in out.iter_mut().enumerate() {
        *byte = (digits[i / DIGIT_BYTES] >> (8 * (i % DIGIT_BYTES))) as u8;
    }
}
