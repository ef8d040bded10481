//! Montgomery-domain arithmetic modulo a fixed prime.
//!
//! Residues are carried in `[0, 2p]` between operations and only brought into
//! `[0, p)` by [`correction`]. Every function takes the [`PrimeField`] table by
//! reference; the crate's only instance is
//! [`P503_FIELD`](crate::constants::P503_FIELD).
//!
//! Inputs are assumed to already be in Montgomery representation unless a
//! function says otherwise. None of these routines branch on operand values.

use crate::constants::NWORDS_FIELD;
use crate::mp::{self, Digit};

/// A single-width field element buffer.
pub type Limbs = [Digit; NWORDS_FIELD];

/// Scratch buffer for products prior to reduction.
pub type DoubleLimbs = [Digit; 2 * NWORDS_FIELD];

/// Number of odd powers `a, a^3, ..., a^31` tabulated for the inversion chain.
pub const CHAIN_TABLE_LEN: usize = 16;

/// One window of an addition chain: square `squarings` times, then multiply by
/// the tabulated odd power `a^(2 * power + 1)`; the pair is run `repeat` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStep {
    pub squarings: u32,
    pub power: usize,
    pub repeat: u32,
}

impl ChainStep {
    pub const fn new(squarings: u32, power: usize) -> Self {
        Self::repeated(squarings, power, 1)
    }

    pub const fn repeated(squarings: u32, power: usize, repeat: u32) -> Self {
        assert!(power < CHAIN_TABLE_LEN);
        Self {
            squarings,
            power,
            repeat,
        }
    }
}

/// Precomputed data for one prime modulus.
#[derive(Debug)]
pub struct PrimeField {
    pub modulus: Limbs,
    pub modulus_x2: Limbs,
    /// R^2 mod p.
    pub montgomery_r2: Limbs,
    /// R mod p.
    pub montgomery_one: Limbs,
    /// -p^-1 mod 2^64.
    pub inv_neg: Digit,
    pub bits: u32,
    /// Chain computing a^((p-3)/4), starting from `a`.
    pub inversion_chain: &'static [ChainStep],
}

/// Montgomery reduction, `t * R^-1 mod p`.
///
/// Requires `t < R * p`; the result is then in `[0, 2p)`.
pub fn reduce(t: &DoubleLimbs, field: &PrimeField) -> Limbs {
    let mut t = *t;
    let mut meta_carry: Digit = 0;

    for i in 0..NWORDS_FIELD {
        let m = t[i].wrapping_mul(field.inv_neg);
        let mut carry = 0;
        for j in 0..NWORDS_FIELD {
            (t[i + j], carry) = mp::mac(t[i + j], m, field.modulus[j], carry);
        }
        (t[i + NWORDS_FIELD], meta_carry) =
            mp::adc(t[i + NWORDS_FIELD], carry, meta_carry);
    }

    let mut out = [0; NWORDS_FIELD];
    out.copy_from_slice(&t[NWORDS_FIELD..]);
    out
}

/// `a * b * R^-1 mod p`.
#[inline]
pub fn mul(a: &Limbs, b: &Limbs, field: &PrimeField) -> Limbs {
    let product: DoubleLimbs = mp::mul(a, b);
    reduce(&product, field)
}

/// `a^2 * R^-1 mod p`.
#[inline]
pub fn square(a: &Limbs, field: &PrimeField) -> Limbs {
    let product: DoubleLimbs = mp::mul(a, a);
    reduce(&product, field)
}

/// `a + b mod 2p`.
pub fn add(a: &Limbs, b: &Limbs, field: &PrimeField) -> Limbs {
    let (sum, _) = mp::add(a, b);
    let (diff, borrow) = mp::sub(&sum, &field.modulus_x2);
    let (out, _) = mp::add(&diff, &mp::and_mask(&field.modulus_x2, mp::mask(borrow)));
    out
}

/// `a - b mod 2p`.
pub fn sub(a: &Limbs, b: &Limbs, field: &PrimeField) -> Limbs {
    let (diff, borrow) = mp::sub(a, b);
    let (out, _) = mp::add(&diff, &mp::and_mask(&field.modulus_x2, mp::mask(borrow)));
    out
}

/// `2p - a`. Zero maps to `2p`, which [`correction`] takes back to zero.
pub fn neg(a: &Limbs, field: &PrimeField) -> Limbs {
    let (out, _) = mp::sub(&field.modulus_x2, a);
    out
}

/// `a / 2 mod p`: add p when `a` is odd, then shift.
pub fn div2(a: &Limbs, field: &PrimeField) -> Limbs {
    let odd = mp::mask(a[0] & 1);
    let (mut out, _) = mp::add(a, &mp::and_mask(&field.modulus, odd));
    mp::shift_right1(&mut out);
    out
}

/// Bring `a` from `[0, 3p)` into `[0, p)` with two masked subtractions of p.
pub fn correction(a: &Limbs, field: &PrimeField) -> Limbs {
    let mut out = *a;
    for _ in 0..2 {
        let (diff, borrow) = mp::sub(&out, &field.modulus);
        (out, _) = mp::add(&diff, &mp::and_mask(&field.modulus, mp::mask(borrow)));
    }
    out
}

/// Standard to Montgomery form: `a * R^2 * R^-1 = a * R mod p`.
#[inline]
pub fn to_montgomery(a: &Limbs, field: &PrimeField) -> Limbs {
    mul(a, &field.montgomery_r2, field)
}

/// Montgomery to canonical standard form: `ma * R^-1 mod p`, in `[0, p)`.
pub fn from_montgomery(ma: &Limbs, field: &PrimeField) -> Limbs {
    let mut one = [0; NWORDS_FIELD];
    one[0] = 1;
    correction(&mul(ma, &one, field), field)
}

/// `a^((p-3)/4)` through the field's fixed addition chain.
///
/// The sequence of squarings and multiplications depends only on `field`.
pub fn inversion_chain(a: &Limbs, field: &PrimeField) -> Limbs {
    let a2 = square(a, field);
    let mut table = [*a; CHAIN_TABLE_LEN];
    for k in 1..CHAIN_TABLE_LEN {
        table[k] = mul(&table[k - 1], &a2, field);
    }

    let mut acc = *a;
    for step in field.inversion_chain {
        for _ in 0..step.repeat {
            for _ in 0..step.squarings {
                acc = square(&acc, field);
            }
            acc = mul(&acc, &table[step.power], field);
        }
    }
    acc
}

/// `a^-1 * R mod p` for `a` in Montgomery form, via `a^(p-2)`.
///
/// Inverting zero is a contract violation; the result is unspecified.
pub fn invert(a: &Limbs, field: &PrimeField) -> Limbs {
    let mut t = inversion_chain(a, field);
    t = square(&t, field);
    t = square(&t, field);
    mul(a, &t, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::P503_FIELD;
    use crate::test_utils::{arb_limbs, big, from_big, modulus};
    use num_bigint::BigUint;
    use test_strategy::proptest;

    fn r() -> BigUint {
        BigUint::from(1u8) << (64 * NWORDS_FIELD)
    }

    #[test]
    fn table_constants_are_consistent() {
        let p = modulus();
        let field = &P503_FIELD;

        assert_eq!(p.bits(), u64::from(field.bits));
        assert_eq!(&p * 2u8, big(&field.modulus_x2));
        assert_eq!((r() * r()) % &p, big(&field.montgomery_r2));
        assert_eq!(r() % &p, big(&field.montgomery_one));

        let check = (BigUint::from(field.inv_neg) * &p + 1u8) % (BigUint::from(1u8) << 64);
        assert_eq!(BigUint::from(0u8), check);
    }

    #[test]
    fn inversion_chain_exponent_is_p_minus_3_over_4() {
        let mut exponent = BigUint::from(1u8);
        for step in P503_FIELD.inversion_chain {
            for _ in 0..step.repeat {
                exponent <<= step.squarings as usize;
                exponent += 2 * step.power + 1;
            }
        }
        assert_eq!((modulus() - 3u8) / 4u8, exponent);
    }

    #[proptest]
    fn reduce_matches_big_integer_reduction(
        #[strategy(arb_limbs())] a: Limbs,
        #[strategy(arb_limbs())] b: Limbs,
    ) {
        let p = modulus();
        let product: DoubleLimbs = mp::mul(&a, &b);
        let reduced = reduce(&product, &P503_FIELD);

        let r_inv = r().modpow(&(&p - 2u8), &p);
        assert!(big(&reduced) < &p * 2u8);
        assert_eq!((big(&a) * big(&b) * r_inv) % &p, big(&reduced) % &p);
    }

    #[proptest]
    fn add_and_sub_stay_below_twice_p(
        #[strategy(arb_limbs())] a: Limbs,
        #[strategy(arb_limbs())] b: Limbs,
    ) {
        let p = modulus();
        let two_p = &p * 2u8;
        let sum = add(&a, &b, &P503_FIELD);
        let diff = sub(&a, &b, &P503_FIELD);

        assert!(big(&sum) < two_p);
        assert!(big(&diff) < two_p);
        assert_eq!((big(&a) + big(&b)) % &p, big(&sum) % &p);
        assert_eq!((big(&a) + &two_p - big(&b)) % &p, big(&diff) % &p);
    }

    #[test]
    fn negating_zero_gives_twice_p_which_corrects_to_zero() {
        let zero = [0; NWORDS_FIELD];
        let negated = neg(&zero, &P503_FIELD);
        assert_eq!(P503_FIELD.modulus_x2, negated);
        assert_eq!(zero, correction(&negated, &P503_FIELD));
    }

    #[proptest]
    fn div2_halves_modulo_p(#[strategy(arb_limbs())] a: Limbs) {
        let p = modulus();
        let half = div2(&a, &P503_FIELD);
        assert_eq!(big(&a) % &p, (big(&half) * 2u8) % &p);
    }

    #[proptest]
    fn correction_canonicalizes_values_below_three_p(#[strategy(arb_limbs())] a: Limbs) {
        let p = modulus();
        for k in 0u8..3 {
            let shifted: Limbs = from_big(&(big(&a) % &p + &p * k));
            let corrected = correction(&shifted, &P503_FIELD);
            assert_eq!(big(&a) % &p, big(&corrected));
        }
    }

    #[test]
    fn inverse_of_one_is_one() {
        let one = P503_FIELD.montgomery_one;
        let inverse = correction(&invert(&one, &P503_FIELD), &P503_FIELD);
        assert_eq!(one, inverse);
    }
}
