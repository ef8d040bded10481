//! Strategies and big-integer oracles shared by the unit tests.

use num_bigint::BigUint;
use proptest::prelude::*;

use crate::constants::NWORDS_FIELD;
use crate::constants::P503;
use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::montgomery::Limbs;
use crate::mp::Digit;

/// Digits below 2^502, which is below p.
pub fn arb_limbs() -> impl Strategy<Value = Limbs> {
    any::<[Digit; NWORDS_FIELD]>().prop_map(|mut limbs| {
        limbs[NWORDS_FIELD - 1] &= (1 << 54) - 1;
        limbs
    })
}

impl Arbitrary for Fp {
    type Parameters = ();

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        arb_limbs().prop_map(Fp).boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

impl Arbitrary for Fp2 {
    type Parameters = ();

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<Fp>(), any::<Fp>())
            .prop_map(|(e0, e1)| Fp2::new(e0, e1))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

pub fn big(digits: &[Digit]) -> BigUint {
    let bytes: Vec<u8> = digits.iter().flat_map(|d| d.to_le_bytes()).collect();
    BigUint::from_bytes_le(&bytes)
}

/// Panics if `value` does not fit in `N` digits.
pub fn from_big<const N: usize>(value: &BigUint) -> [Digit; N] {
    let mut digits = [0; N];
    for (i, digit) in value.to_u64_digits().into_iter().enumerate() {
        digits[i] = digit;
    }
    digits
}

pub fn modulus() -> BigUint {
    big(&P503)
}
