use std::fmt;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use num_traits::ConstOne;
use num_traits::ConstZero;
use num_traits::One;
use num_traits::Zero;
use rand::RngCore;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use crate::constants::FP_ENCODED_BYTES;
use crate::constants::MONTGOMERY_ONE;
use crate::constants::NWORDS_FIELD;
use crate::constants::P503;
use crate::constants::P503_FIELD;
use crate::error::ParseFieldElementError;
use crate::montgomery::{self, Limbs, PrimeField};
use crate::mp::{self, Digit};
use crate::traits::MontgomeryField;

/// Element of GF(p), p = 2^250 * 3^159 - 1.
///
/// In Montgomery representation, in `[0, 2p]`. Two elements are equal when
/// they agree modulo p, regardless of representative.
#[derive(Copy, Clone, Default)]
pub struct Fp(pub(crate) Limbs);

impl Fp {
    pub const ZERO: Self = Self([0; NWORDS_FIELD]);
    pub const ONE: Self = Self(MONTGOMERY_ONE);

    #[inline(always)]
    fn field() -> &'static PrimeField {
        &P503_FIELD
    }

    /// Montgomery representation of a standard-form integer below `2p`.
    pub fn to_montgomery(a: &Limbs) -> Self {
        Self(montgomery::to_montgomery(a, Self::field()))
    }

    /// Canonical standard-form value in `[0, p)`.
    pub fn from_montgomery(&self) -> Limbs {
        montgomery::from_montgomery(&self.0, Self::field())
    }

    pub const fn from_raw_limbs(limbs: Limbs) -> Self {
        Self(limbs)
    }

    pub const fn raw_limbs(&self) -> &Limbs {
        &self.0
    }

    /// Canonical little-endian encoding of the standard-form value.
    pub fn to_bytes(&self) -> [u8; FP_ENCODED_BYTES] {
        let mut out = [0; FP_ENCODED_BYTES];
        mp::to_le_bytes(&self.from_montgomery(), &mut out);
        out
    }

    /// Decode without branching on the value; `None` when it is not below p.
    pub fn from_bytes_ct(bytes: &[u8; FP_ENCODED_BYTES]) -> CtOption<Self> {
        let limbs: Limbs = mp::from_le_bytes(bytes);
        let (_, borrow) = mp::sub(&limbs, &P503);
        CtOption::new(Self::to_montgomery(&limbs), Choice::from(borrow as u8))
    }

    /// Decode a byte slice, reporting why it was rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseFieldElementError> {
        let array = <&[u8; FP_ENCODED_BYTES]>::try_from(bytes).map_err(|_| {
            ParseFieldElementError::InvalidNumBytes {
                expected: FP_ENCODED_BYTES,
                found: bytes.len(),
            }
        })?;
        Option::<Self>::from(Self::from_bytes_ct(array)).ok_or(ParseFieldElementError::NotCanonical)
    }

    /// A random element. Slightly biased; intended for tests and benchmarks.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut limbs = [0; NWORDS_FIELD];
        for limb in limbs.iter_mut() {
            *limb = rng.next_u64();
        }
        // Below 2^503 < 2p, which is a valid representative.
        limbs[NWORDS_FIELD - 1] &= (1 << 55) - 1;
        Self(limbs)
    }
}

impl MontgomeryField for Fp {
    const ENCODED_BYTES: usize = FP_ENCODED_BYTES;

    #[inline]
    fn square(&self) -> Self {
        Self(montgomery::square(&self.0, Self::field()))
    }

    fn invert(&self) -> Self {
        Self(montgomery::invert(&self.0, Self::field()))
    }

    #[inline]
    fn div2(&self) -> Self {
        Self(montgomery::div2(&self.0, Self::field()))
    }

    #[inline]
    fn correction(&self) -> Self {
        Self(montgomery::correction(&self.0, Self::field()))
    }

    fn is_zero_vartime(&self) -> bool {
        mp::is_zero_vartime(&self.correction().0)
    }
}

impl From<u64> for Fp {
    fn from(value: u64) -> Self {
        let mut limbs = [0; NWORDS_FIELD];
        limbs[0] = value;
        Self::to_montgomery(&limbs)
    }
}

impl ConstantTimeEq for Fp {
    fn ct_eq(&self, other: &Self) -> Choice {
        mp::ct_eq(&self.correction().0, &other.correction().0)
    }
}

impl ConditionallySelectable for Fp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [0; NWORDS_FIELD];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = Digit::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(limbs)
    }
}

impl PartialEq for Fp {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fp {}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x")?;
        for limb in self.from_montgomery().iter().rev() {
            write!(f, "{limb:016x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fp({self})")
    }
}

impl Serialize for Fp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Fp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

impl Add for Fp {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(montgomery::add(&self.0, &rhs.0, Self::field()))
    }
}

impl Sub for Fp {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(montgomery::sub(&self.0, &rhs.0, Self::field()))
    }
}

impl Mul for Fp {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(montgomery::mul(&self.0, &rhs.0, Self::field()))
    }
}

impl Neg for Fp {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(montgomery::neg(&self.0, Self::field()))
    }
}

impl AddAssign for Fp {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fp {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fp {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Zero for Fp {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.ct_eq(&Self::ZERO).into()
    }
}

impl ConstZero for Fp {
    const ZERO: Self = Self::ZERO;
}

impl One for Fp {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.ct_eq(&Self::ONE).into()
    }
}

impl ConstOne for Fp {
    const ONE: Self = Self::ONE;
}
