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

use crate::constants::FP2_ENCODED_BYTES;
use crate::constants::FP_ENCODED_BYTES;
use crate::constants::NWORDS_FIELD;
use crate::constants::P503_FIELD;
use crate::error::ParseFieldElementError;
use crate::fp::Fp;
use crate::montgomery::{self, DoubleLimbs};
use crate::mp;
use crate::traits::MontgomeryField;

/// Element of GF(p^2) = GF(p)[i] / (i^2 + 1), written `e0 + e1 * i`.
///
/// Both coordinates are in Montgomery representation.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Fp2 {
    pub e0: Fp,
    pub e1: Fp,
}

impl Fp2 {
    pub const ZERO: Self = Self::new(Fp::ZERO, Fp::ZERO);
    pub const ONE: Self = Self::new(Fp::ONE, Fp::ZERO);

    pub const fn new(e0: Fp, e1: Fp) -> Self {
        Self { e0, e1 }
    }

    /// Montgomery representation of a pair of standard-form integers.
    pub fn to_montgomery(e0: &[mp::Digit; NWORDS_FIELD], e1: &[mp::Digit; NWORDS_FIELD]) -> Self {
        Self::new(Fp::to_montgomery(e0), Fp::to_montgomery(e1))
    }

    /// Canonical standard-form coordinates.
    pub fn from_montgomery(&self) -> [[mp::Digit; NWORDS_FIELD]; 2] {
        [self.e0.from_montgomery(), self.e1.from_montgomery()]
    }

    /// `e0` then `e1`, each in its canonical encoding.
    pub fn to_bytes(&self) -> [u8; FP2_ENCODED_BYTES] {
        let mut out = [0; FP2_ENCODED_BYTES];
        out[..FP_ENCODED_BYTES].copy_from_slice(&self.e0.to_bytes());
        out[FP_ENCODED_BYTES..].copy_from_slice(&self.e1.to_bytes());
        out
    }

    /// Decode without branching on the value; `None` unless both coordinates
    /// are canonical.
    pub fn from_bytes_ct(bytes: &[u8; FP2_ENCODED_BYTES]) -> CtOption<Self> {
        let mut lo = [0; FP_ENCODED_BYTES];
        let mut hi = [0; FP_ENCODED_BYTES];
        lo.copy_from_slice(&bytes[..FP_ENCODED_BYTES]);
        hi.copy_from_slice(&bytes[FP_ENCODED_BYTES..]);

        let e0 = Fp::from_bytes_ct(&lo);
        let e1 = Fp::from_bytes_ct(&hi);
        let valid = e0.is_some() & e1.is_some();
        CtOption::new(
            Self::new(e0.unwrap_or(Fp::ZERO), e1.unwrap_or(Fp::ZERO)),
            valid,
        )
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseFieldElementError> {
        let array = <&[u8; FP2_ENCODED_BYTES]>::try_from(bytes).map_err(|_| {
            ParseFieldElementError::InvalidNumBytes {
                expected: FP2_ENCODED_BYTES,
                found: bytes.len(),
            }
        })?;
        Option::<Self>::from(Self::from_bytes_ct(array)).ok_or(ParseFieldElementError::NotCanonical)
    }

    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::new(Fp::random(rng), Fp::random(rng))
    }

    /// Complex conjugate `e0 - e1 * i`.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.e0, -self.e1)
    }
}

impl MontgomeryField for Fp2 {
    const ENCODED_BYTES: usize = FP2_ENCODED_BYTES;

    /// `(a0 + a1)(a0 - a1) + 2 a0 a1 i`.
    fn square(&self) -> Self {
        let field = &P503_FIELD;
        let (a0, a1) = (&self.e0.0, &self.e1.0);

        let (t1, _) = mp::add(a0, a1);
        let t2 = montgomery::sub(a0, a1, field);
        let (t3, _) = mp::add(a0, a0);

        Self::new(
            Fp(montgomery::mul(&t1, &t2, field)),
            Fp(montgomery::mul(&t3, a1, field)),
        )
    }

    /// `(a0 - a1 i) / (a0^2 + a1^2)`, one GF(p) inversion.
    fn invert(&self) -> Self {
        let norm = self.e0.square() + self.e1.square();
        let norm_inv = norm.invert();
        Self::new(self.e0 * norm_inv, -self.e1 * norm_inv)
    }

    fn div2(&self) -> Self {
        Self::new(self.e0.div2(), self.e1.div2())
    }

    fn correction(&self) -> Self {
        Self::new(self.e0.correction(), self.e1.correction())
    }

    fn is_zero_vartime(&self) -> bool {
        self.e0.is_zero_vartime() && self.e1.is_zero_vartime()
    }
}

impl From<u64> for Fp2 {
    fn from(value: u64) -> Self {
        Self::new(Fp::from(value), Fp::ZERO)
    }
}

impl From<Fp> for Fp2 {
    fn from(value: Fp) -> Self {
        Self::new(value, Fp::ZERO)
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.e0.ct_eq(&other.e0) & self.e1.ct_eq(&other.e1)
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(
            Fp::conditional_select(&a.e0, &b.e0, choice),
            Fp::conditional_select(&a.e1, &b.e1, choice),
        )
    }
}

impl fmt::Display for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} + {}*i", self.e0, self.e1)
    }
}

impl fmt::Debug for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fp2({self})")
    }
}

impl Serialize for Fp2 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Fp2 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

impl Add for Fp2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.e0 + rhs.e0, self.e1 + rhs.e1)
    }
}

impl Sub for Fp2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.e0 - rhs.e0, self.e1 - rhs.e1)
    }
}

impl Neg for Fp2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.e0, -self.e1)
    }
}

/// Karatsuba: three base-field products and two reductions.
impl Mul for Fp2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let field = &P503_FIELD;
        let (a0, a1) = (&self.e0.0, &self.e1.0);
        let (b0, b1) = (&rhs.e0.0, &rhs.e1.0);

        let tt1: DoubleLimbs = mp::mul(a0, b0);
        let tt2: DoubleLimbs = mp::mul(a1, b1);
        let (t1, _) = mp::add(a0, a1);
        let (t2, _) = mp::add(b0, b1);

        // a0*b0 - a1*b1, lifted by p * R when negative.
        let (mut tt3, borrow) = mp::sub(&tt1, &tt2);
        let lift = mp::and_mask(&field.modulus, mp::mask(borrow));
        let mut carry = 0;
        for (digit, addend) in tt3[NWORDS_FIELD..].iter_mut().zip(lift) {
            (*digit, carry) = mp::adc(*digit, addend, carry);
        }
        let c0 = montgomery::reduce(&tt3, field);

        // (a0 + a1)(b0 + b1) - a0*b0 - a1*b1 = a0*b1 + a1*b0.
        let (sum, _) = mp::add(&tt1, &tt2);
        let cross: DoubleLimbs = mp::mul(&t1, &t2);
        let (cross, _) = mp::sub(&cross, &sum);
        let c1 = montgomery::reduce(&cross, field);

        Self::new(Fp(c0), Fp(c1))
    }
}

impl AddAssign for Fp2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fp2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fp2 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Zero for Fp2 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.ct_eq(&Self::ZERO).into()
    }
}

impl ConstZero for Fp2 {
    const ZERO: Self = Self::ZERO;
}

impl One for Fp2 {
    fn one() -> Self {
        Self::ONE
    }
}

impl ConstOne for Fp2 {
    const ONE: Self = Self::ONE;
}
