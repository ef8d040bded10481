//! Arithmetic in GF(p) and GF(p^2) for the SIKEp503 prime
//! p = 2^250 * 3^159 - 1, in Montgomery representation.

pub mod constants;
pub mod error;
pub mod fp;
pub mod fp2;
pub mod macros;
pub mod montgomery;
pub mod mp;
pub mod prelude;
pub mod traits;

#[cfg(test)]
mod test_utils;

pub use crate::constants::{FP2_ENCODED_BYTES, FP_ENCODED_BYTES};
pub use crate::error::{MathError, ParseFieldElementError};
pub use crate::fp::Fp;
pub use crate::fp2::Fp2;
pub use crate::traits::MontgomeryField;
