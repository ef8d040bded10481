use thiserror::Error;

/// Common result type used across this crate.
pub type Result<T, E = MathError> = core::result::Result<T, E>;

/// Top-level error type to keep error management simple for users.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error(transparent)]
    ParseFieldElement(#[from] ParseFieldElementError),
}

pub type Error = MathError;

/// Errors from decoding a field element out of its byte encoding.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseFieldElementError {
    #[error("incorrect number of bytes: {found} != {expected}")]
    InvalidNumBytes { expected: usize, found: usize },
    #[error("encoded value is not below the field modulus")]
    NotCanonical,
}
