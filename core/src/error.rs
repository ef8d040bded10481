use thiserror::Error;

/// Result type specialized for KEM operations.
pub type SikeResult<T> = std::result::Result<T, SikeError>;

/// Errors surfaced by the KEM entry points.
///
/// A tampered or malformed ciphertext is not among them: decapsulation
/// always produces a shared secret.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SikeError {
    #[error("post-quantum KEM support is disabled")]
    PqDisabled,
    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("invalid {what} length: expected {expected} bytes, got {found}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}
