//! The ephemeral key-exchange collaborator the KEM is built on.
//!
//! The KEM never looks inside a public key or a shared value; it only needs
//! an engine that, for either role, derives a public key from a secret scalar
//! and agrees on a shared value with a peer's public key. Agreement reports
//! validation failure as a [`Choice`] so the caller can fold it into a
//! constant-time decision instead of branching on it.

mod reference;

pub use reference::GroupExchange;

use std::fmt;

use subtle::Choice;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::keys::PublicKey;
use crate::params::{MASK_ALICE, MASK_BOB, SECRETKEY_A_BYTES, SECRETKEY_B_BYTES, SHARED_VALUE_BYTES};

/// Which side of the exchange a scalar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The encapsulating side; its scalars are derived by hashing.
    Alice,
    /// The key owner; its scalar lives in the secret key.
    Bob,
}

impl Role {
    /// Mask applied to the most significant scalar byte.
    pub const fn mask(self) -> u8 {
        match self {
            Role::Alice => MASK_ALICE,
            Role::Bob => MASK_BOB,
        }
    }

    pub const fn scalar_bytes(self) -> usize {
        match self {
            Role::Alice => SECRETKEY_A_BYTES,
            Role::Bob => SECRETKEY_B_BYTES,
        }
    }
}

pub const SCALAR_BYTES: usize = if SECRETKEY_A_BYTES > SECRETKEY_B_BYTES {
    SECRETKEY_A_BYTES
} else {
    SECRETKEY_B_BYTES
};

/// A little-endian secret scalar for one role, masked into that role's range.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretScalar {
    #[zeroize(skip)]
    role: Role,
    bytes: [u8; SCALAR_BYTES],
}

impl SecretScalar {
    /// Bytes past the role's scalar length are cleared and the top byte is
    /// masked.
    pub fn new(role: Role, mut bytes: [u8; SCALAR_BYTES]) -> Self {
        let len = role.scalar_bytes();
        bytes[len..].fill(0);
        bytes[len - 1] &= role.mask();
        Self { role, bytes }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn as_bytes(&self) -> &[u8; SCALAR_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScalar")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Encoded shared value, the j-invariant of the common curve for an
/// isogeny engine.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct JInvariant([u8; SHARED_VALUE_BYTES]);

impl JInvariant {
    pub fn new(bytes: [u8; SHARED_VALUE_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SHARED_VALUE_BYTES] {
        &self.0
    }
}

impl fmt::Debug for JInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JInvariant(..)")
    }
}

/// Outcome of a secret agreement.
///
/// `j_invariant` is always populated, even when `succeeded` is false, so both
/// outcomes flow through the same code.
#[derive(Debug, Clone)]
pub struct Agreement {
    pub j_invariant: JInvariant,
    pub succeeded: Choice,
}

/// Ephemeral key generation and secret agreement for both roles.
///
/// Implementations must be deterministic in their inputs, agree
/// symmetrically (Alice's agreement on Bob's key equals Bob's on Alice's)
/// and never branch on secret scalars.
pub trait EphemeralExchange {
    fn key_generation(&self, secret: &SecretScalar) -> PublicKey;

    fn secret_agreement(&self, secret: &SecretScalar, peer: &PublicKey) -> Agreement;
}

impl<E: EphemeralExchange + ?Sized> EphemeralExchange for &E {
    fn key_generation(&self, secret: &SecretScalar) -> PublicKey {
        (**self).key_generation(secret)
    }

    fn secret_agreement(&self, secret: &SecretScalar, peer: &PublicKey) -> Agreement {
        (**self).secret_agreement(secret, peer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_masked_per_role() {
        let alice = SecretScalar::new(Role::Alice, [0xFF; SCALAR_BYTES]);
        let bob = SecretScalar::new(Role::Bob, [0xFF; SCALAR_BYTES]);

        assert_eq!(0x03, alice.as_bytes()[SECRETKEY_A_BYTES - 1]);
        assert_eq!(0x0F, bob.as_bytes()[SECRETKEY_B_BYTES - 1]);
        assert_eq!(0xFF, alice.as_bytes()[0]);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let scalar = SecretScalar::new(Role::Bob, [0xAB; SCALAR_BYTES]);
        assert_eq!("SecretScalar { role: Bob, .. }", format!("{scalar:?}"));
        assert_eq!(
            "JInvariant(..)",
            format!("{:?}", JInvariant::new([0xCD; SHARED_VALUE_BYTES]))
        );
    }
}
