//! A stand-in exchange engine: Diffie-Hellman in GF(p^2)*.
//!
//! A public key is `(g1^s, g2^s, g3^s)` for three fixed generators, encoded
//! into the same 378 bytes an isogeny public key occupies. Agreement raises
//! the product of the peer's three elements to the own scalar, so both sides
//! reach `(g1 g2 g3)^(a b)`.
//!
//! This exercises the KEM transform end to end over the real field
//! arithmetic. It is NOT post-quantum secure and must not protect real
//! traffic; production deployments plug an isogeny engine into
//! [`EphemeralExchange`].

use math::prelude::*;
use subtle::Choice;

use super::{Agreement, EphemeralExchange, JInvariant, SecretScalar};
use crate::keys::PublicKey;
use crate::params::{PUBLICKEY_BYTES, SHARED_VALUE_BYTES};

const ELEMENTS: usize = PUBLICKEY_BYTES / SHARED_VALUE_BYTES;

/// Reference engine over the multiplicative group of GF(p^2).
#[derive(Debug, Clone, Copy)]
pub struct GroupExchange {
    generators: [Fp2; ELEMENTS],
}

impl Default for GroupExchange {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupExchange {
    pub fn new() -> Self {
        Self {
            generators: [fp2!(2, 1), fp2!(3, 1), fp2!(5, 2)],
        }
    }

    fn encode(elements: &[Fp2; ELEMENTS]) -> PublicKey {
        let mut bytes = [0u8; PUBLICKEY_BYTES];
        for (chunk, element) in bytes.chunks_exact_mut(SHARED_VALUE_BYTES).zip(elements) {
            chunk.copy_from_slice(&element.to_bytes());
        }
        PublicKey::new(bytes)
    }

    /// Decodes every element and folds validity into one [`Choice`]; invalid
    /// or zero elements are replaced by one so the arithmetic still runs.
    fn decode(public: &PublicKey) -> ([Fp2; ELEMENTS], Choice) {
        let mut elements = [Fp2::ONE; ELEMENTS];
        let mut valid = Choice::from(1);
        for (element, chunk) in elements
            .iter_mut()
            .zip(public.as_bytes().chunks_exact(SHARED_VALUE_BYTES))
        {
            let mut encoded = [0u8; SHARED_VALUE_BYTES];
            encoded.copy_from_slice(chunk);
            let decoded = Fp2::from_bytes_ct(&encoded);
            let candidate = decoded.unwrap_or(Fp2::ONE);
            let ok = decoded.is_some() & !candidate.ct_eq(&Fp2::ZERO);
            *element = Fp2::conditional_select(&Fp2::ONE, &candidate, ok);
            valid &= ok;
        }
        (elements, valid)
    }
}

impl EphemeralExchange for GroupExchange {
    fn key_generation(&self, secret: &SecretScalar) -> PublicKey {
        let exponent = secret.as_bytes();
        Self::encode(&self.generators.map(|g| g.pow_le_bytes(exponent)))
    }

    fn secret_agreement(&self, secret: &SecretScalar, peer: &PublicKey) -> Agreement {
        let (elements, valid) = Self::decode(peer);
        let combined = elements.iter().fold(Fp2::ONE, |acc, e| acc * *e);
        let shared = combined.pow_le_bytes(secret.as_bytes());
        Agreement {
            j_invariant: JInvariant::new(shared.to_bytes()),
            succeeded: valid,
        }
    }
}
