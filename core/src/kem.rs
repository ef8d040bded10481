//! The CCA-secure KEM with implicit rejection.
//!
//! Encapsulation hashes a random message into Alice's ephemeral scalar, so
//! decapsulation can re-run the sender and check the ciphertext. A failed
//! check is not reported: the shared secret is then derived from the secret
//! key's seed instead of the recovered message, chosen by a constant-time
//! select, and both outcomes run the same operations.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::KemConfig;
use crate::error::SikeResult;
use crate::exchange::{EphemeralExchange, GroupExchange, Role, SecretScalar, SCALAR_BYTES};
use crate::hash::{squeeze, Domain};
use crate::keys::{Ciphertext, PublicKey, SecretKey, SharedSecret};
use crate::params::{MSG_BYTES, SECRETKEY_B_BYTES, SHARED_SECRET_BYTES};
use crate::random::{random_bytes, random_mod_order_b};

/// Inputs of deterministic key generation.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeypairSeeds {
    /// Implicit-rejection seed.
    pub seed: [u8; MSG_BYTES],
    /// Bob's scalar; masked into range on use.
    pub scalar: [u8; SECRETKEY_B_BYTES],
}

impl KeypairSeeds {
    pub fn new(seed: [u8; MSG_BYTES], scalar: [u8; SECRETKEY_B_BYTES]) -> Self {
        Self { seed, scalar }
    }
}

/// What decapsulation learned before the final selection.
struct Recovery {
    agreement_succeeded: Choice,
    message: Zeroizing<[u8; MSG_BYTES]>,
}

/// The KEM over an exchange engine `E`.
#[derive(Debug, Clone)]
pub struct Sike<E = GroupExchange> {
    engine: E,
    config: KemConfig,
}

impl Sike<GroupExchange> {
    /// The KEM over the reference engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(KemConfig::default())
    }

    pub fn with_config(config: KemConfig) -> Self {
        Self::with_engine(GroupExchange::new(), config)
    }
}

impl Default for Sike<GroupExchange> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EphemeralExchange> Sike<E> {
    pub fn with_engine(engine: E, config: KemConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &KemConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Generate a key pair from `rng`.
    pub fn keypair<R>(&self, rng: &mut R) -> SikeResult<(PublicKey, SecretKey)>
    where
        R: rand::TryCryptoRng + ?Sized,
    {
        self.config.ensure_enabled("keypair")?;

        let seed = Zeroizing::new(random_bytes::<R, MSG_BYTES>(rng)?);
        let scalar = random_mod_order_b(rng)?;
        Ok(self.assemble_keypair(*seed, scalar))
    }

    /// Generate a key pair from fixed seeds.
    pub fn keypair_with_seeds(&self, seeds: &KeypairSeeds) -> SikeResult<(PublicKey, SecretKey)> {
        self.config.ensure_enabled("keypair")?;

        let scalar = Self::bob_scalar(&seeds.scalar);
        Ok(self.assemble_keypair(seeds.seed, scalar))
    }

    fn assemble_keypair(&self, seed: [u8; MSG_BYTES], scalar: SecretScalar) -> (PublicKey, SecretKey) {
        let public = self.engine.key_generation(&scalar);

        let mut scalar_bytes = [0u8; SECRETKEY_B_BYTES];
        scalar_bytes.copy_from_slice(&scalar.as_bytes()[..SECRETKEY_B_BYTES]);
        let secret = SecretKey::new(seed, scalar_bytes, public.clone());
        scalar_bytes.zeroize();

        debug!("generated key pair");
        (public, secret)
    }

    /// Encapsulate a fresh shared secret to `public`.
    pub fn encapsulate<R>(&self, public: &PublicKey, rng: &mut R) -> SikeResult<(Ciphertext, SharedSecret)>
    where
        R: rand::TryCryptoRng + ?Sized,
    {
        self.config.ensure_enabled("encapsulate")?;

        let message = Zeroizing::new(random_bytes::<R, MSG_BYTES>(rng)?);
        self.encapsulate_with_message(public, &message)
    }

    /// Encapsulate with a caller-chosen message. The message must be secret
    /// and never reused.
    pub fn encapsulate_with_message(
        &self,
        public: &PublicKey,
        message: &[u8; MSG_BYTES],
    ) -> SikeResult<(Ciphertext, SharedSecret)> {
        self.config.ensure_enabled("encapsulate")?;

        let ephemeral = Self::ephemeral_scalar(message, public);
        let ephemeral_public = self.engine.key_generation(&ephemeral);
        let agreement = self.engine.secret_agreement(&ephemeral, public);

        let pad = Zeroizing::new(squeeze::<MSG_BYTES>(Domain::P, &[agreement.j_invariant.as_bytes().as_slice()]));
        let mut masked_message = [0u8; MSG_BYTES];
        for ((out, m), p) in masked_message.iter_mut().zip(message).zip(pad.iter()) {
            *out = m ^ p;
        }

        let ciphertext = Ciphertext {
            ephemeral_public,
            masked_message,
        };
        let shared = Self::derive_shared_secret(message, &ciphertext);

        debug!("encapsulated shared secret");
        Ok((ciphertext, shared))
    }

    /// Recover the shared secret from `ciphertext`.
    ///
    /// Never fails on a malformed or tampered ciphertext; the result is then
    /// a pseudorandom function of the secret key's seed and the ciphertext.
    pub fn decapsulate(&self, secret: &SecretKey, ciphertext: &Ciphertext) -> SikeResult<SharedSecret> {
        self.config.ensure_enabled("decapsulate")?;

        let recovery = self.recover(secret, ciphertext);

        // Re-run the sender on the recovered message.
        let ephemeral = Self::ephemeral_scalar(&recovery.message, secret.public_key());
        let expected = self.engine.key_generation(&ephemeral);
        let accept = recovery.agreement_succeeded & expected.ct_eq(&ciphertext.ephemeral_public);

        let mut selected = Zeroizing::new(*secret.seed());
        for (out, m) in selected.iter_mut().zip(recovery.message.iter()) {
            out.conditional_assign(m, accept);
        }

        debug!("decapsulated shared secret");
        Ok(Self::derive_shared_secret(&selected, ciphertext))
    }

    fn recover(&self, secret: &SecretKey, ciphertext: &Ciphertext) -> Recovery {
        let scalar = Self::bob_scalar(secret.scalar());
        let agreement = self.engine.secret_agreement(&scalar, &ciphertext.ephemeral_public);

        let pad = Zeroizing::new(squeeze::<MSG_BYTES>(Domain::P, &[agreement.j_invariant.as_bytes().as_slice()]));
        let mut message = Zeroizing::new([0u8; MSG_BYTES]);
        for ((out, c), p) in message
            .iter_mut()
            .zip(ciphertext.masked_message.iter())
            .zip(pad.iter())
        {
            *out = c ^ p;
        }

        Recovery {
            agreement_succeeded: agreement.succeeded,
            message,
        }
    }

    fn bob_scalar(bytes: &[u8; SECRETKEY_B_BYTES]) -> SecretScalar {
        let mut padded = Zeroizing::new([0u8; SCALAR_BYTES]);
        padded[..SECRETKEY_B_BYTES].copy_from_slice(bytes);
        SecretScalar::new(Role::Bob, *padded)
    }

    /// Alice's scalar `G(message || public)`.
    fn ephemeral_scalar(message: &[u8; MSG_BYTES], public: &PublicKey) -> SecretScalar {
        let digest = Zeroizing::new(squeeze::<SCALAR_BYTES>(
            Domain::G,
            &[message.as_slice(), public.as_bytes().as_slice()],
        ));
        SecretScalar::new(Role::Alice, *digest)
    }

    /// `H(message || ciphertext)`.
    fn derive_shared_secret(message: &[u8; MSG_BYTES], ciphertext: &Ciphertext) -> SharedSecret {
        SharedSecret::new(squeeze::<SHARED_SECRET_BYTES>(
            Domain::H,
            &[
                message.as_slice(),
                ciphertext.ephemeral_public.as_bytes().as_slice(),
                ciphertext.masked_message.as_slice(),
            ],
        ))
    }
}
