//! Implicit rejection:
//!
//! 1. A modified ciphertext never produces an error; it yields a shared
//!    secret of the usual length that differs from the genuine one.
//! 2. The rejection output is a pure function of (sk, ct).
//! 3. Accepting and rejecting drive the exchange engine through the same
//!    sequence of calls.

use std::cell::RefCell;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use test_strategy::proptest;

use sike_core::exchange::{Agreement, EphemeralExchange, GroupExchange, SecretScalar};
use sike_core::params::{CIPHERTEXT_BYTES, PUBLICKEY_BYTES, SHARED_SECRET_BYTES};
use sike_core::{Ciphertext, KemConfig, PublicKey, SecretKey, Sike};

fn fixture() -> (Sike, PublicKey, SecretKey, Ciphertext, [u8; SHARED_SECRET_BYTES]) {
    let kem = Sike::new();
    let mut rng = ChaCha20Rng::seed_from_u64(0xC0FFEE);
    let (pk, sk) = kem.keypair(&mut rng).expect("key generation should succeed");
    let (ct, ss) = kem.encapsulate(&pk, &mut rng).expect("encapsulation should succeed");
    let ss = *ss.as_bytes();
    (kem, pk, sk, ct, ss)
}

fn flip_bit(ct: &Ciphertext, bit: usize) -> Ciphertext {
    let mut bytes = ct.to_bytes();
    bytes[bit / 8] ^= 1 << (bit % 8);
    Ciphertext::from_bytes(&bytes).expect("length is unchanged")
}

#[proptest(cases = 16)]
fn flipped_bit_is_rejected_silently(#[strategy(0..CIPHERTEXT_BYTES * 8)] bit: usize) {
    let (kem, _, sk, ct, ss) = fixture();
    let tampered = flip_bit(&ct, bit);

    let rejected = kem.decapsulate(&sk, &tampered).expect("decapsulation never rejects loudly");
    assert_eq!(SHARED_SECRET_BYTES, rejected.as_bytes().len());
    assert_ne!(&ss, rejected.as_bytes());
}

#[test]
fn bit_flips_in_both_ciphertext_parts_are_rejected() {
    let (kem, _, sk, ct, ss) = fixture();

    // First byte of the ephemeral key, last byte of the masked message.
    for bit in [0, PUBLICKEY_BYTES * 8 - 1, PUBLICKEY_BYTES * 8, CIPHERTEXT_BYTES * 8 - 1] {
        let rejected = kem.decapsulate(&sk, &flip_bit(&ct, bit)).unwrap();
        assert_ne!(&ss, rejected.as_bytes(), "bit {bit} was accepted");
    }
}

#[test]
fn rejection_is_deterministic() {
    let (kem, _, sk, ct, _) = fixture();
    let tampered = flip_bit(&ct, 1000);

    let first = kem.decapsulate(&sk, &tampered).unwrap();
    assert_eq!(first, kem.decapsulate(&sk, &tampered).unwrap());
}

#[test]
fn rejection_depends_on_the_ciphertext() {
    let (kem, _, sk, ct, _) = fixture();
    let a = kem.decapsulate(&sk, &flip_bit(&ct, 7)).unwrap();
    let b = kem.decapsulate(&sk, &flip_bit(&ct, 8)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn malformed_ephemeral_key_is_rejected_silently() {
    let (kem, _, sk, ct, ss) = fixture();
    let garbage = Ciphertext {
        ephemeral_public: PublicKey::new([0xFF; PUBLICKEY_BYTES]),
        masked_message: ct.masked_message,
    };

    let rejected = kem.decapsulate(&sk, &garbage).unwrap();
    assert_ne!(&ss, rejected.as_bytes());
    assert_eq!(rejected, kem.decapsulate(&sk, &garbage).unwrap());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    KeyGeneration,
    SecretAgreement,
}

/// Records the calls the KEM makes into the engine.
#[derive(Default)]
struct Recording {
    inner: GroupExchange,
    calls: RefCell<Vec<Call>>,
}

impl EphemeralExchange for Recording {
    fn key_generation(&self, secret: &SecretScalar) -> PublicKey {
        self.calls.borrow_mut().push(Call::KeyGeneration);
        self.inner.key_generation(secret)
    }

    fn secret_agreement(&self, secret: &SecretScalar, peer: &PublicKey) -> Agreement {
        self.calls.borrow_mut().push(Call::SecretAgreement);
        self.inner.secret_agreement(secret, peer)
    }
}

#[test]
fn accept_and_reject_paths_make_the_same_engine_calls() {
    let (_, _, sk, ct, ss) = fixture();
    let recording = Recording::default();
    let kem = Sike::with_engine(&recording, KemConfig::default());

    let accepted = kem.decapsulate(&sk, &ct).unwrap();
    let accept_calls = recording.calls.take();
    assert_eq!(&ss, accepted.as_bytes());

    kem.decapsulate(&sk, &flip_bit(&ct, 3)).unwrap();
    let reject_calls = recording.calls.take();

    kem.decapsulate(
        &sk,
        &Ciphertext {
            ephemeral_public: PublicKey::new([0xFF; PUBLICKEY_BYTES]),
            masked_message: ct.masked_message,
        },
    )
    .unwrap();
    let failed_agreement_calls = recording.calls.take();

    assert_eq!(vec![Call::SecretAgreement, Call::KeyGeneration], accept_calls);
    assert_eq!(accept_calls, reject_calls);
    assert_eq!(accept_calls, failed_agreement_calls);
}
