//! Byte-level key, ciphertext and shared-secret types.
//!
//! Layouts:
//! - secret key: `seed || scalar || public key`
//! - ciphertext: `ephemeral public key || masked message`

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use subtle::Choice;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{SikeError, SikeResult};
use crate::params::{
    CIPHERTEXT_BYTES, MSG_BYTES, PUBLICKEY_BYTES, SECRETKEY_B_BYTES, SECRETKEY_BYTES,
    SHARED_SECRET_BYTES,
};

fn exact<const N: usize>(what: &'static str, bytes: &[u8]) -> SikeResult<[u8; N]> {
    <[u8; N]>::try_from(bytes).map_err(|_| SikeError::InvalidLength {
        what,
        expected: N,
        found: bytes.len(),
    })
}

/// Implements byte-slice conversions and byte-string serde for a type with
/// `to_bytes` and `from_bytes`.
macro_rules! impl_byte_encoding {
    ($ty:ident) => {
        impl TryFrom<&[u8]> for $ty {
            type Error = SikeError;

            fn try_from(bytes: &[u8]) -> SikeResult<Self> {
                Self::from_bytes(bytes)
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_bytes(&self.to_bytes()[..])
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let bytes = Vec::<u8>::deserialize(deserializer)?;
                Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// An encoded exchange public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey([u8; PUBLICKEY_BYTES]);

impl PublicKey {
    pub const fn new(bytes: [u8; PUBLICKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> SikeResult<Self> {
        exact("public key", bytes).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLICKEY_BYTES] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; PUBLICKEY_BYTES] {
        self.0
    }
}

impl_byte_encoding!(PublicKey);

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl ConstantTimeEq for PublicKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(")?;
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..)")
    }
}

/// The decapsulation key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    seed: [u8; MSG_BYTES],
    scalar: [u8; SECRETKEY_B_BYTES],
    #[zeroize(skip)]
    public: PublicKey,
}

impl SecretKey {
    pub(crate) fn new(
        seed: [u8; MSG_BYTES],
        scalar: [u8; SECRETKEY_B_BYTES],
        public: PublicKey,
    ) -> Self {
        Self {
            seed,
            scalar,
            public,
        }
    }

    /// The embedded public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Implicit-rejection seed.
    pub(crate) fn seed(&self) -> &[u8; MSG_BYTES] {
        &self.seed
    }

    pub(crate) fn scalar(&self) -> &[u8; SECRETKEY_B_BYTES] {
        &self.scalar
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRETKEY_BYTES]> {
        let mut out = Zeroizing::new([0u8; SECRETKEY_BYTES]);
        let (seed, rest) = out.split_at_mut(MSG_BYTES);
        let (scalar, public) = rest.split_at_mut(SECRETKEY_B_BYTES);
        seed.copy_from_slice(&self.seed);
        scalar.copy_from_slice(&self.scalar);
        public.copy_from_slice(self.public.as_bytes());
        out
    }

    /// Parse a secret key. The scalar is taken as is; it is masked into
    /// range when used.
    pub fn from_bytes(bytes: &[u8]) -> SikeResult<Self> {
        let bytes = Zeroizing::new(exact::<SECRETKEY_BYTES>("secret key", bytes)?);
        let (seed, rest) = bytes.split_at(MSG_BYTES);
        let (scalar, public) = rest.split_at(SECRETKEY_B_BYTES);
        Ok(Self {
            seed: exact("secret key seed", seed)?,
            scalar: exact("secret key scalar", scalar)?,
            public: PublicKey::from_bytes(public)?,
        })
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = SikeError;

    fn try_from(bytes: &[u8]) -> SikeResult<Self> {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// An encapsulation: the sender's ephemeral public key and the masked
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    pub ephemeral_public: PublicKey,
    pub masked_message: [u8; MSG_BYTES],
}

impl Ciphertext {
    pub fn to_bytes(&self) -> [u8; CIPHERTEXT_BYTES] {
        let mut out = [0u8; CIPHERTEXT_BYTES];
        out[..PUBLICKEY_BYTES].copy_from_slice(self.ephemeral_public.as_bytes());
        out[PUBLICKEY_BYTES..].copy_from_slice(&self.masked_message);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> SikeResult<Self> {
        let bytes = exact::<CIPHERTEXT_BYTES>("ciphertext", bytes)?;
        let (public, masked) = bytes.split_at(PUBLICKEY_BYTES);
        Ok(Self {
            ephemeral_public: PublicKey::from_bytes(public)?,
            masked_message: exact("masked message", masked)?,
        })
    }
}

impl_byte_encoding!(Ciphertext);

/// The KEM output key.
///
/// Compares in constant time and is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_BYTES]);

impl SharedSecret {
    pub(crate) fn new(bytes: [u8; SHARED_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_BYTES] {
        &self.0
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_public() -> PublicKey {
        let mut bytes = [0u8; PUBLICKEY_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = i as u8;
        }
        PublicKey::new(bytes)
    }

    #[test]
    fn secret_key_layout_is_seed_scalar_public() {
        let sk = SecretKey::new([1; MSG_BYTES], [2; SECRETKEY_B_BYTES], sample_public());
        let bytes = sk.to_bytes();

        assert_eq!([1; MSG_BYTES], bytes[..MSG_BYTES]);
        assert_eq!([2; SECRETKEY_B_BYTES], bytes[MSG_BYTES..MSG_BYTES + SECRETKEY_B_BYTES]);
        assert_eq!(sample_public().as_bytes()[..], bytes[MSG_BYTES + SECRETKEY_B_BYTES..]);

        let parsed = SecretKey::from_bytes(&bytes[..]).unwrap();
        assert_eq!(sk.seed(), parsed.seed());
        assert_eq!(sk.scalar(), parsed.scalar());
        assert_eq!(sk.public_key(), parsed.public_key());
    }

    #[test]
    fn ciphertext_layout_is_public_then_masked_message() {
        let ct = Ciphertext {
            ephemeral_public: sample_public(),
            masked_message: [0xAA; MSG_BYTES],
        };
        let bytes = ct.to_bytes();
        assert_eq!(sample_public().as_bytes()[..], bytes[..PUBLICKEY_BYTES]);
        assert_eq!([0xAA; MSG_BYTES], bytes[PUBLICKEY_BYTES..]);
        assert_eq!(ct, Ciphertext::try_from(&bytes[..]).unwrap());
    }

    #[test]
    fn wrong_lengths_are_reported() {
        assert_eq!(
            Err(SikeError::InvalidLength {
                what: "ciphertext",
                expected: CIPHERTEXT_BYTES,
                found: 3
            }),
            Ciphertext::from_bytes(&[0; 3])
        );
        assert!(matches!(
            PublicKey::try_from(&[0u8; PUBLICKEY_BYTES + 1][..]),
            Err(SikeError::InvalidLength { what: "public key", .. })
        ));
        assert!(SecretKey::from_bytes(&[0; SECRETKEY_BYTES - 1]).is_err());
    }

    #[test]
    fn public_types_round_trip_through_json() {
        let pk = sample_public();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(pk, serde_json::from_str::<PublicKey>(&json).unwrap());

        let ct = Ciphertext {
            ephemeral_public: pk,
            masked_message: [7; MSG_BYTES],
        };
        let json = serde_json::to_string(&ct).unwrap();
        assert_eq!(ct, serde_json::from_str::<Ciphertext>(&json).unwrap());
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let sk = SecretKey::new([0x5A; MSG_BYTES], [0x5A; SECRETKEY_B_BYTES], sample_public());
        assert_eq!(
            "SecretKey { public: PublicKey(0001020304050607..), .. }",
            format!("{sk:?}")
        );
        assert_eq!("SharedSecret(..)", format!("{:?}", SharedSecret::new([1; 16])));
    }

    #[test]
    fn shared_secret_equality() {
        let a = SharedSecret::new([3; SHARED_SECRET_BYTES]);
        let b = SharedSecret::new([3; SHARED_SECRET_BYTES]);
        let mut c_bytes = [3; SHARED_SECRET_BYTES];
        c_bytes[15] = 4;
        assert_eq!(a, b);
        assert_ne!(a, SharedSecret::new(c_bytes));
    }
}
