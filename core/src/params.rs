//! SIKEp503 parameter set.

use math::constants::FP2_ENCODED_BYTES;

pub const CRYPTO_ALGNAME: &str = "SIKEp503";

/// Bit length of Alice's subgroup order 2^250.
pub const OALICE_BITS: usize = 250;
/// Bit length of Bob's subgroup order 3^159.
pub const OBOB_BITS: usize = 253;

pub const SECRETKEY_A_BYTES: usize = (OALICE_BITS + 7) / 8;
pub const SECRETKEY_B_BYTES: usize = (OBOB_BITS + 7) / 8;

/// Mask for the top byte of an Alice scalar.
pub const MASK_ALICE: u8 = 0x03;
/// Mask for the top byte of a Bob scalar.
pub const MASK_BOB: u8 = 0x0F;

/// Random message and seed length.
pub const MSG_BYTES: usize = 24;

/// Encoded shared value (one GF(p^2) element).
pub const SHARED_VALUE_BYTES: usize = FP2_ENCODED_BYTES;

/// Three GF(p^2) elements.
pub const PUBLICKEY_BYTES: usize = 3 * FP2_ENCODED_BYTES;

/// seed || scalar || public key.
pub const SECRETKEY_BYTES: usize = MSG_BYTES + SECRETKEY_B_BYTES + PUBLICKEY_BYTES;

/// ephemeral public key || masked message.
pub const CIPHERTEXT_BYTES: usize = PUBLICKEY_BYTES + MSG_BYTES;

pub const SHARED_SECRET_BYTES: usize = 16;

const _: () = assert!(SECRETKEY_A_BYTES == 32 && SECRETKEY_B_BYTES == 32);
const _: () = assert!(PUBLICKEY_BYTES == 378);
const _: () = assert!(SECRETKEY_BYTES == 434);
const _: () = assert!(CIPHERTEXT_BYTES == 402);
