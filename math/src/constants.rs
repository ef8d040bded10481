//! Shared constants for the SIKEp503 base field, p = 2^250 * 3^159 - 1.

use crate::montgomery::{ChainStep, Limbs, PrimeField};
use crate::mp::Digit;

/// Bit length of p.
pub const NBITS_FIELD: u32 = 503;

/// Digits per field element.
pub const NWORDS_FIELD: usize = 8;

/// Bytes in the canonical encoding of a GF(p) element.
pub const FP_ENCODED_BYTES: usize = (NBITS_FIELD as usize + 7) / 8;

/// Bytes in the canonical encoding of a GF(p^2) element.
pub const FP2_ENCODED_BYTES: usize = 2 * FP_ENCODED_BYTES;

pub const P503: Limbs = [
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xABFF_FFFF_FFFF_FFFF,
    0x1308_5BDA_2211_E7A0,
    0x1B9B_F6C8_7B7E_7DAF,
    0x6045_C6BD_DA77_A4D0,
    0x0040_66F5_4181_1E1E,
];

pub const P503_X2: Limbs = [
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0x57FF_FFFF_FFFF_FFFF,
    0x2610_B7B4_4423_CF41,
    0x3737_ED90_F6FC_FB5E,
    0xC08B_8D7B_B4EF_49A0,
    0x0080_CDEA_8302_3C3C,
];

/// R^2 mod p, R = 2^512.
pub const MONTGOMERY_R2: Limbs = [
    0x5289_A0CF_641D_011F,
    0x9B88_2571_89FE_D2B9,
    0xA3B3_65D5_8DC8_F17A,
    0x5BC5_7AB6_EFF1_68EC,
    0x9E51_998B_D84D_4423,
    0xBF89_99CB_AC3B_5695,
    0x46E9_127B_CE14_CDB6,
    0x003F_6CFC_E8B8_1771,
];

/// R mod p, the Montgomery representation of one.
pub const MONTGOMERY_ONE: Limbs = [
    0x0000_0000_0000_03F9,
    0x0000_0000_0000_0000,
    0x0000_0000_0000_0000,
    0xB400_0000_0000_0000,
    0x63CB_1A6E_A6DE_D2B4,
    0x5168_9D8D_667E_B37D,
    0x8ACD_77C7_1AB2_4142,
    0x0026_FBAE_C60F_5953,
];

/// -p^-1 mod 2^64. p is 2^64 - 1 modulo 2^64, so this is 1.
pub const P503_INV_NEG: Digit = 1;

/// Window chain for a^((p-3)/4) over the odd powers a^(2k+1), k = 0..16.
const P503_INVERSION_CHAIN: [ChainStep; 43] = [
    ChainStep::new(8, 0),
    ChainStep::new(5, 9),
    ChainStep::new(5, 7),
    ChainStep::new(6, 10),
    ChainStep::new(7, 1),
    ChainStep::new(7, 0),
    ChainStep::new(7, 7),
    ChainStep::new(7, 3),
    ChainStep::new(5, 9),
    ChainStep::new(7, 0),
    ChainStep::new(8, 11),
    ChainStep::new(5, 1),
    ChainStep::new(6, 11),
    ChainStep::new(5, 11),
    ChainStep::new(5, 6),
    ChainStep::new(5, 3),
    ChainStep::new(5, 7),
    ChainStep::new(5, 4),
    ChainStep::new(6, 6),
    ChainStep::new(12, 13),
    ChainStep::new(5, 9),
    ChainStep::new(5, 7),
    ChainStep::new(5, 13),
    ChainStep::new(6, 12),
    ChainStep::new(8, 7),
    ChainStep::new(5, 6),
    ChainStep::new(5, 15),
    ChainStep::new(7, 15),
    ChainStep::new(5, 6),
    ChainStep::new(5, 7),
    ChainStep::new(8, 9),
    ChainStep::new(5, 0),
    ChainStep::new(8, 5),
    ChainStep::new(5, 7),
    ChainStep::new(5, 6),
    ChainStep::new(8, 8),
    ChainStep::new(5, 0),
    ChainStep::new(5, 1),
    ChainStep::new(5, 12),
    ChainStep::new(5, 14),
    ChainStep::new(8, 2),
    ChainStep::new(6, 11),
    ChainStep::repeated(5, 15, 49),
];

/// The SIKEp503 parameter table. Read-only and fully built at compile time,
/// so it is safe to share across threads without synchronization.
pub static P503_FIELD: PrimeField = PrimeField {
    modulus: P503,
    modulus_x2: P503_X2,
    montgomery_r2: MONTGOMERY_R2,
    montgomery_one: MONTGOMERY_ONE,
    inv_neg: P503_INV_NEG,
    bits: NBITS_FIELD,
    inversion_chain: &P503_INVERSION_CHAIN,
};
