//! Domain-separated cSHAKE256.
//!
//! Each [`Domain`] is a two-byte little-endian customization string with an
//! empty function name. Inputs are absorbed in order without framing, so
//! callers concatenating fixed-size fields get the same digest as hashing the
//! joined buffer.

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    CShake256, CShake256Core,
};

/// Hash domains used by the KEM transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Domain {
    /// Ephemeral scalar from (message || public key).
    G = 0,
    /// Shared secret from (message || ciphertext).
    H = 1,
    /// Message pad from the shared value.
    P = 2,
}

impl Domain {
    pub const fn label(self) -> u16 {
        self as u16
    }
}

/// Absorb `parts` under `domain` and fill `out` from the XOF.
pub fn cshake256_simple(domain: Domain, parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = CShake256::from_core(CShake256Core::new(&domain.label().to_le_bytes()));
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize_xof().read(out);
}

/// Fixed-length convenience over [`cshake256_simple`].
pub fn squeeze<const N: usize>(domain: Domain, parts: &[&[u8]]) -> [u8; N] {
    let mut out = [0u8; N];
    cshake256_simple(domain, parts, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! xof_smoke_tests {
        ($modname:ident, $domain:expr) => {
            mod $modname {
                use super::*;

                #[test]
                fn deterministic_and_length() {
                    let a: [u8; 64] = squeeze($domain, &[b"determinism".as_slice()]);
                    let b: [u8; 64] = squeeze($domain, &[b"determinism".as_slice()]);
                    assert_eq!(a, b);
                }

                #[test]
                fn prefix_property() {
                    let a: [u8; 64] = squeeze($domain, &[b"prefix test".as_slice()]);
                    let b: [u8; 128] = squeeze($domain, &[b"prefix test".as_slice()]);
                    assert_eq!(&b[..64], &a[..]);
                }

                #[test]
                fn input_sensitivity() {
                    let a: [u8; 48] = squeeze($domain, &[b"abc".as_slice()]);
                    let b: [u8; 48] = squeeze($domain, &[b"abd".as_slice()]);
                    assert_ne!(a, b);
                }

                #[test]
                fn split_input_matches_joined_input() {
                    let joined: [u8; 32] = squeeze($domain, &[b"message||key".as_slice()]);
                    let split: [u8; 32] = squeeze($domain, &[b"message".as_slice(), b"||", b"key"]);
                    assert_eq!(joined, split);
                }

                #[test]
                fn empty_message_is_ok() {
                    let out: [u8; 32] = squeeze($domain, &[]);
                    assert_eq!(out.len(), 32);
                }
            }
        };
    }

    xof_smoke_tests!(domain_g, Domain::G);
    xof_smoke_tests!(domain_h, Domain::H);
    xof_smoke_tests!(domain_p, Domain::P);

    #[test]
    fn domains_are_separated() {
        let g: [u8; 32] = squeeze(Domain::G, &[b"same input".as_slice()]);
        let h: [u8; 32] = squeeze(Domain::H, &[b"same input".as_slice()]);
        let p: [u8; 32] = squeeze(Domain::P, &[b"same input".as_slice()]);
        assert_ne!(g, h);
        assert_ne!(h, p);
        assert_ne!(g, p);
    }

    #[test]
    fn labels_are_small_integers() {
        assert_eq!([0, 1, 2], [Domain::G, Domain::H, Domain::P].map(Domain::label));
    }
}
