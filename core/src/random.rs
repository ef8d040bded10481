use rand::TryCryptoRng;
use tracing::warn;

use crate::error::{SikeError, SikeResult};
use crate::exchange::{Role, SecretScalar};
use crate::params::SECRETKEY_B_BYTES;

/// Fill `out` from a cryptographically secure source, surfacing its failure.
pub fn fill_random<R>(rng: &mut R, out: &mut [u8]) -> SikeResult<()>
where
    R: TryCryptoRng + ?Sized,
{
    rng.try_fill_bytes(out).map_err(|err| {
        warn!(len = out.len(), "secure random source failed");
        SikeError::EntropyUnavailable(err.to_string())
    })
}

pub fn random_bytes<R, const N: usize>(rng: &mut R) -> SikeResult<[u8; N]>
where
    R: TryCryptoRng + ?Sized,
{
    let mut out = [0u8; N];
    fill_random(rng, &mut out)?;
    Ok(out)
}

/// Bob's secret scalar: random bytes with the top byte masked into range.
pub fn random_mod_order_b<R>(rng: &mut R) -> SikeResult<SecretScalar>
where
    R: TryCryptoRng + ?Sized,
{
    let bytes = random_bytes::<R, SECRETKEY_B_BYTES>(rng)?;
    Ok(SecretScalar::new(Role::Bob, bytes))
}
