//! SIKEp503 key encapsulation.
//!
//! [`Sike`] implements keypair generation, encapsulation and decapsulation
//! with implicit rejection on top of an [`EphemeralExchange`] engine. Field
//! arithmetic lives in the `math` crate.
//!
//! ```
//! use rand::SeedableRng;
//! use sike_core::Sike;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let kem = Sike::new();
//! let (pk, sk) = kem.keypair(&mut rng)?;
//! let (ct, ss) = kem.encapsulate(&pk, &mut rng)?;
//! assert_eq!(ss, kem.decapsulate(&sk, &ct)?);
//! # Ok::<(), sike_core::SikeError>(())
//! ```

pub mod config;
pub mod error;
pub mod exchange;
pub mod hash;
pub mod kem;
pub mod keys;
pub mod logging;
pub mod params;
pub mod random;

pub use config::KemConfig;
pub use error::{SikeError, SikeResult};
pub use exchange::{EphemeralExchange, GroupExchange};
pub use kem::{KeypairSeeds, Sike};
pub use keys::{Ciphertext, PublicKey, SecretKey, SharedSecret};
