use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use crate::error::{SikeError, SikeResult};

/// Runtime switches for [`Sike`](crate::kem::Sike).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KemConfig {
    /// When false every entry point fails with [`SikeError::PqDisabled`].
    pub pq_enabled: bool,
}

impl Default for KemConfig {
    fn default() -> Self {
        Self {
            pq_enabled: cfg!(feature = "pq"),
        }
    }
}

impl KemConfig {
    pub const fn disabled() -> Self {
        Self { pq_enabled: false }
    }

    pub(crate) fn ensure_enabled(&self, operation: &'static str) -> SikeResult<()> {
        if self.pq_enabled {
            Ok(())
        } else {
            warn!(operation, "rejected: post-quantum KEM disabled");
            Err(SikeError::PqDisabled)
        }
    }
}
