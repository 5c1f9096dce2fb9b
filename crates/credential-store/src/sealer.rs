//! Boundary where secrets are transformed before storage.
//!
//! Secrets are currently stored as plain text. Everything that reaches the
//! store passes through a [`SecretSealer`] so an encrypting implementation can
//! be dropped in without touching the adapters.

use crate::error::StoreError;

pub trait SecretSealer: Send + Sync {
    /// Transform a secret before it is written.
    fn seal(&self, secret: &str) -> Result<String, StoreError>;

    /// Reverse [`SecretSealer::seal`] on a value read back from the store.
    fn open(&self, stored: &str) -> Result<String, StoreError>;
}

/// Pass-through sealer: stores secrets verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextSealer;

impl SecretSealer for PlaintextSealer {
    fn seal(&self, secret: &str) -> Result<String, StoreError> {
        Ok(secret.to_string())
    }

    fn open(&self, stored: &str) -> Result<String, StoreError> {
        Ok(stored.to_string())
    }
}
