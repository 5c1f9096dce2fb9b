//! In-memory credential store.

use crate::error::StoreError;
use crate::store::CredentialStore;
use crate::types::{Credential, OwnerRecord, StoredCredential};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<Vec<Credential>>,
    owners: RwLock<HashMap<String, OwnerRecord>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored credentials across all owners.
    pub async fn count(&self) -> usize {
        self.credentials.read().await.len()
    }

    /// Get the owner record for a phone, if registration was started.
    pub async fn owner(&self, phone: &str) -> Option<OwnerRecord> {
        self.owners.read().await.get(phone).cloned()
    }

    fn select(
        credentials: &[Credential],
        predicate: impl Fn(&Credential) -> bool,
    ) -> Vec<StoredCredential> {
        credentials
            .iter()
            .filter(|c| predicate(*c))
            .map(|c| StoredCredential {
                site: c.site.clone(),
                secret: c.secret.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut credentials = self.credentials.write().await;
        credentials.push(credential.clone());
        debug!("Stored credential (total: {})", credentials.len());
        Ok(())
    }

    async fn list_by_phone(&self, phone: &str) -> Result<Vec<StoredCredential>, StoreError> {
        let credentials = self.credentials.read().await;
        let found = Self::select(&credentials, |c| c.phone == phone);

        if found.is_empty() {
            return Err(StoreError::NoCredentials);
        }
        Ok(found)
    }

    async fn search_by_phone_and_site(
        &self,
        phone: &str,
        site_fragment: &str,
    ) -> Result<Vec<StoredCredential>, StoreError> {
        let needle = site_fragment.to_lowercase();
        let credentials = self.credentials.read().await;
        let found = Self::select(&credentials, |c| {
            c.phone == phone && c.site.to_lowercase().contains(&needle)
        });

        if found.is_empty() {
            return Err(StoreError::NoMatchingSite);
        }
        Ok(found)
    }

    async fn register_owner(&self, phone: &str) -> Result<(), StoreError> {
        self.owners
            .write()
            .await
            .entry(phone.to_string())
            .or_insert_with(|| OwnerRecord::new(phone));
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
