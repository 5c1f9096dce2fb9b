//! Password service shared by the chat bot and the HTTP API.

use crate::error::StoreError;
use crate::phone::canonical_phone;
use crate::redact::phone_fingerprint;
use crate::sealer::{PlaintextSealer, SecretSealer};
use crate::store::CredentialStore;
use crate::types::{Credential, StoredCredential};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Validating, logging front for a [`CredentialStore`].
#[derive(Clone)]
pub struct PasswordService {
    store: Arc<dyn CredentialStore>,
    sealer: Arc<dyn SecretSealer>,
}

impl PasswordService {
    /// Create a service that stores secrets verbatim.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self::with_sealer(store, Arc::new(PlaintextSealer))
    }

    pub fn with_sealer(store: Arc<dyn CredentialStore>, sealer: Arc<dyn SecretSealer>) -> Self {
        Self { store, sealer }
    }

    /// Store a credential.
    pub async fn create(&self, credential: Credential) -> Result<(), StoreError> {
        let credential = Credential {
            phone: canonical_phone(&credential.phone),
            ..credential
        };
        require("phone", &credential.phone)?;
        require("site", &credential.site)?;
        require("password", &credential.secret)?;

        let owner = phone_fingerprint(&credential.phone);
        info!(owner = %owner, site = %credential.site, "Creating password");

        let sealed = Credential {
            secret: self.sealer.seal(&credential.secret)?,
            ..credential
        };

        self.store.create(&sealed).await.map_err(|e| {
            error!(owner = %owner, "Error while creating password: {}", e);
            e
        })
    }

    /// All credentials owned by `phone`.
    pub async fn list_by_phone(&self, phone: &str) -> Result<Vec<StoredCredential>, StoreError> {
        let phone = canonical_phone(phone);
        require("phone", &phone)?;

        let owner = phone_fingerprint(&phone);
        info!(owner = %owner, "Fetching passwords by phone");

        let found = self
            .store
            .list_by_phone(&phone)
            .await
            .map_err(|e| log_failure(&owner, e))?;

        info!(owner = %owner, count = found.len(), "Fetched passwords by phone");
        self.open_all(found)
    }

    /// Credentials owned by `phone` whose site contains `site`, ignoring case.
    pub async fn search_by_phone_and_site(
        &self,
        phone: &str,
        site: &str,
    ) -> Result<Vec<StoredCredential>, StoreError> {
        let phone = canonical_phone(phone);
        require("phone", &phone)?;
        require("site", site)?;

        let owner = phone_fingerprint(&phone);
        info!(owner = %owner, site = %site, "Searching passwords by site");

        let found = self
            .store
            .search_by_phone_and_site(&phone, site)
            .await
            .map_err(|e| log_failure(&owner, e))?;

        info!(owner = %owner, count = found.len(), "Fetched passwords by site");
        self.open_all(found)
    }

    /// Persist the owner record for a phone that is starting verification.
    pub async fn register_owner(&self, phone: &str) -> Result<(), StoreError> {
        let phone = canonical_phone(phone);
        require("phone", &phone)?;

        let owner = phone_fingerprint(&phone);
        self.store.register_owner(&phone).await.map_err(|e| {
            error!(owner = %owner, "Error while registering owner: {}", e);
            e
        })?;

        info!(owner = %owner, "Owner registered");
        Ok(())
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    fn open_all(&self, found: Vec<StoredCredential>) -> Result<Vec<StoredCredential>, StoreError> {
        found
            .into_iter()
            .map(|c| {
                Ok(StoredCredential {
                    secret: self.sealer.open(&c.secret)?,
                    site: c.site,
                })
            })
            .collect()
    }
}

fn require(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Invalid(format!("{} is required", field)));
    }
    Ok(())
}

fn log_failure(owner: &str, e: StoreError) -> StoreError {
    if e.is_not_found() {
        warn!(owner = %owner, "{}", e);
    } else {
        error!(owner = %owner, "Error while fetching passwords: {}", e);
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCredentialStore;

    struct ReversingSealer;

    impl SecretSealer for ReversingSealer {
        fn seal(&self, secret: &str) -> Result<String, StoreError> {
            Ok(secret.chars().rev().collect())
        }

        fn open(&self, stored: &str) -> Result<String, StoreError> {
            Ok(stored.chars().rev().collect())
        }
    }

    fn service() -> (PasswordService, Arc<MemoryCredentialStore>) {
        let store = Arc::new(MemoryCredentialStore::new());
        (PasswordService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (service, _) = service();
        service
            .create(Credential::new("+1555", "mail", "x"))
            .await
            .unwrap();

        let found = service.list_by_phone("+1555").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].site, "mail");
        assert_eq!(found[0].secret, "x");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let (service, store) = service();

        for credential in [
            Credential::new("", "mail", "x"),
            Credential::new("+1555", "  ", "x"),
            Credential::new("+1555", "mail", ""),
        ] {
            let err = service.create(credential).await.unwrap_err();
            assert!(matches!(err, StoreError::Invalid(_)));
        }
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_search_requires_site() {
        let (service, _) = service();
        let err = service
            .search_by_phone_and_site("+1555", " ")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_not_found_passes_through() {
        let (service, _) = service();
        let err = service.list_by_phone("+1555").await.unwrap_err();
        assert!(matches!(err, StoreError::NoCredentials));
    }

    #[tokio::test]
    async fn test_sealer_applied_on_write_and_read() {
        let store = Arc::new(MemoryCredentialStore::new());
        let service = PasswordService::with_sealer(store.clone(), Arc::new(ReversingSealer));

        service
            .create(Credential::new("+1555", "mail", "abc"))
            .await
            .unwrap();

        let raw = store.list_by_phone("+1555").await.unwrap();
        assert_eq!(raw[0].secret, "cba");

        let opened = service.search_by_phone_and_site("+1555", "MAIL").await.unwrap();
        assert_eq!(opened[0].secret, "abc");
    }

    #[tokio::test]
    async fn test_phone_formatting_is_canonicalized() {
        let (service, store) = service();
        service
            .create(Credential::new(" +1 415 555 1234 ", "mail", "x"))
            .await
            .unwrap();

        let raw = store.list_by_phone("+14155551234").await.unwrap();
        assert_eq!(raw.len(), 1);

        let found = service.list_by_phone("+1 (415) 555-1234").await.unwrap();
        assert_eq!(found[0].site, "mail");

        let found = service
            .search_by_phone_and_site("+1-415-555-1234", "MA")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_register_owner_canonicalizes_phone() {
        let (service, store) = service();
        service.register_owner("+1 415.555.1234").await.unwrap();
        assert!(store.owner("+14155551234").await.is_some());

        service.register_owner("+123").await.unwrap();
        assert!(store.owner("+123").await.is_some());
    }
}
