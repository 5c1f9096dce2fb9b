//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use credential_store::{
    Credential, CredentialStore, MemoryCredentialStore, PasswordService, StoreError,
    StoredCredential,
};
use mockall::mock;
use password_bot::{CodeDelivery, DeliveryError, SessionRouter};
use session_store::{SessionConfig, SessionStore, VerificationCode, VerificationPolicy};
use std::sync::{Arc, Mutex};

pub const PHONE: &str = "+14155551234";

mock! {
    pub Store {}

    #[async_trait]
    impl CredentialStore for Store {
        async fn create(&self, credential: &Credential) -> Result<(), StoreError>;
        async fn list_by_phone(&self, phone: &str) -> Result<Vec<StoredCredential>, StoreError>;
        async fn search_by_phone_and_site(
            &self,
            phone: &str,
            site_fragment: &str,
        ) -> Result<Vec<StoredCredential>, StoreError>;
        async fn register_owner(&self, phone: &str) -> Result<(), StoreError>;
        async fn health_check(&self) -> bool;
    }
}

/// Code delivery that remembers what it sent.
#[derive(Default)]
pub struct RecordingDelivery {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingDelivery {
    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeDelivery for RecordingDelivery {
    async fn deliver(&self, phone: &str, code: &VerificationCode) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), code.as_str().to_string()));
        Ok(())
    }
}

/// A code guaranteed to differ from `code` in every digit.
pub fn wrong_code(code: &str) -> String {
    code.chars()
        .map(|c| {
            let digit = c.to_digit(10).unwrap();
            char::from_digit((digit + 1) % 10, 10).unwrap()
        })
        .collect()
}

/// Mock store that accepts owner registration.
pub fn registering_store() -> MockStore {
    let mut store = MockStore::new();
    store.expect_register_owner().returning(|_| Ok(()));
    store
}

pub fn test_router(
    store: Arc<dyn CredentialStore>,
    policy: VerificationPolicy,
) -> (SessionRouter, Arc<RecordingDelivery>) {
    test_router_with_sessions(store, policy, SessionConfig::default())
}

pub fn test_router_with_sessions(
    store: Arc<dyn CredentialStore>,
    policy: VerificationPolicy,
    sessions: SessionConfig,
) -> (SessionRouter, Arc<RecordingDelivery>) {
    let delivery = Arc::new(RecordingDelivery::default());
    let router = SessionRouter::with_default_handlers(
        SessionStore::new(sessions),
        Arc::new(PasswordService::new(store)),
        delivery.clone(),
        policy,
    );
    (router, delivery)
}

pub fn memory_router() -> (SessionRouter, Arc<MemoryCredentialStore>, Arc<RecordingDelivery>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let (router, delivery) = test_router(store.clone(), VerificationPolicy::default());
    (router, store, delivery)
}

/// Walk a chat through `/start`, phone number and code.
pub async fn register(router: &SessionRouter, delivery: &RecordingDelivery, chat: &str) {
    router.dispatch(chat, "/start").await.unwrap();
    router.dispatch(chat, PHONE).await.unwrap();

    let code = delivery.last_code().unwrap();
    let reply = router.dispatch(chat, &code).await.unwrap();
    assert_eq!(
        reply.text,
        "Verification successful! You can now manage your passwords."
    );
}
