//! Storage contract shared by every backend.

use crate::error::StoreError;
use crate::types::{Credential, StoredCredential};
use async_trait::async_trait;

/// Durable mapping from `(phone, site)` to secrets.
///
/// Every call is a single independent round trip; nothing spans calls.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert one credential. No uniqueness or owner existence check.
    async fn create(&self, credential: &Credential) -> Result<(), StoreError>;

    /// All credentials for an exact phone match.
    ///
    /// Returns [`StoreError::NoCredentials`] when nothing is stored.
    async fn list_by_phone(&self, phone: &str) -> Result<Vec<StoredCredential>, StoreError>;

    /// Credentials for an exact phone whose site contains `site_fragment`,
    /// ignoring case. Wildcard characters in the fragment match literally.
    ///
    /// Returns [`StoreError::NoMatchingSite`] when nothing matches.
    async fn search_by_phone_and_site(
        &self,
        phone: &str,
        site_fragment: &str,
    ) -> Result<Vec<StoredCredential>, StoreError>;

    /// Record that `phone` started registration. Repeated calls are no-ops.
    async fn register_owner(&self, phone: &str) -> Result<(), StoreError>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> bool;
}

/// Escape `LIKE` metacharacters so the fragment matches as a literal substring.
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain() {
        assert_eq!(escape_like("mail"), "mail");
    }

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
