//! Credential types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A credential as written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Owner phone number
    pub phone: String,
    /// Free-text site label
    pub site: String,
    /// Secret, stored verbatim
    pub secret: String,
}

impl Credential {
    pub fn new(
        phone: impl Into<String>,
        site: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            site: site.into(),
            secret: secret.into(),
        }
    }
}

/// A `(site, secret)` pair returned by store reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredCredential {
    pub site: String,
    #[sqlx(rename = "password")]
    pub secret: String,
}

/// A phone number that has started registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub phone: String,
    pub registered_at: DateTime<Utc>,
}

impl OwnerRecord {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            registered_at: Utc::now(),
        }
    }
}
