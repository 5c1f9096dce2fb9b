//! API request and response types.

use credential_store::{Credential, StoredCredential};
use serde::{Deserialize, Serialize};

/// Request to store a password.
#[derive(Debug, Deserialize)]
pub struct CreatePasswordRequest {
    pub phone: String,
    pub site: String,
    pub password: String,
}

impl From<CreatePasswordRequest> for Credential {
    fn from(request: CreatePasswordRequest) -> Self {
        Credential::new(request.phone, request.site, request.password)
    }
}

/// Query for `GET /password`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub phone: Option<String>,
    pub site: Option<String>,
}

/// A stored password as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordEntry {
    pub site: String,
    pub password: String,
}

impl From<StoredCredential> for PasswordEntry {
    fn from(credential: StoredCredential) -> Self {
        Self {
            site: credential.site,
            password: credential.secret,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage_healthy: bool,
}
