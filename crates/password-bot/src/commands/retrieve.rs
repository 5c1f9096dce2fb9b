//! Retrieve command - lists saved site names.

use crate::commands::{CommandHandler, Reply, RETRIEVE_PASSWORD};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use credential_store::PasswordService;
use session_store::Session;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct RetrievePasswordHandler {
    service: Arc<PasswordService>,
}

impl RetrievePasswordHandler {
    pub fn new(service: Arc<PasswordService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for RetrievePasswordHandler {
    fn name(&self) -> &str {
        "retrieve"
    }

    fn trigger(&self) -> Option<&str> {
        Some(RETRIEVE_PASSWORD)
    }

    fn for_registered(&self) -> bool {
        true
    }

    async fn execute(&self, session: &mut Session, _text: &str) -> AppResult<Reply> {
        let phone = session.registered_phone().ok_or(AppError::NotRegistered)?;

        let credentials = match self.service.list_by_phone(phone).await {
            Ok(credentials) => credentials,
            Err(e) if e.is_not_found() => {
                debug!("No passwords stored");
                return Ok(Reply::text("No passwords found."));
            }
            Err(e) => {
                warn!("Failed to list passwords: {}", e);
                return Ok(Reply::text("No passwords found."));
            }
        };

        // Secrets stay out of the chat.
        let mut response = String::from("Your saved passwords:\n");
        for credential in &credentials {
            response.push_str(&credential.site);
            response.push('\n');
        }

        Ok(Reply::text(response))
    }
}
