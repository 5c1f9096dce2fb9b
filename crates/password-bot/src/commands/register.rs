//! Register command - binds a phone number and issues a verification code.

use crate::commands::{CommandHandler, Reply};
use crate::delivery::CodeDelivery;
use crate::error::AppResult;
use async_trait::async_trait;
use credential_store::{canonical_phone, phone_fingerprint, PasswordService};
use session_store::Session;
use std::sync::Arc;
use tracing::{info, warn};

pub struct RegisterHandler {
    service: Arc<PasswordService>,
    delivery: Arc<dyn CodeDelivery>,
}

impl RegisterHandler {
    pub fn new(service: Arc<PasswordService>, delivery: Arc<dyn CodeDelivery>) -> Self {
        Self { service, delivery }
    }
}

#[async_trait]
impl CommandHandler for RegisterHandler {
    fn name(&self) -> &str {
        "register"
    }

    fn for_registered(&self) -> bool {
        false
    }

    fn accepts(&self, text: &str) -> bool {
        text.starts_with('+')
    }

    async fn execute(&self, session: &mut Session, text: &str) -> AppResult<Reply> {
        // Same key the HTTP API stores under.
        let phone = canonical_phone(text);

        // The owner row goes first; a failed write leaves the session untouched.
        if let Err(e) = self.service.register_owner(&phone).await {
            warn!("Failed to register owner: {}", e);
            return Ok(Reply::text("Error registering user. Please try again."));
        }

        let code = session.begin_registration(phone.clone())?;

        if let Err(e) = self.delivery.deliver(&phone, &code).await {
            warn!("Code delivery failed: {}", e);
        }

        info!(owner = %phone_fingerprint(&phone), "Verification code issued");
        Ok(Reply::text(
            "A verification code has been sent to your phone. Please enter the 6-digit code.",
        ))
    }
}
