//! Add commands - usage hint and credential insert.

use crate::commands::{CommandHandler, Reply, ADD_PASSWORD};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use credential_store::{Credential, PasswordService};
use session_store::Session;
use std::sync::Arc;
use tracing::{info, warn};

/// Split `Add <name> <password>` into its name and password.
///
/// Tokens are separated by whitespace; the password keeps any inner spaces.
/// Returns `None` when fewer than three tokens are present.
pub fn parse_add_command(text: &str) -> Option<(&str, &str)> {
    let (_, rest) = text.trim().split_once(char::is_whitespace)?;
    let (name, password) = rest.trim_start().split_once(char::is_whitespace)?;
    let password = password.trim();

    if name.is_empty() || password.is_empty() {
        return None;
    }
    Some((name, password))
}

pub struct AddUsageHandler;

impl AddUsageHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AddUsageHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for AddUsageHandler {
    fn name(&self) -> &str {
        "add-usage"
    }

    fn trigger(&self) -> Option<&str> {
        Some(ADD_PASSWORD)
    }

    fn for_registered(&self) -> bool {
        true
    }

    async fn execute(&self, _session: &mut Session, _text: &str) -> AppResult<Reply> {
        Ok(Reply::text(
            "Please send the password details in the format: Add <name> <password>",
        ))
    }
}

pub struct AddPasswordHandler {
    service: Arc<PasswordService>,
}

impl AddPasswordHandler {
    pub fn new(service: Arc<PasswordService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for AddPasswordHandler {
    fn name(&self) -> &str {
        "add"
    }

    fn for_registered(&self) -> bool {
        true
    }

    fn accepts(&self, text: &str) -> bool {
        text.starts_with("Add")
    }

    async fn execute(&self, session: &mut Session, text: &str) -> AppResult<Reply> {
        let phone = session.registered_phone().ok_or(AppError::NotRegistered)?;

        let Some((site, password)) = parse_add_command(text) else {
            return Ok(Reply::text("Invalid format. Use: Add <name> <password>"));
        };

        match self
            .service
            .create(Credential::new(phone, site, password))
            .await
        {
            Ok(()) => {
                info!("Password added for site {}", site);
                Ok(Reply::text("Password added successfully."))
            }
            Err(e) => {
                warn!("Failed to add password: {}", e);
                Ok(Reply::text("Error adding password. Please try again."))
            }
        }
    }
}
