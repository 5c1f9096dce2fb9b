//! Fallback handlers for unrecognized messages.

use crate::commands::{main_keyboard, CommandHandler, Reply};
use crate::error::AppResult;
use async_trait::async_trait;
use session_store::Session;

/// Answers anything an unverified session sends that is not part of
/// the registration flow.
pub struct PromptRegistrationHandler;

impl PromptRegistrationHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PromptRegistrationHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for PromptRegistrationHandler {
    fn name(&self) -> &str {
        "prompt-registration"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn for_registered(&self) -> bool {
        false
    }

    async fn execute(&self, _session: &mut Session, _text: &str) -> AppResult<Reply> {
        Ok(Reply::text("Please send your phone number to register."))
    }
}

/// Answers unknown input from a registered session and restores the keyboard.
pub struct UnknownCommandHandler;

impl UnknownCommandHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnknownCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for UnknownCommandHandler {
    fn name(&self) -> &str {
        "unknown"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn for_registered(&self) -> bool {
        true
    }

    async fn execute(&self, _session: &mut Session, _text: &str) -> AppResult<Reply> {
        Ok(Reply::with_keyboard(
            "Unknown command. Use the buttons below to navigate.",
            main_keyboard(),
        ))
    }
}
