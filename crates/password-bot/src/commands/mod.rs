//! Bot command handlers.

mod add;
mod fallback;
mod register;
mod retrieve;
mod start;
mod verify;

pub use add::{parse_add_command, AddPasswordHandler, AddUsageHandler};
pub use fallback::{PromptRegistrationHandler, UnknownCommandHandler};
pub use register::RegisterHandler;
pub use retrieve::RetrievePasswordHandler;
pub use start::StartHandler;
pub use verify::VerifyCodeHandler;

use crate::error::AppResult;
use async_trait::async_trait;
use session_store::Session;
use telegram_client::ReplyKeyboardMarkup;

/// Keyboard label that asks for the add-password format.
pub const ADD_PASSWORD: &str = "Add Password";

/// Keyboard label that lists saved sites.
pub const RETRIEVE_PASSWORD: &str = "Retrieve Password";

/// Navigation keyboard shown to registered users.
pub fn main_keyboard() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup::from_rows([[ADD_PASSWORD, RETRIEVE_PASSWORD]])
}

/// Text sent back to the chat, optionally replacing its keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<ReplyKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: ReplyKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handler name, used in logs.
    fn name(&self) -> &str;

    /// Exact message text this handler answers to.
    fn trigger(&self) -> Option<&str> {
        None
    }

    /// Whether this handler takes everything its side of the router leaves over.
    fn is_default(&self) -> bool {
        false
    }

    /// Whether this handler serves registered sessions (`true`) or
    /// sessions still verifying (`false`).
    fn for_registered(&self) -> bool;

    /// Check if this handler matches the message.
    fn accepts(&self, text: &str) -> bool {
        match self.trigger() {
            Some(trigger) => text == trigger,
            None => self.is_default(),
        }
    }

    /// Check if this handler applies to the session and message.
    fn matches(&self, session: &Session, text: &str) -> bool {
        session.is_registered() == self.for_registered() && self.accepts(text)
    }

    /// Execute the command.
    async fn execute(&self, session: &mut Session, text: &str) -> AppResult<Reply>;
}
