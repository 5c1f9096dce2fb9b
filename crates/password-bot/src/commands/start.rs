//! Start command - greets a new chat.

use crate::commands::{CommandHandler, Reply};
use crate::error::AppResult;
use async_trait::async_trait;
use session_store::Session;

pub struct StartHandler;

impl StartHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StartHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for StartHandler {
    fn name(&self) -> &str {
        "start"
    }

    fn trigger(&self) -> Option<&str> {
        Some("/start")
    }

    fn for_registered(&self) -> bool {
        false
    }

    async fn execute(&self, session: &mut Session, _text: &str) -> AppResult<Reply> {
        session.start();
        Ok(Reply::text(
            "Welcome! Please send your phone number starting with '+'.",
        ))
    }
}
