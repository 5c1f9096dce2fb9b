//! Session router - picks a command handler for each incoming message.

use crate::commands::*;
use crate::delivery::CodeDelivery;
use crate::error::{AppError, AppResult};
use credential_store::PasswordService;
use session_store::{SessionStore, VerificationPolicy};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Routes chat messages to handlers according to the session's state.
///
/// Handlers are tried in order and the first match runs. The session stays
/// locked for the whole dispatch, so messages for one chat are handled one
/// at a time while other chats proceed independently.
pub struct SessionRouter {
    sessions: SessionStore,
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl SessionRouter {
    pub fn new(sessions: SessionStore, handlers: Vec<Box<dyn CommandHandler>>) -> Self {
        Self { sessions, handlers }
    }

    /// Build a router with the full registration and password command set.
    pub fn with_default_handlers(
        sessions: SessionStore,
        service: Arc<PasswordService>,
        delivery: Arc<dyn CodeDelivery>,
        policy: VerificationPolicy,
    ) -> Self {
        let handlers: Vec<Box<dyn CommandHandler>> = vec![
            // Unregistered
            Box::new(StartHandler::new()),
            Box::new(RegisterHandler::new(service.clone(), delivery)),
            Box::new(VerifyCodeHandler::new(policy)),
            Box::new(PromptRegistrationHandler::new()),
            // Registered
            Box::new(AddUsageHandler::new()),
            Box::new(AddPasswordHandler::new(service.clone())),
            Box::new(RetrievePasswordHandler::new(service)),
            Box::new(UnknownCommandHandler::new()),
        ];

        Self::new(sessions, handlers)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one message for `session_id` and produce the reply.
    #[instrument(skip(self, text))]
    pub async fn dispatch(&self, session_id: &str, text: &str) -> AppResult<Reply> {
        let text = text.trim();
        let mut session = self.sessions.acquire(session_id).await;

        let handler = self
            .handlers
            .iter()
            .find(|h| h.matches(&session, text))
            .ok_or(AppError::Unhandled)?;

        debug!("Dispatching to {} handler", handler.name());
        handler.execute(&mut session, text).await
    }
}
