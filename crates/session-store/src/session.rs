//! Per-chat session.

use crate::error::VerificationError;
use crate::verification::{VerificationCode, VerificationPolicy, VerificationState};
use chrono::{DateTime, Utc};
use std::time::Instant;

/// A chat identity tracked through the verification lifecycle.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    state: VerificationState,
    created_at: DateTime<Utc>,
    last_active: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: VerificationState::default(),
            created_at: Utc::now(),
            last_active: Instant::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &VerificationState {
        &self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> Instant {
        self.last_active
    }

    pub fn is_registered(&self) -> bool {
        self.state.is_registered()
    }

    /// Phone number, pending or confirmed.
    pub fn phone(&self) -> Option<&str> {
        self.state.phone()
    }

    /// Confirmed phone number, once registered.
    pub fn registered_phone(&self) -> Option<&str> {
        match &self.state {
            VerificationState::Registered { phone } => Some(phone),
            _ => None,
        }
    }

    pub fn pending_code(&self) -> Option<&VerificationCode> {
        self.state.pending_code()
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    /// Issue a verification code for `phone`.
    pub fn begin_registration(&mut self, phone: String) -> Result<VerificationCode, VerificationError> {
        self.state.begin(phone, Instant::now())
    }

    /// Check a submitted code against the pending one.
    pub fn verify(
        &mut self,
        candidate: &str,
        policy: &VerificationPolicy,
    ) -> Result<String, VerificationError> {
        self.state.verify(candidate, policy, Instant::now())
    }

    /// Forget a pending code after the session sat idle. Returns whether one was dropped.
    pub(crate) fn lapse(&mut self) -> bool {
        self.state.lapse()
    }

    pub(crate) fn touch(&mut self, now: Instant) {
        self.last_active = now;
    }
}
