//! In-memory chat sessions and phone verification.
//!
//! Sessions are created on first contact and expire after a period of
//! inactivity. Each carries a [`VerificationState`] that gates access to the
//! credential store behind a one-time code.

mod error;
mod session;
mod store;
mod verification;

pub use error::VerificationError;
pub use session::Session;
pub use store::{SessionConfig, SessionStore};
pub use verification::*;
