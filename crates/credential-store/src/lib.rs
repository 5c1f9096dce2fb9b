//! Credential storage for the password bot.
//!
//! Defines the [`CredentialStore`] contract, an in-memory and a PostgreSQL
//! backend, and the [`PasswordService`] both the chat bot and the HTTP API
//! are built on.

mod error;
mod memory;
mod phone;
mod postgres;
mod redact;
mod sealer;
mod service;
mod store;
mod types;

pub use error::StoreError;
pub use memory::MemoryCredentialStore;
pub use phone::canonical_phone;
pub use postgres::PgCredentialStore;
pub use redact::phone_fingerprint;
pub use sealer::{PlaintextSealer, SecretSealer};
pub use service::PasswordService;
pub use store::{escape_like, CredentialStore};
pub use types::*;
