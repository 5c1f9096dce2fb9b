//! Verification errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("No verification code has been issued")]
    NoPendingCode,

    #[error("Verification code mismatch (attempt {attempts})")]
    Mismatch { attempts: u32 },

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Too many verification attempts")]
    TooManyAttempts,

    #[error("Session is already registered")]
    AlreadyRegistered,
}
