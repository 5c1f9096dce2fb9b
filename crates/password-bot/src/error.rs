//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Telegram error: {0}")]
    Telegram(#[from] telegram_client::TelegramError),

    #[error("Storage error: {0}")]
    Store(#[from] credential_store::StoreError),

    #[error("Verification error: {0}")]
    Verification(#[from] session_store::VerificationError),

    #[error("Session is not registered")]
    NotRegistered,

    #[error("No handler accepted the message")]
    Unhandled,
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
