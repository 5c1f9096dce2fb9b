//! Credential store errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("no passwords found for the given phone number")]
    NoCredentials,

    #[error("no passwords found for the given phone number and site name")]
    NoMatchingSite,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Whether the query succeeded but matched no rows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NoCredentials | StoreError::NoMatchingSite)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Storage(format!("Migration failed: {}", e))
    }
}
