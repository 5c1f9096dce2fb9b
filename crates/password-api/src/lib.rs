//! Password API - HTTP access to the credential store.
//!
//! Exposes creation of passwords, listing by phone number and
//! case-insensitive lookup by site name.

pub mod api;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::ApiError;
