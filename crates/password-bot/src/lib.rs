//! Telegram password manager bot.
//!
//! Chats verify a phone number with a one-time code before they can add
//! passwords or list the sites they have saved.

pub mod commands;
pub mod config;
pub mod delivery;
pub mod error;
pub mod router;

pub use commands::{main_keyboard, CommandHandler, Reply};
pub use config::{Config, LogFormat};
pub use delivery::{CodeDelivery, DeliveryError, LogCodeDelivery};
pub use error::{AppError, AppResult};
pub use router::SessionRouter;
