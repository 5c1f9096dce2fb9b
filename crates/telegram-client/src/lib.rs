//! Telegram Bot API client.

mod client;
mod error;
mod receiver;
mod text;
mod types;

pub use client::TelegramClient;
pub use error::TelegramError;
pub use receiver::MessageReceiver;
pub use text::{split_message, MAX_MESSAGE_LENGTH};
pub use types::*;
