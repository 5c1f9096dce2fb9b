//! Telegram Bot API types.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub date: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

/// Long-poll request.
#[derive(Debug, Clone, Serialize)]
pub struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: Vec<String>,
}

/// Outgoing message request.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyKeyboardMarkup>,
}

/// Custom keyboard shown in place of the regular one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

impl ReplyKeyboardMarkup {
    /// Build a keyboard from rows of button labels.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keyboard: rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|label| KeyboardButton { text: label.into() })
                        .collect()
                })
                .collect(),
            resize_keyboard: true,
        }
    }
}

/// Parsed message for bot processing.
#[derive(Debug, Clone)]
pub struct BotMessage {
    /// Update that carried this message.
    pub update_id: i64,
    /// Chat the message arrived in; replies go here.
    pub chat_id: i64,
    /// The message text.
    pub text: String,
    /// Unix timestamp of the message.
    pub timestamp: i64,
    /// Sender username, when public.
    pub sender_username: Option<String>,
}

impl BotMessage {
    /// Extract a text message from an update. Non-text updates yield `None`.
    pub fn from_update(update: &Update) -> Option<Self> {
        let message = update.message.as_ref()?;
        let text = message.text.clone()?;

        Some(Self {
            update_id: update.update_id,
            chat_id: message.chat.id,
            text,
            timestamp: message.date,
            sender_username: message.from.as_ref().and_then(|u| u.username.clone()),
        })
    }

    /// Session identifier for this chat.
    pub fn session_id(&self) -> String {
        self.chat_id.to_string()
    }
}
