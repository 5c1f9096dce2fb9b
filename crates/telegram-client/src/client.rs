//! Telegram Bot API HTTP client.

use crate::error::TelegramError;
use crate::text::{split_message, MAX_MESSAGE_LENGTH};
use crate::types::*;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl TelegramClient {
    /// Create a new Telegram client.
    ///
    /// `timeout` bounds every request and must exceed the long-poll timeout.
    pub fn new(
        base_url: impl Into<String>,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    // The token is part of the path, so request errors are stripped of their URL.
    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token.expose_secret(), method)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(TelegramError::Api(describe_failure(&text)));
        }

        let body: ApiResponse<T> = serde_json::from_str(&text)?;
        if !body.ok {
            return Err(TelegramError::Api(body.description.unwrap_or_default()));
        }

        body.result
            .ok_or_else(|| TelegramError::Api(format!("{} returned no result", method)))
    }

    /// Check if the Bot API accepts our token.
    pub async fn health_check(&self) -> bool {
        self.get_me().await.is_ok()
    }

    /// Get the bot's own account.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for updates newer than `offset`.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: vec!["message".into()],
        };

        let updates: Vec<Update> = self.call("getUpdates", &request).await?;
        debug!("Received {} updates", updates.len());
        Ok(updates)
    }

    /// Send a message, optionally replacing the chat keyboard.
    ///
    /// Text over [`MAX_MESSAGE_LENGTH`] goes out as several messages in order,
    /// with the keyboard attached to the last one.
    #[instrument(skip(self, text, keyboard))]
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&ReplyKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        let parts = split_message(text, MAX_MESSAGE_LENGTH);
        let last = parts.len() - 1;

        for (i, part) in parts.into_iter().enumerate() {
            let request = SendMessageRequest {
                chat_id,
                text: part.to_string(),
                reply_markup: if i == last { keyboard.cloned() } else { None },
            };

            self.call::<_, serde_json::Value>("sendMessage", &request)
                .await
                .map_err(|e| {
                    warn!("Send failed: {}", e);
                    TelegramError::SendFailed(e.to_string())
                })?;
        }

        debug!("Sent message to chat {} in {} part(s)", chat_id, last + 1);
        Ok(())
    }

    /// Reply in the chat a message came from.
    pub async fn reply(&self, original: &BotMessage, text: &str) -> Result<(), TelegramError> {
        self.send_message(original.chat_id, text, None).await
    }
}

fn describe_failure(body: &str) -> String {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|r| r.description)
        .unwrap_or_else(|| body.to_string())
}
