//! Message receiver with long polling.

use crate::client::TelegramClient;
use crate::types::*;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error};

/// Message receiver that long-polls `getUpdates`.
pub struct MessageReceiver {
    client: TelegramClient,
    poll_timeout: Duration,
}

impl MessageReceiver {
    /// Create a new message receiver.
    pub fn new(client: TelegramClient, poll_timeout: Duration) -> Self {
        Self {
            client,
            poll_timeout,
        }
    }

    /// Start receiving messages as an async stream, in arrival order.
    pub fn stream(self) -> impl Stream<Item = BotMessage> {
        async_stream::stream! {
            let mut offset: Option<i64> = None;

            loop {
                match self.client.get_updates(offset, self.poll_timeout).await {
                    Ok(updates) => {
                        for update in updates {
                            // Acknowledge every update, text or not.
                            offset = Some(update.update_id + 1);

                            if let Some(bot_msg) = BotMessage::from_update(&update) {
                                debug!("Received message in chat {}", bot_msg.chat_id);
                                yield bot_msg;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Receive error: {}", e);
                        // Back off on error
                        sleep(Duration::from_secs(5)).await;
                        continue;
                    }
                }

                if self.poll_timeout.is_zero() {
                    sleep(Duration::from_millis(200)).await;
                }
            }
        }
    }
}
