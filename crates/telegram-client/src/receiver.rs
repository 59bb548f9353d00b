//! Update receiver with long polling.

use crate::client::TelegramClient;
use crate::types::InboundMessage;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error};

/// Receives updates for one bot identity and yields classifiable messages.
pub struct UpdateReceiver {
    client: TelegramClient,
    poll_timeout: Duration,
    poll_interval: Duration,
}

impl UpdateReceiver {
    /// Create a new update receiver.
    pub fn new(client: TelegramClient, poll_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_timeout,
            poll_interval,
        }
    }

    /// Start receiving messages as an async stream.
    pub fn stream(self) -> impl Stream<Item = InboundMessage> {
        async_stream::stream! {
            let mut offset = 0i64;
            loop {
                match self.client.get_updates(offset, self.poll_timeout).await {
                    Ok(updates) => {
                        for update in updates {
                            offset = offset.max(update.update_id + 1);
                            if let Some(message) = InboundMessage::from_update(&update) {
                                debug!(
                                    "Received update {} from chat {}",
                                    update.update_id, message.chat_id
                                );
                                yield message;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Poll error: {}", e);
                        // Back off on error
                        sleep(Duration::from_secs(5)).await;
                        continue;
                    }
                }

                sleep(self.poll_interval).await;
            }
        }
    }
}
