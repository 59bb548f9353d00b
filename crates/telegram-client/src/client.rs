//! Telegram Bot API HTTP client.

use crate::error::TransportError;
use crate::types::*;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Outbound sends for one bot identity.
///
/// The relay resolves which of the two identities an event concerns and
/// talks to each through this seam; tests substitute a recording double.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send plain text.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TransportError>;

    /// Send Markdown-formatted text.
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), TransportError>;

    async fn send_animation(&self, chat_id: i64, url: &str) -> Result<(), TransportError>;

    async fn send_document(
        &self,
        chat_id: i64,
        url: &str,
        file_name: Option<&str>,
    ) -> Result<(), TransportError>;

    async fn send_photo(&self, chat_id: i64, url: &str, caption: &str)
        -> Result<(), TransportError>;

    async fn send_video(&self, chat_id: i64, url: &str, caption: &str)
        -> Result<(), TransportError>;

    async fn send_voice(&self, chat_id: i64, url: &str) -> Result<(), TransportError>;

    async fn send_video_note(&self, chat_id: i64, url: &str) -> Result<(), TransportError>;

    async fn send_sticker(&self, chat_id: i64, url: &str) -> Result<(), TransportError>;

    /// Short-lived download link for a file previously sent to this bot.
    async fn file_link(&self, file_id: &str) -> Result<String, TransportError>;
}

/// Telegram Bot API client for a single bot identity.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    /// Create a new client against the given API host.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Call a Bot API method and unwrap the response envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: Value,
    ) -> Result<T, TransportError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(&payload)
            .send()
            .await?;

        Self::read_response(method, response).await
    }

    async fn read_response<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        // The API reports errors inside the envelope, usually alongside a
        // non-2xx status; prefer the description when one parses out.
        let body: ApiResponse<T> = match response.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(TransportError::Api(format!("{method} returned {status}")));
            }
        };

        if !body.ok {
            return Err(TransportError::Api(
                body.description
                    .unwrap_or_else(|| format!("{method} failed")),
            ));
        }

        body.result
            .ok_or_else(|| TransportError::Api(format!("{method} returned no result")))
    }

    /// Send-style call: the result payload is irrelevant, failures map to
    /// `SendFailed`.
    async fn send(&self, method: &str, payload: Value) -> Result<(), TransportError> {
        match self.call::<Value>(method, payload).await {
            Ok(_) => {
                debug!("{} delivered", method);
                Ok(())
            }
            Err(TransportError::Api(msg)) => {
                warn!("{} failed: {}", method, msg);
                Err(TransportError::SendFailed(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// Identity of this bot; used as a startup health check.
    pub async fn get_me(&self) -> Result<User, TransportError> {
        self.call("getMe", json!({})).await
    }

    /// Fetch pending updates via long polling.
    ///
    /// The per-request timeout is stretched past the long-poll window so
    /// the client doesn't abort a poll the server is still holding open.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout: Duration,
    ) -> Result<Vec<Update>, TransportError> {
        let payload = json!({
            "offset": offset,
            "timeout": timeout.as_secs(),
            "allowed_updates": ["message"],
        });

        let response = self
            .client
            .post(self.method_url("getUpdates"))
            .timeout(timeout + Duration::from_secs(10))
            .json(&payload)
            .send()
            .await?;

        let updates: Vec<Update> = Self::read_response("getUpdates", response).await?;
        debug!("Received {} updates", updates.len());
        Ok(updates)
    }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        self.send("sendMessage", json!({ "chat_id": chat_id, "text": text }))
            .await
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        self.send(
            "sendMessage",
            json!({ "chat_id": chat_id, "text": text, "parse_mode": "Markdown" }),
        )
        .await
    }

    async fn send_animation(&self, chat_id: i64, url: &str) -> Result<(), TransportError> {
        self.send("sendAnimation", json!({ "chat_id": chat_id, "animation": url }))
            .await
    }

    async fn send_document(
        &self,
        chat_id: i64,
        url: &str,
        file_name: Option<&str>,
    ) -> Result<(), TransportError> {
        // URL sends cannot carry a filename; surface the original name as
        // the caption so it isn't lost on the receiving side.
        let mut payload = json!({ "chat_id": chat_id, "document": url });
        if let Some(name) = file_name {
            payload["caption"] = Value::String(name.to_string());
        }
        self.send("sendDocument", payload).await
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        url: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        self.send(
            "sendPhoto",
            json!({ "chat_id": chat_id, "photo": url, "caption": caption }),
        )
        .await
    }

    async fn send_video(
        &self,
        chat_id: i64,
        url: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        self.send(
            "sendVideo",
            json!({ "chat_id": chat_id, "video": url, "caption": caption }),
        )
        .await
    }

    async fn send_voice(&self, chat_id: i64, url: &str) -> Result<(), TransportError> {
        self.send("sendVoice", json!({ "chat_id": chat_id, "voice": url }))
            .await
    }

    async fn send_video_note(&self, chat_id: i64, url: &str) -> Result<(), TransportError> {
        self.send(
            "sendVideoNote",
            json!({ "chat_id": chat_id, "video_note": url }),
        )
        .await
    }

    async fn send_sticker(&self, chat_id: i64, url: &str) -> Result<(), TransportError> {
        self.send("sendSticker", json!({ "chat_id": chat_id, "sticker": url }))
            .await
    }

    #[instrument(skip(self))]
    async fn file_link(&self, file_id: &str) -> Result<String, TransportError> {
        let file: File = self
            .call("getFile", json!({ "file_id": file_id }))
            .await?;
        let path = file.file_path.ok_or(TransportError::MissingFilePath)?;

        Ok(format!("{}/file/bot{}/{}", self.base_url, self.token, path))
    }
}
