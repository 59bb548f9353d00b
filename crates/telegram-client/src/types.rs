//! Telegram Bot API types.

use serde::Deserialize;

/// Envelope returned by every Bot API method.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// Incoming update from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

/// Incoming message, with only the payloads the relay consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub animation: Option<Animation>,
    pub document: Option<Document>,
    pub photo: Option<Vec<PhotoSize>>,
    pub video: Option<Video>,
    pub voice: Option<Voice>,
    pub video_note: Option<VideoNote>,
    pub sticker: Option<Sticker>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Animation {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoNote {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sticker {
    pub file_id: String,
}

/// File metadata from `getFile`.
#[derive(Debug, Clone, Deserialize)]
pub struct File {
    pub file_id: String,
    pub file_path: Option<String>,
}

/// Content classification for an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Animation {
        file_id: String,
    },
    Document {
        file_id: String,
        file_name: Option<String>,
    },
    Photo {
        file_id: String,
        caption: String,
    },
    Video {
        file_id: String,
        caption: String,
    },
    Voice {
        file_id: String,
    },
    VideoNote {
        file_id: String,
    },
    Sticker {
        file_id: String,
    },
}

/// Parsed inbound message for bot processing.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Chat the message arrived from; in a private chat this is also the
    /// sender's identity.
    pub chat_id: i64,
    pub content: MessageContent,
}

impl InboundMessage {
    /// Extract a classifiable message from an update.
    ///
    /// Animations are checked before documents: the API mirrors every
    /// animation into the legacy `document` field. Photos classify to the
    /// largest size the API offers. Captions default to the empty string.
    pub fn from_update(update: &Update) -> Option<Self> {
        let msg = update.message.as_ref()?;
        let caption = || msg.caption.clone().unwrap_or_default();

        let content = if let Some(animation) = &msg.animation {
            MessageContent::Animation {
                file_id: animation.file_id.clone(),
            }
        } else if let Some(document) = &msg.document {
            MessageContent::Document {
                file_id: document.file_id.clone(),
                file_name: document.file_name.clone(),
            }
        } else if let Some(photo) = &msg.photo {
            let largest = photo.iter().max_by_key(|p| p.width * p.height)?;
            MessageContent::Photo {
                file_id: largest.file_id.clone(),
                caption: caption(),
            }
        } else if let Some(video) = &msg.video {
            MessageContent::Video {
                file_id: video.file_id.clone(),
                caption: caption(),
            }
        } else if let Some(voice) = &msg.voice {
            MessageContent::Voice {
                file_id: voice.file_id.clone(),
            }
        } else if let Some(video_note) = &msg.video_note {
            MessageContent::VideoNote {
                file_id: video_note.file_id.clone(),
            }
        } else if let Some(sticker) = &msg.sticker {
            MessageContent::Sticker {
                file_id: sticker.file_id.clone(),
            }
        } else if let Some(text) = &msg.text {
            MessageContent::Text(text.clone())
        } else {
            return None;
        };

        Some(Self {
            chat_id: msg.chat.id,
            content,
        })
    }

    /// The message text, if this is a plain text message.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text),
            _ => None,
        }
    }
}
