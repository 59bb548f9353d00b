//! Common test utilities for integration tests.

// Each test binary uses a different slice of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use pairing_directory::{PairingDirectory, Person, Role, Store};
use relay_bot::context::{RequestContext, Transports};
use relay_bot::handlers::{self, Handler};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use telegram_client::{InboundMessage, MessageContent, Transport, TransportError};

/// One outbound call recorded by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
    },
    Markdown {
        chat_id: i64,
        text: String,
    },
    Animation {
        chat_id: i64,
        url: String,
    },
    Document {
        chat_id: i64,
        url: String,
        file_name: Option<String>,
    },
    Photo {
        chat_id: i64,
        url: String,
        caption: String,
    },
    Video {
        chat_id: i64,
        url: String,
        caption: String,
    },
    Voice {
        chat_id: i64,
        url: String,
    },
    VideoNote {
        chat_id: i64,
        url: String,
    },
    Sticker {
        chat_id: i64,
        url: String,
    },
}

/// Transport double that records every send and can be told to fail.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    fail_sends: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with a transport error.
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, item: Sent) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed("test transport failure".into()));
        }
        self.sent.lock().unwrap().push(item);
        Ok(())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        self.record(Sent::Text {
            chat_id,
            text: text.into(),
        })
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        self.record(Sent::Markdown {
            chat_id,
            text: text.into(),
        })
    }

    async fn send_animation(&self, chat_id: i64, url: &str) -> Result<(), TransportError> {
        self.record(Sent::Animation {
            chat_id,
            url: url.into(),
        })
    }

    async fn send_document(
        &self,
        chat_id: i64,
        url: &str,
        file_name: Option<&str>,
    ) -> Result<(), TransportError> {
        self.record(Sent::Document {
            chat_id,
            url: url.into(),
            file_name: file_name.map(String::from),
        })
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        url: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        self.record(Sent::Photo {
            chat_id,
            url: url.into(),
            caption: caption.into(),
        })
    }

    async fn send_video(
        &self,
        chat_id: i64,
        url: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        self.record(Sent::Video {
            chat_id,
            url: url.into(),
            caption: caption.into(),
        })
    }

    async fn send_voice(&self, chat_id: i64, url: &str) -> Result<(), TransportError> {
        self.record(Sent::Voice {
            chat_id,
            url: url.into(),
        })
    }

    async fn send_video_note(&self, chat_id: i64, url: &str) -> Result<(), TransportError> {
        self.record(Sent::VideoNote {
            chat_id,
            url: url.into(),
        })
    }

    async fn send_sticker(&self, chat_id: i64, url: &str) -> Result<(), TransportError> {
        self.record(Sent::Sticker {
            chat_id,
            url: url.into(),
        })
    }

    async fn file_link(&self, file_id: &str) -> Result<String, TransportError> {
        Ok(format!("https://files.test/{file_id}"))
    }
}

/// Alice (angel, token `a1`) paired with Bob (mortal, token `m1`).
pub fn sample_pair() -> Vec<Person> {
    vec![
        Person::new("a1", "Alice", Role::Angel, "m1"),
        Person::new("m1", "Bob", Role::Mortal, "a1"),
    ]
}

/// A full bot wired to recording transports and an in-memory directory.
pub struct TestBed {
    pub directory: Arc<PairingDirectory>,
    pub angel: Arc<RecordingTransport>,
    pub mortal: Arc<RecordingTransport>,
    pub transports: Transports,
    pub handlers: Vec<Box<dyn Handler>>,
}

impl TestBed {
    pub fn new() -> Self {
        let directory = Arc::new(
            PairingDirectory::with_persons(sample_pair(), Store::memory())
                .expect("valid sample pairing"),
        );
        Self::with_directory(directory)
    }

    pub fn with_directory(directory: Arc<PairingDirectory>) -> Self {
        let angel = Arc::new(RecordingTransport::new());
        let mortal = Arc::new(RecordingTransport::new());
        let transports = Transports::new(angel.clone(), mortal.clone());
        let handlers = handlers::all(directory.clone(), transports.clone());

        Self {
            directory,
            angel,
            mortal,
            transports,
            handlers,
        }
    }

    /// Run one inbound event through resolution and dispatch.
    pub async fn handle(&self, role: Role, chat_id: i64, content: MessageContent) {
        let message = InboundMessage { chat_id, content };
        let ctx = RequestContext::resolve(&self.directory, role, message).await;
        handlers::dispatch(&self.handlers, &self.transports, &ctx).await;
    }

    pub async fn handle_text(&self, role: Role, chat_id: i64, text: &str) {
        self.handle(role, chat_id, MessageContent::Text(text.into()))
            .await;
    }
}
