//! Telegram Bot API client.
//!
//! One [`TelegramClient`] per bot identity; outbound sends go through the
//! [`Transport`] trait so the relay can be tested without the network.

mod client;
mod error;
mod receiver;
mod types;

pub use client::{TelegramClient, Transport};
pub use error::TransportError;
pub use receiver::UpdateReceiver;
pub use types::*;
