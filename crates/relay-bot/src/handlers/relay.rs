//! The relay router: forwards content between the two sides of a pairing.

use super::{command_of, Handler};
use crate::context::{RequestContext, Transports};
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use telegram_client::{MessageContent, Transport};
use tracing::{debug, instrument};

/// Default handler: anything that isn't a command is forwarded to the
/// counterpart, or answered with guidance when the pair isn't complete.
pub struct RelayHandler {
    transports: Transports,
}

impl RelayHandler {
    pub fn new(transports: Transports) -> Self {
        Self { transports }
    }

    /// Reply when no registered counterpart can receive the content.
    async fn reply_unrelayable(&self, ctx: &RequestContext) -> AppResult<()> {
        let own = self.transports.own(ctx);
        let chat_id = ctx.message.chat_id;

        // Text starting with /r is someone fumbling the registration
        // command, not content meant for their pair.
        match ctx.text() {
            Some(text) if text.starts_with("/r") => {
                own.send_markdown(chat_id, &messages::register_reminder())
                    .await?;
            }
            _ => {
                own.send_text(
                    chat_id,
                    &messages::unregistered_counterpart(ctx.role.counterpart()),
                )
                .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Handler for RelayHandler {
    fn name(&self) -> &str {
        "relay"
    }

    fn matches(&self, ctx: &RequestContext) -> bool {
        command_of(ctx).is_none()
    }

    #[instrument(skip(self, ctx), fields(chat = ctx.message.chat_id, role = %ctx.role))]
    async fn execute(&self, ctx: &RequestContext) -> AppResult<()> {
        let target_chat = ctx
            .counterpart
            .as_ref()
            .and_then(|counterpart| counterpart.telegram_id);
        let target_chat = match (&ctx.person, target_chat) {
            (Some(_), Some(chat)) => chat,
            _ => return self.reply_unrelayable(ctx).await,
        };

        let own = self.transports.own(ctx);
        let other = self.transports.counterpart(ctx);

        match &ctx.message.content {
            MessageContent::Text(text) => {
                other.send_text(target_chat, text).await?;
            }
            MessageContent::Animation { file_id } => {
                let link = own.file_link(file_id).await?;
                other.send_animation(target_chat, &link).await?;
            }
            MessageContent::Document { file_id, file_name } => {
                let link = own.file_link(file_id).await?;
                other
                    .send_document(target_chat, &link, file_name.as_deref())
                    .await?;
            }
            MessageContent::Photo { file_id, caption } => {
                let link = own.file_link(file_id).await?;
                other.send_photo(target_chat, &link, caption).await?;
            }
            MessageContent::Video { file_id, caption } => {
                let link = own.file_link(file_id).await?;
                other.send_video(target_chat, &link, caption).await?;
            }
            MessageContent::Voice { file_id } => {
                let link = own.file_link(file_id).await?;
                other.send_voice(target_chat, &link).await?;
            }
            MessageContent::VideoNote { file_id } => {
                let link = own.file_link(file_id).await?;
                other.send_video_note(target_chat, &link).await?;
            }
            MessageContent::Sticker { file_id } => {
                let link = own.file_link(file_id).await?;
                other.send_sticker(target_chat, &link).await?;
            }
        }

        debug!("Relayed content from {} to {}", ctx.message.chat_id, target_chat);
        Ok(())
    }
}
