//! Status command.

use super::{command_of, Command, Handler};
use crate::context::{RequestContext, Transports};
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use pairing_directory::DirectoryError;
use telegram_client::Transport;

pub struct StatusHandler {
    transports: Transports,
}

impl StatusHandler {
    pub fn new(transports: Transports) -> Self {
        Self { transports }
    }
}

#[async_trait]
impl Handler for StatusHandler {
    fn name(&self) -> &str {
        "status"
    }

    fn matches(&self, ctx: &RequestContext) -> bool {
        command_of(ctx) == Some(Command::Status)
    }

    async fn execute(&self, ctx: &RequestContext) -> AppResult<()> {
        let own = self.transports.own(ctx);
        let chat_id = ctx.message.chat_id;

        let person = match &ctx.person {
            Some(person) => person,
            None => {
                own.send_markdown(chat_id, &messages::register_reminder())
                    .await?;
                return Ok(());
            }
        };

        let counterpart = ctx
            .counterpart
            .as_ref()
            .ok_or_else(|| DirectoryError::UnknownToken(person.pair_uuid.clone()))?;

        own.send_text(
            chat_id,
            &messages::status_message(&person.name, &counterpart.name),
        )
        .await?;
        Ok(())
    }
}
