//! Start command - welcome plus state-dependent hints.

use super::{command_of, Command, Handler};
use crate::context::{RequestContext, Transports};
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use pairing_directory::Role;
use telegram_client::Transport;

pub struct StartHandler {
    transports: Transports,
}

impl StartHandler {
    pub fn new(transports: Transports) -> Self {
        Self { transports }
    }
}

#[async_trait]
impl Handler for StartHandler {
    fn name(&self) -> &str {
        "start"
    }

    fn matches(&self, ctx: &RequestContext) -> bool {
        command_of(ctx) == Some(Command::Start)
    }

    async fn execute(&self, ctx: &RequestContext) -> AppResult<()> {
        let own = self.transports.own(ctx);
        let chat_id = ctx.message.chat_id;
        let counterpart_role = ctx.role.counterpart();

        let name = ctx.person.as_ref().map(|p| p.name.as_str());
        own.send_text(chat_id, &messages::welcome(name, counterpart_role))
            .await?;

        match &ctx.person {
            None => {
                own.send_markdown(chat_id, &messages::register_reminder())
                    .await?;
            }
            Some(_) if ctx.role == Role::Mortal => {
                own.send_text(chat_id, &messages::status_hint()).await?;
            }
            Some(_) => {}
        }

        Ok(())
    }
}
