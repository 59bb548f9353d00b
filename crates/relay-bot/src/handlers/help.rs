//! Help command - stateless informational reply.

use super::{command_of, Command, Handler};
use crate::context::{RequestContext, Transports};
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use telegram_client::Transport;

pub struct HelpHandler {
    transports: Transports,
}

impl HelpHandler {
    pub fn new(transports: Transports) -> Self {
        Self { transports }
    }
}

#[async_trait]
impl Handler for HelpHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn matches(&self, ctx: &RequestContext) -> bool {
        command_of(ctx) == Some(Command::Help)
    }

    async fn execute(&self, ctx: &RequestContext) -> AppResult<()> {
        self.transports
            .own(ctx)
            .send_markdown(ctx.message.chat_id, &messages::help_message())
            .await?;
        Ok(())
    }
}
