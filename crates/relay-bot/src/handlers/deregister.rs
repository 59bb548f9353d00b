//! Deregistration command.

use super::{command_of, Command, Handler};
use crate::context::{RequestContext, Transports};
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use pairing_directory::{DirectoryError, PairingDirectory};
use std::sync::Arc;
use telegram_client::Transport;
use tracing::{info, instrument};

pub struct DeregisterHandler {
    directory: Arc<PairingDirectory>,
    transports: Transports,
}

impl DeregisterHandler {
    pub fn new(directory: Arc<PairingDirectory>, transports: Transports) -> Self {
        Self {
            directory,
            transports,
        }
    }
}

#[async_trait]
impl Handler for DeregisterHandler {
    fn name(&self) -> &str {
        "deregister"
    }

    fn matches(&self, ctx: &RequestContext) -> bool {
        command_of(ctx) == Some(Command::Deregister)
    }

    #[instrument(skip(self, ctx), fields(chat = ctx.message.chat_id, role = %ctx.role))]
    async fn execute(&self, ctx: &RequestContext) -> AppResult<()> {
        let own = self.transports.own(ctx);
        let chat_id = ctx.message.chat_id;

        // `person` was resolved from the requesting chat id, so only the
        // bound identity can ever reach the mutation below.
        let person = match &ctx.person {
            Some(person) => person,
            None => {
                own.send_text(chat_id, &messages::not_registered()).await?;
                return Ok(());
            }
        };

        match self.directory.deregister(&person.uuid).await {
            Ok(vacated) => {
                info!("{} released their pairing token", vacated.name);
                own.send_text(chat_id, &messages::deregister_success())
                    .await?;
                Ok(())
            }
            Err(DirectoryError::NotRegistered) => {
                own.send_text(chat_id, &messages::not_registered()).await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
