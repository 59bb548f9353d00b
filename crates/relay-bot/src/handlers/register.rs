//! Registration command and the post-registration cascade.

use super::{command_of, Command, Handler};
use crate::context::{RequestContext, Transports};
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use pairing_directory::{DirectoryError, PairingDirectory, RegistrationOutcome, Role};
use std::sync::Arc;
use telegram_client::Transport;
use tracing::{info, instrument, warn};

pub struct RegisterHandler {
    directory: Arc<PairingDirectory>,
    transports: Transports,
}

impl RegisterHandler {
    pub fn new(directory: Arc<PairingDirectory>, transports: Transports) -> Self {
        Self {
            directory,
            transports,
        }
    }

    /// Post-registration notification cascade.
    ///
    /// The registering chat hears its confirmations before the counterpart
    /// hears anything, and a failed cross-notification never unwinds the
    /// already-durable registration.
    async fn run_cascade(
        &self,
        ctx: &RequestContext,
        outcome: &RegistrationOutcome,
    ) -> AppResult<()> {
        let own = self.transports.own(ctx);
        let chat_id = ctx.message.chat_id;
        let counterpart_role = ctx.role.counterpart();

        own.send_text(
            chat_id,
            &messages::register_success(&outcome.person.name, counterpart_role),
        )
        .await?;
        own.send_markdown(chat_id, &messages::refer_to_bot(counterpart_role))
            .await?;
        if ctx.role == Role::Mortal {
            own.send_text(chat_id, &messages::status_hint()).await?;
        }

        if let Some(counterpart) = &outcome.counterpart {
            if let Some(counterpart_chat) = counterpart.telegram_id {
                let notice = messages::pair_registered(ctx.role);
                if let Err(e) = self
                    .transports
                    .for_role(counterpart.role)
                    .send_text(counterpart_chat, &notice)
                    .await
                {
                    warn!("Failed to notify counterpart {}: {}", counterpart.name, e);
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Handler for RegisterHandler {
    fn name(&self) -> &str {
        "register"
    }

    fn matches(&self, ctx: &RequestContext) -> bool {
        matches!(command_of(ctx), Some(Command::Register(_)))
    }

    #[instrument(skip(self, ctx), fields(chat = ctx.message.chat_id, role = %ctx.role))]
    async fn execute(&self, ctx: &RequestContext) -> AppResult<()> {
        let own = self.transports.own(ctx);
        let chat_id = ctx.message.chat_id;

        if let Some(person) = &ctx.person {
            own.send_text(chat_id, &messages::already_registered(&person.name))
                .await?;
            return Ok(());
        }

        let token = match command_of(ctx) {
            Some(Command::Register(Some(token))) => token,
            _ => {
                own.send_markdown(chat_id, &messages::register_reminder())
                    .await?;
                return Ok(());
            }
        };

        match self.directory.register(&token, chat_id).await {
            Ok(outcome) => {
                info!("{} claimed their pairing token", outcome.person.name);
                self.run_cascade(ctx, &outcome).await
            }
            Err(DirectoryError::UnknownToken(_))
            | Err(DirectoryError::AlreadyRegistered { .. }) => {
                own.send_text(chat_id, &messages::register_failed(&token))
                    .await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
