//! Event handlers: commands and the relay router.

mod deregister;
mod help;
mod register;
mod relay;
mod start;
mod status;

pub use deregister::DeregisterHandler;
pub use help::HelpHandler;
pub use register::RegisterHandler;
pub use relay::RelayHandler;
pub use start::StartHandler;
pub use status::StatusHandler;

use crate::context::{RequestContext, Transports};
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use pairing_directory::PairingDirectory;
use std::sync::Arc;
use telegram_client::Transport;
use tracing::error;

/// A recognized slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/register <token>` or `/r <token>`; `None` when no token was given.
    Register(Option<String>),
    Deregister,
    Status,
    Help,
    Start,
}

impl Command {
    /// Parse a command from message text.
    ///
    /// Only the first whitespace-delimited word selects the command; for
    /// `Register` the next word, if any, is the token. Trailing words are
    /// ignored.
    pub fn parse(text: &str) -> Option<Command> {
        let mut words = text.split_whitespace();
        let command = match words.next()? {
            "/register" | "/r" => Command::Register(words.next().map(String::from)),
            "/deregister" => Command::Deregister,
            "/status" => Command::Status,
            "/help" => Command::Help,
            "/start" => Command::Start,
            _ => return None,
        };
        Some(command)
    }
}

pub(crate) fn command_of(ctx: &RequestContext) -> Option<Command> {
    ctx.text().and_then(Command::parse)
}

/// Event handler.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handler name, for log lines.
    fn name(&self) -> &str;

    /// Whether this handler wants the event.
    fn matches(&self, ctx: &RequestContext) -> bool;

    /// Handle the event, sending whatever replies it calls for.
    async fn execute(&self, ctx: &RequestContext) -> AppResult<()>;
}

/// The full handler list, in match order. The relay handler goes last as
/// the default for non-command content.
pub fn all(directory: Arc<PairingDirectory>, transports: Transports) -> Vec<Box<dyn Handler>> {
    vec![
        Box::new(RegisterHandler::new(directory.clone(), transports.clone())),
        Box::new(DeregisterHandler::new(directory, transports.clone())),
        Box::new(StatusHandler::new(transports.clone())),
        Box::new(HelpHandler::new(transports.clone())),
        Box::new(StartHandler::new(transports.clone())),
        Box::new(RelayHandler::new(transports)),
    ]
}

/// Route one resolved event to the first matching handler.
///
/// Handler failures are logged and answered with a generic failure reply
/// in the originating chat; they never reach the event loop.
pub async fn dispatch(handlers: &[Box<dyn Handler>], transports: &Transports, ctx: &RequestContext) {
    let handler = match handlers.iter().find(|h| h.matches(ctx)) {
        Some(handler) => handler,
        None => return,
    };

    if let Err(e) = handler.execute(ctx).await {
        error!("Handler {} failed: {}", handler.name(), e);
        let own = transports.own(ctx);
        if let Err(e) = own
            .send_text(ctx.message.chat_id, &messages::internal_error())
            .await
        {
            error!("Failed to send failure reply: {}", e);
        }
    }
}
