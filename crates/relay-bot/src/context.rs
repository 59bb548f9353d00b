//! Per-event request context and the role-to-transport mapping.

use pairing_directory::{PairingDirectory, Person, Role};
use std::sync::Arc;
use telegram_client::{InboundMessage, Transport};

/// Immutable context for one inbound event, assembled before dispatch.
#[derive(Clone)]
pub struct RequestContext {
    /// Role served by the bot identity the event arrived on.
    pub role: Role,

    pub message: InboundMessage,

    /// The sender, if their chat id is bound to a person of `role`.
    pub person: Option<Person>,

    /// The sender's pair, if the sender is known.
    pub counterpart: Option<Person>,
}

impl RequestContext {
    /// Resolve the sender and their counterpart for an inbound message.
    pub async fn resolve(
        directory: &PairingDirectory,
        role: Role,
        message: InboundMessage,
    ) -> Self {
        let person = directory
            .person_by_telegram_id(role, message.chat_id)
            .await;
        let counterpart = match &person {
            Some(person) => directory.counterpart_of(person).await,
            None => None,
        };

        Self {
            role,
            message,
            person,
            counterpart,
        }
    }

    /// Text payload, if this is a plain text message.
    pub fn text(&self) -> Option<&str> {
        self.message.text()
    }
}

/// The two bot identities, keyed by the role each one serves.
#[derive(Clone)]
pub struct Transports {
    angel: Arc<dyn Transport>,
    mortal: Arc<dyn Transport>,
}

impl Transports {
    pub fn new(angel: Arc<dyn Transport>, mortal: Arc<dyn Transport>) -> Self {
        Self { angel, mortal }
    }

    /// Transport serving persons of `role`.
    pub fn for_role(&self, role: Role) -> &Arc<dyn Transport> {
        match role {
            Role::Angel => &self.angel,
            Role::Mortal => &self.mortal,
        }
    }

    /// Transport the event's sender is talking to.
    pub fn own(&self, ctx: &RequestContext) -> &Arc<dyn Transport> {
        self.for_role(ctx.role)
    }

    /// Transport serving the sender's counterpart.
    pub fn counterpart(&self, ctx: &RequestContext) -> &Arc<dyn Transport> {
        self.for_role(ctx.role.counterpart())
    }
}
