//! Person records and pairing roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two fixed sides of a pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Angel,
    Mortal,
}

impl Role {
    /// The opposite side of the pairing.
    pub fn counterpart(self) -> Role {
        match self {
            Role::Angel => Role::Mortal,
            Role::Mortal => Role::Angel,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Angel => write!(f, "angel"),
            Role::Mortal => write!(f, "mortal"),
        }
    }
}

/// One side of a pairing.
///
/// The pairing fields (`uuid`, `name`, `role`, `pair_uuid`) are fixed when
/// the directory is provisioned and never change. Registration state lives
/// in `telegram_id`: a person is registered iff it is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Pairing token issued at provisioning time.
    pub uuid: String,

    /// Display name.
    pub name: String,

    /// Which bot identity serves this person.
    pub role: Role,

    /// Token of the counterpart person (opposite role).
    pub pair_uuid: String,

    /// Claimed Telegram chat id, absent until registration.
    #[serde(default)]
    pub telegram_id: Option<i64>,

    /// When the current registration was claimed.
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
}

impl Person {
    /// Create an unregistered person record.
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        pair_uuid: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            role,
            pair_uuid: pair_uuid.into(),
            telegram_id: None,
            registered_at: None,
        }
    }

    /// Whether an external identity is currently bound to this person.
    pub fn is_registered(&self) -> bool {
        self.telegram_id.is_some()
    }
}
