//! Pairing directory for the angel/mortal relay.
//!
//! Holds every provisioned person, resolves pairing tokens and external
//! identities, and owns the registration state machine: a token can be
//! claimed by exactly one external identity at a time, every mutation is
//! persisted before it is acted upon, and deregistration frees the token
//! for a later claim.

mod directory;
mod error;
mod storage;
mod types;

pub use directory::{PairingDirectory, RegistrationOutcome};
pub use error::DirectoryError;
pub use storage::{FileStore, MemoryStore, Store};
pub use types::{Person, Role};
