//! The pairing directory: every known person and their registration state.

use crate::error::DirectoryError;
use crate::storage::Store;
use crate::types::{Person, Role};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Outcome of a successful registration.
///
/// `counterpart` is snapshotted in the same critical section as the
/// mutation, so the caller can decide on the cross-notification without a
/// second lookup racing a later change.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    /// The person as registered.
    pub person: Person,
    /// The person's pair at the instant of registration.
    pub counterpart: Option<Person>,
}

/// Process-local directory of persons, indexed by pairing token.
///
/// The directory exclusively owns all person records. Registration state
/// changes only through [`register`](Self::register) and
/// [`deregister`](Self::deregister), each of which persists the full
/// directory before returning.
#[derive(Clone)]
pub struct PairingDirectory {
    persons: Arc<RwLock<HashMap<String, Person>>>,
    store: Arc<Store>,
}

impl PairingDirectory {
    /// Load the directory from storage and validate pairing invariants.
    pub async fn load(store: Store) -> Result<Self, DirectoryError> {
        let persons = store.load().await?;
        Self::with_persons(persons, store)
    }

    /// Build a directory from an already-loaded person set.
    pub fn with_persons(persons: Vec<Person>, store: Store) -> Result<Self, DirectoryError> {
        let persons = index_persons(persons)?;
        info!("Pairing directory ready ({} persons)", persons.len());

        Ok(Self {
            persons: Arc::new(RwLock::new(persons)),
            store: Arc::new(store),
        })
    }

    /// Look up a person by pairing token.
    pub async fn person_by_uuid(&self, uuid: &str) -> Option<Person> {
        self.persons.read().await.get(uuid).cloned()
    }

    /// Which person of `role`, if any, is bound to this external identity.
    pub async fn person_by_telegram_id(&self, role: Role, telegram_id: i64) -> Option<Person> {
        self.persons
            .read()
            .await
            .values()
            .find(|p| p.role == role && p.telegram_id == Some(telegram_id))
            .cloned()
    }

    /// Resolve a person's pair.
    pub async fn counterpart_of(&self, person: &Person) -> Option<Person> {
        self.persons.read().await.get(&person.pair_uuid).cloned()
    }

    /// Number of persons in the directory.
    pub async fn person_count(&self) -> usize {
        self.persons.read().await.len()
    }

    /// Claim a pairing token for an external identity.
    ///
    /// Lookup, precondition check, mutation and save all happen under one
    /// write guard, so two near-simultaneous claims of the same token
    /// serialize and the loser sees `AlreadyRegistered`. On save failure
    /// the mutation is reverted before the error returns; storage and
    /// memory never disagree.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        uuid: &str,
        telegram_id: i64,
    ) -> Result<RegistrationOutcome, DirectoryError> {
        let mut persons = self.persons.write().await;

        let previous = persons
            .get(uuid)
            .ok_or_else(|| DirectoryError::UnknownToken(uuid.into()))?
            .clone();
        if previous.is_registered() {
            return Err(DirectoryError::AlreadyRegistered {
                name: previous.name.clone(),
            });
        }

        let registered = Person {
            telegram_id: Some(telegram_id),
            registered_at: Some(Utc::now()),
            ..previous.clone()
        };
        persons.insert(uuid.to_string(), registered.clone());

        if let Err(e) = save_snapshot(&self.store, &persons).await {
            persons.insert(uuid.to_string(), previous);
            return Err(e);
        }

        let counterpart = persons.get(&registered.pair_uuid).cloned();
        info!(
            "Registered {} ({}) to chat {}",
            registered.name, registered.role, telegram_id
        );

        Ok(RegistrationOutcome {
            person: registered,
            counterpart,
        })
    }

    /// Release a registration.
    ///
    /// Returns the person as it was before the mutation; callers need the
    /// vacated chat id for the confirmation notice.
    #[instrument(skip(self))]
    pub async fn deregister(&self, uuid: &str) -> Result<Person, DirectoryError> {
        let mut persons = self.persons.write().await;

        let previous = persons
            .get(uuid)
            .ok_or_else(|| DirectoryError::UnknownToken(uuid.into()))?
            .clone();
        if !previous.is_registered() {
            return Err(DirectoryError::NotRegistered);
        }

        let vacated = Person {
            telegram_id: None,
            registered_at: None,
            ..previous.clone()
        };
        persons.insert(uuid.to_string(), vacated);

        if let Err(e) = save_snapshot(&self.store, &persons).await {
            persons.insert(uuid.to_string(), previous.clone());
            return Err(e);
        }

        info!("Deregistered {} ({})", previous.name, previous.role);
        Ok(previous)
    }
}

/// Persist the full directory, sorted by token for stable file output.
async fn save_snapshot(
    store: &Store,
    persons: &HashMap<String, Person>,
) -> Result<(), DirectoryError> {
    let mut snapshot: Vec<Person> = persons.values().cloned().collect();
    snapshot.sort_by(|a, b| a.uuid.cmp(&b.uuid));
    store.save(&snapshot).await
}

/// Index persons by token, rejecting directories that violate the pairing
/// invariants (unique tokens, resolvable pairs, opposite roles, symmetry).
fn index_persons(persons: Vec<Person>) -> Result<HashMap<String, Person>, DirectoryError> {
    let mut map = HashMap::with_capacity(persons.len());
    for person in persons {
        let uuid = person.uuid.clone();
        if map.insert(uuid.clone(), person).is_some() {
            return Err(DirectoryError::InvalidPairing(format!(
                "duplicate token {uuid}"
            )));
        }
    }

    for person in map.values() {
        let pair = map.get(&person.pair_uuid).ok_or_else(|| {
            DirectoryError::InvalidPairing(format!(
                "{} points at missing pair {}",
                person.uuid, person.pair_uuid
            ))
        })?;
        if pair.role != person.role.counterpart() {
            return Err(DirectoryError::InvalidPairing(format!(
                "{} and {} are both {}",
                person.uuid, pair.uuid, person.role
            )));
        }
        if pair.pair_uuid != person.uuid {
            return Err(DirectoryError::InvalidPairing(format!(
                "pairing between {} and {} is not symmetric",
                person.uuid, pair.uuid
            )));
        }
    }

    Ok(map)
}
