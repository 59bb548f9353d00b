//! Directory persistence backends.

use crate::error::DirectoryError;
use crate::types::Person;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;
use tracing::{debug, info};

/// JSON file storage for the full person set.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a file store at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist the full person set.
    ///
    /// Writes atomically via temp file + rename, so a crash mid-save never
    /// leaves a truncated directory on disk.
    pub async fn save(&self, persons: &[Person]) -> Result<(), DirectoryError> {
        let data = serde_json::to_vec_pretty(persons)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(
            "Saved {} persons ({} bytes) to {:?}",
            persons.len(),
            data.len(),
            self.path
        );
        Ok(())
    }

    /// Load the person set.
    ///
    /// Returns an empty set if the file doesn't exist yet.
    pub async fn load(&self) -> Result<Vec<Person>, DirectoryError> {
        if !self.path.exists() {
            info!(
                "Directory file not found at {:?}, starting with no pairings",
                self.path
            );
            return Ok(Vec::new());
        }

        let data = fs::read(&self.path).await?;
        let persons: Vec<Person> = serde_json::from_slice(&data)?;

        info!("Loaded {} persons from {:?}", persons.len(), self.path);
        Ok(persons)
    }
}

/// In-memory storage for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    persons: Mutex<Vec<Person>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory store seeded with a person set.
    pub fn with_persons(persons: Vec<Person>) -> Self {
        Self {
            persons: Mutex::new(persons),
        }
    }

    /// Replace the stored person set.
    pub async fn save(&self, persons: &[Person]) -> Result<(), DirectoryError> {
        let mut stored = self.persons.lock().unwrap_or_else(|e| e.into_inner());
        *stored = persons.to_vec();
        Ok(())
    }

    /// Return a copy of the stored person set.
    pub async fn load(&self) -> Result<Vec<Person>, DirectoryError> {
        let stored = self.persons.lock().unwrap_or_else(|e| e.into_inner());
        Ok(stored.clone())
    }
}

/// Storage backend for the pairing directory.
pub enum Store {
    /// JSON file on disk.
    File(FileStore),
    /// In-memory only (no persistence across restarts).
    Memory(MemoryStore),
}

impl Store {
    /// File-backed storage at the given path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Store::File(FileStore::new(path))
    }

    /// Empty in-memory storage.
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    /// In-memory storage seeded with a person set.
    pub fn memory_with(persons: Vec<Person>) -> Self {
        Store::Memory(MemoryStore::with_persons(persons))
    }

    /// Persist the full person set.
    pub async fn save(&self, persons: &[Person]) -> Result<(), DirectoryError> {
        match self {
            Store::File(s) => s.save(persons).await,
            Store::Memory(s) => s.save(persons).await,
        }
    }

    /// Load the person set.
    pub async fn load(&self) -> Result<Vec<Person>, DirectoryError> {
        match self {
            Store::File(s) => s.load().await,
            Store::Memory(s) => s.load().await,
        }
    }
}
