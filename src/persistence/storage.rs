//! Key/value storage backends

use std::collections::HashMap;

use thiserror::Error;

/// Storage keys (versioned so old layouts are ignored rather than misread)
pub mod keys {
    pub const NAME: &str = "skyhero_name_v1";
    pub const BEST: &str = "skyhero_best_v1";
    pub const COINS: &str = "skyhero_coins_v1";
    pub const UNLOCKS: &str = "skyhero_unlocks_v1";
    pub const SETTINGS: &str = "skyhero_settings_v4";
    pub const COSMETICS: &str = "skyhero_cosmetics_v2";
    pub const LEADERBOARD: &str = "skyhero_localboard_v1";
}

/// A storage operation that could not be completed
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("write to '{key}' rejected: {reason}")]
    WriteRejected { key: String, reason: String },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value store in the shape of the browser's LocalStorage
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Read a key, treating errors as absence
    fn read_or_none(&self, key: &str) -> Option<String> {
        match self.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Reading '{}' failed: {}", key, e);
                None
            }
        }
    }
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub(crate) items: HashMap<String, String>,
    /// Reject every write (simulates a full or disabled store)
    pub read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "read-only".to_string(),
            });
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "read-only".to_string(),
            });
        }
        self.items.remove(key);
        Ok(())
    }
}
