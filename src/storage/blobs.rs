//! Named blob storage
//!
//! Holds small documents under named slots: the serialized account set and
//! the current-account pointer.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{TrackerError, TrackerResult};

use super::file_io::{read_text, write_atomic};

/// Slot holding the JSON array of accounts
pub const ACCOUNTS_SLOT: &str = "accounts";

/// Slot holding the selected account id
pub const CURRENT_ACCOUNT_SLOT: &str = "current_account_id";

/// Persist/load a named blob
pub trait BlobStore {
    fn load(&self, slot: &str) -> TrackerResult<Option<String>>;
    fn save(&self, slot: &str, contents: &str) -> TrackerResult<()>;
}

/// One `<slot>.json` file per slot inside a directory
pub struct JsonDirBlobStore {
    dir: PathBuf,
}

impl JsonDirBlobStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl BlobStore for JsonDirBlobStore {
    fn load(&self, slot: &str) -> TrackerResult<Option<String>> {
        read_text(self.slot_path(slot))
    }

    fn save(&self, slot: &str, contents: &str) -> TrackerResult<()> {
        write_atomic(self.slot_path(slot), contents.as_bytes())
    }
}

/// Process-local blob store
#[derive(Default)]
pub struct MemoryBlobStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, slot: &str) -> TrackerResult<Option<String>> {
        let slots = self.slots.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(slots.get(slot).cloned())
    }

    fn save(&self, slot: &str, contents: &str) -> TrackerResult<()> {
        let mut slots = self.slots.write().map_err(|e| {
            TrackerError::PersistenceWriteFailed(format!("Failed to acquire write lock: {}", e))
        })?;

        slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dir_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonDirBlobStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.load(ACCOUNTS_SLOT).unwrap(), None);

        store.save(ACCOUNTS_SLOT, "[]").unwrap();
        assert_eq!(store.load(ACCOUNTS_SLOT).unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("accounts.json").exists());
    }

    #[test]
    fn test_slots_are_independent() {
        let store = MemoryBlobStore::new();
        store.save(ACCOUNTS_SLOT, "[1]").unwrap();
        store.save(CURRENT_ACCOUNT_SLOT, "\"abc\"").unwrap();

        assert_eq!(store.load(ACCOUNTS_SLOT).unwrap().as_deref(), Some("[1]"));
        assert_eq!(
            store.load(CURRENT_ACCOUNT_SLOT).unwrap().as_deref(),
            Some("\"abc\"")
        );
        assert_eq!(store.load("missing").unwrap(), None);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryBlobStore::new();
        store.save("slot", "one").unwrap();
        store.save("slot", "two").unwrap();
        assert_eq!(store.load("slot").unwrap().as_deref(), Some("two"));
    }
}
