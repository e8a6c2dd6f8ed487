//! Storage layer for the money tracker
//!
//! Provides the record-store collaborators (named blobs, transaction
//! records), the clock and id generator, and the `Storage` coordinator that
//! owns them. One `Storage` is built at process start and passed by reference
//! to every service.

pub mod blobs;
pub mod clock;
pub mod events;
pub mod file_io;
pub mod transactions;

pub use blobs::{BlobStore, JsonDirBlobStore, MemoryBlobStore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use events::{ChangeEvent, ChangeObserver};
pub use file_io::{read_json, write_json_atomic};
pub use transactions::{JsonTransactionStore, TransactionStore};

use tracing::debug;

use crate::config::paths::TrackerPaths;
use crate::config::settings::{Settings, DEFAULT_DATE_FORMAT};
use crate::error::TrackerError;
use crate::models::currency::BASE_CURRENCY;
use crate::models::{IdGenerator, UuidGenerator, DEFAULT_ACCOUNT_NAME};

/// Main storage coordinator that owns every collaborator
pub struct Storage {
    pub blobs: Box<dyn BlobStore>,
    pub transactions: Box<dyn TransactionStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    observers: Vec<Box<dyn ChangeObserver>>,
    base_currency: String,
    default_account_name: String,
    date_format: String,
}

impl Storage {
    /// Assemble storage from explicit collaborators
    pub fn new(blobs: Box<dyn BlobStore>, transactions: Box<dyn TransactionStore>) -> Self {
        Self {
            blobs,
            transactions,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
            observers: Vec::new(),
            base_currency: BASE_CURRENCY.to_string(),
            default_account_name: DEFAULT_ACCOUNT_NAME.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Open file-backed storage under the configured data directory
    pub fn open(paths: &TrackerPaths, settings: &Settings) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        let transactions = JsonTransactionStore::new(paths.transactions_file());
        transactions.load()?;
        debug!(data_dir = %paths.data_dir().display(), "storage opened");

        Ok(Self::new(
            Box::new(JsonDirBlobStore::new(paths.data_dir())),
            Box::new(transactions),
        )
        .with_settings(settings))
    }

    /// Storage that lives only in memory
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryBlobStore::new()),
            Box::new(JsonTransactionStore::in_memory()),
        )
    }

    /// Apply currency and default-account preferences
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.base_currency = settings.base_currency.clone();
        self.default_account_name = settings.default_account_name.clone();
        self.date_format = settings.date_format.clone();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Register an observer for committed changes
    pub fn subscribe(&mut self, observer: impl ChangeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Publish a committed change to every observer
    pub fn notify(&self, event: ChangeEvent) {
        for observer in &self.observers {
            observer.on_change(&event);
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    /// Currency used when an account's currency cannot be determined
    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Name of the account synthesized on first run
    pub fn default_account_name(&self) -> &str {
        &self.default_account_name
    }

    /// strftime format for dates shown to the user
    pub fn date_format(&self) -> &str {
        &self.date_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &Settings::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.base_currency(), "USD");
        assert_eq!(storage.default_account_name(), "Main Account");
    }

    #[test]
    fn test_settings_override_defaults() {
        let settings = Settings {
            base_currency: "EUR".into(),
            default_account_name: "Wallet".into(),
            date_format: "%d.%m.%Y".into(),
            ..Settings::default()
        };
        assert_eq!(Storage::in_memory().date_format(), "%Y-%m-%d");

        let storage = Storage::in_memory().with_settings(&settings);
        assert_eq!(storage.base_currency(), "EUR");
        assert_eq!(storage.default_account_name(), "Wallet");
        assert_eq!(storage.date_format(), "%d.%m.%Y");
    }

    #[test]
    fn test_notify_reaches_observers() {
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);

        let mut storage = Storage::in_memory();
        storage.subscribe(move |_: &ChangeEvent| *counter.borrow_mut() += 1);

        storage.notify(ChangeEvent::AccountTransactionsCleared {
            account_id: crate::models::AccountId::new(),
            removed: 0,
        });
        assert_eq!(*seen.borrow(), 1);
    }
}
