//! Transaction record store
//!
//! The `TransactionStore` trait is the queryable collection contract the
//! services depend on. `JsonTransactionStore` keeps records in memory with an
//! account index and persists them to `transactions.json` after every change.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{AccountId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Queryable collection of transaction records
pub trait TransactionStore {
    /// Insert a new record
    fn insert(&self, txn: Transaction) -> TrackerResult<()>;

    /// Replace the record with the same id; `false` if there is none
    fn update(&self, txn: &Transaction) -> TrackerResult<bool>;

    /// Remove a record by id; `false` if there is none
    fn delete(&self, id: TransactionId) -> TrackerResult<bool>;

    /// Remove every record matching the predicate, returning how many went
    fn delete_where(&self, predicate: &dyn Fn(&Transaction) -> bool) -> TrackerResult<usize>;

    /// Snapshot of every record matching the predicate
    fn select_where(
        &self,
        predicate: &dyn Fn(&Transaction) -> bool,
    ) -> TrackerResult<Vec<Transaction>>;

    fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        Ok(self.select_where(&|t| t.id == id)?.into_iter().next())
    }

    fn select_by_account(&self, account_id: AccountId) -> TrackerResult<Vec<Transaction>> {
        self.select_where(&|t| t.account_id == account_id)
    }

    fn delete_by_account(&self, account_id: AccountId) -> TrackerResult<usize> {
        self.delete_where(&|t| t.account_id == account_id)
    }
}

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

#[derive(Default)]
struct Records {
    data: HashMap<TransactionId, Transaction>,
    /// Index: account_id -> transaction_ids
    by_account: HashMap<AccountId, Vec<TransactionId>>,
}

impl Records {
    fn index(&mut self, txn: &Transaction) {
        self.by_account.entry(txn.account_id).or_default().push(txn.id);
    }

    fn unindex(&mut self, txn: &Transaction) {
        if let Some(ids) = self.by_account.get_mut(&txn.account_id) {
            ids.retain(|&id| id != txn.id);
            if ids.is_empty() {
                self.by_account.remove(&txn.account_id);
            }
        }
    }
}

/// JSON-file backed store with an account index
pub struct JsonTransactionStore {
    path: Option<PathBuf>,
    records: RwLock<Records>,
}

impl JsonTransactionStore {
    /// Create a store persisted at `path`; call `load` before use
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            records: RwLock::new(Records::default()),
        }
    }

    /// Create a store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: RwLock::new(Records::default()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> TrackerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let file_data: TransactionData = read_json(path)?;
        let mut records = self.write_records()?;

        records.data.clear();
        records.by_account.clear();

        for txn in file_data.transactions {
            records.index(&txn);
            records.data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Count stored transactions
    pub fn count(&self) -> TrackerResult<usize> {
        Ok(self.read_records()?.data.len())
    }

    fn read_records(&self) -> TrackerResult<RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_records(&self) -> TrackerResult<RwLockWriteGuard<'_, Records>> {
        self.records.write().map_err(|e| {
            TrackerError::PersistenceWriteFailed(format!("Failed to acquire write lock: {}", e))
        })
    }

    fn persist(&self, records: &Records) -> TrackerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut transactions: Vec<_> = records.data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.as_uuid().cmp(b.id.as_uuid())));

        write_json_atomic(path, &TransactionData { transactions }).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "transaction write failed");
        })
    }
}

impl TransactionStore for JsonTransactionStore {
    fn insert(&self, txn: Transaction) -> TrackerResult<()> {
        let mut records = self.write_records()?;
        let id = txn.id;
        let previous = records.data.insert(id, txn);

        if let Err(e) = self.persist(&records) {
            match previous {
                Some(old) => {
                    records.data.insert(id, old);
                }
                None => {
                    records.data.remove(&id);
                }
            }
            return Err(e);
        }

        if let Some(old) = &previous {
            records.unindex(old);
        }
        let inserted = records.data[&id].clone();
        records.index(&inserted);
        Ok(())
    }

    fn update(&self, txn: &Transaction) -> TrackerResult<bool> {
        let mut records = self.write_records()?;
        let Some(old) = records.data.insert(txn.id, txn.clone()) else {
            records.data.remove(&txn.id);
            return Ok(false);
        };

        if let Err(e) = self.persist(&records) {
            records.data.insert(old.id, old);
            return Err(e);
        }

        records.unindex(&old);
        records.index(txn);
        Ok(true)
    }

    fn delete(&self, id: TransactionId) -> TrackerResult<bool> {
        let mut records = self.write_records()?;
        let Some(removed) = records.data.remove(&id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&records) {
            records.data.insert(id, removed);
            return Err(e);
        }

        records.unindex(&removed);
        Ok(true)
    }

    fn delete_where(&self, predicate: &dyn Fn(&Transaction) -> bool) -> TrackerResult<usize> {
        let mut records = self.write_records()?;
        let doomed: Vec<TransactionId> = records
            .data
            .values()
            .filter(|t| predicate(t))
            .map(|t| t.id)
            .collect();

        if doomed.is_empty() {
            return Ok(0);
        }

        let removed: Vec<Transaction> = doomed
            .iter()
            .filter_map(|id| records.data.remove(id))
            .collect();

        if let Err(e) = self.persist(&records) {
            for txn in removed {
                records.data.insert(txn.id, txn);
            }
            return Err(e);
        }

        for txn in &removed {
            records.unindex(txn);
        }
        Ok(removed.len())
    }

    fn select_where(
        &self,
        predicate: &dyn Fn(&Transaction) -> bool,
    ) -> TrackerResult<Vec<Transaction>> {
        let records = self.read_records()?;
        Ok(records.data.values().filter(|t| predicate(t)).cloned().collect())
    }

    fn select_by_account(&self, account_id: AccountId) -> TrackerResult<Vec<Transaction>> {
        let records = self.read_records()?;
        let ids = records
            .by_account
            .get(&account_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        Ok(ids
            .iter()
            .filter_map(|id| records.data.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonTransactionStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let store = JsonTransactionStore::new(path);
        store.load().unwrap();
        (temp_dir, store)
    }

    fn expense(account_id: AccountId, cents: i64) -> Transaction {
        Transaction::new(
            TransactionId::new(),
            account_id,
            TransactionType::Expense,
            "Food",
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, store) = create_test_store();
        let txn = expense(AccountId::new(), 5000);
        let id = txn.id;

        store.insert(txn).unwrap();

        let retrieved = store.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 5000);
    }

    #[test]
    fn test_select_by_account_uses_index() {
        let (_temp_dir, store) = create_test_store();
        let account1 = AccountId::new();
        let account2 = AccountId::new();

        store.insert(expense(account1, 100)).unwrap();
        store.insert(expense(account1, 200)).unwrap();
        store.insert(expense(account2, 300)).unwrap();

        assert_eq!(store.select_by_account(account1).unwrap().len(), 2);
        assert_eq!(store.select_by_account(account2).unwrap().len(), 1);
        assert!(store.select_by_account(AccountId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, store) = create_test_store();
        let txn = expense(AccountId::new(), 5000).with_note("groceries");
        let id = txn.id;
        store.insert(txn).unwrap();

        let reopened = JsonTransactionStore::new(temp_dir.path().join("transactions.json"));
        reopened.load().unwrap();

        assert_eq!(reopened.count().unwrap(), 1);
        assert_eq!(reopened.get(id).unwrap().unwrap().note, "groceries");
    }

    #[test]
    fn test_update_replaces_record() {
        let (_temp_dir, store) = create_test_store();
        let mut txn = expense(AccountId::new(), 5000);
        store.insert(txn.clone()).unwrap();

        txn.amount = Money::from_cents(7000);
        assert!(store.update(&txn).unwrap());
        assert_eq!(store.get(txn.id).unwrap().unwrap().amount.cents(), 7000);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let (_temp_dir, store) = create_test_store();
        let txn = expense(AccountId::new(), 5000);
        assert!(!store.update(&txn).unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, store) = create_test_store();
        let txn = expense(AccountId::new(), 5000);
        let id = txn.id;

        store.insert(txn).unwrap();
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_by_account_leaves_others() {
        let (_temp_dir, store) = create_test_store();
        let doomed = AccountId::new();
        let kept = AccountId::new();

        store.insert(expense(doomed, 100)).unwrap();
        store.insert(expense(doomed, 200)).unwrap();
        store.insert(expense(kept, 300)).unwrap();

        assert_eq!(store.delete_by_account(doomed).unwrap(), 2);
        assert!(store.select_by_account(doomed).unwrap().is_empty());
        assert_eq!(store.select_by_account(kept).unwrap().len(), 1);
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let store = JsonTransactionStore::new(blocker.join("transactions.json"));
        let account_id = AccountId::new();
        let result = store.insert(expense(account_id, 100));

        assert!(matches!(result, Err(TrackerError::PersistenceWriteFailed(_))));
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.select_by_account(account_id).unwrap().is_empty());
    }

    #[test]
    fn test_in_memory_store() {
        let store = JsonTransactionStore::in_memory();
        store.load().unwrap();
        store.insert(expense(AccountId::new(), 1)).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
