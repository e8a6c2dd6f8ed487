//! Transaction repository
//!
//! Account-scoped queries and CRUD over the transaction record store.
//! Unknown ids on update and delete are no-ops reported as `false`.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{category, AccountId, Money, Transaction, TransactionId, TransactionType};
use crate::storage::{ChangeEvent, Storage};

use super::account::AccountRegistry;

/// Service for transaction persistence
pub struct TransactionRepository<'a> {
    storage: &'a Storage,
}

/// Input for recording a new transaction from the front end
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    pub category: String,
    pub amount: Money,
    pub note: Option<String>,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

impl<'a> TransactionRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// A fresh id for a transaction about to be added
    pub fn next_id(&self) -> TransactionId {
        self.storage.ids().transaction_id()
    }

    /// Find a transaction by full id or by the short `txn-xxxxxxxx` form
    ///
    /// A short prefix matching more than one transaction is a validation
    /// error.
    pub fn find(&self, identifier: &str) -> TrackerResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        let prefix = identifier.strip_prefix("txn-").unwrap_or(identifier).to_lowercase();
        if prefix.is_empty() {
            return Ok(None);
        }

        let mut matches = self
            .storage
            .transactions
            .select_where(&|t| t.id.to_full_string().starts_with(&prefix))?;

        match matches.len() {
            0 | 1 => Ok(matches.pop()),
            n => Err(TrackerError::Validation(format!(
                "'{}' matches {} transactions; use a longer id",
                identifier, n
            ))),
        }
    }

    /// Snapshot of every transaction belonging to `account_id`, in no order
    pub fn query(&self, account_id: AccountId) -> TrackerResult<Vec<Transaction>> {
        self.storage.transactions.select_by_account(account_id)
    }

    /// Transactions of the registry's current account
    pub fn query_current(&self, registry: &AccountRegistry<'_>) -> TrackerResult<Vec<Transaction>> {
        self.query(registry.current().id)
    }

    /// Persist a transaction without checking its account
    pub fn add(&self, txn: Transaction) -> TrackerResult<()> {
        validate(&txn)?;

        self.storage.transactions.insert(txn.clone())?;
        debug!(transaction = %txn.id, account = %txn.account_id, "transaction added");
        self.storage.notify(ChangeEvent::TransactionAdded(txn));
        Ok(())
    }

    /// Persist a transaction whose account must exist in the registry
    pub fn add_checked(&self, registry: &AccountRegistry<'_>, txn: Transaction) -> TrackerResult<()> {
        if registry.get(txn.account_id).is_none() {
            return Err(TrackerError::account_not_found(txn.account_id.to_string()));
        }
        self.add(txn)
    }

    /// Record a new transaction on the current account
    ///
    /// The category must belong to the type's vocabulary.
    pub fn create(
        &self,
        registry: &AccountRegistry<'_>,
        input: CreateTransactionInput,
    ) -> TrackerResult<Transaction> {
        if !category::is_valid(input.kind, &input.category) {
            return Err(TrackerError::Validation(format!(
                "'{}' is not a valid {} category (expected one of: {})",
                input.category,
                input.kind,
                category::categories_for(input.kind).join(", ")
            )));
        }

        let mut txn = Transaction::new(
            self.next_id(),
            registry.current().id,
            input.kind,
            input.category,
            input.amount,
            input.date.unwrap_or_else(|| self.storage.clock().today()),
        );
        if let Some(note) = input.note {
            txn.note = note.trim().to_string();
        }

        self.add_checked(registry, txn.clone())?;
        info!(transaction = %txn.id, kind = %txn.kind, "transaction recorded");
        Ok(txn)
    }

    /// Overwrite type, category, amount, note and date of the stored record
    ///
    /// Returns `false` when no record has the same id.
    pub fn update(&self, txn: &Transaction) -> TrackerResult<bool> {
        validate(txn)?;

        let Some(before) = self.storage.transactions.get(txn.id)? else {
            debug!(transaction = %txn.id, "update of unknown transaction ignored");
            return Ok(false);
        };

        let mut after = before.clone();
        after.apply_edit(txn);

        if !self.storage.transactions.update(&after)? {
            return Ok(false);
        }

        debug!(transaction = %after.id, "transaction updated");
        self.storage
            .notify(ChangeEvent::TransactionUpdated { before, after });
        Ok(true)
    }

    /// Remove the stored record with the same id
    pub fn delete(&self, txn: &Transaction) -> TrackerResult<bool> {
        let Some(stored) = self.storage.transactions.get(txn.id)? else {
            debug!(transaction = %txn.id, "delete of unknown transaction ignored");
            return Ok(false);
        };

        if !self.storage.transactions.delete(stored.id)? {
            return Ok(false);
        }

        debug!(transaction = %stored.id, "transaction deleted");
        self.storage.notify(ChangeEvent::TransactionDeleted(stored));
        Ok(true)
    }

    /// Every stored transaction across all accounts, oldest first
    pub fn all(&self) -> TrackerResult<Vec<Transaction>> {
        let mut all = self.storage.transactions.select_where(&|_| true)?;
        all.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(all)
    }

    /// Remove every transaction of an account, returning how many went
    pub fn delete_all_for_account(&self, account_id: AccountId) -> TrackerResult<usize> {
        let removed = self.storage.transactions.delete_by_account(account_id)?;
        info!(account = %account_id, removed, "account transactions cleared");
        self.storage.notify(ChangeEvent::AccountTransactionsCleared {
            account_id,
            removed,
        });
        Ok(removed)
    }
}

fn validate(txn: &Transaction) -> TrackerResult<()> {
    txn.validate()
        .map_err(|e| TrackerError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FixedClock;
    use chrono::{TimeZone, Utc};

    fn test_storage() -> Storage {
        Storage::in_memory().with_clock(FixedClock(
            Utc.with_ymd_and_hms(2024, 2, 7, 9, 0, 0).unwrap(),
        ))
    }

    fn txn(account_id: AccountId, kind: TransactionType, cents: i64) -> Transaction {
        Transaction::new(
            TransactionId::new(),
            account_id,
            kind,
            "Other",
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 2, 7).unwrap(),
        )
    }

    #[test]
    fn test_add_and_query() {
        let storage = test_storage();
        let repo = TransactionRepository::new(&storage);
        let account = AccountId::new();

        repo.add(txn(account, TransactionType::Income, 500)).unwrap();
        repo.add(txn(account, TransactionType::Expense, 200)).unwrap();
        repo.add(txn(AccountId::new(), TransactionType::Expense, 999)).unwrap();

        assert_eq!(repo.query(account).unwrap().len(), 2);
    }

    #[test]
    fn test_add_rejects_negative_amount() {
        let storage = test_storage();
        let repo = TransactionRepository::new(&storage);
        let account = AccountId::new();

        let result = repo.add(txn(account, TransactionType::Expense, -1));
        assert!(result.unwrap_err().is_validation());
        assert!(repo.query(account).unwrap().is_empty());
    }

    #[test]
    fn test_add_and_update_reject_amount_above_maximum() {
        let storage = test_storage();
        let repo = TransactionRepository::new(&storage);
        let account = AccountId::new();
        let over = Money::MAX.cents() + 1;

        let result = repo.add(txn(account, TransactionType::Income, over));
        assert!(result.unwrap_err().is_validation());
        assert!(repo.query(account).unwrap().is_empty());

        let stored = txn(account, TransactionType::Income, 100);
        repo.add(stored.clone()).unwrap();
        let mut edited = stored.clone();
        edited.amount = Money::from_cents(over);
        assert!(repo.update(&edited).unwrap_err().is_validation());
        assert_eq!(repo.query(account).unwrap()[0].amount.cents(), 100);
    }

    #[test]
    fn test_add_checked_requires_known_account() {
        let storage = test_storage();
        let registry = AccountRegistry::initialize(&storage).unwrap();
        let repo = TransactionRepository::new(&storage);

        let stray = txn(AccountId::new(), TransactionType::Income, 100);
        assert!(repo.add_checked(&registry, stray).unwrap_err().is_not_found());

        let known = txn(registry.current().id, TransactionType::Income, 100);
        repo.add_checked(&registry, known).unwrap();
        assert_eq!(repo.query_current(&registry).unwrap().len(), 1);
    }

    #[test]
    fn test_create_defaults_date_to_today() {
        let storage = test_storage();
        let registry = AccountRegistry::initialize(&storage).unwrap();
        let repo = TransactionRepository::new(&storage);

        let created = repo
            .create(
                &registry,
                CreateTransactionInput {
                    kind: TransactionType::Expense,
                    category: "Food".into(),
                    amount: Money::from_cents(1250),
                    note: Some(" lunch ".into()),
                    date: None,
                },
            )
            .unwrap();

        assert_eq!(created.date, NaiveDate::from_ymd_opt(2024, 2, 7).unwrap());
        assert_eq!(created.note, "lunch");
        assert_eq!(created.account_id, registry.current().id);
    }

    #[test]
    fn test_create_rejects_foreign_category() {
        let storage = test_storage();
        let registry = AccountRegistry::initialize(&storage).unwrap();
        let repo = TransactionRepository::new(&storage);

        let result = repo.create(
            &registry,
            CreateTransactionInput {
                kind: TransactionType::Income,
                category: "Food".into(),
                amount: Money::from_cents(100),
                note: None,
                date: None,
            },
        );
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_update_keeps_account() {
        let storage = test_storage();
        let repo = TransactionRepository::new(&storage);
        let account = AccountId::new();
        let original = txn(account, TransactionType::Expense, 200);
        repo.add(original.clone()).unwrap();

        let mut edited = original.clone();
        edited.account_id = AccountId::new();
        edited.kind = TransactionType::Income;
        edited.category = "Salary".into();
        edited.amount = Money::from_cents(300);
        edited.note = "fixed".into();
        assert!(repo.update(&edited).unwrap());

        let stored = repo.query(account).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kind, TransactionType::Income);
        assert_eq!(stored[0].category, "Salary");
        assert_eq!(stored[0].amount.cents(), 300);
        assert_eq!(stored[0].note, "fixed");
    }

    #[test]
    fn test_find_by_full_and_short_id() {
        let storage = test_storage();
        let repo = TransactionRepository::new(&storage);
        let stored = txn(AccountId::new(), TransactionType::Income, 100);
        repo.add(stored.clone()).unwrap();

        let by_full = repo.find(&stored.id.to_full_string()).unwrap().unwrap();
        assert_eq!(by_full.id, stored.id);

        let by_short = repo.find(&stored.id.to_string()).unwrap().unwrap();
        assert_eq!(by_short.id, stored.id);

        assert!(repo.find("txn-").unwrap().is_none());
        assert!(repo.find("zzzz").unwrap().is_none());
    }

    #[test]
    fn test_update_and_delete_unknown_are_noops() {
        let storage = test_storage();
        let repo = TransactionRepository::new(&storage);
        let ghost = txn(AccountId::new(), TransactionType::Income, 100);

        assert!(!repo.update(&ghost).unwrap());
        assert!(!repo.delete(&ghost).unwrap());
    }

    #[test]
    fn test_delete_by_id() {
        let storage = test_storage();
        let repo = TransactionRepository::new(&storage);
        let account = AccountId::new();
        let doomed = txn(account, TransactionType::Income, 100);
        repo.add(doomed.clone()).unwrap();
        repo.add(txn(account, TransactionType::Income, 200)).unwrap();

        assert!(repo.delete(&doomed).unwrap());
        let left = repo.query(account).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].amount.cents(), 200);
    }

    #[test]
    fn test_delete_all_for_account() {
        let storage = test_storage();
        let repo = TransactionRepository::new(&storage);
        let doomed = AccountId::new();
        let kept = AccountId::new();
        repo.add(txn(doomed, TransactionType::Income, 1)).unwrap();
        repo.add(txn(doomed, TransactionType::Expense, 2)).unwrap();
        repo.add(txn(kept, TransactionType::Expense, 3)).unwrap();

        assert_eq!(repo.delete_all_for_account(doomed).unwrap(), 2);
        assert!(repo.query(doomed).unwrap().is_empty());
        assert_eq!(repo.query(kept).unwrap().len(), 1);
    }

    #[test]
    fn test_switching_current_changes_scope() {
        let storage = test_storage();
        let mut registry = AccountRegistry::initialize(&storage).unwrap();
        let repo = TransactionRepository::new(&storage);
        let main_id = registry.current().id;
        repo.add(txn(main_id, TransactionType::Income, 100)).unwrap();

        let savings = registry.create("Savings", "USD").unwrap();
        registry.switch_current(&savings).unwrap();
        assert!(repo.query_current(&registry).unwrap().is_empty());

        repo.add(txn(savings.id, TransactionType::Income, 50)).unwrap();
        assert_eq!(repo.query_current(&registry).unwrap().len(), 1);
        assert_eq!(repo.query(main_id).unwrap().len(), 1);
    }
}
