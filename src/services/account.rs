//! Account registry
//!
//! Owns the account set, the current-account selection and default-account
//! protection. Every command persists synchronously before the in-memory
//! state changes, so a failed write leaves the registry as it was.

use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Account, AccountId};
use crate::storage::blobs::{ACCOUNTS_SLOT, CURRENT_ACCOUNT_SLOT};
use crate::storage::{ChangeEvent, Storage};

/// The set of accounts and which one is current
pub struct AccountRegistry<'a> {
    storage: &'a Storage,
    accounts: Vec<Account>,
    current: Account,
}

impl<'a> AccountRegistry<'a> {
    /// Load persisted accounts, seeding the default account on first run
    ///
    /// If the stored current-account id no longer resolves, the default
    /// account (or else the first account) becomes current.
    pub fn initialize(storage: &'a Storage) -> TrackerResult<Self> {
        let accounts = load_accounts(storage)?;

        if accounts.is_empty() {
            let now = storage.clock().now();
            let default = Account::new_default(
                storage.ids().account_id(),
                storage.default_account_name(),
                storage.base_currency(),
                now,
            );

            save_accounts(storage, std::slice::from_ref(&default))?;
            save_current(storage, default.id)?;
            info!(account = %default.id, name = %default.name, "created default account");

            return Ok(Self {
                storage,
                accounts: vec![default.clone()],
                current: default,
            });
        }

        let stored_current = load_current(storage)?;
        let current = stored_current
            .and_then(|id| accounts.iter().find(|a| a.id == id))
            .or_else(|| accounts.iter().find(|a| a.is_default))
            .unwrap_or(&accounts[0])
            .clone();

        debug!(
            count = accounts.len(),
            current = %current.id,
            "loaded accounts"
        );

        Ok(Self {
            storage,
            accounts,
            current,
        })
    }

    /// All accounts in load/insertion order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// The account reads and writes are scoped to
    pub fn current(&self) -> &Account {
        &self.current
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// First account whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// Find an account by exact name, then by full or short id
    pub fn find(&self, identifier: &str) -> Option<&Account> {
        if let Some(account) = self.find_by_name(identifier) {
            return Some(account);
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.get(id);
        }

        let prefix = identifier.strip_prefix("acc-").unwrap_or(identifier).to_lowercase();
        if prefix.is_empty() {
            return None;
        }

        let mut matches = self
            .accounts
            .iter()
            .filter(|a| a.id.to_full_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(account), None) => Some(account),
            _ => None,
        }
    }

    pub fn default_account(&self) -> Option<&Account> {
        self.accounts.iter().find(|a| a.is_default)
    }

    /// Append an account and persist the full set
    ///
    /// Names are not required to be unique.
    pub fn add(&mut self, account: Account) -> TrackerResult<()> {
        let mut accounts = self.accounts.clone();
        accounts.push(account.clone());
        save_accounts(self.storage, &accounts)?;

        self.accounts = accounts;
        info!(account = %account.id, name = %account.name, "account added");
        self.storage.notify(ChangeEvent::AccountAdded(account));
        Ok(())
    }

    /// Currency used when an account's currency cannot be determined
    pub fn base_currency(&self) -> &str {
        self.storage.base_currency()
    }

    /// Build a fresh non-default account without adding it
    pub fn new_account(&self, name: &str, currency: &str) -> Account {
        Account::new(
            self.storage.ids().account_id(),
            name,
            currency,
            self.storage.clock().now(),
        )
    }

    /// Build, validate and add a new non-default account
    pub fn create(&mut self, name: &str, currency: &str) -> TrackerResult<Account> {
        let account = self.new_account(name.trim(), &currency.trim().to_uppercase());
        account
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.add(account.clone())?;
        Ok(account)
    }

    /// Replace the name and currency of the stored account with the same id
    ///
    /// Stamps `last_modified`. Returns `false` when no account matches.
    pub fn update(&mut self, account: &Account) -> TrackerResult<bool> {
        let Some(index) = self.position(account.id) else {
            debug!(account = %account.id, "update of unknown account ignored");
            return Ok(false);
        };

        let before = self.accounts[index].clone();
        let mut updated = before.clone();
        updated.name = account.name.clone();
        updated.currency = account.currency.clone();
        updated.last_modified = self.storage.clock().now();

        let mut accounts = self.accounts.clone();
        accounts[index] = updated.clone();
        save_accounts(self.storage, &accounts)?;
        self.accounts = accounts;

        if self.current.id == updated.id {
            self.current = updated.clone();
        }

        info!(account = %updated.id, "account updated");
        self.storage.notify(ChangeEvent::AccountUpdated {
            before,
            after: updated,
        });
        Ok(true)
    }

    /// Delete a non-default account and every transaction it owns
    ///
    /// Returns `false` without changing anything for the default account or
    /// an unknown id. If the deleted account was current, the default account
    /// (or else the first remaining one) becomes current.
    ///
    /// Transactions go first, so a failed cascade leaves the account in
    /// place and current stays valid.
    pub fn delete(&mut self, account: &Account) -> TrackerResult<bool> {
        if account.is_default {
            debug!(account = %account.id, "refusing to delete default account");
            return Ok(false);
        }

        let Some(index) = self.position(account.id) else {
            debug!(account = %account.id, "delete of unknown account ignored");
            return Ok(false);
        };

        if self.accounts[index].is_default {
            return Ok(false);
        }

        let cleared = self.storage.transactions.delete_by_account(account.id)?;
        self.storage.notify(ChangeEvent::AccountTransactionsCleared {
            account_id: account.id,
            removed: cleared,
        });

        let mut accounts = self.accounts.clone();
        let removed = accounts.remove(index);
        save_accounts(self.storage, &accounts)?;
        self.accounts = accounts;

        info!(
            account = %removed.id,
            transactions = cleared,
            "account deleted"
        );
        self.storage.notify(ChangeEvent::AccountDeleted(removed.clone()));

        if self.current.id == removed.id {
            let fallback = self
                .default_account()
                .or_else(|| self.accounts.first())
                .cloned();
            if let Some(next) = fallback {
                // In memory first; a stale stored pointer is resolved on load
                self.current = next.clone();
                self.set_current(next)?;
            }
        }

        Ok(true)
    }

    /// Wipe the default account's transactions, keeping the account
    ///
    /// Returns `false` for any non-default account.
    pub fn restore_default(&self, account: &Account) -> TrackerResult<bool> {
        if !account.is_default {
            return Ok(false);
        }

        let cleared = self.storage.transactions.delete_by_account(account.id)?;
        info!(account = %account.id, transactions = cleared, "default account restored");
        self.storage.notify(ChangeEvent::AccountTransactionsCleared {
            account_id: account.id,
            removed: cleared,
        });
        Ok(true)
    }

    /// Make the stored account with the same id current
    ///
    /// Returns `false` if the id is unknown.
    pub fn switch_current(&mut self, account: &Account) -> TrackerResult<bool> {
        match self.get(account.id).cloned() {
            Some(stored) => {
                self.set_current(stored)?;
                Ok(true)
            }
            None => {
                debug!(account = %account.id, "switch to unknown account ignored");
                Ok(false)
            }
        }
    }

    fn set_current(&mut self, account: Account) -> TrackerResult<()> {
        save_current(self.storage, account.id)?;
        debug!(account = %account.id, "current account changed");
        self.current = account.clone();
        self.storage.notify(ChangeEvent::CurrentAccountChanged(account));
        Ok(())
    }

    fn position(&self, id: AccountId) -> Option<usize> {
        self.accounts.iter().position(|a| a.id == id)
    }
}

fn load_accounts(storage: &Storage) -> TrackerResult<Vec<Account>> {
    match storage.blobs.load(ACCOUNTS_SLOT)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| TrackerError::Storage(format!("Failed to parse accounts: {}", e))),
        None => Ok(Vec::new()),
    }
}

fn save_accounts(storage: &Storage, accounts: &[Account]) -> TrackerResult<()> {
    let raw = serde_json::to_string_pretty(accounts).map_err(|e| {
        TrackerError::PersistenceWriteFailed(format!("Failed to serialize accounts: {}", e))
    })?;
    storage.blobs.save(ACCOUNTS_SLOT, &raw)
}

/// A pointer that no longer parses is treated like a missing one
fn load_current(storage: &Storage) -> TrackerResult<Option<AccountId>> {
    let Some(raw) = storage.blobs.load(CURRENT_ACCOUNT_SLOT)? else {
        return Ok(None);
    };

    Ok(serde_json::from_str::<String>(&raw)
        .ok()
        .and_then(|s| AccountId::parse(&s).ok()))
}

fn save_current(storage: &Storage, id: AccountId) -> TrackerResult<()> {
    let raw = serde_json::to_string(&id.to_full_string()).map_err(|e| {
        TrackerError::PersistenceWriteFailed(format!("Failed to serialize current account: {}", e))
    })?;
    storage.blobs.save(CURRENT_ACCOUNT_SLOT, &raw)
}
