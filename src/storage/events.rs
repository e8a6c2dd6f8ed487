//! Change notifications
//!
//! Services publish a `ChangeEvent` after each committed mutation. Front ends
//! subscribe through `ChangeObserver` instead of watching mutable state.

use crate::models::{Account, AccountId, Transaction};

/// A committed change to accounts or transactions
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    AccountAdded(Account),
    AccountUpdated { before: Account, after: Account },
    AccountDeleted(Account),
    CurrentAccountChanged(Account),
    TransactionAdded(Transaction),
    TransactionUpdated { before: Transaction, after: Transaction },
    TransactionDeleted(Transaction),
    /// Every transaction of an account was removed (cascade or restore)
    AccountTransactionsCleared { account_id: AccountId, removed: usize },
}

/// Receives change notifications; must not fail the command that caused them
pub trait ChangeObserver {
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> ChangeObserver for F
where
    F: Fn(&ChangeEvent),
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}
