//! Audit entry data structures
//!
//! Defines the structure of audit log entries and how committed changes
//! map onto them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::ChangeEvent;

use super::diff::describe_changes;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Account,
    Transaction,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Account => write!(f, "Account"),
            EntityType::Transaction => write!(f, "Transaction"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Full id of the affected entity
    pub entity_id: String,

    /// Human-readable description of the entity (e.g., account name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Record before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Record after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        timestamp: DateTime<Utc>,
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Translate a committed change into audit entries
    ///
    /// Current-account switches are not audited, and neither is clearing
    /// an account that had no transactions.
    pub fn from_event(event: &ChangeEvent, timestamp: DateTime<Utc>) -> Option<Self> {
        use EntityType::{Account, Transaction};
        use Operation::{Create, Delete, Update};

        let entry = match event {
            ChangeEvent::AccountAdded(account) => Self {
                after: serde_json::to_value(account).ok(),
                ..Self::new(timestamp, Create, Account, account.id.to_full_string(), Some(account.name.clone()))
            },
            ChangeEvent::AccountUpdated { before, after } => {
                let (old, new) = (serde_json::to_value(before).ok(), serde_json::to_value(after).ok());
                Self {
                    diff_summary: old.as_ref().zip(new.as_ref()).and_then(|(o, n)| describe_changes(o, n)),
                    before: old,
                    after: new,
                    ..Self::new(timestamp, Update, Account, after.id.to_full_string(), Some(after.name.clone()))
                }
            }
            ChangeEvent::AccountDeleted(account) => Self {
                before: serde_json::to_value(account).ok(),
                ..Self::new(timestamp, Delete, Account, account.id.to_full_string(), Some(account.name.clone()))
            },
            ChangeEvent::CurrentAccountChanged(_) => return None,
            ChangeEvent::TransactionAdded(txn) => Self {
                after: serde_json::to_value(txn).ok(),
                ..Self::new(timestamp, Create, Transaction, txn.id.to_full_string(), Some(txn.category.clone()))
            },
            ChangeEvent::TransactionUpdated { before, after } => {
                let (old, new) = (serde_json::to_value(before).ok(), serde_json::to_value(after).ok());
                Self {
                    diff_summary: old.as_ref().zip(new.as_ref()).and_then(|(o, n)| describe_changes(o, n)),
                    before: old,
                    after: new,
                    ..Self::new(timestamp, Update, Transaction, after.id.to_full_string(), Some(after.category.clone()))
                }
            }
            ChangeEvent::TransactionDeleted(txn) => Self {
                before: serde_json::to_value(txn).ok(),
                ..Self::new(timestamp, Delete, Transaction, txn.id.to_full_string(), Some(txn.category.clone()))
            },
            ChangeEvent::AccountTransactionsCleared { account_id, removed } => {
                if *removed == 0 {
                    return None;
                }
                Self {
                    diff_summary: Some(format!("removed {} transactions of the account", removed)),
                    ..Self::new(timestamp, Delete, Transaction, account_id.to_full_string(), None)
                }
            }
        };

        Some(entry)
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
