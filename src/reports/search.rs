//! Transaction search
//!
//! Text, date-range and type filters combined with AND.

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionType};

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Case-insensitive substring of the category or note
    pub text: Option<String>,
    /// Inclusive start date
    pub from: Option<NaiveDate>,
    /// Inclusive end date
    pub to: Option<NaiveDate>,
    pub kind: Option<TransactionType>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Check whether a transaction passes every filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            if !txn.category.to_lowercase().contains(&needle)
                && !txn.note.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if self.from.is_some_and(|from| txn.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| txn.date > to) {
            return false;
        }

        self.kind.map_or(true, |kind| txn.kind == kind)
    }
}

/// Matching transactions, newest first
pub fn search(transactions: &[Transaction], filter: &SearchFilter) -> Vec<Transaction> {
    let mut found: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    found.sort_by(|a, b| b.date.cmp(&a.date));
    found
}
