//! Account model
//!
//! An account is an isolated ledger with its own name and currency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;

/// Name given to the account synthesized on first run
pub const DEFAULT_ACCOUNT_NAME: &str = "Main Account";

/// A ledger that transactions belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Display name (not required to be unique)
    pub name: String,

    /// Whether this is the protected seed account
    pub is_default: bool,

    /// ISO-4217-like currency code
    pub currency: String,

    /// When the account was created
    pub created_date: DateTime<Utc>,

    /// When the account was last modified
    pub last_modified: DateTime<Utc>,
}

impl Account {
    /// Create a non-default account
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        currency: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            is_default: false,
            currency: currency.into(),
            created_date: now,
            last_modified: now,
        }
    }

    /// Create the protected default account
    pub fn new_default(
        id: AccountId,
        name: impl Into<String>,
        currency: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut account = Self::new(id, name, currency, now);
        account.is_default = true;
        account
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.currency.trim().is_empty() {
            return Err(AccountValidationError::EmptyCurrency);
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.currency)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    EmptyCurrency,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::EmptyCurrency => write!(f, "Account currency cannot be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_is_not_default() {
        let now = Utc::now();
        let account = Account::new(AccountId::new(), "Savings", "EUR", now);
        assert_eq!(account.name, "Savings");
        assert_eq!(account.currency, "EUR");
        assert!(!account.is_default);
        assert_eq!(account.created_date, account.last_modified);
    }

    #[test]
    fn test_new_default() {
        let account =
            Account::new_default(AccountId::new(), DEFAULT_ACCOUNT_NAME, "USD", Utc::now());
        assert!(account.is_default);
        assert_eq!(account.name, "Main Account");
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new(AccountId::new(), "Valid", "USD", Utc::now());
        assert!(account.validate().is_ok());

        account.name = "   ".into();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        account.name = "Valid".into();
        account.currency = String::new();
        assert_eq!(
            account.validate(),
            Err(AccountValidationError::EmptyCurrency)
        );
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let account = Account::new(AccountId::new(), "Test", "USD", Utc::now());
        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"isDefault\":false"));
        assert!(json.contains("\"lastModified\""));
        let deserialized: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, deserialized);
    }

    #[test]
    fn test_display() {
        let account = Account::new(AccountId::new(), "Wallet", "GBP", Utc::now());
        assert_eq!(account.to_string(), "Wallet (GBP)");
    }
}
