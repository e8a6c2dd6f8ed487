//! Core data models for the money tracker
//!
//! Accounts, transactions, money amounts, and the fixed category and
//! currency vocabularies.

pub mod account;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, DEFAULT_ACCOUNT_NAME};
pub use ids::{AccountId, IdGenerator, TransactionId, UuidGenerator};
pub use money::Money;
pub use transaction::{Transaction, TransactionType};
