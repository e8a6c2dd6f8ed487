//! Service layer for the money tracker
//!
//! The service layer provides the commands on top of the storage layer,
//! handling validation, default-account protection and cascading deletes.

pub mod account;
pub mod transaction;

pub use account::AccountRegistry;
pub use transaction::{CreateTransactionInput, TransactionRepository};
