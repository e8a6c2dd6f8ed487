//! Display formatting for terminal output
//!
//! Provides utilities for formatting accounts, transactions and statistics
//! as plain aligned text.

pub mod account;
pub mod currency;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use currency::format_currency;
pub use report::{format_breakdown, format_monthly, format_totals};
pub use transaction::{format_transaction_details, format_transaction_list};
