//! CSV backup and restore
//!
//! The backup dialect is plain comma-separated text with no quoting:
//!
//! ```text
//! Account,Type,Category,Amount,Currency,Date,Note
//! Savings,income,Salary,5000.00,USD,2024-02-07,Monthly salary
//! ```
//!
//! Commas inside notes are written as semicolons and turned back into
//! commas on import.

pub mod export;
pub mod import;

pub use export::{export_csv, export_to_path};
pub use import::{import_csv, import_from_path, ImportSummary};

/// Header row, in column order
pub const HEADERS: [&str; 7] = [
    "Account", "Type", "Category", "Amount", "Currency", "Date", "Note",
];

/// Date format of the `Date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";
