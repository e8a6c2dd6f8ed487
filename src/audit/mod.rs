//! Audit logging for the money tracker
//!
//! Records every committed create, update and delete of accounts and
//! transactions in an append-only JSON-lines file.
//!
//! - `AuditEntry`: one log line, built from a `ChangeEvent`.
//! - `AuditLogger`: appends entries; subscribes to `Storage` as a
//!   `ChangeObserver`.
//! - `describe_changes`: field-level summary for updates.

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
