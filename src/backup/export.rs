//! CSV export

use std::collections::HashMap;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use super::{DATE_FORMAT, HEADERS};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Account, AccountId, Transaction};
use crate::storage::file_io::write_atomic;

/// Render transactions in the backup format
///
/// Each row names its account by id lookup; a transaction whose account is
/// gone gets an empty name and `base_currency`.
pub fn export_csv(
    transactions: &[Transaction],
    accounts: &[Account],
    base_currency: &str,
) -> TrackerResult<String> {
    let by_id: HashMap<AccountId, &Account> = accounts.iter().map(|a| (a.id, a)).collect();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADERS).map_err(export_error)?;

    for txn in transactions {
        let account = by_id.get(&txn.account_id);
        let date = txn.date.format(DATE_FORMAT).to_string();
        let amount = txn.amount.to_plain_string();
        let note = txn.note.replace(',', ";");

        writer
            .write_record([
                account.map_or("", |a| a.name.as_str()),
                txn.kind.as_str(),
                txn.category.as_str(),
                amount.as_str(),
                account.map_or(base_currency, |a| a.currency.as_str()),
                date.as_str(),
                note.as_str(),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TrackerError::Io(format!("Failed to finish CSV export: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| TrackerError::Io(format!("Export produced invalid UTF-8: {}", e)))
}

/// Export to a file, replacing it atomically
pub fn export_to_path(
    path: &Path,
    transactions: &[Transaction],
    accounts: &[Account],
    base_currency: &str,
) -> TrackerResult<usize> {
    let text = export_csv(transactions, accounts, base_currency)?;
    write_atomic(path, text.as_bytes())?;
    info!(path = %path.display(), rows = transactions.len(), "exported transactions");
    Ok(transactions.len())
}

fn export_error(e: csv::Error) -> TrackerError {
    TrackerError::Io(format!("Failed to write CSV: {}", e))
}
