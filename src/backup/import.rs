//! CSV import
//!
//! Only an empty source or a wrong header row rejects an import. Rows that
//! do not parse are skipped and counted; nothing about them is reported
//! beyond a debug log line.

use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use super::{DATE_FORMAT, HEADERS};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{category, currency, Money, Transaction, TransactionType};
use crate::services::{AccountRegistry, TransactionRepository};

/// Outcome counts of a completed import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Transactions inserted
    pub imported: usize,
    /// Non-empty data rows that were ignored
    pub skipped: usize,
    /// Accounts created for unknown names
    pub accounts_created: usize,
}

/// A data row that passed field validation
struct ParsedRow {
    account: String,
    kind: TransactionType,
    category: String,
    amount: Money,
    currency: String,
    date: NaiveDate,
    note: String,
}

/// Import backup text, creating accounts by name as needed
///
/// Rows are inserted one at a time; a persistence failure stops the batch
/// and leaves already inserted rows in place.
pub fn import_csv(
    text: &str,
    registry: &mut AccountRegistry<'_>,
    repository: &TransactionRepository<'_>,
) -> TrackerResult<ImportSummary> {
    if text.lines().all(|line| line.trim().is_empty()) {
        return Err(TrackerError::EmptyFile);
    }

    // The header is the first physical line, even when it is blank
    let header = text.lines().next().unwrap_or_default();
    if !header.split(',').eq(HEADERS.iter().copied()) {
        return Err(TrackerError::InvalidHeaders {
            expected: expected_headers(),
            found: header.split(',').map(str::to_string).collect(),
        });
    }

    let body = text.split_once('\n').map_or("", |(_, rest)| rest);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());

    let mut summary = ImportSummary::default();

    for (index, result) in reader.records().enumerate() {
        // Line 1 is the header
        let line = index + 2;

        let row = match result.map_err(|e| e.to_string()).and_then(|r| parse_row(&r)) {
            Ok(row) => row,
            Err(reason) => {
                debug!(line, reason = %reason, "skipping CSV row");
                summary.skipped += 1;
                continue;
            }
        };

        let account_id = match registry.find_by_name(&row.account) {
            Some(account) => account.id,
            None => {
                let currency = currency::normalize_or(&row.currency, registry.base_currency());
                let account = registry.new_account(&row.account, &currency);
                let id = account.id;
                registry.add(account)?;
                summary.accounts_created += 1;
                id
            }
        };

        let txn = Transaction::new(
            repository.next_id(),
            account_id,
            row.kind,
            category::coerce(row.kind, &row.category),
            row.amount,
            row.date,
        )
        .with_note(row.note);

        repository.add(txn)?;
        summary.imported += 1;
    }

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        accounts_created = summary.accounts_created,
        "CSV import finished"
    );
    Ok(summary)
}

/// Read a UTF-8 file and import it
pub fn import_from_path(
    path: &Path,
    registry: &mut AccountRegistry<'_>,
    repository: &TransactionRepository<'_>,
) -> TrackerResult<ImportSummary> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| TrackerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    import_csv(&text, registry, repository)
}

fn expected_headers() -> Vec<String> {
    HEADERS.iter().map(|h| h.to_string()).collect()
}

fn parse_row(record: &StringRecord) -> Result<ParsedRow, String> {
    if record.len() != HEADERS.len() {
        return Err(format!("expected {} fields, found {}", HEADERS.len(), record.len()));
    }

    let kind: TransactionType = record[1].parse().map_err(|e| format!("{}", e))?;

    let amount = Money::parse(&record[3]).map_err(|e| e.to_string())?;
    if amount.is_negative() {
        return Err(format!("negative amount {}", amount));
    }

    let date = NaiveDate::parse_from_str(&record[5], DATE_FORMAT)
        .map_err(|e| format!("invalid date '{}': {}", &record[5], e))?;

    Ok(ParsedRow {
        account: record[0].to_string(),
        kind,
        category: record[2].to_string(),
        amount,
        currency: record[4].to_string(),
        date,
        note: record[6].replace(';', ","),
    })
}
