//! Transaction display formatting
//!
//! Lists are grouped by day, newest first, with each day's income and
//! expense totals in the group header.

use crate::models::{Transaction, TransactionType};
use crate::reports::DailyGroup;

use super::currency::format_currency;
use super::report::truncate;

/// Format a single transaction as a list row
pub fn format_transaction_row(txn: &Transaction, currency: &str) -> String {
    let signed = match txn.kind {
        TransactionType::Income => format!("+{}", format_currency(txn.amount, currency)),
        TransactionType::Expense => format!("-{}", format_currency(txn.amount, currency)),
    };

    format!(
        "  {:<12}  {:<14}  {:>14}  {}",
        txn.id.to_string(),
        truncate(&txn.category, 14),
        signed,
        truncate(&txn.note, 40)
    )
}

/// Format day groups as a transaction list
pub fn format_transaction_list(groups: &[DailyGroup], currency: &str, date_format: &str) -> String {
    if groups.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();

    for group in groups {
        output.push_str(&format!(
            "{} {}  (income {}, expenses {})\n",
            group.date.format("%a"),
            group.date.format(date_format),
            format_currency(group.income, currency),
            format_currency(group.expenses, currency),
        ));

        for txn in &group.transactions {
            output.push_str(&format_transaction_row(txn, currency));
            output.push('\n');
        }
    }

    output
}

/// Format a single transaction's details
pub fn format_transaction_details(
    txn: &Transaction,
    account_name: &str,
    currency: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id.to_full_string()));
    output.push_str(&format!("  Account:     {}\n", account_name));
    output.push_str(&format!("  Type:        {}\n", txn.kind));
    output.push_str(&format!("  Category:    {}\n", txn.category));
    output.push_str(&format!("  Amount:      {}\n", format_currency(txn.amount, currency)));
    output.push_str(&format!("  Date:        {}\n", txn.date.format(date_format)));

    if !txn.note.is_empty() {
        output.push_str(&format!("  Note:        {}\n", txn.note));
    }

    output
}
