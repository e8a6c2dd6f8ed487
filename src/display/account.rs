//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, AccountId};
use crate::reports::Totals;

use super::currency::format_currency;

/// Format accounts as a table, marking the current one with `*`
pub fn format_account_list(accounts: &[Account], current: AccountId) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "   {:<name_width$}  {:<8}  {:<7}  {}\n",
        "Name",
        "Currency",
        "Default",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "   {:-<name_width$}  {:-<8}  {:-<7}  {:-<12}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for account in accounts {
        output.push_str(&format!(
            " {} {:<name_width$}  {:<8}  {:<7}  {}\n",
            if account.id == current { "*" } else { " " },
            account.name,
            account.currency,
            if account.is_default { "yes" } else { "" },
            account.id,
            name_width = name_width,
        ));
    }

    output
}

/// Format a single account's details with its all-time totals
pub fn format_account_details(account: &Account, totals: &Totals, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:             {}\n", account.id.to_full_string()));
    output.push_str(&format!("  Currency:       {}\n", account.currency));
    output.push_str(&format!(
        "  Default:        {}\n",
        if account.is_default { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Created:        {}\n",
        account.created_date.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  Modified:       {}\n",
        account.last_modified.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("  Transactions:   {}\n", transaction_count));
    output.push_str(&format!(
        "  Income:         {}\n",
        format_currency(totals.income, &account.currency)
    ));
    output.push_str(&format!(
        "  Expenses:       {}\n",
        format_currency(totals.expenses, &account.currency)
    ));
    output.push_str(&format!(
        "  Balance:        {}\n",
        format_currency(totals.balance, &account.currency)
    ));

    output
}
