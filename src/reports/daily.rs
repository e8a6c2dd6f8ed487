//! Day-by-day grouping for transaction lists

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Money, Transaction, TransactionType};

/// Transactions of one calendar day with that day's totals
#[derive(Debug, Clone, PartialEq)]
pub struct DailyGroup {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
    pub income: Money,
    pub expenses: Money,
}

/// Group by day, newest day first
///
/// Dates carry no time of day, so every entry of a group ties on recency and
/// keeps its input order. Repository queries already return newest first with
/// the id as tie-break.
pub fn daily_groups(transactions: &[Transaction]) -> Vec<DailyGroup> {
    let mut days: BTreeMap<NaiveDate, DailyGroup> = BTreeMap::new();

    for txn in transactions {
        let group = days.entry(txn.date).or_insert_with(|| DailyGroup {
            date: txn.date,
            transactions: Vec::new(),
            income: Money::zero(),
            expenses: Money::zero(),
        });

        match txn.kind {
            TransactionType::Income => group.income += txn.amount,
            TransactionType::Expense => group.expenses += txn.amount,
        }
        group.transactions.push(txn.clone());
    }

    days.into_values().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, TransactionId};

    fn txn(kind: TransactionType, cents: i64, day: u32) -> Transaction {
        Transaction::new(
            TransactionId::new(),
            AccountId::new(),
            kind,
            "Other",
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        )
    }

    #[test]
    fn test_groups_newest_first_with_totals() {
        let all = vec![
            txn(TransactionType::Expense, 300, 2),
            txn(TransactionType::Income, 1000, 9),
            txn(TransactionType::Expense, 200, 2),
            txn(TransactionType::Income, 50, 2),
        ];

        let groups = daily_groups(&all);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].date.to_string(), "2024-05-09");
        assert_eq!(groups[0].income.cents(), 1000);
        assert!(groups[0].expenses.is_zero());

        assert_eq!(groups[1].transactions.len(), 3);
        assert_eq!(groups[1].expenses.cents(), 500);
        assert_eq!(groups[1].income.cents(), 50);
        assert_eq!(groups[1].transactions[0].amount.cents(), 300);
    }

    #[test]
    fn test_same_day_entries_keep_input_order() {
        let all = vec![
            txn(TransactionType::Income, 1, 4),
            txn(TransactionType::Expense, 2, 4),
            txn(TransactionType::Expense, 3, 1),
            txn(TransactionType::Income, 4, 4),
        ];

        let groups = daily_groups(&all);
        let amounts: Vec<i64> = groups[0].transactions.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![1, 2, 4]);

        let reversed: Vec<Transaction> = all.iter().rev().cloned().collect();
        let amounts: Vec<i64> = daily_groups(&reversed)[0]
            .transactions
            .iter()
            .map(|t| t.amount.cents())
            .collect();
        assert_eq!(amounts, vec![4, 2, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(daily_groups(&[]).is_empty());
    }
}
