//! Income, expense and balance aggregates
//!
//! Everything here is a pure function over a slice of transactions, usually
//! the result of a repository query narrowed to a period.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;

use crate::models::{Money, Transaction, TransactionType};

/// Lens through which statistics are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryType {
    Income,
    Expenses,
    Balance,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expenses => "expenses",
            Self::Balance => "balance",
        }
    }

    /// Whether a transaction contributes under this lens
    pub fn includes(&self, txn: &Transaction) -> bool {
        match self {
            Self::Income => txn.kind == TransactionType::Income,
            Self::Expenses => txn.kind == TransactionType::Expense,
            Self::Balance => true,
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expenses" | "expense" => Ok(Self::Expenses),
            "balance" => Ok(Self::Balance),
            other => Err(format!(
                "Unknown summary type '{}' (expected income, expenses or balance)",
                other
            )),
        }
    }
}

/// Income, expenses and their difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
    /// income - expenses
    pub balance: Money,
}

/// One bar of a category breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category identifier, or "Income"/"Expenses" for the balance lens
    pub label: String,
    pub amount: Money,
}

/// Aggregate for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTotal {
    /// 1..=12
    pub month: u32,
    pub amount: Money,
}

/// Label of the income bucket in a balance breakdown
pub const INCOME_LABEL: &str = "Income";

/// Label of the expense bucket in a balance breakdown
pub const EXPENSES_LABEL: &str = "Expenses";

/// Sum income and expenses
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = Money::zero();
    let mut expenses = Money::zero();

    for txn in transactions {
        match txn.kind {
            TransactionType::Income => income += txn.amount,
            TransactionType::Expense => expenses += txn.amount,
        }
    }

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Keep the transactions that contribute under `summary`
pub fn filter_by_summary_type(
    transactions: &[Transaction],
    summary: SummaryType,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| summary.includes(t))
        .cloned()
        .collect()
}

/// Per-category sums, largest first
///
/// The balance lens always yields exactly two buckets, income then expenses.
pub fn category_breakdown(transactions: &[Transaction], summary: SummaryType) -> Vec<CategoryTotal> {
    if summary == SummaryType::Balance {
        let t = totals(transactions);
        return vec![
            CategoryTotal {
                label: INCOME_LABEL.to_string(),
                amount: t.income,
            },
            CategoryTotal {
                label: EXPENSES_LABEL.to_string(),
                amount: t.expenses,
            },
        ];
    }

    let mut sums: HashMap<&str, Money> = HashMap::new();
    for txn in transactions.iter().filter(|t| summary.includes(t)) {
        *sums.entry(txn.category.as_str()).or_default() += txn.amount;
    }

    let mut breakdown: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(label, amount)| CategoryTotal {
            label: label.to_string(),
            amount,
        })
        .collect();

    // Ties broken by label so output is stable
    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.label.cmp(&b.label)));
    breakdown
}

/// Share of each bucket in percent, or `None` when the total is zero
pub fn percentages(breakdown: &[CategoryTotal]) -> Option<Vec<f64>> {
    let total: Money = breakdown.iter().map(|c| c.amount).sum();
    if total.is_zero() {
        return None;
    }

    Some(
        breakdown
            .iter()
            .map(|c| c.amount.cents() as f64 / total.cents() as f64 * 100.0)
            .collect(),
    )
}

/// Aggregate per calendar month, omitting months with no contributing rows
///
/// Months are keyed by number only; narrow to one year first for a yearly
/// chart.
pub fn monthly_series(transactions: &[Transaction], summary: SummaryType) -> Vec<MonthTotal> {
    let mut months: BTreeMap<u32, Money> = BTreeMap::new();

    for txn in transactions.iter().filter(|t| summary.includes(t)) {
        let signed = match (summary, txn.kind) {
            (SummaryType::Balance, TransactionType::Expense) => -txn.amount,
            _ => txn.amount,
        };
        *months.entry(txn.date.month()).or_default() += signed;
    }

    months
        .into_iter()
        .map(|(month, amount)| MonthTotal { month, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, TransactionId};
    use chrono::NaiveDate;

    fn txn(kind: TransactionType, category: &str, cents: i64, month: u32) -> Transaction {
        Transaction::new(
            TransactionId::new(),
            AccountId::new(),
            kind,
            category,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, month, 10).unwrap(),
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(TransactionType::Income, "Salary", 500_000, 1),
            txn(TransactionType::Income, "Bonus", 50_000, 3),
            txn(TransactionType::Expense, "Food", 12_000, 1),
            txn(TransactionType::Expense, "Travel", 80_000, 3),
            txn(TransactionType::Expense, "Food", 3_000, 3),
        ]
    }

    #[test]
    fn test_totals_balance_is_difference() {
        let t = totals(&sample());
        assert_eq!(t.income.cents(), 550_000);
        assert_eq!(t.expenses.cents(), 95_000);
        assert_eq!(t.balance, t.income - t.expenses);
    }

    #[test]
    fn test_totals_of_nothing() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn test_negative_balance() {
        let t = totals(&[txn(TransactionType::Expense, "Car", 100, 5)]);
        assert_eq!(t.balance.cents(), -100);
    }

    #[test]
    fn test_filter_by_summary_type() {
        let all = sample();
        assert_eq!(filter_by_summary_type(&all, SummaryType::Income).len(), 2);
        assert_eq!(filter_by_summary_type(&all, SummaryType::Expenses).len(), 3);
        assert_eq!(filter_by_summary_type(&all, SummaryType::Balance).len(), 5);
    }

    #[test]
    fn test_expense_breakdown_sorted_descending() {
        let breakdown = category_breakdown(&sample(), SummaryType::Expenses);
        let labels: Vec<_> = breakdown.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Travel", "Food"]);
        assert_eq!(breakdown[1].amount.cents(), 15_000);
    }

    #[test]
    fn test_balance_breakdown_has_two_buckets() {
        let breakdown = category_breakdown(&sample(), SummaryType::Balance);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].label, "Income");
        assert_eq!(breakdown[0].amount.cents(), 550_000);
        assert_eq!(breakdown[1].label, "Expenses");
        assert_eq!(breakdown[1].amount.cents(), 95_000);

        let empty = category_breakdown(&[], SummaryType::Balance);
        assert_eq!(empty.len(), 2);
        assert!(empty.iter().all(|c| c.amount.is_zero()));
    }

    #[test]
    fn test_percentages() {
        let breakdown = category_breakdown(&sample(), SummaryType::Income);
        let shares = percentages(&breakdown).unwrap();
        assert_eq!(shares.len(), 2);
        assert!((shares.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert!(shares[0] > shares[1]);
    }

    #[test]
    fn test_percentages_of_zero_total() {
        assert_eq!(percentages(&category_breakdown(&[], SummaryType::Balance)), None);
        assert_eq!(percentages(&[]), None);
    }

    #[test]
    fn test_monthly_series_skips_empty_months() {
        let series = monthly_series(&sample(), SummaryType::Expenses);
        assert_eq!(
            series,
            vec![
                MonthTotal { month: 1, amount: Money::from_cents(12_000) },
                MonthTotal { month: 3, amount: Money::from_cents(83_000) },
            ]
        );
    }

    #[test]
    fn test_monthly_series_only_counts_contributing_rows() {
        let all = vec![
            txn(TransactionType::Income, "Salary", 100, 2),
            txn(TransactionType::Expense, "Food", 100, 4),
        ];
        let series = monthly_series(&all, SummaryType::Income);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].month, 2);
    }

    #[test]
    fn test_monthly_balance_nets_out() {
        let series = monthly_series(&sample(), SummaryType::Balance);
        assert_eq!(series[0].amount.cents(), 500_000 - 12_000);
        assert_eq!(series[1].amount.cents(), 50_000 - 83_000);
    }

    #[test]
    fn test_monthly_series_keeps_months_that_net_to_zero() {
        let balanced = vec![
            txn(TransactionType::Income, "Salary", 10_000, 6),
            txn(TransactionType::Expense, "Food", 10_000, 6),
        ];
        assert_eq!(
            monthly_series(&balanced, SummaryType::Balance),
            vec![MonthTotal { month: 6, amount: Money::zero() }]
        );

        let free = vec![txn(TransactionType::Income, "Other", 0, 8)];
        assert_eq!(
            monthly_series(&free, SummaryType::Income),
            vec![MonthTotal { month: 8, amount: Money::zero() }]
        );
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let huge = i64::MAX / 2 + 1;
        let all = vec![
            txn(TransactionType::Income, "Salary", huge, 1),
            txn(TransactionType::Income, "Salary", huge, 1),
            txn(TransactionType::Expense, "Food", huge, 1),
            txn(TransactionType::Expense, "Food", huge, 1),
        ];

        let t = totals(&all);
        assert_eq!(t.income.cents(), i64::MAX);
        assert_eq!(t.expenses.cents(), i64::MAX);
        assert!(t.balance.is_zero());

        let series = monthly_series(&all, SummaryType::Income);
        assert_eq!(series[0].amount.cents(), i64::MAX);
        assert_eq!(category_breakdown(&all, SummaryType::Expenses)[0].amount.cents(), i64::MAX);
    }

    #[test]
    fn test_summary_type_parsing() {
        assert_eq!("Expenses".parse::<SummaryType>(), Ok(SummaryType::Expenses));
        assert_eq!("balance".parse::<SummaryType>(), Ok(SummaryType::Balance));
        assert!("net".parse::<SummaryType>().is_err());
    }
}
