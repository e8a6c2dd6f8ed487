//! Category vocabulary
//!
//! Categories are canonical, non-localized identifiers. Each transaction
//! type has its own fixed list; `Other` is the catch-all for both.

use super::transaction::TransactionType;

/// Catch-all category used when a category is not recognized
pub const OTHER: &str = "Other";

/// Categories available for income transactions
pub const INCOME_CATEGORIES: [&str; 6] = [
    "Allowance",
    "Bonus",
    "Business",
    "Investment",
    "Other",
    "Salary",
];

/// Categories available for expense transactions
pub const EXPENSE_CATEGORIES: [&str; 13] = [
    "Business",
    "Car",
    "Clothing",
    "Food",
    "Health",
    "Household",
    "Other",
    "Shopping",
    "Social",
    "Supermarket",
    "Taxes",
    "Transportation",
    "Travel",
];

/// The vocabulary for a transaction type
pub fn categories_for(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Check whether `category` belongs to the vocabulary of `kind` (exact match)
pub fn is_valid(kind: TransactionType, category: &str) -> bool {
    categories_for(kind).contains(&category)
}

/// Return `category` if it is valid for `kind`, else the catch-all
pub fn coerce(kind: TransactionType, category: &str) -> String {
    if is_valid(kind, category) {
        category.to_string()
    } else {
        OTHER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_are_per_type() {
        assert!(is_valid(TransactionType::Income, "Salary"));
        assert!(!is_valid(TransactionType::Expense, "Salary"));
        assert!(is_valid(TransactionType::Expense, "Food"));
        assert!(!is_valid(TransactionType::Income, "Food"));
        assert!(is_valid(TransactionType::Income, "Business"));
        assert!(is_valid(TransactionType::Expense, "Business"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_valid(TransactionType::Income, "salary"));
    }

    #[test]
    fn test_coerce_unknown_to_other() {
        assert_eq!(coerce(TransactionType::Expense, "Gadgets"), "Other");
        assert_eq!(coerce(TransactionType::Expense, "Travel"), "Travel");
    }

    #[test]
    fn test_other_in_both_lists() {
        assert!(INCOME_CATEGORIES.contains(&OTHER));
        assert!(EXPENSE_CATEGORIES.contains(&OTHER));
    }
}
