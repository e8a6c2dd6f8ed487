//! Currency formatting
//!
//! Amounts of 10,000 or more drop their fraction digits.

use crate::models::currency::symbol;
use crate::models::Money;

/// Amounts at or above this many cents render without fraction digits
const WHOLE_UNITS_THRESHOLD: i64 = 1_000_000;

/// Format an amount with its currency symbol and thousands separators
///
/// `$1,234.50`, `-€12.00`, `£12,346` (from 12,345.50), `£12,344` (from 12,344.50), `XYZ5.00`.
pub fn format_currency(amount: Money, currency_code: &str) -> String {
    let cents = amount.cents().unsigned_abs();
    let sign = if amount.is_negative() { "-" } else { "" };
    let symbol = symbol(currency_code);

    if cents >= WHOLE_UNITS_THRESHOLD as u64 {
        // Half to even on the absolute value
        let (whole, rest) = (cents / 100, cents % 100);
        let units = if rest > 50 || (rest == 50 && whole % 2 == 1) {
            whole + 1
        } else {
            whole
        };
        format!("{}{}{}", sign, symbol, group_thousands(units))
    } else {
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(cents / 100),
            cents % 100
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_keep_cents() {
        assert_eq!(format_currency(Money::from_cents(0), "USD"), "$0.00");
        assert_eq!(format_currency(Money::from_cents(123_450), "USD"), "$1,234.50");
        assert_eq!(format_currency(Money::from_cents(999_999), "EUR"), "€9,999.99");
    }

    #[test]
    fn test_large_amounts_round_to_units() {
        assert_eq!(format_currency(Money::from_cents(1_000_000), "GBP"), "£10,000");
        assert_eq!(format_currency(Money::from_cents(1_234_550), "USD"), "$12,346");
        assert_eq!(format_currency(Money::from_cents(1_234_549), "USD"), "$12,345");
        assert_eq!(format_currency(Money::from_cents(123_456_789_00), "JPY"), "¥123,456,789");
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        assert_eq!(format_currency(Money::from_cents(1_234_450), "USD"), "$12,344");
        assert_eq!(format_currency(Money::from_cents(1_234_451), "USD"), "$12,345");
        assert_eq!(format_currency(Money::from_cents(1_000_050), "EUR"), "€10,000");
        assert_eq!(format_currency(Money::from_cents(-1_234_450), "USD"), "-$12,344");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_currency(Money::from_cents(-1_200), "EUR"), "-€12.00");
        assert_eq!(format_currency(Money::from_cents(-1_234_550), "CHF"), "-₣12,346");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(format_currency(Money::from_cents(100), "CAD"), "$1.00");
        assert_eq!(format_currency(Money::from_cents(100), "CNY"), "¥1.00");
        assert_eq!(format_currency(Money::from_cents(500), "XYZ"), "XYZ5.00");
    }
}
