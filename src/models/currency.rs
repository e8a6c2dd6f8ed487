//! Currency codes understood by the tracker
//!
//! Accounts carry a free-form ISO-4217-like code. Only the codes listed
//! here are accepted when an account is synthesized from imported data.

/// Base currency used when nothing better is known
pub const BASE_CURRENCY: &str = "USD";

/// Currency codes accepted for accounts created during import
pub const SUPPORTED_CURRENCIES: [&str; 10] = [
    "USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY", "HKD", "SGD",
];

/// Check whether a code is one of the supported currencies (case-sensitive)
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&code)
}

/// Upper-case a raw code and accept it if supported, else use `fallback`
pub fn normalize_or(code: &str, fallback: &str) -> String {
    let upper = code.to_uppercase();
    if is_supported(&upper) {
        upper
    } else {
        fallback.to_string()
    }
}

/// Display symbol for a currency code; unknown codes render as themselves
pub fn symbol(code: &str) -> &str {
    match code {
        "USD" | "CAD" | "AUD" | "HKD" | "SGD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "CHF" => "₣",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_upper_cases_supported_codes() {
        assert_eq!(normalize_or("eur", BASE_CURRENCY), "EUR");
        assert_eq!(normalize_or("USD", BASE_CURRENCY), "USD");
    }

    #[test]
    fn test_normalize_falls_back_for_unknown_codes() {
        assert_eq!(normalize_or("XYZ", BASE_CURRENCY), "USD");
        assert_eq!(normalize_or("", "EUR"), "EUR");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(symbol("USD"), "$");
        assert_eq!(symbol("GBP"), "£");
        assert_eq!(symbol("CNY"), "¥");
        assert_eq!(symbol("SEK"), "SEK");
    }
}
