//! Utility functions and helpers

use rust_decimal::Decimal;

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;
    for c in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a money amount with fixed decimal places and three-digit
/// grouping in the integer part (e.g., "1,234,500.50")
pub fn format_amount(amount: Decimal, decimal_places: u32) -> String {
    let rounded = amount.round_dp(decimal_places);
    let s = rounded.to_string();
    let negative = s.starts_with('-');
    let unsigned = s.trim_start_matches('-');
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    let grouped = format_number(int_part);
    let mut frac = frac_part.to_string();
    while (frac.len() as u32) < decimal_places {
        frac.push('0');
    }
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if decimal_places > 0 {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Generate a short hash (8 characters) from content
pub fn short_hash(content: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let hash = hasher.finish();

    format!("{:016x}", hash)[..8].to_string()
}

/// Generate a transaction id from its identifying fields
pub fn generate_txn_id(student_id: &str, receipt_no: &str, content: &str) -> String {
    format!("txn-{}:{}:{}", student_id, receipt_no, short_hash(content))
}

/// Generate a receipt number from a monotonic counter
pub fn generate_receipt_no(counter: u64) -> String {
    format!("RCP-{:08}", counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(100), "100");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(123450050, 2), 2), "1,234,500.50");
        assert_eq!(format_amount(Decimal::from(50000), 2), "50,000.00");
        assert_eq!(format_amount(Decimal::new(-500, 2), 2), "-5.00");
    }

    #[test]
    fn test_short_hash_stable() {
        assert_eq!(short_hash("abc"), short_hash("abc"));
        assert_eq!(short_hash("abc").len(), 8);
    }

    #[test]
    fn test_generate_receipt_no() {
        assert_eq!(generate_receipt_no(42), "RCP-00000042");
    }
}
