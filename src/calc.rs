//! Line item arithmetic.
//!
//! Quantities and rates arrive as free text from a form. Anything that does
//! not start with a number counts as zero, so these functions never fail.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::LineItem;

/// Parse the leading number of `input`, or `0.0` if there is none.
///
/// Leading whitespace is skipped and trailing garbage is ignored, so
/// `"3 hours"` parses as `3.0`. Results that overflow to infinity are
/// treated as unparseable.
pub fn parse_decimal(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Round half away from zero to cents and format with exactly two decimals.
///
/// Rounding works on the exact binary value of `value`, so `0.015` (stored
/// as 0.01499...) rounds down to `0.01`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }

    let Some(exact) = Decimal::from_f64_retain(value) else {
        return format!("{:.2}", value);
    };

    let mut cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Avoid printing "-0.00" for tiny negative products
    if cents.is_zero() {
        return "0.00".to_string();
    }

    cents.rescale(2);
    cents.to_string()
}

/// Amount of one line: `quantity * rate`, rounded to cents
pub fn compute_amount(quantity: &str, rate: &str) -> String {
    format_money(parse_decimal(quantity) * parse_decimal(rate))
}

/// Unformatted sum of the line amounts
pub fn total_value(items: &[LineItem]) -> f64 {
    items
        .iter()
        .map(|item| parse_decimal(&item.amount()))
        .sum()
}

/// Invoice total over all lines, formatted with two decimals
pub fn compute_total(items: &[LineItem]) -> String {
    format_money(total_value(items))
}
