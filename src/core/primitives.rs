use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{PageError, PageResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> PageResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| PageError::InvalidData(format!("{field_name} cannot be represented as f64")))
}

/// Parses the longest leading decimal number of `input`, the way form fields are
/// read by browsers: leading whitespace is skipped and trailing garbage ignored.
///
/// Returns `None` when no numeric prefix exists.
#[must_use]
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if trimmed[end..].starts_with("Infinity") {
        return trimmed[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_leading_float;

    #[test]
    fn accepts_numeric_prefix_and_ignores_suffix() {
        assert_eq!(parse_leading_float("  12.5kWh"), Some(12.5));
        assert_eq!(parse_leading_float("-3"), Some(-3.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("5."), Some(5.0));
        assert_eq!(parse_leading_float("1e3W"), Some(1000.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("-"), None);
    }

    #[test]
    fn accepts_infinity_literal() {
        assert_eq!(parse_leading_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_leading_float("-Infinity"), Some(f64::NEG_INFINITY));
    }
}
