//! Brazilian-style number parsing and formatting.
//!
//! Report numbers use `.` as the thousands separator and `,` as the decimal
//! separator (`1.234,56`).

use std::str::FromStr;

use num_format::{CustomFormat, Grouping, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Parses a locale-formatted number.
///
/// Returns `None` for empty or malformed input. Callers decide whether an
/// absent number means "drop" or "zero".
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::report::parse_locale_number;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_locale_number("1.234,56"), Some(Decimal::new(123456, 2)));
/// assert_eq!(parse_locale_number(""), None);
/// assert_eq!(parse_locale_number("abc"), None);
/// ```
pub fn parse_locale_number(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Formats a number with `.` thousands grouping and `,` decimals.
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::report::format_locale_number;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_locale_number(Decimal::new(1234567, 1), 2), "123.456,70");
/// ```
pub fn format_locale_number(value: Decimal, decimals: u32) -> String {
    let rounded =
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    // Decimal::MAX is below 2^96, so every integer part fits a u128.
    let integer = abs.trunc().to_u128().unwrap_or_default();
    let grouped = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator(".")
        .build()
        .map(|format| integer.to_formatted_string(&format))
        .unwrap_or_else(|_| integer.to_string());

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);

    if decimals > 0 {
        // fract() keeps the scale of `abs`, so pad to the requested width.
        let fraction = abs.fract().to_string();
        let digits = fraction.split('.').nth(1).unwrap_or("");
        out.push(',');
        out.push_str(digits);
        for _ in digits.len()..decimals as usize {
            out.push('0');
        }
    }

    out
}
