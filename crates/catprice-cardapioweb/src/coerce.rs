//! Lenient interpretation of loosely typed partner fields.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// Reads a numeric field.
///
/// Finite JSON numbers are taken as-is. Text is trimmed and its first `,` is
/// read as the decimal separator (`"12,50"` → `12.50`). Anything else,
/// including unparsable text, yields zero.
///
/// Values are decimal, not floating point: numbers outside `Decimal`'s range
/// or its 28-digit scale (`1e30`, `1e-30`) also yield zero.
#[must_use]
pub fn coerce_number(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => number_to_decimal(n),
        Some(Value::String(s)) => parse_decimal_text(&s.trim().replacen(',', ".", 1)),
        _ => Decimal::ZERO,
    }
}

/// Reads a text field: `null`/absent is empty, strings are verbatim and
/// other values use their JSON rendering (`42` → `"42"`).
#[must_use]
pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// `a ?? b`: the first candidate that is present and not `null`.
#[must_use]
pub fn first_present<'a>(a: Option<&'a Value>, b: Option<&'a Value>) -> Option<&'a Value> {
    a.filter(|v| !v.is_null()).or_else(|| b.filter(|v| !v.is_null()))
}

fn number_to_decimal(n: &Number) -> Decimal {
    parse_decimal_text(&n.to_string())
}

fn parse_decimal_text(text: &str) -> Decimal {
    if text.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}
