//! Leaf converters
//!
//! Each converter maps one wire value onto its canonical JSON form and returns
//! a clone of the input for any shape it does not recognize. None of them can
//! fail.

use serde_json::{Number, Value};

use super::wire::{classify, WireForm};

/// Largest integer a JSON number (IEEE-754 double) represents exactly
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Canonicalize a snowflake or other 64-bit integer as a decimal string.
///
/// Accepts plain strings (returned as-is), plain numbers, `$numberLong`/
/// `$numberInt` wrappers and split `{low, high}` longs. `0` converts to `"0"`.
pub fn snowflake_to_string(value: &Value) -> Value {
    let converted = match classify(value) {
        WireForm::PlainNumber(n) => number_to_decimal(n),
        WireForm::WireInteger(digits) => integer_literal(digits),
        WireForm::SplitLong(halves) => Some(halves.to_decimal()),
        WireForm::Null
        | WireForm::PlainString(_)
        | WireForm::NativeDate(_)
        | WireForm::WireDateWrapper(_)
        | WireForm::ObjectId(_)
        | WireForm::Other => None,
    };

    converted.map_or_else(|| value.clone(), Value::String)
}

/// Canonicalize a timestamp as integer milliseconds since the Unix epoch.
///
/// Accepts ISO-8601 strings, `$date` wrappers holding an ISO string, a
/// `$numberLong`, a split long or a bare number, and integers already in milliseconds.
/// Unparseable values are returned unchanged.
pub fn timestamp_to_millis(value: &Value) -> Value {
    let millis = match classify(value) {
        WireForm::NativeDate(instant) => Some(instant.timestamp_millis()),
        WireForm::WireDateWrapper(inner) => wrapped_millis(inner),
        WireForm::WireInteger(digits) => digits.trim().parse::<i64>().ok(),
        WireForm::SplitLong(halves) => halves.to_i64(),
        WireForm::PlainNumber(n) => integral_millis(n),
        WireForm::Null
        | WireForm::PlainString(_)
        | WireForm::ObjectId(_)
        | WireForm::Other => None,
    };

    millis.map_or_else(|| value.clone(), Value::from)
}

/// Canonicalize the store's own record id. ObjectIds become their hex string;
/// anything else is treated like a snowflake.
pub fn record_id_to_string(value: &Value) -> Value {
    match classify(value) {
        WireForm::ObjectId(hex) => Value::String(hex.to_owned()),
        _ => snowflake_to_string(value),
    }
}

fn wrapped_millis(inner: &Value) -> Option<i64> {
    match classify(inner) {
        WireForm::NativeDate(instant) => Some(instant.timestamp_millis()),
        WireForm::WireInteger(digits) => digits.trim().parse::<i64>().ok(),
        WireForm::SplitLong(halves) => halves.to_i64(),
        WireForm::PlainNumber(n) => integral_millis(n),
        _ => None,
    }
}

/// Exact integer rendering; floats only when integral and inside the safe range.
fn number_to_decimal(n: &Number) -> Option<String> {
    if let Some(unsigned) = n.as_u64() {
        return Some(unsigned.to_string());
    }
    if let Some(signed) = n.as_i64() {
        return Some(signed.to_string());
    }
    safe_integral_float(n).map(|whole| whole.to_string())
}

fn integral_millis(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| safe_integral_float(n))
}

fn safe_integral_float(n: &Number) -> Option<i64> {
    let f = n.as_f64()?;
    let in_range = f.abs() <= MAX_SAFE_INTEGER as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Re-render a decimal literal through the integer parsers so `"007"` and
/// `" 7"` canonicalize to `"7"`.
fn integer_literal(digits: &str) -> Option<String> {
    let trimmed = digits.trim();
    if let Ok(unsigned) = trimmed.parse::<u64>() {
        return Some(unsigned.to_string());
    }
    trimmed.parse::<i64>().ok().map(|signed| signed.to_string())
}
