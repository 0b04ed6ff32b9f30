//! Wire-form classification
//!
//! Records reach the normalizer as relaxed extended JSON. A single value may
//! carry a 64-bit integer, a date, or an ObjectId in several encodings
//! depending on which writer produced it. [`classify`] maps every JSON value
//! onto exactly one [`WireForm`] so the converters can match exhaustively.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};

/// Extended JSON marker for a 64-bit integer (`{"$numberLong": "123"}`)
pub const NUMBER_LONG: &str = "$numberLong";

/// Extended JSON marker for a 32-bit integer (`{"$numberInt": "123"}`)
pub const NUMBER_INT: &str = "$numberInt";

/// Extended JSON marker for a date (`{"$date": ...}`)
pub const DATE: &str = "$date";

/// Extended JSON marker for an ObjectId (`{"$oid": "<24 hex>"}`)
pub const OBJECT_ID: &str = "$oid";

/// A driver `Long` serialized field by field: `{"low", "high"[, "unsigned"]}`.
///
/// Each half holds the raw 32 bits; drivers write `low` as a signed int32,
/// but an unsigned rendering of the same bits is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongHalves {
    pub low: u32,
    pub high: u32,
    pub unsigned: bool,
}

impl LongHalves {
    fn bits(self) -> u64 {
        (u64::from(self.high) << 32) | u64::from(self.low)
    }

    /// The combined value as a signed integer, if it fits
    pub fn to_i64(self) -> Option<i64> {
        if self.unsigned {
            i64::try_from(self.bits()).ok()
        } else {
            Some(self.bits() as i64)
        }
    }

    /// Exact decimal rendering of the combined value
    pub fn to_decimal(self) -> String {
        if self.unsigned {
            self.bits().to_string()
        } else {
            (self.bits() as i64).to_string()
        }
    }
}

/// Encoding of a single JSON value as it came off the wire
#[derive(Debug, Clone, PartialEq)]
pub enum WireForm<'a> {
    /// JSON `null`
    Null,
    /// A string that is not a recognizable date
    PlainString(&'a str),
    /// A JSON number
    PlainNumber(&'a Number),
    /// `{"$numberLong": "<decimal>"}` or `{"$numberInt": "<decimal>"}`
    WireInteger(&'a str),
    /// A driver `Long` split into 32-bit halves
    SplitLong(LongHalves),
    /// `{"$date": <inner>}`; the inner value is classified again
    WireDateWrapper(&'a Value),
    /// An ISO-8601 string, the way drivers render a native date
    NativeDate(DateTime<Utc>),
    /// `{"$oid": "<hex>"}`
    ObjectId(&'a str),
    /// Anything else: booleans, arrays, ordinary objects
    Other,
}

/// Classify a JSON value by its wire encoding
pub fn classify(value: &Value) -> WireForm<'_> {
    match value {
        Value::Null => WireForm::Null,
        Value::Number(n) => WireForm::PlainNumber(n),
        Value::String(s) => match parse_iso8601(s) {
            Some(instant) => WireForm::NativeDate(instant),
            None => WireForm::PlainString(s),
        },
        Value::Object(map) => classify_wrapper(map),
        Value::Bool(_) | Value::Array(_) => WireForm::Other,
    }
}

/// Wrappers are single-key objects; anything with extra keys is an ordinary
/// object unless it is exactly the split-long shape.
fn classify_wrapper(map: &Map<String, Value>) -> WireForm<'_> {
    if let Some(halves) = long_halves(map) {
        return WireForm::SplitLong(halves);
    }

    let mut entries = map.iter();
    let (Some((key, inner)), None) = (entries.next(), entries.next()) else {
        return WireForm::Other;
    };

    match (key.as_str(), inner) {
        (NUMBER_LONG | NUMBER_INT, Value::String(digits)) => WireForm::WireInteger(digits),
        (DATE, inner) => WireForm::WireDateWrapper(inner),
        (OBJECT_ID, Value::String(hex)) => WireForm::ObjectId(hex),
        _ => WireForm::Other,
    }
}

fn long_halves(map: &Map<String, Value>) -> Option<LongHalves> {
    let known = map
        .keys()
        .all(|key| matches!(key.as_str(), "low" | "high" | "unsigned"));
    if !known {
        return None;
    }

    let unsigned = match map.get("unsigned") {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => return None,
    };

    Some(LongHalves {
        low: half_bits(map.get("low")?)?,
        high: half_bits(map.get("high")?)?,
        unsigned,
    })
}

/// A 32-bit half, given either as a signed or an unsigned integer
fn half_bits(value: &Value) -> Option<u32> {
    let n = value.as_i64()?;
    if let Ok(signed) = i32::try_from(n) {
        return Some(signed as u32);
    }
    u32::try_from(n).ok()
}

/// Parse an ISO-8601 instant. Offset-less timestamps are read as UTC.
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
