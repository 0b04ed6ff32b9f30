//! Recursive, table-driven document transform

use serde_json::{Map, Value};

use super::convert::{record_id_to_string, snowflake_to_string, timestamp_to_millis};
use super::schema::{FieldRole, Schema, TRACKED_USER};

/// Normalize a tracked user record into its canonical JSON form.
///
/// `None` (record absent) and `Some(Null)` are returned as given. The input is
/// never mutated; the result is a fresh value.
pub fn normalize_document(record: Option<&Value>) -> Option<Value> {
    record.map(|value| normalize_with(&TRACKED_USER, value))
}

/// Normalize a value against a schema.
///
/// Objects have each field looked up in the schema; arrays are mapped
/// element-wise; every other value is returned unchanged.
pub fn normalize_with(schema: &Schema, value: &Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(normalize_fields(schema, fields)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| normalize_with(schema, item))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn normalize_fields(schema: &Schema, fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| {
            let value = match schema.role_of(name) {
                Some(role) => apply_role(role, value),
                None => value.clone(),
            };
            (name.clone(), value)
        })
        .collect()
}

fn apply_role(role: FieldRole, value: &Value) -> Value {
    if let Value::Array(items) = value {
        return Value::Array(items.iter().map(|item| apply_role(role, item)).collect());
    }

    match role {
        FieldRole::RecordId => record_id_to_string(value),
        FieldRole::Snowflake => snowflake_to_string(value),
        FieldRole::Timestamp => timestamp_to_millis(value),
        FieldRole::Nested(schema) => normalize_with(schema, value),
    }
}
