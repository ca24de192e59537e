//! Classification of predicate values into logical outcome classes.
//!
//! JSON stands in for the logical vector model: `true`/`false` are scalars,
//! `null` is NA, and an array of booleans and nulls is a logical vector.

use crate::enums::Classification;
use serde_json::Value;

/// Classify the value a boolean predicate evaluated to.
///
/// Vectors are scanned in order and the first NA or FALSE decides the class,
/// so `[null, false]` contains NAs while `[false, null]` contains non-TRUE
/// values.
pub fn classify(value: &Value) -> Classification {
    match value {
        Value::Bool(true) => Classification::AllTrue,
        Value::Bool(false) => Classification::False,
        Value::Null => Classification::Na,
        Value::Array(items) => classify_vector(items),
        other => Classification::WrongType(type_name(other).to_string()),
    }
}

fn classify_vector(items: &[Value]) -> Classification {
    if !items.iter().all(|v| v.is_boolean() || v.is_null()) {
        return Classification::WrongType("array".to_string());
    }
    if items.is_empty() {
        return Classification::ZeroLength;
    }
    let scalar = items.len() == 1;
    for item in items {
        match item {
            Value::Null if scalar => return Classification::Na,
            Value::Null => return Classification::ContainsNa,
            Value::Bool(false) if scalar => return Classification::False,
            Value::Bool(false) => return Classification::ContainsNonTrue,
            _ => {}
        }
    }
    Classification::AllTrue
}

/// JSON kind name used in type-mismatch diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "logical",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
