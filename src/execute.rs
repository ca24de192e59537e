//! Expression execution against a binding context.
//!
//! The engine never interprets expression text itself; every leaf is handed to
//! an [`ExpressionExecutor`]. A CEL-backed default ships behind the `cel-eval`
//! feature.

use crate::error::{EvaluationError, EvaluationErrorKind};
use serde_json::Value;
#[cfg(feature = "cel-eval")]
use std::collections::HashMap;

/// Extension point for executing predicate and template expressions.
pub trait ExpressionExecutor {
    /// Executes `expression` with the keys of `context` bound as variables.
    ///
    /// `context` is always a JSON object. An `Err` aborts the whole
    /// validation; it is never recorded as a failing result.
    fn execute(&self, expression: &str, context: &Value) -> Result<Value, EvaluationError>;
}

impl<F> ExpressionExecutor for F
where
    F: Fn(&str, &Value) -> Result<Value, EvaluationError>,
{
    fn execute(&self, expression: &str, context: &Value) -> Result<Value, EvaluationError> {
        self(expression, context)
    }
}

/// Default executor backed by the `cel` crate.
///
/// Predicates evaluating to a CEL list of booleans are returned as JSON
/// arrays and classified element-wise. Missing map keys resolve to `null`
/// (NA); undeclared variables are execution faults.
#[cfg(feature = "cel-eval")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCelExecutor;

#[cfg(feature = "cel-eval")]
impl ExpressionExecutor for DefaultCelExecutor {
    fn execute(&self, expression: &str, context: &Value) -> Result<Value, EvaluationError> {
        let program = cel::Program::compile(expression).map_err(|e| EvaluationError {
            kind: EvaluationErrorKind::CelError,
            message: format!("CEL compile error: {}", e),
        })?;

        let mut cel_ctx = cel::Context::default();
        if let Value::Object(map) = context {
            for (key, value) in map {
                cel_ctx.add_variable_from_value(key.as_str(), json_to_cel(value));
            }
        }

        match program.execute(&cel_ctx) {
            Ok(result) => Ok(cel_to_json(&result)),
            Err(cel::ExecutionError::NoSuchKey(_)) => Ok(Value::Null),
            Err(ref e @ cel::ExecutionError::UndeclaredReference(_)) => Err(EvaluationError {
                kind: EvaluationErrorKind::UndefinedReference,
                message: format!("CEL undeclared reference: {}", e),
            }),
            Err(ref e @ cel::ExecutionError::NotSupportedAsMethod { .. }) => Err(EvaluationError {
                kind: EvaluationErrorKind::UnsupportedMethod,
                message: format!("CEL unsupported method: {}", e),
            }),
            Err(e) => Err(EvaluationError {
                kind: EvaluationErrorKind::CelError,
                message: format!("CEL execution error: {}", e),
            }),
        }
    }
}

#[cfg(feature = "cel-eval")]
fn json_to_cel(value: &Value) -> cel::Value {
    use std::sync::Arc;

    match value {
        Value::Null => cel::Value::Null,
        Value::Bool(b) => cel::Value::Bool(*b),
        Value::Number(n) => n
            .as_i64()
            .map(cel::Value::Int)
            .or_else(|| n.as_u64().map(cel::Value::UInt))
            .or_else(|| n.as_f64().map(cel::Value::Float))
            .unwrap_or(cel::Value::Null),
        Value::String(s) => cel::Value::String(Arc::new(s.clone())),
        Value::Array(items) => cel::Value::List(Arc::new(items.iter().map(json_to_cel).collect())),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), json_to_cel(v)))
            .collect::<HashMap<String, cel::Value>>()
            .into(),
    }
}

#[cfg(feature = "cel-eval")]
fn cel_to_json(value: &cel::Value) -> Value {
    match value {
        cel::Value::Null => Value::Null,
        cel::Value::Bool(b) => Value::Bool(*b),
        cel::Value::Int(i) => Value::Number((*i).into()),
        cel::Value::UInt(u) => Value::Number((*u).into()),
        cel::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        cel::Value::String(s) => Value::String(s.to_string()),
        cel::Value::List(items) => Value::Array(items.iter().map(cel_to_json).collect()),
        cel::Value::Map(m) => {
            let mut obj = serde_json::Map::new();
            for (key, val) in m.map.iter() {
                let k = match key {
                    cel::objects::Key::String(s) => s.to_string(),
                    cel::objects::Key::Int(i) => i.to_string(),
                    cel::objects::Key::Uint(u) => u.to_string(),
                    cel::objects::Key::Bool(b) => b.to_string(),
                };
                obj.insert(k, cel_to_json(val));
            }
            Value::Object(obj)
        }
        // Bytes, durations, timestamps and functions have no JSON form.
        _ => Value::Null,
    }
}
