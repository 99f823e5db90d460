//! Attribute coercions
//!
//! A coercion converts a raw value (console text or a persisted JSON value)
//! into the declared type of an attribute. Coercions never fall back to a
//! different type: a value that cannot be converted is an error.

use serde_json::{Number, Value};
use thiserror::Error;

/// Value could not be converted into the declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot coerce {value} into {expected}")]
pub struct CoercionError {
    /// Declared type name
    pub expected: &'static str,
    /// Offending value, rendered as JSON
    pub value: String,
}

impl CoercionError {
    fn new(expected: &'static str, value: &Value) -> Self {
        Self {
            expected,
            value: value.to_string(),
        }
    }
}

/// Declared attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// UTF-8 text
    Text,
    /// 64-bit signed integer
    Integer,
    /// Finite 64-bit float
    Float,
    /// List of text values
    TextList,
}

impl Coercion {
    /// Returns the type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Coercion::Text => "text",
            Coercion::Integer => "integer",
            Coercion::Float => "float",
            Coercion::TextList => "list",
        }
    }

    /// Converts `raw` into this type.
    ///
    /// Text input is parsed (`"7"` -> `7` for integers); numbers are
    /// converted between each other, with floats truncated towards zero when
    /// an integer is expected. Lists accept a JSON array or comma-separated
    /// text.
    pub fn apply(&self, raw: &Value) -> Result<Value, CoercionError> {
        match self {
            Coercion::Text => to_text(raw).map(Value::String),
            Coercion::Integer => to_integer(raw).map(Value::from),
            Coercion::Float => to_float(raw).and_then(|f| {
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| CoercionError::new("float", raw))
            }),
            Coercion::TextList => to_text_list(raw).map(|items| {
                Value::Array(items.into_iter().map(Value::String).collect())
            }),
        }
    }
}

fn to_text(raw: &Value) -> Result<String, CoercionError> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CoercionError::new("text", other)),
    }
}

fn to_integer(raw: &Value) -> Result<i64, CoercionError> {
    let err = || CoercionError::new("integer", raw);
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f.trunc() as i64)
                }
                _ => Err(err()),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| err()),
        _ => Err(err()),
    }
}

fn to_float(raw: &Value) -> Result<f64, CoercionError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| CoercionError::new("float", raw))
}

fn to_text_list(raw: &Value) -> Result<Vec<String>, CoercionError> {
    match raw {
        Value::Array(items) => items
            .iter()
            .map(|item| to_text(item).map_err(|_| CoercionError::new("list", raw)))
            .collect(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('[') {
                let parsed: Value = serde_json::from_str(trimmed)
                    .map_err(|_| CoercionError::new("list", raw))?;
                return to_text_list(&parsed);
            }
            Ok(trimmed
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect())
        }
        other => Err(CoercionError::new("list", other)),
    }
}
