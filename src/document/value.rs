//! Field-level value rules shared by the repository and the in-memory store:
//! numeric increments and merge writes.

use serde_json::{Number, Value};

use super::Document;

/// Amount added by an atomic increment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delta {
    Int(i64),
    Float(f64),
}

impl Delta {
    pub fn as_f64(self) -> f64 {
        match self {
            Delta::Int(n) => n as f64,
            Delta::Float(n) => n,
        }
    }

    /// The delta as a JSON number. `None` for NaN and infinities.
    pub fn to_number(self) -> Option<Number> {
        match self {
            Delta::Int(n) => Some(Number::from(n)),
            Delta::Float(n) => Number::from_f64(n),
        }
    }
}

impl Default for Delta {
    fn default() -> Self {
        Delta::Int(1)
    }
}

impl From<i64> for Delta {
    fn from(n: i64) -> Self {
        Delta::Int(n)
    }
}

impl From<i32> for Delta {
    fn from(n: i32) -> Self {
        Delta::Int(n.into())
    }
}

impl From<u32> for Delta {
    fn from(n: u32) -> Self {
        Delta::Int(n.into())
    }
}

impl From<f64> for Delta {
    fn from(n: f64) -> Self {
        Delta::Float(n)
    }
}

impl From<f32> for Delta {
    fn from(n: f32) -> Self {
        Delta::Float(n.into())
    }
}

/// Add `delta` to `current`.
///
/// Integer plus integer stays an integer and saturates at the i64 bounds.
/// Anything involving a float (or an integer outside i64) is computed as f64.
/// Returns `None` when the result is not a finite number.
pub fn apply_delta(current: &Number, delta: Delta) -> Option<Number> {
    match (current.as_i64(), delta) {
        (Some(n), Delta::Int(d)) => Some(Number::from(n.saturating_add(d))),
        _ => Number::from_f64(current.as_f64()? + delta.as_f64()),
    }
}

/// Merge `patch` into `target` field by field.
///
/// Objects on both sides are merged recursively; every other value replaces
/// what was there. Fields absent from `patch` are left alone.
pub fn merge_into(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => merge_into(existing, nested),
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Short name of a field's JSON type, for error messages.
pub(crate) fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
