//! Strip empty and zero values from a serialized tree.
//!
//! Operates on `serde_json::Value` only, after the typed model has been
//! serialized, so business logic never deals with "is this field set".

use serde_json::{Map, Value};

/// Remove `null`, `""`, `0`, `false`, `[]` and `{}` recursively.
///
/// Returns `None` when the whole value is empty. Only object keys are
/// removed: array elements are pruned inside but never dropped, so positions
/// stay meaningful.
pub fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some(Value::Bool(true)),
        Value::Number(n) => {
            let zero = n.as_i64() == Some(0)
                || n.as_u64() == Some(0)
                || n.as_f64().is_some_and(|f| f == 0.0);
            (!zero).then_some(Value::Number(n))
        }
        Value::String(s) => (!s.is_empty()).then_some(Value::String(s)),
        Value::Array(items) => {
            if items.is_empty() {
                return None;
            }
            Some(Value::Array(items.into_iter().map(prune_element).collect()))
        }
        Value::Object(fields) => {
            let kept: Map<String, Value> = fields
                .into_iter()
                .filter_map(|(key, value)| prune(value).map(|v| (key, v)))
                .collect();
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
    }
}

fn prune_element(value: Value) -> Value {
    prune(value.clone()).unwrap_or(value)
}

/// Like [`prune`], but an empty root becomes `{}` instead of disappearing.
pub fn prune_root(value: Value) -> Value {
    prune(value).unwrap_or_else(|| Value::Object(Map::new()))
}
