use itertools::Itertools;
use serde_json::Value;

use crate::errors::Result;
use crate::executor::extract;

// =========================
// Public API (Result helpers)
// =========================

/// Parse a JSON document and evaluate `path` against it.
/// Matches are cloned into an Array; no match is an empty Array.
pub fn from_json(json_str: &str, path: &str) -> Result<Value> {
    let data: Value = serde_json::from_str(json_str)?;
    let matches = extract(&data, path)?;
    Ok(Value::Array(matches.into_iter().cloned().collect()))
}

/// Return the first element from a result Array; else null.
pub fn first(vals: &Value) -> Value {
    match vals {
        Value::Array(a) => a.first().cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Deduplicate an array Value keeping first occurrences; identity for non-array.
pub fn unique(vals: &Value) -> Value {
    match vals {
        Value::Array(a) => {
            let dedup = a
                .iter()
                .unique_by(|x| x.to_string())
                .cloned()
                .collect::<Vec<_>>();
            Value::Array(dedup)
        }
        _ => vals.clone(),
    }
}

/// If `vals` is null or empty array, return parsed default JSON string; else `vals`.
pub fn or_default(vals: &Value, default_json: &str) -> Value {
    let default_val = serde_json::from_str::<Value>(default_json)
        .unwrap_or_else(|_| Value::String(default_json.to_string()));
    match vals {
        Value::Null => default_val,
        Value::Array(a) if a.is_empty() => default_val,
        _ => vals.clone(),
    }
}
