use std::cmp::Ordering;

use serde_json::Value;

use crate::errors::FilterError;

/// Numeric view of a value; booleans count as 0/1.
fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

pub(crate) fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Equality never fails: values of different kinds are simply unequal.
pub fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(da), Some(db)) => da == db,
        _ => a == b,
    }
}

/// Ordering is only defined string-to-string and number-to-number.
pub(crate) fn order(op: &'static str, a: &Value, b: &Value) -> Result<Ordering, FilterError> {
    let incomparable = || FilterError::Incomparable {
        op,
        left: type_name(a),
        right: type_name(b),
    };
    if let (Value::String(sa), Value::String(sb)) = (a, b) {
        return Ok(sa.cmp(sb));
    }
    match (as_number(a), as_number(b)) {
        (Some(da), Some(db)) => da.partial_cmp(&db).ok_or_else(incomparable),
        _ => Err(incomparable()),
    }
}

/// Python-style truthiness used by bare-operand predicates.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
