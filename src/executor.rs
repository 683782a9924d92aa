use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::errors::PathSyntaxError;
use crate::filter::Predicate;
use crate::lexer::{tokenize, Token};

/// Select every value matched by `path`, in document order.
///
/// The returned references borrow from `document`, which is never modified.
/// No match is an empty vector, not an error; only a malformed path fails,
/// and then nothing is returned.
pub fn extract<'a>(document: &'a Value, path: &str) -> Result<Vec<&'a Value>, PathSyntaxError> {
    let tokens = tokenize(path)?;
    debug!(path, tokens = tokens.len(), "extracting");

    let mut current: Vec<&'a Value> = vec![document];
    for token in &tokens {
        current = apply(token, current);
        trace!(?token, matches = current.len(), "applied token");
    }
    Ok(current)
}

fn apply<'a>(token: &Token, current: Vec<&'a Value>) -> Vec<&'a Value> {
    match token {
        Token::Root => current,
        Token::Wildcard => current
            .into_iter()
            .flat_map(|v| match v {
                Value::Object(map) => map.values().collect(),
                Value::Array(arr) => arr.iter().collect(),
                _ => Vec::new(),
            })
            .collect(),
        Token::DeepScan => {
            let mut out = Vec::new();
            for v in current {
                descend(v, &mut out);
            }
            out
        }
        Token::DeepScanField(key) => {
            let mut out = Vec::new();
            for v in current {
                find_key(v, key, &mut out);
            }
            out
        }
        Token::Field(key) => current
            .into_iter()
            .filter_map(|v| v.as_object().and_then(|map| map.get(key)))
            .collect(),
        Token::Index(key) => current
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => map.get(key),
                Value::Array(arr) => index_array(arr, key),
                _ => None,
            })
            .collect(),
        Token::Slice { start, end } => current
            .into_iter()
            .flat_map(|v| match v {
                Value::Array(arr) => slice_array(arr, *start, *end),
                _ => Vec::new(),
            })
            .collect(),
        Token::Filter(expr) => {
            let predicate = match Predicate::parse(expr) {
                Ok(p) => p,
                Err(e) => {
                    warn!(expr = %expr, error = %e, "filter evaluation failed");
                    return Vec::new();
                }
            };
            current
                .into_iter()
                .filter_map(Value::as_array)
                .flatten()
                .filter(|item| predicate.matches(expr, item))
                .collect()
        }
    }
}

// Values of objects are emitted before their own descendants; array elements
// are only walked into, never emitted themselves.
fn descend<'a>(v: &'a Value, out: &mut Vec<&'a Value>) {
    match v {
        Value::Object(map) => {
            for child in map.values() {
                out.push(child);
                descend(child, out);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                descend(item, out);
            }
        }
        _ => {}
    }
}

fn find_key<'a>(v: &'a Value, key: &str, out: &mut Vec<&'a Value>) {
    match v {
        Value::Object(map) => find_key_in_map(map, key, out),
        Value::Array(arr) => {
            for item in arr {
                find_key(item, key, out);
            }
        }
        _ => {}
    }
}

fn find_key_in_map<'a>(map: &'a Map<String, Value>, key: &str, out: &mut Vec<&'a Value>) {
    for (k, child) in map {
        if k == key {
            out.push(child);
        }
        find_key(child, key, out);
    }
}

/// Negative indices count from the end; anything unparseable or out of
/// range selects nothing.
fn index_array<'a>(arr: &'a [Value], key: &str) -> Option<&'a Value> {
    let i: i64 = key.trim().parse().ok()?;
    let n = arr.len() as i64;
    let idx = if i < 0 { i + n } else { i };
    if (0..n).contains(&idx) {
        arr.get(idx as usize)
    } else {
        None
    }
}

fn slice_array(arr: &[Value], start: Option<i64>, end: Option<i64>) -> Vec<&Value> {
    let n = arr.len() as i64;
    let norm = |i: i64| -> usize {
        if i < 0 {
            (n + i).clamp(0, n) as usize
        } else {
            i.clamp(0, n) as usize
        }
    };
    let lo = start.map(norm).unwrap_or(0);
    let hi = end.map(norm).unwrap_or(arr.len());
    if lo >= hi {
        return Vec::new();
    }
    arr[lo..hi].iter().collect()
}
