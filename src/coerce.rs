//! Explicit coercion rules for loosely-typed input fields.
//!
//! Inputs arrive as decoded JSON where a field may be missing, null, or of
//! the wrong type. Every place that needs a lenient reading goes through one
//! of these helpers so the rules live in one spot.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::fmt::number;

/// Truthiness of a field: missing, `null`, `false`, `0` and `""` are false,
/// everything else (including empty arrays and objects) is true.
pub fn interpret_as_boolean(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Missing or `null` becomes `""`. Returns `None` for values that are
/// present but not strings.
pub fn coalesce_to_empty_string(value: Option<&Value>) -> Option<&str> {
    match value {
        None | Some(Value::Null) => Some(""),
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => None,
    }
}

fn float_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("float prefix pattern is valid")
    })
}

/// Lenient numeric reading: numbers pass through, strings yield their
/// longest leading float literal (`"22 years"` is 22, `"abc"` is `None`).
/// Arrays are read through their joined text, so `[22]` is 22 and
/// `[22, 5]` reads `"22,5"` as 22.
pub fn parse_float_prefix(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => float_prefix(s),
        Value::Array(items) => float_prefix(&join_array(items)),
        _ => None,
    }
}

fn float_prefix(s: &str) -> Option<f64> {
    let m = float_prefix_re().find(s.trim_start())?;
    let literal = m.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse().ok(),
    }
}

/// Comma-joined element text; `null` elements are blank, objects read as
/// `[object Object]`.
fn join_array(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.as_f64().map(number).unwrap_or_default(),
            Value::String(s) => s.clone(),
            Value::Array(inner) => join_array(inner),
            Value::Object(_) => "[object Object]".to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Display text for a scalar field: strings as-is, other values as their
/// JSON text, missing or `null` as `""`.
pub fn value_as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
