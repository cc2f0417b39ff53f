//! Text forms of JSON values.

use serde_json::Value;

/// Standard JSON text of a value: strings quoted, containers recursive.
///
/// Numbers follow JavaScript's `JSON.stringify`, so an integral float
/// such as `1.0` prints as `1` wherever it is nested.
pub fn json_text(value: &Value) -> String {
    js_numbers(value).to_string()
}

fn js_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64().and_then(integral) {
            Some(i) => Value::from(i),
            None => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(js_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), js_numbers(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Integer value of a float with no fractional part, within `i64` range.
fn integral(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= LIMIT {
        Some(f as i64)
    } else {
        None
    }
}

/// Plain string form of a sample value.
///
/// Strings print unquoted and integral floats print without a fractional
/// part, so `1.0` shows as `1`. Arrays join their elements with commas.
pub fn coerce_display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return n.to_string();
            }
            match n.as_f64() {
                Some(f) => match integral(f) {
                    Some(i) => i.to_string(),
                    None => f.to_string(),
                },
                None => n.to_string(),
            }
        },
        Value::Array(items) => items
            .iter()
            .map(coerce_display)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
