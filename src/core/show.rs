//! Display rendering for payloads.

use crate::core::value::Value;

pub fn show(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => show_number(*n),
        Value::String(s) => quote(s),
        Value::Array(xs) => format!(
            "[{}]",
            xs.iter().map(show).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", quote(k), show(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Value::RegExp { source, flags } => format!("/{}/{}", source, flags),
        Value::Function(f) => match (f.name(), f.source()) {
            (_, Some(source)) => source.to_string(),
            (Some(name), None) => format!("function {}", name),
            (None, None) => "function".to_string(),
        },
        Value::Identity(inner) => format!("Identity ({})", show(inner)),
        Value::Constant(c) => c.show(),
        Value::Foreign(f) => f.display().to_string(),
    }
}

/// Renders a number the way a numeric literal would be written.
pub fn show_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n == 0.0 && n.is_sign_negative() {
        "-0".to_string()
    } else {
        n.to_string()
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
