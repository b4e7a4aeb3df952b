//! Scalar normalization for key construction and field comparison

use serde_json::Value;

/// Canonical string form of a scalar value.
///
/// Null or absent values become the empty string, strings are trimmed, and
/// every other scalar is rendered in its canonical string form. Used for
/// exact-match comparison and key construction.
pub fn normalize_scalar(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Parse an amount-like value into a number.
///
/// Strips thousands separators and currency symbols (comma, `$`, `₹`), trims,
/// then parses as a decimal. Returns `None` when the result is not a finite
/// number, including null/absent/empty input. `None` signals "not a usable
/// amount", not zero.
pub fn normalize_amount(value: Option<&Value>) -> Option<f64> {
    let raw = match value {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        // Booleans have no numeric reading here
        Some(Value::Bool(_)) => return None,
        Some(other) => other.to_string(),
    };

    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '₹'))
        .collect();
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return None;
    }

    let parsed: f64 = stripped.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}
