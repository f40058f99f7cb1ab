//! Normalization-based value equality.
//!
//! Fields that represent unordered collections (agent indices, role names)
//! reach the differ by two routes: derivation emits them as a joined, sorted
//! list, while the user may retype them as a comma list in any order. The
//! change tracker must not flag `"1, 0"` against a baseline of `"0, 1"`, so
//! every comparison in the system goes through [`normalize`]: values that
//! denote the same collection map to the same canonical string.
//!
//! Calendar sequences are the deliberate exception. Their order is
//! meaningful (the index identifies the period being edited), so arrays
//! containing objects are serialized as-is, never sorted.

use crate::state::FieldValue;
use serde_json::Value;

/// Normalize a field value to its canonical comparison string.
///
/// Equality used throughout the system is `normalize(a) == normalize(b)`.
/// See [`normalize_json`] for the rules; scalar strings and calendar
/// sequences are converted to their JSON form first.
pub fn normalize(value: &FieldValue) -> String {
    match value {
        FieldValue::Scalar(s) if s.contains(',') => normalize_comma_list(s),
        other => other.to_value().to_string(),
    }
}

/// Normalize an arbitrary JSON value to its canonical comparison string.
///
/// - A string containing a comma is split on commas, trimmed, stripped of
///   empty parts, then sorted numerically if every part parses as a number
///   and lexicographically otherwise, and serialized as a JSON array.
/// - An array of scalars gets the same numeric-or-lexicographic
///   sort-and-serialize treatment.
/// - Everything else — plain scalars and arrays containing objects or nested
///   arrays (calendar sequences) — serializes compactly without reordering.
///
/// Exported so external collaborators (e.g. a save button deciding whether
/// anything changed at all) share the exact equality the diff engine uses.
pub fn normalize_json(value: &Value) -> String {
    match value {
        Value::String(s) if s.contains(',') => normalize_comma_list(s),
        Value::Array(items) if items.iter().all(is_scalar) => canonical_list(items),
        other => other.to_string(),
    }
}

/// Whether two field values are equal under normalization.
pub fn normalized_eq(a: &FieldValue, b: &FieldValue) -> bool {
    normalize(a) == normalize(b)
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn normalize_comma_list(s: &str) -> String {
    let parts: Vec<Value> = s
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| Value::String(p.to_string()))
        .collect();
    canonical_list(&parts)
}

fn canonical_list(items: &[Value]) -> String {
    let numbers: Option<Vec<f64>> = items.iter().map(as_number).collect();
    let rendered: Vec<String> = match numbers {
        Some(mut numbers) => {
            numbers.sort_by(f64::total_cmp);
            numbers.into_iter().map(format_number).collect()
        }
        None => {
            // Lexicographic sort over the elements' raw string forms, then
            // serialize each element in its original JSON type.
            let mut keyed: Vec<(String, String)> = items
                .iter()
                .map(|item| (sort_key(item), item.to_string()))
                .collect();
            keyed.sort();
            keyed.into_iter().map(|(_, json)| json).collect()
        }
    };
    format!("[{}]", rendered.join(","))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        _ => None,
    }
}

fn sort_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Integer-valued numbers print without a fractional part so a parsed "3"
// and a JSON integer 3 canonicalize identically.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
