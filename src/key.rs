//! Composite match key construction

use crate::data::Record;
use crate::normalize::normalize_scalar;

/// Separator between key field values. Spaced so it cannot collide with
/// trimmed single-field content.
pub const KEY_SEPARATOR: &str = " | ";

/// Build the composite lookup key for a record.
///
/// Each key field value is normalized, the values are joined in `key_fields`
/// order, and the result is lower-cased. Key construction never depends on
/// the record's own field order. When every key field normalizes to empty the
/// key is the empty string; the engine treats such records as unkeyable and
/// excludes them from matching.
pub fn make_key(record: &Record, key_fields: &[String]) -> String {
    let parts: Vec<String> = key_fields
        .iter()
        .map(|field| normalize_scalar(record.get(field)))
        .collect();

    if parts.iter().all(|p| p.is_empty()) {
        return String::new();
    }

    parts.join(KEY_SEPARATOR).to_lowercase()
}
