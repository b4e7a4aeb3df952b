//! Field-level comparison between matched records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::Record;
use crate::normalize::{normalize_amount, normalize_scalar};

/// How a single field is compared between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompareStrategy {
    /// Normalized string equality
    Exact,
    /// Numeric comparison within the configured amount tolerance, falling
    /// back to exact strings when either side does not parse as a number
    NumericTolerance,
}

/// A field to compare, with its explicit comparison strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareField {
    pub field: String,
    pub strategy: CompareStrategy,
}

impl CompareField {
    pub fn exact(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            strategy: CompareStrategy::Exact,
        }
    }

    pub fn numeric(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            strategy: CompareStrategy::NumericTolerance,
        }
    }

    /// Infer the strategy from the field name: names containing "amount"
    /// (case-insensitive) compare numerically, everything else exactly.
    /// Kept for callers that supply bare field names; explicit strategies
    /// are preferred.
    pub fn inferred(field: impl Into<String>) -> Self {
        let field = field.into();
        let strategy = if field.to_lowercase().contains("amount") {
            CompareStrategy::NumericTolerance
        } else {
            CompareStrategy::Exact
        };
        Self { field, strategy }
    }
}

/// A single field difference. Values are recorded raw (non-normalized) for
/// display, except numeric mismatches which carry the parsed numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub a: Value,
    pub b: Value,
}

/// Compare two matched records field by field.
///
/// Returns structured diffs plus human-readable reasons with the same
/// cardinality and order. Zero diffs means the records match.
///
/// The tolerance is inclusive: a delta exactly equal to `amount_tolerance`
/// is not a mismatch.
pub fn diff_records(
    a: &Record,
    b: &Record,
    compare_fields: &[CompareField],
    amount_tolerance: f64,
) -> (Vec<FieldDiff>, Vec<String>) {
    let mut diffs = Vec::new();
    let mut reasons = Vec::new();

    for cf in compare_fields {
        let av = a.get(&cf.field);
        let bv = b.get(&cf.field);

        match cf.strategy {
            CompareStrategy::NumericTolerance => {
                let an = normalize_amount(av);
                let bn = normalize_amount(bv);
                if let (Some(an), Some(bn)) = (an, bn) {
                    let delta = an - bn;
                    if delta.abs() > amount_tolerance {
                        diffs.push(FieldDiff {
                            field: cf.field.clone(),
                            a: Value::from(an),
                            b: Value::from(bn),
                        });
                        reasons.push(format!(
                            "Amount differs by {:.2} (tolerance {})",
                            delta, amount_tolerance
                        ));
                    }
                } else if normalize_scalar(av) != normalize_scalar(bv) {
                    // Unparseable side degrades to exact-string comparison
                    diffs.push(FieldDiff {
                        field: cf.field.clone(),
                        a: raw_value(av),
                        b: raw_value(bv),
                    });
                    let side = if an.is_none() { "A" } else { "B" };
                    reasons.push(format!("Invalid/missing amount in {}", side));
                }
            }
            CompareStrategy::Exact => {
                if normalize_scalar(av) != normalize_scalar(bv) {
                    diffs.push(FieldDiff {
                        field: cf.field.clone(),
                        a: raw_value(av),
                        b: raw_value(bv),
                    });
                    reasons.push(format!("{} mismatch", cf.field));
                }
            }
        }
    }

    (diffs, reasons)
}

fn raw_value(v: Option<&Value>) -> Value {
    v.cloned().unwrap_or(Value::Null)
}
