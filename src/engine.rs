//! The matching engine: a one-pass hash join of dataset A against dataset B

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::Record;
use crate::diff::{diff_records, CompareField, FieldDiff};
use crate::error::{RecondiffError, Result};
use crate::key::make_key;

/// Outcome classification for a single match key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Match,
    Mismatch,
    MissingInA,
    MissingInB,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
            Self::MissingInA => "missing_in_a",
            Self::MissingInB => "missing_in_b",
        }
    }
}

/// Reconciliation configuration.
///
/// Key fields and compare fields are ordered lists; both must be non-empty
/// and the tolerance non-negative. Callers validate before the engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    pub key_fields: Vec<String>,
    pub compare_fields: Vec<CompareField>,
    #[serde(default)]
    pub amount_tolerance: f64,
}

impl ReconcileConfig {
    /// Check structural validity. Violations reject the whole operation
    /// before any matching work starts.
    pub fn validate(&self) -> Result<()> {
        if self.key_fields.is_empty() {
            return Err(RecondiffError::config("at least one key field is required"));
        }
        if self.key_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(RecondiffError::config("key field names must not be empty"));
        }
        if self.compare_fields.is_empty() {
            return Err(RecondiffError::config(
                "at least one compare field is required",
            ));
        }
        if self.compare_fields.iter().any(|cf| cf.field.trim().is_empty()) {
            return Err(RecondiffError::config(
                "compare field names must not be empty",
            ));
        }
        // Written this way so NaN is rejected too
        if !(self.amount_tolerance >= 0.0) {
            return Err(RecondiffError::config(
                "amount tolerance must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Per-key outcome. Created once during the join and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconItem {
    pub status: MatchStatus,
    pub key: String,
    pub record_a: Option<Record>,
    pub record_b: Option<Record>,
    pub reasons: Vec<String>,
    pub diffs: Vec<FieldDiff>,
}

/// Aggregate counts for one reconciliation run.
///
/// `total_a`/`total_b` are raw input counts, unaffected by unkeyable or
/// duplicate records. The four status counters sum to the number of distinct
/// keyable keys processed (B duplicates collapsed, A duplicates each counted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconSummary {
    pub matches: usize,
    pub mismatches: usize,
    pub missing_in_a: usize,
    pub missing_in_b: usize,
    /// A records excluded from matching because every key field was empty
    #[serde(default)]
    pub skipped_a: usize,
    /// B records excluded from matching because every key field was empty
    #[serde(default)]
    pub skipped_b: usize,
    pub total_a: usize,
    pub total_b: usize,
}

impl ReconSummary {
    /// Number of reported items across all four statuses.
    pub fn total(&self) -> usize {
        self.matches + self.mismatches + self.missing_in_a + self.missing_in_b
    }
}

/// The result of one engine invocation: summary plus the ordered item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconOutcome {
    pub summary: ReconSummary,
    pub items: Vec<ReconItem>,
}

/// State of a B lookup entry across the join and the trailing sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    Unconsumed,
    Consumed,
}

struct LookupEntry<'a> {
    record: &'a Record,
    state: EntryState,
}

/// Reconcile dataset A against dataset B.
///
/// Join policy: the lookup table owns exactly one B record per key — first
/// occurrence wins, later B duplicates are dropped without a reported
/// outcome. A-side duplicates are not deduplicated: each A record probes the
/// table independently and produces its own item, against the same B record
/// when the key was already consumed.
///
/// Items are emitted in join order: all A-driven outcomes in dataset-A order,
/// followed by `missing_in_a` outcomes in B insertion order. Running the
/// engine twice on identical inputs produces identical output.
pub fn reconcile(
    rows_a: &[Record],
    rows_b: &[Record],
    config: &ReconcileConfig,
) -> Result<ReconOutcome> {
    config.validate()?;

    let mut summary = ReconSummary {
        total_a: rows_a.len(),
        total_b: rows_b.len(),
        ..Default::default()
    };

    // The lookup table must be fully built before probing starts.
    let mut lookup: IndexMap<String, LookupEntry<'_>> = IndexMap::new();
    for record in rows_b {
        let key = make_key(record, &config.key_fields);
        if key.is_empty() {
            summary.skipped_b += 1;
            continue;
        }
        lookup.entry(key).or_insert(LookupEntry {
            record,
            state: EntryState::Unconsumed,
        });
    }

    log::debug!(
        "Built B lookup table: {} distinct keys from {} records",
        lookup.len(),
        rows_b.len()
    );

    let mut items = Vec::new();

    for record in rows_a {
        let key = make_key(record, &config.key_fields);
        if key.is_empty() {
            summary.skipped_a += 1;
            continue;
        }

        let hit = match lookup.get_mut(&key) {
            Some(entry) => {
                entry.state = EntryState::Consumed;
                Some(entry.record)
            }
            None => None,
        };

        let Some(record_b) = hit else {
            summary.missing_in_b += 1;
            items.push(ReconItem {
                status: MatchStatus::MissingInB,
                key,
                record_a: Some(record.clone()),
                record_b: None,
                reasons: vec!["No matching key in dataset B".to_string()],
                diffs: Vec::new(),
            });
            continue;
        };

        let (diffs, reasons) = diff_records(
            record,
            record_b,
            &config.compare_fields,
            config.amount_tolerance,
        );

        if diffs.is_empty() {
            summary.matches += 1;
            items.push(ReconItem {
                status: MatchStatus::Match,
                key,
                record_a: Some(record.clone()),
                record_b: Some(record_b.clone()),
                reasons: Vec::new(),
                diffs: Vec::new(),
            });
        } else {
            summary.mismatches += 1;
            items.push(ReconItem {
                status: MatchStatus::Mismatch,
                key,
                record_a: Some(record.clone()),
                record_b: Some(record_b.clone()),
                reasons,
                diffs,
            });
        }
    }

    // Trailing sweep: every entry still unconsumed, in insertion order.
    for (key, entry) in &lookup {
        if entry.state == EntryState::Unconsumed {
            summary.missing_in_a += 1;
            items.push(ReconItem {
                status: MatchStatus::MissingInA,
                key: key.clone(),
                record_a: None,
                record_b: Some(entry.record.clone()),
                reasons: vec!["No matching key in dataset A".to_string()],
                diffs: Vec::new(),
            });
        }
    }

    Ok(ReconOutcome { summary, items })
}
