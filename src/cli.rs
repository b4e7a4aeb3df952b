//! Command-line interface for recondiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::diff::CompareField;

#[derive(Parser)]
#[command(name = "recondiff")]
#[command(about = "A key-based reconciliation tool for tabular datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override store location
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize recondiff store
    Init {
        /// Force initialization even if a store exists
        #[arg(long)]
        force: bool,
    },

    /// Import a CSV or XLSX file as a dataset
    Import {
        /// Input file path
        input: String,

        /// Name for the dataset (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
    },

    /// Reconcile dataset A against dataset B
    Reconcile {
        /// Dataset A (id, name, or unique id prefix)
        dataset_a: String,

        /// Dataset B (id, name, or unique id prefix)
        dataset_b: String,

        /// Key fields, comma-separated, in key order
        #[arg(long, value_delimiter = ',')]
        key: Vec<String>,

        /// Compare fields, comma-separated. "field" infers the strategy from
        /// the name; "field:exact" or "field:amount" sets it explicitly
        #[arg(long, value_delimiter = ',', default_value = "amount")]
        compare: Vec<String>,

        /// Maximum allowed absolute amount difference before a mismatch
        #[arg(long, default_value = "0", value_parser = validate_tolerance)]
        tolerance: f64,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Show the summary of a reconciliation run
    Summary {
        /// Run id or prefix (defaults to the latest run)
        run: Option<String>,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Query the per-key items of a reconciliation run
    Items {
        /// Run id or prefix (defaults to the latest run)
        run: Option<String>,

        /// Filter by status: "match", "mismatch", "missing_in_a",
        /// "missing_in_b", or "all"
        #[arg(long, default_value = "all")]
        status: String,

        /// Case-insensitive substring search over keys
        #[arg(long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(long, default_value = "1", value_parser = validate_page)]
        page: usize,

        /// Page size (clamped to 5-100)
        #[arg(long, default_value = "25")]
        page_size: usize,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// List stored datasets and reconciliation runs
    List {
        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

/// Parse output format string
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Parse a compare field spec: "field", "field:exact", or "field:amount"
pub fn parse_compare_field(spec: &str) -> Result<CompareField, String> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err("Compare field must not be empty".to_string());
    }

    match spec.rsplit_once(':') {
        Some((field, "exact")) => Ok(CompareField::exact(field)),
        Some((field, "amount")) | Some((field, "numeric")) => Ok(CompareField::numeric(field)),
        Some((_, strategy)) => Err(format!(
            "Invalid compare strategy: {}. Use 'exact' or 'amount'",
            strategy
        )),
        None => Ok(CompareField::inferred(spec)),
    }
}

impl Cli {
    /// Log filter level implied by the parsed flags. Must be applied before
    /// the logger is initialized; env_logger filters are fixed at init time.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

/// Validate that the tolerance is a non-negative number
fn validate_tolerance(s: &str) -> Result<f64, String> {
    let tolerance: f64 = s
        .parse()
        .map_err(|_| format!("Invalid tolerance: '{}'. Must be a number.", s))?;

    if !(tolerance >= 0.0) {
        return Err("Tolerance must be non-negative".to_string());
    }

    Ok(tolerance)
}

/// Validate that the page number is at least 1
fn validate_page(s: &str) -> Result<usize, String> {
    let page: usize = s
        .parse()
        .map_err(|_| format!("Invalid page: '{}'. Must be a positive integer.", s))?;

    if page == 0 {
        return Err("Page numbers start at 1".to_string());
    }

    Ok(page)
}
