//! Error types for recondiff operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecondiffError>;

#[derive(Error, Debug)]
pub enum RecondiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Search pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Dataset not found: {name}")]
    DatasetNotFound { name: String },

    #[error("Reconciliation not found: {name}")]
    RunNotFound { name: String },

    #[error("Ambiguous reference '{reference}': matches {count} entries")]
    AmbiguousReference { reference: String, count: usize },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl RecondiffError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn dataset_not_found(name: impl Into<String>) -> Self {
        Self::DatasetNotFound { name: name.into() }
    }

    pub fn run_not_found(name: impl Into<String>) -> Self {
        Self::RunNotFound { name: name.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
