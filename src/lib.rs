//! # recondiff
//!
//! A key-based reconciliation tool for tabular datasets: matches records
//! across two datasets on a composite key and classifies every key as a
//! match, a mismatch, or one-sided.

pub mod cli;
pub mod error;
pub mod store;
pub mod data;
pub mod normalize;
pub mod key;
pub mod diff;
pub mod engine;
pub mod query;
pub mod commands;
pub mod output;
pub mod progress;

pub use error::{RecondiffError, Result};
pub use store::ReconStore;

/// Current format version for recondiff files
pub const FORMAT_VERSION: &str = "1.0.0";

/// Default page size for item queries
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Smallest accepted page size for item queries
pub const MIN_PAGE_SIZE: usize = 5;

/// Largest accepted page size for item queries
pub const MAX_PAGE_SIZE: usize = 100;
