//! Persistent store for datasets and reconciliation runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::data::{Dataset, FileType, Record};
use crate::engine::{ReconItem, ReconSummary, ReconcileConfig};
use crate::error::{RecondiffError, Result};

/// A stored dataset: metadata plus the full row data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub id: String,
    pub name: String,
    pub original_filename: String,
    pub file_type: FileType,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub fingerprint: String,
    pub created: DateTime<Utc>,
    pub rows: Vec<Record>,
}

/// A stored reconciliation run: dataset identities, the config used, and the
/// summary. Items live in a separate file keyed by the run id.
///
/// `dataset_a`/`dataset_b` are dataset ids. Names are not unique in the
/// store, so they are carried separately for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: String,
    pub dataset_a: String,
    pub dataset_b: String,
    pub dataset_a_name: String,
    pub dataset_b_name: String,
    pub config: ReconcileConfig,
    pub summary: ReconSummary,
    pub created: DateTime<Utc>,
}

/// Manages the .recondiff store directory
#[derive(Debug, Clone)]
pub struct ReconStore {
    /// Project root directory (where .recondiff/ lives)
    pub root: PathBuf,
    /// .recondiff/ directory path
    pub store_dir: PathBuf,
    /// .recondiff/datasets/ directory path
    pub datasets_dir: PathBuf,
    /// .recondiff/runs/ directory path
    pub runs_dir: PathBuf,
}

impl ReconStore {
    /// Find existing store or create a new one
    pub fn find_or_create(start_dir: Option<&Path>) -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let start = start_dir.unwrap_or(&current_dir);

        if let Some(store) = Self::find_existing(start)? {
            return Ok(store);
        }

        Self::create_new(start.to_path_buf())
    }

    /// Find an existing .recondiff store by walking up the directory tree
    fn find_existing(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir;

        loop {
            let store_dir = current.join(".recondiff");
            if store_dir.exists() && store_dir.is_dir() {
                return Ok(Some(Self::from_root(current.to_path_buf())?));
            }

            // A .git directory marks a project root without a store yet
            if current.join(".git").exists() {
                break;
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Ok(None)
    }

    /// Create a new store in the specified root directory
    pub fn create_new(root: PathBuf) -> Result<Self> {
        let store = Self::from_root(root)?;

        fs::create_dir_all(&store.datasets_dir)?;
        fs::create_dir_all(&store.runs_dir)?;

        store.create_config()?;
        store.ensure_gitignore()?;

        log::info!("Created recondiff store at: {}", store.root.display());

        Ok(store)
    }

    /// Create store handle from a root directory path
    pub fn from_root(root: PathBuf) -> Result<Self> {
        let store_dir = root.join(".recondiff");
        let datasets_dir = store_dir.join("datasets");
        let runs_dir = store_dir.join("runs");

        Ok(Self {
            root,
            store_dir,
            datasets_dir,
            runs_dir,
        })
    }

    /// Create initial configuration file
    fn create_config(&self) -> Result<()> {
        self.create_config_with_force(false)
    }

    /// Create configuration file with optional force overwrite
    pub fn create_config_with_force(&self, force: bool) -> Result<()> {
        let config_path = self.store_dir.join("config.json");

        if config_path.exists() && !force {
            return Ok(());
        }

        let config = serde_json::json!({
            "version": crate::FORMAT_VERSION,
            "created": Utc::now(),
            "default_page_size": crate::DEFAULT_PAGE_SIZE,
        });

        fs::write(config_path, serde_json::to_string_pretty(&config)?)?;
        Ok(())
    }

    /// Ensure .gitignore excludes the store directory
    pub fn ensure_gitignore(&self) -> Result<()> {
        let gitignore_path = self.root.join(".gitignore");
        let entry = "# Ignore recondiff store\n.recondiff/\n";

        if gitignore_path.exists() {
            let content = fs::read_to_string(&gitignore_path)?;
            if !content.contains(".recondiff/") {
                let new_content = if content.ends_with('\n') {
                    format!("{}\n{}", content, entry)
                } else {
                    format!("{}\n\n{}", content, entry)
                };
                fs::write(gitignore_path, new_content)?;
                log::info!("Updated .gitignore with recondiff entries");
            }
        } else {
            fs::write(gitignore_path, entry)?;
            log::info!("Created .gitignore with recondiff entries");
        }

        Ok(())
    }

    /// Path of a stored dataset file
    pub fn dataset_path(&self, id: &str) -> PathBuf {
        self.datasets_dir.join(format!("{}.json", id))
    }

    /// Paths for a run (run record and its item list)
    pub fn run_paths(&self, id: &str) -> (PathBuf, PathBuf) {
        let run_path = self.runs_dir.join(format!("{}.json", id));
        let items_path = self.runs_dir.join(format!("{}.items.json", id));
        (run_path, items_path)
    }

    /// Store a parsed dataset, assigning it a fresh id
    pub fn save_dataset(&self, dataset: &Dataset) -> Result<DatasetRecord> {
        let record = DatasetRecord {
            id: Uuid::new_v4().to_string(),
            name: dataset.name.clone(),
            original_filename: dataset.original_filename.clone(),
            file_type: dataset.file_type,
            headers: dataset.headers.clone(),
            row_count: dataset.row_count(),
            fingerprint: dataset.fingerprint(),
            created: Utc::now(),
            rows: dataset.rows.clone(),
        };

        let path = self.dataset_path(&record.id);
        fs::write(&path, serde_json::to_string_pretty(&record)?)?;

        log::info!(
            "Stored dataset '{}' ({} rows) as {}",
            record.name,
            record.row_count,
            record.id
        );

        Ok(record)
    }

    /// Load a stored dataset by id
    pub fn load_dataset(&self, id: &str) -> Result<DatasetRecord> {
        let path = self.dataset_path(id);
        if !path.exists() {
            return Err(RecondiffError::dataset_not_found(id));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// List all stored datasets, oldest first
    pub fn list_datasets(&self) -> Result<Vec<DatasetRecord>> {
        let mut datasets = Vec::new();

        if !self.datasets_dir.exists() {
            return Ok(datasets);
        }

        for entry in fs::read_dir(&self.datasets_dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                match serde_json::from_str::<DatasetRecord>(&content) {
                    Ok(record) => datasets.push(record),
                    Err(e) => log::warn!("Skipping unreadable dataset file {}: {}", path.display(), e),
                }
            }
        }

        datasets.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(datasets)
    }

    /// Resolve a dataset reference: exact id, exact name, or unique id prefix
    pub fn resolve_dataset(&self, reference: &str) -> Result<DatasetRecord> {
        if self.dataset_path(reference).exists() {
            return self.load_dataset(reference);
        }

        let datasets = self.list_datasets()?;

        let by_name: Vec<&DatasetRecord> =
            datasets.iter().filter(|d| d.name == reference).collect();
        match by_name.len() {
            1 => return Ok(by_name[0].clone()),
            n if n > 1 => {
                return Err(RecondiffError::AmbiguousReference {
                    reference: reference.to_string(),
                    count: n,
                })
            }
            _ => {}
        }

        let by_prefix: Vec<&DatasetRecord> = datasets
            .iter()
            .filter(|d| d.id.starts_with(reference))
            .collect();
        match by_prefix.len() {
            1 => Ok(by_prefix[0].clone()),
            0 => Err(RecondiffError::dataset_not_found(reference)),
            n => Err(RecondiffError::AmbiguousReference {
                reference: reference.to_string(),
                count: n,
            }),
        }
    }

    /// Store a completed run: the run record plus the ordered item list.
    ///
    /// Items are written in engine order so default retrieval preserves it.
    pub fn save_run(
        &self,
        dataset_a: &DatasetRecord,
        dataset_b: &DatasetRecord,
        config: &ReconcileConfig,
        summary: &ReconSummary,
        items: &[ReconItem],
    ) -> Result<RunRecord> {
        let record = RunRecord {
            id: Uuid::new_v4().to_string(),
            dataset_a: dataset_a.id.clone(),
            dataset_b: dataset_b.id.clone(),
            dataset_a_name: dataset_a.name.clone(),
            dataset_b_name: dataset_b.name.clone(),
            config: config.clone(),
            summary: summary.clone(),
            created: Utc::now(),
        };

        let (run_path, items_path) = self.run_paths(&record.id);
        fs::write(&run_path, serde_json::to_string_pretty(&record)?)?;
        fs::write(&items_path, serde_json::to_string(&items)?)?;

        log::info!(
            "Stored reconciliation {} ({} items)",
            record.id,
            items.len()
        );

        Ok(record)
    }

    /// Load a run record by id
    pub fn load_run(&self, id: &str) -> Result<RunRecord> {
        let (run_path, _) = self.run_paths(id);
        if !run_path.exists() {
            return Err(RecondiffError::run_not_found(id));
        }
        let content = fs::read_to_string(&run_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load the ordered item list of a run
    pub fn load_items(&self, id: &str) -> Result<Vec<ReconItem>> {
        let (_, items_path) = self.run_paths(id);
        if !items_path.exists() {
            return Err(RecondiffError::run_not_found(id));
        }
        let content = fs::read_to_string(&items_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// List all runs, oldest first
    pub fn list_runs(&self) -> Result<Vec<RunRecord>> {
        let mut runs = Vec::new();

        if !self.runs_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.runs_dir)? {
            let path = entry?.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.ends_with(".json") && !name.ends_with(".items.json") {
                let content = fs::read_to_string(&path)?;
                match serde_json::from_str::<RunRecord>(&content) {
                    Ok(record) => runs.push(record),
                    Err(e) => log::warn!("Skipping unreadable run file {}: {}", path.display(), e),
                }
            }
        }

        runs.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(runs)
    }

    /// Resolve a run reference: exact id or unique id prefix
    pub fn resolve_run(&self, reference: &str) -> Result<RunRecord> {
        let (run_path, _) = self.run_paths(reference);
        if run_path.exists() {
            return self.load_run(reference);
        }

        let runs = self.list_runs()?;
        let by_prefix: Vec<&RunRecord> = runs
            .iter()
            .filter(|r| r.id.starts_with(reference))
            .collect();
        match by_prefix.len() {
            1 => Ok(by_prefix[0].clone()),
            0 => Err(RecondiffError::run_not_found(reference)),
            n => Err(RecondiffError::AmbiguousReference {
                reference: reference.to_string(),
                count: n,
            }),
        }
    }

    /// Find the most recent run by creation time
    pub fn latest_run(&self) -> Result<Option<RunRecord>> {
        let runs = self.list_runs()?;
        Ok(runs.into_iter().last())
    }

    /// Resolve a run reference with fallback to the latest run
    pub fn resolve_run_or_latest(&self, reference: Option<&str>) -> Result<RunRecord> {
        match reference {
            Some(reference) => self.resolve_run(reference),
            None => self
                .latest_run()?
                .ok_or_else(|| RecondiffError::store("No reconciliation runs found in store")),
        }
    }
}
