//! Command implementations

use std::path::Path;

use crate::cli::{parse_compare_field, Commands, OutputFormat};
use crate::data::load_dataset;
use crate::diff::CompareField;
use crate::engine::{reconcile, ReconcileConfig};
use crate::error::{RecondiffError, Result};
use crate::output::PrettyPrinter;
use crate::progress::ProgressReporter;
use crate::query::{query_items, ItemQuery, StatusFilter};
use crate::store::ReconStore;

/// Execute a command with the given store path override
pub fn execute_command(command: Commands, store_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Init { force } => init_command(store_path, force),
        Commands::Import { input, name } => {
            let store = ReconStore::find_or_create(store_path)?;
            import_command(&store, &input, name.as_deref())
        }
        Commands::Reconcile {
            dataset_a,
            dataset_b,
            key,
            compare,
            tolerance,
            format,
        } => {
            let store = ReconStore::find_or_create(store_path)?;
            reconcile_command(&store, &dataset_a, &dataset_b, key, &compare, tolerance, &format)
        }
        Commands::Summary { run, format } => {
            let store = ReconStore::find_or_create(store_path)?;
            summary_command(&store, run.as_deref(), &format)
        }
        Commands::Items {
            run,
            status,
            search,
            page,
            page_size,
            format,
        } => {
            let store = ReconStore::find_or_create(store_path)?;
            items_command(&store, run.as_deref(), &status, search, page, page_size, &format)
        }
        Commands::List { format } => {
            let store = ReconStore::find_or_create(store_path)?;
            list_command(&store, &format)
        }
    }
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::parse(format).map_err(RecondiffError::invalid_input)
}

/// Initialize a new store
fn init_command(store_path: Option<&Path>, force: bool) -> Result<()> {
    let root = match store_path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let store = ReconStore::create_new(root)?;
    store.create_config_with_force(force)?;
    store.ensure_gitignore()?;

    println!("✅ Initialized recondiff store at {}", store.store_dir.display());
    Ok(())
}

/// Import a CSV or XLSX file as a named dataset
fn import_command(store: &ReconStore, input: &str, name: Option<&str>) -> Result<()> {
    let path = Path::new(input);
    let name = match name {
        Some(n) => n.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                RecondiffError::invalid_input(format!("Cannot derive a name from: {}", input))
            })?,
    };

    let mut progress = ProgressReporter::new_for_import();
    let dataset = load_dataset(path, &name)?;
    progress.finish_load(&format!("Read {} rows", dataset.row_count()));

    let record = store.save_dataset(&dataset)?;

    println!(
        "✅ Imported '{}' ({} rows, {} columns) as {}",
        record.name,
        record.row_count,
        record.headers.len(),
        record.id
    );
    Ok(())
}

/// Run a reconciliation between two stored datasets
fn reconcile_command(
    store: &ReconStore,
    dataset_a: &str,
    dataset_b: &str,
    key_fields: Vec<String>,
    compare_specs: &[String],
    tolerance: f64,
    format: &str,
) -> Result<()> {
    let format = parse_format(format)?;

    let compare_fields: Vec<CompareField> = compare_specs
        .iter()
        .map(|spec| parse_compare_field(spec).map_err(RecondiffError::invalid_input))
        .collect::<Result<_>>()?;

    let config = ReconcileConfig {
        key_fields,
        compare_fields,
        amount_tolerance: tolerance,
    };

    let mut progress = ProgressReporter::new_for_reconcile();
    let a = store.resolve_dataset(dataset_a)?;
    let b = store.resolve_dataset(dataset_b)?;
    progress.finish_load(&format!(
        "Loaded '{}' ({} rows) and '{}' ({} rows)",
        a.name,
        a.row_count,
        b.name,
        b.row_count
    ));

    let outcome = reconcile(&a.rows, &b.rows, &config)?;
    progress.finish_match(&format!("Processed {} items", outcome.items.len()));
    drop(progress);

    let run = store.save_run(&a, &b, &config, &outcome.summary, &outcome.items)?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_summary(&run),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&run)?),
    }
    Ok(())
}

/// Show the summary of a run (latest if none given)
fn summary_command(store: &ReconStore, run: Option<&str>, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let run = store.resolve_run_or_latest(run)?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_summary(&run),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&run)?),
    }
    Ok(())
}

/// Query the items of a run with filter, search, and pagination
fn items_command(
    store: &ReconStore,
    run: Option<&str>,
    status: &str,
    search: Option<String>,
    page: usize,
    page_size: usize,
    format: &str,
) -> Result<()> {
    let format = parse_format(format)?;
    let status = StatusFilter::parse(status).map_err(RecondiffError::invalid_input)?;

    let run = store.resolve_run_or_latest(run)?;
    let items = store.load_items(&run.id)?;

    let query = ItemQuery { status, search };
    let result = query_items(&items, &query, page, page_size)?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_items_page(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

/// List stored datasets and runs
fn list_command(store: &ReconStore, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let datasets = store.list_datasets()?;
    let runs = store.list_runs()?;

    match format {
        OutputFormat::Pretty => {
            PrettyPrinter::print_dataset_list(&datasets);
            println!();
            PrettyPrinter::print_run_list(&runs);
        }
        OutputFormat::Json => {
            let listing = serde_json::json!({
                "datasets": datasets,
                "runs": runs,
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}
