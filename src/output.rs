//! Output formatting utilities

use crate::engine::{MatchStatus, ReconItem, ReconSummary};
use crate::query::ItemPage;
use crate::store::{DatasetRecord, RunRecord};

/// Pretty printer for recondiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print a reconciliation summary
    pub fn print_summary(run: &RunRecord) {
        let summary = &run.summary;

        println!("🔍 Reconciliation: {} vs {}", run.dataset_a_name, run.dataset_b_name);
        println!("├─ Run: {}", run.id);
        println!("├─ Created: {}", run.created.format("%Y-%m-%d %H:%M:%S UTC"));
        println!(
            "├─ Keys: {} (tolerance {})",
            run.config.key_fields.join(", "),
            run.config.amount_tolerance
        );
        println!("├─ Rows: {} in A, {} in B", summary.total_a, summary.total_b);
        Self::print_counters(summary);
    }

    fn print_counters(summary: &ReconSummary) {
        println!("├─ ✅ Matches: {}", summary.matches);
        println!("├─ ❌ Mismatches: {}", summary.mismatches);
        println!("├─ Missing in A: {}", summary.missing_in_a);
        println!("├─ Missing in B: {}", summary.missing_in_b);
        if summary.skipped_a > 0 || summary.skipped_b > 0 {
            println!(
                "├─ Skipped (no key): {} in A, {} in B",
                summary.skipped_a, summary.skipped_b
            );
        }
        println!("└─ Total keyed: {}", summary.total());
    }

    /// Print a page of reconciliation items
    pub fn print_items_page(page: &ItemPage) {
        if page.items.is_empty() {
            if page.total == 0 {
                println!("No items match the query.");
            } else {
                println!(
                    "No items on page {} ({} total, page size {}).",
                    page.page, page.total, page.page_size
                );
            }
            return;
        }

        let first = (page.page - 1) * page.page_size + 1;
        let last = first + page.items.len() - 1;
        println!("📋 Items {}-{} of {}", first, last, page.total);

        for (i, item) in page.items.iter().enumerate() {
            let prefix = if i == page.items.len() - 1 { "└─" } else { "├─" };
            let cont = if i == page.items.len() - 1 { "   " } else { "│  " };

            println!("{} {} {}", prefix, status_glyph(item.status), item.key);
            Self::print_item_detail(item, cont);
        }
    }

    fn print_item_detail(item: &ReconItem, cont: &str) {
        match item.status {
            MatchStatus::Match => {}
            MatchStatus::Mismatch => {
                for (i, reason) in item.reasons.iter().enumerate() {
                    let sub = if i == item.reasons.len() - 1 { "└─" } else { "├─" };
                    println!("{}{} {}", cont, sub, reason);
                }
            }
            MatchStatus::MissingInA | MatchStatus::MissingInB => {
                if let Some(reason) = item.reasons.first() {
                    println!("{}└─ {}", cont, reason);
                }
            }
        }
    }

    /// Print the dataset list
    pub fn print_dataset_list(datasets: &[DatasetRecord]) {
        if datasets.is_empty() {
            println!("No datasets found.");
            return;
        }

        println!("📁 Datasets:");
        for (i, ds) in datasets.iter().enumerate() {
            let prefix = if i == datasets.len() - 1 { "└─" } else { "├─" };
            println!(
                "{} {} ({} rows, {}, id {})",
                prefix,
                ds.name,
                ds.row_count,
                ds.file_type.as_str(),
                short_id(&ds.id)
            );
        }
    }

    /// Print the run list
    pub fn print_run_list(runs: &[RunRecord]) {
        if runs.is_empty() {
            println!("No reconciliation runs found.");
            return;
        }

        println!("🔍 Reconciliation Runs:");
        for (i, run) in runs.iter().enumerate() {
            let prefix = if i == runs.len() - 1 { "└─" } else { "├─" };
            println!(
                "{} {} {} vs {} ({} matched, {} mismatched)",
                prefix,
                short_id(&run.id),
                run.dataset_a_name,
                run.dataset_b_name,
                run.summary.matches,
                run.summary.mismatches
            );
        }
    }
}

fn status_glyph(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Match => "✅",
        MatchStatus::Mismatch => "❌",
        MatchStatus::MissingInA => "⬅️ ",
        MatchStatus::MissingInB => "➡️ ",
    }
}

fn short_id(id: &str) -> &str {
    if id.len() > 8 {
        &id[..8]
    } else {
        id
    }
}
