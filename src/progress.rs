//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for reconciliation operations
#[derive(Debug)]
pub struct ProgressReporter {
    pub load_pb: Option<ProgressBar>,
    pub match_pb: Option<ProgressBar>,
    // Only reconcile runs have a matching phase after loading
    has_match_phase: bool,
}

impl ProgressReporter {
    /// Create progress reporter for a reconciliation run
    pub fn new_for_reconcile() -> Self {
        let load_pb = create_spinner("Loading datasets...");

        Self {
            load_pb: Some(load_pb),
            match_pb: None,
            has_match_phase: true,
        }
    }

    /// Create progress reporter for dataset import
    pub fn new_for_import() -> Self {
        let load_pb = create_spinner("Reading file...");

        Self {
            load_pb: Some(load_pb),
            match_pb: None,
            has_match_phase: false,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            load_pb: None,
            match_pb: None,
            has_match_phase: false,
        }
    }

    /// Finish the loading phase, starting the matching spinner when the
    /// operation has one
    pub fn finish_load(&mut self, message: &str) {
        if let Some(pb) = self.load_pb.take() {
            pb.finish_with_message(message.to_string());
        }
        if self.has_match_phase && self.match_pb.is_none() {
            self.match_pb = Some(create_spinner("Matching records..."));
        }
    }

    /// Finish the matching phase
    pub fn finish_match(&mut self, message: &str) {
        if let Some(pb) = self.match_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Finish all progress bars
    pub fn finish_all(&mut self, message: &str) {
        self.finish_load(message);
        self.finish_match(message);
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Ensure all progress bars are cleaned up silently
        if let Some(pb) = self.load_pb.take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.match_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
