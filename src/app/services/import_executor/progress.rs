//! Progress reporting for import execution
//!
//! The executor reports through the [`ProgressObserver`] seam. The CLI uses
//! the indicatif-backed [`ProgressReporter`]; library callers and tests can
//! pass [`NoProgress`] or their own observer.

use crate::app::models::{EntityKind, ImportResult};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Receives progress as the executor writes records
///
/// `processed` never decreases and reaches `total` when the import ends.
pub trait ProgressObserver: Send + Sync {
    /// Called once before the first write
    fn on_start(&self, _total: usize) {}

    /// Called when the executor moves on to another entity kind
    fn on_phase(&self, _entity: EntityKind) {}

    /// Called after each candidate is written, skipped or failed
    fn on_progress(&self, _processed: usize, _total: usize) {}

    /// Called once with the final result
    fn on_finish(&self, _result: &ImportResult) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Terminal progress bar for import runs
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter; a disabled reporter draws nothing
    pub fn new(enabled: bool) -> Self {
        let progress_bar = enabled.then(|| {
            let pb = ProgressBar::new(0);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records ({percent}%) | {msg}",
            ) {
                pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
            }
            pb
        });

        Self { progress_bar }
    }

    /// Check if progress reporting is enabled
    pub fn is_enabled(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Get current position from progress bar
    pub fn current_position(&self) -> u64 {
        self.progress_bar.as_ref().map_or(0, ProgressBar::position)
    }
}

impl ProgressObserver for ProgressReporter {
    fn on_start(&self, total: usize) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_length(total as u64);
            pb.set_position(0);
            debug!("Progress bar initialized for {} records", total);
        }
    }

    fn on_phase(&self, entity: EntityKind) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(format!("Writing {}", entity.noun(2)));
        }
    }

    fn on_progress(&self, processed: usize, _total: usize) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_position(processed as u64);
        }
    }

    fn on_finish(&self, result: &ImportResult) {
        if let Some(ref pb) = self.progress_bar {
            let message = format!(
                "Created {} organizations, {} contacts",
                result.organizations.created, result.contacts.created
            );
            pb.finish_with_message(message.clone());
            debug!("Progress reporting completed: {}", message);
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
