//! Import execution against the record store
//!
//! This module writes prepared candidates to a [`RecordStore`], one awaited
//! insert at a time, and aggregates the outcome into an [`ImportResult`].
//!
//! ## Architecture
//!
//! - [`executor`] - The executor state machine and sequential writes
//! - [`progress`] - The progress observer seam and the terminal progress bar
//! - [`summary`] - One-line human summaries of a result
//!
//! ## Lifecycle
//!
//! `Idle -> Importing -> Completed | FailedWithPartialResults`. There is no
//! pause or cancel state; a run that saw any rejected write ends in
//! `FailedWithPartialResults` with every successful write kept.
//!
//! [`RecordStore`]: crate::app::adapters::store::RecordStore
//! [`ImportResult`]: crate::app::models::ImportResult

pub mod executor;
pub mod progress;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use executor::{ImportBatch, ImportExecutor};
pub use progress::{NoProgress, ProgressObserver, ProgressReporter};
pub use summary::format_summary;
