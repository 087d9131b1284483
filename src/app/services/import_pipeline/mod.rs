//! End-to-end import orchestration
//!
//! Ties the stages together in a fixed order:
//!
//! 1. map CSV headers to fields and apply user overrides
//! 2. validate the mapping set, refusing the import on any error
//! 3. parse and validate every row
//! 4. look up existing organizations (fail-open) and flag duplicates
//! 5. write the batch through the import executor
//!
//! [`ImportPipeline::preview`] stops after step 3 and never touches a store.

pub mod pipeline;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use pipeline::ImportPipeline;
pub use report::{ImportOutcome, ImportPreview};
