//! Batch processing of sentence rows

pub mod coordinator;
pub mod runner;
pub mod summary;

pub use coordinator::BatchCoordinator;
pub use runner::{BatchRunner, ErrorPolicy, LanguageMode};
pub use summary::{RowError, RunSummary};
