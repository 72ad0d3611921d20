//! Input and output adapters
//!
//! - [`sqlite`] - read-only SQLite sentence source
//! - [`output`] - output text file sink
//!
//! The batch runner works against [`SentenceSource`] and [`EntrySink`], so
//! both ends can be swapped for the in-memory [`VecSource`] / [`VecSink`].

pub mod output;
pub mod sqlite;
pub mod traits;

pub use output::{FileSink, OutputMode};
pub use sqlite::SqliteSource;
pub use traits::{EntrySink, SentenceSource, VecSink, VecSource};
