//! Core business logic for Scrubber.
//!
//! # Modules
//!
//! - [`batch`] - Row iteration, error policy, run summary and orchestration
//!
//! # Run Workflow
//!
//! 1. **Setup**: load every language model and register recognizers
//! 2. **Read**: iterate rows from the source in cursor order
//! 3. **Resolve**: pick each row's language (detect + fallback, or fixed)
//! 4. **Redact**: analyze and anonymize the text
//! 5. **Write**: append the redacted entry and a blank line to the output
//! 6. **Report**: produce a [`RunSummary`](batch::RunSummary)
//!
//! # Example
//!
//! ```rust,no_run
//! use scrubber::config::{load_optional_config, JobSettings};
//! use scrubber::core::batch::BatchCoordinator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_optional_config("scrubber.toml")?;
//! let settings = JobSettings::resolve(&config)?;
//!
//! let coordinator = BatchCoordinator::new(settings)?;
//! let summary = coordinator.execute()?;
//!
//! println!("Rows written: {}", summary.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod batch;
