//! Batch coordinator - builds the engines once and runs a job
//!
//! Setup (model loading, recognizer registration) completes before the
//! source database is opened, so a bad model never leaves a half-written
//! output file behind.

use crate::adapters::{FileSink, SqliteSource};
use crate::analysis::PiiRedactor;
use crate::config::JobSettings;
use crate::core::batch::runner::{BatchRunner, LanguageMode};
use crate::core::batch::summary::RunSummary;
use crate::domain::Result;
use crate::language::{LanguageResolver, WhatlangDetector};
use std::time::Instant;

/// Owns the redaction engine for one job
pub struct BatchCoordinator {
    settings: JobSettings,
    redactor: PiiRedactor,
}

impl BatchCoordinator {
    /// Build the engines for `settings`
    ///
    /// # Errors
    ///
    /// Fails if any declared model cannot be loaded or the recognizer and
    /// operator configuration is invalid.
    pub fn new(settings: JobSettings) -> Result<Self> {
        let redactor = PiiRedactor::setup(&settings.redactor_settings())?;
        Ok(Self { settings, redactor })
    }

    pub fn settings(&self) -> &JobSettings {
        &self.settings
    }

    pub fn redactor(&self) -> &PiiRedactor {
        &self.redactor
    }

    /// Read the source, redact every row, write the output
    pub fn execute(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let settings = &self.settings;

        tracing::info!(
            profile = %settings.profile,
            database = %settings.database.display(),
            output = %settings.output.display(),
            mode = %settings.output_mode,
            detect_language = settings.detect_language,
            "Starting run"
        );

        let mut source = SqliteSource::open(&settings.database)?
            .with_query(settings.query.clone())
            .with_text_column(settings.text_column);
        let mut sink = FileSink::open(&settings.output, settings.output_mode)?;

        let runner = BatchRunner::new(&self.redactor, self.language_mode()?)
            .with_policy(settings.on_error);
        let summary = runner
            .run(&mut source, &mut sink)?
            .with_duration(start.elapsed())
            .with_output_path(settings.output.clone());

        summary.log_summary();
        Ok(summary)
    }

    fn language_mode(&self) -> Result<LanguageMode> {
        let settings = &self.settings;
        if settings.detect_language {
            let resolver = LanguageResolver::new(
                Box::new(WhatlangDetector::new()),
                settings.languages.clone(),
                settings.language.clone(),
            )?;
            Ok(LanguageMode::Detect(resolver))
        } else {
            Ok(LanguageMode::Fixed(settings.language.clone()))
        }
    }
}
