//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Scrubber using clap.

pub mod commands;

use crate::config::{load_config, load_optional_config, ScrubberConfig};
use crate::domain::{Result, ScrubError};
use clap::{Parser, Subcommand};
use std::path::Path;

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "scrubber.toml";

/// Exit code: every row written
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code: run completed but some rows were skipped
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code: invalid configuration
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: engine setup failed (model or pattern loading)
pub const EXIT_SETUP: i32 = 3;
/// Exit code: the run itself failed
pub const EXIT_FATAL: i32 = 5;

/// Scrubber - batch PII redaction for SQLite sentence tables
#[derive(Parser, Debug)]
#[command(name = "scrubber")]
#[command(version, about, long_about = None)]
#[command(author = "Scrubber Contributors")]
pub struct Cli {
    /// Path to configuration file (optional; defaults to ./scrubber.toml when present)
    #[arg(short, long, env = "SCRUBBER_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SCRUBBER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact every row of the source database into the output file
    Run(commands::run::RunArgs),

    /// Redact a single text and print the result
    Redact(commands::redact::RedactArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Load the configuration named by `--config`
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load_config(&self) -> Result<ScrubberConfig> {
        match self.config {
            Some(ref path) => load_config(path),
            None => load_optional_config(Path::new(DEFAULT_CONFIG_PATH)),
        }
    }

    /// Human-readable name of the configuration source
    pub fn config_source(&self) -> String {
        match self.config {
            Some(ref path) => path.clone(),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH.to_string(),
            None => "(built-in profile defaults)".to_string(),
        }
    }
}

/// Map an error to the process exit code
pub fn exit_code_for(error: &ScrubError) -> i32 {
    match error {
        ScrubError::Configuration(_) => EXIT_CONFIG,
        e if e.is_setup_error() => EXIT_SETUP,
        _ => EXIT_FATAL,
    }
}
