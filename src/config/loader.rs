//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ScrubberConfig;
use crate::domain::errors::ScrubError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ScrubberConfig
/// 4. Applies environment variable overrides (SCRUBBER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use scrubber::config::loader::load_config;
///
/// let config = load_config("scrubber.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ScrubberConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScrubError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ScrubError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Like [`load_config`], but a missing file yields the profile defaults
///
/// Environment overrides and validation still apply.
pub fn load_optional_config(path: impl AsRef<Path>) -> Result<ScrubberConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        path = %path.display(),
        "Configuration file not found, using profile defaults"
    );
    load_config_str("")
}

/// Parse, override and validate configuration text
pub fn load_config_str(contents: &str) -> Result<ScrubberConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ScrubberConfig = toml::from_str(&contents)
        .map_err(|e| ScrubError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ScrubError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ScrubError::Configuration(e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Comment lines are copied untouched
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ScrubError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the SCRUBBER_* prefix
///
/// Environment variables follow the pattern: SCRUBBER_<SECTION>_<KEY>
/// For example: SCRUBBER_JOB_PROFILE, SCRUBBER_OUTPUT_PATH
fn apply_env_overrides(config: &mut ScrubberConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SCRUBBER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Job overrides
    if let Ok(val) = std::env::var("SCRUBBER_JOB_PROFILE") {
        config.job.profile = val.parse().map_err(ScrubError::Configuration)?;
    }
    if let Ok(val) = std::env::var("SCRUBBER_JOB_ON_ERROR") {
        config.job.on_error = val.parse().map_err(ScrubError::Configuration)?;
    }

    // Source overrides
    if let Ok(val) = std::env::var("SCRUBBER_SOURCE_DATABASE") {
        config.source.database = Some(val.into());
    }

    // Output overrides
    if let Ok(val) = std::env::var("SCRUBBER_OUTPUT_PATH") {
        config.output.path = Some(val.into());
    }
    if let Ok(val) = std::env::var("SCRUBBER_OUTPUT_MODE") {
        config.output.mode = Some(val.parse().map_err(ScrubError::Configuration)?);
    }

    // Analyzer overrides
    if let Ok(val) = std::env::var("SCRUBBER_ANALYZER_MODELS_DIR") {
        config.analyzer.models_dir = Some(val.into());
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SCRUBBER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SCRUBBER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
