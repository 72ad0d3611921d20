//! Result type alias for Scrubber

use super::errors::ScrubError;

/// Result type alias for Scrubber operations
///
/// # Examples
///
/// ```
/// use scrubber::domain::result::Result;
/// use scrubber::domain::errors::ScrubError;
///
/// fn failing_function() -> Result<()> {
///     Err(ScrubError::Analysis("boom".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, ScrubError>;
