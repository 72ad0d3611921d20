//! Language resolution with fallback
//!
//! Whatever the detector says, a resolved language is always a member of the
//! supported-language set: unsupported or missing detections fall back to the
//! default language.

use crate::domain::LanguageCode;
use crate::language::{LanguageDetector, SupportedLanguages};

/// Choose the language for a row from a detector's output
///
/// Returns the detected code when it is supported, `default` otherwise. No
/// confidence thresholding is applied.
///
/// ```
/// use scrubber::domain::LanguageCode;
/// use scrubber::language::{resolve_language, SupportedLanguages};
///
/// let supported = SupportedLanguages::multilingual();
/// let en = LanguageCode::english();
/// assert_eq!(resolve_language(Some("fr"), &supported, &en).as_str(), "fr");
/// assert_eq!(resolve_language(Some("xx"), &supported, &en).as_str(), "en");
/// assert_eq!(resolve_language(None, &supported, &en).as_str(), "en");
/// ```
pub fn resolve_language(
    detected: Option<&str>,
    supported: &SupportedLanguages,
    default: &LanguageCode,
) -> LanguageCode {
    detected
        .and_then(|code| LanguageCode::new(code).ok())
        .filter(|code| supported.contains(code))
        .unwrap_or_else(|| default.clone())
}

/// Outcome of resolving one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub language: LanguageCode,
    /// Raw detector output
    pub detected: Option<String>,
    pub fell_back: bool,
}

/// Detector plus fallback rule
pub struct LanguageResolver {
    detector: Box<dyn LanguageDetector>,
    supported: SupportedLanguages,
    default: LanguageCode,
}

impl LanguageResolver {
    /// `default` must be supported, otherwise a fallback could leave the set
    pub fn new(
        detector: Box<dyn LanguageDetector>,
        supported: SupportedLanguages,
        default: LanguageCode,
    ) -> crate::domain::Result<Self> {
        if !supported.contains(&default) {
            return Err(crate::domain::ScrubError::Configuration(format!(
                "Default language '{default}' is not in the supported languages"
            )));
        }
        Ok(Self {
            detector,
            supported,
            default,
        })
    }

    pub fn supported(&self) -> &SupportedLanguages {
        &self.supported
    }

    pub fn default_language(&self) -> &LanguageCode {
        &self.default
    }

    pub fn resolve(&self, text: &str) -> Resolution {
        let detected = self.detector.detect(text);
        let language = resolve_language(detected.as_deref(), &self.supported, &self.default);
        let fell_back = detected
            .as_deref()
            .and_then(|code| LanguageCode::new(code).ok())
            .as_ref()
            != Some(&language);

        if fell_back {
            tracing::warn!(
                detected = detected.as_deref().unwrap_or("none"),
                fallback = %language,
                "Language not supported. Fallback to {}",
                language.as_str().to_uppercase()
            );
        } else {
            tracing::debug!(language = %language, "Resolved language");
        }

        Resolution {
            language,
            detected,
            fell_back,
        }
    }
}

impl std::fmt::Debug for LanguageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageResolver")
            .field("supported", &self.supported)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    struct FixedDetector(Option<&'static str>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn resolver(detected: Option<&'static str>) -> LanguageResolver {
        LanguageResolver::new(
            Box::new(FixedDetector(detected)),
            SupportedLanguages::multilingual(),
            LanguageCode::english(),
        )
        .unwrap()
    }

    #[test_case("en")]
    #[test_case("es")]
    #[test_case("fr")]
    #[test_case("de")]
    #[test_case("it")]
    #[test_case("pt")]
    #[test_case("nl")]
    fn test_supported_code_unchanged(code: &str) {
        let supported = SupportedLanguages::multilingual();
        let resolved = resolve_language(Some(code), &supported, &LanguageCode::english());
        assert_eq!(resolved.as_str(), code);
    }

    #[test_case(Some("xx"))]
    #[test_case(Some("ru"))]
    #[test_case(Some("zul"))]
    #[test_case(Some(""))]
    #[test_case(None)]
    fn test_unsupported_falls_back(detected: Option<&str>) {
        let supported = SupportedLanguages::multilingual();
        let resolved = resolve_language(detected, &supported, &LanguageCode::english());
        assert_eq!(resolved, LanguageCode::english());
    }

    #[test]
    fn test_resolver_reports_fallback() {
        let resolution = resolver(Some("xx")).resolve("Hola, ¿qué tal?");
        assert_eq!(resolution.language, LanguageCode::english());
        assert_eq!(resolution.detected.as_deref(), Some("xx"));
        assert!(resolution.fell_back);
    }

    #[test]
    fn test_resolver_accepts_supported() {
        let resolution = resolver(Some("es")).resolve("Hola");
        assert_eq!(resolution.language.as_str(), "es");
        assert!(!resolution.fell_back);
    }

    #[test]
    fn test_resolver_normalizes_detector_case() {
        let resolution = resolver(Some("ES")).resolve("Hola");
        assert_eq!(resolution.language.as_str(), "es");
        assert_eq!(resolution.detected.as_deref(), Some("ES"));
        assert!(!resolution.fell_back);
    }

    #[test]
    fn test_default_must_be_supported() {
        let result = LanguageResolver::new(
            Box::new(FixedDetector(None)),
            SupportedLanguages::spanish(),
            LanguageCode::english(),
        );
        assert!(result.is_err());
    }
}
