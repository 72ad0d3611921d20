//! Statistical language identification

/// Detects the most probable language of a text
pub trait LanguageDetector: Send + Sync {
    /// ISO 639-1 code where one exists, `None` when nothing was detected
    fn detect(&self, text: &str) -> Option<String>;
}

/// [`LanguageDetector`] backed by `whatlang` trigram models
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        let code = info.lang().code();
        tracing::trace!(
            lang = code,
            confidence = info.confidence(),
            reliable = info.is_reliable(),
            "Detected language"
        );
        Some(to_iso_639_1(code).unwrap_or(code).to_string())
    }
}

/// Map an ISO 639-3 code, as reported by `whatlang`, to ISO 639-1
pub fn to_iso_639_1(code: &str) -> Option<&'static str> {
    let two = match code {
        "eng" => "en",
        "spa" => "es",
        "fra" => "fr",
        "deu" => "de",
        "ita" => "it",
        "por" => "pt",
        "nld" => "nl",
        "rus" => "ru",
        "ukr" => "uk",
        "pol" => "pl",
        "ces" => "cs",
        "slk" => "sk",
        "slv" => "sl",
        "hrv" => "hr",
        "srp" => "sr",
        "bul" => "bg",
        "ron" => "ro",
        "hun" => "hu",
        "fin" => "fi",
        "est" => "et",
        "lav" => "lv",
        "lit" => "lt",
        "swe" => "sv",
        "dan" => "da",
        "nob" => "nb",
        "ell" => "el",
        "tur" => "tr",
        "cat" => "ca",
        "epo" => "eo",
        "lat" => "la",
        "afr" => "af",
        "ara" => "ar",
        "heb" => "he",
        "pes" => "fa",
        "hin" => "hi",
        "ben" => "bn",
        "urd" => "ur",
        "cmn" => "zh",
        "jpn" => "ja",
        "kor" => "ko",
        "vie" => "vi",
        "tha" => "th",
        "ind" => "id",
        "tgl" => "tl",
        _ => return None,
    };
    Some(two)
}
