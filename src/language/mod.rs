//! Language handling: the supported-language set, statistical detection and
//! the fallback rule that keeps every row on a configured language.

pub mod detector;
pub mod resolver;

pub use detector::{LanguageDetector, WhatlangDetector};
pub use resolver::{resolve_language, LanguageResolver, Resolution};

use crate::domain::{LanguageCode, ModelId};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Languages the engines are built for, each with the model serving it
///
/// Fixed at startup. In TOML this is a plain table:
///
/// ```toml
/// [languages]
/// en = "en_core_web_sm"
/// es = "es_core_news_sm"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportedLanguages(BTreeMap<LanguageCode, ModelId>);

impl SupportedLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    /// `en` served by the large English model
    pub fn english() -> Self {
        Self::from_pairs(&[("en", "en_core_web_lg")])
    }

    /// `es` served by the small Spanish model
    pub fn spanish() -> Self {
        Self::from_pairs(&[("es", "es_core_news_sm")])
    }

    /// The seven European languages of the multilingual job
    pub fn multilingual() -> Self {
        Self::from_pairs(&[
            ("en", "en_core_web_sm"),
            ("es", "es_core_news_sm"),
            ("fr", "fr_core_news_sm"),
            ("de", "de_core_news_sm"),
            ("it", "it_core_news_sm"),
            ("pt", "pt_core_news_sm"),
            ("nl", "nl_core_news_sm"),
        ])
    }

    // Only called with the literals above.
    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .filter_map(|(code, model)| {
                    Some((LanguageCode::new(*code).ok()?, ModelId::new(*model).ok()?))
                })
                .collect(),
        )
    }

    /// Add or replace the model for `language`
    pub fn insert(&mut self, language: LanguageCode, model: ModelId) -> Option<ModelId> {
        self.0.insert(language, model)
    }

    pub fn contains(&self, language: &LanguageCode) -> bool {
        self.0.contains_key(language)
    }

    /// Whether a raw code such as a detector's output is supported
    pub fn contains_code(&self, code: &str) -> bool {
        LanguageCode::new(code)
            .map(|c| self.contains(&c))
            .unwrap_or(false)
    }

    pub fn model_for(&self, language: &LanguageCode) -> Option<&ModelId> {
        self.0.get(language)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, LanguageCode, ModelId> {
        self.0.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &LanguageCode> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SupportedLanguages {
    type Item = (&'a LanguageCode, &'a ModelId);
    type IntoIter = btree_map::Iter<'a, LanguageCode, ModelId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
