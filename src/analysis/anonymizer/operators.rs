//! Anonymization operators
//!
//! Each operator turns one detected span into its replacement text.

use crate::analysis::models::EntityType;
use crate::domain::{Result, ScrubError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Operator applied to a detected span
///
/// Configured in TOML as a table tagged by `type`:
///
/// ```toml
/// [anonymizer.operators.PHONE_NUMBER]
/// type = "mask"
/// masking_char = "*"
/// chars_to_mask = 4
/// from_end = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operator {
    /// Replace with `new_value`, or `<ENTITY_TYPE>` when unset
    Replace {
        #[serde(default)]
        new_value: Option<String>,
    },
    /// Remove the span entirely
    Redact,
    /// Overwrite characters with `masking_char`
    Mask {
        masking_char: char,
        chars_to_mask: usize,
        #[serde(default)]
        from_end: bool,
    },
    /// SHA-256 of the original value, hex encoded
    Hash,
}

impl Default for Operator {
    fn default() -> Self {
        Self::Replace { new_value: None }
    }
}

impl Operator {
    /// Short operator name for reporting
    pub fn name(&self) -> &'static str {
        match self {
            Self::Replace { .. } => "replace",
            Self::Redact => "redact",
            Self::Mask { .. } => "mask",
            Self::Hash => "hash",
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Self::Mask { masking_char, .. } = self {
            if masking_char.is_control() {
                return Err(ScrubError::Configuration(
                    "masking_char must be a printable character".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Replacement text for `original`, detected as `entity`
    pub fn apply(&self, original: &str, entity: EntityType) -> String {
        match self {
            Self::Replace { new_value } => new_value
                .clone()
                .unwrap_or_else(|| format!("<{}>", entity.label())),
            Self::Redact => String::new(),
            Self::Mask {
                masking_char,
                chars_to_mask,
                from_end,
            } => mask(original, *masking_char, *chars_to_mask, *from_end),
            Self::Hash => {
                let digest = Sha256::digest(original.as_bytes());
                digest.iter().map(|b| format!("{b:02x}")).collect()
            }
        }
    }
}

fn mask(original: &str, masking_char: char, chars_to_mask: usize, from_end: bool) -> String {
    let total = original.chars().count();
    let count = chars_to_mask.min(total);
    let (mask_from, mask_to) = if from_end {
        (total - count, total)
    } else {
        (0, count)
    };

    original
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if (mask_from..mask_to).contains(&i) {
                masking_char
            } else {
                c
            }
        })
        .collect()
}
