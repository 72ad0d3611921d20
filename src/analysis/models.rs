//! Detection data models

use crate::domain::{Result, ScrubError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity types the analyzer can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Email addresses
    EmailAddress,
    /// Telephone numbers
    PhoneNumber,
    /// IPv4 and IPv6 addresses
    IpAddress,
    /// Payment card numbers
    CreditCard,
    /// Web URLs
    Url,
    /// US Social Security Numbers
    UsSsn,
    /// International Bank Account Numbers
    IbanCode,
    /// Person names (gazetteer)
    Person,
    /// Locations (gazetteer)
    Location,
    /// Organizations (gazetteer)
    Organization,
    /// Nationalities, religious or political groups (gazetteer)
    Nrp,
}

impl EntityType {
    /// Label used in placeholders and configuration keys
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::IpAddress => "IP_ADDRESS",
            Self::CreditCard => "CREDIT_CARD",
            Self::Url => "URL",
            Self::UsSsn => "US_SSN",
            Self::IbanCode => "IBAN_CODE",
            Self::Person => "PERSON",
            Self::Location => "LOCATION",
            Self::Organization => "ORGANIZATION",
            Self::Nrp => "NRP",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "EMAIL_ADDRESS" | "EMAIL" => Ok(Self::EmailAddress),
            "PHONE_NUMBER" | "PHONE" => Ok(Self::PhoneNumber),
            "IP_ADDRESS" | "IP" => Ok(Self::IpAddress),
            "CREDIT_CARD" => Ok(Self::CreditCard),
            "URL" => Ok(Self::Url),
            "US_SSN" | "SSN" => Ok(Self::UsSsn),
            "IBAN_CODE" | "IBAN" => Ok(Self::IbanCode),
            "PERSON" | "PER" => Ok(Self::Person),
            "LOCATION" | "LOC" | "GPE" => Ok(Self::Location),
            "ORGANIZATION" | "ORG" => Ok(Self::Organization),
            "NRP" | "NORP" => Ok(Self::Nrp),
            other => Err(ScrubError::Configuration(format!(
                "Unknown entity type: {other}"
            ))),
        }
    }
}

/// One detected span
///
/// `start` and `end` are byte offsets into the analyzed text and always fall
/// on UTF-8 character boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerResult {
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
    /// Name of the recognizer that produced the span
    pub recognizer: String,
}

impl RecognizerResult {
    pub fn new(
        entity_type: EntityType,
        start: usize,
        end: usize,
        score: f32,
        recognizer: impl Into<String>,
    ) -> Self {
        Self {
            entity_type,
            start,
            end,
            score: score.clamp(0.0, 1.0),
            recognizer: recognizer.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this span lies within `other`
    pub fn contained_in(&self, other: &RecognizerResult) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Whether the two spans share at least one byte
    pub fn overlaps(&self, other: &RecognizerResult) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Same span and type, regardless of score
    pub fn same_span(&self, other: &RecognizerResult) -> bool {
        self.entity_type == other.entity_type && self.start == other.start && self.end == other.end
    }
}
