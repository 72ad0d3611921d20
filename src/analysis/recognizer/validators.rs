//! Post-match validation for pattern recognizers
//!
//! A regex match is only a candidate. Validators reject candidates that
//! cannot be real identifiers and may replace the score of ones that pass a
//! checksum.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Outcome of validating a regex match
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validation {
    /// Keep the pattern score
    Keep,
    /// Keep with this score instead
    Score(f32),
    /// Drop the candidate
    Reject,
}

/// Validation rule attached to a recognizer in the pattern library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    #[default]
    None,
    Phone,
    Ip,
    Luhn,
    UsSsn,
    Iban,
}

impl Validator {
    pub fn validate(&self, candidate: &str) -> Validation {
        match self {
            Self::None => Validation::Keep,
            Self::Phone => validate_phone(candidate),
            Self::Ip => validate_ip(candidate),
            Self::Luhn => validate_luhn(candidate),
            Self::UsSsn => validate_us_ssn(candidate),
            Self::Iban => validate_iban(candidate),
        }
    }
}

fn digits(candidate: &str) -> Vec<u32> {
    candidate.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn validate_phone(candidate: &str) -> Validation {
    let count = digits(candidate).len();
    if (7..=15).contains(&count) {
        Validation::Keep
    } else {
        Validation::Reject
    }
}

fn validate_ip(candidate: &str) -> Validation {
    match candidate.parse::<IpAddr>() {
        Ok(_) => Validation::Keep,
        Err(_) => Validation::Reject,
    }
}

fn validate_luhn(candidate: &str) -> Validation {
    let digits = digits(candidate);
    if !(13..=19).contains(&digits.len()) {
        return Validation::Reject;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    if sum % 10 == 0 {
        Validation::Score(1.0)
    } else {
        Validation::Reject
    }
}

fn validate_us_ssn(candidate: &str) -> Validation {
    let delimiters: Vec<char> = candidate
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect();
    // Mixed delimiters ("123-45 6789") are not SSNs
    if delimiters.windows(2).any(|w| w[0] != w[1]) {
        return Validation::Reject;
    }

    let only_digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
    if only_digits.len() != 9 {
        return Validation::Reject;
    }

    let (area, rest) = only_digits.split_at(3);
    let (group, serial) = rest.split_at(2);
    if area == "000" || area == "666" || area.starts_with('9') {
        return Validation::Reject;
    }
    if group == "00" || serial == "0000" {
        return Validation::Reject;
    }
    if only_digits.chars().all(|c| Some(c) == only_digits.chars().next()) {
        return Validation::Reject;
    }

    Validation::Keep
}

fn validate_iban(candidate: &str) -> Validation {
    let compact: String = candidate.chars().filter(|c| !c.is_whitespace()).collect();
    if !(15..=34).contains(&compact.len()) {
        return Validation::Reject;
    }

    // ISO 13616: move the first four characters to the end, letters become
    // two-digit numbers, the whole number mod 97 must equal 1.
    let (head, tail) = compact.split_at(4);
    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            _ => return Validation::Reject,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    if remainder == 1 {
        Validation::Score(1.0)
    } else {
        Validation::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("4111 1111 1111 1111", Validation::Score(1.0); "visa test number")]
    #[test_case("5500-0000-0000-0004", Validation::Score(1.0); "mastercard dashed")]
    #[test_case("4111 1111 1111 1112", Validation::Reject; "bad checksum")]
    #[test_case("1234", Validation::Reject; "too short")]
    fn test_luhn(candidate: &str, expected: Validation) {
        assert_eq!(Validator::Luhn.validate(candidate), expected);
    }

    #[test_case("192.168.1.100", Validation::Keep)]
    #[test_case("256.1.1.1", Validation::Reject)]
    #[test_case("2001:db8::1", Validation::Keep)]
    #[test_case("1:2", Validation::Reject)]
    fn test_ip(candidate: &str, expected: Validation) {
        assert_eq!(Validator::Ip.validate(candidate), expected);
    }

    #[test_case("078-05-1120", Validation::Keep; "valid")]
    #[test_case("000-12-3456", Validation::Reject; "zero area")]
    #[test_case("666-12-3456", Validation::Reject; "area 666")]
    #[test_case("912-12-3456", Validation::Reject; "area 9xx")]
    #[test_case("123-00-4567", Validation::Reject; "zero group")]
    #[test_case("123-45 6789", Validation::Reject; "mixed delimiters")]
    #[test_case("111-11-1111", Validation::Reject; "repeated digit")]
    fn test_us_ssn(candidate: &str, expected: Validation) {
        assert_eq!(Validator::UsSsn.validate(candidate), expected);
    }

    #[test_case("DE89 3704 0044 0532 0130 00", Validation::Score(1.0); "german spaced")]
    #[test_case("GB82WEST12345698765432", Validation::Score(1.0); "uk compact")]
    #[test_case("GB82WEST12345698765433", Validation::Reject; "bad checksum")]
    fn test_iban(candidate: &str, expected: Validation) {
        assert_eq!(Validator::Iban.validate(candidate), expected);
    }

    #[test]
    fn test_phone_digit_count() {
        assert_eq!(Validator::Phone.validate("555-123-4567"), Validation::Keep);
        assert_eq!(Validator::Phone.validate("12 34"), Validation::Reject);
    }

    #[test]
    fn test_none_keeps_everything() {
        assert_eq!(Validator::None.validate("anything"), Validation::Keep);
    }
}
