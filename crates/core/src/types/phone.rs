//! Customer phone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Normalized phones are 8 to 15 ASCII digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8,15}$").expect("phone pattern is valid"));

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// Nothing left after normalization.
    #[error("phone number cannot be empty")]
    Empty,
    /// Normalized value is not 8-15 ASCII digits.
    #[error("phone number must be {min}-{max} digits")]
    InvalidFormat {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
}

/// A customer phone number, stored digits-only.
///
/// ## Normalization
///
/// Whitespace, hyphens, and parentheses are removed, then one leading `+`.
/// The result must be 8-15 ASCII digits.
///
/// ```
/// use pizzeti_core::Phone;
///
/// let phone = Phone::parse("+249 900-318100").unwrap();
/// assert_eq!(phone.as_str(), "249900318100");
///
/// assert!(Phone::parse("").is_err());
/// assert!(Phone::parse("123").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 8;
    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 15;

    /// Strip formatting characters without validating.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        let stripped: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
            .collect();
        match stripped.strip_prefix('+') {
            Some(rest) => rest.to_owned(),
            None => stripped,
        }
    }

    /// Normalize and validate a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::Empty`] if nothing remains after normalization,
    /// or [`PhoneError::InvalidFormat`] if the result is not 8-15 digits.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let normalized = Self::normalize(raw);
        if normalized.is_empty() {
            return Err(PhoneError::Empty);
        }
        if !PHONE_PATTERN.is_match(&normalized) {
            return Err(PhoneError::InvalidFormat {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }
        Ok(Self(normalized))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Phone {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(Phone::normalize("+249 (900) 318-100"), "249900318100");
        assert_eq!(Phone::normalize("  0912 345 678 "), "0912345678");
    }

    #[test]
    fn test_normalize_only_strips_leading_plus() {
        assert_eq!(Phone::normalize("249+900"), "249+900");
        assert_eq!(Phone::normalize("++249"), "+249");
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(
            Phone::parse("+249 900-318100").unwrap().as_str(),
            "249900318100"
        );
        assert!(Phone::parse("12345678").is_ok());
        assert!(Phone::parse("123456789012345").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert_eq!(Phone::parse(" ( ) - "), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("+"), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_length_bounds() {
        assert!(matches!(
            Phone::parse("1234567"),
            Err(PhoneError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let phone: Phone = serde_json::from_str("\"0912345678\"").unwrap();
        assert_eq!(phone.as_str(), "0912345678");
        assert!(serde_json::from_str::<Phone>("\"12\"").is_err());
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert!(matches!(
            Phone::parse("0912abc678"),
            Err(PhoneError::InvalidFormat { .. })
        ));
        // Arabic-Indic digits are not accepted
        assert!(matches!(
            Phone::parse("٠٩١٢٣٤٥٦٧٨"),
            Err(PhoneError::InvalidFormat { .. })
        ));
    }
}
