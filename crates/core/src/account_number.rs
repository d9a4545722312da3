//! # Account Number Module
//!
//! Numeric account identifier: a 14-digit UTC timestamp followed by a
//! 6-digit random suffix when generated, anything in the 16-30 digit
//! banking band when parsed.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `yyyyMMddHHmmss`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
pub const TIMESTAMP_LEN: usize = 14;
pub const SUFFIX_MIN: u32 = 100_000;
pub const SUFFIX_MAX: u32 = 999_999;
pub const SUFFIX_LEN: usize = 6;
/// Length of every generated account number
pub const GENERATED_LEN: usize = TIMESTAMP_LEN + SUFFIX_LEN;
/// Shortest account number accepted by banks
pub const MIN_LEN: usize = 16;
/// Longest account number part in use (e.g. Jordan)
pub const MAX_LEN: usize = 30;

/// An account number.
///
/// # Examples
/// ```
/// use ibank_core::AccountNumber;
///
/// let number: AccountNumber = "20261019143005123456".parse().unwrap();
/// assert_eq!(number.timestamp_part(), Some("20261019143005"));
/// assert_eq!(number.suffix_part(), Some("123456"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Build an account number from a timestamp and a random suffix.
    ///
    /// The suffix is expected to lie in `[SUFFIX_MIN, SUFFIX_MAX]`, which
    /// keeps the result at exactly `GENERATED_LEN` digits.
    pub fn compose(timestamp: DateTime<Utc>, suffix: u32) -> Self {
        Self(format!(
            "{}{:0width$}",
            timestamp.format(TIMESTAMP_FORMAT),
            suffix,
            width = SUFFIX_LEN
        ))
    }

    /// Parse and validate an account number in the 16-30 digit band.
    pub fn parse(value: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidAccountNumber {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must contain only digits"));
        }
        if !(MIN_LEN..=MAX_LEN).contains(&value.len()) {
            return Err(invalid("must be between 16 and 30 digits"));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Timestamp prefix, for numbers in the generated layout
    pub fn timestamp_part(&self) -> Option<&str> {
        (self.0.len() == GENERATED_LEN).then(|| &self.0[..TIMESTAMP_LEN])
    }

    /// Random suffix, for numbers in the generated layout
    pub fn suffix_part(&self) -> Option<&str> {
        (self.0.len() == GENERATED_LEN).then(|| &self.0[TIMESTAMP_LEN..])
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountNumber> for String {
    fn from(number: AccountNumber) -> Self {
        number.0
    }
}

impl AsRef<str> for AccountNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_compose() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let number = AccountNumber::compose(instant, 100_000);

        assert_eq!(number.as_str(), "20260102030405100000");
        assert_eq!(number.len(), GENERATED_LEN);
        assert_eq!(number.timestamp_part(), Some("20260102030405"));
        assert_eq!(number.suffix_part(), Some("100000"));
    }

    #[test]
    fn test_parse_band() {
        assert!(AccountNumber::parse(&"1".repeat(16)).is_ok());
        assert!(AccountNumber::parse(&"9".repeat(30)).is_ok());
        assert!(AccountNumber::parse(&"1".repeat(15)).is_err());
        assert!(AccountNumber::parse(&"1".repeat(31)).is_err());
        assert!(AccountNumber::parse("2026101914300512345A").is_err());
    }

    #[test]
    fn test_non_generated_layout_has_no_parts() {
        let number = AccountNumber::parse(&"4".repeat(18)).unwrap();
        assert_eq!(number.timestamp_part(), None);
        assert_eq!(number.suffix_part(), None);
    }

    #[test]
    fn test_serde_validates() {
        let json = serde_json::to_string(&AccountNumber::parse(&"1".repeat(20)).unwrap()).unwrap();
        assert_eq!(json, format!("\"{}\"", "1".repeat(20)));

        let bad: Result<AccountNumber, _> = serde_json::from_str("\"123\"");
        assert!(bad.is_err());
    }
}
