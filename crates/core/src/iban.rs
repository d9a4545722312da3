//! # IBAN Module
//!
//! International Bank Account Number (ISO 13616) construction and
//! validation with the ISO 7064 mod-97-10 checksum.
//!
//! ```text
//! GB 82 WEST 123456 98765432
//! │  │  └─ BBAN: bank ‖ branch ‖ account
//! │  └─ check digits
//! └─ country code
//! ```

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest BBAN allowed by ISO 13616 (34 minus country and check digits)
pub const MAX_BBAN_LEN: usize = 30;
pub const MIN_IBAN_LEN: usize = 5;
pub const MAX_IBAN_LEN: usize = 34;

/// Field widths of the BBAN.
///
/// One layout is used for every country. Each field is left-padded with
/// `0` to its width; a field longer than its width is a format error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BbanLayout {
    pub bank_width: usize,
    pub branch_width: usize,
    pub account_width: usize,
}

impl BbanLayout {
    pub const fn new(bank_width: usize, branch_width: usize, account_width: usize) -> Self {
        Self {
            bank_width,
            branch_width,
            account_width,
        }
    }

    pub fn bban_len(&self) -> usize {
        self.bank_width + self.branch_width + self.account_width
    }

    /// Every field needs room for at least one character and the BBAN has
    /// to fit an IBAN.
    pub fn validate(&self) -> CoreResult<()> {
        for (field, width) in [
            ("bank_width", self.bank_width),
            ("branch_width", self.branch_width),
            ("account_width", self.account_width),
        ] {
            if width == 0 {
                return Err(CoreError::invalid_input(field, "must be greater than zero"));
            }
        }
        if self.bban_len() > MAX_BBAN_LEN {
            return Err(CoreError::format("bban", self.bban_len(), MAX_BBAN_LEN));
        }
        Ok(())
    }

    /// Lay out the BBAN from already normalised fields.
    fn assemble(&self, bank: &str, branch: &str, account: &str) -> CoreResult<String> {
        let mut bban = String::with_capacity(self.bban_len());
        for (field, value, width) in [
            ("bank_identifier", bank, self.bank_width),
            ("branch_code", branch, self.branch_width),
            ("account_number", account, self.account_width),
        ] {
            if value.len() > width {
                return Err(CoreError::format(field, value.len(), width));
            }
            bban.extend(std::iter::repeat('0').take(width - value.len()));
            bban.push_str(value);
        }

        if bban.len() > MAX_BBAN_LEN {
            return Err(CoreError::format("bban", bban.len(), MAX_BBAN_LEN));
        }
        Ok(bban)
    }
}

impl Default for BbanLayout {
    /// 4-character bank, 6-character branch, 20-digit generated account number
    fn default() -> Self {
        Self::new(4, 6, 20)
    }
}

/// Remainder of the alphanumeric string read as a decimal numeral with
/// letters expanded to two digits (A=10 … Z=35), modulo 97.
///
/// The numeral is folded one character at a time, so arbitrarily long
/// inputs never overflow. Returns `None` on a non-alphanumeric character.
pub fn mod97<I>(chars: I) -> Option<u32>
where
    I: IntoIterator<Item = char>,
{
    chars.into_iter().try_fold(0u32, |remainder, c| {
        let value = c.to_digit(36)?;
        let shift = if value < 10 { 10 } else { 100 };
        Some((remainder * shift + value) % 97)
    })
}

/// Check digits for a country code and BBAN.
pub fn check_digits(country_code: &str, bban: &str) -> Option<u32> {
    let remainder = mod97(bban.chars().chain(country_code.chars()).chain("00".chars()))?;
    Some(98 - remainder)
}

/// An IBAN in electronic format (no spaces, upper case).
///
/// Values of this type always pass the mod-97 check.
///
/// # Examples
/// ```
/// use ibank_core::{BbanLayout, Iban};
///
/// let iban = Iban::build(&BbanLayout::new(4, 6, 8), "GB", "WEST", "123456", "98765432").unwrap();
/// assert_eq!(iban.as_str(), "GB82WEST12345698765432");
/// assert_eq!(iban.to_print_format(), "GB82 WEST 1234 5698 7654 32");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iban(String);

impl Iban {
    /// Derive an IBAN from its parts.
    ///
    /// Fails with `InvalidInput` on a malformed country code or an empty or
    /// non-alphanumeric field, and with `Format` when a field does not fit
    /// the layout.
    pub fn build(
        layout: &BbanLayout,
        country_code: &str,
        bank_identifier: &str,
        branch_code: &str,
        account_number: &str,
    ) -> CoreResult<Self> {
        let country = normalize_country(country_code)?;
        let bank = normalize_field("bank_identifier", bank_identifier)?;
        let branch = normalize_field("branch_code", branch_code)?;
        let account = normalize_field("account_number", account_number)?;

        let bban = layout.assemble(&bank, &branch, &account)?;
        let check = check_digits(&country, &bban)
            .ok_or_else(|| CoreError::invalid_input("bban", "must be alphanumeric"))?;

        Ok(Self(format!("{}{:02}{}", country, check, bban)))
    }

    /// Parse and validate an IBAN in electronic or print format.
    pub fn parse(value: &str) -> CoreResult<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let invalid = |reason: &str| CoreError::invalid_iban(value, reason);

        if !(MIN_IBAN_LEN..=MAX_IBAN_LEN).contains(&normalized.len()) {
            return Err(invalid("length must be between 5 and 34 characters"));
        }
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid("must contain only letters and digits"));
        }

        let (country, rest) = normalized.split_at(2);
        if !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("country code must be two letters"));
        }
        let check = &rest[..2];
        if !check.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("check digits must be numeric"));
        }
        if !matches!(check.parse::<u8>(), Ok(2..=98)) {
            return Err(invalid("check digits must be between 02 and 98"));
        }

        let rearranged = rest[2..].chars().chain(normalized[..4].chars());
        if mod97(rearranged) != Some(1) {
            return Err(invalid("checksum mismatch"));
        }

        Ok(Self(normalized))
    }

    /// True when `value` is a well-formed IBAN with a valid checksum
    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    pub fn check_digits(&self) -> &str {
        &self.0[2..4]
    }

    pub fn bban(&self) -> &str {
        &self.0[4..]
    }

    /// Space-separated groups of four characters
    pub fn to_print_format(&self) -> String {
        self.0
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exactly two ASCII letters, upper-cased. Surrounding whitespace is rejected.
fn normalize_country(country_code: &str) -> CoreResult<String> {
    if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::invalid_input(
            "country_code",
            format!("must be exactly two letters, got {:?}", country_code),
        ));
    }
    Ok(country_code.to_ascii_uppercase())
}

/// Non-empty ASCII alphanumerics, upper-cased. Whitespace anywhere is rejected.
fn normalize_field(field: &'static str, value: &str) -> CoreResult<String> {
    if value.is_empty() {
        return Err(CoreError::invalid_input(field, "must not be empty"));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::invalid_input(
            field,
            format!("must be alphanumeric, got {:?}", value),
        ));
    }
    Ok(value.to_ascii_uppercase())
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Iban {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Iban {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Iban> for String {
    fn from(iban: Iban) -> Self {
        iban.0
    }
}

impl AsRef<str> for Iban {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB_LAYOUT: BbanLayout = BbanLayout::new(4, 6, 8);

    #[test]
    fn test_published_vectors() {
        let iban = Iban::build(&GB_LAYOUT, "GB", "WEST", "123456", "98765432").unwrap();
        assert_eq!(iban.as_str(), "GB82WEST12345698765432");

        let iban = Iban::build(&GB_LAYOUT, "GB", "NWBK", "601613", "31926819").unwrap();
        assert_eq!(iban.as_str(), "GB29NWBK60161331926819");
    }

    #[test]
    fn test_parts() {
        let iban = Iban::build(&GB_LAYOUT, "gb", "west", "123456", "98765432").unwrap();
        assert_eq!(iban.country_code(), "GB");
        assert_eq!(iban.check_digits(), "82");
        assert_eq!(iban.bban(), "WEST12345698765432");
    }

    #[test]
    fn test_mod97() {
        // Published IBAN rearranged: BBAN + country + check digits
        assert_eq!(mod97("WEST12345698765432GB82".chars()), Some(1));
        assert_eq!(mod97("97".chars()), Some(0));
        assert_eq!(mod97("A".chars()), Some(10));
        assert_eq!(mod97("12-3".chars()), None);
    }

    #[test]
    fn test_long_numeral_does_not_overflow() {
        let long: String = "Z9".repeat(200);
        assert!(mod97(long.chars()).unwrap() < 97);
    }

    #[test]
    fn test_default_layout_fits_generated_numbers() {
        let layout = BbanLayout::default();
        assert_eq!(layout.bban_len(), MAX_BBAN_LEN);
        layout.validate().unwrap();

        let iban = Iban::build(&layout, "DE", "NWBK", "601613", "20261019143005123456").unwrap();
        assert_eq!(iban.as_str().len(), MAX_IBAN_LEN);
        assert!(Iban::is_valid(iban.as_str()));
    }

    #[test]
    fn test_short_fields_are_zero_padded() {
        let iban = Iban::build(&GB_LAYOUT, "GB", "AB", "12", "345").unwrap();
        assert_eq!(iban.bban(), "00AB00001200000345");
        assert!(Iban::is_valid(iban.as_str()));
    }

    #[test]
    fn test_invalid_inputs() {
        let err = Iban::build(&GB_LAYOUT, "GB", "", "123456", "98765432").unwrap_err();
        assert!(err.is_invalid_input());

        let err = Iban::build(&GB_LAYOUT, "GBR", "WEST", "123456", "98765432").unwrap_err();
        assert!(err.is_invalid_input());

        let err = Iban::build(&GB_LAYOUT, "G1", "WEST", "123456", "98765432").unwrap_err();
        assert!(err.is_invalid_input());

        let err = Iban::build(&GB_LAYOUT, "GB", "WEST", "  ", "98765432").unwrap_err();
        assert!(err.is_invalid_input());

        let err = Iban::build(&GB_LAYOUT, "GB", "WE-T", "123456", "98765432").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_padded_inputs_are_invalid() {
        for (country, bank, branch) in [
            (" GB ", "WEST", "123456"),
            ("GB ", "WEST", "123456"),
            ("GB", " WEST", "123456"),
            ("GB", "WEST", "123456\t"),
        ] {
            let err = Iban::build(&GB_LAYOUT, country, bank, branch, "98765432").unwrap_err();
            assert!(err.is_invalid_input(), "{:?}/{:?}/{:?} accepted", country, bank, branch);
        }

        let err = Iban::build(&GB_LAYOUT, "GB", "WEST", "123456", " 98765432").unwrap_err();
        assert_eq!(
            err,
            CoreError::invalid_input("account_number", "must be alphanumeric, got \" 98765432\"")
        );
    }

    #[test]
    fn test_lower_case_inputs_are_upper_cased() {
        let iban = Iban::build(&GB_LAYOUT, "gb", "west", "123456", "98765432").unwrap();
        assert_eq!(iban.as_str(), "GB82WEST12345698765432");
    }

    #[test]
    fn test_field_too_wide_is_format_error() {
        let err = Iban::build(&GB_LAYOUT, "GB", "WEST", "123456", "987654321").unwrap_err();
        assert_eq!(err, CoreError::format("account_number", 9, 8));

        let err = Iban::build(&GB_LAYOUT, "GB", "WESTX", "123456", "98765432").unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_layout_validation() {
        assert!(BbanLayout::new(4, 6, 21).validate().unwrap_err().is_format_error());
        assert!(BbanLayout::new(0, 6, 8).validate().unwrap_err().is_invalid_input());
        assert!(GB_LAYOUT.validate().is_ok());
    }

    #[test]
    fn test_parse_accepts_print_format() {
        let iban = Iban::parse("gb82 west 1234 5698 7654 32").unwrap();
        assert_eq!(iban.as_str(), "GB82WEST12345698765432");
        assert_eq!(iban.to_print_format(), "GB82 WEST 1234 5698 7654 32");
    }

    #[test]
    fn test_parse_rejects() {
        assert!(Iban::parse("GB83WEST12345698765432").is_err());
        assert!(Iban::parse("GB8").is_err());
        assert!(Iban::parse("1282WEST12345698765432").is_err());
        assert!(Iban::parse("GBX2WEST12345698765432").is_err());
        assert!(Iban::parse("GB82WEST1234569876543_").is_err());
        assert!(Iban::parse(&format!("GB82{}", "1".repeat(31))).is_err());
    }

    #[test]
    fn test_check_digits_97_and_reserved_00() {
        let iban = Iban::build(&GB_LAYOUT, "GB", "WEST", "123456", "53").unwrap();
        assert_eq!(iban.as_str(), "GB97WEST12345600000053");

        // 00 is congruent to 97 but reserved
        assert!(Iban::parse("GB00WEST12345600000053").is_err());
    }
}
