//! Identifier commands - generate account numbers and IBANs, validate IBANs

use anyhow::Result;
use ibank_business::ServiceConfig;
use ibank_core::{AccountDraft, AccountType, Iban, IdentifierGenerator};
use serde_json::json;

/// Parts of an IBAN requested on the command line
#[derive(Debug, Clone)]
pub struct IbanRequest {
    pub country: String,
    pub bank: String,
    pub branch: String,
    /// Generated when absent
    pub account: Option<String>,
}

fn generator(config: &ServiceConfig) -> IdentifierGenerator {
    IdentifierGenerator::system().with_layout(config.bban_layout)
}

/// Print a freshly generated account number
pub fn account_number(config: &ServiceConfig, as_json: bool) -> Result<()> {
    let number = generator(config).generate_account_number();

    if as_json {
        println!("{}", json!({ "account_number": number }));
    } else {
        println!("{}", number);
    }
    Ok(())
}

/// Derive the IBAN for a request
pub fn build_iban(config: &ServiceConfig, request: &IbanRequest) -> Result<(String, Iban)> {
    let generator = generator(config);
    let draft = AccountDraft::new(
        0,
        AccountType::Primary,
        &config.default_currency,
        &request.country,
        &request.bank,
        &request.branch,
    );

    let account_number = match &request.account {
        Some(account) => account.clone(),
        None => generator.generate_account_number().to_string(),
    };
    let iban = generator.generate_iban(&draft, &account_number)?;
    Ok((account_number, iban))
}

pub fn iban(config: &ServiceConfig, request: &IbanRequest, as_json: bool) -> Result<()> {
    let (account_number, iban) = build_iban(config, request)?;

    if as_json {
        println!(
            "{}",
            json!({
                "account_number": account_number,
                "iban": iban,
                "print_format": iban.to_print_format(),
            })
        );
    } else {
        println!("✅ IBAN generated:");
        println!("   Account number: {}", account_number);
        println!("   IBAN:           {}", iban);
        println!("   Print format:   {}", iban.to_print_format());
    }
    Ok(())
}

/// Validate an IBAN; an invalid IBAN is reported as an error
pub fn validate(value: &str, as_json: bool) -> Result<()> {
    let iban = Iban::parse(value)?;

    if as_json {
        println!(
            "{}",
            json!({
                "valid": true,
                "iban": iban,
                "country_code": iban.country_code(),
                "check_digits": iban.check_digits(),
                "bban": iban.bban(),
            })
        );
    } else {
        println!("✅ Valid IBAN: {}", iban.to_print_format());
        println!("   Country: {}", iban.country_code());
        println!("   Check:   {}", iban.check_digits());
        println!("   BBAN:    {}", iban.bban());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibank_core::BbanLayout;

    fn request(account: Option<&str>) -> IbanRequest {
        IbanRequest {
            country: "GB".to_string(),
            bank: "WEST".to_string(),
            branch: "123456".to_string(),
            account: account.map(str::to_string),
        }
    }

    #[test]
    fn test_build_iban_with_given_account() {
        let config = ServiceConfig {
            bban_layout: BbanLayout::new(4, 6, 8),
            ..ServiceConfig::default()
        };
        let (number, iban) = build_iban(&config, &request(Some("98765432"))).unwrap();
        assert_eq!(number, "98765432");
        assert_eq!(iban.as_str(), "GB82WEST12345698765432");
    }

    #[test]
    fn test_build_iban_generates_account() {
        let (number, iban) = build_iban(&ServiceConfig::default(), &request(None)).unwrap();
        assert_eq!(number.len(), 20);
        assert!(iban.as_str().ends_with(&number));
        assert!(Iban::is_valid(iban.as_str()));
    }

    #[test]
    fn test_validate() {
        assert!(validate("GB82 WEST 1234 5698 7654 32", false).is_ok());
        assert!(validate("GB83WEST12345698765432", false).is_err());
    }
}
