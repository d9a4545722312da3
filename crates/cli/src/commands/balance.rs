//! Balance command - summarise raw CATEGORY=AMOUNT entries

use anyhow::{Context, Result};
use ibank_core::{AccountType, BalanceSummary};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

/// Split `CATEGORY=AMOUNT` into its parts
pub fn parse_entry(entry: &str) -> Result<(&str, Decimal)> {
    let (category, amount) = entry
        .split_once('=')
        .with_context(|| format!("Expected CATEGORY=AMOUNT, got {:?}", entry))?;
    let amount = amount
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount in {:?}", entry))?;
    Ok((category.trim(), amount))
}

pub fn summarize(entries: &[String], as_json: bool) -> Result<()> {
    let parsed = entries
        .iter()
        .map(|entry| parse_entry(entry))
        .collect::<Result<Vec<_>>>()?;

    for (category, _) in &parsed {
        if category.parse::<AccountType>().is_err() {
            debug!(category = %category, "ignoring unknown account category");
        }
    }

    let summary = BalanceSummary::from_raw(parsed);

    if as_json {
        println!("{}", json!(summary));
    } else {
        println!("📊 Balance summary");
        for (account_type, balance) in summary.iter() {
            println!("   {:<8} {}", account_type.as_str(), balance);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("PRIMARY=100").unwrap(), ("PRIMARY", dec!(100)));
        assert_eq!(parse_entry(" savings = 50.25 ").unwrap(), ("savings", dec!(50.25)));
        assert!(parse_entry("PRIMARY").is_err());
        assert!(parse_entry("PRIMARY=abc").is_err());
    }

    #[test]
    fn test_summarize_accepts_unknown_categories() {
        let entries = vec!["PRIMARY=100".to_string(), "BROKERAGE=5".to_string()];
        assert!(summarize(&entries, true).is_ok());
    }
}
