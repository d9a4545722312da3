//! Demo command - open accounts against the in-memory store, then run a
//! balance inquiry as their owner

use anyhow::Result;
use ibank_business::{AccountService, Identity, ServiceConfig, ServiceContext, StaticIdentity};
use ibank_core::{AccountDraft, AccountType, BalanceSummary, BankAccount};
use ibank_persistence::InMemoryAccountRepo;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

/// Account type of the n-th demo account: primary first, then alternating
fn demo_account_type(index: u32) -> AccountType {
    if index % 2 == 0 {
        AccountType::Primary
    } else {
        AccountType::Savings
    }
}

/// Open `count` accounts for `owner` and return them with the owner's summary
pub async fn open_accounts(
    config: ServiceConfig,
    owner: u64,
    count: u32,
) -> Result<(Vec<BankAccount>, BalanceSummary)> {
    let ctx = ServiceContext::new(
        Arc::new(InMemoryAccountRepo::new()),
        Arc::new(StaticIdentity::new(Identity::new(owner, "demo"))),
        config,
    )?;
    let service = AccountService::new(&ctx);
    let defaults = ctx.config();

    let mut accounts = Vec::with_capacity(count as usize);
    for index in 0..count {
        let draft = AccountDraft::new(
            owner,
            demo_account_type(index),
            &defaults.default_currency,
            &defaults.default_country_code,
            &defaults.default_bank_identifier,
            &defaults.default_branch_code,
        );
        let account = service.create_bank_account(&draft).await?;

        let opening_balance = Decimal::from(100 * (u64::from(index) + 1));
        service.update_balance(account.id, opening_balance).await?;
        accounts.push(service.get_bank_account(account.id).await?);
    }

    let summary = service.get_bank_accounts_balance().await?;
    Ok((accounts, summary))
}

pub async fn run(config: ServiceConfig, owner: u64, count: u32, as_json: bool) -> Result<()> {
    let (accounts, summary) = open_accounts(config, owner, count).await?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "owner_id": owner,
                "accounts": accounts,
                "balance": summary,
            }))?
        );
        return Ok(());
    }

    println!("✅ Opened {} account(s) for owner {}:", accounts.len(), owner);
    for account in &accounts {
        println!("   {}", account);
        println!("      Account number: {}", account.account_number);
        println!("      IBAN:           {}", account.iban.to_print_format());
    }
    println!();
    println!("📊 Balance summary: {}", summary);
    Ok(())
}
