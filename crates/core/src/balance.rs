//! # Balance Module
//!
//! Per-owner balance summary with one slot per account type.

use crate::account::{AccountType, BankAccount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Balance of one account per account type.
///
/// Each slot holds the balance of a single account, not a total. When an
/// owner has several accounts of the same type the last one seen wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub primary_balance: Decimal,
    pub saving_balance: Decimal,
}

impl BalanceSummary {
    /// Every slot at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Reduce an owner's accounts to a summary.
    ///
    /// # Examples
    /// ```
    /// use ibank_core::{AccountType, BalanceSummary};
    /// use rust_decimal_macros::dec;
    ///
    /// let summary = BalanceSummary::from_entries([
    ///     (AccountType::Primary, dec!(100)),
    ///     (AccountType::Primary, dec!(200)),
    /// ]);
    /// assert_eq!(summary.get(AccountType::Primary), dec!(200));
    /// assert_eq!(summary.get(AccountType::Savings), dec!(0));
    /// ```
    pub fn aggregate<'a, I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = &'a BankAccount>,
    {
        Self::from_entries(
            accounts
                .into_iter()
                .map(|account| (account.account_type, account.balance)),
        )
    }

    /// Same reduction over bare `(type, balance)` pairs
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (AccountType, Decimal)>,
    {
        entries
            .into_iter()
            .fold(Self::zero(), |mut summary, (account_type, balance)| {
                summary.set(account_type, balance);
                summary
            })
    }

    /// Reduction over raw category strings; categories that are not a
    /// known account type are skipped.
    pub fn from_raw<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        Self::from_entries(entries.into_iter().filter_map(|(category, balance)| {
            category
                .parse::<AccountType>()
                .ok()
                .map(|account_type| (account_type, balance))
        }))
    }

    pub fn get(&self, account_type: AccountType) -> Decimal {
        match account_type {
            AccountType::Primary => self.primary_balance,
            AccountType::Savings => self.saving_balance,
        }
    }

    /// Overwrite the slot for `account_type`
    pub fn set(&mut self, account_type: AccountType, balance: Decimal) {
        let slot = match account_type {
            AccountType::Primary => &mut self.primary_balance,
            AccountType::Savings => &mut self.saving_balance,
        };
        *slot = balance;
    }

    /// `(type, balance)` for every slot, in `AccountType::all_types` order
    pub fn iter(&self) -> impl Iterator<Item = (AccountType, Decimal)> + '_ {
        AccountType::all_types()
            .into_iter()
            .map(move |account_type| (account_type, self.get(account_type)))
    }
}

impl fmt::Display for BalanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(account_type, balance)| format!("{}: {}", account_type, balance))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
