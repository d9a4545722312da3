//! # Account Module
//!
//! Bank account records: the draft submitted on creation, the record ready
//! to be persisted, and the persisted record itself.

use crate::account_number::AccountNumber;
use crate::error::CoreError;
use crate::iban::Iban;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account category used to bucket balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Everyday account
    Primary,
    /// Savings account
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Primary => "PRIMARY",
            AccountType::Savings => "SAVINGS",
        }
    }

    /// All account types, in summary order
    pub fn all_types() -> [AccountType; 2] {
        [AccountType::Primary, AccountType::Savings]
    }
}

impl FromStr for AccountType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRIMARY" => Ok(AccountType::Primary),
            "SAVINGS" | "SAVING" => Ok(AccountType::Savings),
            _ => Err(CoreError::UnknownAccountType(s.to_string())),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Blocked,
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
            AccountStatus::Blocked => "BLOCKED",
            AccountStatus::Closed => "CLOSED",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(AccountStatus::Active),
            "INACTIVE" => Ok(AccountStatus::Inactive),
            "BLOCKED" => Ok(AccountStatus::Blocked),
            "CLOSED" => Ok(AccountStatus::Closed),
            _ => Err(CoreError::UnknownAccountStatus(s.to_string())),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input to account creation, before any identifier exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub owner_id: u64,
    pub account_type: AccountType,
    /// ISO 4217 currency code
    pub currency: String,
    /// ISO 3166 alpha-2 country code
    pub country_code: String,
    pub bank_identifier: String,
    pub branch_code: String,
}

impl AccountDraft {
    pub fn new(
        owner_id: u64,
        account_type: AccountType,
        currency: &str,
        country_code: &str,
        bank_identifier: &str,
        branch_code: &str,
    ) -> Self {
        Self {
            owner_id,
            account_type,
            currency: currency.to_uppercase(),
            country_code: country_code.to_string(),
            bank_identifier: bank_identifier.to_string(),
            branch_code: branch_code.to_string(),
        }
    }
}

/// A fully identified account that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBankAccount {
    pub owner_id: u64,
    pub account_type: AccountType,
    pub account_number: AccountNumber,
    pub iban: Iban,
    pub country_code: String,
    pub bank_identifier: String,
    pub branch_code: String,
    pub currency: String,
    pub balance: Decimal,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewBankAccount {
    /// Attach generated identifiers to a draft. New accounts start ACTIVE
    /// with a zero balance.
    ///
    /// Country, bank and branch are stored upper-cased, the same form the
    /// IBAN carries them in.
    pub fn from_draft(
        draft: &AccountDraft,
        account_number: AccountNumber,
        iban: Iban,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id: draft.owner_id,
            account_type: draft.account_type,
            account_number,
            iban,
            country_code: draft.country_code.to_ascii_uppercase(),
            bank_identifier: draft.bank_identifier.to_ascii_uppercase(),
            branch_code: draft.branch_code.to_ascii_uppercase(),
            currency: draft.currency.clone(),
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assign the storage id
    pub fn into_account(self, id: u64) -> BankAccount {
        BankAccount {
            id,
            owner_id: self.owner_id,
            account_type: self.account_type,
            account_number: self.account_number,
            iban: self.iban,
            country_code: self.country_code,
            bank_identifier: self.bank_identifier,
            branch_code: self.branch_code,
            currency: self.currency,
            balance: self.balance,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A persisted bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: u64,
    pub owner_id: u64,
    pub account_type: AccountType,
    pub account_number: AccountNumber,
    pub iban: Iban,
    pub country_code: String,
    pub bank_identifier: String,
    pub branch_code: String,
    pub currency: String,
    pub balance: Decimal,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account #{} {} {} (owner: {}, balance: {} {}, status: {})",
            self.id,
            self.account_type,
            self.iban,
            self.owner_id,
            self.balance,
            self.currency,
            self.status
        )
    }
}
