//! Account repository contract
//!
//! What the orchestration layer needs from whatever stores accounts.

use crate::error::PersistenceResult;
use async_trait::async_trait;
use ibank_core::{AccountNumber, AccountStatus, BankAccount, Iban, NewBankAccount};
use rust_decimal::Decimal;

/// Storage for bank accounts.
///
/// Implementations must enforce uniqueness of both the account number and
/// the IBAN at write time and report a clash as
/// `PersistenceError::DuplicateKey`, leaving the store unchanged. The
/// identifier generator relies on this to turn probabilistic uniqueness
/// into a guarantee.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account and assign its id
    async fn create(&self, account: NewBankAccount) -> PersistenceResult<BankAccount>;

    async fn get_by_id(&self, id: u64) -> PersistenceResult<BankAccount>;

    async fn get_by_iban(&self, iban: &Iban) -> PersistenceResult<BankAccount>;

    /// All accounts of one owner, oldest first
    async fn get_all_by_owner(&self, owner_id: u64) -> PersistenceResult<Vec<BankAccount>>;

    /// The owner's oldest PRIMARY account; `NotFound` when there is none
    async fn get_primary_by_owner(&self, owner_id: u64) -> PersistenceResult<BankAccount>;

    /// Returns false when no account has this id
    async fn delete_by_id(&self, id: u64) -> PersistenceResult<bool>;

    /// Returns false when no account has this id
    async fn update_status(&self, id: u64, status: AccountStatus) -> PersistenceResult<bool>;

    /// False for unknown account numbers
    async fn is_account_active(&self, account_number: &AccountNumber) -> PersistenceResult<bool>;

    /// Set the balance of an account
    async fn update_balance(&self, id: u64, amount: Decimal) -> PersistenceResult<()>;
}
