//! Account operations - create, lookup, status, balance inquiry
//!
//! AccountService owns the retry loop around identifier generation: the
//! generator only makes collisions unlikely, the repository rejects them,
//! and this layer generates again.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use anyhow::Context;
use ibank_core::{
    AccountDraft, AccountNumber, AccountStatus, AccountType, BalanceSummary, BankAccount, Clock,
    Iban, NewBankAccount,
};
use ibank_persistence::PersistenceError;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Account Service - handles creation, lookup and balance operations
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an account with a fresh account number and IBAN.
    ///
    /// Invalid drafts fail on the first attempt. Duplicate identifiers are
    /// regenerated up to `max_generation_attempts` times.
    pub async fn create_bank_account(&self, draft: &AccountDraft) -> BusinessResult<BankAccount> {
        let generator = self.ctx.generator();
        let max_attempts = self.ctx.config().max_generation_attempts;

        for attempt in 1..=max_attempts {
            let (account_number, iban) = generator.generate(draft).map_err(BusinessError::from)?;
            let now = generator.clock().now();
            let new_account = NewBankAccount::from_draft(draft, account_number, iban, now);

            match self.ctx.accounts().create(new_account).await {
                Ok(account) => {
                    info!(
                        id = account.id,
                        owner_id = account.owner_id,
                        account_type = %account.account_type,
                        iban = %account.iban,
                        attempt,
                        "bank account created"
                    );
                    return Ok(account);
                }
                Err(e) if e.is_duplicate_key() => {
                    warn!(attempt, max_attempts, error = %e, "identifier collision, regenerating");
                }
                Err(e) => {
                    return Err(BusinessError::from(e)).context("Failed to store bank account");
                }
            }
        }

        Err(BusinessError::IdentifierSpaceExhausted {
            attempts: max_attempts,
        }
        .into())
    }

    pub async fn get_bank_account(&self, id: u64) -> BusinessResult<BankAccount> {
        self.ctx
            .accounts()
            .get_by_id(id)
            .await
            .map_err(|e| not_found_or(e, || BusinessError::account_not_found(id)))
    }

    /// Look up by IBAN in electronic or print format
    pub async fn get_by_iban(&self, iban: &str) -> BusinessResult<BankAccount> {
        let iban = Iban::parse(iban).map_err(BusinessError::from)?;
        self.ctx
            .accounts()
            .get_by_iban(&iban)
            .await
            .map_err(|e| not_found_or(e, || BusinessError::AccountNotFound(format!("iban {}", iban))))
    }

    /// The owner's primary account
    pub async fn get_primary_account(&self, owner_id: u64) -> BusinessResult<BankAccount> {
        self.ctx
            .accounts()
            .get_primary_by_owner(owner_id)
            .await
            .map_err(|e| {
                not_found_or(e, || {
                    BusinessError::AccountNotFound(format!("primary account of owner {}", owner_id))
                })
            })
    }

    /// Returns false when the account does not exist
    pub async fn delete_bank_account(&self, id: u64) -> BusinessResult<bool> {
        let deleted = self
            .ctx
            .accounts()
            .delete_by_id(id)
            .await
            .map_err(BusinessError::from)?;
        if deleted {
            info!(id, "bank account deleted");
        }
        Ok(deleted)
    }

    /// Returns false when the account does not exist
    pub async fn update_bank_account_status(
        &self,
        id: u64,
        status: AccountStatus,
    ) -> BusinessResult<bool> {
        let updated = self
            .ctx
            .accounts()
            .update_status(id, status)
            .await
            .map_err(BusinessError::from)?;
        if updated {
            info!(id, %status, "bank account status updated");
        }
        Ok(updated)
    }

    pub async fn is_account_active(&self, account_number: &str) -> BusinessResult<bool> {
        let account_number = AccountNumber::parse(account_number).map_err(BusinessError::from)?;
        Ok(self
            .ctx
            .accounts()
            .is_account_active(&account_number)
            .await
            .map_err(BusinessError::from)?)
    }

    pub async fn update_balance(&self, id: u64, amount: Decimal) -> BusinessResult<()> {
        self.ctx
            .accounts()
            .update_balance(id, amount)
            .await
            .map_err(|e| not_found_or(e, || BusinessError::account_not_found(id)))
    }

    /// Balance summary of the current caller
    pub async fn get_bank_accounts_balance(&self) -> BusinessResult<BalanceSummary> {
        let identity = self
            .ctx
            .identity()
            .current_identity()
            .context("Failed to resolve current identity")?;
        self.balance_for_owner(identity.id).await
    }

    /// Balance summary of one owner.
    ///
    /// Several accounts of the same type collapse to the last one listed;
    /// that case is logged so it can be spotted.
    pub async fn balance_for_owner(&self, owner_id: u64) -> BusinessResult<BalanceSummary> {
        let accounts = self
            .ctx
            .accounts()
            .get_all_by_owner(owner_id)
            .await
            .map_err(BusinessError::from)?;

        for account_type in AccountType::all_types() {
            let count = accounts
                .iter()
                .filter(|account| account.account_type == account_type)
                .count();
            if count > 1 {
                warn!(
                    owner_id,
                    %account_type,
                    count,
                    "several accounts share a type, summary keeps the last one"
                );
            }
        }

        let summary = BalanceSummary::aggregate(&accounts);
        debug!(owner_id, accounts = accounts.len(), %summary, "balance summary computed");
        Ok(summary)
    }
}

/// Map a repository NotFound to a business error, wrap everything else
fn not_found_or<F>(error: PersistenceError, not_found: F) -> anyhow::Error
where
    F: FnOnce() -> BusinessError,
{
    if error.is_not_found() {
        not_found().into()
    } else {
        BusinessError::from(error).into()
    }
}
