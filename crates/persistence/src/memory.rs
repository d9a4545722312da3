//! In-memory account store
//!
//! Keeps accounts in a `BTreeMap` keyed by id with unique indexes on
//! account number and IBAN.

use crate::error::{PersistenceError, PersistenceResult};
use crate::repository::AccountRepository;
use async_trait::async_trait;
use chrono::Utc;
use ibank_core::{AccountNumber, AccountStatus, AccountType, BankAccount, Iban, NewBankAccount};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    last_id: u64,
    accounts: BTreeMap<u64, BankAccount>,
    by_account_number: HashMap<AccountNumber, u64>,
    by_iban: HashMap<Iban, u64>,
}

/// Repository backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryAccountRepo {
    store: RwLock<Store>,
}

impl InMemoryAccountRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.store.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepo {
    async fn create(&self, account: NewBankAccount) -> PersistenceResult<BankAccount> {
        let mut store = self.store.write().await;

        if store.by_account_number.contains_key(&account.account_number) {
            return Err(PersistenceError::duplicate_key(
                "account_number",
                &account.account_number,
            ));
        }
        if store.by_iban.contains_key(&account.iban) {
            return Err(PersistenceError::duplicate_key("iban", &account.iban));
        }

        store.last_id += 1;
        let id = store.last_id;
        let account = account.into_account(id);

        store
            .by_account_number
            .insert(account.account_number.clone(), id);
        store.by_iban.insert(account.iban.clone(), id);
        store.accounts.insert(id, account.clone());

        Ok(account)
    }

    async fn get_by_id(&self, id: u64) -> PersistenceResult<BankAccount> {
        self.store
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found("BankAccount", format!("id {}", id)))
    }

    async fn get_by_iban(&self, iban: &Iban) -> PersistenceResult<BankAccount> {
        let store = self.store.read().await;
        store
            .by_iban
            .get(iban)
            .and_then(|id| store.accounts.get(id))
            .cloned()
            .ok_or_else(|| PersistenceError::not_found("BankAccount", format!("iban {}", iban)))
    }

    async fn get_all_by_owner(&self, owner_id: u64) -> PersistenceResult<Vec<BankAccount>> {
        let store = self.store.read().await;
        Ok(store
            .accounts
            .values()
            .filter(|account| account.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_primary_by_owner(&self, owner_id: u64) -> PersistenceResult<BankAccount> {
        let store = self.store.read().await;
        store
            .accounts
            .values()
            .find(|account| {
                account.owner_id == owner_id && account.account_type == AccountType::Primary
            })
            .cloned()
            .ok_or_else(|| {
                PersistenceError::not_found("BankAccount", format!("primary of owner {}", owner_id))
            })
    }

    async fn delete_by_id(&self, id: u64) -> PersistenceResult<bool> {
        let mut store = self.store.write().await;
        let Some(account) = store.accounts.remove(&id) else {
            return Ok(false);
        };
        store.by_account_number.remove(&account.account_number);
        store.by_iban.remove(&account.iban);
        Ok(true)
    }

    async fn update_status(&self, id: u64, status: AccountStatus) -> PersistenceResult<bool> {
        let mut store = self.store.write().await;
        match store.accounts.get_mut(&id) {
            Some(account) => {
                account.status = status;
                account.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn is_account_active(&self, account_number: &AccountNumber) -> PersistenceResult<bool> {
        let store = self.store.read().await;
        Ok(store
            .by_account_number
            .get(account_number)
            .and_then(|id| store.accounts.get(id))
            .is_some_and(BankAccount::is_active))
    }

    async fn update_balance(&self, id: u64, amount: Decimal) -> PersistenceResult<()> {
        let mut store = self.store.write().await;
        let account = store
            .accounts
            .get_mut(&id)
            .ok_or_else(|| PersistenceError::not_found("BankAccount", format!("id {}", id)))?;
        account.balance = amount;
        account.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ibank_core::{AccountDraft, AccountType, BbanLayout};
    use rust_decimal_macros::dec;

    fn new_account(owner_id: u64, account_type: AccountType, suffix: u32) -> NewBankAccount {
        let created = Utc.with_ymd_and_hms(2020, 1, 1, 8, 0, 0).unwrap();
        let draft = AccountDraft::new(owner_id, account_type, "EUR", "DE", "NWBK", "601613");
        let number = AccountNumber::compose(created, suffix);
        let iban = Iban::build(
            &BbanLayout::default(),
            &draft.country_code,
            &draft.bank_identifier,
            &draft.branch_code,
            number.as_str(),
        )
        .unwrap();
        NewBankAccount::from_draft(&draft, number, iban, created)
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let repo = InMemoryAccountRepo::new();
        let first = repo.create(new_account(1, AccountType::Primary, 100_001)).await.unwrap();
        let second = repo.create(new_account(1, AccountType::Savings, 100_002)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.len().await, 2);
        assert_eq!(repo.get_by_id(2).await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_duplicate_account_number_rejected() {
        let repo = InMemoryAccountRepo::new();
        repo.create(new_account(1, AccountType::Primary, 123_456)).await.unwrap();

        let err = repo
            .create(new_account(2, AccountType::Savings, 123_456))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_key());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_iban_rejected() {
        let repo = InMemoryAccountRepo::new();
        let original = repo.create(new_account(1, AccountType::Primary, 123_456)).await.unwrap();

        let mut clash = new_account(2, AccountType::Savings, 654_321);
        clash.iban = original.iban.clone();
        let err = repo.create(clash).await.unwrap_err();

        assert_eq!(err, PersistenceError::duplicate_key("iban", &original.iban));
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = InMemoryAccountRepo::new();
        let a = repo.create(new_account(1, AccountType::Primary, 111_111)).await.unwrap();
        repo.create(new_account(2, AccountType::Primary, 222_222)).await.unwrap();
        let c = repo.create(new_account(1, AccountType::Savings, 333_333)).await.unwrap();

        assert_eq!(repo.get_by_iban(&a.iban).await.unwrap().id, a.id);

        let owned = repo.get_all_by_owner(1).await.unwrap();
        assert_eq!(owned.iter().map(|acc| acc.id).collect::<Vec<_>>(), vec![a.id, c.id]);
        assert!(repo.get_all_by_owner(99).await.unwrap().is_empty());

        assert!(repo.get_by_id(42).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_primary_by_owner() {
        let repo = InMemoryAccountRepo::new();
        repo.create(new_account(1, AccountType::Savings, 111_111)).await.unwrap();
        let primary = repo.create(new_account(1, AccountType::Primary, 222_222)).await.unwrap();
        repo.create(new_account(1, AccountType::Primary, 333_333)).await.unwrap();
        repo.create(new_account(2, AccountType::Savings, 444_444)).await.unwrap();

        assert_eq!(repo.get_primary_by_owner(1).await.unwrap().id, primary.id);

        let err = repo.get_primary_by_owner(2).await.unwrap_err();
        assert_eq!(err, PersistenceError::not_found("BankAccount", "primary of owner 2"));
        assert!(repo.get_primary_by_owner(99).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_frees_identifiers() {
        let repo = InMemoryAccountRepo::new();
        let account = repo.create(new_account(1, AccountType::Primary, 123_456)).await.unwrap();

        assert!(repo.delete_by_id(account.id).await.unwrap());
        assert!(!repo.delete_by_id(account.id).await.unwrap());
        assert!(repo.get_by_iban(&account.iban).await.unwrap_err().is_not_found());
        assert!(repo.is_empty().await);

        repo.create(new_account(1, AccountType::Primary, 123_456)).await.unwrap();
    }

    #[tokio::test]
    async fn test_status_and_activity() {
        let repo = InMemoryAccountRepo::new();
        let account = repo.create(new_account(1, AccountType::Primary, 123_456)).await.unwrap();

        assert!(repo.is_account_active(&account.account_number).await.unwrap());
        assert!(repo.update_status(account.id, AccountStatus::Blocked).await.unwrap());
        assert!(!repo.is_account_active(&account.account_number).await.unwrap());
        assert!(!repo.update_status(999, AccountStatus::Active).await.unwrap());

        let updated = repo.get_by_id(account.id).await.unwrap();
        assert_eq!(updated.status, AccountStatus::Blocked);
        assert!(updated.updated_at > account.updated_at);

        let unknown = AccountNumber::parse("99999999999999999999").unwrap();
        assert!(!repo.is_account_active(&unknown).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_balance() {
        let repo = InMemoryAccountRepo::new();
        let account = repo.create(new_account(1, AccountType::Savings, 123_456)).await.unwrap();

        repo.update_balance(account.id, dec!(250.75)).await.unwrap();
        assert_eq!(repo.get_by_id(account.id).await.unwrap().balance, dec!(250.75));

        assert!(repo.update_balance(77, dec!(1)).await.unwrap_err().is_not_found());
    }
}
