//! # Ibank Core
//!
//! Domain types for bank account identifiers and balances:
//! - `AccountNumber`: 14-digit timestamp + 6-digit random suffix
//! - `Iban`: ISO 13616 IBAN with ISO 7064 mod-97 check digits
//! - `IdentifierGenerator`: derives both from an `AccountDraft`
//! - `BalanceSummary`: one balance per `AccountType`
//!
//! Everything in this crate is a pure computation. Time and randomness are
//! injected through `Clock` and `RandomSource`.

pub mod account;
pub mod account_number;
pub mod balance;
pub mod clock;
pub mod error;
pub mod generator;
pub mod iban;
pub mod random;

pub use account::{AccountDraft, AccountStatus, AccountType, BankAccount, NewBankAccount};
pub use account_number::AccountNumber;
pub use balance::BalanceSummary;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult};
pub use generator::IdentifierGenerator;
pub use iban::{BbanLayout, Iban};
pub use random::{RandomSource, SequenceRandom, ThreadRandom};
