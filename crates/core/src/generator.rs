//! # Identifier Generator
//!
//! Produces account numbers and derives IBANs from account drafts.
//!
//! The generator holds no mutable state of its own; time and randomness
//! come from injected capabilities, so the same instance can be shared
//! across threads. Uniqueness is not guaranteed here: the store that
//! persists the account must reject duplicates and the caller must
//! generate again when it does.

use crate::account::AccountDraft;
use crate::account_number::{AccountNumber, SUFFIX_MAX, SUFFIX_MIN};
use crate::clock::{Clock, SystemClock};
use crate::error::CoreResult;
use crate::iban::{BbanLayout, Iban};
use crate::random::{RandomSource, ThreadRandom};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct IdentifierGenerator {
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    layout: BbanLayout,
}

impl IdentifierGenerator {
    pub fn new(clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            clock,
            random,
            layout: BbanLayout::default(),
        }
    }

    /// Process-wide wall clock and thread-local randomness
    pub fn system() -> Self {
        Self::new(SystemClock::shared(), Arc::new(ThreadRandom))
    }

    pub fn with_layout(mut self, layout: BbanLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &BbanLayout {
        &self.layout
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// 14-digit UTC timestamp followed by a 6-digit suffix in
    /// `[100000, 999999]`. Never fails.
    pub fn generate_account_number(&self) -> AccountNumber {
        let now = self.clock.now();
        let suffix = self.random.next_in_range(SUFFIX_MIN, SUFFIX_MAX);
        AccountNumber::compose(now, suffix)
    }

    /// Derive the IBAN for a draft and its account number.
    pub fn generate_iban(
        &self,
        draft: &AccountDraft,
        account_number: impl AsRef<str>,
    ) -> CoreResult<Iban> {
        Iban::build(
            &self.layout,
            &draft.country_code,
            &draft.bank_identifier,
            &draft.branch_code,
            account_number.as_ref(),
        )
    }

    /// Fresh account number plus its IBAN
    pub fn generate(&self, draft: &AccountDraft) -> CoreResult<(AccountNumber, Iban)> {
        let number = self.generate_account_number();
        let iban = self.generate_iban(draft, &number)?;
        Ok((number, iban))
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for IdentifierGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierGenerator")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
