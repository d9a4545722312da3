//! Service context
//!
//! Bundles the collaborators every business operation needs.

use crate::config::ServiceConfig;
use crate::error::BusinessResult;
use crate::identity::IdentityProvider;
use ibank_core::IdentifierGenerator;
use ibank_persistence::AccountRepository;
use std::sync::Arc;

/// Context for business operations - storage, identity, identifier generation
pub struct ServiceContext {
    accounts: Arc<dyn AccountRepository>,
    identity: Arc<dyn IdentityProvider>,
    generator: IdentifierGenerator,
    config: ServiceConfig,
}

impl ServiceContext {
    /// Context with the system clock and thread-local randomness
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        identity: Arc<dyn IdentityProvider>,
        config: ServiceConfig,
    ) -> BusinessResult<Self> {
        Self::with_generator(accounts, identity, IdentifierGenerator::system(), config)
    }

    /// Context with a caller-supplied generator. The BBAN layout always
    /// comes from `config`.
    pub fn with_generator(
        accounts: Arc<dyn AccountRepository>,
        identity: Arc<dyn IdentityProvider>,
        generator: IdentifierGenerator,
        config: ServiceConfig,
    ) -> BusinessResult<Self> {
        config.validate()?;
        Ok(Self {
            accounts,
            identity,
            generator: generator.with_layout(config.bban_layout),
            config,
        })
    }

    pub fn accounts(&self) -> &dyn AccountRepository {
        self.accounts.as_ref()
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn generator(&self) -> &IdentifierGenerator {
        &self.generator
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use ibank_core::BbanLayout;
    use ibank_persistence::InMemoryAccountRepo;

    #[test]
    fn test_layout_comes_from_config() {
        let config = ServiceConfig {
            bban_layout: BbanLayout::new(8, 2, 20),
            ..ServiceConfig::default()
        };
        let ctx = ServiceContext::new(
            Arc::new(InMemoryAccountRepo::new()),
            Arc::new(StaticIdentity::anonymous()),
            config,
        )
        .unwrap();

        assert_eq!(*ctx.generator().layout(), BbanLayout::new(8, 2, 20));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ServiceConfig {
            max_generation_attempts: 0,
            ..ServiceConfig::default()
        };
        let result = ServiceContext::new(
            Arc::new(InMemoryAccountRepo::new()),
            Arc::new(StaticIdentity::anonymous()),
            config,
        );
        assert!(result.is_err());
    }
}
