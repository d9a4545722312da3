//! Identity collaborator
//!
//! Resolves who is calling. Session handling lives outside this crate; the
//! service only needs the owner id.

use crate::error::{BusinessError, BusinessResult};
use serde::{Deserialize, Serialize};

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Owner id used on bank accounts
    pub id: u64,
    pub username: String,
}

impl Identity {
    pub fn new(id: u64, username: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
        }
    }
}

pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> BusinessResult<Identity>;
}

/// Always resolves to the same identity, or to none
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Provider with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> BusinessResult<Identity> {
        self.identity.clone().ok_or_else(|| {
            BusinessError::IdentityUnavailable("no authenticated user".to_string()).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity() {
        let provider = StaticIdentity::new(Identity::new(42, "alice"));
        let identity = provider.current_identity().unwrap();
        assert_eq!(identity.id, 42);
        assert_eq!(identity.username, "alice");
    }

    #[test]
    fn test_anonymous() {
        let err = StaticIdentity::anonymous().current_identity().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BusinessError>(),
            Some(BusinessError::IdentityUnavailable(_))
        ));
    }
}
