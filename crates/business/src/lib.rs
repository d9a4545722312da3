//! # Ibank Business
//!
//! Orchestration layer - account creation with identifier retry, lookup,
//! status updates and balance inquiry.

pub mod account;
pub mod config;
pub mod error;
pub mod identity;
pub mod services;

pub use account::AccountService;
pub use config::ServiceConfig;
pub use error::{BusinessError, BusinessResult};
pub use identity::{Identity, IdentityProvider, StaticIdentity};
pub use services::ServiceContext;
