//! # Ibank Persistence
//!
//! The storage collaborator of account creation and balance inquiry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ibank_persistence::{AccountRepository, InMemoryAccountRepo};
//!
//! let repo = InMemoryAccountRepo::new();
//! match repo.create(new_account).await {
//!     Ok(account) => println!("stored #{}", account.id),
//!     Err(e) if e.is_duplicate_key() => { /* generate new identifiers and retry */ }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod error;
pub mod memory;
pub mod repository;

pub use error::{PersistenceError, PersistenceResult};
pub use memory::InMemoryAccountRepo;
pub use repository::AccountRepository;
