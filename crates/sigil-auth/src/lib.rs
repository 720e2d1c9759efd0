//! Authentication and token issuance for Sigil.
//!
//! This crate provides:
//! - **Credential hashing**: salted argon2id password storage with a tunable
//!   work factor
//! - **Token issuance**: HS256-signed bearer tokens scoped to a requesting app
//! - **Account store port**: the persistence contract the engine depends on
//! - **Authentication engine**: the `register_new_user` and `login` flows
//!
//! # Example
//!
//! ```
//! use sigil_auth::{CredentialHasher, HasherParams};
//!
//! let hasher = CredentialHasher::new(HasherParams::default()).unwrap();
//!
//! // Two hashes of the same password differ (fresh salt), both verify.
//! let stored = hasher.hash("hunter2").unwrap();
//! assert_ne!(stored, hasher.hash("hunter2").unwrap());
//! assert!(hasher.verify("hunter2", &stored));
//! assert!(!hasher.verify("wrong", &stored));
//! ```

mod engine;
mod error;
mod hasher;
mod models;
mod store;
mod token;

pub use engine::AuthEngine;
pub use error::{AuthError, Result};
pub use hasher::{CredentialHasher, HasherParams};
pub use models::{App, User};
pub use store::{AccountStore, StoreError};
pub use token::{Claims, Clock, SystemClock, TokenIssuer};
