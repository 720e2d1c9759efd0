//! Account store port.
//!
//! Defines the persistence contract the engine depends on, enabling
//! pluggable backends and an in-memory fake for tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{App, User};

/// Errors surfaced by account store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Email uniqueness conflict on user creation.
    #[error("user already exists")]
    UserExists,

    /// No user with the given email.
    #[error("user not found")]
    UserNotFound,

    /// No app with the given id.
    #[error("app not found")]
    AppNotFound,

    /// Transient infrastructure failure (connection loss, timeout).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Trait for account storage backends.
///
/// Implementations own user and app records; the engine never touches a
/// concrete backend directly. User creation must be atomic: a uniqueness
/// conflict leaves no partial state behind.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new user, returning the assigned id.
    ///
    /// Fails with [`StoreError::UserExists`] on an email uniqueness conflict.
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError>;

    /// Looks up a user by email.
    async fn user_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Looks up an app by id.
    async fn app_by_id(&self, id: i64) -> Result<App, StoreError>;
}
