//! The authentication engine: registration, login, token issuance.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{AuthError, Result};
use crate::hasher::CredentialHasher;
use crate::store::{AccountStore, StoreError};
use crate::token::TokenIssuer;

/// Orchestrates the credential hasher, account store, and token issuer.
///
/// The engine is stateless: it holds no mutable fields, so concurrent
/// `register_new_user`/`login` calls need no locking. Hashing runs on the
/// blocking thread pool so CPU-bound argon2 work never stalls the executor.
#[derive(Clone)]
pub struct AuthEngine {
    store: Arc<dyn AccountStore>,
    hasher: CredentialHasher,
    issuer: TokenIssuer,
    token_ttl: Duration,
}

impl AuthEngine {
    /// Creates an engine over the given store, hasher, and issuer.
    ///
    /// `token_ttl` is the lifetime of every issued token.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: CredentialHasher,
        issuer: TokenIssuer,
        token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
            token_ttl,
        }
    }

    /// Registers a new user and returns the assigned id.
    ///
    /// Empty credentials are rejected here as well as at the RPC boundary,
    /// since the engine may be called directly.
    pub async fn register_new_user(&self, email: &str, password: &str) -> Result<i64> {
        if email.is_empty() {
            return Err(AuthError::InvalidInput("email is required"));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password is required"));
        }

        tracing::info!(email, "registering user");

        let password_hash = self.hash_off_thread(password.to_owned()).await?;

        let user_id = match self.store.save_user(email, &password_hash).await {
            Ok(id) => id,
            Err(StoreError::UserExists) => {
                tracing::warn!(email, "registration conflict");
                return Err(AuthError::UserAlreadyExists);
            }
            Err(e) => return Err(AuthError::Storage(format!("save_user: {e}"))),
        };

        tracing::info!(user_id, "user registered");

        Ok(user_id)
    }

    /// Verifies credentials and issues a token scoped to `app_id`.
    ///
    /// An unknown email and a wrong password produce the identical
    /// [`AuthError::InvalidCredentials`], so login failures never reveal
    /// whether the account exists.
    pub async fn login(&self, email: &str, password: &str, app_id: i64) -> Result<String> {
        if email.is_empty() {
            return Err(AuthError::InvalidInput("email is required"));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password is required"));
        }

        tracing::info!(app_id, "attempting login");

        let user = match self.store.user_by_email(email).await {
            Ok(user) => user,
            Err(StoreError::UserNotFound) => {
                tracing::warn!("login failed: user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::Storage(format!("user_by_email: {e}"))),
        };

        let matched = self
            .verify_off_thread(password.to_owned(), user.password_hash.clone())
            .await?;
        if !matched {
            tracing::warn!(user_id = user.id, "login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match self.store.app_by_id(app_id).await {
            Ok(app) => app,
            Err(StoreError::AppNotFound) => {
                tracing::warn!(app_id, "login failed: unknown app");
                return Err(AuthError::AppNotFound);
            }
            Err(e) => return Err(AuthError::Storage(format!("app_by_id: {e}"))),
        };

        let token = self.issuer.issue(&user, &app, self.token_ttl)?;

        tracing::info!(user_id = user.id, app_id, "login succeeded");

        Ok(token)
    }

    async fn hash_off_thread(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Crypto(e.to_string()))?
    }

    async fn verify_off_thread(&self, password: String, stored: String) -> Result<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| AuthError::Crypto(e.to_string()))
    }
}
