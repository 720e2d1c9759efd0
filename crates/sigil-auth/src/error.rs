//! Error types for the auth crate.

use thiserror::Error;

/// Errors that can occur in authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or empty caller-supplied fields.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Unknown email or wrong password during login. The two causes are
    /// deliberately indistinguishable to callers.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Uniqueness conflict on registration.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The referenced app id has no corresponding record.
    #[error("app not found")]
    AppNotFound,

    /// Transient storage failure; the caller may retry with backoff.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// Missing or unusable app secret.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(String),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
