//! Domain records for the credential service.

use serde::{Deserialize, Serialize};

/// A registered user account.
///
/// Created on successful registration and immutable afterwards. The store
/// assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier assigned by the account store.
    pub id: i64,
    /// Unique email address.
    pub email: String,
    /// PHC-format argon2 hash of the password. Never the plaintext.
    pub password_hash: String,
}

/// A tenant application consuming issued tokens.
///
/// Apps are pre-provisioned; the engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Unique identifier.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Symmetric secret used to sign tokens issued for this app.
    pub secret: String,
}
