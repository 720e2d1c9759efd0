//! Password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Tunable argon2id work factor.
///
/// The parameters are recorded in each PHC hash string, so raising them only
/// affects new hashes; existing hashes keep verifying with the parameters
/// they were created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasherParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HasherParams {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// One-way transform of plaintext passwords into a salted, storage-safe form.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Creates a hasher with the given work factor.
    pub fn new(params: HasherParams) -> Result<Self> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| AuthError::Crypto(e.to_string()))?;

        Ok(Self { params })
    }

    fn context(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a fresh random salt.
    ///
    /// Two calls on the same plaintext produce different strings; both verify.
    /// Fails only if the system randomness source or the argon2 computation
    /// itself fails.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.context()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Crypto(e.to_string()))
    }

    /// Verifies a plaintext against a stored PHC hash string.
    ///
    /// A malformed stored hash counts as a mismatch rather than an error, so
    /// corrupt rows behave like a wrong password instead of crashing the
    /// login path.
    pub fn verify(&self, plaintext: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };

        self.context()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
