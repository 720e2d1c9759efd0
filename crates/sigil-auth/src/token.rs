//! App-scoped bearer token issuance.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, Result};
use crate::models::{App, User};

/// Claim set embedded in issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: i64,
    /// The user's email.
    pub email: String,
    /// The app the token is scoped to.
    pub app_id: i64,
    /// Absolute expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Time source for token expiry.
///
/// Injected so issuance is deterministic under test.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now_unix(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs() as i64
    }
}

/// Signs time-bounded bearer tokens with an app's symmetric secret.
#[derive(Clone)]
pub struct TokenIssuer {
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Creates an issuer reading the current time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Builds and signs `{sub, email, app_id, exp}` with the app's secret.
    ///
    /// An empty secret is a configuration error, rejected before any signing
    /// work.
    pub fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String> {
        if app.secret.is_empty() {
            return Err(AuthError::Signing(format!("app {} has no secret", app.id)));
        }

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            app_id: app.id,
            exp: self.clock.now_unix() + ttl.as_secs() as i64,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(app.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_unix(&self) -> i64 {
            self.0
        }
    }

    fn decode_claims(token: &str, secret: &str) -> Claims {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .unwrap()
            .claims
    }

    fn user() -> User {
        User {
            id: 1,
            email: "a@x.com".into(),
            password_hash: "$argon2id$...".into(),
        }
    }

    fn app() -> App {
        App {
            id: 1,
            name: "web".into(),
            secret: "s3cr3t".into(),
        }
    }

    #[test]
    fn claims_match_inputs_exactly() {
        let issuer = TokenIssuer::new(Arc::new(FixedClock(1_700_000_000)));
        let token = issuer
            .issue(&user(), &app(), Duration::from_secs(3600))
            .unwrap();

        let claims = decode_claims(&token, "s3cr3t");
        assert_eq!(
            claims,
            Claims {
                sub: 1,
                email: "a@x.com".into(),
                app_id: 1,
                exp: 1_700_000_000 + 3600,
            }
        );
    }

    #[test]
    fn issuance_is_deterministic_under_a_fixed_clock() {
        let issuer = TokenIssuer::new(Arc::new(FixedClock(1_700_000_000)));
        let a = issuer
            .issue(&user(), &app(), Duration::from_secs(60))
            .unwrap();
        let b = issuer
            .issue(&user(), &app(), Duration::from_secs(60))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signature_requires_the_app_secret() {
        let issuer = TokenIssuer::new(Arc::new(FixedClock(1_700_000_000)));
        let token = issuer
            .issue(&user(), &app(), Duration::from_secs(60))
            .unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let forged = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &validation,
        );
        assert!(forged.is_err());
    }

    #[test]
    fn empty_secret_is_a_signing_error() {
        let issuer = TokenIssuer::new(Arc::new(FixedClock(0)));
        let mut app = app();
        app.secret.clear();

        let err = issuer
            .issue(&user(), &app, Duration::from_secs(60))
            .unwrap_err();
        assert!(matches!(err, AuthError::Signing(_)));
    }
}
