//! HTTP API for the Sigil node.
//!
//! Translates wire requests into engine calls and engine errors into
//! status codes. This is the only layer that chooses user-visible messages.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sigil_auth::{AuthEngine, AuthError};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The authentication engine.
    pub engine: AuthEngine,
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==================== Request/Response Types ====================

/// Request to register a new user.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
}

/// Request to log in against an app.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub app_id: i64,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Wrapper mapping engine errors onto HTTP responses.
struct ApiError(AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal-class errors get an opaque body; the detail stays in logs.
        let (status, message) = match &self.0 {
            AuthError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            AuthError::UserAlreadyExists => (StatusCode::CONFLICT, self.0.to_string()),
            AuthError::AppNotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            AuthError::Storage(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "storage unavailable".to_string(),
            ),
            AuthError::Signing(_) | AuthError::Crypto(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// ==================== Handlers ====================

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// Registers a new user account.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.email.is_empty() {
        return Err(AuthError::InvalidInput("email is required").into());
    }
    if req.password.is_empty() {
        return Err(AuthError::InvalidInput("password is required").into());
    }

    let user_id = state
        .engine
        .register_new_user(&req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

/// Verifies credentials and returns an app-scoped token.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.email.is_empty() {
        return Err(AuthError::InvalidInput("email is required").into());
    }
    if req.password.is_empty() {
        return Err(AuthError::InvalidInput("password is required").into());
    }
    if req.app_id == 0 {
        return Err(AuthError::InvalidInput("app_id is required").into());
    }

    let token = state
        .engine
        .login(&req.email, &req.password, req.app_id)
        .await?;

    Ok(Json(LoginResponse { token }))
}
