//! Handlers for the `/auth` resource (register, login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use grimoire_core::error::CoreError;
use grimoire_core::types::{DbId, Timestamp};
use grimoire_core::users::{normalize_email, NewUser, User};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info. Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and return an access token for it.
pub async fn register(
    State(state): State<AppState>,
    Json(mut input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.username = input.username.trim().to_string();
    input.email = normalize_email(&input.email);
    input.validate()?;
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    if state.users.find_by_email(&input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .users
        .create(&NewUser {
            username: input.username,
            email: input.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response = build_auth_response(&state, user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&input.email);

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(build_auth_response(&state, user)?))
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserInfo>> {
    // A valid token for a user that no longer exists is treated as unauthenticated.
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.into(),
    })
}
