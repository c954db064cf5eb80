//! Axum route handlers for accounts.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::auth::{AuthError, AuthUser};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::require_text;
use crate::models::user::{normalize_email, NewUser, PublicUser, User};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    pub weight_setup_dismissed: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: PublicUser,
}

fn session(state: &AppState, user: &User) -> Result<SessionResponse, AppError> {
    let token = issue_token(
        user.id,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;
    Ok(SessionResponse {
        token,
        user: PublicUser::from(user),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let email = normalize_email(&require_text("email", &request.email)?);
    let name = require_text("name", &request.name)?;
    if request.password.is_empty() {
        return Err(AppError::Validation("password cannot be empty".to_string()));
    }

    // The unique index still settles concurrent registrations.
    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Validation("User already exists".to_string()));
    }

    let password_hash = hash_password(request.password, state.config.bcrypt_cost).await?;
    let user = state
        .store
        .create_user(NewUser {
            email,
            name,
            password_hash,
        })
        .await?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(session(&state, &user)?)))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let email = normalize_email(&request.email);
    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(request.password, user.password_hash.clone()).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(Json(session(&state, &user)?))
}

/// GET /api/auth/profile
pub async fn handle_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = state
        .store
        .find_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(PublicUser::from(&user)))
}

/// PUT /api/auth/preferences
///
/// Persists whether the user dismissed the weight-setup prompt.
pub async fn handle_update_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<PreferencesRequest>,
) -> Result<Json<PublicUser>, AppError> {
    let user = state
        .store
        .set_weight_setup_dismissed(auth.user_id, request.weight_setup_dismissed)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(PublicUser::from(&user)))
}
