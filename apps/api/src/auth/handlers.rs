//! Axum handlers for registration, login, and identity lookup.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth::password::verify_password;
use crate::auth::{token, AuthUser};
use crate::errors::AppError;
use crate::extract::Json;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "name, email, and password are required".to_string(),
        ));
    }

    let user = User::create(&state.db, req.name.trim(), req.email.trim(), &req.password).await?;
    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": user,
            "message": "User registered successfully"
        })),
    ))
}

/// POST /auth/login
///
/// An unknown email and a bad password produce the same 401 so the endpoint
/// cannot be used to probe which addresses are registered.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let user = User::find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = token::issue(user.id, &user.email, &state.config.jwt_secret)?;

    Ok(Json(json!({
        "token": token,
        "message": "Login successful"
    })))
}

/// GET /users/me
pub async fn handle_me(AuthUser(user): AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "user": user }))
}
