//! Authentication: Argon2 password hashing, HS256 JWTs, and the `AuthUser`
//! extractor that resolves a bearer token to a user row on every protected
//! route.

pub mod handlers;
pub mod password;
pub mod token;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// The authenticated requester, loaded from the database.
///
/// Any verification failure — missing header, bad signature, expired token,
/// or a token whose subject no longer exists — is a uniform 401.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims = token::verify(bearer, &state.config.jwt_secret)?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser(user))
    }
}
