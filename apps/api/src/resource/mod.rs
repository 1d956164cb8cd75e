//! Parameterized owned-resource CRUD.
//!
//! Education, Experience, Skill, Project, and Statement all share the same
//! shape: create (stamp owner, persist), list (owner's rows, recency order),
//! partial update (only fields present in the request change), hard delete.
//! Instead of five near-identical handler sets, the shared contract lives in
//! the [`OwnedResource`] trait and four generic handlers; each entity supplies
//! only its column-specific INSERT/UPDATE and validation.
//!
//! Ownership scoping is uniform: every statement filters on
//! `owner_id = requester`, and a miss is a plain 404 regardless of whether the
//! row exists under another owner.

pub mod impls;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::{is_fk_violation, AppError};
use crate::extract::Json;
use crate::state::AppState;

/// A user-owned table with uniform CRUD semantics.
#[async_trait]
pub trait OwnedResource:
    Serialize + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static
{
    /// Human-readable singular name used in messages ("Education item").
    const KIND: &'static str;
    /// Table name. Must be a compile-time constant — it is interpolated
    /// into SQL text.
    const TABLE: &'static str;
    /// ORDER BY clause for listing; natural recency field first, id as
    /// tiebreaker so ordering is stable within a response.
    const ORDER: &'static str;

    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    /// Required-field checks beyond deserialization (blank strings).
    fn validate_create(input: &Self::Create) -> Result<(), AppError>;

    /// Rejects explicitly-present-but-blank fields. Absent fields are fine.
    fn validate_update(input: &Self::Update) -> Result<(), AppError>;

    async fn insert(pool: &PgPool, owner: Uuid, input: Self::Create)
        -> Result<Self, sqlx::Error>;

    /// Applies only the fields present in `input` (COALESCE per column).
    /// Returns `None` when no row matches (id, owner).
    async fn apply_update(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
        input: Self::Update,
    ) -> Result<Option<Self>, sqlx::Error>;
}

/// POST /{collection}
pub async fn create<R: OwnedResource>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<R::Create>,
) -> Result<(StatusCode, Json<R>), AppError> {
    R::validate_create(&input)?;
    let row = R::insert(&state.db, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /{collection}
pub async fn list<R: OwnedResource>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<R>>, AppError> {
    let sql = format!(
        "SELECT * FROM {} WHERE owner_id = $1 ORDER BY {}",
        R::TABLE,
        R::ORDER
    );
    let rows = sqlx::query_as::<_, R>(&sql)
        .bind(user.id)
        .fetch_all(&state.db)
        .await?;
    Ok(Json(rows))
}

/// PUT /{collection}/:id
pub async fn update<R: OwnedResource>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<R::Update>,
) -> Result<Json<R>, AppError> {
    R::validate_update(&input)?;
    let row = R::apply_update(&state.db, user.id, id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", R::KIND)))?;
    Ok(Json(row))
}

/// DELETE /{collection}/:id
///
/// A foreign-key RESTRICT violation (deleting a statement still referenced by
/// a curriculum) maps to 409; both rows stay intact.
pub async fn delete<R: OwnedResource>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sql = format!(
        "DELETE FROM {} WHERE id = $1 AND owner_id = $2 RETURNING id",
        R::TABLE
    );
    let deleted: Option<Uuid> = sqlx::query_scalar(&sql)
        .bind(id)
        .bind(user.id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            if is_fk_violation(&e) {
                AppError::Conflict(format!(
                    "{} is still referenced by a curriculum and cannot be deleted",
                    R::KIND
                ))
            } else {
                AppError::Database(e)
            }
        })?;

    deleted.ok_or_else(|| AppError::NotFound(format!("{} not found", R::KIND)))?;

    Ok(Json(json!({
        "message": format!("{} deleted successfully", R::KIND),
        "id": id
    })))
}

/// Rejects missing-or-blank required string fields with a 400.
pub(crate) fn require_nonblank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Rejects a field that is present in the request but blank. `None` passes:
/// absence means "leave unchanged".
pub(crate) fn reject_blank(field: &str, value: Option<&String>) -> Result<(), AppError> {
    if let Some(v) = value {
        if v.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }
    Ok(())
}
