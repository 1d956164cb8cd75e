//! Axum handlers for curriculum CRUD and the attach/detach endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::curriculum::aggregate::load_curriculum_detail;
use crate::curriculum::associations::{manage_link, ItemKind, LinkAction};
use crate::errors::AppError;
use crate::extract::Json;
use crate::models::curriculum::{CurriculumDetail, CurriculumRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumCreate {
    pub title: String,
    pub statement_id: Uuid,
}

/// POST /curriculums
///
/// The referenced statement must belong to the requester; the check and the
/// insert share a transaction so no curriculum row is persisted when the
/// check fails.
pub async fn handle_create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CurriculumCreate>,
) -> Result<(StatusCode, Json<CurriculumRow>), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let mut tx = state.db.begin().await?;

    let statement: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM statements WHERE id = $1 AND owner_id = $2")
            .bind(input.statement_id)
            .bind(user.id)
            .fetch_optional(&mut *tx)
            .await?;
    if statement.is_none() {
        return Err(AppError::NotFound("Statement not found".to_string()));
    }

    let curriculum = sqlx::query_as::<_, CurriculumRow>(
        r#"
        INSERT INTO curriculums (id, title, owner_id, statement_id)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.title.trim())
    .bind(user.id)
    .bind(input.statement_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(curriculum)))
}

/// GET /curriculums
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<CurriculumRow>>, AppError> {
    let rows = sqlx::query_as::<_, CurriculumRow>(
        "SELECT * FROM curriculums WHERE owner_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// GET /curriculums/:id — the full eager-loaded snapshot.
pub async fn handle_get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CurriculumDetail>, AppError> {
    let detail = load_curriculum_detail(&state.db, user.id, id).await?;
    Ok(Json(detail))
}

/// DELETE /curriculums/:id — join rows cascade away with the curriculum.
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted: Option<Uuid> =
        sqlx::query_scalar("DELETE FROM curriculums WHERE id = $1 AND owner_id = $2 RETURNING id")
            .bind(id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;

    deleted.ok_or_else(|| AppError::NotFound("Curriculum not found".to_string()))?;

    Ok(Json(json!({
        "message": "Curriculum deleted successfully",
        "id": id
    })))
}

// ────────────────────────────────────────────────────────────────────────────
// Attach / detach endpoints
// ────────────────────────────────────────────────────────────────────────────

async fn handle_link(
    state: AppState,
    owner: Uuid,
    curriculum_id: Uuid,
    item_id: Uuid,
    kind: ItemKind,
    action: LinkAction,
) -> Result<Json<serde_json::Value>, AppError> {
    let message = manage_link(&state.db, owner, curriculum_id, item_id, kind, action).await?;
    Ok(Json(json!({ "message": message })))
}

/// POST /curriculums/:id/educations/:item_id
pub async fn handle_attach_education(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((curriculum_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    handle_link(state, user.id, curriculum_id, item_id, ItemKind::Education, LinkAction::Attach)
        .await
}

/// DELETE /curriculums/:id/educations/:item_id
pub async fn handle_detach_education(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((curriculum_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    handle_link(state, user.id, curriculum_id, item_id, ItemKind::Education, LinkAction::Detach)
        .await
}

/// POST /curriculums/:id/experiences/:item_id
pub async fn handle_attach_experience(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((curriculum_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    handle_link(state, user.id, curriculum_id, item_id, ItemKind::Experience, LinkAction::Attach)
        .await
}

/// DELETE /curriculums/:id/experiences/:item_id
pub async fn handle_detach_experience(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((curriculum_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    handle_link(state, user.id, curriculum_id, item_id, ItemKind::Experience, LinkAction::Detach)
        .await
}

/// POST /curriculums/:id/skills/:item_id
pub async fn handle_attach_skill(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((curriculum_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    handle_link(state, user.id, curriculum_id, item_id, ItemKind::Skill, LinkAction::Attach).await
}

/// DELETE /curriculums/:id/skills/:item_id
pub async fn handle_detach_skill(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((curriculum_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    handle_link(state, user.id, curriculum_id, item_id, ItemKind::Skill, LinkAction::Detach).await
}

/// POST /curriculums/:id/projects/:item_id
pub async fn handle_attach_project(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((curriculum_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    handle_link(state, user.id, curriculum_id, item_id, ItemKind::Project, LinkAction::Attach)
        .await
}

/// DELETE /curriculums/:id/projects/:item_id
pub async fn handle_detach_project(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((curriculum_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    handle_link(state, user.id, curriculum_id, item_id, ItemKind::Project, LinkAction::Detach)
        .await
}
