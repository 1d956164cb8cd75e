//! Axum route handler for the generation endpoint.

use axum::extract::State;
use axum::http::StatusCode;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::Json;
use crate::generation::generator::{generate_statement, GenerateStatementRequest};
use crate::models::statement::StatementRow;
use crate::state::AppState;

/// POST /ai/generate-statement
///
/// Loads the caller's curriculum, asks the generation backend for a summary
/// tailored to the job description, and returns the persisted Statement.
pub async fn handle_generate_statement(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<GenerateStatementRequest>,
) -> Result<(StatusCode, Json<StatementRow>), AppError> {
    let statement =
        generate_statement(&state.db, state.generator.as_ref(), user.id, request).await?;
    Ok((StatusCode::CREATED, Json(statement)))
}
