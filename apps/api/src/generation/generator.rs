//! Statement generation pipeline.
//!
//! Flow: load full curriculum aggregate → render to JSON text → fill prompt
//! template → single LLM call → persist returned text as a new Statement.
//!
//! The external call is one best-effort attempt with the client's fixed
//! timeout. Nothing is persisted unless it succeeds, so a failed call can
//! never leave a partial Statement behind.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::curriculum::aggregate::load_curriculum_detail;
use crate::errors::AppError;
use crate::generation::prompts::{build_statement_prompt, STATEMENT_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::models::curriculum::CurriculumDetail;
use crate::models::statement::StatementRow;
use crate::resource::impls::StatementCreate;
use crate::resource::OwnedResource;

/// Request body for POST /ai/generate-statement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStatementRequest {
    pub curriculum_id: Uuid,
    pub job_description: String,
    /// Title for the persisted statement, supplied by the caller.
    pub title: String,
}

/// Renders the aggregate as pretty-printed JSON for the prompt. Owner ids and
/// timestamps ride along; the model ignores them.
pub fn render_curriculum_text(detail: &CurriculumDetail) -> Result<String, AppError> {
    serde_json::to_string_pretty(detail)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize curriculum: {e}")))
}

/// Runs the full pipeline for `owner`. The curriculum lookup is owner-scoped,
/// so another user's curriculum id produces the same NotFound as a bogus one.
pub async fn generate_statement(
    pool: &PgPool,
    generator: &dyn TextGenerator,
    owner: Uuid,
    request: GenerateStatementRequest,
) -> Result<StatementRow, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription is required".to_string(),
        ));
    }
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let detail = load_curriculum_detail(pool, owner, request.curriculum_id).await?;

    let curriculum_text = render_curriculum_text(&detail)?;
    let prompt = build_statement_prompt(&curriculum_text, request.job_description.trim());

    let generated = generator
        .generate(&prompt, STATEMENT_SYSTEM)
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    info!(
        "Generated statement for curriculum {} ({} chars)",
        request.curriculum_id,
        generated.len()
    );

    let statement = StatementRow::insert(
        pool,
        owner,
        StatementCreate {
            title: request.title,
            text: generated,
        },
    )
    .await?;

    Ok(statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::models::curriculum::CurriculumRow;
    use crate::models::profile::SkillRow;
    use crate::models::statement::StatementRow;

    fn sample_detail() -> CurriculumDetail {
        let owner = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let statement = StatementRow {
            id: Uuid::new_v4(),
            title: "S1".to_string(),
            text: "body".to_string(),
            owner_id: owner,
            created_at: now,
            updated_at: now,
        };
        CurriculumDetail {
            curriculum: CurriculumRow {
                id: Uuid::new_v4(),
                title: "CV1".to_string(),
                owner_id: owner,
                statement_id: statement.id,
                created_at: now,
                updated_at: now,
            },
            statement,
            educations: vec![],
            experiences: vec![],
            skills: vec![SkillRow {
                id: Uuid::new_v4(),
                name: "Rust".to_string(),
                level: Some("Advanced".to_string()),
                owner_id: owner,
                created_at: now,
                updated_at: now,
            }],
            projects: vec![],
        }
    }

    #[test]
    fn test_render_flattens_curriculum_fields() {
        let text = render_curriculum_text(&sample_detail()).unwrap();
        // Curriculum fields sit at the top level, not under a nested key.
        assert!(text.contains("\"title\": \"CV1\""));
        assert!(text.contains("\"statement\""));
        assert!(text.contains("\"skills\""));
        assert!(text.contains("\"Rust\""));
    }

    #[test]
    fn test_rendered_text_is_camel_case() {
        let text = render_curriculum_text(&sample_detail()).unwrap();
        assert!(text.contains("\"ownerId\""));
        assert!(text.contains("\"statementId\""));
        assert!(!text.contains("\"owner_id\""));
    }
}
