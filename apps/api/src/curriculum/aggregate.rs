//! Eager-load composition query for the curriculum aggregate.
//!
//! The system's most read-heavy query: one curriculum lookup fanned out into
//! five dependent reads (statement + four membership sets), all issued on a
//! single read transaction so the response is one consistent snapshot.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::curriculum::{CurriculumDetail, CurriculumRow};
use crate::models::profile::{EducationRow, ExperienceRow, ProjectRow, SkillRow};
use crate::models::statement::StatementRow;

/// Loads the full aggregate for `(id, owner)`. A curriculum that does not
/// exist and one owned by someone else are indistinguishable: both are
/// `NotFound`.
pub async fn load_curriculum_detail(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
) -> Result<CurriculumDetail, AppError> {
    let mut tx = pool.begin().await?;

    let curriculum = sqlx::query_as::<_, CurriculumRow>(
        "SELECT * FROM curriculums WHERE id = $1 AND owner_id = $2",
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Curriculum not found".to_string()))?;

    // statement_id is non-nullable and ownership was checked at creation, so
    // this lookup can only miss if the schema invariants are broken.
    let statement =
        sqlx::query_as::<_, StatementRow>("SELECT * FROM statements WHERE id = $1")
            .bind(curriculum.statement_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "Curriculum {id} references missing statement"
                ))
            })?;

    let educations = sqlx::query_as::<_, EducationRow>(
        r#"
        SELECT e.* FROM educations e
        JOIN curriculum_educations ce ON ce.education_id = e.id
        WHERE ce.curriculum_id = $1
        ORDER BY e.start_date DESC, e.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    let experiences = sqlx::query_as::<_, ExperienceRow>(
        r#"
        SELECT x.* FROM experiences x
        JOIN curriculum_experiences cx ON cx.experience_id = x.id
        WHERE cx.curriculum_id = $1
        ORDER BY x.start_date DESC, x.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    let skills = sqlx::query_as::<_, SkillRow>(
        r#"
        SELECT s.* FROM skills s
        JOIN curriculum_skills cs ON cs.skill_id = s.id
        WHERE cs.curriculum_id = $1
        ORDER BY s.name, s.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    let projects = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT p.* FROM projects p
        JOIN curriculum_projects cp ON cp.project_id = p.id
        WHERE cp.curriculum_id = $1
        ORDER BY p.name, p.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(CurriculumDetail {
        curriculum,
        statement,
        educations,
        experiences,
        skills,
        projects,
    })
}
