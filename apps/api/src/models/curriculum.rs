use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::profile::{EducationRow, ExperienceRow, ProjectRow, SkillRow};
use crate::models::statement::StatementRow;

/// The curriculum composition root: one required statement reference plus
/// four many-to-many item sets held in join tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumRow {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    pub statement_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully eager-loaded curriculum snapshot: the curriculum's own fields
/// flattened at the top level, its statement, and the four membership sets.
/// Every member item carries only its own fields (no join metadata).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumDetail {
    #[serde(flatten)]
    pub curriculum: CurriculumRow,
    pub statement: StatementRow,
    pub educations: Vec<EducationRow>,
    pub experiences: Vec<ExperienceRow>,
    pub skills: Vec<SkillRow>,
    pub projects: Vec<ProjectRow>,
}
