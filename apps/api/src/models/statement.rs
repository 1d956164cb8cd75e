use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A titled block of summary text. Created manually or by the generation
/// bridge. Referenced (non-nullably) by curriculums, with delete RESTRICT.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatementRow {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
