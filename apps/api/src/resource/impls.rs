//! `OwnedResource` implementations for the five owned tables.
//!
//! Create inputs use required fields (a missing field fails deserialization
//! and maps to 400); update inputs wrap every field in `Option` so "absent"
//! and "present" are distinguishable — a field left out of the request keeps
//! its stored value, enforced by COALESCE in the UPDATE statements.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{EducationRow, ExperienceRow, ProjectRow, SkillRow};
use crate::models::statement::StatementRow;
use crate::resource::{reject_blank, require_nonblank, OwnedResource};

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationCreate {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationUpdate {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[async_trait]
impl OwnedResource for EducationRow {
    const KIND: &'static str = "Education item";
    const TABLE: &'static str = "educations";
    const ORDER: &'static str = "start_date DESC, id";

    type Create = EducationCreate;
    type Update = EducationUpdate;

    fn validate_create(input: &Self::Create) -> Result<(), AppError> {
        require_nonblank("institution", &input.institution)?;
        require_nonblank("degree", &input.degree)?;
        require_nonblank("fieldOfStudy", &input.field_of_study)
    }

    fn validate_update(input: &Self::Update) -> Result<(), AppError> {
        reject_blank("institution", input.institution.as_ref())?;
        reject_blank("degree", input.degree.as_ref())?;
        reject_blank("fieldOfStudy", input.field_of_study.as_ref())
    }

    async fn insert(
        pool: &PgPool,
        owner: Uuid,
        input: Self::Create,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, EducationRow>(
            r#"
            INSERT INTO educations
                (id, institution, degree, field_of_study, start_date, end_date, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.institution.trim())
        .bind(input.degree.trim())
        .bind(input.field_of_study.trim())
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(owner)
        .fetch_one(pool)
        .await
    }

    async fn apply_update(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
        input: Self::Update,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, EducationRow>(
            r#"
            UPDATE educations SET
                institution    = COALESCE($3, institution),
                degree         = COALESCE($4, degree),
                field_of_study = COALESCE($5, field_of_study),
                start_date     = COALESCE($6, start_date),
                end_date       = COALESCE($7, end_date),
                updated_at     = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(input.institution)
        .bind(input.degree)
        .bind(input.field_of_study)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_optional(pool)
        .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceCreate {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceUpdate {
    pub company: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[async_trait]
impl OwnedResource for ExperienceRow {
    const KIND: &'static str = "Experience item";
    const TABLE: &'static str = "experiences";
    const ORDER: &'static str = "start_date DESC, id";

    type Create = ExperienceCreate;
    type Update = ExperienceUpdate;

    fn validate_create(input: &Self::Create) -> Result<(), AppError> {
        require_nonblank("company", &input.company)?;
        require_nonblank("title", &input.title)
    }

    fn validate_update(input: &Self::Update) -> Result<(), AppError> {
        reject_blank("company", input.company.as_ref())?;
        reject_blank("title", input.title.as_ref())
    }

    async fn insert(
        pool: &PgPool,
        owner: Uuid,
        input: Self::Create,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ExperienceRow>(
            r#"
            INSERT INTO experiences
                (id, company, title, description, start_date, end_date, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.company.trim())
        .bind(input.title.trim())
        .bind(input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(owner)
        .fetch_one(pool)
        .await
    }

    async fn apply_update(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
        input: Self::Update,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ExperienceRow>(
            r#"
            UPDATE experiences SET
                company     = COALESCE($3, company),
                title       = COALESCE($4, title),
                description = COALESCE($5, description),
                start_date  = COALESCE($6, start_date),
                end_date    = COALESCE($7, end_date),
                updated_at  = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(input.company)
        .bind(input.title)
        .bind(input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_optional(pool)
        .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCreate {
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillUpdate {
    pub name: Option<String>,
    pub level: Option<String>,
}

#[async_trait]
impl OwnedResource for SkillRow {
    const KIND: &'static str = "Skill";
    const TABLE: &'static str = "skills";
    const ORDER: &'static str = "created_at DESC, id";

    type Create = SkillCreate;
    type Update = SkillUpdate;

    fn validate_create(input: &Self::Create) -> Result<(), AppError> {
        require_nonblank("name", &input.name)
    }

    fn validate_update(input: &Self::Update) -> Result<(), AppError> {
        reject_blank("name", input.name.as_ref())
    }

    async fn insert(
        pool: &PgPool,
        owner: Uuid,
        input: Self::Create,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, SkillRow>(
            r#"
            INSERT INTO skills (id, name, level, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name.trim())
        .bind(input.level)
        .bind(owner)
        .fetch_one(pool)
        .await
    }

    async fn apply_update(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
        input: Self::Update,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, SkillRow>(
            r#"
            UPDATE skills SET
                name       = COALESCE($3, name),
                level      = COALESCE($4, level),
                updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(input.name)
        .bind(input.level)
        .fetch_optional(pool)
        .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Project
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[async_trait]
impl OwnedResource for ProjectRow {
    const KIND: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const ORDER: &'static str = "created_at DESC, id";

    type Create = ProjectCreate;
    type Update = ProjectUpdate;

    fn validate_create(input: &Self::Create) -> Result<(), AppError> {
        require_nonblank("name", &input.name)
    }

    fn validate_update(input: &Self::Update) -> Result<(), AppError> {
        reject_blank("name", input.name.as_ref())
    }

    async fn insert(
        pool: &PgPool,
        owner: Uuid,
        input: Self::Create,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (id, name, description, url, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name.trim())
        .bind(input.description)
        .bind(input.url)
        .bind(owner)
        .fetch_one(pool)
        .await
    }

    async fn apply_update(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
        input: Self::Update,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects SET
                name        = COALESCE($3, name),
                description = COALESCE($4, description),
                url         = COALESCE($5, url),
                updated_at  = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(input.name)
        .bind(input.description)
        .bind(input.url)
        .fetch_optional(pool)
        .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Statement
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementCreate {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementUpdate {
    pub title: Option<String>,
    pub text: Option<String>,
}

#[async_trait]
impl OwnedResource for StatementRow {
    const KIND: &'static str = "Statement";
    const TABLE: &'static str = "statements";
    const ORDER: &'static str = "created_at DESC, id";

    type Create = StatementCreate;
    type Update = StatementUpdate;

    fn validate_create(input: &Self::Create) -> Result<(), AppError> {
        require_nonblank("title", &input.title)?;
        require_nonblank("text", &input.text)
    }

    fn validate_update(input: &Self::Update) -> Result<(), AppError> {
        reject_blank("title", input.title.as_ref())?;
        reject_blank("text", input.text.as_ref())
    }

    async fn insert(
        pool: &PgPool,
        owner: Uuid,
        input: Self::Create,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, StatementRow>(
            r#"
            INSERT INTO statements (id, title, text, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.title.trim())
        .bind(&input.text)
        .bind(owner)
        .fetch_one(pool)
        .await
    }

    async fn apply_update(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
        input: Self::Update,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, StatementRow>(
            r#"
            UPDATE statements SET
                title      = COALESCE($3, title),
                text       = COALESCE($4, text),
                updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(input.title)
        .bind(input.text)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rejects_blank_required_field() {
        let input = EducationCreate {
            institution: "  ".to_string(),
            degree: "BSc".to_string(),
            field_of_study: "CS".to_string(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: None,
        };
        assert!(EducationRow::validate_create(&input).is_err());
    }

    #[test]
    fn test_create_accepts_complete_input() {
        let input = EducationCreate {
            institution: "MIT".to_string(),
            degree: "BSc".to_string(),
            field_of_study: "CS".to_string(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: None,
        };
        assert!(EducationRow::validate_create(&input).is_ok());
    }

    #[test]
    fn test_update_absent_fields_pass_validation() {
        assert!(EducationRow::validate_update(&EducationUpdate::default()).is_ok());
        assert!(StatementRow::validate_update(&StatementUpdate::default()).is_ok());
    }

    #[test]
    fn test_update_present_but_blank_field_rejected() {
        let input = SkillUpdate {
            name: Some(String::new()),
            level: None,
        };
        assert!(SkillRow::validate_update(&input).is_err());
    }

    #[test]
    fn test_update_inputs_distinguish_absent_from_present() {
        // Absent field deserializes to None and leaves the column untouched.
        let partial: ExperienceUpdate = serde_json::from_str(r#"{"title": "Senior Engineer"}"#).unwrap();
        assert_eq!(partial.title.as_deref(), Some("Senior Engineer"));
        assert!(partial.company.is_none());
        assert!(partial.description.is_none());
    }

    #[test]
    fn test_camel_case_field_names() {
        let input: EducationCreate = serde_json::from_str(
            r#"{"institution":"MIT","degree":"BSc","fieldOfStudy":"CS","startDate":"2020-01-01"}"#,
        )
        .unwrap();
        assert_eq!(input.field_of_study, "CS");
        assert!(input.end_date.is_none());
    }
}
