//! Association manager: attach/detach one profile item to/from one
//! curriculum, enforcing ownership of both sides inside one transaction.
//!
//! Dispatch is an explicit enum — each kind maps to statically-known table
//! and column names, never runtime-built identifiers.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// The four linkable profile-item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Education,
    Experience,
    Skill,
    Project,
}

impl ItemKind {
    /// Singular noun used in responses and error messages.
    pub const fn noun(self) -> &'static str {
        match self {
            ItemKind::Education => "Education",
            ItemKind::Experience => "Experience",
            ItemKind::Skill => "Skill",
            ItemKind::Project => "Project",
        }
    }

    const fn item_table(self) -> &'static str {
        match self {
            ItemKind::Education => "educations",
            ItemKind::Experience => "experiences",
            ItemKind::Skill => "skills",
            ItemKind::Project => "projects",
        }
    }

    const fn join_table(self) -> &'static str {
        match self {
            ItemKind::Education => "curriculum_educations",
            ItemKind::Experience => "curriculum_experiences",
            ItemKind::Skill => "curriculum_skills",
            ItemKind::Project => "curriculum_projects",
        }
    }

    const fn join_column(self) -> &'static str {
        match self {
            ItemKind::Education => "education_id",
            ItemKind::Experience => "experience_id",
            ItemKind::Skill => "skill_id",
            ItemKind::Project => "project_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Attach,
    Detach,
}

impl LinkAction {
    const fn past_phrase(self) -> &'static str {
        match self {
            LinkAction::Attach => "added to",
            LinkAction::Detach => "removed from",
        }
    }
}

/// Mutates one join membership. Steps, all on one transaction:
///
/// 1. curriculum must exist under `owner` — otherwise NotFound;
/// 2. the item must exist under `owner` in the kind's table — otherwise
///    NotFound (kind-named message, same 404 class: the response never
///    reveals which half of the check failed);
/// 3. attach inserts with `ON CONFLICT DO NOTHING`, detach deletes — both
///    idempotent; the join PK is what makes concurrent attaches safe.
///
/// Early returns drop the transaction, which rolls it back.
pub async fn manage_link(
    pool: &PgPool,
    owner: Uuid,
    curriculum_id: Uuid,
    item_id: Uuid,
    kind: ItemKind,
    action: LinkAction,
) -> Result<String, AppError> {
    let mut tx = pool.begin().await?;

    let curriculum: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM curriculums WHERE id = $1 AND owner_id = $2")
            .bind(curriculum_id)
            .bind(owner)
            .fetch_optional(&mut *tx)
            .await?;
    if curriculum.is_none() {
        return Err(AppError::NotFound("Curriculum not found".to_string()));
    }

    let item_sql = format!(
        "SELECT id FROM {} WHERE id = $1 AND owner_id = $2",
        kind.item_table()
    );
    let item: Option<Uuid> = sqlx::query_scalar(&item_sql)
        .bind(item_id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?;
    if item.is_none() {
        return Err(AppError::NotFound(format!("{} not found", kind.noun())));
    }

    let link_sql = match action {
        LinkAction::Attach => format!(
            "INSERT INTO {} (curriculum_id, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            kind.join_table(),
            kind.join_column()
        ),
        LinkAction::Detach => format!(
            "DELETE FROM {} WHERE curriculum_id = $1 AND {} = $2",
            kind.join_table(),
            kind.join_column()
        ),
    };
    sqlx::query(&link_sql)
        .bind(curriculum_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "{} {item_id} {} curriculum {curriculum_id}",
        kind.noun(),
        action.past_phrase()
    );

    Ok(format!(
        "{} {} curriculum successfully",
        kind.noun(),
        action.past_phrase()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_tables_match_join_columns() {
        // curriculum_educations.education_id must point at educations, etc.
        for kind in [
            ItemKind::Education,
            ItemKind::Experience,
            ItemKind::Skill,
            ItemKind::Project,
        ] {
            let singular = kind.join_column().strip_suffix("_id").unwrap();
            assert!(
                kind.item_table().starts_with(singular),
                "{:?}: {} vs {}",
                kind,
                kind.item_table(),
                kind.join_column()
            );
            assert_eq!(
                kind.join_table(),
                format!("curriculum_{}", kind.item_table())
            );
        }
    }

    #[test]
    fn test_acknowledgement_names_kind_and_action() {
        assert_eq!(LinkAction::Attach.past_phrase(), "added to");
        assert_eq!(LinkAction::Detach.past_phrase(), "removed from");
        assert_eq!(ItemKind::Skill.noun(), "Skill");
    }
}
