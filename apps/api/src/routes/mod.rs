pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::curriculum::handlers as curriculum_handlers;
use crate::generation::handlers as generation_handlers;
use crate::models::profile::{EducationRow, ExperienceRow, ProjectRow, SkillRow};
use crate::models::statement::StatementRow;
use crate::resource;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/auth/register", post(auth_handlers::handle_register))
        .route("/auth/login", post(auth_handlers::handle_login))
        .route("/users/me", get(auth_handlers::handle_me))
        // Owned-resource CRUD — one generic handler set, five registrations
        .merge(resource_routes::<EducationRow>("/educations"))
        .merge(resource_routes::<ExperienceRow>("/experiences"))
        .merge(resource_routes::<SkillRow>("/skills"))
        .merge(resource_routes::<ProjectRow>("/projects"))
        .merge(resource_routes::<StatementRow>("/statements"))
        // Curriculum aggregate
        .route(
            "/curriculums",
            post(curriculum_handlers::handle_create).get(curriculum_handlers::handle_list),
        )
        .route(
            "/curriculums/:id",
            get(curriculum_handlers::handle_get).delete(curriculum_handlers::handle_delete),
        )
        // Association manager
        .route(
            "/curriculums/:id/educations/:item_id",
            post(curriculum_handlers::handle_attach_education)
                .delete(curriculum_handlers::handle_detach_education),
        )
        .route(
            "/curriculums/:id/experiences/:item_id",
            post(curriculum_handlers::handle_attach_experience)
                .delete(curriculum_handlers::handle_detach_experience),
        )
        .route(
            "/curriculums/:id/skills/:item_id",
            post(curriculum_handlers::handle_attach_skill)
                .delete(curriculum_handlers::handle_detach_skill),
        )
        .route(
            "/curriculums/:id/projects/:item_id",
            post(curriculum_handlers::handle_attach_project)
                .delete(curriculum_handlers::handle_detach_project),
        )
        // Generation bridge
        .route(
            "/ai/generate-statement",
            post(generation_handlers::handle_generate_statement),
        )
        .with_state(state)
}

/// Standard CRUD route set for one owned resource type.
fn resource_routes<R: resource::OwnedResource>(path: &str) -> Router<AppState> {
    Router::new()
        .route(path, post(resource::create::<R>).get(resource::list::<R>))
        .route(
            &format!("{path}/:id"),
            put(resource::update::<R>).delete(resource::delete::<R>),
        )
}
