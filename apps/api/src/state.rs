use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable text-generation backend. Production: `LlmClient`.
    /// Behind a trait object so tests can substitute a canned generator.
    pub generator: Arc<dyn TextGenerator>,
}
