use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resume::local::LocalSectionStore;
use crate::resume::writer::SectionWriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Section write backend, selected at startup from `LOCAL_STORAGE_MODE`.
    pub writer: Arc<dyn SectionWriter>,
    /// Client-local store backing the writer in local mode; also served
    /// through the snapshot endpoint.
    pub local: LocalSectionStore,
}
