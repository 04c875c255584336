use std::sync::Arc;

use crate::catalog::Catalog;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; read-only afterwards.
    pub catalog: Arc<Catalog>,
    /// Upstream text generator. `GeminiClient` in production.
    pub llm: Arc<dyn TextGenerator>,
}
