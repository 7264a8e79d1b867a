use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::GenerationSettings;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; credentials travel with each request.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production, stubs in tests.
    pub provider: Arc<dyn CompletionProvider>,
    pub settings: GenerationSettings,
    pub config: Config,
}
