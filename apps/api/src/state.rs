use std::sync::Arc;

use crate::llm_client::CompletionModel;
use crate::prompts::PromptResolver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resolver: PromptResolver,
    /// Pluggable completion model. Default: `LlmClient`; tests swap in a stub.
    pub model: Arc<dyn CompletionModel>,
}
