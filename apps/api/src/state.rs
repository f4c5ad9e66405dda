use std::sync::Arc;

use crate::llm_client::{SamplingParams, TextGenerator};

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn TextGenerator>,
    pub sampling: SamplingParams,
}
