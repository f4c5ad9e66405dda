pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::errors::panic_response;
use crate::generation::handlers;
use crate::state::AppState;

/// Builds the public router. Any origin may call it, and handler panics
/// still answer with a JSON error body.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate", post(handlers::handle_generate))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
