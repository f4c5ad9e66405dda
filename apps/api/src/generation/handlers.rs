//! Axum route handlers for the Generation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::generation::generator::generate_bullet_points;
use crate::models::request::GenerateRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub bullet_points: Vec<String>,
}

/// POST /generate
///
/// Validates the five request fields, then returns up to three STAR bullet
/// points. No model call is made when validation fails.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(body) = body?;

    let ctx = GenerateRequest::from_body(&body)
        .validate()
        .map_err(|missing| {
            warn!(?missing, "Rejecting generate request");
            AppError::MissingParameters
        })?;

    let bullet_points = generate_bullet_points(state.llm.as_ref(), &state.sampling, &ctx).await?;

    Ok(Json(GenerateResponse { bullet_points }))
}
