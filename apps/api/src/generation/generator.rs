//! Bullet generation pipeline: prompt → model → extraction.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::extractor::extract_bullets;
use crate::generation::prompts::build_prompt;
use crate::llm_client::{SamplingParams, TextGenerator};
use crate::models::request::RequestContext;

/// Generates up to three tailored bullet points for a validated request.
///
/// A completion with no bullet lines is not an error; it yields an empty list
/// and a warning.
pub async fn generate_bullet_points(
    llm: &dyn TextGenerator,
    params: &SamplingParams,
    ctx: &RequestContext,
) -> Result<Vec<String>, AppError> {
    let prompt = build_prompt(ctx);

    let raw = llm.generate(&prompt, params).await?;
    let bullets = extract_bullets(&raw);

    if bullets.is_empty() {
        warn!(
            model = llm.model_id(),
            completion_chars = raw.len(),
            "Completion contained no bullet lines"
        );
    } else {
        info!(
            model = llm.model_id(),
            bullets = bullets.len(),
            "Generated bullet points"
        );
    }

    Ok(bullets)
}
