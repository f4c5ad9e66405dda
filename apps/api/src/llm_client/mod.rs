/// LLM Client — the single point of entry for model calls in the resume coach.
///
/// All generation goes through the `TextGenerator` trait. The production
/// implementation is `BedrockClient`, which speaks the Anthropic text-completion
/// body format over the Bedrock runtime `InvokeModel` operation.
use std::time::Instant;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use prompts::{frame_prompt, HUMAN_PROMPT};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.9,
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Model provider throttled the request: {0}")]
    Throttled(String),

    #[error("Model call timed out: {0}")]
    Timeout(String),

    #[error("Model temporarily unavailable: {0}")]
    Unavailable(String),

    #[error("Model provider error: {0}")]
    Provider(String),

    #[error("Malformed model response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// True when the provider is temporarily unable to serve rather than broken.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            LlmError::Throttled(_) | LlmError::Timeout(_) | LlmError::Unavailable(_)
        )
    }
}

/// Anything that turns a prompt into raw completion text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model_id(&self) -> &str;

    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens_to_sample: u32,
    temperature: f32,
    stop_sequences: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
    #[serde(default)]
    stop_reason: Option<String>,
}

/// Bedrock runtime client bound to one model id.
#[derive(Clone)]
pub struct BedrockClient {
    client: Client,
    model_id: String,
}

impl BedrockClient {
    pub fn new(client: Client, model_id: String) -> Self {
        Self { client, model_id }
    }
}

#[async_trait]
impl TextGenerator for BedrockClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<String, LlmError> {
        let body = encode_request(prompt, params)?;
        let started = Instant::now();

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type(CONTENT_TYPE_JSON)
            .accept(CONTENT_TYPE_JSON)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(classify_sdk_error)?;

        let text = parse_completion(output.body().as_ref())?;

        debug!(
            model = %self.model_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            completion_chars = text.len(),
            "Model call succeeded"
        );

        Ok(text)
    }
}

/// Serializes the Anthropic text-completion body for `InvokeModel`.
fn encode_request(prompt: &str, params: &SamplingParams) -> Result<Vec<u8>, LlmError> {
    let framed = frame_prompt(prompt);
    let request = CompletionRequest {
        prompt: &framed,
        max_tokens_to_sample: params.max_tokens,
        temperature: params.temperature,
        stop_sequences: [HUMAN_PROMPT],
    };
    Ok(serde_json::to_vec(&request)?)
}

/// Pulls the completion text out of a raw response body.
fn parse_completion(body: &[u8]) -> Result<String, LlmError> {
    let response: CompletionResponse = serde_json::from_slice(body)?;
    if response.completion.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }
    if let Some(reason) = response.stop_reason.as_deref() {
        debug!(stop_reason = reason, "Completion finished");
    }
    Ok(response.completion)
}

fn classify_sdk_error(err: SdkError<InvokeModelError>) -> LlmError {
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::TimeoutError(_) => LlmError::Timeout(message),
        SdkError::ServiceError(ctx) => classify_service_error(ctx.err(), message),
        _ => LlmError::Provider(message),
    }
}

/// Maps Bedrock's modeled exceptions onto retry-later vs. broken.
fn classify_service_error(err: &InvokeModelError, message: String) -> LlmError {
    if err.is_throttling_exception() {
        LlmError::Throttled(message)
    } else if err.is_model_timeout_exception() {
        LlmError::Timeout(message)
    } else if err.is_service_unavailable_exception() || err.is_model_not_ready_exception() {
        LlmError::Unavailable(message)
    } else {
        LlmError::Provider(message)
    }
}
