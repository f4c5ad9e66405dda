// Bullet point generation: prompt rendering, model call, bullet extraction.
// All model calls go through llm_client::TextGenerator.

pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod prompts;
