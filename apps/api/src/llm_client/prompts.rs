// Anthropic text-completion framing used by the Bedrock `anthropic.claude-v2` family.
// Task-specific prompt templates live next to the code that renders them.

/// Turn marker that opens a human message.
pub const HUMAN_PROMPT: &str = "\n\nHuman:";

/// Turn marker that hands control to the model.
pub const AI_PROMPT: &str = "\n\nAssistant:";

/// Wraps a bare prompt into a single Human/Assistant exchange.
/// Prompts that already carry the human marker are passed through with only the
/// trailing assistant marker ensured.
pub fn frame_prompt(prompt: &str) -> String {
    let mut framed = if prompt.starts_with(HUMAN_PROMPT) {
        prompt.to_string()
    } else {
        format!("{HUMAN_PROMPT} {prompt}")
    };
    if !framed.trim_end().ends_with(AI_PROMPT.trim_start()) {
        framed.push_str(AI_PROMPT);
    }
    framed
}
