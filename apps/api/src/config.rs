use anyhow::{bail, Context, Result};

use crate::llm_client::SamplingParams;

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_MODEL_ID: &str = "anthropic.claude-v2";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Application configuration loaded from environment variables.
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub aws_region: String,
    /// Named credential profile. `None` falls back to the default provider chain.
    pub aws_profile: Option<String>,
    pub model_id: String,
    pub sampling: SamplingParams,
    pub llm_timeout_secs: u64,
    /// Attempts per model call, including the first. 1 disables SDK retries.
    pub llm_max_attempts: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SamplingParams::default();

        let temperature = parse_or(&lookup, "LLM_TEMPERATURE", defaults.temperature)?;
        if !(0.0..=1.0).contains(&temperature) {
            bail!("LLM_TEMPERATURE must be between 0.0 and 1.0, got {temperature}");
        }

        let llm_max_attempts = parse_or(&lookup, "LLM_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        if llm_max_attempts == 0 {
            bail!("LLM_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            aws_region: non_empty(&lookup, "AWS_REGION")
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            aws_profile: non_empty(&lookup, "AWS_PROFILE"),
            model_id: non_empty(&lookup, "BEDROCK_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            sampling: SamplingParams {
                max_tokens: parse_or(&lookup, "LLM_MAX_TOKENS", defaults.max_tokens)?,
                temperature,
            },
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            llm_max_attempts,
            rust_log: non_empty(&lookup, "RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.aws_profile, None);
        assert_eq!(config.model_id, "anthropic.claude-v2");
        assert_eq!(config.sampling.max_tokens, 1000);
        assert!((config.sampling.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.llm_timeout_secs, 60);
        assert_eq!(config.llm_max_attempts, 1);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_PROFILE", "coach"),
            ("BEDROCK_MODEL_ID", "anthropic.claude-v2:1"),
            ("LLM_MAX_TOKENS", "500"),
            ("LLM_TEMPERATURE", "0.2"),
            ("LLM_TIMEOUT_SECS", "15"),
            ("LLM_MAX_ATTEMPTS", "3"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(config.aws_profile.as_deref(), Some("coach"));
        assert_eq!(config.model_id, "anthropic.claude-v2:1");
        assert_eq!(config.sampling.max_tokens, 500);
        assert!((config.sampling.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.llm_timeout_secs, 15);
        assert_eq!(config.llm_max_attempts, 3);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("AWS_PROFILE", "")]).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.aws_profile, None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_out_of_range_temperature_is_rejected() {
        assert!(config_from(&[("LLM_TEMPERATURE", "1.5")]).is_err());
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        assert!(config_from(&[("LLM_MAX_ATTEMPTS", "0")]).is_err());
    }
}
