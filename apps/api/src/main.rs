mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, Region};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::BedrockClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume coach v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Bedrock model client
    let bedrock = build_bedrock_client(&config).await;
    let llm = BedrockClient::new(bedrock, config.model_id.clone());
    info!(
        model = %config.model_id,
        region = %config.aws_region,
        profile = config.aws_profile.as_deref().unwrap_or("default chain"),
        max_tokens = config.sampling.max_tokens,
        temperature = config.sampling.temperature,
        "LLM client initialized"
    );

    let state = AppState {
        llm: Arc::new(llm),
        sampling: config.sampling,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs a Bedrock runtime client for the configured region and profile.
async fn build_bedrock_client(config: &Config) -> aws_sdk_bedrockruntime::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(Duration::from_secs(config.llm_timeout_secs))
                .build(),
        )
        .retry_config(RetryConfig::standard().with_max_attempts(config.llm_max_attempts));

    if let Some(profile) = &config.aws_profile {
        loader = loader.profile_name(profile);
    }

    let sdk_config = loader.load().await;
    aws_sdk_bedrockruntime::Client::new(&sdk_config)
}
