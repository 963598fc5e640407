//! Cancer Screening Service - Main Entry Point
//!
//! Loads the classifier artifact, then serves screening requests over HTTP
//! until the process is stopped.

use anyhow::{Context, Result};
use cancer_screening_service::{
    config::AppConfig,
    model::InferenceEngine,
    server::{router, AppState},
    types::sample::FEATURE_COUNT,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let filter = EnvFilter::from_default_env().add_directive(
        format!("cancer_screening_service={}", config.logging.level).parse()?,
    );
    match config.logging.format.as_str() {
        "json" => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    info!("Starting Cancer Screening Service");
    info!("Configuration loaded successfully");

    // Load the classifier artifact once; read-only for the process lifetime
    let engine = InferenceEngine::new(&config)
        .with_context(|| format!("Failed to initialize classifier from {}", config.model.path))?;
    info!(
        model = %config.model.path,
        features = FEATURE_COUNT,
        "Inference engine initialized"
    );

    let state = Arc::new(AppState::new(Arc::new(engine)));
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Listening for screening requests");
    axum::serve(listener, app).await?;

    Ok(())
}
