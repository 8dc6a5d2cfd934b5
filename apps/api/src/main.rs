mod assistant;
mod config;
mod errors;
mod llm_client;
mod models;
mod process;
mod render;
mod resumes;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::config::{ResolverConfig, ResolverConfigSource};
use crate::assistant::resolver::Resolver;
use crate::config::Config;
use crate::llm_client::ChatClient;
use crate::render::renderer_from_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (also loads .env into the process environment)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV API v{}", env!("CARGO_PKG_VERSION"));

    // Resolver settings are re-read on every request; log the startup view once
    let snapshot = ResolverConfig::from_env();
    info!(
        "Assistant stages: remote_api={} (model: {}), local_cli={}, order={:?}",
        snapshot.openai_api_key.is_some(),
        snapshot.openai_model,
        snapshot
            .llm_command
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "disabled".to_string()),
        snapshot.stage_order
    );

    let resolver = Resolver::new(ChatClient::new()?);
    let pdf_renderer = renderer_from_config(&config);

    if config.api_key.is_some() {
        info!("PDF endpoint protected by API key");
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        resolver: Arc::new(resolver),
        resolver_config: ResolverConfigSource::Env,
        pdf_renderer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
