mod config;
mod errors;
mod gateway;
mod models;
mod routes;
mod state;
mod workflow;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::HttpGateway;
use crate::routes::build_router;
use crate::state::AppState;
use crate::workflow::notifier::TransientNotifier;
use crate::workflow::session::WorkflowSession;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hiring Co-Pilot v{}", env!("CARGO_PKG_VERSION"));

    let gateway = HttpGateway::new(config.endpoints(), config.http_timeout)?;
    let endpoints = Arc::new(gateway.endpoints().clone());
    info!(
        "Automation endpoints: rank={} list={} schedule={}",
        endpoints.ranking, endpoints.listing, endpoints.scheduling
    );

    let session = WorkflowSession::new(
        Arc::new(gateway),
        TransientNotifier::new(config.notice_ttl),
    );
    info!("Review session ready (notice ttl {:?})", config.notice_ttl);

    let state = AppState {
        session: Arc::new(session),
        endpoints,
    };

    let app = build_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // view layer is served from another local origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
