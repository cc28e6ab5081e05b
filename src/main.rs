// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::application::cache::SatelliteCache;
use crate::application::refresh_service::RefreshService;
use crate::application::tracking_service::TrackingService;
use crate::domain::propagation::Propagator;
use crate::infrastructure::config::load_tracker_config;
use crate::infrastructure::http_feed::HttpElementFeed;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_categories, get_satellite, get_satellites, get_track, health_check,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let settings = load_tracker_config()?;

    // Create feed client (infrastructure layer)
    let feed = Arc::new(HttpElementFeed::new(settings.fetch_timeout_secs)?);

    // Shared cache and services (application layer)
    let cache = Arc::new(SatelliteCache::new());
    let refresh_service = RefreshService::new(feed, cache.clone(), settings.clone());
    let tracking_service = TrackingService::new(
        cache,
        Propagator::new(settings.propagation_horizon_days),
    );

    // Background refresh loop; handlers only ever read the cache
    tokio::spawn(async move {
        refresh_service.run().await;
    });

    // Create application state
    let state = Arc::new(AppState { tracking_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/satellites", get(get_satellites))
        .route("/api/satellite/:id", get(get_satellite))
        .route("/api/satellite/:id/track", get(get_track))
        .route("/api/categories", get(get_categories))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = settings.bind_addr.parse()?;
    tracing::info!("Starting orbital-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
