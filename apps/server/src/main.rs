// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wallscan Server - wall line extraction over HTTP.
//!
//! Accepts floor plan images, detects raw line segments, consolidates
//! near-duplicate detections into one line per wall and returns the walls
//! normalized into the unit square.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/v1/health` - Health check
//! - `POST /upload` - Multipart `file` upload, bare list of `[x1, y1, x2, y2]`
//! - `POST /api/v1/walls` - Same upload, lines plus consolidation statistics
//! - `POST /api/v1/consolidate` - Consolidate JSON-supplied segments

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Build the router with all routes and middleware.
pub fn build_router(config: Config) -> Router {
    let body_limit = config.max_file_size_bytes();
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Extraction endpoints
        .route("/upload", post(routes::upload::upload))
        .route("/api/v1/walls", post(routes::upload::walls))
        .route("/api/v1/consolidate", post(routes::consolidate::consolidate))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,wallscan_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        max_file_size_mb = config.max_file_size_mb,
        delta_theta = config.consolidation.delta_theta,
        delta_rho = config.consolidation.delta_rho,
        min_parallel_lines = config.consolidation.min_parallel_lines,
        "Starting Wallscan Server"
    );

    if let Err(e) = config.consolidation.validate() {
        tracing::error!(error = %e, "Refusing to start with invalid consolidation settings");
        std::process::exit(1);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_router(config);
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
