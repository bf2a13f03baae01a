// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Archsplit Server - splits building limits by height plateaus.
//!
//! Consumes building limits and height plateaus as GeoJSON, splits up the
//! building limits according to the height plateaus, and stores these three
//! entities persistently per project.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /projects/:project/splits` - Split and store
//! - `GET /projects/:project/splits` - List stored splits (`skip`, `limit`)
//! - `DELETE /projects/:project/splits` - Delete all splits of a project
//! - `GET /projects/:project/splits/:id` - Retrieve a stored split
//! - `DELETE /projects/:project/splits/:id` - Delete a stored split

use anyhow::Context;
use archsplit_geometry::Splitter;
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::SplitStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SplitStore>,
    pub splitter: Arc<Splitter>,
    pub config: Arc<Config>,
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_size_bytes();
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        .route("/health", get(routes::health::check))
        // Split endpoints
        .route(
            "/projects/:project/splits",
            get(routes::splits::list_splits)
                .post(routes::splits::create_split)
                .delete(routes::splits::delete_all_splits),
        )
        .route(
            "/projects/:project/splits/:id",
            get(routes::splits::get_split).delete(routes::splits::delete_split),
        )
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(timeout))
                .layer(CompressionLayer::new())
                .layer(RequestDecompressionLayer::new())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,tower_http=debug,archsplit_server=debug,archsplit_geometry=debug".into()
    });

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env();
    let split_config = config.split_config();

    tracing::info!(
        host = %config.host,
        port = config.port,
        data_dir = %config.data_dir,
        max_body_size_mb = config.max_body_size_mb,
        worker_threads = config.worker_threads,
        tolerance = split_config.tolerance,
        crs = %split_config.crs,
        overlap_check = ?split_config.overlap_check,
        "Starting Archsplit Server"
    );

    // Initialize rayon thread pool (overlay runs in parallel)
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    let store = Arc::new(SplitStore::new(&config.data_dir, config.max_page_size).await);
    let addr = SocketAddr::new(config.host, config.port);

    let state = AppState {
        store,
        splitter: Arc::new(Splitter::new(split_config)),
        config: Arc::new(config),
    };
    let app = build_router(state);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
