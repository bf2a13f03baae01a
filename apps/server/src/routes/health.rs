// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub health: &'static str,
    pub version: &'static str,
    pub service: &'static str,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub crs: String,
    pub tolerance: f64,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /health - Health check endpoint.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        health: "OK",
        version: env!("CARGO_PKG_VERSION"),
        service: "archsplit-server",
    })
}

/// GET / - API information endpoint.
pub async fn info(State(state): State<AppState>) -> Json<ApiInfoResponse> {
    let split_config = state.splitter.config();

    Json(ApiInfoResponse {
        service: "archsplit-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Consumes building limits and height plateaus, splits up the building \
                      limits according to the height plateaus, and stores these three entities \
                      persistently",
        crs: split_config.crs.clone(),
        tolerance: split_config.tolerance,
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "POST",
                path: "/projects/:project/splits",
                description: "Split building limits by height plateaus and store the result",
            },
            EndpointInfo {
                method: "GET",
                path: "/projects/:project/splits",
                description: "List stored splits (skip, limit)",
            },
            EndpointInfo {
                method: "DELETE",
                path: "/projects/:project/splits",
                description: "Delete all splits of a project",
            },
            EndpointInfo {
                method: "GET",
                path: "/projects/:project/splits/:id",
                description: "Retrieve a stored split",
            },
            EndpointInfo {
                method: "DELETE",
                path: "/projects/:project/splits/:id",
                description: "Delete a stored split",
            },
        ],
    })
}
