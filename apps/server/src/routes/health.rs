// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service status endpoints.

use axum::Json;
use serde::Serialize;

const SERVICE: &str = "wallscan-server";

/// Routes served by this process, as `METHOD path`.
const ENDPOINTS: &[&str] = &[
    "GET /api/v1/health",
    "POST /upload",
    "POST /api/v1/walls",
    "POST /api/v1/consolidate",
];

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

/// GET /api/v1/health
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET / - Service name, version and routes.
pub async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    })
}
