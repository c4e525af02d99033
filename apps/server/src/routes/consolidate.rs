// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Consolidation of client-detected segments.

use crate::error::ApiError;
use crate::services::consolidate_segments;
use crate::types::{ConsolidateRequest, WallsResponse};
use crate::AppState;
use axum::{extract::State, Json};

/// POST /api/v1/consolidate - Run only the consolidation stages.
pub async fn consolidate(
    State(state): State<AppState>,
    Json(request): Json<ConsolidateRequest>,
) -> Result<Json<WallsResponse>, ApiError> {
    let config = request
        .config
        .unwrap_or_else(|| state.config.consolidation.clone());
    let segments = request.segments;

    let result =
        tokio::task::spawn_blocking(move || consolidate_segments(&segments, &config)).await??;

    Ok(Json(result.into()))
}
