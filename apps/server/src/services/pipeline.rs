// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blocking wall extraction jobs run off the async executor.

use crate::error::ApiError;
use std::time::Instant;
use wallscan_lines::{consolidate, Consolidation, ConsolidationConfig, LineSegment};
use wallscan_raster::{decode_grayscale, detect_segments, RasterConfig};

/// Decode an uploaded plan, detect raw lines and consolidate them.
pub fn extract_from_upload(
    data: &[u8],
    raster: &RasterConfig,
    consolidation: &ConsolidationConfig,
) -> Result<Consolidation, ApiError> {
    let total_start = Instant::now();

    let grayscale = decode_grayscale(data)?;
    let detect_start = Instant::now();
    let raw = detect_segments(&grayscale, raster)?;
    let detect_time_ms = detect_start.elapsed().as_millis() as u64;

    tracing::info!(
        width = grayscale.width(),
        height = grayscale.height(),
        raw_segments = raw.len(),
        detect_time_ms,
        "Raw line detection complete"
    );

    let result = consolidate(&raw, consolidation)?;

    tracing::info!(
        lines = result.lines.len(),
        clusters = result.stats.cluster_count,
        total_time_ms = total_start.elapsed().as_millis() as u64,
        "Detected {} lines",
        result.lines.len()
    );

    Ok(result)
}

/// Consolidate caller-supplied segments.
pub fn consolidate_segments(
    segments: &[LineSegment],
    config: &ConsolidationConfig,
) -> Result<Consolidation, ApiError> {
    let start = Instant::now();
    let result = consolidate(segments, config)?;

    tracing::info!(
        input = segments.len(),
        lines = result.lines.len(),
        time_ms = start.elapsed().as_millis() as u64,
        "Consolidated submitted segments"
    );

    Ok(result)
}
