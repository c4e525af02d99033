// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw wall-line detection from floor plan rasters
//!
//! This crate is the upstream half of the wall extraction pipeline:
//! 1. Decode an uploaded PNG/JPEG into grayscale
//! 2. Blur, detect edges, close and erode into a wall mask
//! 3. Detect candidate segments with a probabilistic Hough transform
//! 4. Hand the candidates to `wallscan_lines` for consolidation
//!
//! # Usage
//!
//! ```rust,ignore
//! use wallscan_raster::{extract_walls, RasterConfig};
//! use wallscan_lines::ConsolidationConfig;
//!
//! let bytes = std::fs::read("plan.png")?;
//! let walls = extract_walls(&bytes, &RasterConfig::default(), &ConsolidationConfig::final_output())?;
//! println!("{}", wallscan_lines::to_json(&walls.lines)?);
//! ```

pub mod config;
pub mod error;
pub mod hough;
pub mod image_ops;

pub use config::RasterConfig;
pub use error::{Error, Result};
pub use hough::detect_segments_in_mask;
pub use image_ops::wall_mask;

use image::GrayImage;
use wallscan_lines::{consolidate, Consolidation, ConsolidationConfig, LineSegment};

/// Decode PNG or JPEG bytes into a grayscale image
///
/// PDF documents are recognized and rejected: there is no rasterizer for
/// them in this stack.
pub fn decode_grayscale(bytes: &[u8]) -> Result<GrayImage> {
    if bytes.starts_with(b"%PDF") {
        return Err(Error::UnsupportedFormat(
            "PDF input must be rasterized before upload".into(),
        ));
    }

    let img = image::load_from_memory(bytes)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::EmptyImage);
    }
    Ok(img.to_luma8())
}

/// Run the mask and Hough stages on a grayscale plan
pub fn detect_segments(grayscale: &GrayImage, config: &RasterConfig) -> Result<Vec<LineSegment>> {
    config.validate()?;

    let mask = wall_mask(grayscale, config);
    let segments = detect_segments_in_mask(&mask, config);

    tracing::debug!(
        width = grayscale.width(),
        height = grayscale.height(),
        segments = segments.len(),
        "Raw line detection complete"
    );

    Ok(segments)
}

/// Decode, detect and consolidate in one call
pub fn extract_walls(
    bytes: &[u8],
    raster: &RasterConfig,
    consolidation: &ConsolidationConfig,
) -> Result<Consolidation> {
    let grayscale = decode_grayscale(bytes)?;
    let raw = detect_segments(&grayscale, raster)?;
    Ok(consolidate(&raw, consolidation)?)
}
