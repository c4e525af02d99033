// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for raster line detection.

use thiserror::Error;

/// Result type for raster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur between raw file bytes and consolidated walls
#[derive(Error, Debug)]
pub enum Error {
    #[error("Image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Image has zero width or height")]
    EmptyImage,

    #[error("Invalid raster configuration: {0}")]
    InvalidConfig(String),

    #[error("Line consolidation failed: {0}")]
    Consolidation(#[from] wallscan_lines::Error),
}
