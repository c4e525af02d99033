// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for line consolidation.

/// Result type alias for consolidation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while consolidating line segments.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Segment data that cannot enter the transform stage.
    #[error("invalid input at segment {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    /// Tuning parameters outside their valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A zero-length segment under [`DegenerateSegmentPolicy::Reject`].
    ///
    /// [`DegenerateSegmentPolicy::Reject`]: crate::config::DegenerateSegmentPolicy::Reject
    #[error("segment {index} has zero length")]
    DegenerateSegment { index: usize },

    /// Bounding box with zero extent on at least one axis.
    #[error("degenerate bounding box: width {width}, height {height}")]
    DegenerateGeometry { width: f64, height: f64 },

    /// Finite coordinates whose bounding-box extent does not fit in an f64.
    #[error("coordinate extent overflows: width {width}, height {height}")]
    ExtentOverflow { width: f64, height: f64 },

    /// JSON encoding failure in the output serializer.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
