// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall-line consolidation for floor plan recognition
//!
//! Raw line detectors report each physical wall many times: a thick stroke
//! produces a bundle of near-duplicate, near-parallel segments. This crate
//! reduces such a bundle to one representative per wall:
//!
//! 1. Map every segment to its (theta, rho) dual coordinate and scale by the
//!    bucket widths ([`transform`])
//! 2. Group segments whose scaled coordinates are chained within a fixed
//!    radius ([`cluster`])
//! 3. Drop clusters smaller than `min_parallel_lines` and keep the longest
//!    member of each remaining cluster ([`select`])
//! 4. Rescale the survivors into the unit square ([`normalize`])
//! 5. Package them as `[x1, y1, x2, y2]` tuples ([`output`])
//!
//! Every call is a pure function of its inputs.
//!
//! # Usage
//!
//! ```rust
//! use wallscan_lines::{consolidate_lines, ConsolidationConfig, LineSegment};
//!
//! let raw: Vec<LineSegment> = (0..6)
//!     .map(|i| LineSegment::new(10.0, 100.0 + i as f64 * 0.5, 200.0 + i as f64, 100.0))
//!     .chain((0..6).map(|i| LineSegment::new(10.0 + i as f64 * 0.5, 10.0, 10.0, 300.0)))
//!     .collect();
//!
//! let walls = consolidate_lines(&raw, &ConsolidationConfig::final_output())?;
//! assert_eq!(walls.len(), 2);
//! # Ok::<(), wallscan_lines::Error>(())
//! ```

pub mod cluster;
pub mod config;
pub mod error;
pub mod normalize;
pub mod output;
pub mod select;
pub mod transform;
pub mod types;

pub use cluster::{cluster_features, Clustering, CLUSTER_RADIUS};
pub use config::{ConsolidationConfig, DegenerateSegmentPolicy};
pub use error::{Error, Result};
pub use normalize::{normalize_in_place, BoundingBox};
pub use output::{to_json, to_tuples};
pub use select::{select_representatives, Representative};
pub use transform::{dual_coordinate, dual_coordinates, scaled_features, validate_segments};
pub use types::{DualCoordinate, LineSegment, ScaledFeature};

use serde::{Deserialize, Serialize};

/// Counters describing one consolidation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationStats {
    pub input_count: usize,
    pub cluster_count: usize,
    pub kept_clusters: usize,
    pub dropped_clusters: usize,
    pub output_count: usize,
}

/// Result of [`consolidate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consolidation {
    /// Normalized wall segments, ordered by cluster label
    pub lines: Vec<LineSegment>,
    /// Pixel-space bounds of the representatives before normalization
    pub bounds: Option<BoundingBox>,
    pub stats: ConsolidationStats,
}

/// Cluster segments and keep one representative per qualifying cluster.
///
/// Coordinates stay in pixel space. Useful on raw detections with
/// [`ConsolidationConfig::raw_detection`].
pub fn filter_similar_lines(
    segments: &[LineSegment],
    config: &ConsolidationConfig,
) -> Result<Vec<Representative>> {
    let features = scaled_features(segments, config)?;
    let clustering = cluster_features(&features);
    select_representatives(segments, &clustering, config.min_parallel_lines)
}

/// Run the full pipeline: transform, cluster, select, normalize.
pub fn consolidate(segments: &[LineSegment], config: &ConsolidationConfig) -> Result<Consolidation> {
    let features = scaled_features(segments, config)?;
    let clustering = cluster_features(&features);
    let reps = select_representatives(segments, &clustering, config.min_parallel_lines)?;

    let mut lines: Vec<LineSegment> = reps.iter().map(|r| r.segment).collect();
    let bounds = normalize_in_place(&mut lines)?;

    let stats = ConsolidationStats {
        input_count: segments.len(),
        cluster_count: clustering.len(),
        kept_clusters: reps.len(),
        dropped_clusters: clustering.len() - reps.len(),
        output_count: lines.len(),
    };

    tracing::debug!(
        input = stats.input_count,
        clusters = stats.cluster_count,
        output = stats.output_count,
        "Consolidated wall lines"
    );

    Ok(Consolidation {
        lines,
        bounds,
        stats,
    })
}

/// [`consolidate`] packaged as `[x1, y1, x2, y2]` tuples in [0, 1]
pub fn consolidate_lines(
    segments: &[LineSegment],
    config: &ConsolidationConfig,
) -> Result<Vec<[f64; 4]>> {
    let result = consolidate(segments, config)?;
    Ok(to_tuples(&result.lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(x0: f64, y: f64, count: usize) -> Vec<LineSegment> {
        (0..count)
            .map(|i| LineSegment::new(x0, y + i as f64 * 0.4, x0 + 100.0 + i as f64, y))
            .collect()
    }

    #[test]
    fn test_filter_similar_lines_stays_in_pixels() {
        let mut segs = bundle(0.0, 50.0, 3);
        segs.push(LineSegment::new(0.0, 0.0, 0.0, 80.0));

        let reps = filter_similar_lines(&segs, &ConsolidationConfig::raw_detection()).unwrap();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].index, 2);
        assert_eq!(reps[0].segment, segs[2]);
    }

    #[test]
    fn test_stats() {
        let mut segs = bundle(0.0, 0.0, 5);
        segs.extend(bundle(0.0, 300.0, 5));
        segs.push(LineSegment::new(500.0, 0.0, 500.0, 20.0));
        // Vertical wall so the output box has width and height
        segs.extend((0..5).map(|i| LineSegment::new(20.0 + i as f64 * 0.3, 0.0, 20.0, 300.0)));

        let result = consolidate(&segs, &ConsolidationConfig::final_output()).unwrap();
        assert_eq!(result.stats.input_count, 16);
        assert_eq!(result.stats.kept_clusters, 3);
        assert_eq!(
            result.stats.cluster_count,
            result.stats.kept_clusters + result.stats.dropped_clusters
        );
        assert_eq!(result.lines.len(), 3);
        assert!(result.bounds.is_some());
    }

    #[test]
    fn test_invalid_config_surfaces() {
        let cfg = ConsolidationConfig {
            delta_theta: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            consolidate(&[], &cfg),
            Err(Error::InvalidConfig(_))
        ));
    }
}
