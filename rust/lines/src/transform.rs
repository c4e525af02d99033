// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping of segments into the (theta, rho) parameter space

use crate::config::{ConsolidationConfig, DegenerateSegmentPolicy};
use crate::error::{Error, Result};
use crate::types::{DualCoordinate, LineSegment, ScaledFeature};
use std::f64::consts::PI;

/// Reject non-finite coordinates before any geometry is computed
pub fn validate_segments(segments: &[LineSegment]) -> Result<()> {
    for (index, seg) in segments.iter().enumerate() {
        if !seg.is_finite() {
            return Err(Error::InvalidInput {
                index,
                reason: format!("non-finite coordinate in {:?}", seg.coords()),
            });
        }
    }
    Ok(())
}

/// Dual coordinate of a single segment
///
/// The normal of direction (dx, dy) is (-dy, dx); its angle is folded into
/// [0, pi) so a segment and its reverse share a coordinate. A zero-length
/// segment has no normal and gets theta = 0, rho = x1 under
/// [`DegenerateSegmentPolicy::Keep`].
pub fn dual_coordinate(
    segment: &LineSegment,
    index: usize,
    policy: DegenerateSegmentPolicy,
) -> Result<DualCoordinate> {
    if segment.is_degenerate() {
        return match policy {
            DegenerateSegmentPolicy::Keep => Ok(DualCoordinate {
                theta: 0.0,
                rho: segment.x1,
            }),
            DegenerateSegmentPolicy::Reject => Err(Error::DegenerateSegment { index }),
        };
    }

    let dir = segment.direction();
    let (nx, ny) = (-dir.y, dir.x);
    let theta = fold_angle(ny.atan2(nx));
    let rho = segment.x1 * theta.cos() + segment.y1 * theta.sin();

    Ok(DualCoordinate { theta, rho })
}

/// Reduce an angle modulo pi into [0, pi)
fn fold_angle(angle: f64) -> f64 {
    let folded = angle.rem_euclid(PI);
    // rem_euclid can round up to exactly pi for tiny negative inputs, and
    // keeps the sign of -0.0
    if folded >= PI || folded == 0.0 {
        0.0
    } else {
        folded
    }
}

/// Dual coordinates for every segment, in input order
pub fn dual_coordinates(
    segments: &[LineSegment],
    policy: DegenerateSegmentPolicy,
) -> Result<Vec<DualCoordinate>> {
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| dual_coordinate(seg, i, policy))
        .collect()
}

/// Validate, transform and scale segments into the clustering feature space
pub fn scaled_features(
    segments: &[LineSegment],
    config: &ConsolidationConfig,
) -> Result<Vec<ScaledFeature>> {
    config.validate()?;
    validate_segments(segments)?;

    let features: Vec<ScaledFeature> = dual_coordinates(segments, config.degenerate_segments)?
        .iter()
        .map(|dc| dc.scaled(config.delta_theta, config.delta_rho))
        .collect();

    tracing::debug!(
        segments = segments.len(),
        delta_theta = config.delta_theta,
        delta_rho = config.delta_rho,
        "Computed scaled dual coordinates"
    );

    Ok(features)
}
