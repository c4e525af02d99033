// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tuning parameters for line consolidation

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How the transformer treats zero-length segments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateSegmentPolicy {
    /// Assign theta = 0 and rho = x1 and let clustering handle it
    #[default]
    Keep,
    /// Fail with [`Error::DegenerateSegment`]
    Reject,
}

/// Configuration for the consolidation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Angular bucket width (radians)
    pub delta_theta: f64,
    /// Distance bucket width (pixels)
    pub delta_rho: f64,
    /// Minimum cluster size for a cluster to count as a wall
    pub min_parallel_lines: usize,
    /// Handling of zero-length input segments
    pub degenerate_segments: DegenerateSegmentPolicy,
}

impl ConsolidationConfig {
    /// Tuning for deduplicating raw Hough detections
    pub fn raw_detection() -> Self {
        Self {
            delta_theta: 0.05,
            delta_rho: 5.0,
            min_parallel_lines: 2,
            degenerate_segments: DegenerateSegmentPolicy::Keep,
        }
    }

    /// Tuning for the final wall output
    ///
    /// A genuine wall drawn with a thick stroke yields many near-duplicate
    /// detections, so clusters below five members are treated as noise.
    pub fn final_output() -> Self {
        Self {
            delta_theta: 1.0,
            delta_rho: 4.0,
            min_parallel_lines: 5,
            degenerate_segments: DegenerateSegmentPolicy::Keep,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.delta_theta.is_finite() && self.delta_theta > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "delta_theta must be positive and finite, got {}",
                self.delta_theta
            )));
        }
        if !(self.delta_rho.is_finite() && self.delta_rho > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "delta_rho must be positive and finite, got {}",
                self.delta_rho
            )));
        }
        Ok(())
    }
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self::raw_detection()
    }
}
