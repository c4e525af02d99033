// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for line consolidation

use crate::error::{Error, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A raw line segment in pixel coordinates
///
/// Serialized as a flat `[x1, y1, x2, y2]` array, which is the shape the
/// upstream detector and downstream callers exchange.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build segments from an N x 4 row-major coordinate buffer
    pub fn from_flat(coords: &[f64]) -> Result<Vec<LineSegment>> {
        if coords.len() % 4 != 0 {
            return Err(Error::InvalidInput {
                index: coords.len() / 4,
                reason: format!(
                    "coordinate buffer of length {} is not a multiple of 4",
                    coords.len()
                ),
            });
        }

        Ok(coords
            .chunks_exact(4)
            .map(|c| LineSegment::new(c[0], c[1], c[2], c[3]))
            .collect())
    }

    /// Direction vector (x2 - x1, y2 - y1)
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.x2 - self.x1, self.y2 - self.y1)
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    pub fn is_finite(&self) -> bool {
        self.coords().iter().all(|v| v.is_finite())
    }

    pub fn coords(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl From<[f64; 4]> for LineSegment {
    fn from(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<LineSegment> for [f64; 4] {
    fn from(s: LineSegment) -> Self {
        s.coords()
    }
}

/// Angle/distance representation of the infinite line through a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualCoordinate {
    /// Normal angle modulo pi, in [0, pi)
    pub theta: f64,
    /// Signed perpendicular distance from the origin
    pub rho: f64,
}

impl DualCoordinate {
    /// Divide each component by its bucket width
    pub fn scaled(&self, delta_theta: f64, delta_rho: f64) -> ScaledFeature {
        ScaledFeature {
            theta: self.theta / delta_theta,
            rho: self.rho / delta_rho,
        }
    }
}

/// Dual coordinate in bucket units, where Euclidean distance is meaningful
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledFeature {
    pub theta: f64,
    pub rho: f64,
}

impl ScaledFeature {
    pub fn distance_to(&self, other: &ScaledFeature) -> f64 {
        (self.theta - other.theta).hypot(self.rho - other.rho)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let seg = LineSegment::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&seg).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");

        let back: LineSegment = serde_json::from_str("[5, 6, 7, 8]").unwrap();
        assert_eq!(back, LineSegment::new(5.0, 6.0, 7.0, 8.0));
    }

    #[test]
    fn test_from_flat_rejects_ragged_buffer() {
        let err = LineSegment::from_flat(&[0.0, 0.0, 1.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { index: 1, .. }));

        let segs = LineSegment::from_flat(&[0.0, 0.0, 3.0, 4.0]).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].length(), 5.0);
    }

    #[test]
    fn test_degenerate() {
        assert!(LineSegment::new(2.0, 2.0, 2.0, 2.0).is_degenerate());
        assert!(!LineSegment::new(2.0, 2.0, 2.0, 3.0).is_degenerate());
        assert!(!LineSegment::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
    }
}
