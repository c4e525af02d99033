// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding-box normalization into the unit square.
//!
//! Each axis is rescaled independently, so the aspect ratio of the input is
//! not preserved: a wall at 30 degrees in pixel space generally comes out at
//! a different angle. Callers that need faithful wall angles must rescale
//! with a single factor taken from the larger extent instead.

use crate::error::{Error, Result};
use crate::types::LineSegment;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a segment set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounds over all endpoints, or `None` for an empty set
    pub fn from_segments(segments: &[LineSegment]) -> Option<Self> {
        let first = segments.first()?;
        let mut bbox = BoundingBox {
            min_x: first.x1.min(first.x2),
            min_y: first.y1.min(first.y2),
            max_x: first.x1.max(first.x2),
            max_y: first.y1.max(first.y2),
        };
        for s in &segments[1..] {
            bbox.min_x = bbox.min_x.min(s.x1).min(s.x2);
            bbox.min_y = bbox.min_y.min(s.y1).min(s.y2);
            bbox.max_x = bbox.max_x.max(s.x1).max(s.x2);
            bbox.max_y = bbox.max_y.max(s.y1).max(s.y2);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

/// Rescale segments in place so the bounding box maps onto [0, 1] x [0, 1].
///
/// Returns the source bounding box, or `None` for empty input (nothing is
/// normalized). A zero-width or zero-height box is an error, as is an
/// extent too large to represent. On error `segments` is left untouched.
pub fn normalize_in_place(segments: &mut [LineSegment]) -> Result<Option<BoundingBox>> {
    let Some(bbox) = BoundingBox::from_segments(segments) else {
        return Ok(None);
    };

    if bbox.is_degenerate() {
        return Err(Error::DegenerateGeometry {
            width: bbox.width(),
            height: bbox.height(),
        });
    }

    let (w, h) = (bbox.width(), bbox.height());
    if !(w.is_finite() && h.is_finite()) {
        return Err(Error::ExtentOverflow {
            width: w,
            height: h,
        });
    }

    let scaled: Vec<LineSegment> = segments
        .iter()
        .map(|s| {
            LineSegment::new(
                (s.x1 - bbox.min_x) / w,
                (s.y1 - bbox.min_y) / h,
                (s.x2 - bbox.min_x) / w,
                (s.y2 - bbox.min_y) / h,
            )
        })
        .collect();
    if let Some(index) = scaled.iter().position(|s| !s.is_finite()) {
        return Err(Error::InvalidInput {
            index,
            reason: "normalized coordinates are not finite".into(),
        });
    }
    segments.copy_from_slice(&scaled);

    Ok(Some(bbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_short_circuits() {
        let mut segs: Vec<LineSegment> = Vec::new();
        assert_eq!(normalize_in_place(&mut segs).unwrap(), None);
    }

    #[test]
    fn test_per_axis_rescale() {
        let mut segs = vec![
            LineSegment::new(10.0, 20.0, 110.0, 20.0),
            LineSegment::new(10.0, 20.0, 10.0, 70.0),
        ];
        let bbox = normalize_in_place(&mut segs).unwrap().unwrap();
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 50.0);

        assert_eq!(segs[0].coords(), [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(segs[1].coords(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_aspect_ratio_not_preserved() {
        let mut segs = vec![LineSegment::new(0.0, 0.0, 200.0, 100.0)];
        normalize_in_place(&mut segs).unwrap();
        // 2:1 diagonal becomes a 1:1 diagonal
        assert_relative_eq!(segs[0].x2, 1.0);
        assert_relative_eq!(segs[0].y2, 1.0);
    }

    #[test]
    fn test_degenerate_width() {
        let mut segs = vec![
            LineSegment::new(5.0, 0.0, 5.0, 10.0),
            LineSegment::new(5.0, 20.0, 5.0, 40.0),
        ];
        let err = normalize_in_place(&mut segs).unwrap_err();
        match err {
            Error::DegenerateGeometry { width, height } => {
                assert_eq!(width, 0.0);
                assert_eq!(height, 40.0);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Input untouched on failure
        assert_eq!(segs[0].coords(), [5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_extent_overflow_is_rejected() {
        // Both endpoints finite, but max_x - min_x overflows to infinity
        let mut segs = vec![LineSegment::new(-1e308, 0.0, 1e308, 10.0)];
        let err = normalize_in_place(&mut segs).unwrap_err();
        match err {
            Error::ExtentOverflow { width, height } => {
                assert!(width.is_infinite());
                assert_eq!(height, 10.0);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(segs[0].coords(), [-1e308, 0.0, 1e308, 10.0]);
    }

    #[test]
    fn test_large_finite_extent_stays_in_unit_square() {
        let mut segs = vec![LineSegment::new(-4e307, -1.0, 4e307, 1.0)];
        normalize_in_place(&mut segs).unwrap();
        for v in segs[0].coords() {
            assert!(v.is_finite() && (0.0..=1.0).contains(&v), "coordinate {v}");
        }
    }

    #[test]
    fn test_degenerate_height() {
        let mut segs = vec![LineSegment::new(0.0, 3.0, 10.0, 3.0)];
        assert!(matches!(
            normalize_in_place(&mut segs),
            Err(Error::DegenerateGeometry { .. })
        ));
    }
}
