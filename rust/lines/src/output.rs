// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Caller-facing packaging of the final segment list

use crate::error::Result;
use crate::types::LineSegment;

/// One `[x1, y1, x2, y2]` tuple per segment, order preserved
pub fn to_tuples(segments: &[LineSegment]) -> Vec<[f64; 4]> {
    segments.iter().map(LineSegment::coords).collect()
}

/// JSON list of `[x1, y1, x2, y2]` arrays
pub fn to_json(segments: &[LineSegment]) -> Result<String> {
    Ok(serde_json::to_string(&to_tuples(segments))?)
}
