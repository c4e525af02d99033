// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use serde::Deserialize;
use wallscan_lines::{ConsolidationConfig, LineSegment};

/// Body of `POST /api/v1/consolidate`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsolidateRequest {
    /// Raw segments as `[x1, y1, x2, y2]` arrays.
    pub segments: Vec<LineSegment>,

    /// Overrides the server's consolidation settings; omitted fields take
    /// the raw-detection defaults.
    #[serde(default)]
    pub config: Option<ConsolidationConfig>,
}
