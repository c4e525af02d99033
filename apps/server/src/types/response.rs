// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use serde::{Deserialize, Serialize};
use wallscan_lines::{Consolidation, ConsolidationStats, LineSegment};

/// Consolidated walls with run counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallsResponse {
    /// Normalized wall segments as `[x1, y1, x2, y2]` arrays.
    pub lines: Vec<LineSegment>,
    /// Consolidation counters.
    pub stats: ConsolidationStats,
}

impl From<Consolidation> for WallsResponse {
    fn from(result: Consolidation) -> Self {
        Self {
            lines: result.lines,
            stats: result.stats,
        }
    }
}
