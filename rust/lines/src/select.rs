// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection of one representative segment per qualifying cluster

use crate::cluster::Clustering;
use crate::error::{Error, Result};
use crate::types::LineSegment;
use serde::{Deserialize, Serialize};

/// Longest member of a cluster that met the size threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Representative {
    /// Cluster label
    pub label: usize,
    /// Index of the chosen segment in the input
    pub index: usize,
    /// Number of segments in the cluster
    pub cluster_size: usize,
    /// Length of the chosen segment (pixels)
    pub length: f64,
    pub segment: LineSegment,
}

/// Keep the longest segment of every cluster with at least
/// `min_parallel_lines` members.
///
/// Output is ordered by ascending cluster label. Members are scanned in
/// ascending index order and only a strictly longer segment replaces the
/// current pick, so ties go to the earliest input index.
///
/// `clustering` must have been built over `segments`; a label count that
/// differs from the segment count, or a member index past the end, is
/// reported as [`Error::InvalidInput`].
pub fn select_representatives(
    segments: &[LineSegment],
    clustering: &Clustering,
    min_parallel_lines: usize,
) -> Result<Vec<Representative>> {
    if clustering.labels.len() != segments.len() {
        return Err(Error::InvalidInput {
            index: clustering.labels.len().min(segments.len()),
            reason: format!(
                "clustering labels {} segments but {} were given",
                clustering.labels.len(),
                segments.len()
            ),
        });
    }
    if let Some(&i) = clustering
        .clusters
        .iter()
        .flatten()
        .find(|&&i| i >= segments.len())
    {
        return Err(Error::InvalidInput {
            index: i,
            reason: "cluster member index out of range".into(),
        });
    }

    let mut reps = Vec::new();
    let mut dropped = 0usize;

    for (label, members) in clustering.clusters.iter().enumerate() {
        if members.is_empty() || members.len() < min_parallel_lines {
            dropped += 1;
            continue;
        }

        let mut best_index = members[0];
        let mut best_length = segments[best_index].length();
        for &i in &members[1..] {
            let length = segments[i].length();
            if length > best_length {
                best_index = i;
                best_length = length;
            }
        }

        reps.push(Representative {
            label,
            index: best_index,
            cluster_size: members.len(),
            length: best_length,
            segment: segments[best_index],
        });
    }

    tracing::debug!(
        kept = reps.len(),
        dropped = dropped,
        min_parallel_lines = min_parallel_lines,
        "Selected cluster representatives"
    );

    Ok(reps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(len: f64, y: f64) -> LineSegment {
        LineSegment::new(0.0, y, len, y)
    }

    #[test]
    fn test_longest_wins() {
        let segs = vec![seg(10.0, 0.0), seg(30.0, 1.0), seg(20.0, 2.0)];
        let clustering = Clustering {
            labels: vec![0, 0, 0],
            clusters: vec![vec![0, 1, 2]],
        };
        let reps = select_representatives(&segs, &clustering, 1).unwrap();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].index, 1);
        assert_eq!(reps[0].cluster_size, 3);
        assert_eq!(reps[0].length, 30.0);
    }

    #[test]
    fn test_ties_go_to_earliest_index() {
        let segs = vec![seg(5.0, 0.0), seg(25.0, 1.0), seg(25.0, 2.0), seg(25.0, 3.0)];
        let clustering = Clustering {
            labels: vec![0, 0, 0, 0],
            clusters: vec![vec![0, 1, 2, 3]],
        };
        let reps = select_representatives(&segs, &clustering, 2).unwrap();
        assert_eq!(reps[0].index, 1);
    }

    #[test]
    fn test_small_clusters_dropped() {
        let segs = vec![seg(10.0, 0.0), seg(10.0, 50.0), seg(12.0, 51.0)];
        let clustering = Clustering {
            labels: vec![0, 1, 1],
            clusters: vec![vec![0], vec![1, 2]],
        };
        let reps = select_representatives(&segs, &clustering, 2).unwrap();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].label, 1);
        assert_eq!(reps[0].index, 2);
    }

    #[test]
    fn test_no_survivors_is_empty() {
        let segs = vec![seg(10.0, 0.0), seg(10.0, 50.0)];
        let reps = select_representatives(&segs, &Clustering::singletons(2), 5).unwrap();
        assert!(reps.is_empty());
    }

    #[test]
    fn test_mismatched_clustering_is_rejected() {
        let segs = vec![seg(10.0, 0.0), seg(12.0, 1.0)];

        let short = select_representatives(&segs, &Clustering::singletons(3), 1);
        assert!(matches!(short, Err(Error::InvalidInput { index: 2, .. })));

        let stray = Clustering {
            labels: vec![0, 0],
            clusters: vec![vec![0, 5]],
        };
        assert!(matches!(
            select_representatives(&segs, &stray, 1),
            Err(Error::InvalidInput { index: 5, .. })
        ));
    }

    #[test]
    fn test_label_order() {
        let segs = vec![seg(1.0, 0.0), seg(2.0, 10.0), seg(3.0, 20.0)];
        let reps = select_representatives(&segs, &Clustering::singletons(3), 0).unwrap();
        let labels: Vec<_> = reps.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![0, 1, 2]);
    }
}
