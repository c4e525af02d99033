// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Density clustering of scaled dual coordinates.
//!
//! Two segments are linked when their scaled features lie within
//! [`CLUSTER_RADIUS`] of each other (inclusive). Clusters are the connected
//! components of that link graph, so every segment can seed a cluster and
//! there are no unlabeled points: an isolated segment is a singleton.
//!
//! Candidate pairs come from a uniform grid hash whose cell side equals the
//! radius, so only the 3x3 cell neighbourhood of each point is compared.
//! Linked pairs are merged with a union-find.

use crate::types::ScaledFeature;
use rustc_hash::FxHashMap;
use std::f64::consts::SQRT_2;

/// Neighbour radius in scaled feature space
pub const CLUSTER_RADIUS: f64 = SQRT_2;

/// Partition of segment indices into clusters
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// `labels[i]` is the cluster label of segment `i`
    pub labels: Vec<usize>,
    /// `clusters[label]` holds member indices in ascending order
    pub clusters: Vec<Vec<usize>>,
}

impl Clustering {
    /// Every index in its own cluster
    pub fn singletons(n: usize) -> Self {
        Self {
            labels: (0..n).collect(),
            clusters: (0..n).map(|i| vec![i]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Disjoint-set forest with path compression and union by rank
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
        true
    }
}

/// Grid hash over the scaled feature plane
struct FeatureGrid {
    cell_size: f64,
    cells: FxHashMap<(i64, i64), Vec<usize>>,
}

impl FeatureGrid {
    fn build(features: &[ScaledFeature], cell_size: f64) -> Self {
        let mut grid = Self {
            cell_size,
            cells: FxHashMap::default(),
        };
        for (i, f) in features.iter().enumerate() {
            let cell = grid.cell_of(f);
            grid.cells.entry(cell).or_default().push(i);
        }
        grid
    }

    fn cell_of(&self, f: &ScaledFeature) -> (i64, i64) {
        (
            (f.theta / self.cell_size).floor() as i64,
            (f.rho / self.cell_size).floor() as i64,
        )
    }

    /// Indices stored in the 3x3 neighbourhood around `f`
    fn neighbourhood<'a>(&'a self, f: &ScaledFeature) -> impl Iterator<Item = usize> + 'a {
        let (cx, cy) = self.cell_of(f);
        (-1i64..=1)
            .flat_map(move |dx| {
                (-1i64..=1).map(move |dy| (cx.saturating_add(dx), cy.saturating_add(dy)))
            })
            .filter_map(move |cell| self.cells.get(&cell))
            .flat_map(|members| members.iter().copied())
    }
}

/// Cluster features by transitive closure over the radius relation
pub fn cluster_features(features: &[ScaledFeature]) -> Clustering {
    cluster_features_with_radius(features, CLUSTER_RADIUS)
}

/// Connected components of the radius graph; `radius` must be positive
fn cluster_features_with_radius(features: &[ScaledFeature], radius: f64) -> Clustering {
    let n = features.len();
    let mut uf = UnionFind::new(n);
    let grid = FeatureGrid::build(features, radius);

    let mut links = 0usize;
    for (i, fi) in features.iter().enumerate() {
        for j in grid.neighbourhood(fi) {
            if j <= i {
                continue;
            }
            if fi.distance_to(&features[j]) <= radius && uf.union(i, j) {
                links += 1;
            }
        }
    }

    // Canonical labels: ordered by smallest member index
    let mut label_of_root: FxHashMap<usize, usize> = FxHashMap::default();
    let mut labels = Vec::with_capacity(n);
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        let root = uf.find(i);
        let label = *label_of_root.entry(root).or_insert_with(|| {
            clusters.push(Vec::new());
            clusters.len() - 1
        });
        clusters[label].push(i);
        labels.push(label);
    }

    tracing::debug!(
        points = n,
        merges = links,
        clusters = clusters.len(),
        "Clustered dual coordinates"
    );

    Clustering { labels, clusters }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(theta: f64, rho: f64) -> ScaledFeature {
        ScaledFeature { theta, rho }
    }

    fn assert_partition(c: &Clustering, n: usize) {
        let mut seen = vec![false; n];
        for (label, members) in c.clusters.iter().enumerate() {
            for &i in members {
                assert!(!seen[i], "index {} in two clusters", i);
                seen[i] = true;
                assert_eq!(c.labels[i], label);
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_empty() {
        let c = cluster_features(&[]);
        assert!(c.is_empty());
        assert!(c.labels.is_empty());
    }

    #[test]
    fn test_isolated_points_are_singletons() {
        let pts = vec![f(0.0, 0.0), f(10.0, 0.0), f(0.0, 10.0)];
        let c = cluster_features(&pts);
        assert_eq!(c, Clustering::singletons(3));
    }

    #[test]
    fn test_radius_is_inclusive() {
        // Exactly 1 apart on each axis: distance sqrt(2)
        let pts = vec![f(0.0, 0.0), f(1.0, 1.0)];
        let c = cluster_features(&pts);
        assert_eq!(c.len(), 1);

        let pts = vec![f(0.0, 0.0), f(1.0, 1.0001)];
        let c = cluster_features(&pts);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_chaining() {
        // Each neighbour is 1.2 apart; ends are 4.8 apart
        let pts: Vec<_> = (0..5).map(|i| f(0.0, i as f64 * 1.2)).collect();
        let c = cluster_features(&pts);
        assert_eq!(c.len(), 1);
        assert_eq!(c.clusters[0], vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_labels_follow_smallest_member() {
        let pts = vec![f(50.0, 50.0), f(0.0, 0.0), f(50.5, 50.0), f(0.2, 0.1)];
        let c = cluster_features(&pts);
        assert_eq!(c.clusters, vec![vec![0, 2], vec![1, 3]]);
        assert_eq!(c.labels, vec![0, 1, 0, 1]);
        assert_partition(&c, 4);
    }

    #[test]
    fn test_order_independent_partition() {
        let pts = vec![
            f(0.0, 0.0),
            f(0.9, 0.3),
            f(20.0, 1.0),
            f(1.8, 0.6),
            f(20.5, 1.5),
            f(-7.0, 3.0),
        ];
        let forward = cluster_features(&pts);

        let reversed: Vec<_> = pts.iter().rev().copied().collect();
        let backward = cluster_features(&reversed);

        let n = pts.len();
        let mut remapped: Vec<Vec<usize>> = backward
            .clusters
            .iter()
            .map(|m| {
                let mut v: Vec<usize> = m.iter().map(|&i| n - 1 - i).collect();
                v.sort_unstable();
                v
            })
            .collect();
        remapped.sort();

        let mut expected = forward.clusters.clone();
        expected.sort();
        assert_eq!(remapped, expected);
        assert_partition(&forward, n);
    }

    #[test]
    fn test_negative_coordinates_cross_cell_boundary() {
        let pts = vec![f(-0.1, -0.1), f(0.1, 0.1)];
        let c = cluster_features(&pts);
        assert_eq!(c.len(), 1);
    }
}
