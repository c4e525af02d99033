// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Probabilistic Hough segment detection
//!
//! Every foreground pixel votes for all (theta, rho) lines through it. The
//! strongest accumulator cells are then revisited in vote order: the pixels
//! lying within a narrow band of the peak line are sorted along the line
//! and split wherever consecutive pixels are further apart than the maximum
//! gap. Runs that are long enough become segments and their pixels stop
//! voting for later peaks.
//!
//! A thick wall band yields several parallel runs, one per peak inside the
//! band. Those near-duplicates are what `wallscan_lines` consolidates.

use crate::config::RasterConfig;
use image::GrayImage;
use std::f64::consts::PI;
use wallscan_lines::LineSegment;

/// Foreground threshold for mask pixels
const FOREGROUND: u8 = 128;

/// Precomputed trigonometry and accumulator geometry
struct HoughSpace {
    cos_table: Vec<f64>,
    sin_table: Vec<f64>,
    rho_resolution: f64,
    rho_offset: f64,
    num_rhos: usize,
}

impl HoughSpace {
    fn new(width: u32, height: u32, rho_resolution: f64, theta_resolution: f64) -> Self {
        let num_thetas = ((PI / theta_resolution).round() as usize).max(1);
        let (sin_table, cos_table): (Vec<f64>, Vec<f64>) = (0..num_thetas)
            .map(|i| (i as f64 * theta_resolution).sin_cos())
            .unzip();

        let max_rho = (width as f64).hypot(height as f64);
        let num_rhos = (2.0 * max_rho / rho_resolution) as usize + 1;

        Self {
            cos_table,
            sin_table,
            rho_resolution,
            rho_offset: max_rho,
            num_rhos,
        }
    }

    fn num_thetas(&self) -> usize {
        self.cos_table.len()
    }

    fn rho(&self, theta_idx: usize, x: i32, y: i32) -> f64 {
        x as f64 * self.cos_table[theta_idx] + y as f64 * self.sin_table[theta_idx]
    }

    fn rho_index(&self, rho: f64) -> Option<usize> {
        let idx = ((rho + self.rho_offset) / self.rho_resolution) as usize;
        (idx < self.num_rhos).then_some(idx)
    }

    fn rho_value(&self, rho_idx: usize) -> f64 {
        rho_idx as f64 * self.rho_resolution - self.rho_offset
    }
}

/// Collect foreground pixel coordinates in row-major order
fn foreground_points(mask: &GrayImage) -> Vec<(i32, i32)> {
    mask.enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] > FOREGROUND)
        .map(|(x, y, _)| (x as i32, y as i32))
        .collect()
}

fn run_length(a: (i32, i32), b: (i32, i32)) -> f64 {
    ((b.0 - a.0) as f64).hypot((b.1 - a.1) as f64)
}

/// Detect line segments in a binary mask
pub fn detect_segments_in_mask(mask: &GrayImage, config: &RasterConfig) -> Vec<LineSegment> {
    let space = HoughSpace::new(
        mask.width(),
        mask.height(),
        config.rho_resolution,
        config.theta_resolution,
    );
    let points = foreground_points(mask);
    if points.is_empty() {
        return Vec::new();
    }

    // Vote
    let num_thetas = space.num_thetas();
    let mut accumulator = vec![0u32; num_thetas * space.num_rhos];
    for &(x, y) in &points {
        for theta_idx in 0..num_thetas {
            if let Some(rho_idx) = space.rho_index(space.rho(theta_idx, x, y)) {
                accumulator[theta_idx * space.num_rhos + rho_idx] += 1;
            }
        }
    }

    // Peaks above threshold, strongest first; ties in accumulator order
    let mut peaks: Vec<(usize, usize, u32)> = Vec::new();
    for theta_idx in 0..num_thetas {
        for rho_idx in 0..space.num_rhos {
            let votes = accumulator[theta_idx * space.num_rhos + rho_idx];
            if votes >= config.hough_threshold {
                peaks.push((theta_idx, rho_idx, votes));
            }
        }
    }
    peaks.sort_by(|a, b| b.2.cmp(&a.2));

    tracing::debug!(
        points = points.len(),
        peaks = peaks.len(),
        "Hough accumulator filled"
    );

    let mut used = vec![false; points.len()];
    let mut segments = Vec::new();

    for &(theta_idx, rho_idx, _) in peaks.iter().take(config.max_peaks) {
        let rho = space.rho_value(rho_idx);
        let (cos_t, sin_t) = (space.cos_table[theta_idx], space.sin_table[theta_idx]);

        // (position along the line, point index)
        let mut band: Vec<(f64, usize)> = points
            .iter()
            .enumerate()
            .filter(|&(i, &(x, y))| {
                !used[i] && (space.rho(theta_idx, x, y) - rho).abs() < config.band_tolerance
            })
            .map(|(i, &(x, y))| (-(x as f64) * sin_t + y as f64 * cos_t, i))
            .collect();

        if band.len() < 2 {
            continue;
        }
        band.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut start = 0;
        for end in 1..=band.len() {
            let split = end == band.len()
                || run_length(points[band[end - 1].1], points[band[end].1]) > config.max_line_gap;
            if !split {
                continue;
            }

            if end - start >= 2 {
                let first = points[band[start].1];
                let last = points[band[end - 1].1];
                if run_length(first, last) >= config.min_line_length {
                    segments.push(LineSegment::new(
                        first.0 as f64,
                        first.1 as f64,
                        last.0 as f64,
                        last.1 as f64,
                    ));
                    for &(_, i) in &band[start..end] {
                        used[i] = true;
                    }
                }
            }
            start = end;
        }
    }

    segments
}
