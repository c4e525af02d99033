// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for raw line detection

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Parameters of the blur / edge / morphology / Hough chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Gaussian blur kernel size (odd)
    pub blur_kernel_size: u32,
    /// Canny edge detection low threshold
    pub canny_low: f32,
    /// Canny edge detection high threshold
    pub canny_high: f32,
    /// Side of the square closing element; emphasizes thick strokes
    pub close_kernel_size: u32,
    /// Side of the square erosion element applied after closing
    pub erode_kernel_size: u32,
    /// Hough distance resolution in pixels
    pub rho_resolution: f64,
    /// Hough angle resolution in radians
    pub theta_resolution: f64,
    /// Hough line detection vote threshold
    pub hough_threshold: u32,
    /// Minimum segment length in pixels
    pub min_line_length: f64,
    /// Maximum gap between points on the same segment
    pub max_line_gap: f64,
    /// Maximum number of accumulator peaks examined
    pub max_peaks: usize,
    /// Distance from a peak line within which a pixel supports it
    pub band_tolerance: f64,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            canny_low: 50.0,
            canny_high: 150.0,
            close_kernel_size: 13,
            erode_kernel_size: 3,
            rho_resolution: 1.0,
            theta_resolution: PI / 180.0, // 1 degree
            hough_threshold: 50,
            min_line_length: 30.0,
            max_line_gap: 10.0,
            max_peaks: 500,
            band_tolerance: 2.0,
        }
    }
}

impl RasterConfig {
    /// Blur sigma for the configured kernel size, using the same rule as
    /// OpenCV when sigma is left at zero
    pub fn blur_sigma(&self) -> f32 {
        let k = self.blur_kernel_size.max(1) as f32;
        0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
    }

    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel_size < 3 || self.blur_kernel_size % 2 == 0 {
            return Err(Error::InvalidConfig(format!(
                "blur_kernel_size must be odd and at least 3, got {}",
                self.blur_kernel_size
            )));
        }
        if !(self.rho_resolution > 0.0 && self.theta_resolution > 0.0) {
            return Err(Error::InvalidConfig(
                "Hough resolutions must be positive".into(),
            ));
        }
        if self.close_kernel_size / 2 > u8::MAX as u32 || self.erode_kernel_size / 2 > u8::MAX as u32
        {
            return Err(Error::InvalidConfig("morphology kernel too large".into()));
        }
        Ok(())
    }
}
