// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image processing operations that turn a floor plan into a wall mask

use crate::config::RasterConfig;
use image::GrayImage;
use imageproc::distance_transform::Norm;

/// Apply Gaussian blur for noise reduction
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Apply Canny edge detection
pub fn canny_edges(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    imageproc::edges::canny(image, low_threshold, high_threshold)
}

/// Morphological dilation with a square element of side `2 * radius + 1`
pub fn dilate(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::dilate(image, Norm::LInf, radius)
}

/// Morphological erosion with a square element of side `2 * radius + 1`
pub fn erode(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::erode(image, Norm::LInf, radius)
}

/// Morphological closing (dilate then erode) - fills gaps between edges
pub fn morphological_close(image: &GrayImage, radius: u8) -> GrayImage {
    let dilated = dilate(image, radius);
    erode(&dilated, radius)
}

/// Square element side to radius
fn kernel_radius(size: u32) -> u8 {
    (size / 2).min(u8::MAX as u32) as u8
}

/// Blur, edge-detect, close and erode a grayscale plan.
///
/// Thick wall strokes produce two parallel edges that the closing merges
/// into a solid band; thin strokes (text, hatching, furniture) stay thin
/// and mostly vanish under the final erosion.
pub fn wall_mask(grayscale: &GrayImage, config: &RasterConfig) -> GrayImage {
    let blurred = gaussian_blur(grayscale, config.blur_sigma());
    let edges = canny_edges(&blurred, config.canny_low, config.canny_high);
    let closed = morphological_close(&edges, kernel_radius(config.close_kernel_size));
    erode(&closed, kernel_radius(config.erode_kernel_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn count_white(img: &GrayImage) -> usize {
        img.pixels().filter(|p| p.0[0] > 128).count()
    }

    #[test]
    fn test_close_fills_gap() {
        let mut img = GrayImage::new(20, 20);
        for x in 2..18 {
            img.put_pixel(x, 8, Luma([255]));
            img.put_pixel(x, 11, Luma([255]));
        }

        let closed = morphological_close(&img, 2);

        assert_eq!(closed.get_pixel(10, 9).0[0], 255);
        assert_eq!(closed.get_pixel(10, 10).0[0], 255);
        assert_eq!(closed.get_pixel(10, 2).0[0], 0);
    }

    #[test]
    fn test_erode_removes_thin_lines() {
        let mut img = GrayImage::new(20, 20);
        for x in 0..20 {
            img.put_pixel(x, 5, Luma([255]));
        }
        for x in 0..20 {
            for y in 10..15 {
                img.put_pixel(x, y, Luma([255]));
            }
        }

        let eroded = erode(&img, 1);

        assert_eq!(eroded.get_pixel(10, 5).0[0], 0);
        assert_eq!(eroded.get_pixel(10, 12).0[0], 255);
    }

    #[test]
    fn test_wall_mask_blank_image() {
        let img = GrayImage::from_pixel(40, 40, Luma([255]));
        let mask = wall_mask(&img, &RasterConfig::default());
        assert_eq!(count_white(&mask), 0);
    }

    #[test]
    fn test_kernel_radius() {
        assert_eq!(kernel_radius(13), 6);
        assert_eq!(kernel_radius(3), 1);
        assert_eq!(kernel_radius(1), 0);
    }
}
