//! Sobel line-drawing filter.
//!
//! Convolves a single brightness plane with the horizontal and vertical
//! Sobel kernels and thresholds the gradient magnitude into a binary
//! black/white image: white where `sqrt(gx² + gy²) > 128`, black elsewhere.
//!
//! ## Brightness source
//!
//! By default only the red channel is read as brightness. That is exact for
//! images that were grayscaled first; on a color image the result depends on
//! red alone. [`EdgeChannel::Mean`] reads the RGB mean instead.
//!
//! ## Borders
//!
//! Pixels on the outer ring (x = 0, y = 0, x = w-1, y = h-1) keep their
//! zero-initialized value `(0, 0, 0, 0)`: black and fully transparent.
//! Interior pixels are always opaque.

use ndarray::{Array2, Array3, ArrayView3};
use serde::{Deserialize, Serialize};

use super::channel::mean_rgb;

/// Gradient magnitude above which a pixel is classified as an edge.
pub const EDGE_THRESHOLD: f64 = 128.0;

const KERNEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const KERNEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Which value of a pixel is treated as its brightness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeChannel {
    /// Red channel only.
    #[default]
    Red,
    /// Arithmetic mean of R, G, B.
    Mean,
}

fn brightness_plane(input: &ArrayView3<u8>, channel: EdgeChannel) -> Array2<i32> {
    let (height, width, _) = input.dim();
    Array2::from_shape_fn((height, width), |(y, x)| match channel {
        EdgeChannel::Red => input[[y, x, 0]] as i32,
        EdgeChannel::Mean => {
            mean_rgb(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]) as i32
        }
    })
}

/// Apply thresholded Sobel edge detection to an RGBA u8 image.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4)
/// * `channel` - Brightness source, see [`EdgeChannel`]
///
/// # Returns
/// Binary RGBA image of the same dimensions
pub fn sobel_threshold_u8(input: ArrayView3<u8>, channel: EdgeChannel) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));
    let plane = brightness_plane(&input, channel);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut gx = 0i32;
            let mut gy = 0i32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let lum = plane[[y + ky - 1, x + kx - 1]];
                    gx += lum * KERNEL_X[ky][kx];
                    gy += lum * KERNEL_Y[ky][kx];
                }
            }

            let magnitude = ((gx * gx + gy * gy) as f64).sqrt();
            let edge = if magnitude > EDGE_THRESHOLD { 255 } else { 0 };

            output[[y, x, 0]] = edge;
            output[[y, x, 1]] = edge;
            output[[y, x, 2]] = edge;
            output[[y, x, 3]] = 255;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_edge(width: usize, height: usize, split: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = if x < split { 0 } else { 255 };
                img[[y, x, 3]] = 255;
            }
        }
        img
    }

    #[test]
    fn test_sobel_classifies_hard_vertical_edge() {
        // Columns 0..=2 dark, 3..=4 bright.
        let img = vertical_edge(5, 5, 3);
        let result = sobel_threshold_u8(img.view(), EdgeChannel::Red);

        for y in 1..4 {
            // x = 1 sees only dark columns
            assert_eq!(result[[y, 1, 0]], 0);
            assert_eq!(result[[y, 1, 3]], 255);
            // x = 2 and x = 3 straddle the boundary
            assert_eq!(result[[y, 2, 0]], 255);
            assert_eq!(result[[y, 3, 0]], 255);
            assert_eq!(result[[y, 3, 1]], 255);
            assert_eq!(result[[y, 3, 2]], 255);
            assert_eq!(result[[y, 3, 3]], 255);
        }
    }

    #[test]
    fn test_sobel_flat_region_is_opaque_black() {
        let mut img = Array3::<u8>::zeros((4, 4, 4));
        img.fill(200);
        let result = sobel_threshold_u8(img.view(), EdgeChannel::Red);

        for y in 1..3 {
            for x in 1..3 {
                assert_eq!(result[[y, x, 0]], 0);
                assert_eq!(result[[y, x, 3]], 255);
            }
        }
    }

    #[test]
    fn test_sobel_borders_are_transparent_black() {
        let img = vertical_edge(6, 4, 2);
        let result = sobel_threshold_u8(img.view(), EdgeChannel::Red);

        for y in 0..4 {
            for x in 0..6 {
                if x == 0 || y == 0 || x == 5 || y == 3 {
                    for c in 0..4 {
                        assert_eq!(result[[y, x, c]], 0, "border ({x}, {y}) channel {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_sobel_reads_red_channel_only() {
        // Edge lives entirely in the green channel; red is flat.
        let mut img = Array3::<u8>::zeros((5, 5, 4));
        for y in 0..5 {
            for x in 0..5 {
                img[[y, x, 1]] = if x < 2 { 0 } else { 255 };
                img[[y, x, 3]] = 255;
            }
        }

        let red = sobel_threshold_u8(img.view(), EdgeChannel::Red);
        assert!((1..4).all(|y| (1..4).all(|x| red[[y, x, 0]] == 0)));

        let mean = sobel_threshold_u8(img.view(), EdgeChannel::Mean);
        assert_eq!(mean[[2, 2, 0]], 255);
    }

    #[test]
    fn test_sobel_weak_gradient_below_threshold() {
        // A step of 32 gives |gx| = 128, which is not > 128.
        let mut img = Array3::<u8>::zeros((3, 3, 4));
        for y in 0..3 {
            img[[y, 2, 0]] = 32;
        }
        let result = sobel_threshold_u8(img.view(), EdgeChannel::Red);
        assert_eq!(result[[1, 1, 0]], 0);

        for y in 0..3 {
            img[[y, 2, 0]] = 33;
        }
        let result = sobel_threshold_u8(img.view(), EdgeChannel::Red);
        assert_eq!(result[[1, 1, 0]], 255);
    }

    #[test]
    fn test_sobel_tiny_images_are_all_zero() {
        let mut img = Array3::<u8>::zeros((2, 7, 4));
        img.fill(255);
        let result = sobel_threshold_u8(img.view(), EdgeChannel::Red);
        assert!(result.iter().all(|&v| v == 0));
    }
}
