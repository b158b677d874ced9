//! Grayscale conversion filter.
//!
//! Uses the plain arithmetic mean of R, G and B (no luminosity weights,
//! no gamma correction). The mean is written through
//! [`clamp_u8`](super::channel::clamp_u8), i.e. rounded to nearest.

use ndarray::{Array3, ArrayView3};

use super::channel::mean_rgb;

/// Convert an RGBA u8 image to grayscale (mean method).
///
/// Output is RGBA with R=G=B=mean, A preserved.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4) with RGBA u8 values (0-255)
///
/// # Returns
/// New array with grayscale values in RGB channels, alpha preserved
pub fn grayscale_mean_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let gray = mean_rgb(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);

            output[[y, x, 0]] = gray;
            output[[y, x, 1]] = gray;
            output[[y, x, 2]] = gray;
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }

    output
}
