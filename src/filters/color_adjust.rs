//! Color adjustment filters: Invert, Brightness/Contrast.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Alpha is always preserved unchanged.

use ndarray::{Array3, ArrayView3};

use super::channel::clamp_u8;

// ============================================================================
// Invert
// ============================================================================

/// Invert image colors.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
///
/// # Returns
/// Color-inverted image, alpha preserved
pub fn invert_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                output[[y, x, c]] = 255 - input[[y, x, c]];
            }
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }
    output
}

// ============================================================================
// Brightness / Contrast
// ============================================================================

/// Contrast stretch factor `259 (c + 255) / (255 (259 - c))`.
///
/// `contrast = 0` gives 1.0. At `contrast = 259` the denominator is zero and
/// the factor is `+inf`; above 259 it turns negative. No guard is applied.
pub fn contrast_factor(contrast: i32) -> f64 {
    let c = contrast as f64;
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Scale brightness, then stretch contrast around 128.
///
/// Each color channel is first multiplied by `brightness / 100` and written
/// back as a byte, then mapped through `factor * (v - 128) + 128` and written
/// again. Both writes clamp and round (see [`clamp_u8`]).
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `brightness` - Percentage, 100 = unchanged
/// * `contrast` - Value fed to [`contrast_factor`]
///
/// # Returns
/// Adjusted image, alpha preserved
pub fn brightness_contrast_u8(input: ArrayView3<u8>, brightness: i32, contrast: i32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    let scale = brightness as f64 / 100.0;
    let factor = contrast_factor(contrast);

    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                let brightened = clamp_u8(input[[y, x, c]] as f64 * scale) as f64;
                output[[y, x, c]] = clamp_u8(factor * (brightened - 128.0) + 128.0);
            }
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(r: u8, g: u8, b: u8, a: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = r;
        img[[0, 0, 1]] = g;
        img[[0, 0, 2]] = b;
        img[[0, 0, 3]] = a;
        img
    }

    // ========================================================================
    // Invert Tests
    // ========================================================================

    #[test]
    fn test_invert_u8_rgba() {
        let img = pixel(100, 200, 50, 128);
        let result = invert_u8(img.view());

        assert_eq!(result[[0, 0, 0]], 155);
        assert_eq!(result[[0, 0, 1]], 55);
        assert_eq!(result[[0, 0, 2]], 205);
        assert_eq!(result[[0, 0, 3]], 128); // Alpha unchanged
    }

    // ========================================================================
    // Brightness / Contrast Tests
    // ========================================================================

    #[test]
    fn test_contrast_factor_neutral_point() {
        assert_eq!(contrast_factor(0), 1.0);
        // The settings default of 100 is a real boost.
        assert!((contrast_factor(100) - 2.2677).abs() < 1e-3);
    }

    #[test]
    fn test_neutral_parameters_are_identity() {
        let img = pixel(0, 77, 255, 9);
        let result = brightness_contrast_u8(img.view(), 100, 0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_brightness_scales_before_contrast() {
        let img = pixel(100, 200, 255, 255);
        let result = brightness_contrast_u8(img.view(), 50, 0);

        assert_eq!(result[[0, 0, 0]], 50);
        assert_eq!(result[[0, 0, 1]], 100);
        // 127.5 rounds to even
        assert_eq!(result[[0, 0, 2]], 128);
    }

    #[test]
    fn test_brightness_clamps_before_contrast() {
        // 200 * 2 saturates to 255 before the contrast step sees it.
        let img = pixel(200, 0, 0, 255);
        let result = brightness_contrast_u8(img.view(), 200, 0);
        assert_eq!(result[[0, 0, 0]], 255);
        assert_eq!(result[[0, 0, 1]], 0);
    }

    #[test]
    fn test_default_contrast_stretches_around_mid_gray() {
        let img = pixel(128, 140, 100, 255);
        let result = brightness_contrast_u8(img.view(), 100, 100);

        assert_eq!(result[[0, 0, 0]], 128);
        // 2.2677 * 12 + 128 = 155.2
        assert_eq!(result[[0, 0, 1]], 155);
        // 2.2677 * -28 + 128 = 64.504
        assert_eq!(result[[0, 0, 2]], 65);
    }

    #[test]
    fn test_contrast_259_divides_by_zero() {
        let img = pixel(200, 50, 128, 77);
        let result = brightness_contrast_u8(img.view(), 100, 259);

        assert!(contrast_factor(259).is_infinite());
        assert_eq!(result[[0, 0, 0]], 255); // +inf
        assert_eq!(result[[0, 0, 1]], 0); // -inf
        assert_eq!(result[[0, 0, 2]], 0); // inf * 0 = NaN
        assert_eq!(result[[0, 0, 3]], 77);
    }

    #[test]
    fn test_contrast_above_259_flips_around_mid_gray() {
        let img = pixel(200, 50, 128, 255);
        let result = brightness_contrast_u8(img.view(), 100, 300);

        assert!(contrast_factor(300) < 0.0);
        assert_eq!(result[[0, 0, 0]], 0);
        assert_eq!(result[[0, 0, 1]], 255);
        assert_eq!(result[[0, 0, 2]], 128);
    }
}
