//! Core utilities shared by the pixel kernels.
//!
//! - Clamped 8-bit write (the conversion every float result goes through)
//! - Channel mean used by grayscale and mean-brightness edge detection

/// Convert a computed channel value to a stored byte.
///
/// Matches a clamped byte array write: `NaN` becomes 0, values are clamped
/// to `[0, 255]` (so infinities saturate), and the remainder is rounded to
/// nearest with ties to even.
#[inline]
pub fn clamp_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Arithmetic mean of the three color channels, no gamma correction.
#[inline]
pub fn mean_rgb(r: u8, g: u8, b: u8) -> u8 {
    clamp_u8((r as f64 + g as f64 + b as f64) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_u8_saturates() {
        assert_eq!(clamp_u8(-12.0), 0);
        assert_eq!(clamp_u8(300.0), 255);
        assert_eq!(clamp_u8(f64::INFINITY), 255);
        assert_eq!(clamp_u8(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_clamp_u8_nan_is_zero() {
        assert_eq!(clamp_u8(f64::NAN), 0);
    }

    #[test]
    fn test_clamp_u8_rounds_half_to_even() {
        assert_eq!(clamp_u8(0.5), 0);
        assert_eq!(clamp_u8(1.5), 2);
        assert_eq!(clamp_u8(2.5), 2);
        assert_eq!(clamp_u8(2.6), 3);
        assert_eq!(clamp_u8(254.5), 254);
    }

    #[test]
    fn test_mean_rgb_rounds_to_nearest() {
        assert_eq!(mean_rgb(255, 0, 0), 85);
        assert_eq!(mean_rgb(1, 1, 2), 1);
        assert_eq!(mean_rgb(1, 2, 2), 2);
        assert_eq!(mean_rgb(255, 255, 255), 255);
    }
}
