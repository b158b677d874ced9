//! Filter modules for the converter's pixel transforms.
//!
//! ## Supported Format
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! ## Architecture
//!
//! All kernels follow these principles:
//! - **Pure** - Read an `ArrayView3<u8>`, allocate and return a new `Array3<u8>`
//! - **Alpha preservation** - Alpha is copied through, except for Sobel which
//!   produces its own opaque interior / transparent border
//! - **Clamped writes** - Every float result is stored via [`channel::clamp_u8`]
//!
//! [`Filter`] is the serializable description of one transform plus its
//! parameters; the pipeline and batch drivers only ever go through it.

pub mod channel;
pub mod grayscale;
pub mod edge;
pub mod color_adjust;
pub mod resize;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::Result;

pub use edge::EdgeChannel;
pub use resize::ResizePreset;

/// One transform step.
///
/// Deserializes from an internally tagged object, e.g.
/// `{"op": "brightness_contrast", "brightness": 120, "contrast": 0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    Grayscale,
    Sobel {
        #[serde(default)]
        channel: EdgeChannel,
    },
    Invert,
    BrightnessContrast { brightness: i32, contrast: i32 },
    Resize { width: u32, height: u32 },
}

impl Filter {
    /// Line drawing as the converter does it (red channel as brightness).
    pub const LINE_DRAWING: Filter = Filter::Sobel {
        channel: EdgeChannel::Red,
    };

    pub fn preset(preset: ResizePreset) -> Self {
        let (width, height) = preset.dimensions();
        Filter::Resize { width, height }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Sobel { .. } => "sobel",
            Filter::Invert => "invert",
            Filter::BrightnessContrast { .. } => "brightness_contrast",
            Filter::Resize { .. } => "resize",
        }
    }

    /// Run the transform, producing a new buffer. `input` is never modified.
    ///
    /// # Errors
    /// Only `Resize` can fail (zero target dimensions).
    pub fn apply(&self, input: &PixelBuffer) -> Result<PixelBuffer> {
        let view = input.view();
        let output = match *self {
            Filter::Grayscale => grayscale::grayscale_mean_u8(view),
            Filter::Sobel { channel } => edge::sobel_threshold_u8(view, channel),
            Filter::Invert => color_adjust::invert_u8(view),
            Filter::BrightnessContrast {
                brightness,
                contrast,
            } => color_adjust::brightness_contrast_u8(view, brightness, contrast),
            Filter::Resize { width, height } => return resize::resize_rgba(input, width, height),
        };
        Ok(PixelBuffer::from_kernel(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_buffer() -> impl Strategy<Value = PixelBuffer> {
        (0usize..8, 0usize..8).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<u8>(), w * h * 4)
                .prop_map(move |samples| PixelBuffer::from_raw(w, h, samples).unwrap())
        })
    }

    #[test]
    fn test_grayscale_then_invert_scenario() {
        let input =
            PixelBuffer::from_raw(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();

        let gray = Filter::Grayscale.apply(&input).unwrap();
        assert_eq!(gray.as_raw(), &[85, 85, 85, 255, 85, 85, 85, 255]);

        let inverted = Filter::Invert.apply(&gray).unwrap();
        assert_eq!(inverted.as_raw(), &[170, 170, 170, 255, 170, 170, 170, 255]);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let input = PixelBuffer::filled(3, 3, [1, 2, 3, 4]);
        let before = input.clone();
        let _ = Filter::Invert.apply(&input).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_filter_deserializes_from_tagged_json() {
        let steps: Vec<Filter> = serde_json::from_str(
            r#"[
                {"op": "grayscale"},
                {"op": "sobel"},
                {"op": "sobel", "channel": "mean"},
                {"op": "brightness_contrast", "brightness": 120, "contrast": 10},
                {"op": "resize", "width": 300, "height": 300}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            steps,
            vec![
                Filter::Grayscale,
                Filter::LINE_DRAWING,
                Filter::Sobel {
                    channel: EdgeChannel::Mean
                },
                Filter::BrightnessContrast {
                    brightness: 120,
                    contrast: 10
                },
                Filter::preset(ResizePreset::Small),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_grayscale_is_idempotent(buffer in arb_buffer()) {
            let once = Filter::Grayscale.apply(&buffer).unwrap();
            let twice = Filter::Grayscale.apply(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_invert_is_an_involution(buffer in arb_buffer()) {
            let back = Filter::Invert
                .apply(&Filter::Invert.apply(&buffer).unwrap())
                .unwrap();
            prop_assert_eq!(back, buffer);
        }

        #[test]
        fn prop_sobel_border_is_transparent_black(
            buffer in (3usize..9, 3usize..9).prop_flat_map(|(w, h)| {
                proptest::collection::vec(any::<u8>(), w * h * 4)
                    .prop_map(move |s| PixelBuffer::from_raw(w, h, s).unwrap())
            })
        ) {
            let (w, h) = (buffer.width(), buffer.height());
            let out = Filter::LINE_DRAWING.apply(&buffer).unwrap();
            for y in 0..h {
                for x in 0..w {
                    let px = out.pixel(x, y).unwrap();
                    if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                        prop_assert_eq!(px, [0, 0, 0, 0]);
                    } else {
                        prop_assert!(px == [0, 0, 0, 255] || px == [255, 255, 255, 255]);
                    }
                }
            }
        }

        #[test]
        fn prop_neutral_adjustment_is_identity(buffer in arb_buffer()) {
            let out = Filter::BrightnessContrast { brightness: 100, contrast: 0 }
                .apply(&buffer)
                .unwrap();
            prop_assert_eq!(out, buffer);
        }

        #[test]
        fn prop_resize_hits_target(buffer in arb_buffer(), w in 1u32..40, h in 1u32..40) {
            let out = Filter::Resize { width: w, height: h }.apply(&buffer).unwrap();
            prop_assert_eq!((out.width(), out.height()), (w as usize, h as usize));
        }
    }

    #[test]
    fn test_resize_600_contract_regardless_of_input() {
        for (w, h) in [(1, 1), (1000, 3), (600, 600)] {
            let out = Filter::preset(ResizePreset::Medium)
                .apply(&PixelBuffer::filled(w, h, [0, 0, 0, 255]))
                .unwrap();
            assert_eq!((out.width(), out.height()), (600, 600));
        }
    }
}
