//! Resize filter and the converter's fixed size presets.
//!
//! Resampling is bilinear (`FilterType::Triangle`), the closest match to a
//! canvas `drawImage` scale with default smoothing.

use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};

/// Named output sizes offered by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePreset {
    Small,
    Medium,
    Large,
}

impl ResizePreset {
    pub const ALL: [ResizePreset; 3] = [
        ResizePreset::Small,
        ResizePreset::Medium,
        ResizePreset::Large,
    ];

    /// `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ResizePreset::Small => (300, 300),
            ResizePreset::Medium => (600, 600),
            ResizePreset::Large => (800, 800),
        }
    }
}

/// Scale `input` to exactly `width` x `height`, ignoring aspect ratio.
///
/// # Errors
/// `InvalidDimensions` if either target is zero.
pub fn resize_rgba(input: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidDimensions {
            width: width as usize,
            height: height as usize,
        });
    }
    if input.is_empty() {
        return Ok(PixelBuffer::new(width as usize, height as usize));
    }
    let source = input.to_rgba_image()?;
    let resized = imageops::resize(&source, width, height, FilterType::Triangle);
    PixelBuffer::from_rgba_image(resized)
}
