//! WebAssembly exports for the converter kernels.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Stateless
//! filters take the flat `ImageData.data` bytes plus dimensions; the
//! [`CanvasSession`] class wraps a whole [`Pipeline`] for an interactive
//! canvas.

use wasm_bindgen::prelude::*;

use crate::buffer::PixelBuffer;
use crate::compositor::{Point, Tool};
use crate::filters::{EdgeChannel, Filter, ResizePreset};
use crate::pipeline::Pipeline;

fn run(filter: Filter, data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = PixelBuffer::from_raw(width, height, data.to_vec())?;
    Ok(filter.apply(&input)?.into_raw())
}

// ============================================================================
// Stateless Filters
// ============================================================================

/// Convert RGBA bytes to grayscale (channel mean).
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
#[wasm_bindgen]
pub fn grayscale_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run(Filter::Grayscale, data, width, height)
}

/// Thresholded Sobel line drawing. `use_mean` reads the RGB mean instead of red.
#[wasm_bindgen]
pub fn sobel_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    use_mean: bool,
) -> Result<Vec<u8>, JsError> {
    let channel = if use_mean {
        EdgeChannel::Mean
    } else {
        EdgeChannel::Red
    };
    run(Filter::Sobel { channel }, data, width, height)
}

#[wasm_bindgen]
pub fn invert_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run(Filter::Invert, data, width, height)
}

#[wasm_bindgen]
pub fn brightness_contrast_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    brightness: i32,
    contrast: i32,
) -> Result<Vec<u8>, JsError> {
    run(
        Filter::BrightnessContrast {
            brightness,
            contrast,
        },
        data,
        width,
        height,
    )
}

/// Resize; the result has `target_width * target_height * 4` bytes.
#[wasm_bindgen]
pub fn resize_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    target_width: u32,
    target_height: u32,
) -> Result<Vec<u8>, JsError> {
    run(
        Filter::Resize {
            width: target_width,
            height: target_height,
        },
        data,
        width,
        height,
    )
}

// ============================================================================
// Interactive Session
// ============================================================================

#[wasm_bindgen]
pub struct CanvasSession {
    pipeline: Pipeline,
}

#[wasm_bindgen]
impl CanvasSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CanvasSession {
        CanvasSession {
            pipeline: Pipeline::default(),
        }
    }

    /// Load an encoded image file (PNG, JPEG, ...).
    pub fn load_file(&mut self, bytes: &[u8]) -> Result<(), JsError> {
        Ok(self.pipeline.load_encoded(bytes)?)
    }

    /// Load a decoded frame, e.g. `ImageData.data` from a video capture.
    pub fn load_rgba(&mut self, data: &[u8], width: usize, height: usize) -> Result<(), JsError> {
        let buffer = PixelBuffer::from_raw(width, height, data.to_vec())?;
        self.pipeline.load(buffer);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.pipeline.current().map_or(0, PixelBuffer::width)
    }

    pub fn height(&self) -> usize {
        self.pipeline.current().map_or(0, PixelBuffer::height)
    }

    /// Current RGBA bytes, ready for `new ImageData(...)`.
    pub fn pixels(&self) -> Vec<u8> {
        self.pipeline
            .current()
            .map(|buffer| buffer.as_raw().to_vec())
            .unwrap_or_default()
    }

    pub fn grayscale(&mut self) -> Result<(), JsError> {
        Ok(self.pipeline.grayscale()?)
    }

    pub fn line_drawing(&mut self) -> Result<(), JsError> {
        Ok(self.pipeline.line_drawing()?)
    }

    pub fn invert(&mut self) -> Result<(), JsError> {
        Ok(self.pipeline.invert()?)
    }

    pub fn set_brightness(&mut self, brightness: i32) {
        self.pipeline.set_brightness(brightness);
    }

    pub fn set_contrast(&mut self, contrast: i32) {
        self.pipeline.set_contrast(contrast);
    }

    pub fn apply_adjustments(&mut self) -> Result<(), JsError> {
        Ok(self.pipeline.apply_adjustments()?)
    }

    /// `size` is 300, 600 or 800.
    pub fn resize_preset(&mut self, size: u32) -> Result<(), JsError> {
        let preset = ResizePreset::ALL
            .into_iter()
            .find(|preset| preset.dimensions().0 == size)
            .ok_or_else(|| JsError::new(&format!("no resize preset for {size}")))?;
        Ok(self.pipeline.resize_preset(preset)?)
    }

    pub fn set_eraser(&mut self, eraser: bool) {
        let tool = if eraser { Tool::Eraser } else { Tool::Pencil };
        self.pipeline.set_tool(tool);
    }

    pub fn set_pencil_size(&mut self, size: u32) {
        self.pipeline.set_pencil_size(size);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.pipeline.pointer_down(Point::new(x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pipeline.pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.pipeline.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.pipeline.pointer_leave();
    }

    /// PNG bytes for the `canvas-image.png` download.
    pub fn export_png(&self) -> Result<Vec<u8>, JsError> {
        Ok(self.pipeline.export_png()?)
    }
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new()
    }
}
