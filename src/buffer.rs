//! RGBA pixel buffer and its PNG codec.
//!
//! A [`PixelBuffer`] wraps an `Array3<u8>` of shape `(height, width, 4)` in
//! standard (row-major) layout, so the flat sample slice is exactly the
//! `R, G, B, A, R, G, B, A, ...` sequence a canvas `ImageData` would hold.
//!
//! Decoding accepts anything the `image` crate recognizes; encoding always
//! produces PNG.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use ndarray::{Array3, ArrayView3};
use tracing::{debug, instrument};

use crate::error::{FilterError, Result};

/// Samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Opaque white, the canvas background and eraser color.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Opaque black, the pencil color.
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Zero-initialized (transparent black) buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array3::<u8>::zeros((height, width, CHANNELS)),
        }
    }

    /// Buffer with every pixel set to `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        Self {
            data: Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| rgba[c]),
        }
    }

    /// Wrap a flat row-major RGBA sample vector.
    ///
    /// # Errors
    /// `DimensionMismatch` if `samples.len() != width * height * 4`.
    pub fn from_raw(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(FilterError::InvalidDimensions { width, height })?;
        if samples.len() != expected {
            return Err(FilterError::DimensionMismatch {
                expected,
                got: samples.len(),
            });
        }
        let got = samples.len();
        let data = Array3::from_shape_vec((height, width, CHANNELS), samples)
            .map_err(|_| FilterError::DimensionMismatch { expected, got })?;
        Ok(Self { data })
    }

    /// Wrap an `(height, width, 4)` array, copying into standard layout if needed.
    ///
    /// The backing allocation may be larger than the visible array (e.g. after
    /// `slice_axis_inplace`); only the visible samples are kept.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if channels != CHANNELS {
            return Err(FilterError::InvalidDimensions { width, height });
        }
        if !data.is_standard_layout() {
            return Ok(Self {
                data: data.as_standard_layout().into_owned(),
            });
        }
        let len = data.len();
        let (mut samples, offset) = data.into_raw_vec_and_offset();
        let start = offset.unwrap_or(0);
        samples.truncate(start + len);
        samples.drain(..start);
        Self::from_raw(width, height, samples)
    }

    /// Filter kernels always allocate fresh `(h, w, 4)` arrays.
    pub(crate) fn from_kernel(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, CHANNELS);
        debug_assert!(data.is_standard_layout());
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat RGBA samples in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        self.data.as_slice().unwrap_or(&[])
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some([
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        ])
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        for (c, value) in rgba.into_iter().enumerate() {
            self.data[[y, x, c]] = value;
        }
    }

    /// Consume the buffer, returning the flat RGBA samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    // -- Codec ----------------------------------------------------------------

    /// Decode PNG, JPEG, GIF, BMP, ... bytes into an RGBA buffer.
    #[instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|err| FilterError::Decode(err.to_string()))?;
        debug!(width = image.width(), height = image.height(), "Image decoded");
        Self::from_rgba_image(image.into_rgba8())
    }

    pub fn from_rgba_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_raw(width as usize, height as usize, image.into_raw())
    }

    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let (width, height) = (self.width(), self.height());
        RgbaImage::from_raw(width as u32, height as u32, self.as_raw().to_vec()).ok_or(
            FilterError::DimensionMismatch {
                expected: width * height * CHANNELS,
                got: self.as_raw().len(),
            },
        )
    }

    /// Encode as PNG bytes.
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let image = self.to_rgba_image()?;
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| FilterError::Encode(err.to_string()))?;
        debug!(len = bytes.len(), "PNG encoded");
        Ok(bytes)
    }
}
