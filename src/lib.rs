//! linecanvas
//!
//! Image filter kernel behind an image/video "converter": black and white,
//! Sobel line drawing, color inversion, brightness/contrast, resize, and
//! freehand pencil/eraser strokes, with PNG export.
//!
//! Optional Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! All kernels operate on 8-bit RGBA:
//! - **RGBA**: (height, width, 4) - row-major, R G B A per pixel
//!
//! [`PixelBuffer`] owns such an array and guarantees the
//! `len == width * height * 4` invariant.
//!
//! ## Architecture
//! - [`filters`]: pure kernels, each returning a new buffer
//! - [`compositor`]: stroke rasterization straight into the current buffer
//! - [`pipeline`]: the single working buffer plus export
//! - [`batch`]: sequential frame capture and parallel per-frame transforms

pub mod batch;
pub mod buffer;
pub mod compositor;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod settings;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use batch::{FrameBatch, FrameSource};
pub use buffer::PixelBuffer;
pub use compositor::{Compositor, Point, Stroke, Tool};
pub use error::{FilterError, Result};
pub use filters::{EdgeChannel, Filter, ResizePreset};
pub use pipeline::{ExportedImage, Pipeline, EXPORT_FILE_NAME};
pub use settings::ConverterSettings;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyBytes;

    use crate::buffer::PixelBuffer;
    use crate::error::FilterError;
    use crate::filters::{EdgeChannel, Filter};

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> Self {
            PyValueError::new_err(err.to_string())
        }
    }

    fn run<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        filter: Filter,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = PixelBuffer::from_array(image.as_array().to_owned())?;
        let result = filter.apply(&input)?;
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Grayscale via the RGB mean. Input must be (H, W, 4) u8.
    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Grayscale)
    }

    /// Thresholded Sobel line drawing.
    ///
    /// # Arguments
    /// * `image` - Input image (H, W, 4)
    /// * `channel` - "red" (default) or "mean"
    #[pyfunction]
    #[pyo3(signature = (image, channel="red"))]
    pub fn sobel<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        channel: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let channel = match channel {
            "red" => EdgeChannel::Red,
            "mean" => EdgeChannel::Mean,
            other => {
                return Err(PyValueError::new_err(format!(
                    "channel must be 'red' or 'mean', got '{other}'"
                )))
            }
        };
        run(py, image, Filter::Sobel { channel })
    }

    #[pyfunction]
    pub fn invert<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Invert)
    }

    #[pyfunction]
    #[pyo3(signature = (image, brightness=100, contrast=100))]
    pub fn brightness_contrast<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        brightness: i32,
        contrast: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(
            py,
            image,
            Filter::BrightnessContrast {
                brightness,
                contrast,
            },
        )
    }

    #[pyfunction]
    pub fn resize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        width: u32,
        height: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Resize { width, height })
    }

    // ========================================================================
    // Codec
    // ========================================================================

    /// Decode encoded image bytes into an (H, W, 4) array.
    #[pyfunction]
    pub fn decode<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = PixelBuffer::decode(data)?;
        Ok(buffer.into_array().into_pyarray(py))
    }

    /// Encode an (H, W, 4) array as PNG bytes.
    #[pyfunction]
    pub fn encode_png<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let buffer = PixelBuffer::from_array(image.as_array().to_owned())?;
        let png = buffer.encode_png()?;
        Ok(PyBytes::new(py, &png))
    }

    /// linecanvas extension module
    #[pymodule]
    pub fn linecanvas(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(sobel, m)?)?;
        m.add_function(wrap_pyfunction!(invert, m)?)?;
        m.add_function(wrap_pyfunction!(brightness_contrast, m)?)?;
        m.add_function(wrap_pyfunction!(resize, m)?)?;
        m.add_function(wrap_pyfunction!(decode, m)?)?;
        m.add_function(wrap_pyfunction!(encode_png, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::linecanvas;
