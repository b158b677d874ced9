//! Pipeline driver: owns the current working buffer.
//!
//! Every transform replaces the current buffer with a freshly computed one;
//! strokes are the only in-place edits. There is no history: loading a new
//! image or applying a transform discards the previous state for good.
//!
//! ```
//! use linecanvas::{Filter, Pipeline, PixelBuffer};
//!
//! let mut pipeline = Pipeline::default();
//! pipeline.load(PixelBuffer::filled(4, 4, [200, 10, 10, 255]));
//! pipeline.apply_all(&[Filter::Grayscale, Filter::Invert])?;
//! let png = pipeline.export()?;
//! assert_eq!(png.file_name, "canvas-image.png");
//! # Ok::<(), linecanvas::FilterError>(())
//! ```

use tracing::{debug, info, instrument, warn};

use crate::buffer::PixelBuffer;
use crate::compositor::{Compositor, Point, Tool};
use crate::error::{FilterError, Result};
use crate::filters::{Filter, ResizePreset};
use crate::settings::ConverterSettings;

/// File name the converter offers the exported canvas under.
pub const EXPORT_FILE_NAME: &str = "canvas-image.png";

const NOT_LOADED: &str = "no image loaded";

/// An encoded image ready to be handed to a download or archive writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    settings: ConverterSettings,
    /// The buffer as it was loaded, used by [`Pipeline::redraw_source`].
    source: Option<PixelBuffer>,
    current: Option<PixelBuffer>,
    compositor: Compositor,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ConverterSettings::default())
    }
}

impl Pipeline {
    /// Out-of-range pencil sizes are clamped, in the compositor and in the
    /// stored settings alike.
    pub fn new(mut settings: ConverterSettings) -> Self {
        let compositor = Compositor::new(settings.tool, settings.pencil_size);
        settings.pencil_size = compositor.pencil_size();
        Self {
            settings,
            source: None,
            current: None,
            compositor,
        }
    }

    // -- Settings -------------------------------------------------------------

    pub fn settings(&self) -> &ConverterSettings {
        &self.settings
    }

    pub fn set_brightness(&mut self, brightness: i32) {
        self.settings.brightness = brightness;
    }

    pub fn set_contrast(&mut self, contrast: i32) {
        self.settings.contrast = contrast;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.settings.tool = tool;
        self.compositor.set_tool(tool);
    }

    /// Clamped to `1..=20`.
    pub fn set_pencil_size(&mut self, size: u32) {
        self.compositor.set_pencil_size(size);
        self.settings.pencil_size = self.compositor.pencil_size();
    }

    // -- Buffer ownership -----------------------------------------------------

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    /// Move the current buffer out. The pipeline is empty afterwards, but
    /// the loaded source is kept for [`Pipeline::redraw_source`].
    pub fn take(&mut self) -> Option<PixelBuffer> {
        self.compositor.pointer_up();
        self.current.take()
    }

    /// Replace everything with `buffer`. Any stroke in progress ends.
    #[instrument(skip_all, fields(width = buffer.width(), height = buffer.height()))]
    pub fn load(&mut self, buffer: PixelBuffer) {
        self.compositor.pointer_up();
        self.source = Some(buffer.clone());
        self.current = Some(buffer);
        info!("Image loaded");
    }

    /// Decode `bytes` and load the result. On failure nothing changes.
    pub fn load_encoded(&mut self, bytes: &[u8]) -> Result<()> {
        let buffer = PixelBuffer::decode(bytes)?;
        self.load(buffer);
        Ok(())
    }

    fn current_or_err(&self) -> Result<&PixelBuffer> {
        self.current.as_ref().ok_or_else(|| {
            warn!("Operation requested without a loaded image");
            FilterError::InvalidState(NOT_LOADED)
        })
    }

    // -- Transforms -----------------------------------------------------------

    /// Run `filter` on the current buffer and replace it with the result.
    #[instrument(skip(self), fields(filter = filter.name()))]
    pub fn apply(&mut self, filter: &Filter) -> Result<()> {
        let next = filter.apply(self.current_or_err()?)?;
        debug!(width = next.width(), height = next.height(), "Transform applied");
        self.current = Some(next);
        Ok(())
    }

    /// Apply `filters` in order. Stops at the first failure, keeping the
    /// steps that already ran.
    pub fn apply_all(&mut self, filters: &[Filter]) -> Result<()> {
        filters.iter().try_for_each(|filter| self.apply(filter))
    }

    /// Black and white via the channel mean.
    pub fn grayscale(&mut self) -> Result<()> {
        self.apply(&Filter::Grayscale)
    }

    /// Sobel line drawing using the configured edge channel.
    pub fn line_drawing(&mut self) -> Result<()> {
        let filter = self.settings.line_drawing();
        self.apply(&filter)
    }

    pub fn invert(&mut self) -> Result<()> {
        self.apply(&Filter::Invert)
    }

    /// Brightness/contrast with the current settings.
    pub fn apply_adjustments(&mut self) -> Result<()> {
        let filter = self.settings.adjustment();
        self.apply(&filter)
    }

    /// Resample the image as originally loaded into `width` x `height`.
    ///
    /// Unlike applying [`Filter::Resize`], every edit made since loading is
    /// dropped.
    #[instrument(skip(self))]
    pub fn redraw_source(&mut self, width: u32, height: u32) -> Result<()> {
        self.compositor.pointer_up();
        let source = self
            .source
            .as_ref()
            .ok_or(FilterError::InvalidState(NOT_LOADED))?;
        let next = Filter::Resize { width, height }.apply(source)?;
        info!("Source redrawn at new size");
        self.current = Some(next);
        Ok(())
    }

    /// Resize preset buttons: redraw the source at the preset size.
    pub fn resize_preset(&mut self, preset: ResizePreset) -> Result<()> {
        let (width, height) = preset.dimensions();
        self.redraw_source(width, height)
    }

    // -- Freehand drawing -----------------------------------------------------

    /// Returns whether a stroke started. Ignored without a loaded image.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        match &self.current {
            Some(buffer) => self.compositor.pointer_down(buffer, at),
            None => false,
        }
    }

    pub fn pointer_move(&mut self, at: Point) {
        if let Some(buffer) = self.current.as_mut() {
            self.compositor.pointer_move(buffer, at);
        }
    }

    pub fn pointer_up(&mut self) {
        self.compositor.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.compositor.pointer_leave();
    }

    pub fn is_drawing(&self) -> bool {
        self.compositor.is_drawing()
    }

    // -- Export ---------------------------------------------------------------

    pub fn export_png(&self) -> Result<Vec<u8>> {
        self.current_or_err()?.encode_png()
    }

    /// PNG bytes under the converter's download name.
    pub fn export(&self) -> Result<ExportedImage> {
        Ok(ExportedImage {
            file_name: EXPORT_FILE_NAME.to_string(),
            bytes: self.export_png()?,
        })
    }
}
