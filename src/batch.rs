//! Video-frame batches.
//!
//! Frames are captured one at a time from a [`FrameSource`]: a seek to
//! `i * interval` is issued only after the previous frame came back.
//! Transforms over a captured batch are independent per frame and run in
//! parallel with rayon; output order always matches capture order.

use std::io::{Cursor, Write};
use std::time::Duration;

use rayon::prelude::*;
use tracing::{debug, info, instrument};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};
use crate::filters::Filter;
use crate::pipeline::ExportedImage;

/// Something that can seek a video and hand back the frame shown there.
pub trait FrameSource {
    /// Seek to `at` and return the frame once the seek has settled.
    fn capture_at(&mut self, at: Duration) -> Result<PixelBuffer>;
}

/// Timestamps `0, interval, 2 * interval, ...` for `count` frames.
pub fn capture_schedule(count: u32, interval: Duration) -> Vec<Duration> {
    (0..count).map(|i| interval.saturating_mul(i)).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameBatch {
    frames: Vec<PixelBuffer>,
    processed: Vec<PixelBuffer>,
}

impl FrameBatch {
    pub fn new(frames: Vec<PixelBuffer>) -> Self {
        Self {
            frames,
            processed: Vec::new(),
        }
    }

    /// Capture `count` frames, `interval` apart, strictly in sequence.
    ///
    /// # Errors
    /// The first capture failure aborts the batch.
    #[instrument(skip(source))]
    pub fn capture<S: FrameSource + ?Sized>(
        source: &mut S,
        count: u32,
        interval: Duration,
    ) -> Result<Self> {
        let mut frames = Vec::with_capacity(count as usize);
        for (index, at) in capture_schedule(count, interval).into_iter().enumerate() {
            let frame = source.capture_at(at)?;
            debug!(index, at_ms = at.as_millis() as u64, "Frame captured");
            frames.push(frame);
        }
        info!(frames = frames.len(), "Capture complete");
        Ok(Self::new(frames))
    }

    pub fn frames(&self) -> &[PixelBuffer] {
        &self.frames
    }

    pub fn processed(&self) -> &[PixelBuffer] {
        &self.processed
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Apply `filter` to the captured frames, replacing any processed set.
    #[instrument(skip(self), fields(filter = filter.name(), frames = self.frames.len()))]
    pub fn transform_frames(&mut self, filter: &Filter) -> Result<()> {
        self.processed = apply_parallel(&self.frames, filter)?;
        Ok(())
    }

    /// Apply `filter` to the processed frames, or to the captured frames if
    /// nothing has been processed yet. Lets transforms stack, e.g. a line
    /// drawing followed by inversion.
    #[instrument(skip(self), fields(filter = filter.name()))]
    pub fn transform_processed(&mut self, filter: &Filter) -> Result<()> {
        let input = if self.processed.is_empty() {
            &self.frames
        } else {
            &self.processed
        };
        self.processed = apply_parallel(input, filter)?;
        Ok(())
    }

    /// Captured frames as `screenshots/screenshot{n}.png`.
    pub fn export_frames(&self) -> Result<Vec<ExportedImage>> {
        export_parallel(&self.frames, "screenshots/screenshot")
    }

    /// Processed frames as `processed_images/processed_image{n}.png`.
    pub fn export_processed(&self) -> Result<Vec<ExportedImage>> {
        if self.processed.is_empty() {
            return Err(FilterError::InvalidState("no processed frames"));
        }
        export_parallel(&self.processed, "processed_images/processed_image")
    }

    /// [`export_frames`](Self::export_frames) packed into `screenshots.zip`.
    pub fn export_frames_zip(&self) -> Result<ExportedImage> {
        write_archive("screenshots.zip", &self.export_frames()?)
    }

    /// [`export_processed`](Self::export_processed) packed into `processed_images.zip`.
    pub fn export_processed_zip(&self) -> Result<ExportedImage> {
        write_archive("processed_images.zip", &self.export_processed()?)
    }
}

/// Entries are stored without recompression.
#[instrument(skip(entries), fields(entries = entries.len()))]
fn write_archive(file_name: &str, entries: &[ExportedImage]) -> Result<ExportedImage> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        writer.start_file(entry.file_name.as_str(), options)?;
        writer
            .write_all(&entry.bytes)
            .map_err(|e| FilterError::Archive(e.to_string()))?;
    }
    let bytes = writer.finish()?.into_inner();
    debug!(bytes = bytes.len(), "Archive written");
    Ok(ExportedImage {
        file_name: file_name.to_string(),
        bytes,
    })
}

fn apply_parallel(frames: &[PixelBuffer], filter: &Filter) -> Result<Vec<PixelBuffer>> {
    frames.par_iter().map(|frame| filter.apply(frame)).collect()
}

fn export_parallel(frames: &[PixelBuffer], stem: &str) -> Result<Vec<ExportedImage>> {
    frames
        .par_iter()
        .enumerate()
        .map(|(index, frame)| -> Result<ExportedImage> {
            Ok(ExportedImage {
                file_name: format!("{stem}{}.png", index + 1),
                bytes: frame.encode_png()?,
            })
        })
        .collect()
}
