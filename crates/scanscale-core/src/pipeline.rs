//! Fluent pipelines over boxed scanline sources.
//!
//! [`Pipeline`] owns a `Box<dyn ScanlineSource>` and wraps it in one
//! operator per call, so a whole decode-transform-encode job reads as a
//! chain:
//!
//! ```ignore
//! let jpeg = Pipeline::from_bytes(&input)?
//!     .fit(1280, 1280)?
//!     .to_jpeg(90)?;
//! ```
//!
//! Nothing runs until rows are pulled; the terminal calls (`to_jpeg`,
//! `to_png`, `collect`) drain the chain one scanline at a time.

use crate::alpha::AlphaStripper;
use crate::codec::{self, CodecError};
use crate::crop::Cropper;
use crate::scale::{BilinearScaler, Fit, NearestNeighborScaler};
use crate::source::{collect_scanlines, BufferSource, ScanlineSource, StreamError};
use crate::Filter;

/// A chain of scanline operators with a fluent builder API.
pub struct Pipeline {
    source: Box<dyn ScanlineSource>,
}

impl Pipeline {
    /// Start a pipeline from any scanline source.
    pub fn new<S: ScanlineSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Start a pipeline by decoding compressed JPEG/PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] if the bytes are not a decodable
    /// image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(Self::new(codec::read_image(bytes)?))
    }

    /// Current width in pixels.
    pub fn width(&self) -> u32 {
        self.source.width()
    }

    /// Current height in pixels.
    pub fn height(&self) -> u32 {
        self.source.height()
    }

    /// Current channel values per pixel.
    pub fn components(&self) -> u8 {
        self.source.components()
    }

    /// Scale to `width` x `height` with bilinear interpolation.
    pub fn scale_bilinear(self, width: u32, height: u32) -> Result<Self, StreamError> {
        Ok(Self::new(BilinearScaler::new(self.source, width, height)?))
    }

    /// Scale to `width` x `height` with nearest-neighbor interpolation.
    pub fn scale_nearest(self, width: u32, height: u32) -> Result<Self, StreamError> {
        Ok(Self::new(NearestNeighborScaler::new(
            self.source,
            width,
            height,
        )?))
    }

    /// Scale to `width` x `height` with the given filter.
    pub fn scale(self, width: u32, height: u32, filter: Filter) -> Result<Self, StreamError> {
        match filter {
            Filter::NearestNeighbor => self.scale_nearest(width, height),
            Filter::Bilinear => self.scale_bilinear(width, height),
        }
    }

    /// Scale to fit inside `width` x `height`, preserving aspect ratio.
    pub fn fit(self, width: u32, height: u32) -> Result<Self, StreamError> {
        Ok(Self::new(Fit::new(self.source, width, height)?))
    }

    /// Crop to `width` x `height` at `(x_offset, y_offset)`, truncating at
    /// the image boundary.
    pub fn crop(
        self,
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> Result<Self, StreamError> {
        Ok(Self::new(Cropper::new(
            self.source,
            width,
            height,
            x_offset,
            y_offset,
        )?))
    }

    /// Drop the alpha channel, if any.
    pub fn strip_alpha(self) -> Self {
        Self::new(AlphaStripper::new(self.source))
    }

    /// Drain the pipeline into an in-memory image.
    pub fn collect(mut self) -> Result<BufferSource, StreamError> {
        let (width, height, components) = (self.width(), self.height(), self.components());
        let data = collect_scanlines(&mut self.source)?;
        BufferSource::new(width, height, components, data)
    }

    /// Drain the pipeline into JPEG bytes.
    pub fn to_jpeg(mut self, quality: u8) -> Result<Vec<u8>, CodecError> {
        codec::write_jpeg(&mut self.source, quality)
    }

    /// Drain the pipeline into PNG bytes.
    pub fn to_png(mut self) -> Result<Vec<u8>, CodecError> {
        codec::write_png(&mut self.source)
    }
}

impl ScanlineSource for Pipeline {
    fn width(&self) -> u32 {
        self.source.width()
    }

    fn height(&self) -> u32 {
        self.source.height()
    }

    fn components(&self) -> u8 {
        self.source.components()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        self.source.next_scanline()
    }
}
