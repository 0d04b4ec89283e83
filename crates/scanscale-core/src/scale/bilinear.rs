//! Bilinear streaming scaler.

use crate::resample;
use crate::source::{read_row, ScanlineSource, StreamError};

/// Scales a scanline stream with bilinear interpolation.
///
/// Keeps a two-row window over the source: for destination row `i` the
/// window holds source rows `floor(sample)` and `floor(sample) + 1`, where
/// `sample` comes from [`resample::source_position`] applied to the
/// vertical axis. Past the bottom edge the window repeats the last source
/// row, mirroring the horizontal clamp inside [`resample::bilinear`].
/// Source rows are read exactly once, in order, so memory use stays at two
/// rows regardless of image size.
pub struct BilinearScaler<S> {
    source: S,
    width: u32,
    height: u32,
    /// Next destination row to produce.
    lineno: u32,
    /// Window position: source rows consumed, counting clamped repeats.
    cursor: u32,
    top: Vec<u8>,
    bottom: Vec<u8>,
}

impl<S: ScanlineSource> BilinearScaler<S> {
    /// Scale `source` to `width` x `height`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDimensions`] if a target dimension is
    /// zero or the source reports a zero dimension.
    pub fn new(source: S, width: u32, height: u32) -> Result<Self, StreamError> {
        super::check_target(&source, width, height)?;
        Ok(Self {
            source,
            width,
            height,
            lineno: 0,
            cursor: 0,
            top: Vec::new(),
            bottom: Vec::new(),
        })
    }

    /// Slide the window forward until `top` holds source row `line` and
    /// `bottom` holds the row below it (or a repeat of the last row).
    fn advance_to(&mut self, line: u32) -> Result<(), StreamError> {
        if self.cursor == 0 {
            self.top = read_row(&mut self.source, 0)?;
            self.bottom = self.top.clone();
            self.cursor = 1;
        }
        while self.cursor < line + 2 {
            std::mem::swap(&mut self.top, &mut self.bottom);
            if self.cursor < self.source.height() {
                self.bottom = read_row(&mut self.source, self.cursor)?;
            } else {
                self.bottom = self.top.clone();
            }
            self.cursor += 1;
        }
        Ok(())
    }
}

impl<S: ScanlineSource> ScanlineSource for BilinearScaler<S> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn components(&self) -> u8 {
        self.source.components()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if self.lineno >= self.height {
            return Ok(None);
        }
        let src_height = self.source.height();
        let sample = resample::source_position(self.lineno, src_height, self.height);
        let sample_i = (sample as u32).min(src_height - 1);
        let ty = sample - sample_i as f64;
        self.lineno += 1;

        self.advance_to(sample_i)?;
        let row = resample::bilinear(
            &self.top,
            &self.bottom,
            self.source.width(),
            self.width,
            self.source.components(),
            ty,
        )?;
        Ok(Some(row))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
