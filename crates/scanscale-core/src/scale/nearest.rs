//! Nearest-neighbor streaming scaler.

use crate::resample;
use crate::source::{read_row, ScanlineSource, StreamError};

/// Scales a scanline stream with nearest-neighbor interpolation.
///
/// Buffers a single source row at a time: for destination row `i` the
/// backing row is `floor(sample)` from [`resample::source_position`] on the
/// vertical axis. Rows the mapping skips over are read and discarded; rows
/// the mapping repeats are served from the buffer. Output values are always
/// verbatim copies of source samples.
pub struct NearestNeighborScaler<S> {
    source: S,
    width: u32,
    height: u32,
    /// Next destination row to produce.
    lineno: u32,
    /// Source rows consumed so far.
    cursor: u32,
    row: Vec<u8>,
}

impl<S: ScanlineSource> NearestNeighborScaler<S> {
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
            row: Vec::new(),
        })
    }
}

impl<S: ScanlineSource> ScanlineSource for NearestNeighborScaler<S> {
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
        self.lineno += 1;

        while self.cursor <= sample_i {
            self.row = read_row(&mut self.source, self.cursor)?;
            self.cursor += 1;
        }
        let out = resample::nearest(
            &self.row,
            self.source.width(),
            self.width,
            self.source.components(),
        )?;
        Ok(Some(out))
    }
}
