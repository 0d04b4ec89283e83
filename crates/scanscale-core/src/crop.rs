//! Rectangular region extraction from a scanline stream.
//!
//! Cropping needs no pixel arithmetic: rows above the region are read and
//! discarded, rows inside it are sliced to the region's columns, and the
//! stream ends once the region's height is served. A region that extends
//! past the source boundary is truncated at the boundary, so requesting a
//! 50-wide crop at `x_offset` 60 of a 100-wide image yields a 40-wide one.

use crate::source::{read_row, ScanlineSource, StreamError};

/// Extracts a rectangular region from a scanline stream.
pub struct Cropper<S> {
    source: S,
    width: u32,
    height: u32,
    x_offset: u32,
    y_offset: u32,
    /// Next destination row to produce.
    lineno: u32,
    /// Source rows consumed so far.
    cursor: u32,
}

impl<S: ScanlineSource> Cropper<S> {
    /// Crop `source` to `width` x `height` with the region's upper-left
    /// corner at `(x_offset, y_offset)`.
    ///
    /// The region is truncated at the source boundary; the resulting
    /// dimensions are reported by [`ScanlineSource::width`] and
    /// [`ScanlineSource::height`] on the returned cropper.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDimensions`] if `width` or `height`
    /// is zero, or if an offset lies at or past the source boundary
    /// (nothing would remain to emit).
    pub fn new(
        source: S,
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> Result<Self, StreamError> {
        if width == 0
            || height == 0
            || x_offset >= source.width()
            || y_offset >= source.height()
        {
            return Err(StreamError::InvalidDimensions {
                width,
                height,
                components: source.components(),
            });
        }
        Ok(Self {
            width: width.min(source.width() - x_offset),
            height: height.min(source.height() - y_offset),
            source,
            x_offset,
            y_offset,
            lineno: 0,
            cursor: 0,
        })
    }
}

impl<S: ScanlineSource> ScanlineSource for Cropper<S> {
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
        while self.cursor < self.y_offset {
            read_row(&mut self.source, self.cursor)?;
            self.cursor += 1;
        }
        let row = read_row(&mut self.source, self.cursor)?;
        self.cursor += 1;
        self.lineno += 1;

        let components = self.source.components() as usize;
        let start = self.x_offset as usize * components;
        let len = self.width as usize * components;
        Ok(Some(row[start..start + len].to_vec()))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::source::collect_scanlines;
    use proptest::prelude::*;

    /// Strategy for a source size and an in-bounds crop request.
    fn crop_strategy() -> impl Strategy<Value = (u32, u32, u32, u32, u32, u32)> {
        (2u32..=32, 2u32..=32).prop_flat_map(|(sw, sh)| {
            (
                Just(sw),
                Just(sh),
                1u32..=40,
                1u32..=40,
                0..sw,
                0..sh,
            )
        })
    }

    proptest! {
        /// Property: output dimensions are positive and inside the source.
        #[test]
        fn prop_dimensions_bounded((sw, sh, w, h, x, y) in crop_strategy()) {
            let src = super::tests::positional(sw, sh);
            let crop = Cropper::new(src, w, h, x, y).unwrap();

            prop_assert!(crop.width() >= 1 && crop.width() <= sw - x);
            prop_assert!(crop.height() >= 1 && crop.height() <= sh - y);
        }

        /// Property: every output row length matches the reported width.
        #[test]
        fn prop_row_lengths((sw, sh, w, h, x, y) in crop_strategy()) {
            let src = super::tests::positional(sw, sh);
            let mut crop = Cropper::new(src, w, h, x, y).unwrap();
            let (cw, ch) = (crop.width(), crop.height());

            let data = collect_scanlines(&mut crop).unwrap();
            prop_assert_eq!(data.len(), (cw * ch) as usize);
        }

        /// Property: the first output pixel is the source pixel at the
        /// requested offset.
        #[test]
        fn prop_origin_pixel((sw, sh, w, h, x, y) in crop_strategy()) {
            let src = super::tests::positional(sw, sh);
            let mut crop = Cropper::new(src, w, h, x, y).unwrap();

            let first = crop.next_scanline().unwrap().unwrap();
            let expected = ((y as usize * sw as usize + x as usize) % 256) as u8;
            prop_assert_eq!(first[0], expected);
        }
    }
}
