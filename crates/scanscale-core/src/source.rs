//! The streaming image protocol.
//!
//! Images move through this library as a sequence of scanlines: one row of
//! `width * components` channel bytes at a time, top to bottom. Anything
//! that produces rows implements [`ScanlineSource`]. The scalers and the
//! other operators both consume and implement the trait, so stages chain
//! into a pipeline that never holds more than a couple of rows in memory.

use thiserror::Error;

use crate::resample::ResampleError;

/// Errors from scanline streams and the operators that consume them.
#[derive(Debug, Error)]
pub enum StreamError {
    /// A zero dimension or component count was requested or reported.
    #[error("invalid dimensions: {width}x{height} with {components} components")]
    InvalidDimensions {
        width: u32,
        height: u32,
        components: u8,
    },

    /// A source produced a row whose byte length doesn't match its
    /// declared `width * components`.
    #[error("scanline length mismatch: expected {expected} bytes, got {actual}")]
    ScanlineLength { expected: usize, actual: usize },

    /// A source stopped producing rows before its declared height.
    #[error("source ended early: got {read} of {expected} scanlines")]
    TruncatedSource { read: u32, expected: u32 },

    /// A row resampling primitive rejected its input.
    #[error(transparent)]
    Resample(#[from] ResampleError),
}

/// A top-to-bottom stream of image rows.
///
/// `next_scanline` yields each row once, in order, and `Ok(None)` after the
/// last one. Dimensions and the component count are fixed for the life of
/// the source; every row holds exactly `width * components` bytes.
pub trait ScanlineSource {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels (the number of rows the source will yield).
    fn height(&self) -> u32;

    /// Channel values per pixel (1 = gray, 3 = RGB, 4 = RGBA).
    fn components(&self) -> u8;

    /// The next row, or `Ok(None)` once `height` rows have been yielded.
    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError>;

    /// Bytes in one row.
    fn scanline_len(&self) -> usize {
        self.width() as usize * self.components() as usize
    }
}

impl<S: ScanlineSource + ?Sized> ScanlineSource for Box<S> {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn components(&self) -> u8 {
        (**self).components()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        (**self).next_scanline()
    }
}

impl<S: ScanlineSource + ?Sized> ScanlineSource for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn components(&self) -> u8 {
        (**self).components()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        (**self).next_scanline()
    }
}

/// An in-memory image served as a scanline stream.
///
/// This is the bridge between whole-image buffers (decoded files, collected
/// pipeline output) and the streaming operators.
#[derive(Debug, Clone)]
pub struct BufferSource {
    width: u32,
    height: u32,
    components: u8,
    data: Vec<u8>,
    lineno: u32,
}

impl BufferSource {
    /// Wrap a contiguous row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDimensions`] for a zero dimension or
    /// component count, and [`StreamError::ScanlineLength`] if `data`
    /// doesn't hold exactly `width * height * components` bytes.
    pub fn new(
        width: u32,
        height: u32,
        components: u8,
        data: Vec<u8>,
    ) -> Result<Self, StreamError> {
        if width == 0 || height == 0 || components == 0 {
            return Err(StreamError::InvalidDimensions {
                width,
                height,
                components,
            });
        }
        let expected = width as usize * height as usize * components as usize;
        if data.len() != expected {
            return Err(StreamError::ScanlineLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            components,
            data,
            lineno: 0,
        })
    }

    /// The underlying pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the source, returning the pixel bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Reset the stream to the first row.
    pub fn rewind(&mut self) {
        self.lineno = 0;
    }
}

impl ScanlineSource for BufferSource {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn components(&self) -> u8 {
        self.components
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if self.lineno >= self.height {
            return Ok(None);
        }
        let len = self.scanline_len();
        let start = self.lineno as usize * len;
        self.lineno += 1;
        Ok(Some(self.data[start..start + len].to_vec()))
    }
}

/// Drain a source into one contiguous row-major buffer.
///
/// Every row's byte length is checked against the source's declared
/// dimensions, and a source that stops early is reported as
/// [`StreamError::TruncatedSource`].
pub fn collect_scanlines<S>(source: &mut S) -> Result<Vec<u8>, StreamError>
where
    S: ScanlineSource + ?Sized,
{
    let height = source.height();
    let expected = source.scanline_len();
    let mut data = Vec::with_capacity(expected * height as usize);
    for read in 0..height {
        let row = source.next_scanline()?.ok_or(StreamError::TruncatedSource {
            read,
            expected: height,
        })?;
        if row.len() != expected {
            return Err(StreamError::ScanlineLength {
                expected,
                actual: row.len(),
            });
        }
        data.extend_from_slice(&row);
    }
    Ok(data)
}

/// Read one row from a source that is known to have more, validating its
/// length. Used by operators that consume their upstream lazily.
pub(crate) fn read_row<S>(source: &mut S, rows_read: u32) -> Result<Vec<u8>, StreamError>
where
    S: ScanlineSource + ?Sized,
{
    let expected = source.scanline_len();
    match source.next_scanline()? {
        Some(row) if row.len() == expected => Ok(row),
        Some(row) => Err(StreamError::ScanlineLength {
            expected,
            actual: row.len(),
        }),
        None => Err(StreamError::TruncatedSource {
            read: rows_read,
            expected: source.height(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_source_yields_rows_in_order() {
        let mut src = BufferSource::new(2, 3, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();

        assert_eq!(src.width(), 2);
        assert_eq!(src.height(), 3);
        assert_eq!(src.components(), 1);
        assert_eq!(src.scanline_len(), 2);

        assert_eq!(src.next_scanline().unwrap(), Some(vec![1, 2]));
        assert_eq!(src.next_scanline().unwrap(), Some(vec![3, 4]));
        assert_eq!(src.next_scanline().unwrap(), Some(vec![5, 6]));
        assert_eq!(src.next_scanline().unwrap(), None);
        assert_eq!(src.next_scanline().unwrap(), None);
    }

    #[test]
    fn test_buffer_source_rewind() {
        let mut src = BufferSource::new(1, 2, 1, vec![9, 8]).unwrap();
        assert_eq!(src.next_scanline().unwrap(), Some(vec![9]));
        src.rewind();
        assert_eq!(src.next_scanline().unwrap(), Some(vec![9]));
    }

    #[test]
    fn test_buffer_source_validates_length() {
        assert!(matches!(
            BufferSource::new(2, 2, 3, vec![0; 11]),
            Err(StreamError::ScanlineLength {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_buffer_source_validates_dimensions() {
        assert!(matches!(
            BufferSource::new(0, 2, 3, vec![]),
            Err(StreamError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            BufferSource::new(2, 2, 0, vec![]),
            Err(StreamError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_collect_scanlines_round_trips() {
        let data = vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let mut src = BufferSource::new(2, 2, 3, data.clone()).unwrap();
        assert_eq!(collect_scanlines(&mut src).unwrap(), data);
    }

    #[test]
    fn test_collect_reports_truncation() {
        struct Short;
        impl ScanlineSource for Short {
            fn width(&self) -> u32 {
                1
            }
            fn height(&self) -> u32 {
                3
            }
            fn components(&self) -> u8 {
                1
            }
            fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
                Ok(None)
            }
        }

        assert!(matches!(
            collect_scanlines(&mut Short),
            Err(StreamError::TruncatedSource {
                read: 0,
                expected: 3
            })
        ));
    }

    #[test]
    fn test_collect_reports_bad_row_length() {
        struct Lying;
        impl ScanlineSource for Lying {
            fn width(&self) -> u32 {
                4
            }
            fn height(&self) -> u32 {
                1
            }
            fn components(&self) -> u8 {
                1
            }
            fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
                Ok(Some(vec![0; 2]))
            }
        }

        assert!(matches!(
            collect_scanlines(&mut Lying),
            Err(StreamError::ScanlineLength {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_boxed_source_delegates() {
        let src = BufferSource::new(2, 1, 1, vec![7, 7]).unwrap();
        let mut boxed: Box<dyn ScanlineSource> = Box::new(src);
        assert_eq!(boxed.width(), 2);
        assert_eq!(boxed.next_scanline().unwrap(), Some(vec![7, 7]));
    }
}
