//! Alpha channel removal.

use crate::source::{ScanlineSource, StreamError};

/// Drops the alpha channel from a scanline stream.
///
/// Gray+alpha becomes gray (2 -> 1 components) and RGBA becomes RGB
/// (4 -> 3); streams without an alpha channel pass through untouched.
/// Dimensions are unchanged. JPEG output has no alpha, so
/// [`crate::codec::write_jpeg`] applies this automatically.
pub struct AlphaStripper<S> {
    source: S,
}

impl<S: ScanlineSource> AlphaStripper<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: ScanlineSource> ScanlineSource for AlphaStripper<S> {
    fn width(&self) -> u32 {
        self.source.width()
    }

    fn height(&self) -> u32 {
        self.source.height()
    }

    fn components(&self) -> u8 {
        match self.source.components() {
            2 => 1,
            4 => 3,
            c => c,
        }
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        let Some(row) = self.source.next_scanline()? else {
            return Ok(None);
        };
        let components = self.source.components() as usize;
        let row = match components {
            2 | 4 => row
                .chunks_exact(components)
                .flat_map(|px| &px[..components - 1])
                .copied()
                .collect(),
            _ => row,
        };
        Ok(Some(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{collect_scanlines, BufferSource};

    #[test]
    fn test_rgba_to_rgb() {
        let src = BufferSource::new(2, 1, 4, vec![1, 2, 3, 255, 4, 5, 6, 128]).unwrap();
        let mut strip = AlphaStripper::new(src);
        assert_eq!(strip.components(), 3);
        assert_eq!(
            collect_scanlines(&mut strip).unwrap(),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_gray_alpha_to_gray() {
        let src = BufferSource::new(3, 1, 2, vec![10, 255, 20, 255, 30, 0]).unwrap();
        let mut strip = AlphaStripper::new(src);
        assert_eq!(strip.components(), 1);
        assert_eq!(collect_scanlines(&mut strip).unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn test_rgb_passes_through() {
        let data = vec![1, 2, 3, 4, 5, 6];
        let src = BufferSource::new(2, 1, 3, data.clone()).unwrap();
        let mut strip = AlphaStripper::new(src);
        assert_eq!(strip.components(), 3);
        assert_eq!(collect_scanlines(&mut strip).unwrap(), data);
    }

    #[test]
    fn test_dimensions_unchanged() {
        let src = BufferSource::new(4, 6, 4, vec![0; 4 * 6 * 4]).unwrap();
        let strip = AlphaStripper::new(src);
        assert_eq!(strip.width(), 4);
        assert_eq!(strip.height(), 6);
    }
}
