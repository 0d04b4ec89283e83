//! Image scaling over scanline streams.
//!
//! The scalers here own the vertical pass: per destination row they decide
//! which source row(s) are needed and with what fractional weight, pull
//! those rows from the upstream [`ScanlineSource`] exactly once, and hand
//! the horizontal work to [`crate::resample`]. Each scaler is itself a
//! `ScanlineSource`, so scaling composes with cropping, alpha stripping,
//! and further scaling.
//!
//! - [`BilinearScaler`] blends the four nearest samples; the better choice
//!   when reducing.
//! - [`NearestNeighborScaler`] copies the closest sample; fast, and the
//!   usual choice when enlarging.
//! - [`Fit`] picks between them to fill a bounding box while preserving
//!   the aspect ratio.

mod bilinear;
mod fit;
mod nearest;

pub use bilinear::BilinearScaler;
pub use fit::Fit;
pub use nearest::NearestNeighborScaler;

use crate::source::{ScanlineSource, StreamError};

/// Validate a scaler's target dimensions against its upstream source.
pub(crate) fn check_target<S: ScanlineSource>(
    source: &S,
    width: u32,
    height: u32,
) -> Result<(), StreamError> {
    if width == 0
        || height == 0
        || source.width() == 0
        || source.height() == 0
        || source.components() == 0
    {
        return Err(StreamError::InvalidDimensions {
            width,
            height,
            components: source.components(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::Solid;
    use crate::source::collect_scanlines;

    /// Both scalers must honor arbitrary target dimensions, including
    /// identity and single-pixel targets.
    #[test]
    fn test_target_dimensions() {
        for (width, height) in [(7, 8), (71, 82), (100, 200), (1, 1)] {
            let solid = Solid::new(100, 200, vec![0, 0, 0]).unwrap();
            let mut scaler = BilinearScaler::new(solid, width, height).unwrap();
            assert_eq!(scaler.width(), width);
            assert_eq!(scaler.height(), height);
            let data = collect_scanlines(&mut scaler).unwrap();
            assert_eq!(data.len(), width as usize * height as usize * 3);

            let solid = Solid::new(100, 200, vec![0, 0, 0]).unwrap();
            let mut scaler = NearestNeighborScaler::new(solid, width, height).unwrap();
            assert_eq!(scaler.width(), width);
            assert_eq!(scaler.height(), height);
            let data = collect_scanlines(&mut scaler).unwrap();
            assert_eq!(data.len(), width as usize * height as usize * 3);
        }
    }

    #[test]
    fn test_zero_target_dimensions_rejected() {
        for (width, height) in [(0, 0), (0, 1), (1, 0)] {
            let solid = Solid::new(10, 10, vec![0]).unwrap();
            assert!(matches!(
                BilinearScaler::new(solid, width, height),
                Err(StreamError::InvalidDimensions { .. })
            ));

            let solid = Solid::new(10, 10, vec![0]).unwrap();
            assert!(matches!(
                NearestNeighborScaler::new(solid, width, height),
                Err(StreamError::InvalidDimensions { .. })
            ));
        }
    }
}
