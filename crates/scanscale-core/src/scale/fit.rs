//! Scale a stream to fit inside a bounding box.

use crate::source::{ScanlineSource, StreamError};

use super::{BilinearScaler, NearestNeighborScaler};

/// Scales a scanline stream to fit inside a bounding box while preserving
/// the aspect ratio.
///
/// The scale ratio is the smaller of `fit_width / width` and
/// `fit_height / height`, applied to both axes. Enlarging uses
/// nearest-neighbor interpolation, reducing uses bilinear, and a ratio of
/// exactly 1 passes the stream through untouched.
pub struct Fit<S> {
    inner: Inner<S>,
}

enum Inner<S> {
    Enlarge(NearestNeighborScaler<S>),
    Reduce(BilinearScaler<S>),
    Pass(S),
}

impl<S: ScanlineSource> Fit<S> {
    /// Fit `source` inside `fit_width` x `fit_height`.
    ///
    /// Output dimensions are `max(1, floor(source * ratio))` per axis, so
    /// the result never exceeds the box on either axis (and never collapses
    /// to zero).
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDimensions`] if a box dimension is
    /// zero or the source reports a zero dimension.
    pub fn new(source: S, fit_width: u32, fit_height: u32) -> Result<Self, StreamError> {
        super::check_target(&source, fit_width, fit_height)?;

        let width_ratio = fit_width as f64 / source.width() as f64;
        let height_ratio = fit_height as f64 / source.height() as f64;
        let ratio = width_ratio.min(height_ratio);

        let inner = if ratio > 1.0 {
            let (width, height) = scaled_dimensions(&source, ratio);
            Inner::Enlarge(NearestNeighborScaler::new(source, width, height)?)
        } else if ratio < 1.0 {
            let (width, height) = scaled_dimensions(&source, ratio);
            Inner::Reduce(BilinearScaler::new(source, width, height)?)
        } else {
            Inner::Pass(source)
        };

        Ok(Self { inner })
    }
}

fn scaled_dimensions<S: ScanlineSource>(source: &S, ratio: f64) -> (u32, u32) {
    let width = ((source.width() as f64 * ratio) as u32).max(1);
    let height = ((source.height() as f64 * ratio) as u32).max(1);
    (width, height)
}

impl<S: ScanlineSource> ScanlineSource for Fit<S> {
    fn width(&self) -> u32 {
        match &self.inner {
            Inner::Enlarge(s) => s.width(),
            Inner::Reduce(s) => s.width(),
            Inner::Pass(s) => s.width(),
        }
    }

    fn height(&self) -> u32 {
        match &self.inner {
            Inner::Enlarge(s) => s.height(),
            Inner::Reduce(s) => s.height(),
            Inner::Pass(s) => s.height(),
        }
    }

    fn components(&self) -> u8 {
        match &self.inner {
            Inner::Enlarge(s) => s.components(),
            Inner::Reduce(s) => s.components(),
            Inner::Pass(s) => s.components(),
        }
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        match &mut self.inner {
            Inner::Enlarge(s) => s.next_scanline(),
            Inner::Reduce(s) => s.next_scanline(),
            Inner::Pass(s) => s.next_scanline(),
        }
    }
}
