//! Scanscale Core - Streaming scanline image scaling
//!
//! This crate resizes images one decoded row at a time. Sources implement
//! the [`ScanlineSource`] protocol; scalers, croppers and the alpha
//! stripper consume one source and implement the protocol themselves, so
//! operators chain between a decoder and an encoder while holding at most
//! two rows in memory.
//!
//! The interpolation math lives in [`resample`]; the vertical row
//! scheduling lives in [`scale`]; [`codec`] bridges to the `image` crate's
//! decoders and encoders; [`pipeline`] wraps it all in a fluent API.

pub mod alpha;
pub mod codec;
pub mod crop;
pub mod generate;
pub mod pipeline;
pub mod resample;
pub mod scale;
pub mod source;

pub use alpha::AlphaStripper;
pub use codec::{read_image, write_jpeg, write_png, CodecError};
pub use crop::Cropper;
pub use generate::{Noise, Solid};
pub use pipeline::Pipeline;
pub use resample::ResampleError;
pub use scale::{BilinearScaler, Fit, NearestNeighborScaler};
pub use source::{collect_scanlines, BufferSource, ScanlineSource, StreamError};

/// Interpolation filter for scaling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Filter {
    /// Nearest-neighbor interpolation (fastest; output pixels are verbatim
    /// source pixels).
    NearestNeighbor,
    /// Bilinear interpolation (blends the four nearest samples).
    #[default]
    Bilinear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_default_is_bilinear() {
        assert_eq!(Filter::default(), Filter::Bilinear);
    }
}
