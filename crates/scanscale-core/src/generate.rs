//! Synthetic scanline sources.
//!
//! Generators stand in for decoded images wherever a pipeline needs input
//! that doesn't come from a file: placeholders, padding, and above all
//! tests, where [`Solid`] and a seeded [`Noise`] give cheap deterministic
//! streams of any geometry.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::source::{ScanlineSource, StreamError};

/// A solid-color image served as a scanline stream.
pub struct Solid {
    width: u32,
    height: u32,
    pixel: Vec<u8>,
    lineno: u32,
}

impl Solid {
    /// A `width` x `height` image where every pixel holds `pixel`'s
    /// channel values; the component count is `pixel.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDimensions`] for a zero dimension, an
    /// empty pixel, or a pixel with more than 255 channels.
    pub fn new(width: u32, height: u32, pixel: Vec<u8>) -> Result<Self, StreamError> {
        if width == 0 || height == 0 || pixel.is_empty() || pixel.len() > u8::MAX as usize {
            return Err(StreamError::InvalidDimensions {
                width,
                height,
                components: pixel.len().min(u8::MAX as usize) as u8,
            });
        }
        Ok(Self {
            width,
            height,
            pixel,
            lineno: 0,
        })
    }

    /// A solid black RGB image.
    pub fn black(width: u32, height: u32) -> Result<Self, StreamError> {
        Self::new(width, height, vec![0, 0, 0])
    }
}

impl ScanlineSource for Solid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn components(&self) -> u8 {
        self.pixel.len() as u8
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if self.lineno >= self.height {
            return Ok(None);
        }
        self.lineno += 1;
        Ok(Some(self.pixel.repeat(self.width as usize)))
    }
}

/// A random-pixel image served as a scanline stream.
pub struct Noise {
    width: u32,
    height: u32,
    components: u8,
    lineno: u32,
    rng: StdRng,
}

impl Noise {
    /// A `width` x `height` image of uniformly random channel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDimensions`] for a zero dimension or
    /// component count.
    pub fn new(width: u32, height: u32, components: u8) -> Result<Self, StreamError> {
        Self::build(width, height, components, StdRng::from_os_rng())
    }

    /// Like [`Noise::new`] but seeded, so the stream is reproducible.
    pub fn with_seed(
        width: u32,
        height: u32,
        components: u8,
        seed: u64,
    ) -> Result<Self, StreamError> {
        Self::build(width, height, components, StdRng::seed_from_u64(seed))
    }

    fn build(width: u32, height: u32, components: u8, rng: StdRng) -> Result<Self, StreamError> {
        if width == 0 || height == 0 || components == 0 {
            return Err(StreamError::InvalidDimensions {
                width,
                height,
                components,
            });
        }
        Ok(Self {
            width,
            height,
            components,
            lineno: 0,
            rng,
        })
    }
}

impl ScanlineSource for Noise {
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
        self.lineno += 1;
        let mut row = vec![0u8; self.scanline_len()];
        self.rng.fill(&mut row[..]);
        Ok(Some(row))
    }
}
