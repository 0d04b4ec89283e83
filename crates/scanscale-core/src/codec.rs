//! Decode and encode adapters over the `image` crate.
//!
//! Container parsing, markers, and entropy coding all belong to `image`;
//! the adapters here only move scanlines between that crate's buffers and
//! the streaming protocol. [`read_image`] turns compressed JPEG/PNG bytes
//! into a [`BufferSource`]; [`write_jpeg`] and [`write_png`] drain any
//! [`ScanlineSource`] row-by-row into an encoder.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};
use thiserror::Error;

use crate::alpha::AlphaStripper;
use crate::source::{collect_scanlines, BufferSource, ScanlineSource, StreamError};

/// Errors from the codec adapters.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes could not be decoded as a supported image format.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The encoder rejected the image.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The stream's component count has no encoding in the target format.
    #[error("unsupported component count: {0}")]
    UnsupportedComponents(u8),

    /// The stream failed while being drained.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Decode compressed image bytes into an in-memory scanline source.
///
/// The format is sniffed from the bytes. The component count follows the
/// decoded color type: 1 (gray), 2 (gray+alpha), 3 (RGB) or 4 (RGBA), with
/// deeper-than-8-bit channels narrowed to 8.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the format is unrecognized or the
/// data is corrupt.
pub fn read_image(bytes: &[u8]) -> Result<BufferSource, CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    let color = img.color();
    let source = match (color.has_color(), color.has_alpha()) {
        (false, false) => {
            let buf = img.into_luma8();
            let (width, height) = buf.dimensions();
            BufferSource::new(width, height, 1, buf.into_raw())
        }
        (false, true) => {
            let buf = img.into_luma_alpha8();
            let (width, height) = buf.dimensions();
            BufferSource::new(width, height, 2, buf.into_raw())
        }
        (true, false) => {
            let buf = img.into_rgb8();
            let (width, height) = buf.dimensions();
            BufferSource::new(width, height, 3, buf.into_raw())
        }
        (true, true) => {
            let buf = img.into_rgba8();
            let (width, height) = buf.dimensions();
            BufferSource::new(width, height, 4, buf.into_raw())
        }
    };
    Ok(source?)
}

/// Encode a scanline stream as JPEG.
///
/// The stream is drained top-to-bottom and every row length is validated
/// against the stream's dimensions. JPEG has no alpha channel, so 2- and
/// 4-component streams are passed through [`AlphaStripper`] first.
/// `quality` is clamped to 1-100.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedComponents`] for component counts
/// other than 1-4, [`CodecError::Stream`] if the stream under-delivers,
/// and [`CodecError::Encode`] if the encoder fails.
pub fn write_jpeg<S>(source: &mut S, quality: u8) -> Result<Vec<u8>, CodecError>
where
    S: ScanlineSource + ?Sized,
{
    let width = source.width();
    let height = source.height();

    let (components, data) = match source.components() {
        2 | 4 => {
            let mut stripped = AlphaStripper::new(&mut *source);
            let components = stripped.components();
            (components, collect_scanlines(&mut stripped)?)
        }
        c => (c, collect_scanlines(source)?),
    };
    let color = match components {
        1 => ExtendedColorType::L8,
        3 => ExtendedColorType::Rgb8,
        c => return Err(CodecError::UnsupportedComponents(c)),
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder
        .write_image(&data, width, height, color)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode a scanline stream as PNG.
///
/// The stream is drained top-to-bottom and every row length is validated
/// against the stream's dimensions. All four component counts encode
/// directly (L8, La8, Rgb8, Rgba8).
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedComponents`] for component counts
/// other than 1-4, [`CodecError::Stream`] if the stream under-delivers,
/// and [`CodecError::Encode`] if the encoder fails.
pub fn write_png<S>(source: &mut S) -> Result<Vec<u8>, CodecError>
where
    S: ScanlineSource + ?Sized,
{
    let width = source.width();
    let height = source.height();
    let color = match source.components() {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        3 => ExtendedColorType::Rgb8,
        4 => ExtendedColorType::Rgba8,
        c => return Err(CodecError::UnsupportedComponents(c)),
    };
    let data = collect_scanlines(source)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(&data, width, height, color)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::Solid;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_write_jpeg_magic_bytes() {
        let mut solid = Solid::new(16, 16, vec![200, 100, 50]).unwrap();
        let jpeg = write_jpeg(&mut solid, 90).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_write_jpeg_strips_alpha() {
        let mut solid = Solid::new(8, 8, vec![10, 20, 30, 255]).unwrap();
        let jpeg = write_jpeg(&mut solid, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_write_jpeg_gray() {
        let mut solid = Solid::new(8, 8, vec![128]).unwrap();
        let jpeg = write_jpeg(&mut solid, 85).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_write_jpeg_quality_clamped() {
        let mut solid = Solid::new(4, 4, vec![1, 2, 3]).unwrap();
        assert!(write_jpeg(&mut solid, 0).is_ok());
    }

    #[test]
    fn test_write_png_magic_bytes() {
        let mut solid = Solid::new(5, 7, vec![9, 8, 7, 255]).unwrap();
        let png = write_png(&mut solid).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_png_round_trip_preserves_pixels() {
        let mut solid = Solid::new(3, 2, vec![40, 80, 120]).unwrap();
        let png = write_png(&mut solid).unwrap();

        let mut decoded = read_image(&png).unwrap();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.components(), 3);
        assert_eq!(
            decoded.next_scanline().unwrap(),
            Some(vec![40, 80, 120, 40, 80, 120, 40, 80, 120])
        );
    }

    #[test]
    fn test_jpeg_round_trip_dimensions() {
        let mut solid = Solid::new(12, 9, vec![200, 100, 50]).unwrap();
        let jpeg = write_jpeg(&mut solid, 95).unwrap();

        let decoded = read_image(&jpeg).unwrap();
        assert_eq!(decoded.width(), 12);
        assert_eq!(decoded.height(), 9);
        assert_eq!(decoded.components(), 3);
    }

    #[test]
    fn test_read_image_rejects_garbage() {
        assert!(matches!(
            read_image(&[0, 1, 2, 3, 4, 5]),
            Err(CodecError::Decode(_))
        ));
    }
}
