//! Row resampling primitives.
//!
//! These are the pure functions at the heart of the library: given one or
//! two source rows, they produce one destination row of a new width.
//! [`bilinear`] blends the four nearest samples per destination pixel using
//! a horizontal fraction derived here and a vertical fraction supplied by
//! the caller; [`nearest`] copies the closest sample verbatim.
//!
//! Nothing in this module holds state. Each call is a bounded, synchronous
//! transformation of its input slices, so callers are free to fan out
//! across destination rows without any locking. The vertical pass that
//! decides which rows to feed in lives in [`crate::scale`].

use thiserror::Error;

/// Errors from the row resampling primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResampleError {
    /// A width or component count is zero.
    #[error(
        "invalid dimensions: src_width ({src_width}), dest_width ({dest_width}) \
         and components ({components}) must be non-zero"
    )]
    InvalidDimensions {
        src_width: u32,
        dest_width: u32,
        components: u8,
    },

    /// A row's byte length doesn't match `src_width * components`.
    #[error("scanline length mismatch: expected {expected} bytes, got {actual}")]
    ScanlineLength { expected: usize, actual: usize },

    /// The two rows of a bilinear pair differ in length.
    #[error("scanline pair differs in length: top is {top} bytes, bottom is {bottom} bytes")]
    ScanlinePair { top: usize, bottom: usize },
}

/// Map a destination index to a continuous source coordinate.
///
/// Both interpolation variants use this one mapping, for the horizontal and
/// the vertical axis alike, so rounding behavior can never diverge between
/// them. The integer part of the result selects the base sample; the
/// fractional part is the blend weight toward the next one.
#[inline]
pub fn source_position(dest_index: u32, src_size: u32, dest_size: u32) -> f64 {
    dest_index as f64 * (src_size as f64 / dest_size as f64)
}

/// Resample a pair of adjacent rows to a new width with bilinear
/// interpolation.
///
/// For each destination index the source coordinate is split into an
/// integer column and a horizontal fraction `tx`; together with the
/// vertical fraction `ty` in `[0, 1)` this weights the four surrounding
/// samples (`ty = 0` means the result depends on `top` alone). At the last
/// column the right-hand neighbor is clamped to the row's final pixel, so
/// rows need no padding and no read can land out of bounds.
///
/// Blended channel values are narrowed to `u8` by truncation toward zero,
/// not rounding, so output is bit-compatible with images produced by the
/// C-style narrowing conversion.
///
/// # Arguments
///
/// * `top` - Upper source row, `src_width * components` bytes
/// * `bottom` - Lower source row, same length as `top`
/// * `src_width` - Source row width in pixels
/// * `dest_width` - Destination row width in pixels
/// * `components` - Channel values per pixel
/// * `ty` - Vertical fraction between the two rows, in `[0, 1)`
///
/// # Errors
///
/// Returns [`ResampleError::InvalidDimensions`] if a width or the component
/// count is zero, [`ResampleError::ScanlinePair`] if the rows differ in
/// length, and [`ResampleError::ScanlineLength`] if they don't hold exactly
/// `src_width * components` bytes.
pub fn bilinear(
    top: &[u8],
    bottom: &[u8],
    src_width: u32,
    dest_width: u32,
    components: u8,
    ty: f64,
) -> Result<Vec<u8>, ResampleError> {
    check_dimensions(src_width, dest_width, components)?;
    if top.len() != bottom.len() {
        return Err(ResampleError::ScanlinePair {
            top: top.len(),
            bottom: bottom.len(),
        });
    }
    check_row(top, src_width, components)?;
    debug_assert!((0.0..1.0).contains(&ty), "ty out of range: {ty}");

    let width = src_width as usize;
    let components = components as usize;
    let last = (width - 1) * components;
    let mut dest = Vec::with_capacity(dest_width as usize * components);

    for i in 0..dest_width {
        let sample_x = source_position(i, src_width, dest_width);
        let sample_x_i = (sample_x as usize).min(width - 1);
        let tx = sample_x - sample_x_i as f64;
        let tx_inv = 1.0 - tx;

        let p11 = tx * ty;
        let p01 = tx_inv * ty;
        let p10 = tx - p11;
        let p00 = tx_inv - p01;

        let x0 = sample_x_i * components;
        let x1 = (x0 + components).min(last);

        let c00 = &top[x0..x0 + components];
        let c10 = &top[x1..x1 + components];
        let c01 = &bottom[x0..x0 + components];
        let c11 = &bottom[x1..x1 + components];

        for j in 0..components {
            let value = p00 * c00[j] as f64
                + p10 * c10[j] as f64
                + p01 * c01[j] as f64
                + p11 * c11[j] as f64;
            dest.push(value as u8);
        }
    }

    Ok(dest)
}

/// Resample one row to a new width with nearest-neighbor interpolation.
///
/// Each destination pixel is a verbatim copy of the channel group at the
/// floored source coordinate; no arithmetic touches the values. When
/// `dest_width == src_width` the output equals the input exactly.
///
/// # Errors
///
/// Returns [`ResampleError::InvalidDimensions`] if a width or the component
/// count is zero, and [`ResampleError::ScanlineLength`] if `row` doesn't
/// hold exactly `src_width * components` bytes.
pub fn nearest(
    row: &[u8],
    src_width: u32,
    dest_width: u32,
    components: u8,
) -> Result<Vec<u8>, ResampleError> {
    check_dimensions(src_width, dest_width, components)?;
    check_row(row, src_width, components)?;

    let width = src_width as usize;
    let components = components as usize;
    let mut dest = Vec::with_capacity(dest_width as usize * components);

    for i in 0..dest_width {
        let sample_x_i = (source_position(i, src_width, dest_width) as usize).min(width - 1);
        let start = sample_x_i * components;
        dest.extend_from_slice(&row[start..start + components]);
    }

    Ok(dest)
}

fn check_dimensions(
    src_width: u32,
    dest_width: u32,
    components: u8,
) -> Result<(), ResampleError> {
    if src_width == 0 || dest_width == 0 || components == 0 {
        return Err(ResampleError::InvalidDimensions {
            src_width,
            dest_width,
            components,
        });
    }
    Ok(())
}

fn check_row(row: &[u8], src_width: u32, components: u8) -> Result<(), ResampleError> {
    let expected = src_width as usize * components as usize;
    if row.len() != expected {
        return Err(ResampleError::ScanlineLength {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
