//! Integer stretching by row or column replication.
//!
//! A vertical stretch by factor `f` writes each input row `f` times in a
//! row: input row `r` occupies output rows `r * f .. (r + 1) * f`. The
//! horizontal stretch does the same with pixels inside each row. No
//! interpolation is involved, so every output sample equals some input
//! sample.
//!
//! # Limits
//!
//! - `factor` must lie in [`MIN_STRETCH_FACTOR`]..=[`MAX_STRETCH_FACTOR`]
//! - The stretched dimension may not exceed [`MAX_STRETCHED_DIMENSION`];
//!   oversized requests are rejected rather than truncated

use super::{Axis, TransformError};
use crate::decode::PixelBuffer;

/// Smallest accepted stretch factor (identity).
pub const MIN_STRETCH_FACTOR: u32 = 1;

/// Largest accepted stretch factor.
pub const MAX_STRETCH_FACTOR: u32 = 5;

/// Largest height or width a stretch may produce.
pub const MAX_STRETCHED_DIMENSION: u32 = 10_000;

/// Stretch an image along the height axis.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if `factor` is outside 1..=5.
/// Returns `TransformError::SizeLimitExceeded` if `height * factor > 10000`.
///
/// # Example
///
/// ```
/// use pixelplay_core::decode::{ColorLayout, PixelBuffer};
/// use pixelplay_core::transform::stretch_vertical;
///
/// let image = PixelBuffer::filled(4, 4, ColorLayout::Rgb, 0).unwrap();
/// let tall = stretch_vertical(&image, 3).unwrap();
/// assert_eq!((tall.width(), tall.height()), (4, 12));
/// ```
pub fn stretch_vertical(image: &PixelBuffer, factor: u32) -> Result<PixelBuffer, TransformError> {
    let out_height = stretched_dimension(image.height(), factor, Axis::Vertical)?;

    let row_len = image.row_len();
    let mut output = Vec::with_capacity(row_len * out_height as usize);
    for row in image.pixels().chunks_exact(row_len) {
        for _ in 0..factor {
            output.extend_from_slice(row);
        }
    }

    Ok(PixelBuffer::from_parts_unchecked(
        image.width(),
        out_height,
        image.layout(),
        output,
    ))
}

/// Stretch an image along the width axis.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if `factor` is outside 1..=5.
/// Returns `TransformError::SizeLimitExceeded` if `width * factor > 10000`.
pub fn stretch_horizontal(
    image: &PixelBuffer,
    factor: u32,
) -> Result<PixelBuffer, TransformError> {
    let out_width = stretched_dimension(image.width(), factor, Axis::Horizontal)?;

    let channels = image.channels();
    let mut output = Vec::with_capacity(image.pixels().len() * factor as usize);
    for pixel in image.pixels().chunks_exact(channels) {
        for _ in 0..factor {
            output.extend_from_slice(pixel);
        }
    }

    Ok(PixelBuffer::from_parts_unchecked(
        out_width,
        image.height(),
        image.layout(),
        output,
    ))
}

/// Validate `factor` and compute the stretched size of a `size`-pixel axis.
fn stretched_dimension(size: u32, factor: u32, axis: Axis) -> Result<u32, TransformError> {
    if !(MIN_STRETCH_FACTOR..=MAX_STRETCH_FACTOR).contains(&factor) {
        return Err(TransformError::InvalidParameter(format!(
            "stretch factor must be between {MIN_STRETCH_FACTOR} and {MAX_STRETCH_FACTOR}, got {factor}"
        )));
    }

    let requested = u64::from(size) * u64::from(factor);
    if requested > u64::from(MAX_STRETCHED_DIMENSION) {
        return Err(TransformError::SizeLimitExceeded {
            axis,
            requested,
            limit: MAX_STRETCHED_DIMENSION,
        });
    }

    // Bounded by MAX_STRETCHED_DIMENSION above.
    Ok(requested as u32)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::ColorLayout;
    use proptest::prelude::*;

    fn layout_strategy() -> impl Strategy<Value = ColorLayout> {
        prop_oneof![
            Just(ColorLayout::Gray),
            Just(ColorLayout::Rgb),
            Just(ColorLayout::Rgba),
        ]
    }

    /// Strategy for small random images (keep small for speed).
    fn image_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=16, 1u32..=16, layout_strategy()).prop_flat_map(|(w, h, layout)| {
            let size = (w * h) as usize * layout.channels();
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| PixelBuffer::new(w, h, layout, pixels).unwrap())
        })
    }

    proptest! {
        /// Property: Vertical stretch multiplies height and replicates rows.
        #[test]
        fn prop_vertical_replicates_rows(
            img in image_strategy(),
            factor in MIN_STRETCH_FACTOR..=MAX_STRETCH_FACTOR,
        ) {
            let result = stretch_vertical(&img, factor).unwrap();

            prop_assert_eq!(result.width(), img.width());
            prop_assert_eq!(result.height(), img.height() * factor);
            prop_assert_eq!(result.layout(), img.layout());
            for r in 0..img.height() {
                for k in 0..factor {
                    prop_assert_eq!(result.row(r * factor + k), img.row(r));
                }
            }
        }

        /// Property: Horizontal stretch multiplies width and replicates pixels.
        #[test]
        fn prop_horizontal_replicates_pixels(
            img in image_strategy(),
            factor in MIN_STRETCH_FACTOR..=MAX_STRETCH_FACTOR,
        ) {
            let result = stretch_horizontal(&img, factor).unwrap();

            prop_assert_eq!(result.height(), img.height());
            prop_assert_eq!(result.width(), img.width() * factor);
            for y in 0..result.height() {
                for x in 0..result.width() {
                    prop_assert_eq!(result.pixel(x, y), img.pixel(x / factor, y));
                }
            }
        }

        /// Property: Oversized stretches always fail with SizeLimitExceeded.
        #[test]
        fn prop_oversized_stretch_rejected(
            height in 1u32..=12_000,
            factor in MIN_STRETCH_FACTOR..=MAX_STRETCH_FACTOR,
        ) {
            prop_assume!(height * factor > MAX_STRETCHED_DIMENSION);

            let img = PixelBuffer::filled(1, height, ColorLayout::Gray, 7).unwrap();
            let result = stretch_vertical(&img, factor);
            let is_size_limit = matches!(result, Err(TransformError::SizeLimitExceeded { .. }));
            prop_assert!(is_size_limit);
        }
    }
}
