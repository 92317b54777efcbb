//! Mirror flips. Both are self-inverse.

use crate::decode::PixelBuffer;

/// Reverse row order: `out[y] = in[H - 1 - y]`.
pub fn flip_vertical(image: &PixelBuffer) -> PixelBuffer {
    let row_len = image.row_len();
    let mut output = Vec::with_capacity(image.pixels().len());
    for row in image.pixels().chunks_exact(row_len).rev() {
        output.extend_from_slice(row);
    }

    PixelBuffer::from_parts_unchecked(image.width(), image.height(), image.layout(), output)
}

/// Reverse column order: `out[:, x] = in[:, W - 1 - x]`.
///
/// Channel order inside each pixel is kept.
pub fn flip_horizontal(image: &PixelBuffer) -> PixelBuffer {
    let row_len = image.row_len();
    let channels = image.channels();
    let mut output = Vec::with_capacity(image.pixels().len());
    for row in image.pixels().chunks_exact(row_len) {
        for pixel in row.chunks_exact(channels).rev() {
            output.extend_from_slice(pixel);
        }
    }

    PixelBuffer::from_parts_unchecked(image.width(), image.height(), image.layout(), output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::ColorLayout;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = PixelBuffer> {
        let layout = prop_oneof![
            Just(ColorLayout::Gray),
            Just(ColorLayout::Rgb),
            Just(ColorLayout::Rgba),
        ];
        (1u32..=20, 1u32..=20, layout).prop_flat_map(|(w, h, layout)| {
            let size = (w * h) as usize * layout.channels();
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| PixelBuffer::new(w, h, layout, pixels).unwrap())
        })
    }

    proptest! {
        /// Property: Flipping vertically twice restores the image.
        #[test]
        fn prop_flip_vertical_self_inverse(img in image_strategy()) {
            prop_assert_eq!(flip_vertical(&flip_vertical(&img)), img);
        }

        /// Property: Flipping horizontally twice restores the image.
        #[test]
        fn prop_flip_horizontal_self_inverse(img in image_strategy()) {
            prop_assert_eq!(flip_horizontal(&flip_horizontal(&img)), img);
        }

        /// Property: Each output row is the mirrored input row.
        #[test]
        fn prop_flip_vertical_mapping(img in image_strategy()) {
            let result = flip_vertical(&img);
            let h = img.height();
            for y in 0..h {
                prop_assert_eq!(result.row(y), img.row(h - 1 - y));
            }
        }

        /// Property: Each output pixel is the mirrored input pixel.
        #[test]
        fn prop_flip_horizontal_mapping(img in image_strategy()) {
            let result = flip_horizontal(&img);
            let w = img.width();
            for y in 0..img.height() {
                for x in 0..w {
                    prop_assert_eq!(result.pixel(x, y), img.pixel(w - 1 - x, y));
                }
            }
        }
    }
}
