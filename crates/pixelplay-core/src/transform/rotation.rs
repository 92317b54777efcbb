//! Exact quarter-turn rotation.
//!
//! Rotating by 90° only permutes pixels, so it is lossless and the two
//! directions are exact inverses of each other.
//!
//! # Mapping
//!
//! For an input of height `H` and width `W`, the output has height `W` and
//! width `H`:
//! ```text
//! clockwise:         out[x][H - 1 - y] = in[y][x]
//! counterclockwise:  out[W - 1 - x][y] = in[y][x]
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TransformError;
use crate::decode::PixelBuffer;

/// Direction of a 90° rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    Counterclockwise,
}

impl RotationDirection {
    /// The direction that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::Counterclockwise,
            RotationDirection::Counterclockwise => RotationDirection::Clockwise,
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationDirection::Clockwise => f.write_str("clockwise"),
            RotationDirection::Counterclockwise => f.write_str("counterclockwise"),
        }
    }
}

impl FromStr for RotationDirection {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cw" | "clockwise" => Ok(RotationDirection::Clockwise),
            "ccw" | "counterclockwise" | "counter-clockwise" | "anticlockwise" => {
                Ok(RotationDirection::Counterclockwise)
            }
            _ => Err(TransformError::InvalidParameter(format!(
                "unrecognized rotation direction {s:?} (expected \"cw\" or \"ccw\")"
            ))),
        }
    }
}

/// Rotate an image by exactly 90° in the given direction.
///
/// Height and width are swapped; samples are moved, never altered.
///
/// # Example
///
/// ```
/// use pixelplay_core::decode::{ColorLayout, PixelBuffer};
/// use pixelplay_core::transform::{rotate90, RotationDirection};
///
/// let image = PixelBuffer::filled(100, 50, ColorLayout::Rgb, 0).unwrap();
/// let rotated = rotate90(&image, RotationDirection::Clockwise);
/// assert_eq!((rotated.width(), rotated.height()), (50, 100));
/// ```
pub fn rotate90(image: &PixelBuffer, direction: RotationDirection) -> PixelBuffer {
    let (src_w, src_h) = (image.width() as usize, image.height() as usize);
    let channels = image.channels();
    let src = image.pixels();

    // Output is src_h wide and src_w tall
    let dst_w = src_h;
    let mut output = vec![0u8; src.len()];

    for y in 0..src_h {
        for x in 0..src_w {
            let (dst_x, dst_y) = match direction {
                RotationDirection::Clockwise => (src_h - 1 - y, x),
                RotationDirection::Counterclockwise => (y, src_w - 1 - x),
            };
            let src_idx = (y * src_w + x) * channels;
            let dst_idx = (dst_y * dst_w + dst_x) * channels;
            output[dst_idx..dst_idx + channels].copy_from_slice(&src[src_idx..src_idx + channels]);
        }
    }

    PixelBuffer::from_parts_unchecked(image.height(), image.width(), image.layout(), output)
}

/// Apply a rotation whose direction has been resolved by the caller.
///
/// This is the second half of the [`request_rotation`] exchange; it is a
/// plain alias of [`rotate90`].
///
/// [`request_rotation`]: super::request_rotation
pub fn apply_rotation(image: &PixelBuffer, direction: RotationDirection) -> PixelBuffer {
    rotate90(image, direction)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
