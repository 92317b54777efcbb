//! Image transformation operations: stretch, rotation and flips.
//!
//! Every operation borrows its input and returns a new [`PixelBuffer`]. Sample
//! values are copied verbatim; nothing is interpolated, clamped or
//! re-channeled, so the output always has the input's [`ColorLayout`].
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - `y` indexes rows (height axis), `x` indexes columns (width axis)
//! - Rotations are exact quarter turns
//!
//! # Parameter Requests
//!
//! Interactive shells that must ask the user for a parameter first call
//! [`request_rotation`] or [`request_stretch`], which return a
//! [`PendingTransform`]. Resolving it with the user's answer yields a
//! [`TransformOp`] that can be applied synchronously.
//!
//! [`PixelBuffer`]: crate::decode::PixelBuffer
//! [`ColorLayout`]: crate::decode::ColorLayout

mod flip;
mod request;
mod rotation;
mod stretch;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use flip::{flip_horizontal, flip_vertical};
pub use request::{request_rotation, request_stretch, PendingTransform, TransformOp};
pub use rotation::{apply_rotation, rotate90, RotationDirection};
pub use stretch::{
    stretch_horizontal, stretch_vertical, MAX_STRETCHED_DIMENSION, MAX_STRETCH_FACTOR,
    MIN_STRETCH_FACTOR,
};

/// Image axis a stretch applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Height axis (rows).
    Vertical,
    /// Width axis (columns).
    Horizontal,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Vertical => f.write_str("height"),
            Axis::Horizontal => f.write_str("width"),
        }
    }
}

/// Errors that can occur while transforming an image.
///
/// A failed transform never produces a partially transformed buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The stretched dimension would exceed [`MAX_STRETCHED_DIMENSION`].
    #[error("Stretching would make the image {requested} pixels along its {axis}, above the limit of {limit}")]
    SizeLimitExceeded {
        axis: Axis,
        requested: u64,
        limit: u32,
    },

    /// A parameter is outside its allowed range or not recognized.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
