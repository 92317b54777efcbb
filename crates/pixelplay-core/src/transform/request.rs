//! Resolved transform requests and two-phase parameter prompts.
//!
//! A shell that asks the user for a parameter does so in two steps:
//!
//! 1. `request_rotation()` / `request_stretch(axis)` returns a
//!    [`PendingTransform`] describing what must be chosen.
//! 2. `PendingTransform::resolve(answer)` validates the answer and returns a
//!    [`TransformOp`], which is then applied to the current image.
//!
//! No state is kept between the two steps other than the pending value the
//! caller holds on to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    flip_horizontal, flip_vertical, rotate90, stretch_horizontal, stretch_vertical, Axis,
    RotationDirection, TransformError, MAX_STRETCH_FACTOR, MIN_STRETCH_FACTOR,
};
use crate::decode::PixelBuffer;

/// A transform with all of its parameters resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformOp {
    StretchVertical(u32),
    StretchHorizontal(u32),
    Rotate(RotationDirection),
    FlipVertical,
    FlipHorizontal,
}

impl TransformOp {
    /// Apply this transform, returning a new image.
    pub fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, TransformError> {
        match *self {
            TransformOp::StretchVertical(factor) => stretch_vertical(image, factor),
            TransformOp::StretchHorizontal(factor) => stretch_horizontal(image, factor),
            TransformOp::Rotate(direction) => Ok(rotate90(image, direction)),
            TransformOp::FlipVertical => Ok(flip_vertical(image)),
            TransformOp::FlipHorizontal => Ok(flip_horizontal(image)),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::StretchVertical(factor) => write!(f, "stretch-v={factor}"),
            TransformOp::StretchHorizontal(factor) => write!(f, "stretch-h={factor}"),
            TransformOp::Rotate(RotationDirection::Clockwise) => f.write_str("rotate=cw"),
            TransformOp::Rotate(RotationDirection::Counterclockwise) => f.write_str("rotate=ccw"),
            TransformOp::FlipVertical => f.write_str("flip-v"),
            TransformOp::FlipHorizontal => f.write_str("flip-h"),
        }
    }
}

impl FromStr for TransformOp {
    type Err = TransformError;

    /// Parse the compact form used by the shell: `stretch-v=3`,
    /// `stretch-h=2`, `rotate=cw`, `rotate=ccw`, `flip-v`, `flip-h`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s, None),
        };

        match (name.to_ascii_lowercase().as_str(), value) {
            ("stretch-v", Some(v)) => request_stretch(Axis::Vertical).resolve(v),
            ("stretch-h", Some(v)) => request_stretch(Axis::Horizontal).resolve(v),
            ("rotate", Some(v)) => request_rotation().resolve(v),
            ("flip-v", None) => Ok(TransformOp::FlipVertical),
            ("flip-h", None) => Ok(TransformOp::FlipHorizontal),
            _ => Err(TransformError::InvalidParameter(format!(
                "unrecognized transform {s:?}"
            ))),
        }
    }
}

/// A transform waiting for the user to choose its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingTransform {
    /// Waiting for a rotation direction.
    Rotation,
    /// Waiting for a stretch factor along the given axis.
    Stretch(Axis),
}

/// Start a rotation request.
pub fn request_rotation() -> PendingTransform {
    PendingTransform::Rotation
}

/// Start a stretch request along `axis`.
pub fn request_stretch(axis: Axis) -> PendingTransform {
    PendingTransform::Stretch(axis)
}

impl PendingTransform {
    /// Question to show the user.
    pub fn prompt(&self) -> String {
        match self {
            PendingTransform::Rotation => "Rotate which way?".to_string(),
            PendingTransform::Stretch(axis) => format!(
                "Stretch the {axis} by how much ({MIN_STRETCH_FACTOR}-{MAX_STRETCH_FACTOR})?"
            ),
        }
    }

    /// Accepted answers.
    pub fn choices(&self) -> Vec<String> {
        match self {
            PendingTransform::Rotation => vec!["cw".to_string(), "ccw".to_string()],
            PendingTransform::Stretch(_) => (MIN_STRETCH_FACTOR..=MAX_STRETCH_FACTOR)
                .map(|f| f.to_string())
                .collect(),
        }
    }

    /// Turn the user's answer into a resolved transform.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameter` if the answer is not one of
    /// the accepted choices.
    pub fn resolve(self, answer: &str) -> Result<TransformOp, TransformError> {
        match self {
            PendingTransform::Rotation => answer.parse().map(TransformOp::Rotate),
            PendingTransform::Stretch(axis) => {
                let factor = parse_factor(answer)?;
                Ok(match axis {
                    Axis::Vertical => TransformOp::StretchVertical(factor),
                    Axis::Horizontal => TransformOp::StretchHorizontal(factor),
                })
            }
        }
    }
}

fn parse_factor(answer: &str) -> Result<u32, TransformError> {
    let factor: u32 = answer.trim().parse().map_err(|_| {
        TransformError::InvalidParameter(format!("stretch factor {answer:?} is not a number"))
    })?;
    if !(MIN_STRETCH_FACTOR..=MAX_STRETCH_FACTOR).contains(&factor) {
        return Err(TransformError::InvalidParameter(format!(
            "stretch factor must be between {MIN_STRETCH_FACTOR} and {MAX_STRETCH_FACTOR}, got {factor}"
        )));
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorLayout;

    #[test]
    fn test_rotation_request_round() {
        let pending = request_rotation();
        assert_eq!(pending.choices(), vec!["cw", "ccw"]);

        let op = pending.resolve("ccw").unwrap();
        assert_eq!(op, TransformOp::Rotate(RotationDirection::Counterclockwise));
    }

    #[test]
    fn test_rotation_request_rejects_unknown_answer() {
        let result = request_rotation().resolve("up");
        assert!(matches!(result, Err(TransformError::InvalidParameter(_))));
    }

    #[test]
    fn test_stretch_request_round() {
        let pending = request_stretch(Axis::Horizontal);
        assert_eq!(pending.choices(), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(
            pending.prompt(),
            "Stretch the width by how much (1-5)?"
        );

        let op = pending.resolve(" 4 ").unwrap();
        assert_eq!(op, TransformOp::StretchHorizontal(4));
    }

    #[test]
    fn test_stretch_request_rejects_bad_factor() {
        let pending = request_stretch(Axis::Vertical);
        assert!(matches!(
            pending.resolve("6"),
            Err(TransformError::InvalidParameter(_))
        ));
        assert!(matches!(
            pending.resolve("two"),
            Err(TransformError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_parse_ops() {
        assert_eq!(
            "stretch-v=3".parse::<TransformOp>(),
            Ok(TransformOp::StretchVertical(3))
        );
        assert_eq!(
            "stretch-h = 2".parse::<TransformOp>(),
            Ok(TransformOp::StretchHorizontal(2))
        );
        assert_eq!(
            "rotate=cw".parse::<TransformOp>(),
            Ok(TransformOp::Rotate(RotationDirection::Clockwise))
        );
        assert_eq!("flip-v".parse::<TransformOp>(), Ok(TransformOp::FlipVertical));
        assert_eq!("FLIP-H".parse::<TransformOp>(), Ok(TransformOp::FlipHorizontal));
    }

    #[test]
    fn test_parse_rejects_malformed_ops() {
        for text in ["", "rotate", "flip-v=1", "stretch-v", "stretch-v=0", "blur=2"] {
            assert!(
                text.parse::<TransformOp>().is_err(),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_parses_back() {
        let ops = [
            TransformOp::StretchVertical(5),
            TransformOp::StretchHorizontal(1),
            TransformOp::Rotate(RotationDirection::Clockwise),
            TransformOp::Rotate(RotationDirection::Counterclockwise),
            TransformOp::FlipVertical,
            TransformOp::FlipHorizontal,
        ];
        for op in ops {
            assert_eq!(op.to_string().parse::<TransformOp>(), Ok(op));
        }
    }

    #[test]
    fn test_apply_dispatch() {
        let img = PixelBuffer::new(2, 1, ColorLayout::Gray, vec![1, 2]).unwrap();

        let stretched = TransformOp::StretchVertical(2).apply(&img).unwrap();
        assert_eq!((stretched.width(), stretched.height()), (2, 2));

        let rotated = TransformOp::Rotate(RotationDirection::Clockwise)
            .apply(&img)
            .unwrap();
        assert_eq!((rotated.width(), rotated.height()), (1, 2));

        let flipped = TransformOp::FlipHorizontal.apply(&img).unwrap();
        assert_eq!(flipped.pixels(), &[2, 1]);
    }

    #[test]
    fn test_apply_propagates_size_limit() {
        let img = PixelBuffer::filled(1, 3000, ColorLayout::Gray, 0).unwrap();
        let result = TransformOp::StretchVertical(4).apply(&img);
        assert!(matches!(
            result,
            Err(TransformError::SizeLimitExceeded { .. })
        ));
    }
}
