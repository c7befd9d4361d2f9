//! Errors reported by path queries and edits.

use thiserror::Error;

/// An operation on a [`Path`](crate::Path) was refused.
///
/// Refused edits never change the path.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PathError {
    #[error("curve index {index} out of range (path has {count} curves)")]
    CurveIndexOutOfRange { index: usize, count: usize },
    #[error("key point index {index} out of range (path has {count} key points)")]
    KeyPointIndexOutOfRange { index: usize, count: usize },
    #[error("control point index {index} out of range (path has {count} control points)")]
    ControlPointIndexOutOfRange { index: usize, count: usize },
    /// Removing a key point would leave fewer than `min` key points.
    #[error("cannot go below {min} key points (path has {count})")]
    TooFewKeyPoints { count: usize, min: usize },
    #[error("{count} control points do not form a valid path")]
    InvalidControlPointCount { count: usize },
    /// Split ratios must lie strictly between 0 and 1.
    #[error("split ratio {0} is not inside (0, 1)")]
    RatioOutOfRange(f64),
}
