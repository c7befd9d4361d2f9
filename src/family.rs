//! Per-family curve semantics.

use kurbo::Point;

/// The number of control points forming one curve.
pub const CURVE_POINTS: usize = 4;

/// A window of control points interpolated as one curve.
pub type Curve = [Point; CURVE_POINTS];

/// Describes how a family of curves is built from an ordered list of
/// control points.
///
/// A [`Path`](crate::Path) owns the control points and delegates all
/// family-specific decisions here: how many points make a valid path,
/// where each curve's window starts, which points are key points, and how
/// topology edits rearrange the list.
///
/// Methods that take a control point slice may assume it holds a valid
/// count; the path checks indices before calling them.
pub trait CurveFamily {
    /// Smallest valid number of control points.
    const MIN_CONTROL_POINTS: usize;

    /// Whether `count` control points form a valid path.
    fn is_valid_count(&self, count: usize) -> bool;

    /// Number of curves in a valid path of `count` control points.
    fn curves_count(&self, count: usize) -> usize;

    /// Index of the first control point of the given curve.
    fn curve_start_index(&self, curve_index: usize) -> usize;

    /// Number of key points in a valid path of `count` control points.
    fn key_points_count(&self, count: usize) -> usize;

    /// Control point index backing the given key point.
    fn key_point_index(&self, key_index: usize) -> usize;

    /// Fewest key points a valid path can have.
    fn min_key_points(&self) -> usize {
        self.key_points_count(Self::MIN_CONTROL_POINTS)
    }

    /// The points of a freshly constructed path.
    fn default_control_points(&self) -> Vec<Point>;

    /// Interpolate one curve at local parameter `t` in `[0, 1]`.
    fn interpolate(&self, curve: &Curve, t: f64) -> Point;

    /// The point reached at path parameter 0.
    fn path_start_point(&self, points: &[Point]) -> Point;

    /// The point reached at the final path parameter.
    fn path_end_point(&self, points: &[Point]) -> Point;

    /// Append a key point at the end, adding whatever extra control points
    /// the family needs.
    fn append_key_point(&self, points: &mut Vec<Point>, position: Point);

    /// Prepend a key point at the start.
    fn prepend_key_point(&self, points: &mut Vec<Point>, position: Point);

    /// Remove a key point. The caller guarantees the result stays valid.
    fn remove_key_point(&self, points: &mut Vec<Point>, key_index: usize);

    /// Move a key point.
    fn set_key_point(&self, points: &mut [Point], key_index: usize, position: Point) {
        points[self.key_point_index(key_index)] = position;
    }

    /// Split a curve in two at `ratio` (strictly inside `(0, 1)`), returning
    /// the inserted key point.
    fn split_curve(&self, points: &mut Vec<Point>, curve_index: usize, ratio: f64) -> Point;
}

/// Copy the curve window starting at `start`.
pub(crate) fn curve_at(points: &[Point], start: usize) -> Curve {
    [
        points[start],
        points[start + 1],
        points[start + 2],
        points[start + 3],
    ]
}
