use kurbo::Point;

/// Smallest knot interval used by the Catmull-Rom evaluator.
///
/// Coincident control points would otherwise produce a zero interval.
pub const MIN_KNOT_INTERVAL: f64 = 1e-6;

/// Unclamped linear interpolation between two scalars.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// The fraction of the way `x` lies from `a` to `b`, unclamped.
pub fn inverse_lerp(a: f64, b: f64, x: f64) -> f64 {
    (x - a) / (b - a)
}

/// Length of the polyline through `points`.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
