//! The Catmull-Rom curve family.

use kurbo::Point;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::family::{Curve, CurveFamily};
use crate::util::{self, MIN_KNOT_INTERVAL};

/// Catmull-Rom curves with knot parametrization.
///
/// Each curve is the window of four consecutive control points `p0..p3`
/// and runs from `p1` to `p2`; `p0` and `p3` only shape the tangents. Every
/// control point is a key point, and each point beyond the third adds one
/// more curve.
///
/// Knots are spaced by chord length raised to `alpha`:
///
/// t(i+1) = t(i) + |p(i+1) - p(i)|^alpha
///
/// An `alpha` of 0 gives the uniform spline, 0.5 the centripetal spline
/// (which never forms cusps or self-intersections within a curve), and 1
/// the chordal spline.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct CatmullRom {
    pub alpha: f64,
}

impl CatmullRom {
    pub const UNIFORM: CatmullRom = CatmullRom { alpha: 0.0 };
    pub const CENTRIPETAL: CatmullRom = CatmullRom { alpha: 0.5 };
    pub const CHORDAL: CatmullRom = CatmullRom { alpha: 1.0 };

    /// Create a family with the given tension exponent, clamped to `[0, 1]`.
    pub fn new(alpha: f64) -> CatmullRom {
        let alpha = if alpha.is_nan() {
            Self::CENTRIPETAL.alpha
        } else {
            alpha.max(0.0).min(1.0)
        };
        CatmullRom { alpha }
    }

    fn knot_interval(&self, a: Point, b: Point) -> f64 {
        a.distance(b).powf(self.alpha).max(MIN_KNOT_INTERVAL)
    }

    /// Evaluate the curve at `t`, where 0 maps to `p1` and 1 to `p2`.
    ///
    /// This is the Barry-Goldman pyramid: three blends between neighbouring
    /// points, two between those, and a final one. The intermediate
    /// parameters fall outside each pair's own knot span, so every blend is
    /// an unclamped lerp.
    pub fn eval(&self, curve: &Curve, t: f64) -> Point {
        let [p0, p1, p2, p3] = *curve;
        let t0 = 0.0;
        let t1 = t0 + self.knot_interval(p0, p1);
        let t2 = t1 + self.knot_interval(p1, p2);
        let t3 = t2 + self.knot_interval(p2, p3);
        let t = util::lerp(t1, t2, t);

        let a1 = p0.lerp(p1, util::inverse_lerp(t0, t1, t));
        let a2 = p1.lerp(p2, util::inverse_lerp(t1, t2, t));
        let a3 = p2.lerp(p3, util::inverse_lerp(t2, t3, t));
        let b1 = a1.lerp(a2, util::inverse_lerp(t0, t2, t));
        let b2 = a2.lerp(a3, util::inverse_lerp(t1, t3, t));
        b1.lerp(b2, util::inverse_lerp(t1, t2, t))
    }
}

impl Default for CatmullRom {
    fn default() -> Self {
        CatmullRom::CENTRIPETAL
    }
}

impl CurveFamily for CatmullRom {
    const MIN_CONTROL_POINTS: usize = 4;

    fn is_valid_count(&self, count: usize) -> bool {
        count >= Self::MIN_CONTROL_POINTS
    }

    fn curves_count(&self, count: usize) -> usize {
        count.saturating_sub(3)
    }

    fn curve_start_index(&self, curve_index: usize) -> usize {
        curve_index
    }

    fn key_points_count(&self, count: usize) -> usize {
        count
    }

    fn key_point_index(&self, key_index: usize) -> usize {
        key_index
    }

    fn default_control_points(&self) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 0.0),
        ]
    }

    fn interpolate(&self, curve: &Curve, t: f64) -> Point {
        self.eval(curve, t)
    }

    fn path_start_point(&self, points: &[Point]) -> Point {
        points[1]
    }

    fn path_end_point(&self, points: &[Point]) -> Point {
        points[points.len() - 2]
    }

    fn append_key_point(&self, points: &mut Vec<Point>, position: Point) {
        points.push(position);
    }

    fn prepend_key_point(&self, points: &mut Vec<Point>, position: Point) {
        points.insert(0, position);
    }

    fn remove_key_point(&self, points: &mut Vec<Point>, key_index: usize) {
        points.remove(key_index);
    }

    fn split_curve(&self, points: &mut Vec<Point>, curve_index: usize, ratio: f64) -> Point {
        let curve = crate::family::curve_at(points, curve_index);
        let mid = self.eval(&curve, ratio);
        // The window starts one point before the curve's own start.
        points.insert(curve_index + 2, mid);
        mid
    }
}
