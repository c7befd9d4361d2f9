//! The cubic Bézier curve family.

use kurbo::{CubicBez, ParamCurve, Point};
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::family::{curve_at, Curve, CurveFamily};

/// Chained cubic Bézier curves.
///
/// Control points are laid out as `anchor, handle, handle, anchor, handle,
/// handle, anchor, ...`: each curve after the first reuses the previous
/// curve's last anchor as its first point. Only anchors are key points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct CubicBezier;

fn to_cubic(curve: &Curve) -> CubicBez {
    CubicBez::new(curve[0], curve[1], curve[2], curve[3])
}

impl CurveFamily for CubicBezier {
    const MIN_CONTROL_POINTS: usize = 4;

    fn is_valid_count(&self, count: usize) -> bool {
        count >= Self::MIN_CONTROL_POINTS && (count - 1) % 3 == 0
    }

    fn curves_count(&self, count: usize) -> usize {
        count.saturating_sub(1) / 3
    }

    fn curve_start_index(&self, curve_index: usize) -> usize {
        3 * curve_index
    }

    fn key_points_count(&self, count: usize) -> usize {
        if count == 0 {
            0
        } else {
            (count - 1) / 3 + 1
        }
    }

    fn key_point_index(&self, key_index: usize) -> usize {
        3 * key_index
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
        to_cubic(curve).eval(t)
    }

    fn path_start_point(&self, points: &[Point]) -> Point {
        points[0]
    }

    fn path_end_point(&self, points: &[Point]) -> Point {
        points[points.len() - 1]
    }

    /// New handles sit on the chord from the previous end anchor, at one
    /// and two thirds.
    fn append_key_point(&self, points: &mut Vec<Point>, position: Point) {
        let last = points[points.len() - 1];
        points.push(last.lerp(position, 1.0 / 3.0));
        points.push(last.lerp(position, 2.0 / 3.0));
        points.push(position);
    }

    fn prepend_key_point(&self, points: &mut Vec<Point>, position: Point) {
        let first = points[0];
        let head = [
            position,
            position.lerp(first, 1.0 / 3.0),
            position.lerp(first, 2.0 / 3.0),
        ];
        points.splice(0..0, head.iter().copied());
    }

    /// Interior anchors take their two handles with them, so the curves on
    /// either side merge into one that keeps the outer handles.
    fn remove_key_point(&self, points: &mut Vec<Point>, key_index: usize) {
        let n = points.len();
        let ix = self.key_point_index(key_index);
        if ix == 0 {
            points.drain(0..3);
        } else if ix == n - 1 {
            points.drain(n - 3..n);
        } else {
            points.drain(ix - 1..=ix + 1);
        }
    }

    /// Moving an anchor drags its handles along.
    fn set_key_point(&self, points: &mut [Point], key_index: usize, position: Point) {
        let ix = self.key_point_index(key_index);
        let delta = position - points[ix];
        points[ix] = position;
        if ix > 0 {
            points[ix - 1] += delta;
        }
        if ix + 1 < points.len() {
            points[ix + 1] += delta;
        }
    }

    /// De Casteljau subdivision: both halves trace exactly the original
    /// curve, though not at the original speed.
    fn split_curve(&self, points: &mut Vec<Point>, curve_index: usize, ratio: f64) -> Point {
        let start = self.curve_start_index(curve_index);
        let cubic = to_cubic(&curve_at(points, start));
        let left = cubic.subsegment(0.0..ratio);
        let right = cubic.subsegment(ratio..1.0);
        let mid = left.p3;
        let inner = [left.p1, left.p2, mid, right.p1, right.p2];
        points.splice(start + 1..start + 3, inner.iter().copied());
        mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn arc() -> Vec<Point> {
        CubicBezier.default_control_points()
    }

    #[test]
    fn counts() {
        let b = CubicBezier;
        for k in 1..6 {
            let n = 3 * k + 1;
            assert!(b.is_valid_count(n));
            assert_eq!(b.curves_count(n), k);
            assert_eq!(b.key_points_count(n), k + 1);
        }
        assert!(!b.is_valid_count(1));
        assert!(!b.is_valid_count(5));
        assert!(!b.is_valid_count(6));
    }

    #[test]
    fn split_matches_original_point() {
        let b = CubicBezier;
        let mut points = arc();
        let original = curve_at(&points, 0);
        let mid = b.split_curve(&mut points, 0, 0.5);
        assert!(mid.distance(Point::new(1.5, 0.75)) < EPSILON);
        assert!(mid.distance(b.interpolate(&original, 0.5)) < EPSILON);
        assert_eq!(points.len(), 7);
        assert_eq!(points[3], mid);
        assert_eq!(points[0], original[0]);
        assert_eq!(points[6], original[3]);
    }

    #[test]
    fn split_is_shape_exact() {
        let b = CubicBezier;
        let mut points = vec![
            Point::new(-2.0, 5.0),
            Point::new(4.0, 9.0),
            Point::new(7.0, -3.0),
            Point::new(10.0, 2.0),
        ];
        let original = curve_at(&points, 0);
        let ratio = 0.3;
        b.split_curve(&mut points, 0, ratio);
        let left = curve_at(&points, 0);
        let right = curve_at(&points, 3);
        for i in 0..=10 {
            let s = i as f64 / 10.0;
            let expected = b.interpolate(&original, s * ratio);
            assert!(b.interpolate(&left, s).distance(expected) < 1e-6);
            let expected = b.interpolate(&original, ratio + s * (1.0 - ratio));
            assert!(b.interpolate(&right, s).distance(expected) < 1e-6);
        }
    }

    #[test]
    fn edits_keep_layout() {
        let b = CubicBezier;
        let mut points = arc();
        b.append_key_point(&mut points, Point::new(6.0, 0.0));
        assert_eq!(points.len(), 7);
        assert_eq!(points[4], Point::new(4.0, 0.0));
        b.prepend_key_point(&mut points, Point::new(-3.0, 0.0));
        assert_eq!(points.len(), 10);
        assert_eq!(points[0], Point::new(-3.0, 0.0));
        assert_eq!(points[3], Point::new(0.0, 0.0));

        // Interior removal keeps the neighbours' outer handles.
        let before = points.clone();
        b.remove_key_point(&mut points, 1);
        assert_eq!(points.len(), 7);
        assert_eq!(&points[..2], &before[..2]);
        assert_eq!(&points[2..], &before[5..]);

        b.remove_key_point(&mut points, 2);
        assert_eq!(points.len(), 4);
        assert!(b.is_valid_count(points.len()));
    }

    #[test]
    fn moving_anchor_drags_handles() {
        let b = CubicBezier;
        let mut points = arc();
        b.append_key_point(&mut points, Point::new(6.0, 0.0));
        b.set_key_point(&mut points, 1, Point::new(3.0, 2.0));
        assert_eq!(points[2], Point::new(2.0, 3.0));
        assert_eq!(points[3], Point::new(3.0, 2.0));
        assert_eq!(points[4], Point::new(4.0, 2.0));
        assert_eq!(points[1], Point::new(1.0, 1.0));
    }
}
