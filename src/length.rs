//! Arc length estimation by polyline sampling.
//!
//! Curves are sampled at uniform parameter steps and the distances between
//! consecutive samples are summed. This is a first order approximation of
//! the true arc length: it converges as the segment count grows, but on a
//! curved segment it always comes out short. Closed forms would need
//! elliptic integrals or quadrature of similar cost, and sampling is easy to
//! bound and plenty for interactive editing and constant-speed traversal.

use kurbo::Point;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::family::{Curve, CurveFamily};
use crate::path::Path;
use crate::util;

/// Segment count used to estimate a curve's length before choosing a
/// length-driven segment count.
const COARSE_SEGMENTS: usize = 4;

/// How many segments to sample each curve with.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub enum SegmentsCount {
    /// The same number of segments for every curve.
    Fixed(usize),
    /// Roughly one segment per `target_length` of curve, up to `max`.
    ///
    /// The curve length is first estimated from a coarse sampling.
    PerLength { target_length: f64, max: usize },
}

impl SegmentsCount {
    /// Resolve to a concrete segment count for one curve. Never zero.
    pub fn for_curve<F: CurveFamily>(&self, family: &F, curve: &Curve) -> usize {
        match *self {
            SegmentsCount::Fixed(n) => n.max(1),
            SegmentsCount::PerLength { target_length, max } => {
                let max = max.max(1);
                if !(target_length > 0.0) {
                    return max;
                }
                let estimate = sampled_length(family, curve, COARSE_SEGMENTS);
                let n = (estimate / target_length).ceil();
                if n.is_finite() {
                    (n as usize).max(1).min(max)
                } else {
                    max
                }
            }
        }
    }
}

impl From<usize> for SegmentsCount {
    fn from(n: usize) -> SegmentsCount {
        SegmentsCount::Fixed(n)
    }
}

/// A parameter and the sampled length from the start up to it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct CumulatedLengthInfo {
    pub parameter: f64,
    pub length: f64,
}

impl CumulatedLengthInfo {
    pub const START: CumulatedLengthInfo = CumulatedLengthInfo {
        parameter: 0.0,
        length: 0.0,
    };
}

/// A cumulated length table over a whole path.
///
/// Parameters are path parameters (`curve_index + t`). The table always
/// starts at `(0, 0)` and is non-decreasing in both fields, so it can be
/// searched by distance.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulatedLengths {
    entries: Vec<CumulatedLengthInfo>,
}

impl CumulatedLengths {
    pub fn entries(&self) -> &[CumulatedLengthInfo] {
        &self.entries
    }

    pub fn total_length(&self) -> f64 {
        self.entries.last().map(|e| e.length).unwrap_or(0.0)
    }

    /// The path parameter at which the sampled length reaches `distance`.
    ///
    /// Distances are clamped to the table; between entries the parameter
    /// is interpolated linearly.
    pub fn parameter_at_length(&self, distance: f64) -> f64 {
        let entries = &self.entries;
        let distance = distance.max(0.0).min(self.total_length());
        let i = entries.partition_point(|e| e.length < distance);
        if i == 0 {
            return entries[0].parameter;
        }
        if i == entries.len() {
            return entries[i - 1].parameter;
        }
        let (a, b) = (entries[i - 1], entries[i]);
        if b.length <= a.length {
            return b.parameter;
        }
        util::lerp(
            a.parameter,
            b.parameter,
            util::inverse_lerp(a.length, b.length, distance),
        )
    }
}

fn sample_points<'a, F: CurveFamily>(
    family: &'a F,
    curve: &'a Curve,
    segments: usize,
) -> impl Iterator<Item = (f64, Point)> + 'a {
    (0..=segments).map(move |i| {
        let t = i as f64 / segments as f64;
        (t, family.interpolate(curve, t))
    })
}

fn sampled_length<F: CurveFamily>(family: &F, curve: &Curve, segments: usize) -> f64 {
    let points: Vec<Point> = sample_points(family, curve, segments)
        .map(|(_, p)| p)
        .collect();
    util::polyline_length(&points)
}

/// Estimate the length of one curve.
pub fn evaluate_curve_length<F: CurveFamily>(
    family: &F,
    curve: &Curve,
    segments: impl Into<SegmentsCount>,
) -> f64 {
    let n = segments.into().for_curve(family, curve);
    log::trace!("sampling curve length with {} segments", n);
    sampled_length(family, curve, n)
}

/// Sample one curve into `(t, length from curve start)` pairs.
///
/// The first entry is always `(0, 0)`.
pub fn evaluate_cumulated_curve_lengths<F: CurveFamily>(
    family: &F,
    curve: &Curve,
    segments: impl Into<SegmentsCount>,
) -> Vec<CumulatedLengthInfo> {
    let n = segments.into().for_curve(family, curve);
    log::trace!("sampling cumulated curve lengths with {} segments", n);
    let mut result = Vec::with_capacity(n + 1);
    result.push(CumulatedLengthInfo::START);
    let mut length = 0.0;
    let mut last = family.interpolate(curve, 0.0);
    for (t, p) in sample_points(family, curve, n).skip(1) {
        length += last.distance(p);
        last = p;
        result.push(CumulatedLengthInfo {
            parameter: t,
            length,
        });
    }
    result
}

impl<F: CurveFamily> Path<F> {
    pub fn evaluate_curve_length(&self, curve: &Curve, segments: impl Into<SegmentsCount>) -> f64 {
        evaluate_curve_length(self.family(), curve, segments)
    }

    pub fn evaluate_cumulated_curve_lengths(
        &self,
        curve: &Curve,
        segments: impl Into<SegmentsCount>,
    ) -> Vec<CumulatedLengthInfo> {
        evaluate_cumulated_curve_lengths(self.family(), curve, segments)
    }

    /// Build the cumulated length table of the whole path.
    ///
    /// Each curve's table is shifted to path parameters and to the running
    /// length of the curves before it, so the last entry holds the length
    /// of the whole path.
    pub fn evaluate_cumulated_lengths(&self, segments_per_curve: impl Into<SegmentsCount>) -> CumulatedLengths {
        let segments = segments_per_curve.into();
        let mut entries = vec![CumulatedLengthInfo::START];
        let mut running = 0.0;
        for (curve_index, curve) in self.curves().enumerate() {
            let curve_entries = evaluate_cumulated_curve_lengths(self.family(), &curve, segments);
            // Every curve's sentinel duplicates the previous curve's last entry.
            for e in &curve_entries[1..] {
                entries.push(CumulatedLengthInfo {
                    parameter: curve_index as f64 + e.parameter,
                    length: running + e.length,
                });
            }
            running += curve_entries.last().map(|e| e.length).unwrap_or(0.0);
        }
        log::debug!(
            "cumulated length table: {} entries, total length {}",
            entries.len(),
            running
        );
        CumulatedLengths { entries }
    }

    /// Estimate the length of the whole path.
    pub fn evaluate_length(&self, segments_per_curve: impl Into<SegmentsCount>) -> f64 {
        let segments = segments_per_curve.into();
        self.curves()
            .map(|curve| evaluate_curve_length(self.family(), &curve, segments))
            .sum()
    }

    /// The point `distance` along the path, measured with `lengths`.
    ///
    /// `lengths` must come from [`Path::evaluate_cumulated_lengths`] on the
    /// current control points; rebuild it after any edit.
    pub fn interpolate_by_length(&self, lengths: &CumulatedLengths, distance: f64) -> Point {
        self.interpolate_by_parameter(lengths.parameter_at_length(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BezierPath, CatmullRom, CatmullRomPath, CubicBezier};
    use kurbo::{CubicBez, ParamCurveArclen};

    fn line_curve() -> Curve {
        [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ]
    }

    #[test]
    fn straight_curves_are_exact() {
        let curve = line_curve();
        assert!((evaluate_curve_length(&CubicBezier, &curve, 1) - 3.0).abs() < 1e-12);
        assert!((evaluate_curve_length(&CubicBezier, &curve, 7) - 3.0).abs() < 1e-12);
        let cr = CatmullRom::CENTRIPETAL;
        assert!((evaluate_curve_length(&cr, &curve, 5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sampled_length_converges_from_below() {
        // Quarter circle approximation.
        const K: f64 = 0.551_915_024_494;
        let curve = [
            Point::new(1.0, 0.0),
            Point::new(1.0, K),
            Point::new(K, 1.0),
            Point::new(0.0, 1.0),
        ];
        let exact = CubicBez::new(curve[0], curve[1], curve[2], curve[3]).arclen(1e-9);
        let mut last = 0.0;
        for n in &[2, 4, 16, 64, 256] {
            let l = evaluate_curve_length(&CubicBezier, &curve, *n);
            assert!(l > last);
            assert!(l <= exact + 1e-9);
            last = l;
        }
        assert!(exact - last < 1e-4);
    }

    #[test]
    fn cumulated_curve_lengths_start_at_zero() {
        let path = CatmullRomPath::default();
        let curve = path.curve(0).unwrap();
        let table = path.evaluate_cumulated_curve_lengths(&curve, 10);
        assert_eq!(table.len(), 11);
        assert_eq!(table[0], CumulatedLengthInfo::START);
        for w in table.windows(2) {
            assert!(w[1].parameter > w[0].parameter);
            assert!(w[1].length >= w[0].length);
        }
        assert_eq!(table[10].parameter, 1.0);
        let total = path.evaluate_curve_length(&curve, 10);
        assert!((table[10].length - total).abs() < 1e-12);
    }

    #[test]
    fn zero_segments_sample_once() {
        let table = evaluate_cumulated_curve_lengths(&CubicBezier, &line_curve(), 0);
        assert_eq!(table.len(), 2);
        assert!((table[1].length - 3.0).abs() < 1e-12);
    }

    #[test]
    fn path_table_spans_whole_path() {
        let mut path = BezierPath::default();
        path.add_key_point(Point::new(6.0, 2.0));
        path.add_key_point(Point::new(8.0, -1.0));
        let n = 12;
        let table = path.evaluate_cumulated_lengths(n);
        let entries = table.entries();
        assert_eq!(entries.len(), path.curves_count() * n + 1);
        assert_eq!(entries[0], CumulatedLengthInfo::START);
        assert_eq!(entries[entries.len() - 1].parameter, path.curves_count() as f64);
        for w in entries.windows(2) {
            assert!(w[1].parameter > w[0].parameter);
            assert!(w[1].length >= w[0].length);
        }
        assert!((table.total_length() - path.evaluate_length(n)).abs() < 1e-9);
    }

    #[test]
    fn length_driven_segments() {
        let curve = line_curve();
        let per_length = SegmentsCount::PerLength {
            target_length: 0.5,
            max: 100,
        };
        assert_eq!(per_length.for_curve(&CubicBezier, &curve), 6);
        let capped = SegmentsCount::PerLength {
            target_length: 0.01,
            max: 20,
        };
        assert_eq!(capped.for_curve(&CubicBezier, &curve), 20);
        let table = evaluate_cumulated_curve_lengths(&CubicBezier, &curve, per_length);
        assert_eq!(table.len(), 7);
        assert_eq!(SegmentsCount::from(0).for_curve(&CubicBezier, &curve), 1);
    }

    #[test]
    fn constant_speed_on_uneven_parametrization() {
        // A straight line whose parameter speed varies a lot.
        let path = BezierPath::from_control_points(
            CubicBezier,
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.1, 0.0),
                Point::new(0.2, 0.0),
                Point::new(3.0, 0.0),
            ],
        )
        .unwrap();
        let table = path.evaluate_cumulated_lengths(256);
        assert!((table.total_length() - 3.0).abs() < 1e-9);
        for i in 0..=6 {
            let d = i as f64 * 0.5;
            let p = path.interpolate_by_length(&table, d);
            assert!((p.x - d).abs() < 1e-2, "{} at {}", p.x, d);
        }
        assert_eq!(path.interpolate_by_length(&table, -1.0), path.start_point());
        assert_eq!(path.interpolate_by_length(&table, 10.0), path.end_point());
        assert_eq!(table.parameter_at_length(0.0), 0.0);
    }

    #[test]
    fn split_requires_new_table() {
        let mut path = CatmullRomPath::default();
        let before = path.evaluate_cumulated_lengths(32);
        path.split_curve_at_parameter_ratio(0, 0.25).unwrap();
        let after = path.evaluate_cumulated_lengths(32);
        assert_eq!(after.entries().len(), 2 * 32 + 1);
        assert_ne!(before.entries().len(), after.entries().len());
        // Roughly the same shape, so roughly the same length.
        assert!((before.total_length() - after.total_length()).abs() < 0.1);
    }
}
