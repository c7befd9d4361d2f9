//! Editable paths made of chained curves.

use kurbo::{Point, Rect, Vec2};
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::bezier::CubicBezier;
use crate::catmull_rom::CatmullRom;
use crate::error::PathError;
use crate::family::{curve_at, Curve, CurveFamily};

/// An ordered list of control points interpreted by a curve family.
///
/// The path never caches anything derived from its points; every query is
/// computed from the current control points. Edits go through the key
/// point methods so the family's count invariant always holds.
///
/// A deserialized path is taken as-is and may hold an invalid number of
/// points; call [`Path::sanitize`] before using it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct Path<F> {
    family: F,
    control_points: Vec<Point>,
}

/// A path of Catmull-Rom curves.
pub type CatmullRomPath = Path<CatmullRom>;

/// A path of cubic Bézier curves.
pub type BezierPath = Path<CubicBezier>;

impl<F: CurveFamily + Default> Default for Path<F> {
    fn default() -> Self {
        Path::new(F::default())
    }
}

impl<F: CurveFamily> Path<F> {
    /// Create a path holding the family's default shape.
    pub fn new(family: F) -> Path<F> {
        let control_points = family.default_control_points();
        Path {
            family,
            control_points,
        }
    }

    /// Create a path from explicit control points.
    ///
    /// Fails if the count does not satisfy the family's invariant.
    pub fn from_control_points(family: F, control_points: Vec<Point>) -> Result<Path<F>, PathError> {
        if !family.is_valid_count(control_points.len()) {
            return Err(PathError::InvalidControlPointCount {
                count: control_points.len(),
            });
        }
        Ok(Path {
            family,
            control_points,
        })
    }

    pub fn family(&self) -> &F {
        &self.family
    }

    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    pub fn control_point(&self, index: usize) -> Option<Point> {
        self.control_points.get(index).copied()
    }

    /// Move a single control point, including tangent handles.
    pub fn set_control_point(&mut self, index: usize, position: Point) -> Result<(), PathError> {
        let count = self.control_points.len();
        match self.control_points.get_mut(index) {
            Some(p) => {
                *p = position;
                Ok(())
            }
            None => Err(PathError::ControlPointIndexOutOfRange { index, count }),
        }
    }

    /// Whether the control point count satisfies the family's invariant.
    pub fn is_valid(&self) -> bool {
        self.family.is_valid_count(self.control_points.len())
    }

    /// Reset to the default shape if the control points are invalid.
    ///
    /// Returns `true` if the path was reset. There is no partial repair.
    pub fn sanitize(&mut self) -> bool {
        if self.is_valid() {
            return false;
        }
        log::warn!(
            "{} control points do not form a valid path, resetting to default",
            self.control_points.len()
        );
        self.control_points = self.family.default_control_points();
        true
    }

    /// Translate every control point so the path starts at the origin.
    pub fn subtract_start_offset(&mut self) {
        let offset = self.start_point().to_vec2();
        for p in &mut self.control_points {
            *p -= offset;
        }
    }

    /// Translate every control point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.control_points {
            *p += delta;
        }
    }

    /// The smallest rectangle containing every control point.
    ///
    /// Bézier curves never leave it; Catmull-Rom curves can overshoot it
    /// slightly.
    pub fn control_bounds(&self) -> Rect {
        let first = match self.control_points.first() {
            Some(p) => *p,
            None => return Rect::ZERO,
        };
        self.control_points
            .iter()
            .fold(Rect::from_points(first, first), |r, p| r.union_pt(*p))
    }

    pub fn curves_count(&self) -> usize {
        self.family.curves_count(self.control_points.len())
    }

    /// Index of the first control point in the given curve's window.
    pub fn curve_start_index(&self, curve_index: usize) -> usize {
        self.family.curve_start_index(curve_index)
    }

    /// The control points of one curve.
    pub fn curve(&self, curve_index: usize) -> Result<Curve, PathError> {
        let count = self.curves_count();
        if curve_index >= count {
            return Err(PathError::CurveIndexOutOfRange {
                index: curve_index,
                count,
            });
        }
        Ok(curve_at(
            &self.control_points,
            self.family.curve_start_index(curve_index),
        ))
    }

    /// Iterate over all curves, reading the live control points.
    pub fn curves(&self) -> impl Iterator<Item = Curve> + '_ {
        (0..self.curves_count()).map(move |i| {
            curve_at(&self.control_points, self.family.curve_start_index(i))
        })
    }

    /// Interpolate an arbitrary curve with this path's family.
    pub fn interpolate(&self, curve: &Curve, t: f64) -> Point {
        self.family.interpolate(curve, t)
    }

    /// Interpolate one curve of the path; `t` is clamped to `[0, 1]`.
    pub fn interpolate_curve(&self, curve_index: usize, t: f64) -> Result<Point, PathError> {
        let curve = self.curve(curve_index)?;
        Ok(self.interpolate(&curve, t.max(0.0).min(1.0)))
    }

    /// Interpolate at a path parameter in `[0, curves_count]`.
    ///
    /// The integer part picks the curve and the fraction is the local
    /// parameter. Values at or beyond either end return the exact start or
    /// end point.
    pub fn interpolate_by_parameter(&self, path_t: f64) -> Point {
        let count = self.curves_count();
        if path_t <= 0.0 || path_t.is_nan() {
            return self.start_point();
        }
        if path_t >= count as f64 {
            return self.end_point();
        }
        let curve_index = (path_t.floor() as usize).min(count - 1);
        let t = path_t - curve_index as f64;
        let curve = curve_at(
            &self.control_points,
            self.family.curve_start_index(curve_index),
        );
        self.interpolate(&curve, t)
    }

    /// Interpolate at a normalized parameter in `[0, 1]`.
    ///
    /// Every curve gets an equal share of the range regardless of its
    /// length, so equal steps do not give equal distances. Use
    /// [`Path::interpolate_by_length`] for constant speed.
    pub fn interpolate_by_normalized_parameter(&self, normalized_t: f64) -> Point {
        self.interpolate_by_parameter(normalized_t * self.curves_count() as f64)
    }

    pub fn start_point(&self) -> Point {
        self.family.path_start_point(&self.control_points)
    }

    pub fn end_point(&self) -> Point {
        self.family.path_end_point(&self.control_points)
    }

    pub fn key_points_count(&self) -> usize {
        self.family.key_points_count(self.control_points.len())
    }

    pub fn key_point(&self, key_index: usize) -> Result<Point, PathError> {
        self.check_key_index(key_index)?;
        Ok(self.control_points[self.family.key_point_index(key_index)])
    }

    /// Iterate over the key points, reading the live control points.
    pub fn key_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.key_points_count())
            .map(move |i| self.control_points[self.family.key_point_index(i)])
    }

    pub fn set_key_point(&mut self, key_index: usize, position: Point) -> Result<(), PathError> {
        self.check_key_index(key_index)?;
        self.family
            .set_key_point(&mut self.control_points, key_index, position);
        Ok(())
    }

    /// Append a key point at the end of the path.
    pub fn add_key_point(&mut self, position: Point) {
        self.family
            .append_key_point(&mut self.control_points, position);
        log::debug!(
            "appended key point {:?}, path has {} curves",
            position,
            self.curves_count()
        );
    }

    /// Insert a key point before the first one.
    pub fn insert_key_point_at_start(&mut self, position: Point) {
        self.family
            .prepend_key_point(&mut self.control_points, position);
        log::debug!(
            "prepended key point {:?}, path has {} curves",
            position,
            self.curves_count()
        );
    }

    /// Remove a key point.
    ///
    /// Refused, leaving the path untouched, if the path is already at its
    /// minimum size.
    pub fn remove_key_point(&mut self, key_index: usize) -> Result<(), PathError> {
        self.check_key_index(key_index)?;
        let count = self.key_points_count();
        let min = self.family.min_key_points();
        if count <= min {
            log::warn!(
                "refusing to remove key point {}: path is at its minimum of {} key points",
                key_index,
                min
            );
            return Err(PathError::TooFewKeyPoints { count, min });
        }
        self.family
            .remove_key_point(&mut self.control_points, key_index);
        log::debug!("removed key point {}", key_index);
        Ok(())
    }

    /// Index of the key point closest to `position`.
    ///
    /// Ties go to the lowest index.
    pub fn nearest_key_point_index(&self, position: Point) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, p) in self.key_points().enumerate() {
            let dist = (p - position).hypot2();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// Divide one curve into two by inserting a key point at
    /// `parameter_ratio` along it.
    ///
    /// The path keeps its shape as closely as the family allows, but not
    /// its speed: re-run length estimation afterwards if traversal depends
    /// on it. Returns the inserted key point.
    pub fn split_curve_at_parameter_ratio(
        &mut self,
        curve_index: usize,
        parameter_ratio: f64,
    ) -> Result<Point, PathError> {
        let count = self.curves_count();
        if curve_index >= count {
            log::warn!(
                "refusing to split curve {}: path has {} curves",
                curve_index,
                count
            );
            return Err(PathError::CurveIndexOutOfRange {
                index: curve_index,
                count,
            });
        }
        if !(parameter_ratio > 0.0 && parameter_ratio < 1.0) {
            log::warn!(
                "refusing to split curve {} at ratio {}",
                curve_index,
                parameter_ratio
            );
            return Err(PathError::RatioOutOfRange(parameter_ratio));
        }
        let p = self
            .family
            .split_curve(&mut self.control_points, curve_index, parameter_ratio);
        log::debug!(
            "split curve {} at {}, inserted {:?}",
            curve_index,
            parameter_ratio,
            p
        );
        Ok(p)
    }

    fn check_key_index(&self, key_index: usize) -> Result<(), PathError> {
        let count = self.key_points_count();
        if key_index < count {
            Ok(())
        } else {
            Err(PathError::KeyPointIndexOutOfRange {
                index: key_index,
                count,
            })
        }
    }
}
