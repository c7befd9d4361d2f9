//! Editable 2D spline paths.
//!
//! A [`Path`] is an ordered list of control points read as a chain of
//! curves by a [`CurveFamily`]. Two families are provided:
//!
//! - [`CatmullRom`], which passes through every control point, with a
//!   tunable knot exponent (centripetal by default);
//! - [`CubicBezier`], with explicit tangent handles between anchors.
//!
//! Paths are plain data. Nothing is cached, so position and length queries
//! always reflect the current points. Topology edits (appending,
//! prepending, removing and splitting) keep each family's invariants, and
//! refused edits leave the path untouched.
//!
//! Lengths are estimated by sampling, see the [`length`] module.
//!
//! ```
//! use kurbo::Point;
//! use spline_path::CatmullRomPath;
//!
//! let mut path = CatmullRomPath::default();
//! path.add_key_point(Point::new(4.0, 1.0));
//! let lengths = path.evaluate_cumulated_lengths(32);
//! let halfway = path.interpolate_by_length(&lengths, 0.5 * lengths.total_length());
//! assert!(halfway.x > 1.0 && halfway.x < 3.0);
//! ```

mod bezier;
mod catmull_rom;
mod error;
mod family;
pub mod length;
mod path;
mod util;

pub use bezier::CubicBezier;
pub use catmull_rom::CatmullRom;
pub use error::PathError;
pub use family::{Curve, CurveFamily, CURVE_POINTS};
pub use length::{CumulatedLengthInfo, CumulatedLengths, SegmentsCount};
pub use path::{BezierPath, CatmullRomPath, Path};
