//! Load a Bézier path from JSON, repair it if needed, and report its
//! length.
//!
//! The file holds a serialized `BezierPath`, for example:
//!
//! {"family":null,"control_points":[{"x":0.0,"y":0.0},{"x":1.0,"y":1.0},{"x":2.0,"y":1.0},{"x":3.0,"y":0.0}]}

use spline_path::BezierPath;

fn main() {
    env_logger::init();
    let path = std::env::args().nth(1).expect("needs filename");
    let data = std::fs::read_to_string(path).unwrap();
    let mut path: BezierPath = serde_json::from_str(&data).unwrap();
    if path.sanitize() {
        eprintln!("invalid control point count, using the default path");
    }
    path.subtract_start_offset();
    println!("curves: {}", path.curves_count());
    println!("key points: {}", path.key_points_count());
    println!("length: {:.4}", path.evaluate_length(64));
    println!("{}", serde_json::to_string_pretty(&path).unwrap());
}
