//! Build a Catmull-Rom path through random points and walk it at constant
//! speed.
//!
//! Outputs an SVG with the sampled curve, the key points, and dots placed at
//! equal distances along the path.

use rand::distributions::{Distribution, Uniform};

use kurbo::Point;

use spline_path::{CatmullRom, CatmullRomPath, SegmentsCount};

fn main() {
    env_logger::init();
    let mut rng = rand::thread_rng();
    const N: usize = 10;
    let coord = Uniform::from(0.0..500.0);
    let mut path = CatmullRomPath::new(CatmullRom::CENTRIPETAL);
    for i in 0..N {
        let x = 50.0 * i as f64;
        let p = Point::new(x, coord.sample(&mut rng));
        if i < 4 {
            path.set_key_point(i, p).unwrap();
        } else {
            path.add_key_point(p);
        }
    }

    let segments = SegmentsCount::PerLength {
        target_length: 5.0,
        max: 256,
    };
    let lengths = path.evaluate_cumulated_lengths(segments);
    eprintln!("length: {}", lengths.total_length());

    let d: Vec<String> = lengths
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let p = path.interpolate_by_parameter(e.parameter);
            format!("{}{},{}", if i == 0 { "M" } else { " L" }, p.x, p.y)
        })
        .collect();
    println!(
        r##"<!DOCTYPE html>
<html>
    <body>
    <svg height="500" width="500">
      <path d="{}" fill="none" stroke="#000" />"##,
        d.concat()
    );
    for pt in path.key_points() {
        println!(
            r#"      <circle cx="{}" cy="{}" r="3" fill="blue" />"#,
            pt.x, pt.y
        );
    }
    const STEPS: usize = 20;
    for i in 0..=STEPS {
        let distance = lengths.total_length() * i as f64 / STEPS as f64;
        let pt = path.interpolate_by_length(&lengths, distance);
        println!(
            r#"      <circle cx="{}" cy="{}" r="2" fill="red" />"#,
            pt.x, pt.y
        );
    }
    println!(
        r#"    </svg>
    </body>
</html>"#
    );
}
