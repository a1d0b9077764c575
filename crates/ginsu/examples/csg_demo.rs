//! Small CSG walk-through printing counts and exact volumes.
//!
//! Usage:
//!   cargo run -p ginsu --example csg_demo
//!   cargo run -p ginsu --example csg_demo -- 7
//!
//! The optional argument seeds the random rotation of the second cube.

use ginsu::api::*;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025u64);
    if let Err(e) = run(seed) {
        eprintln!("csg_demo: {e}");
        std::process::exit(1);
    }
}

fn run(seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let a = Solid::cuboid(&point(-1, -1, -1), &point(1, 1, 1))?;
    let rot = random_rotation(ReplayToken::new(seed, 0));
    let shift = AffineTransform::translation(Vec3::new(rat(1, 2), rat(1, 3), rat(1, 4)));
    let b = a.transformed(&shift.compose(&rot))?;
    show("a", &a);
    show("b", &b);
    for op in [BooleanOp::Union, BooleanOp::Intersection, BooleanOp::Difference] {
        show(&op.to_string(), &a.boolean(&b, op)?);
    }

    let cyl = Solid::truncated_cone(&rat(1, 2), &rat(1, 2), 12)?;
    let drilled = a.difference(&cyl)?;
    show("cube minus cylinder", &drilled);
    for p in [point(0, 0, 0), point(1, 0, 0), point_rat(rat(3, 4), int(0), int(0))] {
        println!("  {:?} -> {:?}", point_to_f64(&p), drilled.classify_point(&p));
    }
    Ok(())
}

fn show(name: &str, s: &Solid) {
    println!(
        "{name:>22}: faces={:<3} vertices={:<3} shells={} closed={} volume={:.6}",
        s.face_count(),
        s.vertex_count(),
        s.shell_count(),
        s.is_closed(),
        to_f64(&s.volume()),
    );
}
