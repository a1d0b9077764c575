//! Exact point containment by ray parity.
//!
//! Algorithm
//! - A point on some face (in its plane and inside its closed polygon) is
//!   `Boundary`.
//! - Otherwise cast rays along `(1, k, k²)` for `k = 0, 1, 2, ...` and count
//!   face crossings. A ray that grazes an edge or vertex, or runs inside a
//!   face plane, is thrown away. Each such event rules out at most two `k`
//!   (a plane through the origin meets the moment curve at most twice), so
//!   a clean ray is found after finitely many tries.

use num_traits::{Signed, Zero};

use super::Solid;
use crate::kernel::{int, scale, Plane3, Point3, Sign, Vec3};

/// Where a point lies relative to a solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    Inside,
    Boundary,
    Outside,
}

/// Face polygon with its plane, prepared once per query.
struct FaceGeom {
    points: Vec<Point3>,
    plane: Plane3,
}

enum Crossing {
    Miss,
    Hit,
    Degenerate,
}

/// Sign of the turn from edge `a -> b` to `q`, about `n`.
fn edge_side(a: &Point3, b: &Point3, q: &Point3, n: &Vec3) -> Sign {
    Sign::of(&(b - a).cross(&(q - a)).dot(n))
}

impl FaceGeom {
    /// `q` (in the plane) against the convex polygon: `Positive` strictly
    /// inside, `Zero` on its border, `Negative` outside.
    fn locate(&self, q: &Point3) -> Sign {
        let n = self.points.len();
        let mut on_border = false;
        for i in 0..n {
            match edge_side(&self.points[i], &self.points[(i + 1) % n], q, &self.plane.n) {
                Sign::Negative => return Sign::Negative,
                Sign::Zero => on_border = true,
                Sign::Positive => {}
            }
        }
        if on_border {
            Sign::Zero
        } else {
            Sign::Positive
        }
    }

    fn contains(&self, p: &Point3) -> bool {
        self.plane.contains(p) && self.locate(p) != Sign::Negative
    }

    fn crossing(&self, p: &Point3, d: &Vec3) -> Crossing {
        let denom = self.plane.n.dot(d);
        let offset = -self.plane.eval(p);
        if denom.is_zero() {
            return if offset.is_zero() {
                Crossing::Degenerate
            } else {
                Crossing::Miss
            };
        }
        let t = offset / denom;
        if !t.is_positive() {
            return Crossing::Miss;
        }
        let q = p + scale(d, &t);
        match self.locate(&q) {
            Sign::Positive => Crossing::Hit,
            Sign::Zero => Crossing::Degenerate,
            Sign::Negative => Crossing::Miss,
        }
    }
}

impl Solid {
    /// Exact containment test. Degenerate (wire / isolated) parts of the
    /// mesh are ignored.
    pub fn classify_point(&self, p: &Point3) -> Containment {
        let faces: Vec<FaceGeom> = self
            .mesh
            .solid_face_ids()
            .filter_map(|f| {
                let points = self.mesh.face_points(f);
                let plane = Plane3::of_polygon(&points)?;
                Some(FaceGeom { points, plane })
            })
            .collect();
        if faces.iter().any(|f| f.contains(p)) {
            return Containment::Boundary;
        }
        if !self.bounding_box().is_some_and(|bb| bb.contains_point(p)) {
            return Containment::Outside;
        }
        let tries: i64 = 2 * faces.iter().map(|f| f.points.len() + 1).sum::<usize>() as i64 + 1;
        for k in 0..=tries {
            let d = Vec3::new(int(1), int(k), int(k * k));
            let mut hits = 0usize;
            let mut clean = true;
            for f in &faces {
                match f.crossing(p, &d) {
                    Crossing::Hit => hits += 1,
                    Crossing::Miss => {}
                    Crossing::Degenerate => {
                        clean = false;
                        break;
                    }
                }
            }
            if clean {
                tracing::trace!(k, hits, "classify_point ray");
                return if hits % 2 == 1 {
                    Containment::Inside
                } else {
                    Containment::Outside
                };
            }
        }
        // Unreachable for a finite face set; treat as outside.
        tracing::error!("classify_point found no clean ray");
        Containment::Outside
    }
}
