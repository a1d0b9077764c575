//! Primitive solids with exact coordinates.

use num_traits::{Signed, Zero};

use super::Solid;
use crate::cfg::CIRCLE_PARAM_DENOM;
use crate::error::SolidError;
use crate::kernel::{int, orient3d, point, point_rat, rat, Point3, Rat, Sign};

/// Largest accepted segment count for `truncated_cone`; beyond it the
/// snapped circle parameters start to collide.
pub const MAX_CONE_SEGMENTS: usize = 4096;

impl Solid {
    /// Axis-aligned box `[min, max]`. Every coordinate of `min` must be
    /// strictly below the one of `max`.
    pub fn cuboid(min: &Point3, max: &Point3) -> Result<Solid, SolidError> {
        if (0..3).any(|k| min[k] >= max[k]) {
            return Err(SolidError::InvalidParameter(
                "cuboid needs min < max in every coordinate".into(),
            ));
        }
        let corner = |i: usize, j: usize, k: usize| {
            point_rat(
                [&min.x, &max.x][i].clone(),
                [&min.y, &max.y][j].clone(),
                [&min.z, &max.z][k].clone(),
            )
        };
        let faces = [
            [(0, 0, 0), (0, 0, 1), (0, 1, 1), (0, 1, 0)],
            [(1, 0, 0), (1, 1, 0), (1, 1, 1), (1, 0, 1)],
            [(0, 0, 0), (1, 0, 0), (1, 0, 1), (0, 0, 1)],
            [(0, 1, 0), (0, 1, 1), (1, 1, 1), (1, 1, 0)],
            [(0, 0, 0), (0, 1, 0), (1, 1, 0), (1, 0, 0)],
            [(0, 0, 1), (1, 0, 1), (1, 1, 1), (0, 1, 1)],
        ];
        let polys: Vec<Vec<Point3>> = faces
            .iter()
            .map(|f| f.iter().map(|&(i, j, k)| corner(i, j, k)).collect())
            .collect();
        Solid::from_polygons(&polys)
    }

    /// `[0, 1]³`.
    pub fn unit_cube() -> Result<Solid, SolidError> {
        Solid::cuboid(&point(0, 0, 0), &point(1, 1, 1))
    }

    /// Tetrahedron on four points in any order; faces are oriented outward.
    pub fn tetrahedron(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> Result<Solid, SolidError> {
        let (b, c) = match orient3d(a, b, c, d) {
            Sign::Zero => return Err(SolidError::Degenerate { index: 0 }),
            Sign::Positive => (c, b),
            Sign::Negative => (b, c),
        };
        let polys = vec![
            vec![a.clone(), b.clone(), c.clone()],
            vec![a.clone(), d.clone(), b.clone()],
            vec![b.clone(), d.clone(), c.clone()],
            vec![a.clone(), c.clone(), d.clone()],
        ];
        Solid::from_polygons(&polys)
    }

    /// Cone frustum around the y axis, bottom cap at `y = 0` with radius
    /// `bottom_r`, top cap at `y = 1` with radius `top_r`. A zero radius
    /// collapses that cap to an apex. Rim points lie exactly on their
    /// circles; their angles are within `2^-16` (in `tan(θ/2)`) of the
    /// regular ones.
    pub fn truncated_cone(top_r: &Rat, bottom_r: &Rat, segments: usize) -> Result<Solid, SolidError> {
        if !(3..=MAX_CONE_SEGMENTS).contains(&segments) {
            return Err(SolidError::InvalidParameter(format!(
                "segments must be in 3..={MAX_CONE_SEGMENTS}, got {segments}"
            )));
        }
        let (rt, rb) = (top_r.abs(), bottom_r.abs());
        if rt.is_zero() && rb.is_zero() {
            return Err(SolidError::InvalidParameter(
                "at least one cone radius must be non-zero".into(),
            ));
        }
        let rim = unit_circle(segments);
        let ring = |r: &Rat, y: i64| -> Vec<Point3> {
            rim.iter()
                .map(|(x, z)| point_rat(r * x, int(y), r * z))
                .collect()
        };
        let (bottom, top) = (ring(&rb, 0), ring(&rt, 1));
        let n = segments;
        let mut polys: Vec<Vec<Point3>> = Vec::with_capacity(n + 2);
        for i in 0..n {
            let j = (i + 1) % n;
            let side = if rt.is_zero() {
                vec![bottom[i].clone(), point(0, 1, 0), bottom[j].clone()]
            } else if rb.is_zero() {
                vec![point(0, 0, 0), top[i].clone(), top[j].clone()]
            } else {
                vec![
                    bottom[i].clone(),
                    top[i].clone(),
                    top[j].clone(),
                    bottom[j].clone(),
                ]
            };
            polys.push(side);
        }
        if !rb.is_zero() {
            polys.push(bottom);
        }
        if !rt.is_zero() {
            polys.push(top.into_iter().rev().collect());
        }
        tracing::debug!(segments, faces = polys.len(), "truncated_cone");
        Solid::from_polygons(&polys)
    }
}

/// `n` exact points `(x, z)` on the unit circle in counterclockwise order
/// starting at `(1, 0)`, via the rational parametrization
/// `((1 - t²) / (1 + t²), 2t / (1 + t²))` with `t ≈ tan(θ / 2)`.
fn unit_circle(n: usize) -> Vec<(Rat, Rat)> {
    (0..n)
        .map(|i| {
            if 2 * i == n {
                return (int(-1), int(0));
            }
            let theta = std::f64::consts::TAU * i as f64 / n as f64;
            let snapped = ((theta / 2.0).tan() * CIRCLE_PARAM_DENOM as f64).round() as i64;
            let t = rat(snapped, CIRCLE_PARAM_DENOM);
            let t2 = &t * &t;
            let d = int(1) + &t2;
            ((int(1) - &t2) / &d, (int(2) * &t) / &d)
        })
        .collect()
}
