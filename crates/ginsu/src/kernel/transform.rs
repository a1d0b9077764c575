//! Exact affine transforms `x ↦ M x + t`.
//!
//! Composition is exact, so `compose` is associative on the nose and
//! `t.compose(&t.inverse()?)` is the identity.

use nalgebra::{Matrix3, Vector3};
use num_traits::{One, Zero};

use super::number::{from_f32, Point3, Rat, Vec3};
use super::predicates::Sign;

/// Exact 3D affine map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineTransform {
    pub m: Matrix3<Rat>,
    pub t: Vec3,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
            t: Vector3::zeros(),
        }
    }

    pub fn translation(v: Vec3) -> Self {
        Self {
            m: Matrix3::identity(),
            t: v,
        }
    }

    /// Uniform scaling by `s / w`; `None` when `w == 0`.
    pub fn scaling(s: Rat, w: Rat) -> Option<Self> {
        if w.is_zero() {
            return None;
        }
        let f = s / w;
        Some(Self {
            m: Matrix3::from_fn(|r, c| if r == c { f.clone() } else { Rat::zero() }),
            t: Vector3::zeros(),
        })
    }

    pub fn general(m: Matrix3<Rat>, t: Vec3) -> Self {
        Self { m, t }
    }

    /// Exact transform from a row-major 3×4 float block `[M | t]`.
    /// `None` if any entry is NaN or infinite.
    pub fn from_rows(rows: [[f32; 4]; 3]) -> Option<Self> {
        let mut m = Matrix3::zeros();
        let mut t = Vector3::zeros();
        for (r, row) in rows.iter().enumerate() {
            for c in 0..3 {
                m[(r, c)] = from_f32(row[c])?;
            }
            t[r] = from_f32(row[3])?;
        }
        Some(Self { m, t })
    }

    /// Rotation encoded by the quaternion `q = [x, y, z, w]`, which need not
    /// be unit: the matrix is divided by `|q|²`, so it is an exact rotation
    /// for every non-zero rational quaternion. `None` for the zero quaternion.
    pub fn rotation_from_quaternion(q: [Rat; 4]) -> Option<Self> {
        let [x, y, z, w] = q;
        let (xx, yy, zz, ww) = (&x * &x, &y * &y, &z * &z, &w * &w);
        let n = &xx + &yy + &zz + &ww;
        if n.is_zero() {
            return None;
        }
        let two = Rat::one() + Rat::one();
        let (xy, xz, yz) = (&x * &y, &x * &z, &y * &z);
        let (wx, wy, wz) = (&w * &x, &w * &y, &w * &z);
        let m = Matrix3::new(
            &ww + &xx - &yy - &zz,
            &two * (&xy - &wz),
            &two * (&xz + &wy),
            &two * (&xy + &wz),
            &ww - &xx + &yy - &zz,
            &two * (&yz - &wx),
            &two * (&xz - &wy),
            &two * (&yz + &wx),
            &ww - &xx - &yy + &zz,
        );
        Some(Self {
            m: m.map(|e| e / &n),
            t: Vector3::zeros(),
        })
    }

    /// Float convenience for [`Self::rotation_from_quaternion`]; the floats
    /// are taken exactly.
    pub fn rotation_from_quaternion_f32(q: [f32; 4]) -> Option<Self> {
        Self::rotation_from_quaternion([
            from_f32(q[0])?,
            from_f32(q[1])?,
            from_f32(q[2])?,
            from_f32(q[3])?,
        ])
    }

    /// `self ∘ other`: applies `other` first.
    pub fn compose(&self, other: &AffineTransform) -> AffineTransform {
        Self {
            m: &self.m * &other.m,
            t: &self.m * &other.t + &self.t,
        }
    }

    pub fn determinant(&self) -> Rat {
        let m = &self.m;
        &m[(0, 0)] * (&m[(1, 1)] * &m[(2, 2)] - &m[(1, 2)] * &m[(2, 1)])
            - &m[(0, 1)] * (&m[(1, 0)] * &m[(2, 2)] - &m[(1, 2)] * &m[(2, 0)])
            + &m[(0, 2)] * (&m[(1, 0)] * &m[(2, 1)] - &m[(1, 1)] * &m[(2, 0)])
    }

    /// Sign of the determinant: `Negative` for orientation-reversing maps.
    pub fn orientation(&self) -> Sign {
        Sign::of(&self.determinant())
    }

    /// `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<AffineTransform> {
        let det = self.determinant();
        if det.is_zero() {
            return None;
        }
        let m = &self.m;
        let cof = |r0: usize, r1: usize, c0: usize, c1: usize| {
            &m[(r0, c0)] * &m[(r1, c1)] - &m[(r0, c1)] * &m[(r1, c0)]
        };
        // Adjugate (transposed cofactors) divided by the determinant.
        let adj = Matrix3::new(
            cof(1, 2, 1, 2),
            -cof(0, 2, 1, 2),
            cof(0, 1, 1, 2),
            -cof(1, 2, 0, 2),
            cof(0, 2, 0, 2),
            -cof(0, 1, 0, 2),
            cof(1, 2, 0, 1),
            -cof(0, 2, 0, 1),
            cof(0, 1, 0, 1),
        );
        let inv = adj.map(|e| e / &det);
        let t = (&inv * &self.t).map(|x| -x);
        Some(Self { m: inv, t })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn apply_point(&self, p: &Point3) -> Point3 {
        &self.m * p + &self.t
    }

    pub fn apply_vector(&self, v: &Vec3) -> Vec3 {
        &self.m * v
    }
}
