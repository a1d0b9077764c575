//! Exact scalar, point and vector types.

use nalgebra::Vector3;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

/// Exact rational number (arbitrary precision).
pub type Rat = BigRational;
/// Exact point in R³.
pub type Point3 = Vector3<Rat>;
/// Exact vector in R³.
pub type Vec3 = Vector3<Rat>;

#[inline]
pub fn int(n: i64) -> Rat {
    Rat::from_integer(BigInt::from(n))
}

/// `n / d`. Panics if `d == 0`.
#[inline]
pub fn rat(n: i64, d: i64) -> Rat {
    Rat::new(BigInt::from(n), BigInt::from(d))
}

/// `n / d`, or `None` if `d == 0`. For denominators that come from input.
pub fn checked_rat(n: i64, d: i64) -> Option<Rat> {
    (d != 0).then(|| rat(n, d))
}

/// Integer point.
#[inline]
pub fn point(x: i64, y: i64, z: i64) -> Point3 {
    Vector3::new(int(x), int(y), int(z))
}

#[inline]
pub fn point_rat(x: Rat, y: Rat, z: Rat) -> Point3 {
    Vector3::new(x, y, z)
}

pub fn origin() -> Point3 {
    Vector3::new(Rat::zero(), Rat::zero(), Rat::zero())
}

/// Exact value of a double (every finite double is dyadic). `None` for NaN/inf.
pub fn from_f64(x: f64) -> Option<Rat> {
    Rat::from_float(x)
}

pub fn from_f32(x: f32) -> Option<Rat> {
    Rat::from_float(x)
}

/// Exact point from doubles.
pub fn point_from_f64(p: [f64; 3]) -> Option<Point3> {
    Some(Vector3::new(from_f64(p[0])?, from_f64(p[1])?, from_f64(p[2])?))
}

/// Nearest double (lossy). Values out of range become ±inf.
pub fn to_f64(x: &Rat) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

pub fn point_to_f64(p: &Point3) -> [f64; 3] {
    [to_f64(&p.x), to_f64(&p.y), to_f64(&p.z)]
}

pub fn point_to_f32(p: &Point3) -> [f32; 3] {
    [to_f64(&p.x) as f32, to_f64(&p.y) as f32, to_f64(&p.z) as f32]
}

/// `v · s` componentwise.
pub fn scale(v: &Vec3, s: &Rat) -> Vec3 {
    v.map(|x| x * s)
}

pub fn is_zero_vec(v: &Vec3) -> bool {
    v.x.is_zero() && v.y.is_zero() && v.z.is_zero()
}

/// Hashable key of a point (exact coordinates).
pub(crate) fn point_key(p: &Point3) -> (Rat, Rat, Rat) {
    (p.x.clone(), p.y.clone(), p.z.clone())
}
