//! Exact geometric predicates.
//!
//! All answers are exact; degenerate configurations answer `Sign::Zero` or
//! `false` and never fail.

use std::cmp::Ordering;
use std::ops::Neg;

use num_traits::{Signed, Zero};

use super::number::{Point3, Rat, Vec3};

/// Sign of an exact quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn of(x: &Rat) -> Sign {
        if x.is_positive() {
            Sign::Positive
        } else if x.is_negative() {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    pub fn from_ordering(o: Ordering) -> Sign {
        match o {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }

    #[inline]
    pub fn reverse(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }
}

impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        self.reverse()
    }
}

/// `(b - a) × (c - a)`.
pub fn normal(a: &Point3, b: &Point3, c: &Point3) -> Vec3 {
    (b - a).cross(&(c - a))
}

/// Orientation of the triple `(a, b, c)`: sign of the first non-zero
/// component of `(b - a) × (c - a)`. `Zero` iff the points are collinear.
/// Swapping `b` and `c` reverses the sign.
pub fn orientation(a: &Point3, b: &Point3, c: &Point3) -> Sign {
    let n = normal(a, b, c);
    for k in 0..3 {
        let s = Sign::of(&n[k]);
        if !s.is_zero() {
            return s;
        }
    }
    Sign::Zero
}

/// Orientation of `(a, b, c)` projected to the xy plane (positive = counterclockwise).
pub fn orientation_xy(a: &Point3, b: &Point3, c: &Point3) -> Sign {
    let d = (&b.x - &a.x) * (&c.y - &a.y) - (&b.y - &a.y) * (&c.x - &a.x);
    Sign::of(&d)
}

/// Side of `d` relative to the plane through `(a, b, c)`: `Positive` when `d`
/// lies on the side `(b - a) × (c - a)` points to.
pub fn orient3d(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> Sign {
    Sign::of(&normal(a, b, c).dot(&(d - a)))
}

pub fn collinear(a: &Point3, b: &Point3, c: &Point3) -> bool {
    orientation(a, b, c).is_zero()
}

pub fn coplanar(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> bool {
    orient3d(a, b, c, d).is_zero()
}

/// `p` lies in the open segment from `a` to `b`.
pub fn strictly_between(a: &Point3, b: &Point3, p: &Point3) -> bool {
    if !collinear(a, b, p) {
        return false;
    }
    let ab = b - a;
    (p - a).dot(&ab).is_positive() && (b - p).dot(&ab).is_positive()
}

/// `b` lies on the closed segment from `a` to `c` and the three are collinear.
pub fn are_ordered_along_line(a: &Point3, b: &Point3, c: &Point3) -> bool {
    if !collinear(a, b, c) {
        return false;
    }
    let ac = c - a;
    !(b - a).dot(&ac).is_negative() && !(c - b).dot(&ac).is_negative()
}

pub fn squared_distance(p: &Point3, q: &Point3) -> Rat {
    let d = p - q;
    d.dot(&d)
}

/// Compares `|p - q|` with `|p - r|`.
pub fn compare_squared_distance(p: &Point3, q: &Point3, r: &Point3) -> Ordering {
    squared_distance(p, q).cmp(&squared_distance(p, r))
}

/// Twice the vector area of a closed polygon, `Σ vᵢ × vᵢ₊₁` (Newell).
///
/// Points along the right-hand normal of the loop order; zero iff the
/// polygon has no area.
pub fn area_vector(pts: &[Point3]) -> Vec3 {
    let mut acc = Vec3::new(Rat::zero(), Rat::zero(), Rat::zero());
    for i in 0..pts.len() {
        let j = (i + 1) % pts.len();
        acc += pts[i].cross(&pts[j]);
    }
    acc
}

/// Every turn of the loop is non-negative about `n` (collinear runs allowed).
pub fn is_convex_about(pts: &[Point3], n: &Vec3) -> bool {
    let k = pts.len();
    (0..k).all(|i| {
        let a = &pts[i];
        let b = &pts[(i + 1) % k];
        let c = &pts[(i + 2) % k];
        !(b - a).cross(&(c - b)).dot(n).is_negative()
    })
}
