//! Exact planes and axis-aligned boxes.

use num_traits::{Signed, Zero};

use super::number::{is_zero_vec, Point3, Rat, Vec3};
use super::predicates::{area_vector, normal, Sign};

/// Oriented plane `n · x = c`. `n` is not normalized; the positive side
/// (`n · x > c`) is "in front".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane3 {
    pub n: Vec3,
    pub c: Rat,
}

impl Plane3 {
    #[inline]
    pub fn new(n: Vec3, c: Rat) -> Self {
        Self { n, c }
    }

    /// Plane through three points with normal `(b - a) × (c - a)`; `None` when collinear.
    pub fn through(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        let n = normal(a, b, c);
        if is_zero_vec(&n) {
            return None;
        }
        let c = n.dot(a);
        Some(Self { n, c })
    }

    /// Supporting plane of a polygon, oriented by its loop order; `None` when
    /// the polygon has zero area.
    pub fn of_polygon(pts: &[Point3]) -> Option<Self> {
        let n = area_vector(pts);
        if is_zero_vec(&n) || pts.is_empty() {
            return None;
        }
        let c = n.dot(&pts[0]);
        Some(Self { n, c })
    }

    /// Signed offset `n · p - c` (scaled by `|n|`).
    #[inline]
    pub fn eval(&self, p: &Point3) -> Rat {
        self.n.dot(p) - &self.c
    }

    #[inline]
    pub fn side(&self, p: &Point3) -> Sign {
        Sign::of(&self.eval(p))
    }

    #[inline]
    pub fn contains(&self, p: &Point3) -> bool {
        self.eval(p).is_zero()
    }

    pub fn flip(&mut self) {
        self.n = self.n.map(|x| -x);
        self.c = -self.c.clone();
    }

    pub fn flipped(&self) -> Self {
        let mut p = self.clone();
        p.flip();
        p
    }

    /// Normals are parallel and point the same way.
    pub fn is_same_oriented(&self, other: &Plane3) -> bool {
        is_zero_vec(&self.n.cross(&other.n)) && self.n.dot(&other.n).is_positive()
    }

    /// Same point set and same orientation.
    pub fn is_coincident(&self, other: &Plane3) -> bool {
        if !self.is_same_oriented(other) {
            return false;
        }
        // n2 = k n1 with k > 0, so the planes agree iff c2 · (n1·n1) = c1 · (n1·n2).
        let n11 = self.n.dot(&self.n);
        let n12 = self.n.dot(&other.n);
        &other.c * n11 == &self.c * n12
    }
}

/// Closed exact axis-aligned box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn from_points<'a, I>(pts: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut it = pts.into_iter();
        let first = it.next()?;
        let mut bb = Aabb3 {
            min: first.clone(),
            max: first.clone(),
        };
        for p in it {
            bb.include(p);
        }
        Some(bb)
    }

    pub fn include(&mut self, p: &Point3) {
        for k in 0..3 {
            if p[k] < self.min[k] {
                self.min[k] = p[k].clone();
            }
            if p[k] > self.max[k] {
                self.max[k] = p[k].clone();
            }
        }
    }

    pub fn union(&self, other: &Aabb3) -> Aabb3 {
        let mut bb = self.clone();
        bb.include(&other.min);
        bb.include(&other.max);
        bb
    }

    /// Closed boxes: sharing a face, edge or corner counts as intersecting.
    pub fn intersects(&self, other: &Aabb3) -> bool {
        (0..3).all(|k| self.min[k] <= other.max[k] && other.min[k] <= self.max[k])
    }

    #[inline]
    pub fn is_disjoint(&self, other: &Aabb3) -> bool {
        !self.intersects(other)
    }

    pub fn contains_point(&self, p: &Point3) -> bool {
        (0..3).all(|k| self.min[k] <= p[k] && p[k] <= self.max[k])
    }
}
