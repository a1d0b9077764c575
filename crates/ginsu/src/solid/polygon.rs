//! Convex polygons in exact planes, and their splitting.

use num_traits::Signed;

use crate::kernel::{collinear, scale, Plane3, Point3, Sign};

/// Which input face a fragment came from, and whether it has been flipped
/// an odd number of times since.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Tag {
    pub source: usize,
    pub flipped: bool,
}

/// Convex polygon with its supporting plane, oriented by point order.
#[derive(Clone, Debug)]
pub(crate) struct Polygon {
    pub points: Vec<Point3>,
    pub plane: Plane3,
    pub tag: Tag,
}

/// Output buckets of one split.
#[derive(Default)]
pub(crate) struct Parts {
    pub coplanar_front: Vec<Polygon>,
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

fn class_of(s: Sign) -> u8 {
    match s {
        Sign::Zero => COPLANAR,
        Sign::Positive => FRONT,
        Sign::Negative => BACK,
    }
}

impl Polygon {
    /// `None` when the points have no area.
    pub fn new(points: Vec<Point3>, source: usize) -> Option<Self> {
        let plane = Plane3::of_polygon(&points)?;
        Some(Self {
            points,
            plane,
            tag: Tag {
                source,
                flipped: false,
            },
        })
    }

    pub fn flip(&mut self) {
        self.points.reverse();
        self.plane.flip();
        self.tag.flipped = !self.tag.flipped;
    }

    /// Sorts `self` into `parts` relative to `plane`, cutting it in two when
    /// it has points strictly on both sides. Cut points are exact, so both
    /// pieces keep the parent plane.
    ///
    /// A polygon lying in `plane` goes to `coplanar_front` when it faces the
    /// same way and to `coplanar_back` otherwise.
    pub fn split_by(self, plane: &Plane3, parts: &mut Parts) {
        let classes: Vec<u8> = self
            .points
            .iter()
            .map(|p| class_of(plane.side(p)))
            .collect();
        let kind = classes.iter().fold(COPLANAR, |acc, &c| acc | c);
        match kind {
            COPLANAR => {
                if plane.n.dot(&self.plane.n).is_positive() {
                    parts.coplanar_front.push(self);
                } else {
                    parts.coplanar_back.push(self);
                }
            }
            FRONT => parts.front.push(self),
            BACK => parts.back.push(self),
            _ => {
                let n = self.points.len();
                let mut f = Vec::with_capacity(n + 1);
                let mut b = Vec::with_capacity(n + 1);
                for i in 0..n {
                    let j = (i + 1) % n;
                    let (ti, tj) = (classes[i], classes[j]);
                    let (vi, vj) = (&self.points[i], &self.points[j]);
                    if ti != BACK {
                        f.push(vi.clone());
                    }
                    if ti != FRONT {
                        b.push(vi.clone());
                    }
                    if ti | tj == SPANNING {
                        let d = vj - vi;
                        let t = (&plane.c - plane.n.dot(vi)) / plane.n.dot(&d);
                        let v = vi + scale(&d, &t);
                        f.push(v.clone());
                        b.push(v);
                    }
                }
                if f.len() >= 3 {
                    parts.front.push(Polygon {
                        points: f,
                        plane: self.plane.clone(),
                        tag: self.tag,
                    });
                }
                if b.len() >= 3 {
                    parts.back.push(Polygon {
                        points: b,
                        plane: self.plane,
                        tag: self.tag,
                    });
                }
            }
        }
    }

    /// Drops vertices whose neighbours are collinear with them.
    pub fn remove_collinear(&mut self) {
        loop {
            let n = self.points.len();
            if n <= 3 {
                return;
            }
            let found = (0..n).find(|&i| {
                collinear(
                    &self.points[(i + n - 1) % n],
                    &self.points[i],
                    &self.points[(i + 1) % n],
                )
            });
            match found {
                Some(i) => {
                    self.points.remove(i);
                }
                None => return,
            }
        }
    }
}

/// Joins two polygons that share the edge `u -> v` (in `a`) / `v -> u` (in
/// `b`). `None` if they share no such edge or the join repeats a point.
pub(crate) fn join_along_shared_edge(a: &[Point3], b: &[Point3]) -> Option<Vec<Point3>> {
    let (na, nb) = (a.len(), b.len());
    for i in 0..na {
        let (u, v) = (&a[i], &a[(i + 1) % na]);
        let Some(j) = (0..nb).find(|&j| &b[j] == v && &b[(j + 1) % nb] == u) else {
            continue;
        };
        // a from v around to u, then b strictly between u and v.
        let mut out: Vec<Point3> = (0..na).map(|k| a[(i + 1 + k) % na].clone()).collect();
        out.extend((2..nb).map(|k| b[(j + k) % nb].clone()));
        let unique = out
            .iter()
            .enumerate()
            .all(|(k, p)| !out[k + 1..].contains(p));
        return unique.then_some(out);
    }
    None
}
