//! Seeded exact samplers for tests and benches.
//!
//! Model
//! - Coordinates are drawn on the rational grid `k / denom` with
//!   `|k / denom| <= extent`, so every sample is exact and reproducible.
//! - Determinism uses a replay token `(seed, index)` mixed into one `StdRng`;
//!   the same token always gives the same sample.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SolidError;
use crate::kernel::{int, orient3d, point_rat, rat, AffineTransform, Point3, Rat, Sign};
use crate::solid::Solid;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the next draw of the same stream.
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    pub fn rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Rational grid the samplers draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCfg {
    /// Largest absolute coordinate.
    pub extent: i64,
    /// Grid denominator (> 0).
    pub denom: i64,
}

impl Default for GridCfg {
    fn default() -> Self {
        Self {
            extent: 4,
            denom: 8,
        }
    }
}

impl GridCfg {
    fn coord<R: Rng>(&self, rng: &mut R) -> Rat {
        let denom = self.denom.max(1);
        let k = self.extent.abs() * denom;
        rat(rng.gen_range(-k..=k), denom)
    }

    fn point<R: Rng>(&self, rng: &mut R) -> Point3 {
        point_rat(self.coord(rng), self.coord(rng), self.coord(rng))
    }
}

pub fn random_point(cfg: GridCfg, tok: ReplayToken) -> Point3 {
    cfg.point(&mut tok.rng())
}

/// Axis-aligned box with both corners on the grid; a side that would come
/// out empty is widened by one grid step.
pub fn random_cuboid(cfg: GridCfg, tok: ReplayToken) -> Result<Solid, SolidError> {
    let mut rng = tok.rng();
    let (a, b) = (cfg.point(&mut rng), cfg.point(&mut rng));
    let step = rat(1, cfg.denom.max(1));
    let mut min = a.clone();
    let mut max = b.clone();
    for k in 0..3 {
        if a[k] > b[k] {
            std::mem::swap(&mut min[k], &mut max[k]);
        }
        if min[k] == max[k] {
            max[k] = &max[k] + &step;
        }
    }
    Solid::cuboid(&min, &max)
}

/// Rotation from a random non-zero integer quaternion with components in
/// `-8..=8`; the matrix is exactly orthogonal.
pub fn random_rotation(tok: ReplayToken) -> AffineTransform {
    let mut rng = tok.rng();
    loop {
        let q: [i64; 4] = [0; 4].map(|_| rng.gen_range(-8..=8));
        if q.iter().all(|&c| c == 0) {
            continue;
        }
        if let Some(t) = AffineTransform::rotation_from_quaternion(q.map(int)) {
            return t;
        }
    }
}

/// Tetrahedron on four grid points, redrawn until it has volume.
pub fn random_tetrahedron(cfg: GridCfg, tok: ReplayToken) -> Result<Solid, SolidError> {
    let mut rng = tok.rng();
    loop {
        let [a, b, c, d] = [(); 4].map(|_| cfg.point(&mut rng));
        if orient3d(&a, &b, &c, &d) != Sign::Zero {
            return Solid::tetrahedron(&a, &b, &c, &d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix3;
    use num_traits::Signed;

    #[test]
    fn same_token_same_sample() {
        let cfg = GridCfg::default();
        let tok = ReplayToken::new(7, 3);
        assert_eq!(random_point(cfg, tok), random_point(cfg, tok));
        assert_ne!(random_point(cfg, tok), random_point(cfg, tok.next()));
        assert_eq!(random_rotation(tok), random_rotation(tok));
    }

    #[test]
    fn points_stay_on_the_grid() {
        let cfg = GridCfg { extent: 2, denom: 4 };
        let bound = int(2);
        for i in 0..50 {
            let p = random_point(cfg, ReplayToken::new(1, i));
            for k in 0..3 {
                assert!(p[k].abs() <= bound);
                assert!((&p[k] * int(4)).is_integer());
            }
        }
    }

    #[test]
    fn cuboids_are_closed_boxes() {
        for i in 0..20 {
            let c = random_cuboid(GridCfg::default(), ReplayToken::new(42, i)).unwrap();
            assert_eq!(c.face_count(), 6);
            assert!(c.is_closed());
            assert!(c.volume().is_positive());
        }
    }

    #[test]
    fn rotations_are_orthogonal() {
        for i in 0..20 {
            let r = random_rotation(ReplayToken::new(5, i));
            assert_eq!(r.determinant(), int(1));
            let mtm = r.m.transpose() * &r.m;
            assert_eq!(mtm, Matrix3::identity());
        }
    }

    #[test]
    fn tetrahedra_have_volume() {
        for i in 0..20 {
            let t = random_tetrahedron(GridCfg::default(), ReplayToken::new(9, i)).unwrap();
            assert!(t.volume().is_positive());
            assert!(t.is_closed());
        }
    }
}
