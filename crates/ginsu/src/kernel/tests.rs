use super::*;
use nalgebra::{Matrix3, Vector3};
use num_traits::{One, Zero};
use proptest::prelude::*;

fn small_point() -> impl Strategy<Value = Point3> {
    (-50i64..50, -50i64..50, -50i64..50).prop_map(|(x, y, z)| point(x, y, z))
}

fn small_rat() -> impl Strategy<Value = Rat> {
    (-40i64..40, 1i64..12).prop_map(|(n, d)| rat(n, d))
}

#[test]
fn orientation_of_collinear_points_is_zero() {
    let a = point(0, 0, 0);
    let b = point(1, 2, 3);
    let c = point(2, 4, 6);
    assert_eq!(orientation(&a, &b, &c), Sign::Zero);
    assert!(collinear(&a, &b, &c));
    let d = point(1, 0, 0);
    assert_ne!(orientation(&a, &b, &d), Sign::Zero);
}

#[test]
fn orientation_uses_first_nonzero_component() {
    // Normal (0, 0, 1): x and y components vanish, z decides.
    let a = point(0, 0, 0);
    let b = point(1, 0, 0);
    let c = point(0, 1, 0);
    assert_eq!(orientation(&a, &b, &c), Sign::Positive);
    assert_eq!(orientation(&a, &c, &b), Sign::Negative);
    assert_eq!(orientation_xy(&a, &b, &c), Sign::Positive);
}

#[test]
fn orient3d_and_coplanarity() {
    let a = point(0, 0, 0);
    let b = point(1, 0, 0);
    let c = point(0, 1, 0);
    assert_eq!(orient3d(&a, &b, &c, &point(0, 0, 1)), Sign::Positive);
    assert_eq!(orient3d(&a, &b, &c, &point(0, 0, -1)), Sign::Negative);
    assert!(coplanar(&a, &b, &c, &point(5, -7, 0)));
}

#[test]
fn exact_arithmetic_sees_tiny_offsets() {
    // A float predicate would call this collinear; the exact one does not.
    let a = point(0, 0, 0);
    let b = point(1, 1, 1);
    let eps = rat(1, 1_000_000_007);
    let c = point_rat(int(2), int(2), int(2) + eps);
    assert_ne!(orientation(&a, &b, &c), Sign::Zero);
}

#[test]
fn between_and_distance_helpers() {
    let a = point(0, 0, 0);
    let b = point(4, 0, 0);
    assert!(strictly_between(&a, &b, &point(1, 0, 0)));
    assert!(!strictly_between(&a, &b, &a));
    assert!(!strictly_between(&a, &b, &point(5, 0, 0)));
    assert!(!strictly_between(&a, &b, &point(1, 1, 0)));
    assert!(are_ordered_along_line(&a, &a, &b));
    assert_eq!(
        compare_squared_distance(&a, &point(1, 0, 0), &point(0, 2, 0)),
        std::cmp::Ordering::Less
    );
}

#[test]
fn plane_sides_and_flip() {
    let pl = Plane3::through(&point(0, 0, 1), &point(1, 0, 1), &point(0, 1, 1)).unwrap();
    assert_eq!(pl.side(&point(3, 3, 2)), Sign::Positive);
    assert_eq!(pl.side(&point(3, 3, 0)), Sign::Negative);
    assert!(pl.contains(&point(9, -9, 1)));
    let fl = pl.flipped();
    assert_eq!(fl.side(&point(3, 3, 2)), Sign::Negative);
    assert!(!pl.is_same_oriented(&fl));
    assert!(Plane3::through(&point(0, 0, 0), &point(1, 1, 1), &point(2, 2, 2)).is_none());

    let scaled = Plane3::new(Vector3::new(int(0), int(0), int(3)), int(3));
    assert!(pl.is_coincident(&scaled));
}

#[test]
fn polygon_plane_follows_loop_order() {
    let sq = [point(0, 0, 0), point(2, 0, 0), point(2, 2, 0), point(0, 2, 0)];
    let pl = Plane3::of_polygon(&sq).unwrap();
    assert_eq!(pl.side(&point(0, 0, 1)), Sign::Positive);
    assert_eq!(area_vector(&sq), Vector3::new(int(0), int(0), int(8)));
    assert!(is_convex_about(&sq, &pl.n));
    let dart = [point(0, 0, 0), point(4, 0, 0), point(1, 1, 0), point(0, 4, 0)];
    assert!(!is_convex_about(&dart, &Plane3::of_polygon(&dart).unwrap().n));
}

#[test]
fn aabb_touching_counts_as_intersecting() {
    let a = Aabb3::from_points([point(0, 0, 0), point(1, 1, 1)].iter()).unwrap();
    let b = Aabb3::from_points([point(1, 0, 0), point(2, 1, 1)].iter()).unwrap();
    let c = Aabb3::from_points([point(3, 0, 0), point(4, 1, 1)].iter()).unwrap();
    assert!(a.intersects(&b));
    assert!(a.is_disjoint(&c));
    assert_eq!(a.union(&c).max, point(4, 1, 1));
    assert!(a.contains_point(&point(1, 1, 1)));
}

#[test]
fn translation_round_trip_restores_point_exactly() {
    let v = Vector3::new(rat(1, 3), rat(-7, 5), int(11));
    let p = point_rat(rat(2, 9), int(0), rat(-1, 7));
    let there = AffineTransform::translation(v.clone());
    let back = AffineTransform::translation(v.map(|x| -x));
    assert_eq!(back.apply_point(&there.apply_point(&p)), p);
    assert!(back.compose(&there).is_identity());
}

#[test]
fn scaling_rejects_zero_denominator() {
    assert!(AffineTransform::scaling(int(2), int(0)).is_none());
    let s = AffineTransform::scaling(int(3), int(2)).unwrap();
    assert_eq!(s.apply_point(&point(2, 4, -2)), point(3, 6, -3));
}

#[test]
fn inverse_of_general_map() {
    let m = Matrix3::new(
        int(2), int(1), int(0),
        int(0), int(1), int(3),
        int(1), int(0), int(1),
    );
    let t = AffineTransform::general(m, Vector3::new(int(1), int(-2), rat(1, 2)));
    let inv = t.inverse().unwrap();
    assert!(t.compose(&inv).is_identity());
    assert!(inv.compose(&t).is_identity());
    let p = point(5, -3, 8);
    assert_eq!(inv.apply_point(&t.apply_point(&p)), p);

    let singular = AffineTransform::general(Matrix3::zeros(), Vector3::zeros());
    assert!(singular.inverse().is_none());
    assert_eq!(singular.orientation(), Sign::Zero);
}

#[test]
fn quaternion_rotation_is_exact_and_proper() {
    // 90° about z from the non-unit quaternion (0, 0, 1, 1).
    let r = AffineTransform::rotation_from_quaternion([int(0), int(0), int(1), int(1)]).unwrap();
    assert_eq!(r.apply_point(&point(1, 0, 0)), point(0, 1, 0));
    assert!(r.determinant().is_one());
    let rt = r.m.transpose();
    assert_eq!(&rt * &r.m, Matrix3::identity());
    assert!(AffineTransform::rotation_from_quaternion([int(0), int(0), int(0), int(0)]).is_none());
}

#[test]
fn from_rows_takes_floats_exactly() {
    let t = AffineTransform::from_rows([
        [0.5, 0.0, 0.0, 0.25],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 3.0],
    ])
    .unwrap();
    assert_eq!(t.apply_point(&point(2, 1, 1)), point_rat(rat(5, 4), int(1), int(2)));
    assert_eq!(t.orientation(), Sign::Negative);
    assert!(AffineTransform::from_rows([[f32::NAN; 4]; 3]).is_none());
}

#[test]
fn zero_denominator_is_refused() {
    assert_eq!(checked_rat(6, -4), Some(rat(-3, 2)));
    assert_eq!(checked_rat(1, 0), None);
    assert_eq!(checked_rat(0, 5), Some(Rat::zero()));
}

#[test]
fn float_conversions() {
    assert_eq!(from_f64(0.375), Some(rat(3, 8)));
    assert!(from_f64(f64::INFINITY).is_none());
    assert_eq!(to_f64(&rat(1, 4)), 0.25);
    assert_eq!(point_to_f32(&point(1, -2, 3)), [1.0, -2.0, 3.0]);
    assert!(Rat::zero().is_zero());
}

proptest! {
    #[test]
    fn orientation_is_antisymmetric(a in small_point(), b in small_point(), c in small_point()) {
        prop_assert_eq!(orientation(&a, &b, &c), -orientation(&a, &c, &b));
        prop_assert_eq!(orient3d(&a, &b, &c, &point(1, 2, 3)), -orient3d(&a, &c, &b, &point(1, 2, 3)));
    }

    #[test]
    fn scaling_composes_multiplicatively(
        s1 in small_rat(), w1 in small_rat(), s2 in small_rat(), w2 in small_rat(),
        p in small_point(),
    ) {
        prop_assume!(!w1.is_zero() && !w2.is_zero());
        let a = AffineTransform::scaling(s1.clone(), w1.clone()).unwrap();
        let b = AffineTransform::scaling(s2.clone(), w2.clone()).unwrap();
        let ab = AffineTransform::scaling(&s1 * &s2, &w1 * &w2).unwrap();
        prop_assert_eq!(a.compose(&b).apply_point(&p), ab.apply_point(&p));
    }

    #[test]
    fn identity_is_two_sided_unit(tx in small_rat(), ty in small_rat(), tz in small_rat()) {
        let t = AffineTransform::translation(Vector3::new(tx, ty, tz));
        let id = AffineTransform::identity();
        prop_assert_eq!(id.compose(&t), t.clone());
        prop_assert_eq!(t.compose(&id), t);
    }

    #[test]
    fn composition_is_associative(
        q in (-3i64..4, -3i64..4, -3i64..4, 1i64..4),
        s in small_rat(),
        v in small_point(),
    ) {
        let r = AffineTransform::rotation_from_quaternion([int(q.0), int(q.1), int(q.2), int(q.3)]).unwrap();
        prop_assume!(!s.is_zero());
        let sc = AffineTransform::scaling(s, int(1)).unwrap();
        let tr = AffineTransform::translation(v);
        prop_assert_eq!(r.compose(&sc).compose(&tr), r.compose(&sc.compose(&tr)));
    }
}
