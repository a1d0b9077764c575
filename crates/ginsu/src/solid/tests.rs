use super::*;
use crate::cfg::BooleanCfg;
use crate::error::{BooleanError, Operand};
use crate::kernel::{int, point, point_rat, Vec3};

fn half(x: i64) -> Rat {
    rat(x, 2)
}

fn p_half(x: i64, y: i64, z: i64) -> Point3 {
    point_rat(half(x), half(y), half(z))
}

fn cube(min: i64, max: i64) -> Solid {
    Solid::cuboid(&point(min, min, min), &point(max, max, max)).unwrap()
}

fn shifted(s: &Solid, x: i64, y: i64, z: i64) -> Solid {
    s.transformed(&AffineTransform::translation(point(x, y, z))).unwrap()
}

#[test]
fn unit_cube_counts_and_volume() {
    let c = Solid::unit_cube().unwrap();
    assert_eq!(c.face_count(), 6);
    assert_eq!(c.vertex_count(), 8);
    assert_eq!(c.edge_count(), 12);
    assert_eq!(c.shell_count(), 1);
    assert!(c.is_closed());
    c.validate().unwrap();
    assert_eq!(c.volume(), int(1));
    let bb = c.bounding_box().unwrap();
    assert_eq!((bb.min, bb.max), (point(0, 0, 0), point(1, 1, 1)));
}

#[test]
fn cube_faces_point_outward() {
    let c = cube(0, 2);
    let centre = point(1, 1, 1);
    for plane in c.face_planes() {
        assert_eq!(plane.side(&centre), Sign::Negative);
    }
}

#[test]
fn cuboid_rejects_flat_boxes() {
    let err = Solid::cuboid(&point(0, 0, 0), &point(1, 0, 1)).unwrap_err();
    assert!(matches!(err, SolidError::InvalidParameter(_)));
}

#[test]
fn tetrahedron_orients_itself() {
    let (a, b, c, d) = (point(0, 0, 0), point(1, 0, 0), point(0, 1, 0), point(0, 0, 1));
    let t1 = Solid::tetrahedron(&a, &b, &c, &d).unwrap();
    let t2 = Solid::tetrahedron(&a, &c, &b, &d).unwrap();
    for t in [&t1, &t2] {
        assert_eq!(t.face_count(), 4);
        assert!(t.is_closed());
        assert_eq!(t.volume(), rat(1, 6));
    }
    assert_eq!(
        Solid::tetrahedron(&a, &b, &c, &point(1, 1, 0)).unwrap_err(),
        SolidError::Degenerate { index: 0 }
    );
}

#[test]
fn from_polygons_reports_bad_input() {
    let faces = cube(0, 1).face_polygons();

    let open = &faces[..5];
    assert_eq!(Solid::from_polygons(open).unwrap_err(), SolidError::NotClosed);

    let inverted: Vec<Vec<Point3>> = faces
        .iter()
        .map(|f| f.iter().rev().cloned().collect())
        .collect();
    assert_eq!(Solid::from_polygons(&inverted).unwrap_err(), SolidError::InsideOut);

    let mut bent = faces.clone();
    bent[2][0] = p_half(0, -1, 0);
    assert!(matches!(
        Solid::from_polygons(&bent).unwrap_err(),
        SolidError::NonPlanar { index: 2 }
    ));

    let dart = vec![vec![point(0, 0, 0), point(4, 0, 0), point(1, 1, 0), point(0, 4, 0)]];
    assert_eq!(
        Solid::from_polygons(&dart).unwrap_err(),
        SolidError::NonConvex { index: 0 }
    );

    let repeated = vec![vec![point(0, 0, 0), point(1, 0, 0), point(0, 0, 0)]];
    assert_eq!(
        Solid::from_polygons(&repeated).unwrap_err(),
        SolidError::RepeatedVertex { index: 0 }
    );

    let line = vec![vec![point(0, 0, 0), point(1, 0, 0), point(2, 0, 0)]];
    assert_eq!(
        Solid::from_polygons(&line).unwrap_err(),
        SolidError::Degenerate { index: 0 }
    );
}

#[test]
fn cylinder_rim_is_exactly_on_the_circle() {
    let r = rat(3, 2);
    let cyl = Solid::truncated_cone(&r, &r, 8).unwrap();
    assert_eq!(cyl.face_count(), 10);
    assert_eq!(cyl.vertex_count(), 16);
    assert!(cyl.is_closed());
    cyl.validate().unwrap();
    let r2 = &r * &r;
    for v in cyl.mesh().vertex_ids() {
        let p = cyl.mesh().point(v).unwrap();
        assert_eq!(&p.x * &p.x + &p.z * &p.z, r2);
    }
    for (poly, plane) in cyl.face_polygons().iter().zip(cyl.face_planes()) {
        assert!(poly.iter().all(|p| plane.contains(p)));
    }
    assert!(cyl.volume().is_positive());
}

#[test]
fn cone_with_apex() {
    let cone = Solid::truncated_cone(&int(0), &int(1), 6).unwrap();
    assert_eq!(cone.face_count(), 7);
    assert_eq!(cone.vertex_count(), 7);
    assert!(cone.is_closed());
    assert_eq!(cone.classify_point(&point(0, 1, 0)), Containment::Boundary);

    let inverted = Solid::truncated_cone(&int(-2), &int(0), 5).unwrap();
    assert_eq!(inverted.face_count(), 6);
    assert!(inverted.is_closed());
    assert!(inverted.volume().is_positive());
}

#[test]
fn cone_rejects_bad_parameters() {
    assert!(matches!(
        Solid::truncated_cone(&int(1), &int(1), 2),
        Err(SolidError::InvalidParameter(_))
    ));
    assert!(matches!(
        Solid::truncated_cone(&int(0), &int(0), 8),
        Err(SolidError::InvalidParameter(_))
    ));
    assert!(Solid::truncated_cone(&int(1), &int(1), MAX_CONE_SEGMENTS + 1).is_err());
}

#[test]
fn classify_unit_cube() {
    let c = Solid::unit_cube().unwrap();
    assert_eq!(c.classify_point(&p_half(1, 1, 1)), Containment::Inside);
    assert_eq!(c.classify_point(&point(2, 2, 2)), Containment::Outside);
    assert_eq!(c.classify_point(&p_half(1, 4, 1)), Containment::Outside);
    assert_eq!(c.classify_point(&p_half(1, 1, 0)), Containment::Boundary);
    assert_eq!(c.classify_point(&p_half(2, 1, 2)), Containment::Boundary);
    assert_eq!(c.classify_point(&point(1, 1, 1)), Containment::Boundary);
    assert_eq!(Solid::empty().classify_point(&point(0, 0, 0)), Containment::Outside);
}

#[test]
fn translation_there_and_back_is_exact() {
    let c = Solid::unit_cube().unwrap();
    let v: Vec3 = point_rat(rat(1, 3), rat(-5, 7), rat(22, 9));
    let moved = c.transformed(&AffineTransform::translation(v.clone())).unwrap();
    let back = moved
        .transformed(&AffineTransform::translation(v.map(|x| -x)))
        .unwrap();
    assert_eq!(back.face_polygons(), c.face_polygons());
}

#[test]
fn reflection_keeps_faces_outward() {
    let mut c = cube(0, 1);
    let mirror = AffineTransform::scaling(int(-1), int(1)).unwrap();
    c.transform(&mirror).unwrap();
    assert!(c.is_closed());
    c.validate().unwrap();
    assert_eq!(c.volume(), int(1));
    assert_eq!(c.classify_point(&p_half(-1, -1, -1)), Containment::Inside);
}

#[test]
fn singular_transform_is_refused() {
    let mut c = cube(0, 1);
    let before = c.face_polygons();
    let flat = AffineTransform::scaling(int(0), int(1)).unwrap();
    assert_eq!(c.transform(&flat), Err(SolidError::SingularTransform));
    assert_eq!(c.face_polygons(), before);
}

#[test]
fn rotation_preserves_volume() {
    let q = [int(1), int(2), int(3), int(4)];
    let rot = AffineTransform::rotation_from_quaternion(q).unwrap();
    let c = cube(0, 1).transformed(&rot).unwrap();
    assert_eq!(c.volume(), int(1));
    assert!(c.is_closed());
}

#[test]
fn disjoint_union_keeps_every_face() {
    let a = Solid::unit_cube().unwrap();
    let b = shifted(&a, 5, 0, 0);
    let u = a.union(&b).unwrap();
    assert_eq!(u.face_count(), a.face_count() + b.face_count());
    assert_eq!(u.shell_count(), 2);
    assert_eq!(u.volume(), int(2));
    assert!(u.is_closed());

    assert!(a.intersection(&b).unwrap().is_empty());
    let d = a.difference(&b).unwrap();
    assert_eq!(d.face_polygons(), a.face_polygons());
}

#[test]
fn disjoint_union_of_tetrahedra() {
    let t = Solid::tetrahedron(&point(0, 0, 0), &point(2, 0, 0), &point(0, 2, 0), &point(0, 0, 2)).unwrap();
    let far = shifted(&t, 0, 0, 10);
    let u = t.union(&far).unwrap();
    assert_eq!(u.face_count(), 8);
}

#[test]
fn empty_operands() {
    let a = Solid::unit_cube().unwrap();
    let e = Solid::empty();
    assert_eq!(a.union(&e).unwrap().face_count(), 6);
    assert_eq!(e.union(&a).unwrap().face_count(), 6);
    assert!(a.intersection(&e).unwrap().is_empty());
    assert_eq!(a.difference(&e).unwrap().volume(), int(1));
    assert!(e.difference(&a).unwrap().is_empty());
}

#[test]
fn overlapping_cubes_intersection_is_the_shared_box() {
    let a = cube(0, 2);
    let b = cube(1, 3);
    let i = a.intersection(&b).unwrap();
    assert_eq!(i.face_count(), 6);
    assert_eq!(i.vertex_count(), 8);
    assert!(i.is_closed());
    assert_eq!(i.volume(), int(1));
    let bb = i.bounding_box().unwrap();
    assert_eq!((bb.min, bb.max), (point(1, 1, 1), point(2, 2, 2)));
}

#[test]
fn overlapping_cubes_union() {
    let a = cube(0, 2);
    let b = cube(1, 3);
    let u = a.union(&b).unwrap();
    assert!(u.is_closed());
    u.validate().unwrap();
    assert_eq!(u.volume(), int(15));
    assert_eq!(u.classify_point(&p_half(1, 1, 1)), Containment::Inside);
    assert_eq!(u.classify_point(&p_half(3, 3, 3)), Containment::Inside);
    assert_eq!(u.classify_point(&p_half(5, 5, 5)), Containment::Inside);
    assert_eq!(u.classify_point(&p_half(5, 1, 1)), Containment::Outside);
    assert_eq!(u.classify_point(&p_half(4, 1, 1)), Containment::Boundary);
}

#[test]
fn overlapping_cubes_difference() {
    let a = cube(0, 2);
    let b = cube(1, 3);
    let d = a.difference(&b).unwrap();
    assert!(d.is_closed());
    assert_eq!(d.volume(), int(7));
    assert_eq!(d.classify_point(&p_half(3, 3, 3)), Containment::Outside);
    assert_eq!(d.classify_point(&p_half(1, 1, 1)), Containment::Inside);
    assert_eq!(d.classify_point(&p_half(3, 3, 1)), Containment::Inside);
}

#[test]
fn difference_can_leave_a_cavity() {
    let outer = cube(0, 3);
    let inner = cube(1, 2);
    let d = outer.difference(&inner).unwrap();
    assert_eq!(d.shell_count(), 2);
    assert_eq!(d.face_count(), 12);
    assert!(d.is_closed());
    assert_eq!(d.volume(), int(26));
    assert_eq!(d.classify_point(&p_half(3, 3, 3)), Containment::Outside);
    assert_eq!(d.classify_point(&p_half(1, 1, 1)), Containment::Inside);
    assert_eq!(d.classify_point(&point(1, 1, 1)), Containment::Boundary);
}

#[test]
fn touching_cubes_union_drops_the_shared_face() {
    let a = cube(0, 1);
    let b = shifted(&a, 1, 0, 0);
    let u = a.union(&b).unwrap();
    assert_eq!(u.face_count(), 10);
    assert_eq!(u.vertex_count(), 12);
    assert!(u.is_closed());
    assert_eq!(u.volume(), int(2));
    assert_eq!(u.classify_point(&p_half(2, 1, 1)), Containment::Inside);
}

#[test]
fn same_cube_twice() {
    let a = cube(0, 1);
    let u = a.union(&a).unwrap();
    assert_eq!(u.volume(), int(1));
    assert!(u.is_closed());
    let i = a.intersection(&a).unwrap();
    assert_eq!(i.volume(), int(1));
    assert!(a.difference(&a).unwrap().is_empty());
}

#[test]
fn rotated_operand_volumes_add_up() {
    let a = cube(0, 2);
    let rot = AffineTransform::rotation_from_quaternion([int(1), int(2), int(3), int(4)]).unwrap();
    let b = cube(0, 2)
        .transformed(&rot)
        .unwrap()
        .transformed(&AffineTransform::translation(point(1, 1, 1)))
        .unwrap();
    let u = a.union(&b).unwrap();
    let i = a.intersection(&b).unwrap();
    let d = a.difference(&b).unwrap();
    assert!(u.is_closed());
    assert!(i.is_closed());
    assert!(d.is_closed());
    assert_eq!(u.volume() + i.volume(), a.volume() + b.volume());
    assert_eq!(d.volume() + i.volume(), a.volume());
}

#[test]
fn operands_are_left_untouched() {
    let a = cube(0, 2);
    let b = cube(1, 3);
    let (pa, pb) = (a.face_polygons(), b.face_polygons());
    for op in [BooleanOp::Union, BooleanOp::Intersection, BooleanOp::Difference] {
        a.boolean(&b, op).unwrap();
    }
    assert_eq!(a.face_polygons(), pa);
    assert_eq!(b.face_polygons(), pb);
}

#[test]
fn without_cleanup_the_result_is_still_valid() {
    let cfg = BooleanCfg {
        merge_fragments: false,
        repair_t_junctions: false,
        validate: true,
        ..BooleanCfg::default()
    };
    let a = cube(0, 2);
    let b = cube(1, 3);
    let i = a.boolean_with_cfg(&b, BooleanOp::Intersection, cfg).unwrap();
    assert_eq!(i.volume(), int(1));
}

#[test]
fn corrupt_operand_is_reported() {
    let mut a = cube(0, 2);
    let b = cube(1, 3);
    let v = a.mesh.vertex_ids().next().unwrap();
    let pv = a.mesh.vertices[v].parent_pvertex.unwrap();
    a.mesh.pvertices[pv].next = None;
    let cfg = BooleanCfg {
        validate: true,
        ..BooleanCfg::default()
    };
    let err = a.boolean_with_cfg(&b, BooleanOp::Union, cfg).unwrap_err();
    assert!(matches!(
        err,
        BooleanError::InvalidOperand {
            side: Operand::Left,
            ..
        }
    ));
}

#[test]
fn merge_glues_split_face_back() {
    let square = vec![point(0, 0, 0), point(2, 0, 0), point(2, 2, 0), point(0, 2, 0)];
    let poly = Polygon::new(square, 7).unwrap();
    let cut = Plane3::new(point(1, 0, 0), int(1));
    let mut parts = polygon::Parts::default();
    poly.split_by(&cut, &mut parts);
    assert_eq!((parts.front.len(), parts.back.len()), (1, 1));
    let pieces: Vec<Polygon> = parts.front.into_iter().chain(parts.back).collect();
    let merged = boolean::merge_fragments(pieces);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].points.len(), 4);
}

#[test]
fn t_junctions_are_filled() {
    let big = Polygon::new(vec![point(0, 0, 0), point(2, 0, 0), point(2, 2, 0), point(0, 2, 0)], 0).unwrap();
    let small = Polygon::new(vec![point(1, 0, 0), point(1, -1, 0), point(2, -1, 0), point(2, 0, 0)], 1).unwrap();
    let mut polys = vec![big, small];
    boolean::repair_t_junctions(&mut polys);
    assert_eq!(polys[0].points.len(), 5);
    assert_eq!(polys[0].points[1], point(1, 0, 0));
    assert_eq!(polys[1].points.len(), 4);
}
