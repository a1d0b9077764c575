//! Closed polyhedral solids on top of the partial-DS mesh.
//!
//! Purpose
//! - `Solid` owns a `PartialDs` whose faces are convex planar polygons forming
//!   closed shells, loops counterclockwise seen from outside.
//! - Constructors for primitives, exact affine transforms, exact point
//!   containment and boolean operations.
//!
//! Notes
//! - Shells with inward-facing loops are cavities (a difference can make
//!   them); the total enclosed volume is never negative.
//! - Boolean results can be non-manifold where the operands touch along an
//!   edge or a vertex; they still pass `validate()`.

mod boolean;
mod bsp;
mod classify;
mod polygon;
mod shapes;

pub use boolean::BooleanOp;
pub use classify::Containment;
pub use shapes::MAX_CONE_SEGMENTS;

use num_traits::{Signed, Zero};

use crate::cfg::MeshCfg;
use crate::error::{InvariantError, SolidError};
use crate::kernel::{rat, Aabb3, AffineTransform, Plane3, Point3, Rat, Sign};
use crate::partial_ds::PartialDs;
use polygon::Polygon;

/// Closed polyhedral solid.
#[derive(Clone, Debug, Default)]
pub struct Solid {
    mesh: PartialDs,
}

impl Solid {
    /// The solid with no faces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Solid bounded by `polys` (point loops, counterclockwise seen from
    /// outside; equal points are welded).
    ///
    /// Errors, by polygon index, on fewer than 3 points, repeated points, zero
    /// area, non-planar or non-convex loops; then on a surface that is not
    /// closed, or encloses negative volume.
    pub fn from_polygons(polys: &[Vec<Point3>]) -> Result<Solid, SolidError> {
        Self::from_polygons_with_cfg(polys, MeshCfg::default())
    }

    pub fn from_polygons_with_cfg(polys: &[Vec<Point3>], cfg: MeshCfg) -> Result<Solid, SolidError> {
        for (index, poly) in polys.iter().enumerate() {
            check_polygon(index, poly)?;
        }
        let mesh = PartialDs::from_polygons(polys, cfg)?;
        let solid = Solid { mesh };
        if !solid.mesh.is_closed() {
            return Err(SolidError::NotClosed);
        }
        if solid.volume().is_negative() {
            return Err(SolidError::InsideOut);
        }
        Ok(solid)
    }

    /// Wraps an existing mesh. Fails if it is structurally inconsistent;
    /// closedness is not checked.
    pub fn from_mesh(mesh: PartialDs) -> Result<Solid, InvariantError> {
        mesh.validate()?;
        Ok(Solid { mesh })
    }

    #[inline]
    pub fn mesh(&self) -> &PartialDs {
        &self.mesh
    }

    pub fn into_mesh(self) -> PartialDs {
        self.mesh
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.solid_face_ids().next().is_none()
    }

    /// Number of (non-degenerate) faces.
    pub fn face_count(&self) -> usize {
        self.mesh.solid_face_ids().count()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.mesh.edge_count()
    }

    pub fn shell_count(&self) -> usize {
        self.mesh.shell_count()
    }

    pub fn bounding_box(&self) -> Option<Aabb3> {
        self.mesh.bounding_box()
    }

    pub fn is_closed(&self) -> bool {
        self.mesh.is_closed()
    }

    pub fn validate(&self) -> Result<(), InvariantError> {
        self.mesh.validate()
    }

    /// Face loops as point lists, in face order.
    pub fn face_polygons(&self) -> Vec<Vec<Point3>> {
        self.mesh
            .solid_face_ids()
            .map(|f| self.mesh.face_points(f))
            .collect()
    }

    pub fn face_planes(&self) -> Vec<Plane3> {
        self.mesh
            .solid_face_ids()
            .filter_map(|f| self.mesh.face_plane(f))
            .collect()
    }

    /// Exact enclosed volume (faces fanned from their first point).
    pub fn volume(&self) -> Rat {
        let mut six_v = Rat::zero();
        for f in self.mesh.solid_face_ids() {
            let pts = self.mesh.face_points(f);
            for i in 1..pts.len().saturating_sub(1) {
                six_v += pts[0].dot(&pts[i].cross(&pts[i + 1]));
            }
        }
        six_v * rat(1, 6)
    }

    /// Applies `t` to every vertex. A reflection also reverses every face so
    /// that loops keep facing outward. Fails, leaving `self` unchanged, on a
    /// singular `t`.
    pub fn transform(&mut self, t: &AffineTransform) -> Result<(), SolidError> {
        let orientation = t.orientation();
        if orientation.is_zero() {
            return Err(SolidError::SingularTransform);
        }
        self.mesh.transform_points(t);
        if orientation == Sign::Negative {
            self.mesh.reverse_all_faces();
        }
        tracing::debug!(?orientation, "transform");
        Ok(())
    }

    /// Transformed copy; `self` is untouched.
    pub fn transformed(&self, t: &AffineTransform) -> Result<Solid, SolidError> {
        let mut out = self.clone();
        out.transform(t)?;
        Ok(out)
    }

    /// Face polygons tagged with consecutive source indices starting at `first`.
    pub(crate) fn polygons(&self, first: usize) -> Vec<Polygon> {
        self.face_polygons()
            .into_iter()
            .filter_map(|pts| Polygon::new(pts, 0))
            .enumerate()
            .map(|(i, mut p)| {
                p.tag.source = first + i;
                p
            })
            .collect()
    }
}

fn check_polygon(index: usize, poly: &[Point3]) -> Result<(), SolidError> {
    if poly.len() < 3 {
        return Err(SolidError::TooFewVertices { index });
    }
    for (k, p) in poly.iter().enumerate() {
        if poly[k + 1..].contains(p) {
            return Err(SolidError::RepeatedVertex { index });
        }
    }
    let plane = Plane3::of_polygon(poly).ok_or(SolidError::Degenerate { index })?;
    if !poly.iter().all(|p| plane.contains(p)) {
        return Err(SolidError::NonPlanar { index });
    }
    if !crate::kernel::is_convex_about(poly, &plane.n) {
        return Err(SolidError::NonConvex { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
