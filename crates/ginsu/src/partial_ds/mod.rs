//! Partial-entity boundary representation.
//!
//! Purpose
//! - A mesh that can hold non-manifold configurations (isolated vertices, wire
//!   edges, edges shared by any number of faces) with one uniform set of
//!   entities: every use of a vertex by an edge end is a p-vertex, every use of
//!   an edge by a loop is a p-edge.
//! - Incremental Euler-style editing where every operation is all-or-nothing.
//!
//! Model
//! - Entities live in generation-checked arenas (`slotmap`) owned by
//!   `PartialDs`; cross references are typed keys, never pointers. A stale key
//!   is detected on lookup instead of aliasing a reused slot.
//! - An isolated vertex is a degenerate edge (start == end) with a self-linked
//!   p-edge in a degenerate loop/face, so "every vertex has a p-vertex" and
//!   "every edge has a p-edge" hold without special cases.
//!
//! Layout
//! - `types`: records and keys. `validate`: structural checks.
//! - `euler`: shells, isolated vertices, wire edges. `face`: face cycles.
//! - `split`: edge split / vertex collapse. `build`: polygon soup import.
//! - `handle`, `circulators`: read views and bounded traversals.

mod build;
mod circulators;
mod euler;
mod face;
mod handle;
mod link;
mod split;
mod types;
mod validate;

pub use circulators::{
    Circulator, FacesOfShell, PEdgeAroundEdge, PEdgeAroundLoop, PVertexAroundVertex,
};
pub use handle::{EdgeRef, FaceRef, LoopRef, PEdgeRef, PVertexRef, ShellRef, VertexMut, VertexRef};
pub use types::{
    Edge, EdgeId, Face, FaceId, Loop, LoopId, PEdge, PEdgeId, PEdgeOrientation, PVertex, PVertexId,
    Shell, ShellId, Vertex, VertexId,
};

use slotmap::SlotMap;

use crate::cfg::MeshCfg;
use crate::error::{EntityKind, InvariantError};
use crate::kernel::{Aabb3, AffineTransform, Plane3, Point3};
use types::key_str;

/// Owner of every mesh entity.
#[derive(Clone, Debug, Default)]
pub struct PartialDs {
    pub(crate) vertices: SlotMap<VertexId, Vertex>,
    pub(crate) pvertices: SlotMap<PVertexId, PVertex>,
    pub(crate) edges: SlotMap<EdgeId, Edge>,
    pub(crate) pedges: SlotMap<PEdgeId, PEdge>,
    pub(crate) loops: SlotMap<LoopId, Loop>,
    pub(crate) faces: SlotMap<FaceId, Face>,
    pub(crate) shells: SlotMap<ShellId, Shell>,
    cfg: MeshCfg,
}

fn lookup<K, V>(map: &SlotMap<K, V>, id: K, kind: EntityKind) -> Result<&V, InvariantError>
where
    K: slotmap::Key,
{
    map.get(id).ok_or_else(|| InvariantError::Dangling {
        kind,
        id: key_str(id),
    })
}

impl PartialDs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfg(cfg: MeshCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    #[inline]
    pub fn cfg(&self) -> MeshCfg {
        self.cfg
    }

    pub fn set_cfg(&mut self, cfg: MeshCfg) {
        self.cfg = cfg;
    }

    // ---- counts ---------------------------------------------------------

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
    pub fn pvertex_count(&self) -> usize {
        self.pvertices.len()
    }
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    pub fn pedge_count(&self) -> usize {
        self.pedges.len()
    }
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
    pub fn shell_count(&self) -> usize {
        self.shells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.shells.is_empty()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys()
    }
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys()
    }
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys()
    }
    pub fn shell_ids(&self) -> impl Iterator<Item = ShellId> + '_ {
        self.shells.keys()
    }

    // ---- checked lookups ------------------------------------------------

    pub(crate) fn vertex_data(&self, id: VertexId) -> Result<&Vertex, InvariantError> {
        lookup(&self.vertices, id, EntityKind::Vertex)
    }
    pub(crate) fn pvertex_data(&self, id: PVertexId) -> Result<&PVertex, InvariantError> {
        lookup(&self.pvertices, id, EntityKind::PVertex)
    }
    pub(crate) fn edge_data(&self, id: EdgeId) -> Result<&Edge, InvariantError> {
        lookup(&self.edges, id, EntityKind::Edge)
    }
    pub(crate) fn pedge_data(&self, id: PEdgeId) -> Result<&PEdge, InvariantError> {
        lookup(&self.pedges, id, EntityKind::PEdge)
    }
    pub(crate) fn loop_data(&self, id: LoopId) -> Result<&Loop, InvariantError> {
        lookup(&self.loops, id, EntityKind::Loop)
    }
    pub(crate) fn face_data(&self, id: FaceId) -> Result<&Face, InvariantError> {
        lookup(&self.faces, id, EntityKind::Face)
    }
    pub(crate) fn shell_data(&self, id: ShellId) -> Result<&Shell, InvariantError> {
        lookup(&self.shells, id, EntityKind::Shell)
    }

    pub fn point(&self, v: VertexId) -> Result<&Point3, InvariantError> {
        Ok(&self.vertex_data(v)?.point)
    }

    // ---- derived links --------------------------------------------------

    /// P-vertex a p-edge leaves from (edge start unless `Reversed`).
    pub(crate) fn pedge_start_pvertex(&self, pe: PEdgeId) -> Option<PVertexId> {
        let p = self.pedges.get(pe)?;
        let e = self.edges.get(p.child_edge?)?;
        match p.orientation {
            PEdgeOrientation::Reversed => e.end,
            _ => e.start,
        }
    }

    pub(crate) fn pedge_end_pvertex(&self, pe: PEdgeId) -> Option<PVertexId> {
        let p = self.pedges.get(pe)?;
        let e = self.edges.get(p.child_edge?)?;
        match p.orientation {
            PEdgeOrientation::Reversed => e.start,
            _ => e.end,
        }
    }

    pub(crate) fn pvertex_vertex(&self, pv: PVertexId) -> Option<VertexId> {
        self.pvertices.get(pv)?.vertex
    }

    pub(crate) fn pedge_start_vertex(&self, pe: PEdgeId) -> Option<VertexId> {
        self.pvertex_vertex(self.pedge_start_pvertex(pe)?)
    }

    pub(crate) fn pedge_end_vertex(&self, pe: PEdgeId) -> Option<VertexId> {
        self.pvertex_vertex(self.pedge_end_pvertex(pe)?)
    }

    /// Vertex ids at the two ends of an edge.
    pub fn edge_vertices(&self, e: EdgeId) -> Option<(VertexId, VertexId)> {
        let ed = self.edges.get(e)?;
        Some((self.pvertex_vertex(ed.start?)?, self.pvertex_vertex(ed.end?)?))
    }

    // ---- queries --------------------------------------------------------

    /// Number of edge ends at `v` (length of its p-vertex chain).
    pub fn vertex_degree(&self, v: VertexId) -> Result<usize, InvariantError> {
        self.check_vertex(v)?;
        Ok(self.pvertices_around(v).count())
    }

    /// `v` hosts a degenerate edge (no real edges).
    pub fn is_isolated(&self, v: VertexId) -> bool {
        let Some(pv) = self.vertices.get(v).and_then(|d| d.parent_pvertex) else {
            return false;
        };
        let Some(e) = self.pvertices.get(pv).and_then(|p| p.parent_edge) else {
            return false;
        };
        self.edges
            .get(e)
            .is_some_and(|ed| ed.start == Some(pv) && ed.end == Some(pv))
    }

    pub fn is_degenerate_edge(&self, e: EdgeId) -> bool {
        self.edges
            .get(e)
            .is_some_and(|ed| ed.start.is_some() && ed.start == ed.end)
    }

    /// A face that encloses nothing: its loop is the self-linked p-edge of an
    /// isolated vertex, or walks every edge of a wire tree once in each
    /// direction.
    pub fn is_degenerate_face(&self, f: FaceId) -> bool {
        let Some(l) = self.faces.get(f).and_then(|fd| fd.outer_loop) else {
            return false;
        };
        let edges: Vec<Option<EdgeId>> = self
            .pedges_of_loop(l)
            .map(|pe| self.pedges.get(pe).and_then(|p| p.child_edge))
            .collect();
        if edges.is_empty() {
            return false;
        }
        edges.iter().all(|&e| match e {
            Some(e) if self.is_degenerate_edge(e) => edges.len() == 1,
            Some(_) => edges.iter().filter(|&&o| o == e).count() == 2,
            None => false,
        })
    }

    /// Non-degenerate edge not used by any real face.
    pub fn is_wire_edge(&self, e: EdgeId) -> bool {
        if self.is_degenerate_edge(e) || !self.edges.contains_key(e) {
            return false;
        }
        let mut radial = self.pedges_around_edge(e).peekable();
        if radial.peek().is_none() {
            return false;
        }
        radial.all(|pe| {
            self.pedges
                .get(pe)
                .and_then(|p| p.parent_loop)
                .and_then(|l| self.loops.get(l))
                .and_then(|l| l.parent_face)
                .is_some_and(|f| self.is_degenerate_face(f))
        })
    }

    /// Some non-degenerate edge joining `a` and `b` (either direction).
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.pvertices_around(a).find_map(|pv| {
            let e = self.pvertices.get(pv)?.parent_edge?;
            let ed = self.edges.get(e)?;
            if ed.start == ed.end {
                return None;
            }
            let other = if ed.start == Some(pv) { ed.end? } else { ed.start? };
            (self.pvertex_vertex(other)? == b).then_some(e)
        })
    }

    /// Distinct non-degenerate edges with an end at `v`.
    pub fn incident_edges(&self, v: VertexId) -> Vec<EdgeId> {
        let mut out = Vec::new();
        for pv in self.pvertices_around(v) {
            let Some(e) = self.pvertices.get(pv).and_then(|p| p.parent_edge) else {
                continue;
            };
            if !self.is_degenerate_edge(e) && !out.contains(&e) {
                out.push(e);
            }
        }
        out
    }

    /// Distinct shells of the faces (degenerate ones included) that use `v`.
    pub fn vertex_shells(&self, v: VertexId) -> Vec<ShellId> {
        let mut out = Vec::new();
        for pv in self.pvertices_around(v) {
            let Some(e) = self.pvertices.get(pv).and_then(|p| p.parent_edge) else {
                continue;
            };
            for pe in self.pedges_around_edge(e) {
                let s = self
                    .pedges
                    .get(pe)
                    .and_then(|p| p.parent_loop)
                    .and_then(|l| self.loops.get(l)?.parent_face)
                    .and_then(|f| self.faces.get(f)?.parent_shell);
                if let Some(s) = s {
                    if !out.contains(&s) {
                        out.push(s);
                    }
                }
            }
        }
        out
    }

    /// Vertices of the face boundary in loop order.
    pub fn face_vertices(&self, f: FaceId) -> Vec<VertexId> {
        let Some(l) = self.faces.get(f).and_then(|fd| fd.outer_loop) else {
            return Vec::new();
        };
        self.pedges_of_loop(l)
            .filter_map(|pe| self.pedge_start_vertex(pe))
            .collect()
    }

    pub fn face_points(&self, f: FaceId) -> Vec<Point3> {
        self.face_vertices(f)
            .into_iter()
            .filter_map(|v| self.vertices.get(v).map(|d| d.point.clone()))
            .collect()
    }

    /// Supporting plane, oriented by loop order. `None` for degenerate faces.
    pub fn face_plane(&self, f: FaceId) -> Option<Plane3> {
        Plane3::of_polygon(&self.face_points(f))
    }

    pub fn face_shell(&self, f: FaceId) -> Option<ShellId> {
        self.faces.get(f)?.parent_shell
    }

    /// Faces that are not degenerate (real polygons).
    pub fn solid_face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys().filter(|&f| !self.is_degenerate_face(f))
    }

    pub fn bounding_box(&self) -> Option<Aabb3> {
        Aabb3::from_points(self.vertices.values().map(|v| &v.point))
    }

    /// Every edge is used by exactly two p-edges running in opposite
    /// directions and there are no degenerate faces: a closed oriented surface.
    pub fn is_closed(&self) -> bool {
        if self.faces.keys().any(|f| self.is_degenerate_face(f)) {
            return false;
        }
        self.edges.keys().all(|e| {
            let uses: Vec<PEdgeId> = self.pedges_around_edge(e).take(3).collect();
            if uses.len() != 2 {
                return false;
            }
            let o0 = self.pedges.get(uses[0]).map(|p| p.orientation);
            let o1 = self.pedges.get(uses[1]).map(|p| p.orientation);
            matches!(
                (o0, o1),
                (Some(PEdgeOrientation::Forward), Some(PEdgeOrientation::Reversed))
                    | (Some(PEdgeOrientation::Reversed), Some(PEdgeOrientation::Forward))
            )
        })
    }

    /// Applies `t` to every vertex point. Topology is untouched, so an
    /// orientation-reversing `t` leaves loops facing inward.
    pub fn transform_points(&mut self, t: &AffineTransform) {
        for v in self.vertices.values_mut() {
            v.point = t.apply_point(&v.point);
        }
    }
}
