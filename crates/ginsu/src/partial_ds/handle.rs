//! Read views over mesh entities.
//!
//! A view is a `Copy` pair of the mesh and a key whose liveness was checked
//! when the view was made. Navigation returns `None` for absent or stale
//! links; use the `check_*` validators to learn which.

use super::circulators::Circulator;
use super::types::{EdgeId, FaceId, LoopId, PEdgeId, PEdgeOrientation, PVertexId, ShellId, VertexId};
use super::PartialDs;
use crate::error::InvariantError;
use crate::kernel::{Plane3, Point3};

macro_rules! view {
    ($(#[$doc:meta])* $name:ident, $id:ty) => {
        $(#[$doc])*
        #[derive(Clone, Copy)]
        pub struct $name<'a> {
            ds: &'a PartialDs,
            id: $id,
        }

        impl<'a> $name<'a> {
            #[inline]
            pub fn id(&self) -> $id {
                self.id
            }

            #[inline]
            pub fn mesh(&self) -> &'a PartialDs {
                self.ds
            }
        }

        impl std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.id).finish()
            }
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self.ds, other.ds) && self.id == other.id
            }
        }
    };
}

view!(VertexRef, VertexId);
view!(PVertexRef, PVertexId);
view!(EdgeRef, EdgeId);
view!(PEdgeRef, PEdgeId);
view!(LoopRef, LoopId);
view!(FaceRef, FaceId);
view!(ShellRef, ShellId);

impl PartialDs {
    pub fn vertex(&self, id: VertexId) -> Result<VertexRef<'_>, InvariantError> {
        self.vertex_data(id)?;
        Ok(VertexRef { ds: self, id })
    }

    pub fn pvertex(&self, id: PVertexId) -> Result<PVertexRef<'_>, InvariantError> {
        self.pvertex_data(id)?;
        Ok(PVertexRef { ds: self, id })
    }

    pub fn edge(&self, id: EdgeId) -> Result<EdgeRef<'_>, InvariantError> {
        self.edge_data(id)?;
        Ok(EdgeRef { ds: self, id })
    }

    pub fn pedge(&self, id: PEdgeId) -> Result<PEdgeRef<'_>, InvariantError> {
        self.pedge_data(id)?;
        Ok(PEdgeRef { ds: self, id })
    }

    pub fn loop_(&self, id: LoopId) -> Result<LoopRef<'_>, InvariantError> {
        self.loop_data(id)?;
        Ok(LoopRef { ds: self, id })
    }

    pub fn face(&self, id: FaceId) -> Result<FaceRef<'_>, InvariantError> {
        self.face_data(id)?;
        Ok(FaceRef { ds: self, id })
    }

    pub fn shell(&self, id: ShellId) -> Result<ShellRef<'_>, InvariantError> {
        self.shell_data(id)?;
        Ok(ShellRef { ds: self, id })
    }

    /// Mutable view for editing a vertex's point. Topology is not reachable
    /// through it.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<VertexMut<'_>, InvariantError> {
        self.vertex_data(id)?;
        Ok(VertexMut { ds: self, id })
    }
}

impl<'a> VertexRef<'a> {
    pub fn point(&self) -> &'a Point3 {
        &self.ds.vertices[self.id].point
    }

    pub fn parent_pvertex(&self) -> Option<PVertexRef<'a>> {
        let pv = self.ds.vertices[self.id].parent_pvertex?;
        self.ds.pvertex(pv).ok()
    }

    /// P-vertices in chain order, starting at the parent p-vertex.
    pub fn pvertices(&self) -> impl Iterator<Item = PVertexRef<'a>> + 'a {
        let ds = self.ds;
        ds.pvertices_around(self.id).filter_map(move |pv| ds.pvertex(pv).ok())
    }

    pub fn degree(&self) -> usize {
        self.ds.pvertices_around(self.id).count()
    }

    pub fn is_isolated(&self) -> bool {
        self.ds.is_isolated(self.id)
    }

    pub fn edges(&self) -> Vec<EdgeRef<'a>> {
        let ds = self.ds;
        ds.incident_edges(self.id)
            .into_iter()
            .filter_map(|e| ds.edge(e).ok())
            .collect()
    }
}

impl<'a> PVertexRef<'a> {
    pub fn vertex(&self) -> Option<VertexRef<'a>> {
        self.ds.vertex(self.ds.pvertices[self.id].vertex?).ok()
    }

    pub fn parent_edge(&self) -> Option<EdgeRef<'a>> {
        self.ds.edge(self.ds.pvertices[self.id].parent_edge?).ok()
    }

    /// Next p-vertex of the same vertex.
    pub fn next(&self) -> Option<PVertexRef<'a>> {
        self.ds.pvertex(self.ds.pvertices[self.id].next?).ok()
    }
}

impl<'a> EdgeRef<'a> {
    pub fn start(&self) -> Option<PVertexRef<'a>> {
        self.ds.pvertex(self.ds.edges[self.id].start?).ok()
    }

    pub fn end(&self) -> Option<PVertexRef<'a>> {
        self.ds.pvertex(self.ds.edges[self.id].end?).ok()
    }

    pub fn start_vertex(&self) -> Option<VertexRef<'a>> {
        self.start()?.vertex()
    }

    pub fn end_vertex(&self) -> Option<VertexRef<'a>> {
        self.end()?.vertex()
    }

    pub fn parent_pedge(&self) -> Option<PEdgeRef<'a>> {
        self.ds.pedge(self.ds.edges[self.id].parent_pedge?).ok()
    }

    /// Uses of this edge in radial order.
    pub fn pedges(&self) -> impl Iterator<Item = PEdgeRef<'a>> + 'a {
        let ds = self.ds;
        ds.pedges_around_edge(self.id).filter_map(move |pe| ds.pedge(pe).ok())
    }

    pub fn is_degenerate(&self) -> bool {
        self.ds.is_degenerate_edge(self.id)
    }

    pub fn is_wire(&self) -> bool {
        self.ds.is_wire_edge(self.id)
    }
}

impl<'a> PEdgeRef<'a> {
    pub fn orientation(&self) -> PEdgeOrientation {
        self.ds.pedges[self.id].orientation
    }

    pub fn edge(&self) -> Option<EdgeRef<'a>> {
        self.ds.edge(self.ds.pedges[self.id].child_edge?).ok()
    }

    pub fn parent_loop(&self) -> Option<LoopRef<'a>> {
        self.ds.loop_(self.ds.pedges[self.id].parent_loop?).ok()
    }

    pub fn loop_next(&self) -> Option<PEdgeRef<'a>> {
        self.ds.pedge(self.ds.pedges[self.id].loop_next?).ok()
    }

    pub fn loop_prev(&self) -> Option<PEdgeRef<'a>> {
        self.ds.pedge(self.ds.pedges[self.id].loop_prev?).ok()
    }

    pub fn radial_next(&self) -> Option<PEdgeRef<'a>> {
        self.ds.pedge(self.ds.pedges[self.id].radial_next?).ok()
    }

    pub fn radial_prev(&self) -> Option<PEdgeRef<'a>> {
        self.ds.pedge(self.ds.pedges[self.id].radial_prev?).ok()
    }

    /// Vertex the p-edge leaves from, following its orientation.
    pub fn start_vertex(&self) -> Option<VertexRef<'a>> {
        self.ds.vertex(self.ds.pedge_start_vertex(self.id)?).ok()
    }

    pub fn end_vertex(&self) -> Option<VertexRef<'a>> {
        self.ds.vertex(self.ds.pedge_end_vertex(self.id)?).ok()
    }
}

impl<'a> LoopRef<'a> {
    pub fn face(&self) -> Option<FaceRef<'a>> {
        self.ds.face(self.ds.loops[self.id].parent_face?).ok()
    }

    pub fn boundary_pedge(&self) -> Option<PEdgeRef<'a>> {
        self.ds.pedge(self.ds.loops[self.id].boundary_pedge?).ok()
    }

    /// P-edges in loop order.
    pub fn pedges(&self) -> Circulator<'a, PEdgeId> {
        self.ds.pedges_of_loop(self.id)
    }

    /// Start vertices of the p-edges, in loop order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexRef<'a>> + 'a {
        let ds = self.ds;
        ds.pedges_of_loop(self.id)
            .filter_map(move |pe| ds.vertex(ds.pedge_start_vertex(pe)?).ok())
    }
}

impl<'a> FaceRef<'a> {
    pub fn outer_loop(&self) -> Option<LoopRef<'a>> {
        self.ds.loop_(self.ds.faces[self.id].outer_loop?).ok()
    }

    pub fn shell(&self) -> Option<ShellRef<'a>> {
        self.ds.shell(self.ds.faces[self.id].parent_shell?).ok()
    }

    /// Boundary vertices in loop (orientation) order.
    pub fn vertices(&self) -> Vec<VertexRef<'a>> {
        let ds = self.ds;
        ds.face_vertices(self.id)
            .into_iter()
            .filter_map(|v| ds.vertex(v).ok())
            .collect()
    }

    pub fn points(&self) -> Vec<Point3> {
        self.ds.face_points(self.id)
    }

    pub fn plane(&self) -> Option<Plane3> {
        self.ds.face_plane(self.id)
    }

    pub fn is_degenerate(&self) -> bool {
        self.ds.is_degenerate_face(self.id)
    }
}

impl<'a> ShellRef<'a> {
    pub fn faces(&self) -> impl Iterator<Item = FaceRef<'a>> + 'a {
        let ds = self.ds;
        ds.faces_of_shell(self.id).filter_map(move |f| ds.face(f).ok())
    }

    pub fn face_count(&self) -> usize {
        self.ds.faces_of_shell(self.id).count()
    }
}

/// Point editing access to one vertex.
pub struct VertexMut<'a> {
    ds: &'a mut PartialDs,
    id: VertexId,
}

impl VertexMut<'_> {
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn point(&self) -> &Point3 {
        &self.ds.vertices[self.id].point
    }

    pub fn set_point(&mut self, p: Point3) {
        self.ds.vertices[self.id].point = p;
    }
}
