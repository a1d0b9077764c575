//! Shells, isolated vertices and wire edges.

use super::types::{
    key_str, EdgeId, FaceId, LoopId, PEdgeId, PEdgeOrientation, PVertexId, ShellId, VertexId,
};
use super::validate::Touched;
use super::PartialDs;
use crate::error::{EntityKind, InvariantError, TopologyError};
use crate::kernel::Point3;

/// Entities hosting an isolated vertex, from the p-vertex up to the shell.
type IsolatedParts = (PVertexId, EdgeId, PEdgeId, LoopId, FaceId, Option<ShellId>);

impl PartialDs {
    pub fn create_shell(&mut self) -> ShellId {
        let s = self.shells.insert(Default::default());
        tracing::debug!(shell = ?s, "create_shell");
        s
    }

    /// Removes a shell that has no faces.
    pub fn delete_empty_shell(&mut self, s: ShellId) -> Result<(), TopologyError> {
        if self.shell_data(s)?.face.is_some() {
            return Err(TopologyError::ShellNotEmpty(key_str(s)));
        }
        self.shells.remove(s);
        tracing::debug!(shell = ?s, "delete_empty_shell");
        Ok(())
    }

    /// New vertex at `point` on a degenerate edge, with its own self-linked
    /// p-edge, degenerate loop and degenerate face in `shell`.
    pub fn create_isolated_vertex(
        &mut self,
        shell: ShellId,
        point: Point3,
    ) -> Result<VertexId, TopologyError> {
        self.shell_data(shell)?;
        let v = self.alloc_vertex(point);
        let pv = self.attach_pvertex(v, None);
        let e = self.alloc_edge(pv, pv);
        let pe = self.alloc_pedge(e, PEdgeOrientation::Unoriented);
        self.link_radial(e, pe, None);
        let l = self.alloc_loop(&[pe]);
        let f = self.alloc_face(shell, l);
        tracing::debug!(vertex = ?v, shell = ?shell, "create_isolated_vertex");
        self.after_mutation(
            "create_isolated_vertex",
            Touched {
                vertices: vec![v],
                edges: vec![e],
                loops: vec![l],
                faces: vec![f],
                shells: vec![shell],
            },
        );
        Ok(v)
    }

    /// Deletes an isolated vertex with its degenerate edge, loop and face.
    pub fn delete_isolated_vertex(&mut self, v: VertexId) -> Result<(), TopologyError> {
        self.check_vertex(v)?;
        if !self.is_isolated(v) {
            return Err(TopologyError::NotIsolated(key_str(v)));
        }
        let (pv, e, pe, l, f, shell) = self.isolated_parts(v)?;
        self.free_face(f);
        self.loops.remove(l);
        self.pedges.remove(pe);
        self.edges.remove(e);
        self.pvertices.remove(pv);
        self.vertices.remove(v);
        tracing::debug!(vertex = ?v, "delete_isolated_vertex");
        self.after_mutation(
            "delete_isolated_vertex",
            Touched {
                shells: shell.into_iter().collect(),
                ..Touched::default()
            },
        );
        Ok(())
    }

    /// Fails unless every face using `v` lies in `shell`. A vertex no face
    /// uses yet belongs to any shell.
    pub(super) fn require_shell(&self, v: VertexId, shell: ShellId) -> Result<(), TopologyError> {
        if self.vertex_shells(v).iter().any(|&s| s != shell) {
            return Err(TopologyError::ForeignShell {
                vertex: key_str(v),
                shell: key_str(shell),
            });
        }
        Ok(())
    }

    fn isolated_parts(&self, v: VertexId) -> Result<IsolatedParts, TopologyError> {
        let miss = |kind: EntityKind, link: &'static str| InvariantError::MissingLink {
            kind,
            id: key_str(v),
            link,
        };
        let pv = self
            .vertex_data(v)?
            .parent_pvertex
            .ok_or_else(|| miss(EntityKind::Vertex, "parent p-vertex"))?;
        let e = self
            .pvertex_data(pv)?
            .parent_edge
            .ok_or_else(|| miss(EntityKind::PVertex, "parent edge"))?;
        let pe = self
            .edge_data(e)?
            .parent_pedge
            .ok_or_else(|| miss(EntityKind::Edge, "parent p-edge"))?;
        let l = self
            .pedge_data(pe)?
            .parent_loop
            .ok_or_else(|| miss(EntityKind::PEdge, "parent loop"))?;
        let f = self
            .loop_data(l)?
            .parent_face
            .ok_or_else(|| miss(EntityKind::Loop, "parent face"))?;
        let shell = self.face_data(f)?.parent_shell;
        Ok((pv, e, pe, l, f, shell))
    }

    /// Adds a wire edge from `v` to a new vertex at `point` and returns it.
    ///
    /// If `v` is isolated its degenerate edge is unwrapped into the wire edge
    /// (the degenerate face stays, now hosting two p-edges). Otherwise a new
    /// p-vertex is spliced into `v`'s chain and the wire edge gets its own
    /// degenerate face in `shell`. Fails if `v` is used by faces of another
    /// shell.
    pub fn create_wire_edge_and_vertex(
        &mut self,
        shell: ShellId,
        v: VertexId,
        point: Point3,
    ) -> Result<EdgeId, TopologyError> {
        self.shell_data(shell)?;
        self.check_vertex(v)?;
        self.require_shell(v, shell)?;
        if self.is_isolated(v) {
            let (_, e, pe, l, f, _) = self.isolated_parts(v)?;
            let w = self.alloc_vertex(point);
            let pw = self.attach_pvertex(w, Some(e));
            self.edges[e].end = Some(pw);
            self.pedges[pe].orientation = PEdgeOrientation::Forward;
            let back = self.alloc_pedge(e, PEdgeOrientation::Reversed);
            self.link_radial(e, back, Some(pe));
            self.link_loop_after(pe, back);
            tracing::debug!(edge = ?e, from = ?v, to = ?w, "create_wire_edge_and_vertex (unwrap)");
            self.after_mutation(
                "create_wire_edge_and_vertex",
                Touched {
                    vertices: vec![v, w],
                    edges: vec![e],
                    loops: vec![l],
                    faces: vec![f],
                    shells: vec![shell],
                },
            );
            return Ok(e);
        }
        let w = self.alloc_vertex(point);
        let pv = self.attach_pvertex(v, None);
        let pw = self.attach_pvertex(w, None);
        let e = self.alloc_edge(pv, pw);
        let fwd = self.alloc_pedge(e, PEdgeOrientation::Forward);
        let back = self.alloc_pedge(e, PEdgeOrientation::Reversed);
        self.link_radial(e, fwd, None);
        self.link_radial(e, back, Some(fwd));
        let l = self.alloc_loop(&[fwd, back]);
        let f = self.alloc_face(shell, l);
        tracing::debug!(edge = ?e, from = ?v, to = ?w, "create_wire_edge_and_vertex");
        self.after_mutation(
            "create_wire_edge_and_vertex",
            Touched {
                vertices: vec![v, w],
                edges: vec![e],
                loops: vec![l],
                faces: vec![f],
                shells: vec![shell],
            },
        );
        Ok(e)
    }

    /// Dual of [`Self::create_wire_edge_and_vertex`]: removes wire edge `e`
    /// and its end vertex `v`, which must have no other edge ends. If the other
    /// end is left without edges it becomes an isolated vertex again.
    pub fn delete_wire_edge_and_vertex(
        &mut self,
        e: EdgeId,
        v: VertexId,
    ) -> Result<(), TopologyError> {
        self.check_edge(e)?;
        self.check_vertex(v)?;
        if !self.is_wire_edge(e) {
            return Err(TopologyError::NotWireEdge(key_str(e)));
        }
        let ed = self.edges[e].clone();
        let (Some(ps), Some(pe_end)) = (ed.start, ed.end) else {
            return Err(TopologyError::NotWireEdge(key_str(e)));
        };
        let (pv, pu) = if self.pvertex_vertex(ps) == Some(v) {
            (ps, pe_end)
        } else if self.pvertex_vertex(pe_end) == Some(v) {
            (pe_end, ps)
        } else {
            return Err(TopologyError::NotIncident {
                vertex: key_str(v),
                edge: key_str(e),
            });
        };
        let degree = self.pvertices_around(v).count();
        if degree != 1 {
            return Err(TopologyError::WrongDegree {
                vertex: key_str(v),
                degree,
                expected: 1,
            });
        }
        let Some(u) = self.pvertex_vertex(pu) else {
            return Err(TopologyError::NotWireEdge(key_str(e)));
        };
        let radial: Vec<_> = self.pedges_around_edge(e).collect();
        let shell = radial
            .first()
            .and_then(|&pe| self.pedges[pe].parent_loop)
            .and_then(|l| self.loops[l].parent_face)
            .and_then(|f| self.faces[f].parent_shell);

        self.pvertices.remove(pv);
        self.vertices.remove(v);
        if self.pvertices_around(u).count() == 1 {
            // `u` keeps the edge, which collapses back to a degenerate one.
            let keep = radial[0];
            for &pe in &radial[1..] {
                self.unlink_radial(pe);
                self.unlink_loop(pe);
                self.pedges.remove(pe);
            }
            let ed = &mut self.edges[e];
            ed.start = Some(pu);
            ed.end = Some(pu);
            self.pedges[keep].orientation = PEdgeOrientation::Unoriented;
            let l = self.pedges[keep].parent_loop;
            let f = l.and_then(|l| self.loops[l].parent_face);
            tracing::debug!(edge = ?e, vertex = ?v, "delete_wire_edge_and_vertex (collapse)");
            self.after_mutation(
                "delete_wire_edge_and_vertex",
                Touched {
                    vertices: vec![u],
                    edges: vec![e],
                    loops: l.into_iter().collect(),
                    faces: f.into_iter().collect(),
                    shells: shell.into_iter().collect(),
                },
            );
            return Ok(());
        }
        let loops = self.strip_edge_uses(e);
        self.edges.remove(e);
        self.detach_pvertex(pu);
        tracing::debug!(edge = ?e, vertex = ?v, "delete_wire_edge_and_vertex");
        self.after_mutation(
            "delete_wire_edge_and_vertex",
            Touched {
                vertices: vec![u],
                loops,
                shells: shell.into_iter().collect(),
                ..Touched::default()
            },
        );
        Ok(())
    }
}
