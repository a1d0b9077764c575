//! Edge split and its inverse, the degree-2 vertex collapse.

use super::types::{key_str, EdgeId, PEdgeId, PEdgeOrientation, VertexId};
use super::validate::Touched;
use super::PartialDs;
use crate::error::TopologyError;
use crate::kernel::Point3;

impl PartialDs {
    /// Splits `(a) -e-> (b)` into `(a) -e-> (w) -e'-> (b)` with a new vertex `w`
    /// at `point`. Every p-edge of `e` gets a counterpart on `e'` in its own
    /// loop, so all faces through `e` gain the vertex. Returns `w`.
    pub fn split_edge_create_vertex(
        &mut self,
        e: EdgeId,
        point: Point3,
    ) -> Result<VertexId, TopologyError> {
        self.check_edge(e)?;
        if self.is_degenerate_edge(e) {
            return Err(TopologyError::DegenerateEdge(key_str(e)));
        }
        let Some(pb) = self.edges[e].end else {
            return Err(TopologyError::DegenerateEdge(key_str(e)));
        };
        let radial: Vec<PEdgeId> = self.pedges_around_edge(e).collect();

        let w = self.alloc_vertex(point);
        let pw_e = self.attach_pvertex(w, Some(e));
        let pw_e2 = self.attach_pvertex(w, None);
        let e2 = self.alloc_edge(pw_e2, pb);
        self.edges[e].end = Some(pw_e);

        let mut last: Option<PEdgeId> = None;
        let mut loops = Vec::new();
        for pe in radial {
            let orientation = self.pedges[pe].orientation;
            let twin = self.alloc_pedge(e2, orientation);
            self.link_radial(e2, twin, last);
            last = Some(twin);
            match orientation {
                PEdgeOrientation::Reversed => self.link_loop_before(pe, twin),
                _ => self.link_loop_after(pe, twin),
            }
            loops.extend(self.pedges[pe].parent_loop);
        }
        let (a, b) = self.edge_vertices(e2).map_or((w, w), |(_, b)| {
            (self.edge_vertices(e).map_or(w, |(a, _)| a), b)
        });
        tracing::debug!(edge = ?e, new_edge = ?e2, vertex = ?w, "split_edge_create_vertex");
        self.after_mutation(
            "split_edge_create_vertex",
            Touched {
                vertices: vec![a, w, b],
                edges: vec![e, e2],
                loops,
                ..Touched::default()
            },
        );
        Ok(w)
    }

    /// Collapses the degree-2 vertex `w` at an end of `e`: the other edge at
    /// `w` is removed and `e` is stretched to its far end. Every face through
    /// `e` must also pass through the other edge (the state a split leaves).
    pub fn delete_vertex_join_edge(&mut self, w: VertexId, e: EdgeId) -> Result<(), TopologyError> {
        self.check_vertex(w)?;
        self.check_edge(e)?;
        if self.is_degenerate_edge(e) {
            return Err(TopologyError::DegenerateEdge(key_str(e)));
        }
        let degree = self.pvertices_around(w).count();
        if degree != 2 {
            return Err(TopologyError::WrongDegree {
                vertex: key_str(w),
                degree,
                expected: 2,
            });
        }
        let ed = self.edges[e].clone();
        let (Some(ps), Some(pend)) = (ed.start, ed.end) else {
            return Err(TopologyError::DegenerateEdge(key_str(e)));
        };
        let pw_e = if self.pvertex_vertex(ps) == Some(w) {
            ps
        } else if self.pvertex_vertex(pend) == Some(w) {
            pend
        } else {
            return Err(TopologyError::NotIncident {
                vertex: key_str(w),
                edge: key_str(e),
            });
        };
        let other_pw = self.pvertices_around(w).find(|&pv| pv != pw_e);
        let Some(pw_e2) = other_pw else {
            return Err(TopologyError::NotJoinable(key_str(e), key_str(e)));
        };
        let Some(e2) = self.pvertices[pw_e2].parent_edge else {
            return Err(TopologyError::NotJoinable(key_str(e), key_str(e)));
        };
        if e2 == e || self.is_degenerate_edge(e2) {
            return Err(TopologyError::NotJoinable(key_str(e), key_str(e2)));
        }
        let ed2 = self.edges[e2].clone();
        let px = if ed2.start == Some(pw_e2) { ed2.end } else { ed2.start };
        let Some(px) = px else {
            return Err(TopologyError::NotJoinable(key_str(e), key_str(e2)));
        };

        // Pair every use of `e` with the neighbor across `w` in its loop.
        let radial: Vec<PEdgeId> = self.pedges_around_edge(e).collect();
        let radial2_len = self.pedges_around_edge(e2).count();
        let mut neighbors = Vec::with_capacity(radial.len());
        for &pe in &radial {
            let nb = if self.pedge_start_vertex(pe) == Some(w) {
                self.pedges[pe].loop_prev
            } else {
                self.pedges[pe].loop_next
            };
            match nb {
                Some(nb) if self.pedges[nb].child_edge == Some(e2) && !neighbors.contains(&nb) => {
                    neighbors.push(nb)
                }
                _ => return Err(TopologyError::NotJoinable(key_str(e), key_str(e2))),
            }
        }
        if neighbors.len() != radial2_len {
            return Err(TopologyError::NotJoinable(key_str(e), key_str(e2)));
        }

        let mut loops = Vec::new();
        for nb in neighbors {
            loops.extend(self.pedges[nb].parent_loop);
            self.unlink_loop(nb);
            self.pedges.remove(nb);
        }
        if ed.start == Some(pw_e) {
            self.edges[e].start = Some(px);
        } else {
            self.edges[e].end = Some(px);
        }
        self.pvertices[px].parent_edge = Some(e);
        self.edges.remove(e2);
        self.pvertices.remove(pw_e);
        self.pvertices.remove(pw_e2);
        self.vertices.remove(w);
        let ends: Vec<VertexId> = self
            .edge_vertices(e)
            .map(|(a, b)| vec![a, b])
            .unwrap_or_default();
        tracing::debug!(vertex = ?w, edge = ?e, removed_edge = ?e2, "delete_vertex_join_edge");
        self.after_mutation(
            "delete_vertex_join_edge",
            Touched {
                vertices: ends,
                edges: vec![e],
                loops,
                ..Touched::default()
            },
        );
        Ok(())
    }
}
