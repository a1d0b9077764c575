//! Face cycles: make, delete, reverse.

use std::collections::HashSet;

use super::types::{
    key_str, EdgeId, FaceId, LoopId, PEdgeId, PEdgeOrientation, ShellId, VertexId,
};
use super::validate::Touched;
use super::PartialDs;
use crate::error::TopologyError;

/// How one side of a new face obtains its edge.
enum EdgePlan {
    /// Edge exists and already bounds faces; add a radial use.
    Reuse(EdgeId),
    /// Wire edge: drop its wire uses first.
    Convert(EdgeId),
    Create,
}

impl PartialDs {
    /// Closes the vertex cycle `verts` into a new face of `shell`.
    ///
    /// Loop order is the face orientation (counterclockwise seen from the
    /// side the face points to). Existing edges between consecutive vertices
    /// are reused; wire edges are converted; isolated vertices are absorbed.
    /// Every vertex must already belong to `shell`.
    pub fn make_face(
        &mut self,
        shell: ShellId,
        verts: &[VertexId],
    ) -> Result<FaceId, TopologyError> {
        self.shell_data(shell)?;
        if verts.len() < 3 {
            return Err(TopologyError::TooFewVertices(verts.len()));
        }
        let mut seen = HashSet::with_capacity(verts.len());
        for &v in verts {
            self.check_vertex(v)?;
            if !seen.insert(v) {
                return Err(TopologyError::RepeatedVertex(key_str(v)));
            }
            self.require_shell(v, shell)?;
        }
        Ok(self.make_face_unchecked(shell, verts))
    }

    /// `make_face` without precondition checks. Vertices may also be fresh
    /// (no p-vertex yet) when called from the polygon importer.
    pub(crate) fn make_face_unchecked(&mut self, shell: ShellId, verts: &[VertexId]) -> FaceId {
        let k = verts.len();
        let plans: Vec<EdgePlan> = (0..k)
            .map(|i| match self.find_edge(verts[i], verts[(i + 1) % k]) {
                Some(e) if self.is_wire_edge(e) => EdgePlan::Convert(e),
                Some(e) => EdgePlan::Reuse(e),
                None => EdgePlan::Create,
            })
            .collect();

        for &v in verts {
            if self.is_isolated(v) {
                self.absorb_isolated(v);
            }
        }

        let mut wire_loops = Vec::new();
        let mut pes: Vec<PEdgeId> = Vec::with_capacity(k);
        let mut edges = Vec::with_capacity(k);
        for (i, plan) in plans.into_iter().enumerate() {
            let a = verts[i];
            let e = match plan {
                EdgePlan::Reuse(e) => e,
                EdgePlan::Convert(e) => {
                    wire_loops.extend(self.strip_edge_uses(e));
                    e
                }
                EdgePlan::Create => {
                    let pa = self.attach_pvertex(a, None);
                    let pb = self.attach_pvertex(verts[(i + 1) % k], None);
                    self.alloc_edge(pa, pb)
                }
            };
            let forward = self.edge_vertices(e).map(|(s, _)| s) == Some(a);
            let orientation = if forward {
                PEdgeOrientation::Forward
            } else {
                PEdgeOrientation::Reversed
            };
            let pe = self.alloc_pedge(e, orientation);
            self.link_radial(e, pe, None);
            pes.push(pe);
            edges.push(e);
        }
        let l = self.alloc_loop(&pes);
        let f = self.alloc_face(shell, l);
        tracing::debug!(face = ?f, shell = ?shell, sides = k, "make_face");
        wire_loops.retain(|&wl| self.loops.contains_key(wl));
        wire_loops.push(l);
        self.after_mutation(
            "make_face",
            Touched {
                vertices: verts.to_vec(),
                edges,
                loops: wire_loops,
                faces: vec![f],
                shells: vec![shell],
            },
        );
        f
    }

    /// Strips an isolated vertex of its degenerate edge/loop/face, leaving a
    /// bare vertex.
    fn absorb_isolated(&mut self, v: VertexId) -> Option<()> {
        let pv = self.vertices[v].parent_pvertex?;
        let e = self.pvertices[pv].parent_edge?;
        let pe = self.edges[e].parent_pedge?;
        let l = self.pedges[pe].parent_loop?;
        let f = self.loops[l].parent_face?;
        self.free_face(f);
        self.loops.remove(l);
        self.pedges.remove(pe);
        self.edges.remove(e);
        self.pvertices.remove(pv);
        self.vertices[v].parent_pvertex = None;
        Some(())
    }

    /// Removes a real face with its loop and p-edges. Edges left without uses
    /// are removed with their p-vertices, and vertices left without p-vertices
    /// are removed too.
    pub fn delete_face(&mut self, f: FaceId) -> Result<(), TopologyError> {
        self.check_face(f)?;
        if self.is_degenerate_face(f) {
            return Err(TopologyError::DegenerateFace(key_str(f)));
        }
        let shell = self.faces[f].parent_shell;
        let orphaned = self.free_face_with_loop(f);
        let mut survivors = Vec::new();
        for e in &orphaned {
            let Some(ed) = self.edges.remove(*e) else {
                continue;
            };
            for pv in [ed.start, ed.end].into_iter().flatten() {
                let owner = self.pvertex_vertex(pv);
                match self.detach_pvertex(pv) {
                    Some(v) => {
                        self.vertices.remove(v);
                    }
                    None => survivors.extend(owner),
                }
            }
        }
        survivors.sort();
        survivors.dedup();
        survivors.retain(|&v| self.vertices.contains_key(v));
        tracing::debug!(face = ?f, removed_edges = orphaned.len(), "delete_face");
        self.after_mutation(
            "delete_face",
            Touched {
                vertices: survivors,
                shells: shell.into_iter().collect(),
                ..Touched::default()
            },
        );
        Ok(())
    }

    /// Flips the face orientation: loop links swap and every p-edge reverses.
    pub fn reverse_face(&mut self, f: FaceId) -> Result<(), TopologyError> {
        self.check_face(f)?;
        let Some(l) = self.faces[f].outer_loop else {
            return Ok(());
        };
        self.reverse_loop_links(l);
        self.after_mutation(
            "reverse_face",
            Touched {
                loops: vec![l],
                ..Touched::default()
            },
        );
        Ok(())
    }

    /// Reverses every non-degenerate face.
    pub fn reverse_all_faces(&mut self) {
        let loops: Vec<_> = self
            .faces
            .keys()
            .filter(|&f| !self.is_degenerate_face(f))
            .filter_map(|f| self.faces[f].outer_loop)
            .collect();
        for &l in &loops {
            self.reverse_loop_links(l);
        }
        tracing::debug!(faces = loops.len(), "reverse_all_faces");
        self.after_mutation(
            "reverse_all_faces",
            Touched {
                loops,
                ..Touched::default()
            },
        );
    }

    fn reverse_loop_links(&mut self, l: LoopId) {
        let pes: Vec<PEdgeId> = self.pedges_of_loop(l).collect();
        for pe in pes {
            let pd = &mut self.pedges[pe];
            std::mem::swap(&mut pd.loop_next, &mut pd.loop_prev);
            pd.orientation = pd.orientation.flipped();
        }
    }
}
