//! Low-level link surgery shared by the Euler operations.
//!
//! These helpers assume their arguments are live; callers check preconditions
//! first and only then start writing.

use super::types::{
    Edge, EdgeId, Face, FaceId, Loop, LoopId, PEdge, PEdgeId, PEdgeOrientation, PVertex,
    PVertexId, ShellId, Vertex, VertexId,
};
use super::PartialDs;
use crate::kernel::Point3;

impl PartialDs {
    /// New vertex with an empty p-vertex chain. Must receive a p-vertex before
    /// the mutation ends.
    pub(crate) fn alloc_vertex(&mut self, point: Point3) -> VertexId {
        self.vertices.insert(Vertex {
            point,
            parent_pvertex: None,
        })
    }

    /// New p-vertex of `v`, spliced into `v`'s chain after its parent p-vertex.
    pub(crate) fn attach_pvertex(&mut self, v: VertexId, edge: Option<EdgeId>) -> PVertexId {
        let pv = self.pvertices.insert(PVertex {
            vertex: Some(v),
            parent_edge: edge,
            next: None,
        });
        match self.vertices[v].parent_pvertex {
            Some(head) => {
                let after = self.pvertices[head].next;
                self.pvertices[pv].next = after;
                self.pvertices[head].next = Some(pv);
            }
            None => {
                self.pvertices[pv].next = Some(pv);
                self.vertices[v].parent_pvertex = Some(pv);
            }
        }
        pv
    }

    /// Unlinks `pv` from its vertex chain and frees it. Returns the vertex if
    /// that left it without p-vertices.
    pub(crate) fn detach_pvertex(&mut self, pv: PVertexId) -> Option<VertexId> {
        let rec = self.pvertices.remove(pv)?;
        let v = rec.vertex?;
        let next = rec.next.filter(|&n| n != pv);
        // Walk forward from the successor to find the predecessor.
        let mut cur = next;
        let mut pred = None;
        for _ in 0..=self.pvertices.len() {
            let Some(c) = cur else { break };
            let Some(cd) = self.pvertices.get(c) else { break };
            if cd.next == Some(pv) {
                pred = Some(c);
                break;
            }
            cur = cd.next;
        }
        if let Some(p) = pred {
            self.pvertices[p].next = next;
        }
        let vd = self.vertices.get_mut(v)?;
        if vd.parent_pvertex == Some(pv) {
            vd.parent_pvertex = next;
        }
        vd.parent_pvertex.is_none().then_some(v)
    }

    pub(crate) fn alloc_edge(&mut self, start: PVertexId, end: PVertexId) -> EdgeId {
        let e = self.edges.insert(Edge {
            parent_pedge: None,
            start: Some(start),
            end: Some(end),
        });
        self.pvertices[start].parent_edge = Some(e);
        self.pvertices[end].parent_edge = Some(e);
        e
    }

    pub(crate) fn alloc_pedge(&mut self, e: EdgeId, orientation: PEdgeOrientation) -> PEdgeId {
        self.pedges.insert(PEdge {
            orientation,
            child_edge: Some(e),
            ..PEdge::default()
        })
    }

    /// Inserts `pe` into the radial cycle of `e`, after `after` (or after the
    /// edge's parent p-edge).
    pub(crate) fn link_radial(&mut self, e: EdgeId, pe: PEdgeId, after: Option<PEdgeId>) {
        let anchor = after.or(self.edges[e].parent_pedge);
        match anchor {
            Some(a) => {
                let next = self.pedges[a].radial_next.unwrap_or(a);
                self.pedges[pe].radial_prev = Some(a);
                self.pedges[pe].radial_next = Some(next);
                self.pedges[a].radial_next = Some(pe);
                self.pedges[next].radial_prev = Some(pe);
            }
            None => {
                self.pedges[pe].radial_prev = Some(pe);
                self.pedges[pe].radial_next = Some(pe);
                self.edges[e].parent_pedge = Some(pe);
            }
        }
        self.pedges[pe].child_edge = Some(e);
    }

    /// Removes `pe` from its edge's radial cycle (the p-edge itself stays allocated).
    /// Returns the edge if it has no p-edges left.
    pub(crate) fn unlink_radial(&mut self, pe: PEdgeId) -> Option<EdgeId> {
        let rec = self.pedges.get(pe)?.clone();
        let e = rec.child_edge?;
        let prev = rec.radial_prev.filter(|&p| p != pe);
        let next = rec.radial_next.filter(|&n| n != pe);
        if let (Some(p), Some(n)) = (prev, next) {
            self.pedges[p].radial_next = Some(n);
            self.pedges[n].radial_prev = Some(p);
        }
        let pd = &mut self.pedges[pe];
        pd.radial_prev = None;
        pd.radial_next = None;
        let ed = self.edges.get_mut(e)?;
        if ed.parent_pedge == Some(pe) {
            ed.parent_pedge = next;
        }
        ed.parent_pedge.is_none().then_some(e)
    }

    /// Links `pes` into a new cyclic loop in the given order.
    pub(crate) fn alloc_loop(&mut self, pes: &[PEdgeId]) -> LoopId {
        let l = self.loops.insert(Loop::default());
        self.relink_loop(l, pes);
        l
    }

    /// Makes `pes` (non-empty) the whole cycle of `l`, in order.
    pub(crate) fn relink_loop(&mut self, l: LoopId, pes: &[PEdgeId]) {
        self.loops[l].boundary_pedge = pes.first().copied();
        let k = pes.len();
        for (i, &pe) in pes.iter().enumerate() {
            let pd = &mut self.pedges[pe];
            pd.parent_loop = Some(l);
            pd.loop_next = Some(pes[(i + 1) % k]);
            pd.loop_prev = Some(pes[(i + k - 1) % k]);
        }
    }

    /// Removes and frees every use of `e`. A loop that falls apart into several
    /// closed walks keeps the first one; the others get new faces in the same
    /// shell. Loops left empty are freed with their face. Returns the loops
    /// that still exist or were created.
    pub(crate) fn strip_edge_uses(&mut self, e: EdgeId) -> Vec<LoopId> {
        let uses: Vec<PEdgeId> = self.pedges_around_edge(e).collect();
        let mut loops: Vec<LoopId> = Vec::new();
        for &pe in &uses {
            if let Some(l) = self.pedges[pe].parent_loop {
                if !loops.contains(&l) {
                    loops.push(l);
                }
            }
        }
        let mut kept = Vec::new();
        for l in loops {
            let order: Vec<PEdgeId> = self.pedges_of_loop(l).collect();
            let n = order.len();
            let Some(r0) = order.iter().position(|pe| uses.contains(pe)) else {
                continue;
            };
            // Cut the cycle at every removed use, starting just after one.
            let mut runs: Vec<Vec<PEdgeId>> = Vec::new();
            let mut run = Vec::new();
            for step in 1..=n {
                let pe = order[(r0 + step) % n];
                if uses.contains(&pe) {
                    if !run.is_empty() {
                        runs.push(std::mem::take(&mut run));
                    }
                } else {
                    run.push(pe);
                }
            }
            let face = self.loops[l].parent_face;
            let shell = face.and_then(|f| self.faces.get(f)).and_then(|f| f.parent_shell);
            let mut runs = runs.into_iter();
            match runs.next() {
                Some(first) => {
                    self.relink_loop(l, &first);
                    kept.push(l);
                }
                None => {
                    self.loops.remove(l);
                    if let Some(f) = face {
                        self.free_face(f);
                    }
                }
            }
            for extra in runs {
                let nl = self.alloc_loop(&extra);
                if let Some(s) = shell {
                    self.alloc_face(s, nl);
                }
                kept.push(nl);
            }
        }
        for pe in uses {
            self.unlink_radial(pe);
            self.pedges.remove(pe);
        }
        kept
    }

    /// Inserts `pe` into `l` directly after `anchor`.
    pub(crate) fn link_loop_after(&mut self, anchor: PEdgeId, pe: PEdgeId) {
        let next = self.pedges[anchor].loop_next.unwrap_or(anchor);
        let l = self.pedges[anchor].parent_loop;
        let pd = &mut self.pedges[pe];
        pd.parent_loop = l;
        pd.loop_prev = Some(anchor);
        pd.loop_next = Some(next);
        self.pedges[anchor].loop_next = Some(pe);
        self.pedges[next].loop_prev = Some(pe);
    }

    /// Inserts `pe` into `l` directly before `anchor`.
    pub(crate) fn link_loop_before(&mut self, anchor: PEdgeId, pe: PEdgeId) {
        let prev = self.pedges[anchor].loop_prev.unwrap_or(anchor);
        self.link_loop_after(prev, pe);
    }

    /// Removes `pe` from its loop, moving the loop's boundary reference if needed.
    pub(crate) fn unlink_loop(&mut self, pe: PEdgeId) {
        let rec = self.pedges[pe].clone();
        let prev = rec.loop_prev.filter(|&p| p != pe);
        let next = rec.loop_next.filter(|&n| n != pe);
        if let (Some(p), Some(n)) = (prev, next) {
            self.pedges[p].loop_next = Some(n);
            self.pedges[n].loop_prev = Some(p);
        }
        if let Some(l) = rec.parent_loop {
            if let Some(ld) = self.loops.get_mut(l) {
                if ld.boundary_pedge == Some(pe) {
                    ld.boundary_pedge = next;
                }
            }
        }
        let pd = &mut self.pedges[pe];
        pd.loop_prev = None;
        pd.loop_next = None;
        pd.parent_loop = None;
    }

    /// New face on loop `l`, appended to the face chain of `shell`.
    pub(crate) fn alloc_face(&mut self, shell: ShellId, l: LoopId) -> FaceId {
        let f = self.faces.insert(Face {
            outer_loop: Some(l),
            parent_shell: Some(shell),
            next_face: None,
            prev_face: None,
        });
        self.loops[l].parent_face = Some(f);
        match self.shells[shell].face {
            Some(head) => {
                let last = self.faces[head].prev_face.unwrap_or(head);
                self.faces[f].prev_face = Some(last);
                self.faces[f].next_face = Some(head);
                self.faces[last].next_face = Some(f);
                self.faces[head].prev_face = Some(f);
            }
            None => {
                self.faces[f].prev_face = Some(f);
                self.faces[f].next_face = Some(f);
                self.shells[shell].face = Some(f);
            }
        }
        f
    }

    /// Unlinks `f` from its shell's chain and frees it (its loop is untouched).
    pub(crate) fn free_face(&mut self, f: FaceId) {
        let Some(rec) = self.faces.remove(f) else {
            return;
        };
        let prev = rec.prev_face.filter(|&p| p != f);
        let next = rec.next_face.filter(|&n| n != f);
        if let (Some(p), Some(n)) = (prev, next) {
            self.faces[p].next_face = Some(n);
            self.faces[n].prev_face = Some(p);
        }
        if let Some(s) = rec.parent_shell {
            if let Some(sd) = self.shells.get_mut(s) {
                if sd.face == Some(f) {
                    sd.face = next;
                }
            }
        }
    }

    /// Frees a face together with its loop and every p-edge of the loop,
    /// unlinking the p-edges radially. Returns edges left without p-edges.
    pub(crate) fn free_face_with_loop(&mut self, f: FaceId) -> Vec<EdgeId> {
        let mut orphaned = Vec::new();
        let Some(l) = self.faces.get(f).and_then(|fd| fd.outer_loop) else {
            self.free_face(f);
            return orphaned;
        };
        let pes: Vec<PEdgeId> = self.pedges_of_loop(l).collect();
        for pe in pes {
            if let Some(e) = self.unlink_radial(pe) {
                orphaned.push(e);
            }
            self.pedges.remove(pe);
        }
        self.loops.remove(l);
        self.free_face(f);
        orphaned
    }
}
