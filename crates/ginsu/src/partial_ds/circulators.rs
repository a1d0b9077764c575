//! Bounded cyclic traversals.
//!
//! A circulator starts at a chain's entry, follows one link kind and stops
//! exactly when it would return to the entry. On a corrupted chain (a missing
//! link, or a cycle that never returns to the entry) it stops after at most
//! as many steps as the arena has entries instead of spinning. Circulators
//! are `Clone`; cloning before iteration restarts the traversal.

use slotmap::Key;

use super::types::{EdgeId, FaceId, LoopId, PEdgeId, PVertexId, ShellId, VertexId};
use super::PartialDs;

/// Cyclic walk over entities of one kind, yielding keys in link order.
#[derive(Clone)]
pub struct Circulator<'a, K: Key> {
    ds: &'a PartialDs,
    start: Option<K>,
    current: Option<K>,
    step: fn(&PartialDs, K) -> Option<K>,
    remaining: usize,
}

impl<'a, K: Key> Circulator<'a, K> {
    fn new(
        ds: &'a PartialDs,
        start: Option<K>,
        step: fn(&PartialDs, K) -> Option<K>,
        bound: usize,
    ) -> Self {
        Self {
            ds,
            start,
            current: start,
            step,
            remaining: bound,
        }
    }

    /// The entry the walk starts from.
    pub fn start(&self) -> Option<K> {
        self.start
    }
}

impl<K: Key> Iterator for Circulator<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let cur = self.current?;
        if self.remaining == 0 {
            tracing::trace!(start = ?self.start, "circulator hit its step bound");
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        self.current = (self.step)(self.ds, cur).filter(|&n| Some(n) != self.start);
        Some(cur)
    }
}

/// P-vertices of one vertex.
pub type PVertexAroundVertex<'a> = Circulator<'a, PVertexId>;
/// P-edges of one loop, in loop (orientation) order.
pub type PEdgeAroundLoop<'a> = Circulator<'a, PEdgeId>;
/// P-edges using one edge (radial order).
pub type PEdgeAroundEdge<'a> = Circulator<'a, PEdgeId>;
/// Faces of one shell.
pub type FacesOfShell<'a> = Circulator<'a, FaceId>;

fn pvertex_next(ds: &PartialDs, pv: PVertexId) -> Option<PVertexId> {
    ds.pvertices.get(pv)?.next
}

fn loop_next(ds: &PartialDs, pe: PEdgeId) -> Option<PEdgeId> {
    ds.pedges.get(pe)?.loop_next
}

fn radial_next(ds: &PartialDs, pe: PEdgeId) -> Option<PEdgeId> {
    ds.pedges.get(pe)?.radial_next
}

fn face_next(ds: &PartialDs, f: FaceId) -> Option<FaceId> {
    ds.faces.get(f)?.next_face
}

impl PartialDs {
    pub fn pvertices_around(&self, v: VertexId) -> PVertexAroundVertex<'_> {
        let start = self.vertices.get(v).and_then(|d| d.parent_pvertex);
        Circulator::new(self, start, pvertex_next, self.pvertices.len())
    }

    pub fn pedges_of_loop(&self, l: LoopId) -> PEdgeAroundLoop<'_> {
        let start = self.loops.get(l).and_then(|d| d.boundary_pedge);
        Circulator::new(self, start, loop_next, self.pedges.len())
    }

    pub fn pedges_around_edge(&self, e: EdgeId) -> PEdgeAroundEdge<'_> {
        let start = self.edges.get(e).and_then(|d| d.parent_pedge);
        Circulator::new(self, start, radial_next, self.pedges.len())
    }

    pub fn faces_of_shell(&self, s: ShellId) -> FacesOfShell<'_> {
        let start = self.shells.get(s).and_then(|d| d.face);
        Circulator::new(self, start, face_next, self.faces.len())
    }
}
