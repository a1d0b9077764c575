//! Structural consistency checks.
//!
//! `check_*` report the first violated invariant; `validate_*` wrap them into
//! a bool and log the violation. Chain walks are bounded by the arena size, so
//! a corrupted cycle is reported as `NonClosingChain` rather than hanging.
//! Checks only read: they never repair.

use super::types::{key_str, EdgeId, FaceId, LoopId, PEdgeId, PVertexId, ShellId, VertexId};
use super::PartialDs;
use crate::cfg::ValidationMode;
use crate::error::{EntityKind, InvariantError};

fn missing<K: std::fmt::Debug>(kind: EntityKind, id: K, link: &'static str) -> InvariantError {
    InvariantError::MissingLink {
        kind,
        id: key_str(id),
        link,
    }
}

fn broken<K: std::fmt::Debug>(kind: EntityKind, id: K, link: &'static str) -> InvariantError {
    InvariantError::BrokenBackLink {
        kind,
        id: key_str(id),
        link,
    }
}

fn non_closing<K: std::fmt::Debug>(
    kind: EntityKind,
    id: K,
    link: &'static str,
    steps: usize,
) -> InvariantError {
    InvariantError::NonClosingChain {
        kind,
        id: key_str(id),
        link,
        steps,
    }
}

fn report(what: &'static str, r: Result<(), InvariantError>) -> bool {
    match r {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(%err, "{what} failed");
            false
        }
    }
}

/// Entities a mutation created or relinked; checked after the write.
#[derive(Default, Debug)]
pub(crate) struct Touched {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
    pub loops: Vec<LoopId>,
    pub faces: Vec<FaceId>,
    pub shells: Vec<ShellId>,
}

impl PartialDs {
    /// The vertex's p-vertex chain is present, closes, and only holds
    /// p-vertices of this vertex.
    pub fn check_vertex(&self, v: VertexId) -> Result<(), InvariantError> {
        let vd = self.vertex_data(v)?;
        let start = vd
            .parent_pvertex
            .ok_or_else(|| missing(EntityKind::Vertex, v, "parent p-vertex"))?;
        let bound = self.pvertices.len() + 1;
        let mut pv = start;
        for _ in 0..bound {
            let pvd = self.pvertex_data(pv)?;
            if pvd.vertex != Some(v) {
                return Err(InvariantError::ForeignPVertex {
                    vertex: key_str(v),
                    pvertex: key_str(pv),
                    found: pvd.vertex.map_or_else(|| "nothing".to_string(), key_str),
                });
            }
            match pvd.next {
                None => return Err(missing(EntityKind::PVertex, pv, "next p-vertex")),
                Some(n) if n == start => return Ok(()),
                Some(n) => pv = n,
            }
        }
        Err(non_closing(EntityKind::Vertex, v, "p-vertex", bound))
    }

    pub fn validate_vertex(&self, v: VertexId) -> bool {
        report("vertex validation", self.check_vertex(v))
    }

    /// The p-vertex's edge uses it as an end, and its vertex's chain contains it.
    pub fn check_pvertex(&self, pv: PVertexId) -> Result<(), InvariantError> {
        let pvd = self.pvertex_data(pv)?;
        let e = pvd
            .parent_edge
            .ok_or_else(|| missing(EntityKind::PVertex, pv, "parent edge"))?;
        let ed = self.edge_data(e)?;
        if ed.start != Some(pv) && ed.end != Some(pv) {
            return Err(broken(EntityKind::PVertex, pv, "parent edge"));
        }
        let v = pvd
            .vertex
            .ok_or_else(|| missing(EntityKind::PVertex, pv, "vertex"))?;
        self.vertex_data(v)?;
        if !self.pvertices_around(v).any(|c| c == pv) {
            return Err(broken(EntityKind::PVertex, pv, "vertex chain"));
        }
        Ok(())
    }

    pub fn validate_pvertex(&self, pv: PVertexId) -> bool {
        report("p-vertex validation", self.check_pvertex(pv))
    }

    /// Parent p-edge and both end p-vertices exist and refer back to the edge.
    pub fn check_edge(&self, e: EdgeId) -> Result<(), InvariantError> {
        let ed = self.edge_data(e)?;
        let pe = ed
            .parent_pedge
            .ok_or_else(|| missing(EntityKind::Edge, e, "parent p-edge"))?;
        if self.pedge_data(pe)?.child_edge != Some(e) {
            return Err(broken(EntityKind::Edge, e, "parent p-edge"));
        }
        for (pv, link) in [(ed.start, "start p-vertex"), (ed.end, "end p-vertex")] {
            let pv = pv.ok_or_else(|| missing(EntityKind::Edge, e, link))?;
            if self.pvertex_data(pv)?.parent_edge != Some(e) {
                return Err(broken(EntityKind::Edge, e, link));
            }
        }
        Ok(())
    }

    pub fn validate_edge(&self, e: EdgeId) -> bool {
        report("edge validation", self.check_edge(e))
    }

    /// Radial cycle through the p-edge closes with consistent back links and a
    /// single child edge; the parent loop exists and contains the p-edge.
    pub fn check_pedge(&self, pe: PEdgeId) -> Result<(), InvariantError> {
        let pd = self.pedge_data(pe)?;
        let e = pd
            .child_edge
            .ok_or_else(|| missing(EntityKind::PEdge, pe, "child edge"))?;
        self.edge_data(e)?;
        let bound = self.pedges.len() + 1;
        let mut cur = pe;
        let mut closed = false;
        for _ in 0..bound {
            let cd = self.pedge_data(cur)?;
            if cd.child_edge != Some(e) {
                return Err(broken(EntityKind::PEdge, cur, "radial cycle edge"));
            }
            let next = cd
                .radial_next
                .ok_or_else(|| missing(EntityKind::PEdge, cur, "radial next"))?;
            if self.pedge_data(next)?.radial_prev != Some(cur) {
                return Err(broken(EntityKind::PEdge, next, "radial prev"));
            }
            if next == pe {
                closed = true;
                break;
            }
            cur = next;
        }
        if !closed {
            return Err(non_closing(EntityKind::PEdge, pe, "radial", bound));
        }
        if !self.pedges_around_edge(e).any(|c| c == pe) {
            return Err(broken(EntityKind::PEdge, pe, "child edge"));
        }
        let l = pd
            .parent_loop
            .ok_or_else(|| missing(EntityKind::PEdge, pe, "parent loop"))?;
        self.loop_data(l)?;
        if !self.pedges_of_loop(l).any(|c| c == pe) {
            return Err(broken(EntityKind::PEdge, pe, "parent loop"));
        }
        Ok(())
    }

    pub fn validate_pedge(&self, pe: PEdgeId) -> bool {
        report("p-edge validation", self.check_pedge(pe))
    }

    /// Loop chain closes with consistent back links; consecutive p-edges meet
    /// at a shared vertex; the parent face refers back to the loop.
    pub fn check_loop(&self, l: LoopId) -> Result<(), InvariantError> {
        let ld = self.loop_data(l)?;
        let start = ld
            .boundary_pedge
            .ok_or_else(|| missing(EntityKind::Loop, l, "boundary p-edge"))?;
        let bound = self.pedges.len() + 1;
        let mut cur = start;
        let mut closed = false;
        for _ in 0..bound {
            let cd = self.pedge_data(cur)?;
            if cd.parent_loop != Some(l) {
                return Err(broken(EntityKind::PEdge, cur, "parent loop"));
            }
            let next = cd
                .loop_next
                .ok_or_else(|| missing(EntityKind::PEdge, cur, "loop next"))?;
            if self.pedge_data(next)?.loop_prev != Some(cur) {
                return Err(broken(EntityKind::PEdge, next, "loop prev"));
            }
            let end_v = self.pedge_end_vertex(cur);
            if end_v.is_none() || end_v != self.pedge_start_vertex(next) {
                return Err(InvariantError::DisconnectedLoop {
                    id: key_str(l),
                    pedge: key_str(cur),
                });
            }
            if next == start {
                closed = true;
                break;
            }
            cur = next;
        }
        if !closed {
            return Err(non_closing(EntityKind::Loop, l, "p-edge", bound));
        }
        let f = ld
            .parent_face
            .ok_or_else(|| missing(EntityKind::Loop, l, "parent face"))?;
        if self.face_data(f)?.outer_loop != Some(l) {
            return Err(broken(EntityKind::Loop, l, "parent face"));
        }
        Ok(())
    }

    pub fn validate_loop(&self, l: LoopId) -> bool {
        report("loop validation", self.check_loop(l))
    }

    /// Outer loop refers back; the face sits in its shell's chain with
    /// consistent neighbors.
    pub fn check_face(&self, f: FaceId) -> Result<(), InvariantError> {
        let fd = self.face_data(f)?;
        let l = fd
            .outer_loop
            .ok_or_else(|| missing(EntityKind::Face, f, "outer loop"))?;
        if self.loop_data(l)?.parent_face != Some(f) {
            return Err(broken(EntityKind::Face, f, "outer loop"));
        }
        let s = fd
            .parent_shell
            .ok_or_else(|| missing(EntityKind::Face, f, "parent shell"))?;
        self.shell_data(s)?;
        let next = fd
            .next_face
            .ok_or_else(|| missing(EntityKind::Face, f, "next face"))?;
        if self.face_data(next)?.prev_face != Some(f) {
            return Err(broken(EntityKind::Face, next, "prev face"));
        }
        if !self.faces_of_shell(s).any(|c| c == f) {
            return Err(broken(EntityKind::Face, f, "parent shell"));
        }
        Ok(())
    }

    pub fn validate_face(&self, f: FaceId) -> bool {
        report("face validation", self.check_face(f))
    }

    /// The shell's face chain closes and every face in it names this shell.
    pub fn check_shell(&self, s: ShellId) -> Result<(), InvariantError> {
        let sd = self.shell_data(s)?;
        let Some(start) = sd.face else {
            return Ok(());
        };
        let bound = self.faces.len() + 1;
        let mut cur = start;
        for _ in 0..bound {
            let cd = self.face_data(cur)?;
            if cd.parent_shell != Some(s) {
                return Err(broken(EntityKind::Face, cur, "parent shell"));
            }
            match cd.next_face {
                None => return Err(missing(EntityKind::Face, cur, "next face")),
                Some(n) if n == start => return Ok(()),
                Some(n) => cur = n,
            }
        }
        Err(non_closing(EntityKind::Shell, s, "face", bound))
    }

    pub fn validate_shell(&self, s: ShellId) -> bool {
        report("shell validation", self.check_shell(s))
    }

    /// Every check over every entity, then that no vertex is shared between
    /// shells. Stops at the first violation.
    pub fn validate(&self) -> Result<(), InvariantError> {
        for v in self.vertices.keys() {
            self.check_vertex(v)?;
        }
        for pv in self.pvertices.keys() {
            self.check_pvertex(pv)?;
        }
        for e in self.edges.keys() {
            self.check_edge(e)?;
        }
        for pe in self.pedges.keys() {
            self.check_pedge(pe)?;
        }
        for l in self.loops.keys() {
            self.check_loop(l)?;
        }
        for f in self.faces.keys() {
            self.check_face(f)?;
        }
        for s in self.shells.keys() {
            self.check_shell(s)?;
        }
        // A connected component lives in one shell.
        for v in self.vertices.keys() {
            let shells = self.vertex_shells(v).len();
            if shells > 1 {
                return Err(InvariantError::SplitComponent {
                    vertex: key_str(v),
                    shells,
                });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        report("mesh validation", self.validate())
    }

    fn check_touched(&self, t: &Touched) -> Result<(), InvariantError> {
        for &v in &t.vertices {
            self.check_vertex(v)?;
            for pv in self.pvertices_around(v) {
                self.check_pvertex(pv)?;
            }
        }
        for &e in &t.edges {
            self.check_edge(e)?;
            for pe in self.pedges_around_edge(e) {
                self.check_pedge(pe)?;
            }
        }
        for &l in &t.loops {
            self.check_loop(l)?;
        }
        for &f in &t.faces {
            self.check_face(f)?;
        }
        for &s in &t.shells {
            self.check_shell(s)?;
        }
        Ok(())
    }

    /// Post-mutation hook. A violation here is a bug in the mutator, not bad
    /// input, so it panics.
    pub(crate) fn after_mutation(&self, op: &'static str, touched: Touched) {
        let result = match self.cfg().validation {
            ValidationMode::Off => return,
            ValidationMode::Touched => self.check_touched(&touched),
            ValidationMode::Exhaustive => self.validate(),
        };
        if let Err(err) = result {
            panic!("{op} left the mesh inconsistent: {err}");
        }
    }
}
