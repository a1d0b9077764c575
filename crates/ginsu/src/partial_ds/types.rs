//! Entity records and typed keys.
//!
//! Every cross reference is an `Option` of a generation-checked key so that
//! "absent" and "stale" are both observable by the validators.

use crate::kernel::Point3;

slotmap::new_key_type! {
    /// Geometric point of the mesh.
    pub struct VertexId;
    /// One use of a vertex by an edge end.
    pub struct PVertexId;
    /// Topological edge between two p-vertices (equal for a degenerate edge).
    pub struct EdgeId;
    /// One use of an edge by a loop.
    pub struct PEdgeId;
    pub struct LoopId;
    pub struct FaceId;
    pub struct ShellId;
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub(crate) point: Point3,
    pub(crate) parent_pvertex: Option<PVertexId>,
}

#[derive(Clone, Debug, Default)]
pub struct PVertex {
    pub(crate) vertex: Option<VertexId>,
    pub(crate) parent_edge: Option<EdgeId>,
    /// Next p-vertex of the same vertex (cyclic).
    pub(crate) next: Option<PVertexId>,
}

#[derive(Clone, Debug, Default)]
pub struct Edge {
    pub(crate) parent_pedge: Option<PEdgeId>,
    pub(crate) start: Option<PVertexId>,
    pub(crate) end: Option<PVertexId>,
}

/// Direction in which a p-edge traverses its edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PEdgeOrientation {
    /// Start to end.
    Forward,
    /// End to start.
    Reversed,
    /// Degenerate edge (isolated vertex); behaves like `Forward`.
    #[default]
    Unoriented,
}

impl PEdgeOrientation {
    pub fn flipped(self) -> Self {
        match self {
            PEdgeOrientation::Forward => PEdgeOrientation::Reversed,
            PEdgeOrientation::Reversed => PEdgeOrientation::Forward,
            PEdgeOrientation::Unoriented => PEdgeOrientation::Unoriented,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PEdge {
    pub(crate) orientation: PEdgeOrientation,
    pub(crate) child_edge: Option<EdgeId>,
    pub(crate) parent_loop: Option<LoopId>,
    pub(crate) loop_prev: Option<PEdgeId>,
    pub(crate) loop_next: Option<PEdgeId>,
    pub(crate) radial_prev: Option<PEdgeId>,
    pub(crate) radial_next: Option<PEdgeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Loop {
    pub(crate) parent_face: Option<FaceId>,
    pub(crate) boundary_pedge: Option<PEdgeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Face {
    pub(crate) outer_loop: Option<LoopId>,
    pub(crate) parent_shell: Option<ShellId>,
    /// Neighbors in the shell's cyclic face chain.
    pub(crate) next_face: Option<FaceId>,
    pub(crate) prev_face: Option<FaceId>,
}

#[derive(Clone, Debug, Default)]
pub struct Shell {
    pub(crate) face: Option<FaceId>,
}

/// Debug rendering of a key for diagnostics.
pub(crate) fn key_str<K: std::fmt::Debug>(k: K) -> String {
    format!("{k:?}")
}
