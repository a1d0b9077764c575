//! Error types.
//!
//! - `InvariantError`: a structural check found a broken link (validation only).
//! - `TopologyError`: a mutator refused its input; the mesh is unchanged.
//! - `SolidError`: polygon input or parameters for a solid were unusable.
//! - `BooleanError`: an operand or the result of a boolean failed.
//!
//! Degenerate geometry in predicates is never an error (it answers `Sign::Zero`).

use std::fmt;

use thiserror::Error;

/// Entity kind tag used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Vertex,
    PVertex,
    Edge,
    PEdge,
    Loop,
    Face,
    Shell,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Vertex => "vertex",
            EntityKind::PVertex => "p-vertex",
            EntityKind::Edge => "edge",
            EntityKind::PEdge => "p-edge",
            EntityKind::Loop => "loop",
            EntityKind::Face => "face",
            EntityKind::Shell => "shell",
        };
        f.write_str(name)
    }
}

/// A violated structural invariant of the partial-entity mesh.
///
/// Entity ids are carried as their debug rendering (`VertexId(3v1)`), which
/// includes the slot generation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("{kind} handle {id} is stale or was never allocated")]
    Dangling { kind: EntityKind, id: String },
    #[error("{kind} {id} has no {link} reference")]
    MissingLink {
        kind: EntityKind,
        id: String,
        link: &'static str,
    },
    #[error("{kind} {id}: {link} does not refer back to it")]
    BrokenBackLink {
        kind: EntityKind,
        id: String,
        link: &'static str,
    },
    #[error("{kind} {id}: {link} chain does not close within {steps} steps")]
    NonClosingChain {
        kind: EntityKind,
        id: String,
        link: &'static str,
        steps: usize,
    },
    #[error("p-vertex {pvertex} in the chain of vertex {vertex} belongs to {found}")]
    ForeignPVertex {
        vertex: String,
        pvertex: String,
        found: String,
    },
    #[error("loop {id}: p-edge {pedge} ends where its successor does not start")]
    DisconnectedLoop { id: String, pedge: String },
    #[error("vertex {vertex} is used by faces of {shells} shells")]
    SplitComponent { vertex: String, shells: usize },
}

/// A mutator precondition failed. Nothing was written.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error(transparent)]
    Invariant(#[from] InvariantError),
    #[error("vertex {0} is not isolated")]
    NotIsolated(String),
    #[error("vertex {0} is isolated")]
    Isolated(String),
    #[error("edge {0} is not a wire edge")]
    NotWireEdge(String),
    #[error("edge {0} is degenerate")]
    DegenerateEdge(String),
    #[error("vertex {vertex} is not an end of edge {edge}")]
    NotIncident { vertex: String, edge: String },
    #[error("vertex {vertex} has {degree} edge ends, expected {expected}")]
    WrongDegree {
        vertex: String,
        degree: usize,
        expected: usize,
    },
    #[error("edges {0} and {1} cannot be joined: their face uses differ")]
    NotJoinable(String, String),
    #[error("a face needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("vertex {0} appears twice in the face cycle")]
    RepeatedVertex(String),
    #[error("shell {0} still has faces")]
    ShellNotEmpty(String),
    #[error("vertex {vertex} lives in a different shell than {shell}")]
    ForeignShell { vertex: String, shell: String },
    #[error("face {0} is degenerate; use the vertex/wire-edge operations")]
    DegenerateFace(String),
}

/// Unusable input for a solid constructor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolidError {
    #[error("polygon {index} has fewer than 3 vertices")]
    TooFewVertices { index: usize },
    #[error("polygon {index} repeats a vertex")]
    RepeatedVertex { index: usize },
    #[error("polygon {index} has zero area")]
    Degenerate { index: usize },
    #[error("polygon {index} is not planar")]
    NonPlanar { index: usize },
    #[error("polygon {index} is not convex")]
    NonConvex { index: usize },
    #[error("polygons do not form a closed oriented surface")]
    NotClosed,
    #[error("polygons enclose negative volume (faces point inward)")]
    InsideOut,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("singular transform (determinant is zero)")]
    SingularTransform,
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Which side of a boolean operation an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Left,
    Right,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Left => f.write_str("left"),
            Operand::Right => f.write_str("right"),
        }
    }
}

/// Failure of a boolean operation. The operands are never modified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BooleanError {
    #[error("{side} operand is inconsistent: {source}")]
    InvalidOperand {
        side: Operand,
        source: InvariantError,
    },
    #[error("building the result failed: {0}")]
    Construction(#[from] SolidError),
    #[error("result failed validation: {0}")]
    InvalidResult(InvariantError),
}
