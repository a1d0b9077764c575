//! Curated flat re-exports.
//!
//! Prefer these in callers (the CLI, benches, demos) over deep module paths.

// Configuration and errors
pub use crate::cfg::{BooleanCfg, MeshCfg, ValidationMode, DEFAULT_CONE_SEGMENTS};
pub use crate::error::{
    BooleanError, EntityKind, InvariantError, Operand, SolidError, TopologyError,
};
// Exact kernel
pub use crate::kernel::{
    checked_rat, collinear, coplanar, from_f32, from_f64, int, orient3d, orientation, point, point_from_f64,
    point_rat, point_to_f32, point_to_f64, rat, to_f64, Aabb3, AffineTransform, Plane3, Point3, Rat, Sign,
    Vec3,
};
// Mesh
pub use crate::partial_ds::{
    EdgeId, EdgeRef, FaceId, FaceRef, LoopId, LoopRef, PEdgeId, PEdgeOrientation, PEdgeRef,
    PVertexId, PVertexRef, PartialDs, ShellId, ShellRef, VertexId, VertexMut, VertexRef,
};
// Solids
pub use crate::solid::{BooleanOp, Containment, Solid, MAX_CONE_SEGMENTS};
// Output and sampling
pub use crate::render::RenderBuffer;
pub use crate::sample::{
    random_cuboid, random_point, random_rotation, random_tetrahedron, GridCfg, ReplayToken,
};
pub use crate::VERSION;
