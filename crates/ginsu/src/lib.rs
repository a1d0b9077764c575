//! Exact partial-entity solid kernel.
//!
//! Layers, bottom up:
//! - `kernel`: exact rationals, predicates, planes, boxes, affine transforms.
//! - `partial_ds`: the partial-entity mesh, its Euler-style mutators,
//!   validators, handles and circulators.
//! - `solid`: closed polyhedra, primitives, containment and booleans.
//! - `render`, `sample`: triangle buffers for display, seeded test inputs.
//!
//! API Policy
//! - Types are re-exported flat through `api` and `prelude`; module paths may
//!   move between versions.

pub mod api;
pub mod cfg;
pub mod error;
pub mod kernel;
pub mod partial_ds;
pub mod render;
pub mod sample;
pub mod solid;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{BooleanCfg, MeshCfg, ValidationMode};
    pub use crate::error::{BooleanError, InvariantError, SolidError, TopologyError};
    pub use crate::kernel::{int, point, rat, AffineTransform, Point3, Rat, Sign, Vec3};
    pub use crate::partial_ds::{EdgeId, FaceId, PartialDs, ShellId, VertexId};
    pub use crate::solid::{BooleanOp, Containment, Solid};
}
