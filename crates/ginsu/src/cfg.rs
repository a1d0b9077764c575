//! Configuration for mesh validation and boolean operations.
//!
//! Policy
//! - Everything is exact, so there are no tolerances to tune. What remains are
//!   switches for how much checking runs and which boolean clean-up passes run.
//! - Defaults follow the build: checked builds (`debug_assertions`) validate,
//!   optimized builds skip it.

/// Segment count used by `Solid::truncated_cone` callers that do not care.
pub const DEFAULT_CONE_SEGMENTS: usize = 20;

/// Denominator used when snapping `tan(θ/2)` to a rational for circle points.
pub(crate) const CIRCLE_PARAM_DENOM: i64 = 1 << 16;

/// How much structural checking a mutator runs after it writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// No checks.
    Off,
    /// Check the entities the mutator created or relinked.
    Touched,
    /// Check the whole structure after every mutation (slow; for debugging).
    Exhaustive,
}

impl Default for ValidationMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ValidationMode::Touched
        } else {
            ValidationMode::Off
        }
    }
}

/// Mesh configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshCfg {
    pub validation: ValidationMode,
}

impl MeshCfg {
    /// Every mutation re-validates the entire mesh.
    pub fn exhaustive() -> Self {
        Self {
            validation: ValidationMode::Exhaustive,
        }
    }
}

/// Boolean operation configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BooleanCfg {
    /// Re-merge coplanar fragments of the same input face.
    pub merge_fragments: bool,
    /// Insert result vertices that lie inside another polygon's edge.
    pub repair_t_junctions: bool,
    /// Validate operands and result structurally.
    pub validate: bool,
    /// Mesh configuration of the result.
    pub mesh: MeshCfg,
}

impl Default for BooleanCfg {
    fn default() -> Self {
        Self {
            merge_fragments: true,
            repair_t_junctions: true,
            validate: cfg!(debug_assertions),
            mesh: MeshCfg::default(),
        }
    }
}
