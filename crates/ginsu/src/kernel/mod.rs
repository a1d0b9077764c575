//! Exact kernel: number type, predicates, planes/boxes and affine transforms.
//!
//! Purpose
//! - One exact number type (`Rat`, arbitrary-precision rationals) so that every
//!   orientation, side and equality test the mesh and boolean code asks is
//!   answered exactly. There are no epsilons anywhere in the crate.
//! - Points and vectors are nalgebra `Vector3<Rat>`; transforms keep the
//!   `{ m, t }` layout of a plain affine map.
//!
//! Notes
//! - `Rat` is not `Copy`; predicates take references.
//! - Conversions to floats (`to_f64`, `point_to_f32`) exist only for output.

mod number;
mod predicates;
mod transform;
mod types;

pub use number::{
    checked_rat, from_f32, from_f64, int, is_zero_vec, origin, point, point_from_f64, point_rat,
    point_to_f32, point_to_f64, rat, scale, to_f64, Point3, Rat, Vec3,
};
pub(crate) use number::point_key;
pub use predicates::{
    are_ordered_along_line, area_vector, collinear, compare_squared_distance, coplanar,
    is_convex_about, normal, orient3d, orientation, orientation_xy, squared_distance,
    strictly_between, Sign,
};
pub use transform::AffineTransform;
pub use types::{Aabb3, Plane3};

#[cfg(test)]
mod tests;
