//! Flat-shaded triangle buffers for a renderer.
//!
//! Every non-degenerate face is fan triangulated from its first vertex, in
//! loop order, with its own copy of the positions so that each face carries
//! one normal. Coordinates are rounded to `f32` here and nowhere else.

use crate::kernel::{point_to_f32, to_f64};
use crate::partial_ds::PartialDs;
use crate::solid::Solid;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderBuffer {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl RenderBuffer {
    pub fn from_mesh(ds: &PartialDs) -> Self {
        let mut buf = RenderBuffer::default();
        for f in ds.solid_face_ids() {
            let pts = ds.face_points(f);
            let Some(plane) = ds.face_plane(f) else {
                continue;
            };
            let n = [to_f64(&plane.n.x), to_f64(&plane.n.y), to_f64(&plane.n.z)];
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            let normal = n.map(|c| (c / len) as f32);
            let base = buf.positions.len() as u32;
            for p in &pts {
                buf.positions.push(point_to_f32(p));
                buf.normals.push(normal);
            }
            for i in 1..pts.len().saturating_sub(1) as u32 {
                buf.indices.extend([base, base + i, base + i + 1]);
            }
        }
        tracing::debug!(
            vertices = buf.positions.len(),
            triangles = buf.triangle_count(),
            "render buffer"
        );
        buf
    }

    pub fn from_solid(solid: &Solid) -> Self {
        Self::from_mesh(solid.mesh())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::point;

    #[test]
    fn cube_has_twelve_triangles() {
        let buf = RenderBuffer::from_solid(&Solid::unit_cube().unwrap());
        assert_eq!(buf.triangle_count(), 12);
        assert_eq!(buf.positions.len(), 24);
        assert_eq!(buf.normals.len(), buf.positions.len());
        assert!(buf.indices.iter().all(|&i| (i as usize) < buf.positions.len()));
        for n in &buf.normals {
            let len2: f32 = n.iter().map(|c| c * c).sum();
            assert!((len2 - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn triangles_wind_like_their_face() {
        let s = Solid::cuboid(&point(0, 0, 0), &point(2, 3, 4)).unwrap();
        let buf = RenderBuffer::from_solid(&s);
        for tri in buf.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| buf.positions[i as usize]);
            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cross = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];
            let n = buf.normals[tri[0] as usize];
            let dot: f32 = (0..3).map(|k| cross[k] * n[k]).sum();
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn wire_only_mesh_renders_nothing() {
        let mut ds = PartialDs::new();
        let s = ds.create_shell();
        let v = ds.create_isolated_vertex(s, point(0, 0, 0)).unwrap();
        ds.create_wire_edge_and_vertex(s, v, point(1, 0, 0)).unwrap();
        assert!(RenderBuffer::from_mesh(&ds).is_empty());
    }
}
