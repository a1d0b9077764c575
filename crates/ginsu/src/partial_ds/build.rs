//! Import of indexed polygon soups.

use std::collections::HashMap;

use super::types::{ShellId, VertexId};
use super::PartialDs;
use crate::cfg::MeshCfg;
use crate::error::TopologyError;
use crate::kernel::{point_key, Point3};

/// Disjoint-set forest over polygon indices.
struct Components {
    parent: Vec<usize>,
}

impl Components {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

impl PartialDs {
    /// Builds a mesh from polygons given as point loops (loop order = face
    /// orientation). Exactly equal points are welded into one vertex; faces
    /// that share a vertex land in the same shell.
    ///
    /// Fails without building anything if a polygon has fewer than 3 points
    /// or repeats a point.
    pub fn from_polygons(polys: &[Vec<Point3>], cfg: MeshCfg) -> Result<PartialDs, TopologyError> {
        let mut ids: HashMap<_, usize> = HashMap::new();
        let mut points: Vec<&Point3> = Vec::new();
        let mut indexed: Vec<Vec<usize>> = Vec::with_capacity(polys.len());
        for poly in polys {
            if poly.len() < 3 {
                return Err(TopologyError::TooFewVertices(poly.len()));
            }
            let mut idx = Vec::with_capacity(poly.len());
            for p in poly {
                let i = *ids.entry(point_key(p)).or_insert_with(|| {
                    points.push(p);
                    points.len() - 1
                });
                if idx.contains(&i) {
                    return Err(TopologyError::RepeatedVertex(format!("point #{i}")));
                }
                idx.push(i);
            }
            indexed.push(idx);
        }

        let mut comps = Components::new(polys.len());
        let mut first_use: Vec<Option<usize>> = vec![None; points.len()];
        for (fi, idx) in indexed.iter().enumerate() {
            for &i in idx {
                match first_use[i] {
                    Some(other) => comps.union(other, fi),
                    None => first_use[i] = Some(fi),
                }
            }
        }

        let mut ds = PartialDs::with_cfg(cfg);
        let vids: Vec<VertexId> = points.iter().map(|p| ds.alloc_vertex((*p).clone())).collect();
        let mut shells: HashMap<usize, ShellId> = HashMap::new();
        for (fi, idx) in indexed.iter().enumerate() {
            let root = comps.find(fi);
            let shell = *shells.entry(root).or_insert_with(|| ds.shells.insert(Default::default()));
            let verts: Vec<VertexId> = idx.iter().map(|&i| vids[i]).collect();
            ds.make_face_unchecked(shell, &verts);
        }
        tracing::debug!(
            faces = ds.face_count(),
            vertices = ds.vertex_count(),
            shells = ds.shell_count(),
            "from_polygons"
        );
        Ok(ds)
    }
}
