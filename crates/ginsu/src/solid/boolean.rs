//! Union / intersection / difference of solids.
//!
//! Algorithm
//! - Both operands become BSP trees of their face polygons; the result is a
//!   fixed sequence of clip / invert / build steps on the two trees. Every
//!   split point is exact, so fragments stay in their source face's plane.
//! - Bounding boxes that do not touch (closed boxes) skip the trees.
//! - Clean-up: fragments of the same source face are glued back together
//!   where that keeps them convex, collinear points are dropped, then every
//!   result point lying inside another polygon's edge is inserted there so
//!   that shared edges pair up in the mesh.
//!
//! Coplanar faces: a face lying in the other operand's face plane counts as
//! in front when the two face the same way and behind otherwise. A union of
//! solids that share part of a face therefore keeps that part once (same
//! facing) or drops it from both sides (opposite facing, the solids touch).

use std::collections::{BTreeMap, HashSet};

use super::bsp::Node;
use super::polygon::{join_along_shared_edge, Polygon, Tag};
use super::Solid;
use crate::cfg::BooleanCfg;
use crate::error::{BooleanError, Operand, SolidError};
use crate::kernel::{compare_squared_distance, is_convex_about, point_key, strictly_between, Point3};
use crate::partial_ds::PartialDs;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Union,
    Intersection,
    Difference,
}

impl std::fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BooleanOp::Union => "union",
            BooleanOp::Intersection => "intersection",
            BooleanOp::Difference => "difference",
        })
    }
}

impl Solid {
    pub fn boolean(&self, other: &Solid, op: BooleanOp) -> Result<Solid, BooleanError> {
        self.boolean_with_cfg(other, op, BooleanCfg::default())
    }

    /// Runs `op` on copies of the operands' faces; `self` and `other` are
    /// never modified. With `cfg.validate` both operands and the result are
    /// checked structurally.
    pub fn boolean_with_cfg(
        &self,
        other: &Solid,
        op: BooleanOp,
        cfg: BooleanCfg,
    ) -> Result<Solid, BooleanError> {
        if cfg.validate {
            self.mesh
                .validate()
                .map_err(|source| BooleanError::InvalidOperand {
                    side: Operand::Left,
                    source,
                })?;
            other
                .mesh
                .validate()
                .map_err(|source| BooleanError::InvalidOperand {
                    side: Operand::Right,
                    source,
                })?;
        }
        let left = self.polygons(0);
        let right = other.polygons(left.len());
        tracing::debug!(%op, left = left.len(), right = right.len(), "boolean");

        let separate = match (self.bounding_box(), other.bounding_box()) {
            (Some(a), Some(b)) => a.is_disjoint(&b),
            _ => true,
        };
        let polys = if separate {
            tracing::debug!("boolean: operands are separated, skipping BSP");
            match op {
                BooleanOp::Union => left.into_iter().chain(right).collect(),
                BooleanOp::Intersection => Vec::new(),
                BooleanOp::Difference => left,
            }
        } else {
            let mut polys = run_bsp(op, left, right);
            tracing::debug!(fragments = polys.len(), "boolean: clipped");
            if cfg.merge_fragments {
                polys = merge_fragments(polys);
                tracing::debug!(polygons = polys.len(), "boolean: merged");
            }
            if cfg.repair_t_junctions {
                repair_t_junctions(&mut polys);
            }
            polys
        };

        let loops: Vec<Vec<Point3>> = polys.into_iter().map(|p| p.points).collect();
        let mesh = PartialDs::from_polygons(&loops, cfg.mesh).map_err(SolidError::from)?;
        if cfg.validate {
            mesh.validate().map_err(BooleanError::InvalidResult)?;
        }
        Ok(Solid { mesh })
    }

    pub fn union(&self, other: &Solid) -> Result<Solid, BooleanError> {
        self.boolean(other, BooleanOp::Union)
    }

    pub fn intersection(&self, other: &Solid) -> Result<Solid, BooleanError> {
        self.boolean(other, BooleanOp::Intersection)
    }

    pub fn difference(&self, other: &Solid) -> Result<Solid, BooleanError> {
        self.boolean(other, BooleanOp::Difference)
    }
}

fn run_bsp(op: BooleanOp, left: Vec<Polygon>, right: Vec<Polygon>) -> Vec<Polygon> {
    let mut a = Node::new(left);
    let mut b = Node::new(right);
    match op {
        BooleanOp::Union => {
            a.clip_to(&b);
            b.clip_to(&a);
            b.invert();
            b.clip_to(&a);
            b.invert();
            a.build(b.all_polygons());
        }
        BooleanOp::Intersection => {
            a.invert();
            b.clip_to(&a);
            b.invert();
            a.clip_to(&b);
            b.clip_to(&a);
            a.build(b.all_polygons());
            a.invert();
        }
        BooleanOp::Difference => {
            a.invert();
            a.clip_to(&b);
            b.clip_to(&a);
            b.invert();
            b.clip_to(&a);
            b.invert();
            a.build(b.all_polygons());
            a.invert();
        }
    }
    a.all_polygons()
}

/// Glues fragments of one source face back together pairwise while the
/// union stays convex. Collinear points are dropped along the way.
pub(crate) fn merge_fragments(polys: Vec<Polygon>) -> Vec<Polygon> {
    let mut groups: BTreeMap<Tag, Vec<Polygon>> = BTreeMap::new();
    for p in polys {
        groups.entry(p.tag).or_default().push(p);
    }
    let mut out = Vec::new();
    for (_, mut group) in groups {
        // Collinear points would hide edges the neighbour shares in full.
        for p in &mut group {
            p.remove_collinear();
        }
        while let Some((i, j, points)) = find_mergeable(&group) {
            group[i].points = points;
            group[i].remove_collinear();
            group.swap_remove(j);
        }
        out.extend(group);
    }
    out
}

fn find_mergeable(group: &[Polygon]) -> Option<(usize, usize, Vec<Point3>)> {
    for i in 0..group.len() {
        for j in i + 1..group.len() {
            let Some(points) = join_along_shared_edge(&group[i].points, &group[j].points) else {
                continue;
            };
            if is_convex_about(&points, &group[i].plane.n) {
                return Some((i, j, points));
            }
        }
    }
    None
}

/// Inserts every polygon point that lies strictly inside an edge of
/// another polygon into that edge, ordered along it.
pub(crate) fn repair_t_junctions(polys: &mut [Polygon]) {
    let mut seen = HashSet::new();
    let mut points: Vec<Point3> = Vec::new();
    for p in polys.iter() {
        for q in &p.points {
            if seen.insert(point_key(q)) {
                points.push(q.clone());
            }
        }
    }
    let mut inserted = 0usize;
    for poly in polys.iter_mut() {
        let n = poly.points.len();
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let (a, b) = (&poly.points[i], &poly.points[(i + 1) % n]);
            out.push(a.clone());
            let mut inner: Vec<&Point3> = points.iter().filter(|q| strictly_between(a, b, q)).collect();
            inner.sort_by(|q, r| compare_squared_distance(a, q, r));
            inserted += inner.len();
            out.extend(inner.into_iter().cloned());
        }
        poly.points = out;
    }
    if inserted > 0 {
        tracing::debug!(inserted, "boolean: repaired t-junctions");
    }
}
