//! Solid BSP tree over exact polygons.
//!
//! Each node holds a splitting plane and the polygons lying in it. Regions
//! reached through a missing back child are inside the solid; through a
//! missing front child, outside. Boolean operations are sequences of
//! `clip_to` / `invert` / `build` on the two operand trees.

use std::mem;

use super::polygon::{Parts, Polygon};
use crate::kernel::Plane3;

#[derive(Clone, Debug, Default)]
pub(crate) struct Node {
    plane: Option<Plane3>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
    polygons: Vec<Polygon>,
}

impl Node {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Node::default();
        node.build(polygons);
        node
    }

    /// Adds polygons, splitting them down the existing tree. The first
    /// polygon's plane becomes the splitter of a fresh node.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let Some(first) = polygons.first() else {
            return;
        };
        let plane = self.plane.get_or_insert_with(|| first.plane.clone()).clone();
        let mut parts = Parts::default();
        for p in polygons {
            p.split_by(&plane, &mut parts);
        }
        self.polygons.append(&mut parts.coplanar_front);
        self.polygons.append(&mut parts.coplanar_back);
        if !parts.front.is_empty() {
            self.front.get_or_insert_with(Box::default).build(parts.front);
        }
        if !parts.back.is_empty() {
            self.back.get_or_insert_with(Box::default).build(parts.back);
        }
    }

    /// Turns the solid inside out.
    pub fn invert(&mut self) {
        for p in &mut self.polygons {
            p.flip();
        }
        if let Some(plane) = &mut self.plane {
            plane.flip();
        }
        if let Some(f) = &mut self.front {
            f.invert();
        }
        if let Some(b) = &mut self.back {
            b.invert();
        }
        mem::swap(&mut self.front, &mut self.back);
    }

    /// Removes the parts of `polygons` inside this solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = &self.plane else {
            return polygons;
        };
        let mut parts = Parts::default();
        for p in polygons {
            p.split_by(plane, &mut parts);
        }
        let mut front = parts.front;
        front.append(&mut parts.coplanar_front);
        let mut back = parts.back;
        back.append(&mut parts.coplanar_back);

        let mut out = match &self.front {
            Some(n) => n.clip_polygons(front),
            None => front,
        };
        if let Some(n) = &self.back {
            out.extend(n.clip_polygons(back));
        }
        out
    }

    /// Removes the parts of this tree's polygons inside `other`.
    pub fn clip_to(&mut self, other: &Node) {
        self.polygons = other.clip_polygons(mem::take(&mut self.polygons));
        if let Some(f) = &mut self.front {
            f.clip_to(other);
        }
        if let Some(b) = &mut self.back {
            b.clip_to(other);
        }
    }

    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut Vec<Polygon>) {
        out.extend(self.polygons.iter().cloned());
        if let Some(f) = &self.front {
            f.collect_into(out);
        }
        if let Some(b) = &self.back {
            b.collect_into(out);
        }
    }
}
