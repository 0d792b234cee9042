//! Extruded text mesh: vertex pool with welding, triangle list, and the
//! stages that fill it.
//!
//! - `triangulate`: planar triangulation of a polygon with holes (pluggable).
//! - `extrude`: caps + side walls from triangulated polygons and contours.
//! - `export`: OBJ-style text serialisation.

pub mod export;
pub mod extrude;
pub mod triangulate;

use std::collections::HashMap;

use glam::Vec3;

pub use export::{EXPORT_SCALE, ObjSummary, read_obj_summary, save_obj, write_obj};
pub use extrude::{Extrusion, MeshBuilder};
pub use triangulate::{
    LyonTriangulator, TriangulateError, Triangulation, TriangulationInput, Triangulator,
};

/// A mesh vertex: position plus flat-shaded normal.
///
/// Two vertices are the same pool entry only if all six components are equal.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Bit-exact identity used for welding. `-0.0` is folded into `+0.0` so
    /// that the key agrees with float equality.
    #[inline]
    fn weld_key(&self) -> [u32; 6] {
        let mut canonical = *self;
        for c in canonical
            .position
            .iter_mut()
            .chain(canonical.normal.iter_mut())
        {
            if *c == 0.0 {
                *c = 0.0;
            }
        }
        bytemuck::cast(canonical)
    }
}

/// Flat normal of the triangle `(a, b, c)`: `(b - a) × (c - a)`, normalised.
///
/// Degenerate (zero-area) triangles get a zero normal.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Append-only vertex pool with weld-on-insert plus a triangle index list.
///
/// Indices are 1-based, matching the export format.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<[u32; 3]>,
    lookup: HashMap<[u32; 6], u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex, reusing an identical one if present.
    ///
    /// Returns the 1-based pool index.
    pub fn add_vertex(&mut self, v: Vertex) -> u32 {
        let key = v.weld_key();
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        self.vertices.push(v);
        let index = self.vertices.len() as u32;
        self.lookup.insert(key, index);
        index
    }

    /// Add a flat-shaded triangle. The normal is computed from `(a, b, c)` in
    /// that order and shared by all three corners, so the stored winding and
    /// the stored normal always agree.
    ///
    /// `MeshBuilder` passes corners already reversed; its normals are the
    /// negation of the normal of the triangle as it was emitted.
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) -> [u32; 3] {
        let n = face_normal(a, b, c).to_array();
        let tri = [a, b, c].map(|p| {
            self.add_vertex(Vertex {
                position: p.to_array(),
                normal: n,
            })
        });
        self.triangles.push(tri);
        tri
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangles as 1-based vertex indices, in insertion order.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Vertex behind a 1-based index.
    #[inline]
    pub fn vertex(&self, index: u32) -> Option<&Vertex> {
        (index as usize).checked_sub(1).and_then(|i| self.vertices.get(i))
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
        self.lookup.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vertices_weld_and_indices_are_one_based() {
        let mut mesh = Mesh::new();
        let v = Vertex {
            position: [1.0, 2.0, 3.0],
            normal: [0.0, 0.0, 1.0],
        };
        assert_eq!(mesh.add_vertex(v), 1);
        assert_eq!(mesh.add_vertex(v), 1);

        let mut other = v;
        other.normal = [0.0, 0.0, -1.0];
        assert_eq!(mesh.add_vertex(other), 2);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.vertex(2), Some(&other));
        assert_eq!(mesh.vertex(0), None);
    }

    #[test]
    fn negative_zero_welds_with_positive_zero() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Vertex {
            position: [0.0, 1.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        });
        let b = mesh.add_vertex(Vertex {
            position: [-0.0, 1.0, 0.0],
            normal: [-0.0, 0.0, 1.0],
        });
        assert_eq!(a, b);
    }

    #[test]
    fn adjacent_triangles_share_welded_corners() {
        let mut mesh = Mesh::new();
        let t1 = mesh.add_triangle(Vec3::ZERO, Vec3::Y, Vec3::X);
        let t2 = mesh.add_triangle(Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0));

        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(t1[1], t2[1]);
        assert_eq!(t1[2], t2[0]);

        // Clockwise seen from +z → normal points down.
        assert_eq!(mesh.vertices()[0].normal, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn degenerate_triangle_gets_zero_normal() {
        let mut mesh = Mesh::new();
        mesh.add_triangle(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        assert!(mesh.vertices().iter().all(|v| v.normal == [0.0; 3]));
    }
}
