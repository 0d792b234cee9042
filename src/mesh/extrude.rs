//! Solid extrusion of triangulated glyph polygons.
//!
//! For a planar triangle set wound counter-clockwise (y up) the solid is
//! emitted as:
//! - a front cap at `z = -bevel_radius`, triangles in their original order
//! - a back cap at `z = bevel_radius + extrude`, triangles reversed
//! - side walls from `z = 0` to `z = extrude` along every contour edge
//!   `(p1, p2)`: `(p1@0, p2@0, p1@e)` and `(p1@e, p2@0, p2@e)`
//!
//! Every emitted triangle is recorded with its corners reversed. With outer
//! contours clockwise and holes counter-clockwise this makes the recorded
//! winding, and the normal computed from it, face away from the material on
//! caps and walls alike (front cap towards -z, back cap towards +z). A
//! negative `extrude` turns the solid inside out along z; `extrude = 0`
//! collapses it into one plane.
//!
//! Bevel geometry is not generated; `bevel_radius` only offsets the caps.

use glam::Vec3;

use crate::contour::TessellatedContour;
use crate::geom::Point;
use crate::mesh::{Mesh, Triangulation};

/// Depth parameters of the solid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Extrusion {
    pub depth: f32,
    pub bevel_radius: f32,
}

impl Extrusion {
    #[inline]
    pub fn front_z(&self) -> f32 {
        -self.bevel_radius
    }

    #[inline]
    pub fn back_z(&self) -> f32 {
        self.bevel_radius + self.depth
    }
}

/// Appends caps and walls to a `Mesh`.
pub struct MeshBuilder<'a> {
    mesh: &'a mut Mesh,
    extrusion: Extrusion,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(mesh: &'a mut Mesh, extrusion: Extrusion) -> Self {
        Self { mesh, extrusion }
    }

    #[inline]
    fn lift(p: Point, dx: f32, z: f32) -> Vec3 {
        Vec3::new(p.x + dx, p.y, z)
    }

    /// Record `(a, b, c)` as `(c, b, a)`. The normal follows the recorded
    /// order, not the emitted one.
    #[inline]
    fn emit(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.mesh.add_triangle(c, b, a);
    }

    /// Emit front and back caps for one polygon's triangulation, shifted by
    /// `dx` (pen offset). Returns the number of triangles added.
    pub fn add_caps(&mut self, triangulation: &Triangulation, dx: f32) -> usize {
        let front = self.extrusion.front_z();
        let back = self.extrusion.back_z();
        let mut added = 0;

        for [a, b, c] in triangulation.triangle_points() {
            self.emit(
                Self::lift(a, dx, front),
                Self::lift(b, dx, front),
                Self::lift(c, dx, front),
            );
            self.emit(
                Self::lift(c, dx, back),
                Self::lift(b, dx, back),
                Self::lift(a, dx, back),
            );
            added += 2;
        }
        added
    }

    /// Bridge every edge of `contour` into a two-triangle wall quad.
    /// Returns the number of triangles added.
    pub fn add_walls(&mut self, contour: &TessellatedContour, dx: f32) -> usize {
        let e = self.extrusion.depth;
        let mut added = 0;

        for (p1, p2) in contour.edges() {
            let p1_low = Self::lift(p1, dx, 0.0);
            let p2_low = Self::lift(p2, dx, 0.0);
            let p1_high = Self::lift(p1, dx, e);
            let p2_high = Self::lift(p2, dx, e);

            self.emit(p1_low, p2_low, p1_high);
            self.emit(p1_high, p2_low, p2_high);
            added += 2;
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;
    use crate::mesh::{LyonTriangulator, TriangulationInput, Triangulator};

    fn unit_square() -> TessellatedContour {
        TessellatedContour::from_points(vec![
            point(0.0, 0.0),
            point(0.0, 1.0),
            point(1.0, 1.0),
            point(1.0, 0.0),
        ])
    }

    fn normals_of(mesh: &Mesh) -> Vec<[f32; 3]> {
        mesh.triangles()
            .iter()
            .map(|t| mesh.vertex(t[0]).map(|v| v.normal).unwrap_or_default())
            .collect()
    }

    #[test]
    fn cube_from_square_has_outward_normals() {
        let square = unit_square();
        let tri = LyonTriangulator::new()
            .triangulate(&TriangulationInput::from_rings(square.points(), &[]))
            .unwrap();

        let mut mesh = Mesh::new();
        let mut builder = MeshBuilder::new(
            &mut mesh,
            Extrusion {
                depth: 1.0,
                bevel_radius: 0.0,
            },
        );
        let caps = builder.add_caps(&tri, 0.0);
        let walls = builder.add_walls(&square, 0.0);

        assert_eq!(caps, 4);
        assert_eq!(walls, 8);
        assert_eq!(mesh.triangle_count(), 12);

        let normals = normals_of(&mesh);
        // Caps alternate front/back.
        assert_eq!(normals[0], [0.0, 0.0, -1.0]);
        assert_eq!(normals[1], [0.0, 0.0, 1.0]);

        // Walls point away from the square's centre.
        for (t, n) in mesh.triangles()[4..].iter().zip(&normals[4..]) {
            let centroid = t
                .iter()
                .filter_map(|&i| mesh.vertex(i))
                .fold(Vec3::ZERO, |acc, v| acc + Vec3::from_array(v.position))
                / 3.0;
            let outward = Vec3::new(centroid.x - 0.5, centroid.y - 0.5, 0.0);
            assert!(outward.dot(Vec3::from_array(*n)) > 0.0, "wall normal {n:?} faces inward");
        }

        // 8 cap corners + 4 wall normals × 4 corners each.
        assert_eq!(mesh.vertex_count(), 8 + 16);
    }

    #[test]
    fn hole_walls_face_into_the_hole() {
        let hole = unit_square().reversed();
        let mut mesh = Mesh::new();
        MeshBuilder::new(
            &mut mesh,
            Extrusion {
                depth: 2.0,
                bevel_radius: 0.0,
            },
        )
        .add_walls(&hole, 0.0);

        for t in mesh.triangles() {
            let v = mesh.vertex(t[0]).unwrap();
            let p = Vec3::from_array(v.position);
            let towards_centre = Vec3::new(0.5 - p.x, 0.5 - p.y, 0.0);
            assert!(towards_centre.dot(Vec3::from_array(v.normal)) > 0.0);
        }
    }

    #[test]
    fn flat_extrusion_puts_caps_in_one_plane() {
        let square = unit_square();
        let tri = LyonTriangulator::new()
            .triangulate(&TriangulationInput::from_rings(square.points(), &[]))
            .unwrap();
        let mut mesh = Mesh::new();
        let mut builder = MeshBuilder::new(
            &mut mesh,
            Extrusion {
                depth: 0.0,
                bevel_radius: 0.0,
            },
        );
        builder.add_caps(&tri, 10.0);
        builder.add_walls(&square, 10.0);

        assert!(mesh.vertices().iter().all(|v| v.position[2] == 0.0));
        assert!(mesh.vertices().iter().all(|v| v.position[0] >= 10.0));
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn stored_normals_follow_recorded_winding() {
        let square = unit_square();
        let tri = LyonTriangulator::new()
            .triangulate(&TriangulationInput::from_rings(square.points(), &[]))
            .unwrap();
        let mut mesh = Mesh::new();
        let mut builder = MeshBuilder::new(
            &mut mesh,
            Extrusion {
                depth: 3.0,
                bevel_radius: 0.5,
            },
        );
        builder.add_caps(&tri, 0.0);
        builder.add_walls(&square, 0.0);

        for t in mesh.triangles() {
            let [a, b, c] = t.map(|i| Vec3::from_array(mesh.vertex(i).unwrap().position));
            let stored = Vec3::from_array(mesh.vertex(t[0]).unwrap().normal);
            assert!(crate::mesh::face_normal(a, b, c).abs_diff_eq(stored, 1e-6));
        }

        // The first front cap triangle as emitted (counter-clockwise) would
        // face +z; recorded reversed it faces -z.
        let [a, b, c] = tri.triangle_points().next().unwrap();
        let emitted = crate::mesh::face_normal(
            Vec3::new(a.x, a.y, -0.5),
            Vec3::new(b.x, b.y, -0.5),
            Vec3::new(c.x, c.y, -0.5),
        );
        assert_eq!(emitted, Vec3::Z);
        assert_eq!(mesh.vertex(mesh.triangles()[0][0]).unwrap().normal, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn bevel_radius_offsets_caps_only() {
        let ext = Extrusion {
            depth: 5.0,
            bevel_radius: 1.5,
        };
        assert_eq!(ext.front_z(), -1.5);
        assert_eq!(ext.back_z(), 6.5);
    }
}
