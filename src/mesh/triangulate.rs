//! Planar triangulation of a polygon with holes.
//!
//! The mesh builder only needs *a* conforming triangulation, so the step is a
//! trait (`Triangulator`) and the input is the classic planar straight-line
//! graph description:
//! - `vertices`: outer ring points followed by each hole ring's points
//! - `segments`: cyclic `(i, i + 1)` edges of every ring, hole rings offset by
//!   the number of vertices added before them
//! - `holes`: one marker point per hole (the mean of the hole's points)
//!
//! Hole markers are only a hint. The mean of a concave hole's points can fall
//! outside the hole; backends that flood-fill from markers would then carve
//! the wrong region. `LyonTriangulator` does not use them.
//!
//! Output contract: triangles index into `Triangulation::vertices` and are
//! wound counter-clockwise (y up).

use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

use crate::geom::Point;

/// Errors produced while triangulating one polygon.
#[derive(thiserror::Error, Debug)]
pub enum TriangulateError {
    #[error("ring {ring} has only {points} points; at least 3 are needed")]
    DegenerateRing { ring: usize, points: usize },

    #[error("segment ({0}, {1}) references a missing vertex")]
    BadSegment(u32, u32),

    #[error("triangulation produced no triangles (zero-area polygon?)")]
    Empty,

    #[error("lyon tessellation failed: {0}")]
    Backend(String),
}

/// Planar straight-line graph for one outer ring and its holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangulationInput {
    pub vertices: Vec<Point>,
    pub segments: Vec<[u32; 2]>,
    pub holes: Vec<Point>,
}

impl TriangulationInput {
    /// Build the graph from an outer ring and hole rings.
    pub fn from_rings(outer: &[Point], holes: &[&[Point]]) -> Self {
        let mut input = TriangulationInput::default();
        input.push_ring(outer);
        for hole in holes {
            input.push_ring(hole);
            if !hole.is_empty() {
                let inv = 1.0 / hole.len() as f32;
                let (sx, sy) = hole
                    .iter()
                    .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
                input.holes.push(Point::new(sx * inv, sy * inv));
            }
        }
        input
    }

    fn push_ring(&mut self, ring: &[Point]) {
        let base = self.vertices.len() as u32;
        let n = ring.len() as u32;
        self.vertices.extend_from_slice(ring);
        self.segments
            .extend((0..n).map(|i| [base + i, base + (i + 1) % n]));
    }

    /// Split `segments` back into rings of vertex indices.
    ///
    /// A ring ends at the segment that returns to the ring's first vertex.
    fn rings(&self) -> Result<Vec<Vec<u32>>, TriangulateError> {
        let n = self.vertices.len() as u32;
        let mut rings = Vec::new();
        let mut current: Vec<u32> = Vec::new();

        for &[a, b] in &self.segments {
            if a >= n || b >= n {
                return Err(TriangulateError::BadSegment(a, b));
            }
            if current.is_empty() {
                current.push(a);
            }
            if b == current[0] {
                rings.push(std::mem::take(&mut current));
            } else {
                current.push(b);
            }
        }
        if !current.is_empty() {
            rings.push(current);
        }
        Ok(rings)
    }
}

/// Result of a triangulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub vertices: Vec<Point>,
    pub triangles: Vec<[u32; 3]>,
}

impl Triangulation {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Iterate triangles as vertex positions.
    pub fn triangle_points(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.triangles
            .iter()
            .map(|t| t.map(|i| self.vertices[i as usize]))
    }
}

/// Constrained triangulation capability.
pub trait Triangulator {
    fn triangulate(&mut self, input: &TriangulationInput)
    -> Result<Triangulation, TriangulateError>;
}

/// Builds plain positions from lyon's `FillVertex`.
struct PositionCtor;

impl FillVertexConstructor<Point> for PositionCtor {
    fn new_vertex(&mut self, v: FillVertex) -> Point {
        v.position()
    }
}

/// Triangulator backed by lyon's sweep-line fill tessellator.
///
/// Rings become closed sub-paths filled with the even-odd rule, so holes are
/// excluded whatever their orientation. Only input vertices are used (no
/// Steiner points for simple, non-intersecting rings).
pub struct LyonTriangulator {
    tessellator: FillTessellator,
    options: FillOptions,
}

impl Default for LyonTriangulator {
    fn default() -> Self {
        Self {
            tessellator: FillTessellator::new(),
            options: FillOptions::default().with_fill_rule(FillRule::EvenOdd),
        }
    }
}

impl LyonTriangulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_path(input: &TriangulationInput) -> Result<Path, TriangulateError> {
        let mut builder = Path::builder();
        for (ring_idx, ring) in input.rings()?.iter().enumerate() {
            if ring.len() < 3 {
                return Err(TriangulateError::DegenerateRing {
                    ring: ring_idx,
                    points: ring.len(),
                });
            }
            builder.begin(input.vertices[ring[0] as usize]);
            for &i in &ring[1..] {
                builder.line_to(input.vertices[i as usize]);
            }
            builder.close();
        }
        Ok(builder.build())
    }
}

impl Triangulator for LyonTriangulator {
    fn triangulate(
        &mut self,
        input: &TriangulationInput,
    ) -> Result<Triangulation, TriangulateError> {
        let path = Self::build_path(input)?;

        let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
        self.tessellator
            .tessellate_path(
                &path,
                &self.options,
                &mut BuffersBuilder::new(&mut buffers, PositionCtor),
            )
            .map_err(|e| TriangulateError::Backend(format!("{e:?}")))?;

        let mut triangles = Vec::with_capacity(buffers.indices.len() / 3);
        for tri in buffers.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]];
            let (pa, pb, pc) = (
                buffers.vertices[a as usize],
                buffers.vertices[b as usize],
                buffers.vertices[c as usize],
            );
            // (b - a) × (c - a) < 0 is clockwise with y up.
            let cross = (pb - pa).cross(pc - pa);
            if cross < 0.0 {
                triangles.push([a, c, b]);
            } else {
                triangles.push([a, b, c]);
            }
        }

        if triangles.is_empty() {
            return Err(TriangulateError::Empty);
        }

        Ok(Triangulation {
            vertices: buffers.vertices,
            triangles,
        })
    }
}
