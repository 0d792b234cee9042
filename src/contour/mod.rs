//! Tessellated contours and the polygons built from them.
//!
//! Pipeline position:
//! `RawContour` (font engine) → `tessellate` → `TessellatedContour`
//! → `classify` → `Polygon` (one clockwise outer + counter-clockwise holes).

pub mod classify;
pub mod tessellate;

pub use classify::{Containment, classify_glyph};
pub use tessellate::{tessellate_contour, tessellate_glyph};

use crate::geom::{Aabb2, Point, ring_signed_area};

/// A closed polyline approximating one glyph contour.
///
/// Invariant: no two adjacent points are equal and the last point never
/// repeats the first (closing is implicit).
#[derive(Debug, Clone, PartialEq)]
pub struct TessellatedContour {
    points: Vec<Point>,
    clockwise: bool,
    bounds: Aabb2,
}

impl TessellatedContour {
    /// Wrap an already de-duplicated point ring, deriving orientation and bounds.
    pub fn from_points(points: Vec<Point>) -> Self {
        let clockwise = ring_signed_area(&points) > 0.0;
        let bounds = Aabb2::from_points(&points);
        Self {
            points,
            clockwise,
            bounds,
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Sign of the shoelace area: `true` for outer (filled) contours.
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    #[inline]
    pub fn bounds(&self) -> Aabb2 {
        self.bounds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding-box containment: `self` lies strictly inside `other`'s box.
    #[inline]
    pub fn is_inside(&self, other: &TessellatedContour) -> bool {
        other.bounds.strictly_contains(&self.bounds)
    }

    /// Same ring traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self::from_points(points)
    }

    /// Copy shifted horizontally by `dx` (pen offset).
    pub fn translated(&self, dx: f32) -> Self {
        Self {
            points: self.points.iter().map(|p| Point::new(p.x + dx, p.y)).collect(),
            clockwise: self.clockwise,
            bounds: self.bounds.translated(dx, 0.0),
        }
    }

    /// Cyclic edges `(p[i], p[i + 1 mod n])`.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// One filled region of a glyph: an outer contour and the holes punched in it.
///
/// Coordinates are glyph-local; `pen_offset` is the horizontal pen position
/// the glyph was laid out at.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub outer: TessellatedContour,
    pub holes: Vec<TessellatedContour>,
    pub pen_offset: f32,
}

impl Polygon {
    pub fn new(outer: TessellatedContour, holes: Vec<TessellatedContour>, pen_offset: f32) -> Self {
        Self {
            outer,
            holes,
            pen_offset,
        }
    }

    /// Number of boundary edges over the outer ring and all holes.
    pub fn boundary_edge_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(TessellatedContour::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    fn square(x0: f32, y0: f32, size: f32) -> TessellatedContour {
        TessellatedContour::from_points(vec![
            point(x0, y0),
            point(x0, y0 + size),
            point(x0 + size, y0 + size),
            point(x0 + size, y0),
        ])
    }

    #[test]
    fn reversing_flips_orientation() {
        let c = square(0.0, 0.0, 10.0);
        assert!(c.is_clockwise());
        assert!(!c.reversed().is_clockwise());
        assert!(c.reversed().reversed().is_clockwise());
    }

    #[test]
    fn translation_moves_points_and_bounds() {
        let c = square(0.0, 0.0, 10.0).translated(25.0);
        assert_eq!(c.points()[0], point(25.0, 0.0));
        assert_eq!(c.bounds().min, [25.0, 0.0]);
        assert_eq!(c.bounds().max, [35.0, 10.0]);
        assert!(c.is_clockwise());
    }

    #[test]
    fn edges_wrap_around() {
        let c = square(0.0, 0.0, 1.0);
        let edges: Vec<_> = c.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], (point(1.0, 0.0), point(0.0, 0.0)));
    }

    #[test]
    fn nested_box_is_inside() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 2.0).reversed();
        assert!(inner.is_inside(&outer));
        assert!(!outer.is_inside(&inner));
    }
}
