//! Small 2D geometry helpers shared by the contour, mesh and sampling stages.
//!
//! Points are `lyon::math::Point` (f32, y-up font coordinates) everywhere so
//! that contours can be handed to the triangulation backend without copying
//! into another representation.

pub use lyon::math::{Point, point};

/// Axis-aligned bounding box in font units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb2 {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb2 {
    #[inline]
    pub fn from_min_max(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY, f32::INFINITY],
            max: [f32::NEG_INFINITY, f32::NEG_INFINITY],
        }
    }

    /// Bounds of a point sequence (empty for an empty slice).
    pub fn from_points(points: &[Point]) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.include_point(*p);
        }
        bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min[0] > self.max[0] || self.min[1] > self.max[1]
    }

    #[inline]
    pub fn include_point(&mut self, p: Point) {
        self.min[0] = self.min[0].min(p.x);
        self.min[1] = self.min[1].min(p.y);
        self.max[0] = self.max[0].max(p.x);
        self.max[1] = self.max[1].max(p.y);
    }

    /// True when `inner` lies strictly inside `self` on all four bounds.
    ///
    /// Touching edges do not count as containment.
    #[inline]
    pub fn strictly_contains(&self, inner: &Aabb2) -> bool {
        inner.min[0] > self.min[0]
            && inner.min[1] > self.min[1]
            && inner.max[0] < self.max[0]
            && inner.max[1] < self.max[1]
    }

    #[inline]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        if self.is_empty() {
            return self;
        }
        Self {
            min: [self.min[0] + dx, self.min[1] + dy],
            max: [self.max[0] + dx, self.max[1] + dy],
        }
    }

    #[inline]
    pub fn size(&self) -> [f32; 2] {
        [self.max[0] - self.min[0], self.max[1] - self.min[1]]
    }

    #[inline]
    pub fn area(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let [w, h] = self.size();
        w * h
    }
}

/// Shoelace sum over a closed ring using the FreeType convention
/// `cur.x * prev.y - cur.y * prev.x`.
///
/// Positive for clockwise rings in a y-up coordinate system.
pub fn ring_signed_area(points: &[Point]) -> f32 {
    let Some(&last) = points.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut sum = 0.0f32;
    for &cur in points {
        sum += cur.x * prev.y - cur.y * prev.x;
        prev = cur;
    }
    sum
}

/// Ring as a `geo` line string (f64), for point-in-polygon queries.
pub fn line_string(points: &[Point]) -> geo::LineString<f64> {
    geo::LineString::from(
        points
            .iter()
            .map(|p| (p.x as f64, p.y as f64))
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_containment_rejects_shared_edges() {
        let outer = Aabb2::from_min_max([0.0, 0.0], [10.0, 10.0]);
        let inner = Aabb2::from_min_max([1.0, 1.0], [9.0, 9.0]);
        let touching = Aabb2::from_min_max([0.0, 1.0], [9.0, 9.0]);

        assert!(outer.strictly_contains(&inner));
        assert!(!outer.strictly_contains(&touching));
        assert!(!inner.strictly_contains(&outer));
    }

    #[test]
    fn clockwise_ring_has_positive_area() {
        // Up the left side, across the top, down the right: clockwise with y up.
        let cw = [
            point(0.0, 0.0),
            point(0.0, 1.0),
            point(1.0, 1.0),
            point(1.0, 0.0),
        ];
        assert!(ring_signed_area(&cw) > 0.0);

        let ccw: Vec<Point> = cw.iter().rev().copied().collect();
        assert!(ring_signed_area(&ccw) < 0.0);
    }

    #[test]
    fn translate_keeps_empty_bounds_empty() {
        let b = Aabb2::empty().translated(5.0, 0.0);
        assert!(b.is_empty());
        assert_eq!(b.area(), 0.0);
    }
}
