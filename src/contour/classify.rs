//! Outer/hole classification and hole association.
//!
//! Clockwise contours are outer boundaries, counter-clockwise ones are holes.
//! A hole belongs to an outer contour when it passes the containment test;
//! when several outer contours qualify (nested shapes such as "®"), the hole is
//! attached only to the smallest one by bounding-box area.

use geo::{Contains, Point as GeoPoint};

use crate::contour::{Polygon, TessellatedContour};
use crate::geom::line_string;

/// How a hole is tested against a candidate outer contour.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Containment {
    /// Hole bbox strictly inside outer bbox. Cheap, and can misassign holes of
    /// overlapping-but-not-nested contours.
    #[default]
    BoundingBox,
    /// Bounding-box test plus every hole point strictly inside the outer ring.
    Geometric,
}

impl Containment {
    fn accepts(self, hole: &TessellatedContour, outer: &TessellatedContour) -> bool {
        if !hole.is_inside(outer) {
            return false;
        }
        match self {
            Containment::BoundingBox => true,
            Containment::Geometric => {
                let ring = geo::Polygon::new(line_string(outer.points()), Vec::new());
                hole.points()
                    .iter()
                    .all(|p| ring.contains(&GeoPoint::new(p.x as f64, p.y as f64)))
            }
        }
    }
}

/// Group one glyph's contours into polygons, one per clockwise contour, in
/// contour order. Every polygon records `pen_offset`.
pub fn classify_glyph(
    contours: &[TessellatedContour],
    pen_offset: f32,
    containment: Containment,
) -> Vec<Polygon> {
    let outer_ids: Vec<usize> = contours
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_clockwise())
        .map(|(i, _)| i)
        .collect();

    let mut holes_of: Vec<Vec<TessellatedContour>> = vec![Vec::new(); outer_ids.len()];

    for hole in contours.iter().filter(|c| !c.is_clockwise()) {
        let owner = outer_ids
            .iter()
            .enumerate()
            .filter(|&(_, &oi)| containment.accepts(hole, &contours[oi]))
            .min_by(|a, b| {
                let aa = contours[*a.1].bounds().area();
                let ba = contours[*b.1].bounds().area();
                aa.total_cmp(&ba)
            })
            .map(|(slot, _)| slot);

        match owner {
            Some(slot) => holes_of[slot].push(hole.clone()),
            None => log::debug!(
                "counter-clockwise contour with {} points has no enclosing outer contour",
                hole.len()
            ),
        }
    }

    outer_ids
        .into_iter()
        .zip(holes_of)
        .map(|(oi, holes)| Polygon::new(contours[oi].clone(), holes, pen_offset))
        .collect()
}
