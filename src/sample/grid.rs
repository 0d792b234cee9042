//! Interior lattice sampling.
//!
//! Lattice points are `min + (i, j) * pitch` over the outer ring's bounding
//! box, rounded to `GRID_DECIMALS` places, enumerated row by row (ascending y,
//! then ascending x). A point is kept when it lies strictly inside the outer
//! ring and outside every hole (points on any boundary are dropped).

use geo::{Contains, Point as GeoPoint};

use crate::contour::Polygon;
use crate::geom::{Point, line_string, point};
use crate::sample::{MAX_SAMPLES, SampleError};

/// Decimal places lattice coordinates are rounded to.
pub const GRID_DECIMALS: i32 = 2;

fn round_to_grid(v: f32) -> f32 {
    let f = 10f32.powi(GRID_DECIMALS);
    (v * f).round() / f
}

fn to_geo(polygon: &Polygon) -> geo::Polygon<f64> {
    geo::Polygon::new(
        line_string(polygon.outer.points()),
        polygon
            .holes
            .iter()
            .map(|h| line_string(h.points()))
            .collect(),
    )
}

/// Lattice points inside `polygon`, shifted by its pen offset.
pub fn grid_points_inside(polygon: &Polygon, pitch: f32) -> Result<Vec<Point>, SampleError> {
    if !(pitch.is_finite() && pitch > 0.0) {
        return Err(SampleError::InvalidPitch(pitch));
    }

    let bounds = polygon.outer.bounds();
    if bounds.is_empty() {
        return Ok(Vec::new());
    }
    let [w, h] = bounds.size();
    let columns = (w as f64 / pitch as f64).floor() + 1.0;
    let rows = (h as f64 / pitch as f64).floor() + 1.0;
    if !(columns * rows <= MAX_SAMPLES as f64) {
        return Err(SampleError::TooManyPoints { limit: MAX_SAMPLES });
    }
    let (columns, rows) = (columns as usize, rows as usize);

    let region = to_geo(polygon);
    let mut points = Vec::new();
    for j in 0..rows {
        let y = round_to_grid(bounds.min[1] + j as f32 * pitch);
        for i in 0..columns {
            let x = round_to_grid(bounds.min[0] + i as f32 * pitch);
            if region.contains(&GeoPoint::new(x as f64, y as f64)) {
                points.push(point(x + polygon.pen_offset, y));
            }
        }
    }
    Ok(points)
}
