//! Curve tessellation: tagged control points → polyline.
//!
//! Each contour is walked cyclically with a (previous, current, next) window:
//! - on-curve points are emitted as-is
//! - a quadratic control point is evaluated against its neighbours; when a
//!   neighbour is also a quadratic control point the implied on-curve
//!   midpoint between them is used instead (TrueType "implicit" points)
//! - a pair of cubic control points is evaluated as one cubic segment
//!
//! Segments are sampled at `t = i / steps` for `i in 0..steps`, so the end
//! point of a segment is left to the next on-curve point. Every emitted point
//! goes through `push_point`, which drops exact repeats of the previous point
//! and of the contour start.

use crate::contour::TessellatedContour;
use crate::font::{CurveTag, RawContour};
use crate::geom::Point;

/// Tessellate every contour of a glyph, preserving contour order.
pub fn tessellate_glyph(contours: &[RawContour], bezier_steps: u32) -> Vec<TessellatedContour> {
    contours
        .iter()
        .map(|c| tessellate_contour(c, bezier_steps))
        .collect()
}

/// Tessellate one contour with `bezier_steps` samples per curve segment.
///
/// A step count of 0 is treated as 1.
pub fn tessellate_contour(contour: &RawContour, bezier_steps: u32) -> TessellatedContour {
    let steps = bezier_steps.max(1);
    let pts = contour.points();
    let tags = contour.tags();
    let n = pts.len();

    let mut out: Vec<Point> = Vec::with_capacity(n * steps as usize);

    for i in 0..n {
        let prev_i = (i + n - 1) % n;
        let next_i = (i + 1) % n;
        let (prev, cur, next) = (pts[prev_i], pts[i], pts[next_i]);

        if n < 2 {
            push_point(&mut out, cur);
            continue;
        }

        match tags[i] {
            CurveTag::OnCurve => push_point(&mut out, cur),

            CurveTag::QuadraticOffCurve => {
                let mut start = prev;
                if tags[prev_i] == CurveTag::QuadraticOffCurve {
                    start = prev.lerp(cur, 0.5);
                    push_point(&mut out, start);
                }

                let end = if tags[next_i] == CurveTag::QuadraticOffCurve {
                    cur.lerp(next, 0.5)
                } else {
                    next
                };

                eval_quadratic(&mut out, start, cur, end, steps);
            }

            CurveTag::CubicOffCurve => {
                if tags[next_i] == CurveTag::CubicOffCurve {
                    let after = pts[(i + 2) % n];
                    eval_cubic(&mut out, prev, cur, next, after, steps);
                } else if tags[prev_i] == CurveTag::CubicOffCurve {
                    // Second control point of a pair; the segment was emitted
                    // when the first one was visited.
                } else {
                    log::debug!("lone cubic control point at index {i}; treating it as on-curve");
                    push_point(&mut out, cur);
                }
            }
        }
    }

    TessellatedContour::from_points(out)
}

/// Append `p` unless it repeats the last point or the first point.
#[inline]
fn push_point(out: &mut Vec<Point>, p: Point) {
    match (out.first(), out.last()) {
        (Some(&first), Some(&last)) if p == last || p == first => {}
        _ => out.push(p),
    }
}

fn eval_quadratic(out: &mut Vec<Point>, a: Point, b: Point, c: Point, steps: u32) {
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        let u = a.lerp(b, t);
        let v = b.lerp(c, t);
        push_point(out, u.lerp(v, t));
    }
}

fn eval_cubic(out: &mut Vec<Point>, a: Point, b: Point, c: Point, d: Point, steps: u32) {
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        let u = a.lerp(b, t);
        let v = b.lerp(c, t);
        let w = c.lerp(d, t);

        let m = u.lerp(v, t);
        let n = v.lerp(w, t);
        push_point(out, m.lerp(n, t));
    }
}
