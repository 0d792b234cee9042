//! Raw glyph outlines: control points with per-point curve tags.
//!
//! A font engine hands us contours the way FreeType stores them: an ordered
//! list of control points where each point says whether it lies on the curve
//! or is a quadratic/cubic control point. The curve tessellator walks this
//! representation directly.
//!
//! `ttf-parser` reports outlines as `move_to/line_to/quad_to/curve_to/close`
//! callbacks instead, so `RawOutlineBuilder` folds those callbacks back into
//! tagged contours.

use crate::geom::{Point, point};

/// Curve role of one control point, decoded once from engine flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CurveTag {
    OnCurve,
    QuadraticOffCurve,
    CubicOffCurve,
}

impl CurveTag {
    /// Decode FreeType-style outline tag bits (`tag & 0x03`).
    ///
    /// - `0b01` on-curve
    /// - `0b00` conic (quadratic) control point
    /// - `0b10` cubic control point
    ///
    /// The unused `0b11` pattern falls back to on-curve.
    pub fn from_outline_flags(flags: u8) -> Self {
        match flags & 0x03 {
            0x00 => CurveTag::QuadraticOffCurve,
            0x02 => CurveTag::CubicOffCurve,
            _ => CurveTag::OnCurve,
        }
    }
}

/// One closed contour of a glyph, as control points plus tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawContour {
    points: Vec<Point>,
    tags: Vec<CurveTag>,
}

impl RawContour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parallel slices of points and engine tag bytes.
    ///
    /// Extra entries in the longer slice are ignored.
    pub fn from_flags(points: &[Point], flags: &[u8]) -> Self {
        points
            .iter()
            .zip(flags)
            .map(|(&p, &f)| (p, CurveTag::from_outline_flags(f)))
            .collect()
    }

    #[inline]
    pub fn push(&mut self, p: Point, tag: CurveTag) {
        self.points.push(p);
        self.tags.push(tag);
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn tags(&self) -> &[CurveTag] {
        &self.tags
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reverse the traversal direction (used for PostScript-flavoured outlines).
    ///
    /// The start point stays first so an on-curve start remains on-curve.
    pub fn reverse(&mut self) {
        if self.points.len() > 1 {
            self.points[1..].reverse();
            self.tags[1..].reverse();
        }
    }
}

impl FromIterator<(Point, CurveTag)> for RawContour {
    fn from_iter<I: IntoIterator<Item = (Point, CurveTag)>>(iter: I) -> Self {
        let mut contour = RawContour::new();
        for (p, tag) in iter {
            contour.push(p, tag);
        }
        contour
    }
}

/// Convert `ttf-parser` outline callbacks into tagged `RawContour`s.
///
/// - Every `move_to` starts a new contour.
/// - Coordinates are scaled and rounded to whole output units, the way
///   FreeType reports 26.6 outline positions.
/// - A final on-curve point equal to the contour start is dropped; the
///   tessellator closes contours implicitly.
pub(crate) struct RawOutlineBuilder {
    scale: f32,
    contours: Vec<RawContour>,
    current: RawContour,
}

impl RawOutlineBuilder {
    pub(crate) fn new(scale: f32) -> Self {
        Self {
            scale,
            contours: Vec::new(),
            current: RawContour::new(),
        }
    }

    pub(crate) fn finish(mut self) -> Vec<RawContour> {
        self.flush();
        self.contours
    }

    #[inline]
    fn map(&self, x: f32, y: f32) -> Point {
        point((x * self.scale).round(), (y * self.scale).round())
    }

    fn flush(&mut self) {
        let mut contour = std::mem::take(&mut self.current);
        if contour.len() > 1 {
            let first = contour.points[0];
            let last_idx = contour.len() - 1;
            if contour.points[last_idx] == first && contour.tags[last_idx] == CurveTag::OnCurve {
                contour.points.pop();
                contour.tags.pop();
            }
        }
        if !contour.is_empty() {
            self.contours.push(contour);
        }
    }
}

impl ttf_parser::OutlineBuilder for RawOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        let p = self.map(x, y);
        self.current.push(p, CurveTag::OnCurve);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.current.push(p, CurveTag::OnCurve);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let c = self.map(x1, y1);
        let p = self.map(x, y);
        self.current.push(c, CurveTag::QuadraticOffCurve);
        self.current.push(p, CurveTag::OnCurve);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let c1 = self.map(x1, y1);
        let c2 = self.map(x2, y2);
        let p = self.map(x, y);
        self.current.push(c1, CurveTag::CubicOffCurve);
        self.current.push(c2, CurveTag::CubicOffCurve);
        self.current.push(p, CurveTag::OnCurve);
    }

    fn close(&mut self) {
        self.flush();
    }
}
