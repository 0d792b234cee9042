//! Generation session: one font, one text, one set of sizing parameters.
//!
//! A session owns everything one run of the pipeline accumulates:
//! - the welded mesh, one character at a time: caps for each of its
//!   polygons, then walls for each of its contours
//! - the per-character tessellated outlines, already shifted by pen offset
//! - the classified polygons with the pen offset each glyph was placed at
//!
//! `generate` rebuilds all of it from scratch. After `shutdown` the buffers are
//! released and every further call fails with `SessionError::Shutdown`.

use std::io::Write;
use std::path::Path;

use crate::contour::{Containment, Polygon, TessellatedContour, classify_glyph, tessellate_glyph};
use crate::font::text::PenCursor;
use crate::font::{FontError, FontFace, GlyphSource};
use crate::geom::Point;
use crate::mesh::{
    self, EXPORT_SCALE, Extrusion, LyonTriangulator, Mesh, MeshBuilder, TriangulationInput,
    Triangulator,
};
use crate::sample::{self, ResampledOutline, SampleError};

/// Errors produced by a generation session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error("failed to write mesh: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("session has been shut down")]
    Shutdown,
}

/// Sizing and meshing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    /// Character size in points (rendered at 96 dpi, 26.6 output units).
    pub height: u32,
    /// Samples per curve segment.
    pub bezier_steps: u32,
    /// Signed z depth of the side walls.
    pub extrude: f32,
    /// Offsets the caps away from the walls; no bevel geometry is built.
    pub bevel_radius: f32,
    /// Accepted and carried, currently unused.
    pub bevel_steps: u32,
    pub containment: Containment,
    /// Uniform scale applied to positions on export.
    pub export_scale: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            height: 48,
            bezier_steps: 3,
            extrude: 96.0,
            bevel_radius: 0.0,
            bevel_steps: 4,
            containment: Containment::BoundingBox,
            export_scale: EXPORT_SCALE,
        }
    }
}

impl MeshParams {
    pub fn validate(&self) -> Result<(), SessionError> {
        let invalid = |msg: String| Err(SessionError::InvalidParams(msg));

        if self.height == 0 {
            return invalid("height must be positive".into());
        }
        if self.bezier_steps == 0 {
            return invalid("bezier_steps must be at least 1".into());
        }
        if !self.extrude.is_finite() {
            return invalid(format!("extrude must be finite (got {})", self.extrude));
        }
        if !(self.bevel_radius.is_finite() && self.bevel_radius >= 0.0) {
            return invalid(format!(
                "bevel_radius must be finite and non-negative (got {})",
                self.bevel_radius
            ));
        }
        if !(self.export_scale.is_finite() && self.export_scale > 0.0) {
            return invalid(format!(
                "export_scale must be finite and positive (got {})",
                self.export_scale
            ));
        }
        Ok(())
    }

    fn extrusion(&self) -> Extrusion {
        Extrusion {
            depth: self.extrude,
            bevel_radius: self.bevel_radius,
        }
    }
}

/// Counts reported after one `generate` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub glyphs: usize,
    pub outlines: usize,
    pub polygons: usize,
    pub skipped_polygons: usize,
    pub vertices: usize,
    pub triangles: usize,
}

#[derive(Debug, Default)]
struct SessionState {
    mesh: Mesh,
    outlines: Vec<TessellatedContour>,
    polygons: Vec<Polygon>,
}

/// Exclusively owned pipeline state for one text run.
pub struct GenerationSession<S, T = LyonTriangulator> {
    source: S,
    triangulator: T,
    text: String,
    params: MeshParams,
    state: Option<SessionState>,
}

impl GenerationSession<FontFace> {
    /// Open the font at `path` and bind it to `text`.
    pub fn open(
        path: impl AsRef<Path>,
        text: impl Into<String>,
        params: MeshParams,
    ) -> Result<Self, SessionError> {
        params.validate()?;
        let face = FontFace::open(path, params.height)?;
        Self::with_source(face, text, params)
    }
}

impl<S: GlyphSource> GenerationSession<S> {
    /// Session over any glyph source, triangulated with lyon.
    pub fn with_source(
        source: S,
        text: impl Into<String>,
        params: MeshParams,
    ) -> Result<Self, SessionError> {
        Self::with_triangulator(source, LyonTriangulator::new(), text, params)
    }
}

impl<S: GlyphSource, T: Triangulator> GenerationSession<S, T> {
    pub fn with_triangulator(
        source: S,
        triangulator: T,
        text: impl Into<String>,
        params: MeshParams,
    ) -> Result<Self, SessionError> {
        params.validate()?;
        Ok(Self {
            source,
            triangulator,
            text: text.into(),
            params,
            state: Some(SessionState::default()),
        })
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn params(&self) -> &MeshParams {
        &self.params
    }

    #[inline]
    pub fn is_shut_down(&self) -> bool {
        self.state.is_none()
    }

    fn state(&self) -> Result<&SessionState, SessionError> {
        self.state.as_ref().ok_or(SessionError::Shutdown)
    }

    /// Run the pipeline over the session text.
    ///
    /// Outlines and polygons are always collected; with `build_mesh = false`
    /// no triangulation or extrusion happens. Previous results are discarded
    /// first, and a font error leaves the session empty.
    pub fn generate(&mut self, build_mesh: bool) -> Result<GenerationStats, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::Shutdown)?;
        *state = SessionState::default();

        let params = self.params;
        let mut next = SessionState::default();
        let mut pen = PenCursor::new();
        let mut stats = GenerationStats::default();

        for ch in self.text.chars() {
            let placed = pen.place(&mut self.source, ch)?;
            let contours = tessellate_glyph(&placed.glyph.contours, params.bezier_steps);
            let polygons = classify_glyph(&contours, placed.pen_x, params.containment);
            log::debug!(
                "glyph {:?} at x = {}: {} contours, {} polygons",
                ch,
                placed.pen_x,
                contours.len(),
                polygons.len()
            );

            if build_mesh {
                let mut builder = MeshBuilder::new(&mut next.mesh, params.extrusion());
                for polygon in &polygons {
                    let holes: Vec<&[Point]> =
                        polygon.holes.iter().map(TessellatedContour::points).collect();
                    let input = TriangulationInput::from_rings(polygon.outer.points(), &holes);
                    match self.triangulator.triangulate(&input) {
                        Ok(triangulation) => {
                            builder.add_caps(&triangulation, polygon.pen_offset);
                        }
                        Err(e) => {
                            stats.skipped_polygons += 1;
                            log::warn!("skipping caps of a polygon in glyph {ch:?}: {e}");
                        }
                    }
                }
                for contour in &contours {
                    builder.add_walls(contour, placed.pen_x);
                }
            }

            next.outlines
                .extend(contours.iter().map(|c| c.translated(placed.pen_x)));
            next.polygons.extend(polygons);
            stats.glyphs += 1;
        }

        stats.outlines = next.outlines.len();
        stats.polygons = next.polygons.len();
        stats.vertices = next.mesh.vertex_count();
        stats.triangles = next.mesh.triangle_count();
        log::info!(
            "generated {:?}: {} glyphs, {} outlines, {} polygons, {} vertices, {} triangles",
            self.text,
            stats.glyphs,
            stats.outlines,
            stats.polygons,
            stats.vertices,
            stats.triangles
        );

        *state = next;
        Ok(stats)
    }

    pub fn mesh(&self) -> Result<&Mesh, SessionError> {
        Ok(&self.state()?.mesh)
    }

    /// Tessellated outlines of every character, pen offset applied.
    pub fn outlines(&self) -> Result<&[TessellatedContour], SessionError> {
        Ok(&self.state()?.outlines)
    }

    /// Classified polygons in glyph-local coordinates.
    pub fn polygons(&self) -> Result<&[Polygon], SessionError> {
        Ok(&self.state()?.polygons)
    }

    /// Pen offset of every polygon, parallel to `polygons()`.
    pub fn offsets(&self) -> Result<Vec<f32>, SessionError> {
        Ok(self.polygons()?.iter().map(|p| p.pen_offset).collect())
    }

    pub fn outline_points(&self, max_step: f32) -> Result<ResampledOutline, SessionError> {
        Ok(sample::resample_outlines(self.outlines()?, max_step)?)
    }

    /// Interior lattice points, one list per polygon, pen offset applied.
    pub fn grid_points_inside(&self, pitch: f32) -> Result<Vec<Vec<Point>>, SessionError> {
        self.polygons()?
            .iter()
            .map(|p| sample::grid_points_inside(p, pitch).map_err(SessionError::from))
            .collect()
    }

    pub fn write_obj<W: Write>(&self, w: W) -> Result<(), SessionError> {
        Ok(mesh::write_obj(self.mesh()?, self.params.export_scale, w)?)
    }

    pub fn save_obj(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        Ok(mesh::save_obj(path, self.mesh()?, self.params.export_scale)?)
    }

    /// Release all accumulated buffers. Idempotent.
    pub fn shutdown(&mut self) {
        if self.state.take().is_some() {
            log::debug!("session for {:?} shut down", self.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl GlyphSource for Empty {
        fn glyph(&mut self, _ch: char) -> Result<crate::font::Glyph, FontError> {
            Ok(crate::font::Glyph {
                contours: Vec::new(),
                advance: 10.0,
            })
        }
    }

    #[test]
    fn default_params_are_valid() {
        assert!(MeshParams::default().validate().is_ok());
    }

    #[test]
    fn invalid_params_are_rejected() {
        for params in [
            MeshParams {
                height: 0,
                ..Default::default()
            },
            MeshParams {
                bezier_steps: 0,
                ..Default::default()
            },
            MeshParams {
                extrude: f32::INFINITY,
                ..Default::default()
            },
            MeshParams {
                bevel_radius: -1.0,
                ..Default::default()
            },
            MeshParams {
                export_scale: 0.0,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                params.validate(),
                Err(SessionError::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn calls_after_shutdown_fail() {
        let mut session = GenerationSession::with_source(Empty, "ab", MeshParams::default()).unwrap();
        let stats = session.generate(true).unwrap();
        assert_eq!(stats.glyphs, 2);
        assert!(session.mesh().unwrap().is_empty());

        session.shutdown();
        session.shutdown();
        assert!(session.is_shut_down());
        assert!(matches!(session.generate(true), Err(SessionError::Shutdown)));
        assert!(matches!(session.mesh(), Err(SessionError::Shutdown)));
        assert!(matches!(session.outline_points(5.0), Err(SessionError::Shutdown)));
        assert!(matches!(session.grid_points_inside(5.0), Err(SessionError::Shutdown)));
        assert!(matches!(session.write_obj(Vec::new()), Err(SessionError::Shutdown)));
    }
}
