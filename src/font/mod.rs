//! Font module root.
//!
//! Glyph geometry enters the pipeline here:
//! - `GlyphSource` is the font-engine contract the mesh session depends on
//!   (raw tagged contours, advance width and pair kerning per code point).
//! - `FontFace` implements it on top of `ttf-parser` for a single font file.
//! - `resolve::FontSystem` finds a font file for a family query via `fontdb`.
//!
//! Units:
//! - All geometry is reported in 26.6 fixed-point pixel units for a character
//!   size of `height` points rendered at 96 dpi, i.e. the numbers FreeType
//!   would put in `FT_Outline` after `FT_Set_Char_Size(height << 6, 96 dpi)`.

pub mod outline;
pub mod resolve;
pub mod text;

use std::{fs, path::Path, sync::Arc};

pub use outline::{CurveTag, RawContour};
pub use resolve::{FontQuery, FontSystem, ResolvedFont};

use outline::RawOutlineBuilder;

/// Rendering resolution used to turn a point size into pixels.
pub const DPI: f32 = 96.0;

/// Sub-pixel units per pixel in 26.6 fixed point.
pub const FIXED_ONE: f32 = 64.0;

/// Errors produced by the font subsystem.
#[derive(thiserror::Error, Debug)]
pub enum FontError {
    #[error("no fonts found on this system")]
    NoFontsAvailable,

    #[error("failed to resolve a font face for query: {0:?}")]
    ResolveFailed(FontQuery),

    #[error("font face has no file-backed source")]
    NonFileBackedSource,

    #[error("failed to read font file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font face {index} in {path}")]
    ParseFailed { path: String, index: u32 },

    #[error("invalid character height {0}; expected a positive size")]
    InvalidHeight(u32),

    #[error("glyph outline for {ch:?} could not be extracted")]
    OutlineFailed { ch: char },
}

/// Outline and metrics of one character.
#[derive(Debug, Clone, Default)]
pub struct Glyph {
    /// Contours in glyph-local coordinates (pen at x = 0).
    pub contours: Vec<RawContour>,
    /// Horizontal advance to the next pen position.
    pub advance: f32,
}

/// Font-engine contract used by the mesh session.
///
/// One code point maps to exactly one glyph; there is no shaping.
pub trait GlyphSource {
    /// Load the outline and advance for `ch`.
    fn glyph(&mut self, ch: char) -> Result<Glyph, FontError>;

    /// Horizontal kerning between `prev` and `ch`, in the same units as
    /// `Glyph::advance`. Fonts without kerning return 0.
    fn kerning(&mut self, _prev: char, _ch: char) -> f32 {
        0.0
    }
}

/// A parsed font file scaled to a character height.
///
/// The file is read once; `ttf_parser::Face` is re-parsed per call, which only
/// touches the table directory.
#[derive(Debug, Clone)]
pub struct FontFace {
    bytes: Arc<[u8]>,
    index: u32,
    path: String,
    units_per_em: f32,
    scale: f32,
    postscript_outlines: bool,
}

impl FontFace {
    /// Open the first face of a font file at `height` points.
    pub fn open(path: impl AsRef<Path>, height: u32) -> Result<Self, FontError> {
        Self::open_index(path, 0, height)
    }

    /// Open face `index` of a font file or collection at `height` points.
    pub fn open_index(path: impl AsRef<Path>, index: u32, height: u32) -> Result<Self, FontError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let data = fs::read(path).map_err(|source| FontError::ReadFailed {
            path: display.clone(),
            source,
        })?;
        Self::from_bytes(Arc::from(data), index, height, display)
    }

    /// Open a face resolved through `FontSystem`.
    pub fn open_resolved(font: &ResolvedFont, height: u32) -> Result<Self, FontError> {
        Self::open_index(&font.path, font.index, height)
    }

    fn from_bytes(
        bytes: Arc<[u8]>,
        index: u32,
        height: u32,
        path: String,
    ) -> Result<Self, FontError> {
        if height == 0 {
            return Err(FontError::InvalidHeight(height));
        }

        let parsed = ttf_parser::Face::parse(&bytes, index).map_err(|_| FontError::ParseFailed {
            path: path.clone(),
            index,
        })?;

        let units_per_em = parsed.units_per_em() as f32;
        let pixels_per_em = height as f32 * DPI / 72.0;
        let scale = pixels_per_em * FIXED_ONE / units_per_em;

        let tables = parsed.tables();
        let postscript_outlines = tables.cff.is_some() || tables.cff2.is_some();

        log::debug!(
            "opened font {path} (face {index}): upem={units_per_em}, height={height}pt, scale={scale}, cff={postscript_outlines}"
        );

        Ok(Self {
            bytes,
            index,
            path,
            units_per_em,
            scale,
            postscript_outlines,
        })
    }

    #[inline]
    pub fn units_per_em(&self) -> f32 {
        self.units_per_em
    }

    /// Factor mapping font units to output units.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn parse(&self) -> Result<ttf_parser::Face<'_>, FontError> {
        ttf_parser::Face::parse(&self.bytes, self.index).map_err(|_| FontError::ParseFailed {
            path: self.path.clone(),
            index: self.index,
        })
    }
}

impl GlyphSource for FontFace {
    fn glyph(&mut self, ch: char) -> Result<Glyph, FontError> {
        let face = self.parse()?;
        // Unmapped code points render as .notdef, like FreeType's FT_Load_Char.
        let gid = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));

        let advance = face
            .glyph_hor_advance(gid)
            .map(|adv| (adv as f32 * self.scale).round())
            .unwrap_or(0.0);

        let mut builder = RawOutlineBuilder::new(self.scale);
        // `None` means an empty outline (e.g. space): no contours, still advances.
        let _bbox = face.outline_glyph(gid, &mut builder);
        let mut contours = builder.finish();

        if self.postscript_outlines {
            contours.iter_mut().for_each(RawContour::reverse);
        }

        Ok(Glyph { contours, advance })
    }

    fn kerning(&mut self, prev: char, ch: char) -> f32 {
        let Ok(face) = self.parse() else {
            return 0.0;
        };
        let (Some(left), Some(right)) = (face.glyph_index(prev), face.glyph_index(ch)) else {
            return 0.0;
        };
        let Some(kern) = face.tables().kern else {
            return 0.0;
        };

        kern.subtables
            .into_iter()
            .filter(|st| st.horizontal && !st.variable)
            .find_map(|st| st.glyphs_kerning(left, right))
            .map(|k| (k as f32 * self.scale).round())
            .unwrap_or(0.0)
    }
}
