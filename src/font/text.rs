//! Pen layout for a run of characters.
//!
//! The layout model is deliberately naive:
//! - one baseline at y = 0
//! - one glyph per code point (no shaping, ligatures or bidi)
//! - the pen moves right by kerning (against the previous character) before a
//!   glyph and by the glyph's advance after it
//!
//! `PenCursor` is the per-session context threaded through each
//! character-processing step.

use crate::font::{FontError, Glyph, GlyphSource};

/// Running horizontal pen state for one text run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PenCursor {
    /// Current pen x in output units.
    pub x: f32,
    previous: Option<char>,
}

/// A glyph together with the pen offset it was placed at.
#[derive(Debug, Clone)]
pub struct PlacedGlyph {
    pub ch: char,
    pub pen_x: f32,
    pub glyph: Glyph,
}

impl PenCursor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn previous(&self) -> Option<char> {
        self.previous
    }

    /// Apply kerning for `ch`, load its glyph and return it with the pen
    /// offset it should be drawn at. The pen is then advanced past it.
    pub fn place<S: GlyphSource + ?Sized>(
        &mut self,
        source: &mut S,
        ch: char,
    ) -> Result<PlacedGlyph, FontError> {
        if let Some(prev) = self.previous {
            self.x += source.kerning(prev, ch);
        }

        let glyph = source.glyph(ch)?;
        let pen_x = self.x;

        self.previous = Some(ch);
        self.x += glyph.advance;

        Ok(PlacedGlyph { ch, pen_x, glyph })
    }
}
