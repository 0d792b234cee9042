//! System font lookup.
//!
//! The mesh session is bound to a font *file*. When the caller only knows a
//! family name, `FontSystem` consults a `fontdb::Database` of system fonts and
//! returns the file path + face index that best matches the query.
//!
//! Resolution strategy:
//! - Try the named families in order with the requested weight/style.
//! - Fall back to generic `sans-serif`.
//! - Fall back to the first face in the database.

use std::path::PathBuf;

use fontdb::{Database, Family, Query, Source, Style, Weight};

use crate::font::FontError;

/// Simplified font style selection.
#[derive(Debug, Clone)]
pub struct FontQuery {
    /// Preferred family names, in priority order. Generic names
    /// (`serif`, `sans-serif`, `monospace`) are understood.
    pub families: Vec<String>,

    /// CSS-style weight (400 regular, 700 bold).
    pub weight: u16,

    pub italic: bool,
}

impl Default for FontQuery {
    fn default() -> Self {
        Self {
            families: vec!["sans-serif".to_string()],
            weight: 400,
            italic: false,
        }
    }
}

impl FontQuery {
    pub fn family(name: impl Into<String>) -> Self {
        Self {
            families: vec![name.into()],
            ..Default::default()
        }
    }
}

/// A concrete font file selected for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    pub path: PathBuf,
    pub index: u32,
}

/// Owns a `fontdb::Database` loaded with system fonts.
pub struct FontSystem {
    db: Database,
}

impl FontSystem {
    /// Create a font system and load system fonts.
    pub fn new() -> Result<Self, FontError> {
        let mut db = Database::new();
        db.load_system_fonts();

        if db.faces().next().is_none() {
            return Err(FontError::NoFontsAvailable);
        }
        log::debug!("font system loaded {} faces", db.len());

        Ok(Self { db })
    }

    /// Resolve a query to a file-backed face.
    pub fn resolve(&self, query: &FontQuery) -> Result<ResolvedFont, FontError> {
        let style = if query.italic {
            Style::Italic
        } else {
            Style::Normal
        };
        let weight = Weight(query.weight.clamp(1, 1000));

        let families = parse_families(&query.families);
        let q = Query {
            families: &families,
            weight,
            style,
            stretch: fontdb::Stretch::Normal,
        };

        let id = self
            .db
            .query(&q)
            .or_else(|| {
                let fallback = [Family::SansSerif];
                self.db.query(&Query {
                    families: &fallback,
                    weight,
                    style,
                    stretch: fontdb::Stretch::Normal,
                })
            })
            .or_else(|| self.db.faces().next().map(|f| f.id))
            .ok_or_else(|| FontError::ResolveFailed(query.clone()))?;

        let face = self
            .db
            .face(id)
            .ok_or_else(|| FontError::ResolveFailed(query.clone()))?;

        match &face.source {
            Source::File(path) => {
                log::info!("resolved {:?} to {} (face {})", query.families, path.display(), face.index);
                Ok(ResolvedFont {
                    path: path.to_path_buf(),
                    index: face.index,
                })
            }
            _ => Err(FontError::NonFileBackedSource),
        }
    }
}

fn parse_families(names: &[String]) -> Vec<Family<'_>> {
    let mut families = Vec::with_capacity(names.len());
    for name in names {
        let s = name.trim();
        if s.eq_ignore_ascii_case("serif") {
            families.push(Family::Serif);
        } else if s.eq_ignore_ascii_case("sans-serif") || s.eq_ignore_ascii_case("sans") {
            families.push(Family::SansSerif);
        } else if s.eq_ignore_ascii_case("monospace") || s.eq_ignore_ascii_case("mono") {
            families.push(Family::Monospace);
        } else if !s.is_empty() {
            families.push(Family::Name(s));
        }
    }
    families
}
