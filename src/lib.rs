//! `glyphmesh` library crate root.
//!
//! Turns a run of text into a closed, extruded triangle mesh:
//! font outline → curve tessellation → outer/hole classification →
//! planar triangulation → caps + side walls → OBJ-style export.
//!
//! The binary target stays thin and calls into these modules.
//!
//! Public API philosophy:
//! - Keep modules public so callers can assemble their own pipelines (custom
//!   `GlyphSource`s, other `Triangulator` backends).
//! - `session::GenerationSession` is the stable entrypoint; `generate_text_mesh`
//!   wraps the common "font file + text → generated session" case.
//!
//! The library never initializes logging; it only emits `log` records.

pub mod contour;
pub mod font;
pub mod geom;
pub mod mesh;
pub mod sample;
pub mod session;

use std::path::Path;

use anyhow::Context;

pub use session::{GenerationSession, GenerationStats, MeshParams, SessionError};

/// Open `font_path`, generate the mesh for `text` and return the session
/// holding it.
pub fn generate_text_mesh(
    font_path: impl AsRef<Path>,
    text: &str,
    params: MeshParams,
) -> anyhow::Result<GenerationSession<font::FontFace>> {
    let font_path = font_path.as_ref();
    let mut session = GenerationSession::open(font_path, text, params)
        .with_context(|| format!("opening {}", font_path.display()))?;
    session
        .generate(true)
        .with_context(|| format!("generating mesh for {text:?}"))?;
    Ok(session)
}
