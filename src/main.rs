//! Thin binary wrapper: parse arguments, set up logging, call the library.
//!
//! Run:
//! - `glyphmesh --font path/to/font.ttf --text "Hello" -o hello.obj`
//! - `glyphmesh --family serif --text "O" --outline-points o.txt --outlines-only`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use glyphmesh::contour::Containment;
use glyphmesh::font::{FontFace, FontQuery, FontSystem};
use glyphmesh::mesh::EXPORT_SCALE;
use glyphmesh::{GenerationSession, MeshParams};

#[derive(Parser)]
#[command(version, about = "Extrude text into a closed triangle mesh")]
struct Cli {
    /// Font file (.ttf, .otf, .ttc)
    #[arg(long, conflicts_with = "family")]
    font: Option<PathBuf>,

    /// Resolve a system font by family name instead of a file
    #[arg(long)]
    family: Option<String>,

    /// Face index inside a font collection
    #[arg(long, default_value_t = 0)]
    face_index: u32,

    /// Text to mesh, one glyph per code point
    #[arg(short, long)]
    text: String,

    /// Character size in points
    #[arg(long, default_value_t = 48)]
    height: u32,

    /// Samples per curve segment
    #[arg(long, default_value_t = 3)]
    bezier_steps: u32,

    /// Extrusion depth (may be negative)
    #[arg(long, default_value_t = 96.0, allow_negative_numbers = true)]
    extrude: f32,

    /// Offset of the caps from the walls (no bevel geometry is built)
    #[arg(long, default_value_t = 0.0)]
    bevel_radius: f32,

    /// Bevel subdivisions (accepted, currently unused)
    #[arg(long, default_value_t = 4)]
    bevel_steps: u32,

    /// Uniform scale applied to exported positions
    #[arg(long, default_value_t = EXPORT_SCALE)]
    export_scale: f32,

    /// Attach holes by true point-in-polygon nesting, not bounding boxes only
    #[arg(long)]
    true_nesting: bool,

    /// Mesh output file
    #[arg(short, long, default_value = "text.obj")]
    output: PathBuf,

    /// Skip meshing; only collect outlines and polygons
    #[arg(long)]
    outlines_only: bool,

    /// Maximum spacing of resampled outline points
    #[arg(long, default_value_t = 30.0)]
    outline_step: f32,

    /// Write resampled outline points (`x y original`) to this file
    #[arg(long, value_name = "FILE")]
    outline_points: Option<PathBuf>,

    /// Lattice pitch for interior points
    #[arg(long, default_value_t = 10.0)]
    grid_pitch: f32,

    /// Write interior lattice points (`polygon x y`) to this file
    #[arg(long, value_name = "FILE")]
    grid_points: Option<PathBuf>,
}

impl Cli {
    fn params(&self) -> MeshParams {
        MeshParams {
            height: self.height,
            bezier_steps: self.bezier_steps,
            extrude: self.extrude,
            bevel_radius: self.bevel_radius,
            bevel_steps: self.bevel_steps,
            containment: if self.true_nesting {
                Containment::Geometric
            } else {
                Containment::BoundingBox
            },
            export_scale: self.export_scale,
        }
    }

    fn open_font(&self) -> anyhow::Result<FontFace> {
        if let Some(path) = &self.font {
            return FontFace::open_index(path, self.face_index, self.height)
                .with_context(|| format!("opening font {}", path.display()));
        }

        let query = match &self.family {
            Some(name) => FontQuery::family(name.clone()),
            None => FontQuery::default(),
        };
        let resolved = FontSystem::new()?.resolve(&query)?;
        log::info!(
            "using {} (face {}) for {:?}",
            resolved.path.display(),
            resolved.index,
            query.families
        );
        Ok(FontFace::open_resolved(&resolved, self.height)?)
    }
}

fn create(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn main() -> anyhow::Result<()> {
    // Keep logging setup in the binary so the library remains unopinionated.
    env_logger::init();

    let cli = Cli::parse();
    let face = cli.open_font()?;
    let mut session = GenerationSession::with_source(face, cli.text.as_str(), cli.params())?;

    let stats = session.generate(!cli.outlines_only)?;
    if stats.skipped_polygons > 0 {
        log::warn!("{} polygons could not be triangulated", stats.skipped_polygons);
    }

    if !cli.outlines_only {
        session.save_obj(&cli.output)?;
        println!(
            "wrote {} ({} vertices, {} triangles)",
            cli.output.display(),
            stats.vertices,
            stats.triangles
        );
    }

    if let Some(path) = &cli.outline_points {
        let outline = session.outline_points(cli.outline_step)?;
        let mut w = create(path)?;
        for (p, original) in outline.iter() {
            writeln!(w, "{} {} {}", p.x, p.y, u8::from(original))?;
        }
        w.flush()?;
        println!("wrote {} outline points to {}", outline.len(), path.display());
    }

    if let Some(path) = &cli.grid_points {
        let grids = session.grid_points_inside(cli.grid_pitch)?;
        let mut w = create(path)?;
        let mut total = 0;
        for (polygon, points) in grids.iter().enumerate() {
            for p in points {
                writeln!(w, "{polygon} {} {}", p.x, p.y)?;
            }
            total += points.len();
        }
        w.flush()?;
        println!("wrote {total} interior points to {}", path.display());
    }

    session.shutdown();
    Ok(())
}
