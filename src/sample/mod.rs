//! Point sets for downstream effect placement.
//!
//! - `outline`: arc-length-bounded resampling of tessellated contours.
//! - `grid`: lattice points strictly inside a polygon with holes.
//!
//! Both are pure functions of their inputs.

pub mod grid;
pub mod outline;

pub use grid::{GRID_DECIMALS, grid_points_inside};

/// Upper bound on the points one sampling call may produce. Small enough
/// that every count is exact in `f32`.
pub const MAX_SAMPLES: usize = 1 << 24;
pub use outline::{ResampledOutline, resample_contour, resample_outlines};

/// Invalid sampling parameters.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SampleError {
    #[error("max step must be positive and finite (got {0})")]
    InvalidStep(f32),

    #[error("grid pitch must be positive and finite (got {0})")]
    InvalidPitch(f32),

    #[error("sampling would produce more than {limit} points")]
    TooManyPoints { limit: usize },
}
