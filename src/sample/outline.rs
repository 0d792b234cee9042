//! Outline resampling.
//!
//! Every edge `(p1, p2)` of a contour (cyclic) is split into the fewest `n`
//! equal pieces shorter than `max_step`. The edge contributes `p1` (flagged
//! original) followed by `n - 1` interpolated points; `p2` is contributed by
//! the next edge. Consecutive output points of one contour are therefore never
//! further apart than `max_step`.

use crate::contour::TessellatedContour;
use crate::geom::Point;
use crate::sample::{MAX_SAMPLES, SampleError};

/// Resampled points with a parallel "original vertex" flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResampledOutline {
    pub points: Vec<Point>,
    pub is_original: Vec<bool>,
}

impl ResampledOutline {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pairs of `(point, is_original)`.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.points.iter().copied().zip(self.is_original.iter().copied())
    }
}

fn check_step(max_step: f32) -> Result<(), SampleError> {
    if max_step.is_finite() && max_step > 0.0 {
        Ok(())
    } else {
        Err(SampleError::InvalidStep(max_step))
    }
}

/// Smallest `n >= 1` with `d / n < max_step`, or `None` past `MAX_SAMPLES`.
fn pieces(d: f32, max_step: f32) -> Option<usize> {
    let estimate = (d as f64 / max_step as f64).floor() + 1.0;
    if !(estimate <= MAX_SAMPLES as f64) {
        return None;
    }
    let mut n = estimate as usize;
    // Float rounding on the division can leave the bound unmet by one.
    while d / n as f32 >= max_step {
        n += 1;
    }
    (n <= MAX_SAMPLES).then_some(n)
}

/// Append the resampling of one contour to `out`.
fn push_contour(
    out: &mut ResampledOutline,
    contour: &TessellatedContour,
    max_step: f32,
) -> Result<(), SampleError> {
    let too_many = SampleError::TooManyPoints { limit: MAX_SAMPLES };
    for (p1, p2) in contour.edges() {
        let n = pieces((p2 - p1).length(), max_step).ok_or(too_many)?;
        if out.len() + n > MAX_SAMPLES {
            return Err(too_many);
        }
        for k in 0..n {
            let t = k as f32 / n as f32;
            out.points.push(p1.lerp(p2, t));
            out.is_original.push(k == 0);
        }
    }
    Ok(())
}

/// Resample a single contour.
pub fn resample_contour(
    contour: &TessellatedContour,
    max_step: f32,
) -> Result<ResampledOutline, SampleError> {
    check_step(max_step)?;
    let mut out = ResampledOutline::default();
    push_contour(&mut out, contour, max_step)?;
    Ok(out)
}

/// Resample every contour, concatenated in input order.
pub fn resample_outlines(
    contours: &[TessellatedContour],
    max_step: f32,
) -> Result<ResampledOutline, SampleError> {
    check_step(max_step)?;
    let mut out = ResampledOutline::default();
    for contour in contours {
        push_contour(&mut out, contour, max_step)?;
    }
    Ok(out)
}
