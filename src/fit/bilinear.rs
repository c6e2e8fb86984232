//! Closed-form bilinear fit at a fixed breakpoint.
//!
//! With `u = x - xth` on each subset:
//!
//! ```text
//! a_k = Σ(u-ū)(y-ȳ) / Σ(u-ū)²                        (OLS slope of segment k)
//! b2  = ȳ1 - a1·ū1 - a2·xth
//! b1  = ȳ2 - a2·ū2 - a1·xth
//! ```
//!
//! The intercepts are cross-assigned: each line is pinned at the breakpoint by
//! the mean behaviour of the *other* segment. For exactly piecewise-linear data
//! both lines meet at `xth`; with noise the lines can be offset there, see
//! `Coefficients::continuity_gap`.

use crate::domain::{Coefficients, SampleSet, Segment, SegmentSplit};
use crate::error::FitError;
use crate::math::{CentredMoments, has_distinct_values};

/// Fit both segments and return `(a1, b1, a2, b2)`.
pub fn fit_bilinear(left: &SampleSet, right: &SampleSet, xth: f64) -> Result<Coefficients, FitError> {
    let (m1, a1) = segment_slope(left, xth, Segment::Left)?;
    let (m2, a2) = segment_slope(right, xth, Segment::Right)?;

    let b2 = m1.mean_y() - a1 * m1.mean_u() - a2 * xth;
    let b1 = m2.mean_y() - a2 * m2.mean_u() - a1 * xth;

    Ok(Coefficients { a1, b1, a2, b2 })
}

/// Convenience wrapper over the splitter output.
pub fn fit_split(split: &SegmentSplit, xth: f64) -> Result<Coefficients, FitError> {
    fit_bilinear(&split.left, &split.right, xth)
}

fn segment_slope(
    samples: &SampleSet,
    xth: f64,
    segment: Segment,
) -> Result<(CentredMoments, f64), FitError> {
    let degenerate = FitError::DegenerateSegment {
        segment,
        n: samples.len(),
    };
    if !has_distinct_values(samples.x()) {
        return Err(degenerate);
    }

    let moments = CentredMoments::accumulate(samples.x(), samples.y(), xth);
    let slope = moments.slope().ok_or(degenerate)?;
    Ok((moments, slope))
}
