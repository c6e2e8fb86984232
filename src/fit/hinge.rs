//! Jointly constrained hinge fit.
//!
//! Solves, over the full sample set,
//!
//! ```text
//! minimize Σ (y_i - c - a1·min(x_i - xth, 0) - a2·max(x_i - xth, 0))²
//! ```
//!
//! and maps back to slope/intercept form (`b1 = c - a1·xth`,
//! `b2 = c - a2·xth`), so the two lines meet exactly at the breakpoint.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Coefficients, SampleSet, Segment};
use crate::error::FitError;
use crate::math::solve_least_squares;

pub fn fit_hinge(samples: &SampleSet, xth: f64) -> Result<Coefficients, FitError> {
    let n = samples.len();

    // Each slope needs at least one sample strictly on its side; otherwise its
    // design column is identically zero.
    let n_left = samples.x().iter().filter(|&&x| x < xth).count();
    let n_right = samples.x().iter().filter(|&&x| x > xth).count();
    if n_left == 0 {
        return Err(FitError::DegenerateSegment {
            segment: Segment::Left,
            n: n - n_right,
        });
    }
    if n_right == 0 {
        return Err(FitError::DegenerateSegment {
            segment: Segment::Right,
            n: n - n_left,
        });
    }

    let mut design = DMatrix::<f64>::zeros(n, 3);
    let mut obs = DVector::<f64>::zeros(n);
    for (i, (x, y)) in samples.iter().enumerate() {
        let u = x - xth;
        design[(i, 0)] = 1.0;
        design[(i, 1)] = u.min(0.0);
        design[(i, 2)] = u.max(0.0);
        obs[i] = y;
    }

    // Three unknowns with one point per side (plus none at the knee) leaves the
    // system underdetermined; blame the smaller side.
    let beta = solve_least_squares(&design, &obs).ok_or_else(|| {
        let (segment, side) = if n_left <= n_right {
            (Segment::Left, n - n_right)
        } else {
            (Segment::Right, n - n_left)
        };
        FitError::DegenerateSegment { segment, n: side }
    })?;

    let (c, a1, a2) = (beta[0], beta[1], beta[2]);
    Ok(Coefficients {
        a1,
        b1: c - a1 * xth,
        a2,
        b2: c - a2 * xth,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn samples(pairs: &[(f64, f64)]) -> SampleSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn recovers_exact_tent() {
        let s = samples(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 1.0), (4.0, 0.0), (5.0, -1.0)]);
        let c = fit_hinge(&s, 2.0).unwrap();
        assert_abs_diff_eq!(c.a1, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(c.b1, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(c.a2, -1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(c.b2, 4.0, epsilon = 1e-10);
    }

    #[test]
    fn lines_meet_at_breakpoint_for_noisy_data() {
        let s = samples(&[
            (0.0, 0.2),
            (1.0, 0.8),
            (2.0, 2.3),
            (3.0, 1.1),
            (4.0, -0.2),
            (5.0, -0.9),
            (6.0, -2.4),
        ]);
        let c = fit_hinge(&s, 2.5).unwrap();
        assert_abs_diff_eq!(c.continuity_gap(2.5), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn no_sample_right_of_breakpoint_is_degenerate() {
        let s = samples(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let err = fit_hinge(&s, 2.0).unwrap_err();
        assert_eq!(
            err,
            FitError::DegenerateSegment {
                segment: Segment::Right,
                n: 1
            }
        );
    }
}
