//! Partition samples at the breakpoint.
//!
//! Both subsets are closed intervals: `x <= xth` goes left, `x >= xth` goes
//! right, and the two checks are independent, so a sample sitting exactly on
//! the breakpoint lands in both. Relative input order is preserved.

use crate::domain::{SampleSet, SegmentSplit};
use crate::error::FitError;

/// Split paired samples at `xth`.
///
/// Empty subsets are not an error here; the fitter reports them.
pub fn split(x: &[f64], y: &[f64], xth: f64) -> Result<SegmentSplit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    Ok(partition(x.iter().copied().zip(y.iter().copied()), x.len(), xth))
}

/// Split a `SampleSet` (lengths already validated).
pub fn split_samples(samples: &SampleSet, xth: f64) -> SegmentSplit {
    partition(samples.iter(), samples.len(), xth)
}

fn partition(pairs: impl Iterator<Item = (f64, f64)>, n: usize, xth: f64) -> SegmentSplit {
    let mut left = SampleSet::with_capacity(n);
    let mut right = SampleSet::with_capacity(n);
    for (xi, yi) in pairs {
        if xi <= xth {
            left.push(xi, yi);
        }
        if xi >= xth {
            right.push(xi, yi);
        }
    }
    SegmentSplit { left, right }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_point_lands_in_both_subsets() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [0.0, 1.0, 2.0, 1.0, 0.0, -1.0];
        let s = split(&x, &y, 2.0).unwrap();

        assert_eq!(s.left.x(), &[0.0, 1.0, 2.0]);
        assert_eq!(s.left.y(), &[0.0, 1.0, 2.0]);
        assert_eq!(s.right.x(), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.right.y(), &[2.0, 1.0, 0.0, -1.0]);
        assert_eq!(s.boundary_count(2.0), 1);
    }

    #[test]
    fn unordered_input_keeps_relative_order() {
        let x = [5.0, -1.0, 3.0, 0.5, 4.0];
        let y = [50.0, -10.0, 30.0, 5.0, 40.0];
        let s = split(&x, &y, 2.0).unwrap();

        assert_eq!(s.left.x(), &[-1.0, 0.5]);
        assert_eq!(s.left.y(), &[-10.0, 5.0]);
        assert_eq!(s.right.x(), &[5.0, 3.0, 4.0]);
        assert_eq!(s.right.y(), &[50.0, 30.0, 40.0]);
        assert_eq!(s.boundary_count(2.0), 0);
    }

    #[test]
    fn every_point_appears_at_least_once() {
        let x = [0.3, 1.7, 2.0, 2.0, 9.1, -4.0, 2.5];
        let y = [1.0; 7];
        for &xth in &[-10.0, -4.0, 0.0, 2.0, 2.2, 9.1, 50.0] {
            let s = split(&x, &y, xth).unwrap();
            let on_boundary = x.iter().filter(|&&v| v == xth).count();
            assert_eq!(s.left.len() + s.right.len(), x.len() + on_boundary);
            for &v in &x {
                assert!(s.left.x().contains(&v) || s.right.x().contains(&v));
            }
        }
    }

    #[test]
    fn threshold_outside_range_leaves_one_side_empty() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        let s = split(&x, &y, 10.0).unwrap();
        assert_eq!(s.left.len(), 3);
        assert!(s.right.is_empty());
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = split(&[1.0, 2.0, 3.0], &[1.0, 2.0], 2.0).unwrap_err();
        assert_eq!(err, FitError::LengthMismatch { x_len: 3, y_len: 2 });
    }

    #[test]
    fn split_samples_agrees_with_slices() {
        let samples: SampleSet = [(0.0, 1.0), (2.0, 3.0), (4.0, 5.0)].into_iter().collect();
        let a = split_samples(&samples, 2.0);
        let b = split(samples.x(), samples.y(), 2.0).unwrap();
        assert_eq!(a, b);
    }
}
