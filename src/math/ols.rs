//! Least squares building blocks.
//!
//! Two flavours are used in this project:
//!
//! - closed-form simple regression on one segment, computed from centred sums
//!   with x measured from an origin (the breakpoint)
//! - a general small least-squares solve for design matrices (the hinge fit)
//!
//! For the general solve we use SVD so tall (more rows than columns) systems
//! work. Nalgebra's `QR::solve` is intended for square systems and will panic
//! for non-square matrices.

use nalgebra::{DMatrix, DVector};

/// Centred second moments of one segment, with `u = x - origin`.
///
/// Means are taken first and the deviations summed in a second pass, so a
/// tight cluster of x values far from the origin keeps its spread.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CentredMoments {
    n: usize,
    mean_u: f64,
    mean_y: f64,
    /// `Σ(u - ū)²`
    sxx: f64,
    /// `Σ(u - ū)(y - ȳ)`
    sxy: f64,
}

impl CentredMoments {
    pub fn accumulate(x: &[f64], y: &[f64], origin: f64) -> Self {
        let n = x.len().min(y.len());
        if n == 0 {
            return Self::default();
        }
        let mut su = 0.0;
        let mut sy = 0.0;
        for (&xi, &yi) in x.iter().zip(y) {
            su += xi - origin;
            sy += yi;
        }
        let mean_u = su / n as f64;
        let mean_y = sy / n as f64;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&xi, &yi) in x.iter().zip(y) {
            let du = (xi - origin) - mean_u;
            sxx += du * du;
            sxy += du * (yi - mean_y);
        }

        CentredMoments {
            n,
            mean_u,
            mean_y,
            sxx,
            sxy,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Zero means no usable spread in x.
    pub fn sxx(&self) -> f64 {
        self.sxx
    }

    pub fn sxy(&self) -> f64 {
        self.sxy
    }

    pub fn mean_u(&self) -> f64 {
        self.mean_u
    }

    pub fn mean_y(&self) -> f64 {
        self.mean_y
    }

    /// Ordinary least-squares slope, or `None` when the denominator is not
    /// strictly positive (fewer than 2 points or zero variance in x).
    pub fn slope(&self) -> Option<f64> {
        if self.n < 2 {
            return None;
        }
        if !(self.sxx > 0.0 && self.sxx.is_finite()) {
            return None;
        }
        let slope = self.sxy / self.sxx;
        slope.is_finite().then_some(slope)
    }
}

/// True when the slice holds at least two different values.
pub fn has_distinct_values(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().any(|v| v != first),
        None => false,
    }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() < x.ncols() {
        return None;
    }
    let svd = x.clone().svd(true, true);

    // A zero column (e.g. no samples on one side of the hinge) shows up as a
    // vanishing singular value; treat that as unsolvable instead of returning
    // the minimum-norm solution.
    let s_max = svd.singular_values.max();
    let s_min = svd.singular_values.min();
    if !(s_max > 0.0) || s_min <= s_max * 1e-12 {
        return None;
    }

    let beta = svd.solve(y, 1e-12).ok()?;
    beta.iter().all(|v| v.is_finite()).then_some(beta)
}
