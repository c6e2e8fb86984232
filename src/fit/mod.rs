//! The regression core.
//!
//! Responsibilities:
//!
//! - split samples at the breakpoint (`split`)
//! - estimate the four coefficients (`bilinear`, or `hinge` when requested)
//! - compute fitted values and R² (`evaluate`)
//!
//! Everything here is pure: no I/O, no logging, typed errors only.

pub mod bilinear;
pub mod evaluate;
pub mod hinge;
pub mod split;

pub use bilinear::*;
pub use evaluate::*;
pub use hinge::*;
pub use split::*;

use crate::domain::{Coefficients, FitMethod, SampleSet, SegmentSplit};
use crate::error::FitError;

/// Estimate coefficients with the requested method.
pub fn fit_with_method(
    method: FitMethod,
    samples: &SampleSet,
    split: &SegmentSplit,
    xth: f64,
) -> Result<Coefficients, FitError> {
    match method {
        FitMethod::ClosedForm => fit_split(split, xth),
        FitMethod::Hinge => fit_hinge(samples, xth),
    }
}
