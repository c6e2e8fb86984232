//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - paired observations (`SampleSet`) and the splitter output (`SegmentSplit`)
//! - fit outputs (`Coefficients`, `Evaluation`)
//! - run configuration (`FitConfig`, `FitMethod`)

pub mod types;

pub use types::*;
