//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::plot::PlotStyle;

/// Ordered `(x, y)` observations, paired by index.
///
/// The two sequences always have equal length; `new` is the only way to build
/// one from separate vectors and it rejects mismatched input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleSet")]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Unchecked wire form; deserialization goes through `SampleSet::new`.
#[derive(Deserialize)]
struct RawSampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TryFrom<RawSampleSet> for SampleSet {
    type Error = FitError;

    fn try_from(raw: RawSampleSet) -> Result<Self, Self::Error> {
        SampleSet::new(raw.x, raw.y)
    }
}

impl SampleSet {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

impl FromIterator<(f64, f64)> for SampleSet {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let (x, y) = iter.into_iter().unzip();
        Self { x, y }
    }
}

/// Which side of the breakpoint a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// `x <= xth`
    Left,
    /// `x > xth` for evaluation, `x >= xth` for splitting.
    Right,
}

impl Segment {
    pub fn as_str(self) -> &'static str {
        match self {
            Segment::Left => "left",
            Segment::Right => "right",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two closed-interval subsets produced by the splitter.
///
/// A sample sitting exactly on the threshold belongs to both subsets.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSplit {
    pub left: SampleSet,
    pub right: SampleSet,
}

impl SegmentSplit {
    /// Number of samples present in both subsets (those with `x == xth`).
    pub fn boundary_count(&self, xth: f64) -> usize {
        self.left.x().iter().filter(|&&x| x == xth).count()
    }
}

/// Slope/intercept pairs of the two regression lines.
///
/// The fitted function is `a1*x + b1` for `x <= xth` and `a2*x + b2` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub a1: f64,
    pub b1: f64,
    pub a2: f64,
    pub b2: f64,
}

impl Coefficients {
    pub fn segment_for(x: f64, xth: f64) -> Segment {
        if x <= xth { Segment::Left } else { Segment::Right }
    }

    /// Evaluate the piecewise function at `x`.
    pub fn predict(&self, x: f64, xth: f64) -> f64 {
        match Self::segment_for(x, xth) {
            Segment::Left => self.a1 * x + self.b1,
            Segment::Right => self.a2 * x + self.b2,
        }
    }

    /// Value of the left line at the breakpoint.
    pub fn left_at(&self, xth: f64) -> f64 {
        self.a1 * xth + self.b1
    }

    /// Value of the right line at the breakpoint.
    pub fn right_at(&self, xth: f64) -> f64 {
        self.a2 * xth + self.b2
    }

    /// Signed jump between the two lines at the breakpoint (left minus right).
    pub fn continuity_gap(&self, xth: f64) -> f64 {
        self.left_at(xth) - self.right_at(xth)
    }
}

/// Fitted values aligned with the input x sequence, plus goodness of fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub fitted: Vec<f64>,
    pub r2: f64,
    /// Sum of squared residuals.
    pub sse: f64,
    pub rmse: f64,
}

impl Evaluation {
    pub fn residuals<'a>(&'a self, y: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        y.iter().zip(self.fitted.iter()).map(|(y, f)| y - f)
    }
}

/// How the four coefficients are estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FitMethod {
    /// Per-segment slopes with cross-pinned intercepts.
    #[default]
    ClosedForm,
    /// Joint least squares on `c + a1*min(x-xth,0) + a2*max(x-xth,0)`.
    Hinge,
}

impl FitMethod {
    pub fn display_name(self) -> &'static str {
        match self {
            FitMethod::ClosedForm => "closed-form",
            FitMethod::Hinge => "hinge",
        }
    }
}

/// Goodness-of-fit numbers carried alongside a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub r2: f64,
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
    /// `(a1*xth + b1) - (a2*xth + b2)`
    pub continuity_gap: f64,
}

/// Sampled fitted line, ascending in x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Portable fit file written by `--export-fit` and read by `bylin plot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub threshold: f64,
    pub method: FitMethod,
    pub coefficients: Coefficients,
    pub quality: FitQuality,
    pub grid: CurveGrid,
}

/// Summary stats about the samples actually used for fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DatasetStats {
    pub fn compute(samples: &SampleSet) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut stats = DatasetStats {
            n_points: samples.len(),
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for (x, y) in samples.iter() {
            stats.x_min = stats.x_min.min(x);
            stats.x_max = stats.x_max.max(x);
            stats.y_min = stats.y_min.min(y);
            stats.y_max = stats.y_max.max(y);
        }
        Some(stats)
    }
}

/// Resolved run configuration.
///
/// Built from CLI arguments (and environment defaults) by `app`; the pipeline
/// only ever sees this struct.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub dataset_path: PathBuf,
    pub threshold_path: PathBuf,
    pub method: FitMethod,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub show_points: bool,

    pub svg_path: Option<PathBuf>,
    pub style: PlotStyle,

    pub export_results: Option<PathBuf>,
    pub export_fit: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_rejects_mismatched_lengths() {
        let err = SampleSet::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert_eq!(err, FitError::LengthMismatch { x_len: 2, y_len: 1 });
    }

    #[test]
    fn deserialized_sample_set_checks_lengths() {
        let err = serde_json::from_str::<SampleSet>(r#"{"x":[0,1,2,3,4,5],"y":[0,1]}"#).unwrap_err();
        assert!(err.to_string().contains("x: 6, y: 2"), "{err}");

        let s: SampleSet = serde_json::from_str(r#"{"x":[0,1],"y":[2,3]}"#).unwrap();
        assert_eq!(s.x(), &[0.0, 1.0]);
        assert_eq!(s.y(), &[2.0, 3.0]);
    }

    #[test]
    fn predict_uses_left_line_at_breakpoint() {
        let c = Coefficients {
            a1: 1.0,
            b1: 0.0,
            a2: -1.0,
            b2: 10.0,
        };
        assert_eq!(c.predict(2.0, 2.0), 2.0);
        assert_eq!(c.predict(3.0, 2.0), 7.0);
        assert_eq!(c.continuity_gap(2.0), 2.0 - 8.0);
    }

    #[test]
    fn stats_cover_both_axes() {
        let s: SampleSet = [(1.0, -2.0), (-3.0, 4.0), (2.0, 0.5)].into_iter().collect();
        let stats = DatasetStats::compute(&s).unwrap();
        assert_eq!(stats.n_points, 3);
        assert_eq!((stats.x_min, stats.x_max), (-3.0, 2.0));
        assert_eq!((stats.y_min, stats.y_max), (-2.0, 4.0));
        assert!(DatasetStats::compute(&SampleSet::default()).is_none());
    }
}
