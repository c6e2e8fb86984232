//! Shared fit pipeline used by the `fit` command and by tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! read inputs -> split -> fit -> evaluate -> quality + grid
//!
//! The front-end then focuses on presentation (printing, plotting, exports).

use crate::domain::{
    Coefficients, CurveGrid, DatasetStats, Evaluation, FitConfig, FitMethod, FitQuality, SegmentSplit,
};
use crate::error::AppError;
use crate::fit::{evaluate, fit_with_method, split_samples};
use crate::io::curve::{GRID_POINTS, build_grid};
use crate::io::ingest::{Dataset, read_dataset, read_threshold};

/// Relative tolerance for calling the two lines continuous at the breakpoint.
pub const CONTINUITY_RTOL: f64 = 1e-9;

/// All computed outputs of a single fit run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub stats: DatasetStats,
    pub threshold: f64,
    pub method: FitMethod,
    pub split: SegmentSplit,
    pub coefficients: Coefficients,
    pub evaluation: Evaluation,
    pub quality: FitQuality,
    pub grid: CurveGrid,
}

/// Read both input files and run the fit.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let dataset = read_dataset(&config.dataset_path)?;
    let xth = read_threshold(&config.threshold_path)?;
    run_fit_on(dataset, xth, config.method)
}

/// Run the fit on already-loaded inputs.
pub fn run_fit_on(dataset: Dataset, xth: f64, method: FitMethod) -> Result<RunOutput, AppError> {
    let stats = DatasetStats::compute(&dataset.samples)
        .ok_or_else(|| AppError::new(3, "No usable samples to fit."))?;

    if xth < stats.x_min || xth > stats.x_max {
        tracing::warn!(
            xth,
            x_min = stats.x_min,
            x_max = stats.x_max,
            "breakpoint lies outside the data range"
        );
    }

    let samples = &dataset.samples;
    let split = split_samples(samples, xth);
    tracing::debug!(
        left = split.left.len(),
        right = split.right.len(),
        shared = split.boundary_count(xth),
        "samples split at breakpoint"
    );

    let coefficients = fit_with_method(method, samples, &split, xth)?;
    let evaluation = evaluate(samples.x(), samples.y(), &coefficients, xth)?;

    let continuity_gap = coefficients.continuity_gap(xth);
    let scale = coefficients.left_at(xth).abs().max(1.0);
    if continuity_gap.abs() > CONTINUITY_RTOL * scale {
        tracing::warn!(
            gap = continuity_gap,
            "fitted lines do not meet at the breakpoint"
        );
    }

    let quality = FitQuality {
        r2: evaluation.r2,
        sse: evaluation.sse,
        rmse: evaluation.rmse,
        n: samples.len(),
        continuity_gap,
    };
    let grid = build_grid(&coefficients, xth, stats.x_min, stats.x_max, GRID_POINTS);

    tracing::info!(
        method = method.display_name(),
        r2 = evaluation.r2,
        "fit complete"
    );

    Ok(RunOutput {
        dataset,
        stats,
        threshold: xth,
        method,
        split,
        coefficients,
        evaluation,
        quality,
        grid,
    })
}
