//! Read/write fit JSON files.
//!
//! Fit JSON is the "portable" representation of a regression:
//! - threshold, method and the four coefficients
//! - quality numbers (R², SSE, RMSE, continuity gap)
//! - a precomputed fitted grid for quick plotting
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{Coefficients, CurveGrid, DatasetStats, FitFile, FitMethod, FitQuality};
use crate::error::AppError;

/// Number of evenly spaced grid points (the breakpoint is added on top when in range).
pub const GRID_POINTS: usize = 101;

/// Build the portable fit description.
pub fn build_fit_file(
    coefficients: &Coefficients,
    quality: FitQuality,
    method: FitMethod,
    xth: f64,
    stats: &DatasetStats,
) -> FitFile {
    FitFile {
        tool: "bylin".to_string(),
        generated_at: Utc::now(),
        threshold: xth,
        method,
        coefficients: *coefficients,
        quality,
        grid: build_grid(coefficients, xth, stats.x_min, stats.x_max, GRID_POINTS),
    }
}

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, fit: &FitFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create fit JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, fit)
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;

    tracing::info!(path = %path.display(), "fit exported");
    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open fit JSON '{}': {e}", path.display())))?;
    let fit: FitFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid fit JSON: {e}")))?;
    Ok(fit)
}

/// Sample the piecewise line on `[x_min, x_max]`, ascending.
///
/// The breakpoint itself is inserted when it falls strictly inside the range
/// so the knee is drawn where it actually is.
pub fn build_grid(coefficients: &Coefficients, xth: f64, x_min: f64, x_max: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let mut x0 = x_min;
    let mut x1 = x_max;
    if !(x0.is_finite() && x1.is_finite()) || x1 < x0 {
        x0 = xth - 1.0;
        x1 = xth + 1.0;
    }
    if (x1 - x0).abs() < 1e-12 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let mut xs: Vec<f64> = (0..n)
        .map(|i| x0 + (i as f64 / (n as f64 - 1.0)) * (x1 - x0))
        .collect();
    if xth > x0 && xth < x1 && !xs.contains(&xth) {
        let at = xs.partition_point(|&v| v < xth);
        xs.insert(at, xth);
    }

    let y = xs.iter().map(|&x| coefficients.predict(x, xth)).collect();
    CurveGrid { x: xs, y }
}
