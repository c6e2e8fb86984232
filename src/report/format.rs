//! Terminal formatting for a fit run.

use crate::app::pipeline::RunOutput;
use crate::domain::{Coefficients, FitConfig};

/// Maximum number of skipped line numbers listed inline.
const MAX_LISTED_ROW_ERRORS: usize = 5;

/// Format the full run summary (dataset stats + split + coefficients + quality).
pub fn format_run_summary(run: &RunOutput, config: &FitConfig) -> String {
    let mut out = String::new();
    let xth = run.threshold;
    let c = &run.coefficients;

    out.push_str("=== bylin - Bilinear Regression ===\n");
    out.push_str(&format!("Dataset: {}\n", config.dataset_path.display()));
    out.push_str(&format!("Threshold file: {}\n", config.threshold_path.display()));
    out.push_str(&format!(
        "Points: n={} | x=[{:.4}, {:.4}] | y=[{:.4}, {:.4}]\n",
        run.stats.n_points, run.stats.x_min, run.stats.x_max, run.stats.y_min, run.stats.y_max
    ));

    let skipped = &run.dataset.row_errors;
    if !skipped.is_empty() {
        let listed: Vec<String> = skipped
            .iter()
            .take(MAX_LISTED_ROW_ERRORS)
            .map(|e| e.line.to_string())
            .collect();
        let more = if skipped.len() > MAX_LISTED_ROW_ERRORS { ", ..." } else { "" };
        out.push_str(&format!(
            "Skipped lines: {} (line {}{more})\n",
            skipped.len(),
            listed.join(", ")
        ));
    }

    out.push_str(&format!("Breakpoint: xth={xth:.6}\n"));
    out.push_str(&format!(
        "Segments: left n={} | right n={} | shared at xth={}\n",
        run.split.left.len(),
        run.split.right.len(),
        run.split.boundary_count(xth)
    ));
    out.push_str(&format!("Method: {}\n", run.method.display_name()));

    out.push_str("\nCoefficients:\n");
    out.push_str(&format!("- left  (x <= xth): a1={:.6} b1={:.6}\n", c.a1, c.b1));
    out.push_str(&format!("- right (x >  xth): a2={:.6} b2={:.6}\n", c.a2, c.b2));
    out.push_str(&format!(
        "- at xth: left={:.6} right={:.6} gap={:.3e}\n",
        c.left_at(xth),
        c.right_at(xth),
        run.quality.continuity_gap
    ));

    out.push_str("\nFit quality:\n");
    out.push_str(&format!("- R2   = {:.6}\n", run.quality.r2));
    out.push_str(&format!("- SSE  = {:.6}\n", run.quality.sse));
    out.push_str(&format!("- RMSE = {:.6}\n", run.quality.rmse));

    out
}

/// Format the per-sample table in input order.
pub fn format_points_table(run: &RunOutput) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>12} {:>12} {:>12} {:>12} {:<7}\n",
            "x", "y", "fx", "residual", "segment"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<12} {:-<12} {:-<12} {:-<7}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    let samples = &run.dataset.samples;
    for ((x, y), fx) in samples.iter().zip(&run.evaluation.fitted) {
        out.push_str(
            format!(
                "{:>12.4} {:>12.4} {:>12.4} {:>12.4} {:<7}\n",
                x,
                y,
                fx,
                y - fx,
                Coefficients::segment_for(x, run.threshold).as_str()
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}
