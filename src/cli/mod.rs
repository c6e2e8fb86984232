//! Command-line parsing for the bilinear regression tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting code. Input paths fall back to `BYLIN_DATASET` / `BYLIN_THRESHOLD`
//! (a `.env` file is honoured) and then to files in the working directory.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::FitMethod;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bylin", version, about = "Bilinear (two-segment) regression at a fixed breakpoint")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the dataset at the breakpoint, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Plot a previously exported fit JSON.
    Plot(PlotArgs),
    /// Write a synthetic dataset and threshold file.
    Synth(SynthArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Two-column dataset file (x y per line).
    #[arg(long, env = "BYLIN_DATASET", default_value = "dataset.txt")]
    pub dataset: PathBuf,

    /// Single-value breakpoint file.
    #[arg(long, env = "BYLIN_THRESHOLD", default_value = "threshold.txt")]
    pub threshold: PathBuf,

    /// Coefficient estimator.
    #[arg(long, value_enum, default_value_t = FitMethod::ClosedForm)]
    pub method: FitMethod,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Print the per-sample table (x, y, fx, residual, segment).
    #[arg(long)]
    pub points: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write an SVG chart of the fit.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Chart style JSON (fields not given keep their defaults).
    #[arg(long, value_name = "JSON")]
    pub style: Option<PathBuf>,

    /// Export per-sample results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fit (coefficients + quality + fitted grid) to JSON.
    #[arg(long = "export-fit")]
    pub export_fit: Option<PathBuf>,
}

/// Options for plotting a saved fit.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Fit JSON file produced by `bylin fit --export-fit`.
    #[arg(long, value_name = "JSON")]
    pub fit: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for synthetic data generation.
#[derive(Debug, Parser)]
pub struct SynthArgs {
    /// Directory receiving `dataset.txt` and `threshold.txt`.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 40)]
    pub count: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, default_value_t = 20.0)]
    pub x_min: f64,

    #[arg(long, default_value_t = 400.0)]
    pub x_max: f64,

    /// Breakpoint written to `threshold.txt`.
    #[arg(long, default_value_t = 150.0)]
    pub xth: f64,

    /// Left slope.
    #[arg(long, default_value_t = -0.0012, allow_hyphen_values = true)]
    pub a1: f64,

    /// Left intercept.
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub b1: f64,

    /// Right slope (right intercept follows from continuity).
    #[arg(long, default_value_t = -0.0004, allow_hyphen_values = true)]
    pub a2: f64,

    /// Standard deviation of the noise added to y.
    #[arg(long, default_value_t = 0.005)]
    pub noise: f64,
}
